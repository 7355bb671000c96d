//! Idle/demo mode: generates input that plays the game
//!
//! The autopilot reads the world and produces a `TickInput` like a player would. It
//! predicts where a falling ball meets the paddle line, and goes after beneficial gnomes
//! while the ball is safely on its way up.

use super::state::{EffectKind, GnomeKind, Phase, WorldState};
use super::tick::TickInput;

/// Ball is considered safe above this fraction of the canvas height while rising
const SAFE_HEIGHT_FRACTION: f32 = 0.5;

/// Horizontal position where the ball will cross `line_y`, folding wall bounces
pub fn predict_landing_x(world: &WorldState, line_y: f32) -> f32 {
    let ball = &world.ball;
    let r = ball.radius;
    if ball.vel.y <= f32::EPSILON {
        return ball.pos.x;
    }
    let t = (line_y - ball.pos.y) / ball.vel.y;
    let unfolded = ball.pos.x + ball.vel.x * t;

    let span = (world.canvas.x - 2.0 * r).max(1.0);
    let u = (unfolded - r).rem_euclid(2.0 * span);
    let folded = if u > span { 2.0 * span - u } else { u };
    folded + r
}

/// Compute this tick's input for the current world
pub fn autopilot_input(world: &WorldState) -> TickInput {
    let mut input = TickInput::default();

    match world.phase {
        Phase::Paused => {
            input.action = true;
            return input;
        }
        Phase::Playing => {}
        _ => return input,
    }

    if world.ball.caught {
        input.action = true;
    }

    let ball = &world.ball;
    let paddle_line = world.paddle.pos.y - ball.radius;
    let ball_is_safe = ball.vel.y < 0.0 && ball.pos.y < world.canvas.y * SAFE_HEIGHT_FRACTION;

    let gnome_x = world
        .gnomes
        .iter()
        .filter(|g| !g.is_bursting() && g.kind == GnomeKind::Beneficial)
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|g| g.rect().center().x);

    let target_x = match gnome_x {
        Some(x) if ball_is_safe => x,
        _ if ball.vel.y > 0.0 => predict_landing_x(world, paddle_line),
        _ => ball.pos.x,
    };

    // Keep the hit a little off-centre so the rebound is not perfectly vertical
    let aim = target_x + world.paddle.width * 0.1;
    let diff = aim - world.paddle.center_x();
    let dead_zone = world.paddle.width * 0.15;

    let (mut left, mut right) = (diff < -dead_zone, diff > dead_zone);
    if world.effects.is_active(EffectKind::ReverseControls) {
        std::mem::swap(&mut left, &mut right);
    }
    input.left = left;
    input.right = right;
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::layout::start_level;
    use crate::sim::rng::GameRng;
    use crate::sim::tick::tick;
    use crate::tuning::Tuning;
    use crate::vocab::VocabPool;
    use glam::Vec2;

    #[test]
    fn test_prediction_folds_wall_bounce() {
        let tuning = Tuning::default();
        let mut world = WorldState::new(&tuning);
        world.ball.pos = Vec2::new(50.0, 100.0);
        world.ball.vel = Vec2::new(-4.0, 4.0);
        // Unfolded x = 50 - 100 = -50, mirrored about the left wall at r = 8
        let x = predict_landing_x(&world, 200.0);
        assert!((x - 66.0).abs() < 1e-3);
    }

    #[test]
    fn test_resumes_when_paused() {
        let tuning = Tuning::default();
        let world = WorldState::new(&tuning);
        assert!(autopilot_input(&world).action);
    }

    #[test]
    fn test_reverse_controls_compensated() {
        let tuning = Tuning::default();
        let mut world = WorldState::new(&tuning);
        world.phase = Phase::Playing;
        world.ball.pos = Vec2::new(100.0, 300.0);
        world.ball.vel = Vec2::new(0.0, -8.0);
        assert!(autopilot_input(&world).left);

        world.effects.set(EffectKind::ReverseControls, 10);
        let input = autopilot_input(&world);
        assert!(input.right && !input.left);
    }

    #[test]
    fn test_autopilot_scores() {
        let tuning = Tuning::default();
        let pool = VocabPool::builtin();
        let mut world = WorldState::new(&tuning);
        let mut rng = GameRng::new(42);
        let mut events = Vec::new();
        start_level(&mut world, &pool, &tuning, &mut rng, &mut events);

        for _ in 0..6000 {
            let input = autopilot_input(&world);
            tick(&mut world, &pool, &tuning, &mut rng, &input, &mut events);
            if world.phase.is_terminal() {
                break;
            }
        }
        assert!(world.tick > 500);
        assert!(events.iter().any(|e| matches!(
            e,
            crate::sim::events::GameEvent::BrickDestroyed { .. }
                | crate::sim::events::GameEvent::WrongHit { .. }
        )));
    }
}
