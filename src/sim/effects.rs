//! Timed effects and falling gnomes
//!
//! Gnomes drop from destroyed targets (and from wrong-hit streaks), fall under gravity,
//! bounce off the side walls, and either get popped by the ball for points or land on
//! the paddle and apply their effect.

use glam::Vec2;

use super::collision::ball_rect_overlap;
use super::events::GameEvent;
use super::rng::RandomSource;
use super::state::{EffectKind, Gnome, GnomeKind, GnomePhase, Rect, WorldState};
use crate::consts::GNOME_WIDTH;
use crate::tuning::Tuning;

/// Launch speed of a gnome popping out of a destroyed target (upward)
const REWARD_LAUNCH_VY: f32 = -5.0;
/// Launch speed of a gnome dropped by a wrong-hit streak (downward)
const PENALTY_LAUNCH_VY: f32 = 5.0;

/// Weighted variant draw for reward drops
pub fn choose_kind(tuning: &Tuning, rng: &mut dyn RandomSource) -> GnomeKind {
    let total = tuning.beneficial_weight + tuning.harmful_weight + tuning.speedy_weight;
    let roll = rng.next_f32() * total;
    if roll < tuning.beneficial_weight {
        GnomeKind::Beneficial
    } else if roll < tuning.beneficial_weight + tuning.harmful_weight {
        GnomeKind::Harmful
    } else {
        GnomeKind::Speedy
    }
}

/// Effect a gnome of this kind carries
pub fn choose_effect(kind: GnomeKind, rng: &mut dyn RandomSource) -> EffectKind {
    const BENEFICIAL: [EffectKind; 3] = [EffectKind::Shield, EffectKind::Magnet, EffectKind::Grow];
    const HARMFUL: [EffectKind; 2] = [EffectKind::ReverseControls, EffectKind::Shrink];

    match kind {
        GnomeKind::Beneficial => BENEFICIAL[rng.index(BENEFICIAL.len())],
        GnomeKind::Harmful => HARMFUL[rng.index(HARMFUL.len())],
        GnomeKind::Speedy => EffectKind::SpeedUp,
    }
}

/// Spawn a gnome whose top edge is centred on `at`
pub fn spawn_gnome(
    world: &mut WorldState,
    kind: GnomeKind,
    at: Vec2,
    vy: f32,
    tuning: &Tuning,
    rng: &mut dyn RandomSource,
    events: &mut Vec<GameEvent>,
) {
    let effect = choose_effect(kind, rng);
    let vx = rng.range(-tuning.gnome_spread, tuning.gnome_spread);
    let id = world.next_gnome_id();
    let pos = Vec2::new(at.x - GNOME_WIDTH / 2.0, at.y);

    log::debug!("Spawned {:?} gnome {} carrying {:?}", kind, id, effect);
    world.gnomes.push(Gnome {
        id,
        pos,
        vel: Vec2::new(vx, vy),
        kind,
        phase: GnomePhase::Falling,
        timer: 0,
        effect,
        bounce_count: 0,
        rotation: 0.0,
    });
    events.push(GameEvent::GnomeSpawned { kind, pos });
}

/// Maybe drop a gnome from a destroyed target
pub fn spawn_reward_gnome(
    world: &mut WorldState,
    brick: &Rect,
    tuning: &Tuning,
    rng: &mut dyn RandomSource,
    events: &mut Vec<GameEvent>,
) {
    if !rng.chance(tuning.gnome_spawn_chance) {
        return;
    }
    let kind = choose_kind(tuning, rng);
    let at = Vec2::new(brick.center().x, brick.min.y - 10.0);
    spawn_gnome(world, kind, at, REWARD_LAUNCH_VY, tuning, rng, events);
}

/// Drop a harmful gnome after a wrong-hit streak
pub fn spawn_penalty_gnome(
    world: &mut WorldState,
    brick: &Rect,
    tuning: &Tuning,
    rng: &mut dyn RandomSource,
    events: &mut Vec<GameEvent>,
) {
    let at = Vec2::new(brick.center().x, brick.min.y);
    spawn_gnome(world, GnomeKind::Harmful, at, PENALTY_LAUNCH_VY, tuning, rng, events);
}

/// Start (or restart) an effect's timer
pub fn apply_effect(
    world: &mut WorldState,
    effect: EffectKind,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) {
    world.effects.set(effect, effect.duration(tuning));
    world.log = effect.label().to_string();
    log::debug!("Effect {:?} for {} ticks", effect, effect.duration(tuning));
    events.push(GameEvent::EffectApplied {
        effect,
        pos: Vec2::new(world.paddle.center_x(), world.paddle.pos.y),
    });
}

/// Apply shrink/grow to the paddle width
pub fn sync_paddle_width(world: &mut WorldState, tuning: &Tuning) {
    let mut factor = 1.0;
    if world.effects.is_active(EffectKind::Shrink) {
        factor *= tuning.shrink_factor;
    }
    if world.effects.is_active(EffectKind::Grow) {
        factor *= tuning.grow_factor;
    }
    let width = world.paddle.base_width * factor;
    if (world.paddle.width - width).abs() > f32::EPSILON {
        world.paddle.set_width(width, world.canvas.x);
    }
}

/// Advance every gnome one tick and resolve its contacts with the ball and paddle
pub fn update_gnomes(world: &mut WorldState, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    let mut gnomes = std::mem::take(&mut world.gnomes);
    let max_x = world.canvas.x - GNOME_WIDTH;
    let mut ball_flipped = false;

    gnomes.retain_mut(|gnome| {
        if gnome.is_bursting() {
            gnome.timer = gnome.timer.saturating_sub(1);
            return gnome.timer > 0;
        }

        gnome.vel.y += tuning.gnome_gravity;
        gnome.pos += gnome.vel;
        gnome.rotation += gnome.vel.x * 0.05;

        if gnome.pos.x < 0.0 || gnome.pos.x > max_x {
            gnome.pos.x = gnome.pos.x.clamp(0.0, max_x.max(0.0));
            gnome.vel.x = if gnome.pos.x <= 0.0 {
                gnome.vel.x.abs()
            } else {
                -gnome.vel.x.abs()
            };
            gnome.bounce_count += 1;
            gnome.phase = GnomePhase::Bouncing;
        }

        let rect = gnome.rect();
        let ball = &mut world.ball;
        if !ball.caught && ball_rect_overlap(ball.pos, ball.radius, &rect) {
            gnome.burst(tuning.burst_ticks_ball);
            world.score += tuning.gnome_burst_bonus;
            // Two gnomes popped in one tick must not cancel each other's reflection
            if !ball_flipped {
                ball.vel.y = -ball.vel.y;
                ball_flipped = true;
            }
            log::debug!("Gnome {} popped by the ball", gnome.id);
            events.push(GameEvent::GnomeBurst {
                kind: gnome.kind,
                pos: rect.center(),
                bonus: tuning.gnome_burst_bonus,
            });
            return true;
        }

        if rect.intersects(&world.paddle.rect()) {
            apply_effect(world, gnome.effect, tuning, events);
            gnome.burst(tuning.burst_ticks_paddle);
            return true;
        }

        // Missed gnomes leave quietly
        gnome.pos.y <= world.canvas.y
    });

    world.gnomes = gnomes;
}

/// Decrement every effect counter and re-derive the paddle width
pub fn tick_effects(world: &mut WorldState, tuning: &Tuning) {
    world.effects.tick();
    sync_paddle_width(world, tuning);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::GNOME_HEIGHT;
    use crate::sim::rng::ScriptedRng;

    fn world() -> (WorldState, Tuning) {
        let tuning = Tuning::default();
        (WorldState::new(&tuning), tuning)
    }

    fn park_ball(world: &mut WorldState) {
        world.ball.pos = Vec2::new(20.0, 20.0);
    }

    #[test]
    fn test_weighted_kind_draw() {
        let tuning = Tuning::default();
        assert_eq!(choose_kind(&tuning, &mut ScriptedRng::constant(0.0)), GnomeKind::Beneficial);
        assert_eq!(choose_kind(&tuning, &mut ScriptedRng::constant(0.85)), GnomeKind::Harmful);
        assert_eq!(choose_kind(&tuning, &mut ScriptedRng::constant(0.99)), GnomeKind::Speedy);
    }

    #[test]
    fn test_effects_match_kind() {
        let mut rng = ScriptedRng::new(&[0.0, 0.4, 0.9]);
        for _ in 0..3 {
            assert!(choose_effect(GnomeKind::Beneficial, &mut rng).is_beneficial());
            assert!(!choose_effect(GnomeKind::Harmful, &mut rng).is_beneficial());
        }
        assert_eq!(choose_effect(GnomeKind::Speedy, &mut rng), EffectKind::SpeedUp);
    }

    #[test]
    fn test_gravity_and_fall_off() {
        let (mut world, tuning) = world();
        park_ball(&mut world);
        let mut events = Vec::new();
        let mut rng = ScriptedRng::constant(0.5);
        spawn_gnome(&mut world, GnomeKind::Beneficial, Vec2::new(300.0, 100.0), 0.0, &tuning, &mut rng, &mut events);

        update_gnomes(&mut world, &tuning, &mut events);
        assert!((world.gnomes[0].vel.y - tuning.gnome_gravity).abs() < 1e-6);

        // Move it below the canvas, away from the paddle
        world.gnomes[0].pos = Vec2::new(10.0, world.canvas.y + 1.0);
        world.paddle.set_center_x(world.canvas.x - 10.0, world.canvas.x);
        update_gnomes(&mut world, &tuning, &mut events);
        assert!(world.gnomes.is_empty());
        assert_eq!(world.score, 0);
    }

    #[test]
    fn test_side_wall_bounce() {
        let (mut world, tuning) = world();
        park_ball(&mut world);
        let mut events = Vec::new();
        let mut rng = ScriptedRng::constant(0.5);
        spawn_gnome(&mut world, GnomeKind::Harmful, Vec2::new(300.0, 100.0), 0.0, &tuning, &mut rng, &mut events);
        world.gnomes[0].pos.x = 1.0;
        world.gnomes[0].vel.x = -4.0;

        update_gnomes(&mut world, &tuning, &mut events);
        let gnome = &world.gnomes[0];
        assert_eq!(gnome.pos.x, 0.0);
        assert!(gnome.vel.x > 0.0);
        assert_eq!(gnome.phase, GnomePhase::Bouncing);
        assert_eq!(gnome.bounce_count, 1);
    }

    #[test]
    fn test_ball_pops_gnome() {
        let (mut world, tuning) = world();
        let mut events = Vec::new();
        let mut rng = ScriptedRng::constant(0.5);
        spawn_gnome(&mut world, GnomeKind::Beneficial, Vec2::new(300.0, 200.0), 0.0, &tuning, &mut rng, &mut events);
        world.ball.pos = Vec2::new(300.0, 200.0 + GNOME_HEIGHT / 2.0);
        world.ball.vel = Vec2::new(0.0, -8.0);

        update_gnomes(&mut world, &tuning, &mut events);
        assert_eq!(world.gnomes[0].phase, GnomePhase::Bursting);
        assert_eq!(world.gnomes[0].timer, tuning.burst_ticks_ball);
        assert_eq!(world.score, tuning.gnome_burst_bonus);
        assert_eq!(world.ball.vel.y, 8.0);

        for _ in 0..tuning.burst_ticks_ball {
            update_gnomes(&mut world, &tuning, &mut events);
        }
        assert!(world.gnomes.is_empty());
    }

    #[test]
    fn test_paddle_catch_applies_effect() {
        let (mut world, tuning) = world();
        park_ball(&mut world);
        let mut events = Vec::new();
        // Effect index draw 0.0 -> Shield
        let mut rng = ScriptedRng::constant(0.0);
        let at = Vec2::new(world.paddle.center_x(), world.paddle.pos.y - GNOME_HEIGHT + 2.0);
        spawn_gnome(&mut world, GnomeKind::Beneficial, at, 0.0, &tuning, &mut rng, &mut events);
        world.gnomes[0].vel.x = 0.0;

        update_gnomes(&mut world, &tuning, &mut events);
        assert_eq!(world.effects.get(EffectKind::Shield), tuning.shield_ticks);
        assert_eq!(world.gnomes[0].phase, GnomePhase::Bursting);
        assert!(events.iter().any(|e| matches!(e, GameEvent::EffectApplied { effect: EffectKind::Shield, .. })));
    }

    #[test]
    fn test_shrink_and_grow_resize_paddle() {
        let (mut world, tuning) = world();
        let base = world.paddle.base_width;
        world.effects.set(EffectKind::Shrink, 2);
        tick_effects(&mut world, &tuning);
        assert!((world.paddle.width - base * tuning.shrink_factor).abs() < 1e-4);
        tick_effects(&mut world, &tuning);
        assert!((world.paddle.width - base).abs() < 1e-4);

        world.effects.set(EffectKind::Grow, 5);
        tick_effects(&mut world, &tuning);
        assert!((world.paddle.width - base * tuning.grow_factor).abs() < 1e-4);
    }
}
