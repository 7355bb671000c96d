//! Ball and paddle physics
//!
//! One call to [`step`] moves the paddle, integrates the ball and resolves its contacts
//! with the walls, the bottom boundary, the paddle and every active brick. The ball's
//! speed is renormalized last, after every response has run.

use glam::Vec2;

use super::collision::{ball_rect_collision, bounce_off, paddle_hit_offset, separate};
use super::effects::{spawn_penalty_gnome, spawn_reward_gnome};
use super::events::GameEvent;
use super::rng::RandomSource;
use super::state::{EffectKind, Phase, WorldState};
use super::target::refresh_target;
use super::tick::TickInput;
use crate::tuning::Tuning;
use crate::vocab::VocabPool;

/// Ball is respawned this far above the paddle after a life is lost
const RESPAWN_HEIGHT: f32 = 30.0;
/// Horizontal drift range of a respawned ball
const RESPAWN_DRIFT: f32 = 3.0;

/// What the bottom boundary did this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BottomOutcome {
    /// Ball is still in play
    InPlay,
    /// Shield consumed, ball bounced
    Saved,
    /// A life was lost, the world is paused
    LifeLost,
    /// The last life was lost, the run is over
    RunEnded,
}

/// Closing remark for a finished run, by score band
pub fn closing_remark(score: u64) -> &'static str {
    match score {
        5000.. => "Outstanding recall. Vocabulary mastery confirmed.",
        2000..=4999 => "Solid session. Keep the streak alive.",
        500..=1999 => "Progress logged. Review the words you missed.",
        _ => "Session terminated. Consistent study patterns required.",
    }
}

/// Current canonical ball speed
#[inline]
pub fn target_speed(world: &WorldState, tuning: &Tuning) -> f32 {
    tuning.ball_speed_for(world.effects.is_active(EffectKind::SpeedUp))
}

/// Rescale the ball's velocity to the canonical speed
pub fn renormalize_ball(world: &mut WorldState, tuning: &Tuning) {
    let speed = target_speed(world, tuning);
    world.ball.vel = crate::with_speed(world.ball.vel, speed);
}

/// Move the paddle from held directions or the pointer
///
/// Reverse controls mirror the held directions. A pointer position places the paddle
/// centre directly and is not mirrored.
pub fn move_paddle(world: &mut WorldState, input: &TickInput, tuning: &Tuning) {
    let width = world.canvas.x;
    if let Some(x) = input.pointer_x {
        world.paddle.set_center_x(x, width);
        return;
    }

    let mut dir = 0.0;
    if input.left {
        dir -= 1.0;
    }
    if input.right {
        dir += 1.0;
    }
    if world.effects.is_active(EffectKind::ReverseControls) {
        dir = -dir;
    }
    world.paddle.pos.x += dir * tuning.paddle_speed;
    world.paddle.clamp_to(width);
}

/// Record the trail and advance the ball by its velocity
///
/// A caught ball stays pinned above the paddle centre. Returns false in that case so the
/// caller skips contact resolution.
pub fn integrate_ball(world: &mut WorldState, tuning: &Tuning) -> bool {
    world.ball.record_trail();

    if world.ball.caught {
        let speed = target_speed(world, tuning);
        let paddle = world.paddle.clone();
        world.ball.rest_on(&paddle);
        world.ball.vel = Vec2::new(0.0, -speed);
        return false;
    }

    if world.effects.is_active(EffectKind::Magnet) {
        world.ball.vel.x += (world.paddle.center_x() - world.ball.pos.x) * tuning.magnet_pull;
    }
    world.ball.pos += world.ball.vel;
    true
}

/// Left, right and top walls: clamp inside and point the velocity back into the field
pub fn resolve_walls(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    let ball = &mut world.ball;
    let r = ball.radius;
    let mut bounced = false;

    if ball.pos.x - r < 0.0 {
        ball.pos.x = r;
        ball.vel.x = ball.vel.x.abs();
        bounced = true;
    }
    if ball.pos.x + r > world.canvas.x {
        ball.pos.x = world.canvas.x - r;
        ball.vel.x = -ball.vel.x.abs();
        bounced = true;
    }
    if ball.pos.y - r < 0.0 {
        ball.pos.y = r;
        ball.vel.y = ball.vel.y.abs();
        bounced = true;
    }

    if bounced {
        events.push(GameEvent::WallBounce { pos: ball.pos });
    }
}

/// Ball below the canvas: shield save, life loss, or run end
pub fn resolve_bottom(
    world: &mut WorldState,
    rng: &mut dyn RandomSource,
    events: &mut Vec<GameEvent>,
) -> BottomOutcome {
    let r = world.ball.radius;
    if world.ball.pos.y + r <= world.canvas.y {
        return BottomOutcome::InPlay;
    }

    if world.effects.is_active(EffectKind::Shield) {
        world.effects.set(EffectKind::Shield, 0);
        world.ball.vel.y = -world.ball.vel.y.abs();
        world.ball.pos.y = world.canvas.y - r - 1.0;
        world.log = "SHIELD SAVED".to_string();
        log::debug!("Shield absorbed a lost ball");
        events.push(GameEvent::ShieldSaved {
            pos: world.ball.pos,
        });
        return BottomOutcome::Saved;
    }

    if world.run_ended {
        return BottomOutcome::RunEnded;
    }

    world.lives = world.lives.saturating_sub(1);
    world.combo = 0;
    events.push(GameEvent::LifeLost { lives: world.lives });

    if world.lives == 0 {
        world.run_ended = true;
        world.phase = Phase::GameOver;
        let remark = closing_remark(world.score);
        world.log = "SESSION TERMINATED.".to_string();
        log::info!("Run ended on level {} with score {}", world.level, world.score);
        events.push(GameEvent::RunEnded {
            score: world.score,
            remark: remark.to_string(),
        });
        return BottomOutcome::RunEnded;
    }

    log::debug!("Ball lost, {} lives left", world.lives);
    let drift = rng.range(-RESPAWN_DRIFT, RESPAWN_DRIFT);
    let ball = &mut world.ball;
    ball.pos = Vec2::new(world.paddle.center_x(), world.paddle.pos.y - RESPAWN_HEIGHT);
    ball.vel = Vec2::new(drift, -ball.vel.y.abs());
    ball.clear_trail();
    world.phase = Phase::Paused;
    BottomOutcome::LifeLost
}

/// Paddle contact: rebound angle from the hit offset, or a magnet catch
pub fn resolve_paddle(world: &mut WorldState, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    let rect = world.paddle.rect();
    let ball = &mut world.ball;
    if ball.caught || ball.vel.y < 0.0 {
        return;
    }
    let result = ball_rect_collision(ball.pos, ball.radius, &rect);
    if !result.hit {
        return;
    }

    let speed = tuning.ball_speed_for(world.effects.is_active(EffectKind::SpeedUp));
    if world.effects.is_active(EffectKind::Magnet) {
        ball.caught = true;
        ball.rest_on(&world.paddle);
        ball.vel = Vec2::new(0.0, -speed);
        log::debug!("Ball caught by magnet");
        events.push(GameEvent::BallCaught { pos: ball.pos });
        return;
    }

    let offset = paddle_hit_offset(ball.pos.x, &rect);
    ball.vel.y = -ball.vel.y.abs();
    ball.vel.x = offset * speed * tuning.paddle_rebound;
    ball.pos.y = rect.min.y - ball.radius;
    events.push(GameEvent::PaddleBounce {
        pos: Vec2::new(ball.pos.x, rect.min.y),
    });
}

/// Brick contacts: reflect, then score the hit
///
/// At most one brick is resolved per tick. The ball is pushed fully outside it, so a brick
/// never registers twice in the same tick. A brick whose id is missing from the pool is
/// taken out of play without scoring (debug builds assert).
pub fn resolve_bricks(
    world: &mut WorldState,
    pool: &VocabPool,
    tuning: &Tuning,
    rng: &mut dyn RandomSource,
    events: &mut Vec<GameEvent>,
) {
    for index in 0..world.bricks.len() {
        if !world.bricks[index].active {
            continue;
        }
        let rect = world.bricks[index].rect;
        let result = ball_rect_collision(world.ball.pos, world.ball.radius, &rect);
        if !result.hit {
            continue;
        }

        world.ball.pos = separate(world.ball.pos, &result);
        world.ball.vel = bounce_off(world.ball.vel, result.normal);

        let id = world.bricks[index].id;
        let Some(item) = pool.get(id) else {
            debug_assert!(false, "brick {} references unknown vocabulary id", id);
            log::error!("Brick {} references unknown vocabulary id, removing it", id);
            let brick = &mut world.bricks[index];
            brick.active = false;
            brick.is_target = false;
            break;
        };
        let word = item.word.to_uppercase();

        if world.bricks[index].is_target {
            hit_target(world, index, &word, pool, tuning, rng, events);
        } else {
            hit_wrong(world, index, &word, tuning, rng, events);
        }
        break;
    }
}

fn hit_target(
    world: &mut WorldState,
    index: usize,
    word: &str,
    pool: &VocabPool,
    tuning: &Tuning,
    rng: &mut dyn RandomSource,
    events: &mut Vec<GameEvent>,
) {
    world.wrong_hits = 0;
    let brick = &mut world.bricks[index];
    brick.hits = brick.hits.saturating_sub(1);
    let (id, rect) = (brick.id, brick.rect);

    if brick.hits > 0 {
        events.push(GameEvent::BrickCracked {
            id,
            pos: world.ball.pos,
        });
        return;
    }

    brick.active = false;
    brick.is_target = false;
    let gain = tuning.base_score + u64::from(world.combo) * tuning.combo_bonus;
    world.score += gain;
    world.combo += 1;
    world.hit_stop = tuning.hit_stop_ticks;
    world.log = format!("GOT: {}", word);
    log::debug!("Target {} destroyed for {} (combo {})", word, gain, world.combo);
    events.push(GameEvent::BrickDestroyed {
        id,
        pos: rect.center(),
        gain,
        combo: world.combo,
    });

    spawn_reward_gnome(world, &rect, tuning, rng, events);

    world.objective = refresh_target(&mut world.bricks, pool, rng);
    if let Some(objective) = &world.objective {
        events.push(GameEvent::TargetChanged {
            id: objective.brick_id,
            prompt: objective.prompt(),
        });
    }
}

fn hit_wrong(
    world: &mut WorldState,
    index: usize,
    word: &str,
    tuning: &Tuning,
    rng: &mut dyn RandomSource,
    events: &mut Vec<GameEvent>,
) {
    let (id, rect) = (world.bricks[index].id, world.bricks[index].rect);
    world.score = world.score.saturating_sub(tuning.wrong_hit_penalty);
    world.combo = 0;
    world.wrong_hits += 1;
    world.log = format!("WRONG: {}", word);
    log::debug!("Wrong brick {} ({} in a row)", word, world.wrong_hits);
    events.push(GameEvent::WrongHit {
        id,
        pos: rect.center(),
        penalty: tuning.wrong_hit_penalty,
    });

    if world.wrong_hits >= tuning.wrong_hit_threshold {
        world.wrong_hits = 0;
        spawn_penalty_gnome(world, &rect, tuning, rng, events);
    }
}

/// One physics step; returns the bottom-boundary outcome
pub fn step(
    world: &mut WorldState,
    pool: &VocabPool,
    tuning: &Tuning,
    rng: &mut dyn RandomSource,
    input: &TickInput,
    events: &mut Vec<GameEvent>,
) -> BottomOutcome {
    move_paddle(world, input, tuning);

    if !integrate_ball(world, tuning) {
        return BottomOutcome::InPlay;
    }

    resolve_walls(world, events);
    let outcome = resolve_bottom(world, rng, events);
    if matches!(outcome, BottomOutcome::LifeLost | BottomOutcome::RunEnded) {
        renormalize_ball(world, tuning);
        return outcome;
    }

    resolve_paddle(world, tuning, events);
    resolve_bricks(world, pool, tuning, rng, events);
    renormalize_ball(world, tuning);
    outcome
}
