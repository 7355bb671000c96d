//! Fixed timestep simulation tick
//!
//! One call advances the world by one frame. Phase gates run first (quit, restart,
//! intro countdown, pause), then hit-stop, physics, level completion, gnomes and
//! effect timers, in that order.

use super::effects::{tick_effects, update_gnomes};
use super::events::GameEvent;
use super::layout::start_level;
use super::physics::{self, BottomOutcome};
use super::rng::RandomSource;
use super::state::{Phase, WorldState};
use crate::tuning::Tuning;
use crate::vocab::VocabPool;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Move-left held
    pub left: bool,
    /// Move-right held
    pub right: bool,
    /// Pause toggle
    pub pause: bool,
    /// Resume when paused, otherwise release a caught ball
    pub action: bool,
    /// Regenerate the current level
    pub restart: bool,
    /// Leave the run
    pub quit: bool,
    /// Paddle centre from the pointer, in game space
    pub pointer_x: Option<f32>,
}

/// Advance the world by one tick
pub fn tick(
    world: &mut WorldState,
    pool: &VocabPool,
    tuning: &Tuning,
    rng: &mut dyn RandomSource,
    input: &TickInput,
    events: &mut Vec<GameEvent>,
) {
    if world.phase.is_terminal() {
        return;
    }

    if input.quit {
        quit(world, events);
        return;
    }
    if input.restart {
        log::info!("Restarting level {}", world.level);
        start_level(world, pool, tuning, rng, events);
        return;
    }

    match world.phase {
        Phase::LevelIntro { ticks_left } => {
            world.phase = if ticks_left <= 1 {
                Phase::Paused
            } else {
                Phase::LevelIntro {
                    ticks_left: ticks_left - 1,
                }
            };
            return;
        }
        Phase::Paused => {
            if input.pause || input.action {
                world.phase = Phase::Playing;
                events.push(GameEvent::Resumed);
            }
            return;
        }
        Phase::Playing => {
            if input.pause {
                world.phase = Phase::Paused;
                events.push(GameEvent::Paused);
                return;
            }
        }
        Phase::GameOver | Phase::Quit => return,
    }

    if input.action && world.ball.caught {
        world.ball.caught = false;
        log::debug!("Ball released");
        events.push(GameEvent::BallReleased);
    }

    if world.hit_stop > 0 {
        world.hit_stop -= 1;
        return;
    }

    let outcome = physics::step(world, pool, tuning, rng, input, events);
    if outcome == BottomOutcome::RunEnded {
        return;
    }

    if world.active_brick_count() == 0 {
        advance_level(world, pool, tuning, rng, events);
        world.tick += 1;
        return;
    }

    update_gnomes(world, tuning, events);
    tick_effects(world, tuning);
    physics::renormalize_ball(world, tuning);

    world.tick += 1;
}

/// Level cleared: bump the counter and lay out the next one
pub fn advance_level(
    world: &mut WorldState,
    pool: &VocabPool,
    tuning: &Tuning,
    rng: &mut dyn RandomSource,
    events: &mut Vec<GameEvent>,
) {
    log::info!("Level {} cleared with score {}", world.level, world.score);
    events.push(GameEvent::LevelCleared { level: world.level });
    world.level += 1;
    start_level(world, pool, tuning, rng, events);
}

/// Discard every transient entity and stop ticking
pub fn quit(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    world.clear_transient();
    world.phase = Phase::Quit;
    log::info!("Quit on level {} with score {}", world.level, world.score);
    events.push(GameEvent::Quit);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::GameRng;
    use crate::sim::state::EffectKind;

    fn started(seed: u64) -> (WorldState, Tuning, VocabPool, GameRng) {
        let tuning = Tuning::default();
        let pool = VocabPool::builtin();
        let mut world = WorldState::new(&tuning);
        let mut rng = GameRng::new(seed);
        let mut events = Vec::new();
        start_level(&mut world, &pool, &tuning, &mut rng, &mut events);
        (world, tuning, pool, rng)
    }

    fn run(
        world: &mut WorldState,
        pool: &VocabPool,
        tuning: &Tuning,
        rng: &mut GameRng,
        input: &TickInput,
        n: u32,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..n {
            tick(world, pool, tuning, rng, input, &mut events);
        }
        events
    }

    fn resume() -> TickInput {
        TickInput {
            action: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_intro_then_paused_then_playing() {
        let (mut world, tuning, pool, mut rng) = started(1);
        // Input is ignored during the intro
        run(&mut world, &pool, &tuning, &mut rng, &resume(), tuning.level_intro_ticks - 1);
        assert!(matches!(world.phase, Phase::LevelIntro { ticks_left: 1 }));
        run(&mut world, &pool, &tuning, &mut rng, &TickInput::default(), 1);
        assert_eq!(world.phase, Phase::Paused);
        assert_eq!(world.tick, 0);

        run(&mut world, &pool, &tuning, &mut rng, &resume(), 1);
        assert_eq!(world.phase, Phase::Playing);
    }

    #[test]
    fn test_tick_pause() {
        let (mut world, tuning, pool, mut rng) = started(2);
        world.phase = Phase::Playing;
        run(&mut world, &pool, &tuning, &mut rng, &TickInput::default(), 5);

        let before = world.clone();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        run(&mut world, &pool, &tuning, &mut rng, &pause, 1);
        assert_eq!(world.phase, Phase::Paused);
        run(&mut world, &pool, &tuning, &mut rng, &TickInput::default(), 10);
        run(&mut world, &pool, &tuning, &mut rng, &pause, 1);
        assert_eq!(world.phase, Phase::Playing);
        assert_eq!(world, before);
    }

    #[test]
    fn test_determinism() {
        let (mut a, tuning, pool, mut rng_a) = started(99_999);
        let (mut b, _, _, mut rng_b) = started(99_999);
        a.phase = Phase::Playing;
        b.phase = Phase::Playing;

        let inputs = [
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput {
                pointer_x: Some(700.0),
                ..Default::default()
            },
            TickInput::default(),
        ];
        for input in inputs.iter().cycle().take(600) {
            let mut events = Vec::new();
            tick(&mut a, &pool, &tuning, &mut rng_a, input, &mut events);
            tick(&mut b, &pool, &tuning, &mut rng_b, input, &mut events);
        }
        assert_eq!(a, b);
    }

    #[test]
    fn test_hit_stop_freezes_simulation() {
        let (mut world, tuning, pool, mut rng) = started(3);
        world.phase = Phase::Playing;
        world.hit_stop = 2;
        world.effects.set(EffectKind::Grow, 5);
        let before = world.ball.clone();

        run(&mut world, &pool, &tuning, &mut rng, &TickInput::default(), 2);
        assert_eq!(world.ball, before);
        assert_eq!(world.effects.get(EffectKind::Grow), 5);
        assert_eq!(world.hit_stop, 0);

        run(&mut world, &pool, &tuning, &mut rng, &TickInput::default(), 1);
        assert_eq!(world.effects.get(EffectKind::Grow), 4);
    }

    #[test]
    fn test_level_advance_when_cleared() {
        let (mut world, tuning, pool, mut rng) = started(4);
        world.phase = Phase::Playing;
        for brick in &mut world.bricks {
            brick.active = false;
        }
        world.score = 1200;

        let events = run(&mut world, &pool, &tuning, &mut rng, &TickInput::default(), 1);
        assert_eq!(world.level, 2);
        assert_eq!(world.score, 1200);
        assert_eq!(world.active_brick_count(), tuning.bricks_per_level);
        assert!(matches!(world.phase, Phase::LevelIntro { .. }));
        assert!(events.contains(&GameEvent::LevelCleared { level: 1 }));
    }

    #[test]
    fn test_unfit_grid_does_not_skip_levels() {
        let pool = VocabPool::builtin();
        let tuning = Tuning {
            layout: crate::tuning::LayoutStyle::Grid { columns: 1 },
            level_intro_ticks: 0,
            ..Default::default()
        };
        let mut world = WorldState::new(&tuning);
        let mut rng = GameRng::new(12);
        let mut events = Vec::new();
        start_level(&mut world, &pool, &tuning, &mut rng, &mut events);
        assert!(world.active_brick_count() > 0);

        run(&mut world, &pool, &tuning, &mut rng, &resume(), 10);
        assert_eq!(world.level, 1);
    }

    #[test]
    fn test_restart_keeps_score_and_lives() {
        let (mut world, tuning, pool, mut rng) = started(5);
        world.phase = Phase::Playing;
        world.score = 300;
        world.lives = 2;
        world.effects.set(EffectKind::Magnet, 50);
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        run(&mut world, &pool, &tuning, &mut rng, &restart, 1);
        assert_eq!(world.score, 300);
        assert_eq!(world.lives, 2);
        assert_eq!(world.level, 1);
        assert!(!world.effects.is_active(EffectKind::Magnet));
        assert!(matches!(world.phase, Phase::LevelIntro { .. }));
    }

    #[test]
    fn test_quit_clears_and_stops() {
        let (mut world, tuning, pool, mut rng) = started(6);
        world.phase = Phase::Playing;
        world.effects.set(EffectKind::Shield, 100);
        let quit = TickInput {
            quit: true,
            ..Default::default()
        };
        let events = run(&mut world, &pool, &tuning, &mut rng, &quit, 1);
        assert_eq!(world.phase, Phase::Quit);
        assert_eq!(world.effects, Default::default());
        assert!(world.gnomes.is_empty());
        assert_eq!(events, vec![GameEvent::Quit]);

        let frozen = world.clone();
        run(&mut world, &pool, &tuning, &mut rng, &resume(), 10);
        assert_eq!(world, frozen);
    }

    #[test]
    fn test_action_releases_caught_ball() {
        let (mut world, tuning, pool, mut rng) = started(7);
        world.phase = Phase::Playing;
        world.ball.caught = true;
        run(&mut world, &pool, &tuning, &mut rng, &TickInput::default(), 3);
        assert!(world.ball.caught);
        assert_eq!(world.ball.pos.x, world.paddle.center_x());

        let events = run(&mut world, &pool, &tuning, &mut rng, &resume(), 1);
        assert!(!world.ball.caught);
        assert!(events.contains(&GameEvent::BallReleased));
        assert!(world.ball.vel.y < 0.0);
    }
}
