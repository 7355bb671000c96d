use proptest::prelude::*;

use gnome_smash::sim::{
    EffectKind, GameEvent, GameRng, Phase, TickInput, WorldState, start_level, tick,
};
use gnome_smash::{Tuning, VocabPool};

/// Player-like input: mostly movement and the action button, the occasional pause
fn input_strategy() -> impl Strategy<Value = TickInput> {
    (any::<u8>(), proptest::option::weighted(0.2, 0f32..1024.0)).prop_map(|(bits, pointer_x)| {
        TickInput {
            left: bits & 1 != 0,
            right: bits & 2 != 0,
            action: bits & 4 != 0,
            pause: bits == 0xFF,
            pointer_x,
            ..Default::default()
        }
    })
}

fn started(seed: u64, tuning: &Tuning, pool: &VocabPool) -> (WorldState, GameRng) {
    let mut world = WorldState::new(tuning);
    let mut rng = GameRng::new(seed);
    let mut events = Vec::new();
    start_level(&mut world, pool, tuning, &mut rng, &mut events);
    (world, rng)
}

fn expected_speed(world: &WorldState, tuning: &Tuning) -> f32 {
    tuning.ball_speed_for(world.effects.is_active(EffectKind::SpeedUp))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_world_invariants_hold(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 50..400),
    ) {
        let tuning = Tuning { level_intro_ticks: 2, ..Default::default() };
        let pool = VocabPool::builtin();
        let (mut world, mut rng) = started(seed, &tuning, &pool);
        let mut events = Vec::new();

        for input in &inputs {
            let lives_before = world.lives;
            let combo_before = world.combo;
            events.clear();
            tick(&mut world, &pool, &tuning, &mut rng, input, &mut events);

            if world.phase.is_terminal() {
                continue;
            }

            let speed = world.ball.vel.length();
            prop_assert!((speed - expected_speed(&world, &tuning)).abs() < 1e-3,
                "ball speed {} at tick {}", speed, world.tick);

            if world.active_brick_count() > 0 {
                let targets = world.bricks.iter().filter(|b| b.active && b.is_target).count();
                prop_assert_eq!(targets, 1);
            }

            prop_assert!(world.lives <= lives_before);
            let wrong = events.iter().any(|e| matches!(e, GameEvent::WrongHit { .. }));
            let lost = events.iter().any(|e| matches!(e, GameEvent::LifeLost { .. }));
            let new_level = events.iter().any(|e| matches!(e, GameEvent::LevelStarted { .. }));
            if wrong || lost || new_level {
                prop_assert_eq!(world.combo, 0);
            } else {
                let destroyed = events
                    .iter()
                    .filter(|e| matches!(e, GameEvent::BrickDestroyed { .. }))
                    .count() as u32;
                prop_assert_eq!(world.combo, combo_before + destroyed);
            }
        }
    }

    #[test]
    fn prop_run_ends_exactly_once(
        seed in any::<u64>(),
        pointer_x in 0f32..1024.0,
    ) {
        // A parked paddle loses every life sooner or later
        let tuning = Tuning { level_intro_ticks: 0, starting_lives: 2, ..Default::default() };
        let pool = VocabPool::builtin();
        let (mut world, mut rng) = started(seed, &tuning, &pool);
        let input = TickInput { action: true, pointer_x: Some(pointer_x), ..Default::default() };

        let mut events = Vec::new();
        for _ in 0..30_000 {
            tick(&mut world, &pool, &tuning, &mut rng, &input, &mut events);
            if world.phase == Phase::GameOver {
                break;
            }
        }
        for _ in 0..50 {
            tick(&mut world, &pool, &tuning, &mut rng, &input, &mut events);
        }

        let ended = events.iter().filter(|e| matches!(e, GameEvent::RunEnded { .. })).count();
        if world.lives == 0 {
            prop_assert_eq!(ended, 1);
            prop_assert_eq!(world.phase, Phase::GameOver);
        } else {
            prop_assert_eq!(ended, 0);
        }
    }

    #[test]
    fn prop_pause_round_trip(
        seed in any::<u64>(),
        warmup in 1usize..300,
        paused_for in 0usize..30,
    ) {
        let tuning = Tuning { level_intro_ticks: 0, ..Default::default() };
        let pool = VocabPool::builtin();
        let (mut world, mut rng) = started(seed, &tuning, &pool);
        let resume = TickInput { action: true, ..Default::default() };
        let mut events = Vec::new();

        for _ in 0..warmup {
            tick(&mut world, &pool, &tuning, &mut rng, &resume, &mut events);
        }
        prop_assume!(world.phase == Phase::Playing);

        let before = world.clone();
        let pause = TickInput { pause: true, ..Default::default() };
        tick(&mut world, &pool, &tuning, &mut rng, &pause, &mut events);
        prop_assert_eq!(world.phase, Phase::Paused);
        for _ in 0..paused_for {
            tick(&mut world, &pool, &tuning, &mut rng, &TickInput::default(), &mut events);
        }
        tick(&mut world, &pool, &tuning, &mut rng, &pause, &mut events);
        prop_assert_eq!(world, before);
    }

    #[test]
    fn prop_layout_fits_canvas(seed in any::<u64>(), columns in 2u32..8) {
        use gnome_smash::LayoutStyle;
        use gnome_smash::sim::generate_layout;

        let pool = VocabPool::builtin();
        let canvas = gnome_smash::canvas_size();
        let bounds = gnome_smash::sim::Rect::new(0.0, 0.0, canvas.x, canvas.y);
        for style in [LayoutStyle::WordWidth, LayoutStyle::Grid { columns }] {
            let mut rng = GameRng::new(seed);
            let bricks = generate_layout(&pool, 15, canvas, style, 0.2, &mut rng);
            prop_assert!(!bricks.is_empty());
            for (i, a) in bricks.iter().enumerate() {
                prop_assert!(a.rect.within(&bounds));
                for b in &bricks[i + 1..] {
                    prop_assert!(!a.rect.intersects(&b.rect));
                }
            }
        }
    }
}
