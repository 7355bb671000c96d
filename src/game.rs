//! The simulation loop driver
//!
//! `Game` owns the world, the vocabulary pool, the tuning and the random source. Each
//! frame it drains the input buffer, advances one tick, presents a snapshot to the render
//! sink and, when the run ends, invokes the run-end callback exactly once.

use serde::{Deserialize, Serialize};

use crate::input::{InputBuffer, InputEvent};
use crate::render::{RenderSink, Snapshot};
use crate::sim::events::GameEvent;
use crate::sim::layout::start_level;
use crate::sim::rng::{GameRng, RandomSource};
use crate::sim::state::{Phase, WorldState};
use crate::sim::tick::{TickInput, tick};
use crate::tuning::{Tuning, TuningError};
use crate::vocab::VocabPool;

/// Outcome reported when a run ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub score: u64,
    pub level: u32,
    pub remark: String,
}

type RunEndCallback = Box<dyn FnMut(&RunSummary)>;

pub struct Game {
    world: WorldState,
    pool: VocabPool,
    tuning: Tuning,
    rng: Box<dyn RandomSource>,
    input: InputBuffer,
    events: Vec<GameEvent>,
    on_run_end: Option<RunEndCallback>,
    summary: Option<RunSummary>,
}

impl Game {
    /// A game seeded for reproducible runs
    pub fn new(pool: VocabPool, tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        log::info!("New game with seed {}", seed);
        Self::with_rng(pool, tuning, Box::new(GameRng::new(seed)))
    }

    /// A game drawing from a caller-supplied random source
    pub fn with_rng(
        pool: VocabPool,
        tuning: Tuning,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self, TuningError> {
        tuning.validate()?;
        let mut game = Self {
            world: WorldState::new(&tuning),
            pool,
            tuning,
            rng,
            input: InputBuffer::new(),
            events: Vec::new(),
            on_run_end: None,
            summary: None,
        };
        game.new_run();
        Ok(game)
    }

    /// Register the run-end callback (replaces any previous one)
    pub fn on_run_end(&mut self, callback: impl FnMut(&RunSummary) + 'static) {
        self.on_run_end = Some(Box::new(callback));
    }

    /// Start a fresh run: score, lives and level reset, new layout
    pub fn new_run(&mut self) {
        self.world = WorldState::new(&self.tuning);
        self.summary = None;
        self.input.clear();
        self.events.clear();
        start_level(
            &mut self.world,
            &self.pool,
            &self.tuning,
            self.rng.as_mut(),
            &mut self.events,
        );
    }

    /// Queue a platform input event for the next frame
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame from the buffered input
    pub fn frame(&mut self, sink: &mut dyn RenderSink) {
        let input = self.input.take_tick_input();
        self.step(&input, sink);
    }

    /// Run one frame from explicit input (autopilot, replays)
    pub fn step(&mut self, input: &TickInput, sink: &mut dyn RenderSink) {
        tick(
            &mut self.world,
            &self.pool,
            &self.tuning,
            self.rng.as_mut(),
            input,
            &mut self.events,
        );

        let snapshot = Snapshot::capture(&self.world, &self.tuning);
        sink.present(&snapshot, &self.events);

        let ended = self.events.iter().find_map(|event| match event {
            GameEvent::RunEnded { score, remark } => Some((*score, remark.clone())),
            _ => None,
        });
        self.events.clear();

        if let Some((score, remark)) = ended {
            self.finish(score, remark);
        }
    }

    fn finish(&mut self, score: u64, remark: String) {
        if self.summary.is_some() {
            return;
        }
        let summary = RunSummary {
            score,
            level: self.world.level,
            remark,
        };
        if let Some(callback) = self.on_run_end.as_mut() {
            callback(&summary);
        }
        self.summary = Some(summary);
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn pool(&self) -> &VocabPool {
        &self.pool
    }

    /// Set once the run has ended
    pub fn summary(&self) -> Option<&RunSummary> {
        self.summary.as_ref()
    }

    /// False after game over or quit
    pub fn is_running(&self) -> bool {
        !self.world.phase.is_terminal()
    }

    pub fn has_quit(&self) -> bool {
        self.world.phase == Phase::Quit
    }
}
