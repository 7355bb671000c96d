//! Presentation layer
//!
//! The simulation hands a [`Snapshot`] plus the frame's events to a [`RenderSink`] once per
//! tick. Sinks only read; nothing flows back into the world. Cosmetic effects live in
//! [`fx::FxLayer`], which a sink owns and feeds from events.

pub mod fx;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use fx::FxLayer;
pub use scene::{Frame, SceneRenderer};
pub use vertex::Vertex;

use glam::Vec2;
use serde::Serialize;

use crate::sim::events::GameEvent;
use crate::sim::physics::closing_remark;
use crate::sim::state::{EffectKind, Phase, WorldState};
use crate::tuning::Tuning;

/// A positioned text run (the sink picks the font)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub text: String,
    /// Anchor, horizontally centred
    pub pos: Vec2,
    pub color: [f32; 4],
    pub size: f32,
}

/// An active effect as shown in the HUD
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EffectGauge {
    pub kind: EffectKind,
    pub remaining: u32,
    /// Remaining share of the full duration
    pub fraction: f32,
}

/// Numbers and text shown around the playfield
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    pub combo: u32,
    /// Objective prompt, or a placeholder while none is set
    pub objective: String,
    pub log: String,
    /// Share of the level's bricks destroyed
    pub progress: f32,
    pub effects: Vec<EffectGauge>,
}

/// Full-screen overlay for non-playing phases
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Overlay {
    LevelIntro { level: u32 },
    Paused,
    GameOver { score: u64, remark: String },
}

impl Overlay {
    /// Title and hint lines
    pub fn lines(&self) -> Vec<String> {
        match self {
            Overlay::LevelIntro { level } => vec![format!("SECTOR {}", level)],
            Overlay::Paused => vec![
                "PAUSED".to_string(),
                "PRESS [P] TO RESUME".to_string(),
                "PRESS [R] TO RESTART SECTOR".to_string(),
                "PRESS [Q] TO QUIT TO MENU".to_string(),
            ],
            Overlay::GameOver { score, remark } => vec![
                "GAME OVER".to_string(),
                format!("SCORE {:06}", score),
                remark.clone(),
            ],
        }
    }
}

/// Everything a sink needs to draw one frame
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    pub world: &'a WorldState,
    pub hud: Hud,
    pub overlay: Option<Overlay>,
}

impl<'a> Snapshot<'a> {
    pub fn capture(world: &'a WorldState, tuning: &Tuning) -> Self {
        let effects = world
            .effects
            .active()
            .map(|(kind, remaining)| EffectGauge {
                kind,
                remaining,
                fraction: remaining as f32 / kind.duration(tuning).max(1) as f32,
            })
            .collect();

        let hud = Hud {
            score: world.score,
            lives: world.lives,
            level: world.level,
            combo: world.combo,
            objective: world
                .objective
                .as_ref()
                .map(|o| o.prompt())
                .unwrap_or_else(|| "ANALYZING...".to_string()),
            log: world.log.clone(),
            progress: world.level_progress(),
            effects,
        };

        let overlay = match world.phase {
            Phase::LevelIntro { .. } => Some(Overlay::LevelIntro { level: world.level }),
            Phase::Paused => Some(Overlay::Paused),
            Phase::GameOver => Some(Overlay::GameOver {
                score: world.score,
                remark: closing_remark(world.score).to_string(),
            }),
            Phase::Playing | Phase::Quit => None,
        };

        Self {
            world,
            hud,
            overlay,
        }
    }
}

/// Consumer of per-tick snapshots
pub trait RenderSink {
    fn present(&mut self, snapshot: &Snapshot<'_>, events: &[GameEvent]);
}

/// Sink that draws nothing (headless runs)
#[derive(Debug, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn present(&mut self, _snapshot: &Snapshot<'_>, _events: &[GameEvent]) {}
}
