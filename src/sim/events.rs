//! Gameplay event notifications
//!
//! The tick pushes these as things happen. The simulation never reads them back; they
//! feed the cosmetic layer, the HUD feed and the run-termination callback.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{EffectKind, GnomeKind};
use crate::vocab::VocabId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted { level: u32, bricks: usize },
    LevelCleared { level: u32 },
    WallBounce { pos: Vec2 },
    PaddleBounce { pos: Vec2 },
    BallCaught { pos: Vec2 },
    BallReleased,
    /// Target destroyed
    BrickDestroyed { id: VocabId, pos: Vec2, gain: u64, combo: u32 },
    /// Reinforced target took its first hit
    BrickCracked { id: VocabId, pos: Vec2 },
    WrongHit { id: VocabId, pos: Vec2, penalty: u64 },
    TargetChanged { id: VocabId, prompt: String },
    GnomeSpawned { kind: GnomeKind, pos: Vec2 },
    /// Ball popped a gnome
    GnomeBurst { kind: GnomeKind, pos: Vec2, bonus: u64 },
    EffectApplied { effect: EffectKind, pos: Vec2 },
    ShieldSaved { pos: Vec2 },
    LifeLost { lives: u32 },
    RunEnded { score: u64, remark: String },
    Paused,
    Resumed,
    Quit,
}

impl GameEvent {
    /// Screen-shake contribution for the cosmetic layer
    pub fn impact(&self) -> f32 {
        match self {
            GameEvent::WallBounce { .. } | GameEvent::PaddleBounce { .. } => 2.0,
            GameEvent::BrickCracked { .. } => 2.0,
            GameEvent::BrickDestroyed { .. } => 3.0,
            GameEvent::GnomeBurst { .. } => 4.0,
            GameEvent::ShieldSaved { .. } | GameEvent::EffectApplied { .. } => 5.0,
            GameEvent::WrongHit { .. } => 6.0,
            GameEvent::LifeLost { .. } => 8.0,
            _ => 0.0,
        }
    }
}
