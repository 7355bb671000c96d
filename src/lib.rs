//! Gnome Smash - a vocabulary breakout game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, effects, game state)
//! - `render`: Presentation layer (render sink contract, procedural shapes, cosmetic fx)
//! - `input`: Pending-input buffer consumed once per tick
//! - `vocab`: Vocabulary pool the levels are built from
//! - `tuning`: Data-driven game balance

pub mod game;
pub mod input;
pub mod render;
pub mod sim;
pub mod tuning;
pub mod vocab;

pub use game::{Game, RunSummary};
pub use tuning::{LayoutStyle, Tuning, TuningError};
pub use vocab::{VocabError, VocabItem, VocabPool};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logical canvas size (game-space pixels)
    pub const CANVAS_WIDTH: f32 = 1024.0;
    pub const CANVAS_HEIGHT: f32 = 576.0;

    /// One simulation tick per rendered frame
    pub const FRAMES_PER_SECOND: u32 = 60;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 140.0;
    pub const PADDLE_HEIGHT: f32 = 16.0;
    /// Distance from paddle top to canvas bottom
    pub const PADDLE_BOTTOM_OFFSET: f32 = 60.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Ball spawns this far above the canvas bottom at level start
    pub const BALL_SPAWN_OFFSET: f32 = 100.0;

    /// Gnome bounding box
    pub const GNOME_WIDTH: f32 = 50.0;
    pub const GNOME_HEIGHT: f32 = 70.0;

    /// Ball trail length (positions)
    pub const TRAIL_LENGTH: usize = 5;
}

/// Canvas size as a vector
#[inline]
pub fn canvas_size() -> Vec2 {
    Vec2::new(consts::CANVAS_WIDTH, consts::CANVAS_HEIGHT)
}

/// Rescale `v` to `speed`, falling back to straight up for a zero vector
#[inline]
pub fn with_speed(v: Vec2, speed: f32) -> Vec2 {
    let len = v.length();
    if len > f32::EPSILON && len.is_finite() {
        v * (speed / len)
    } else {
        Vec2::new(0.0, -speed)
    }
}
