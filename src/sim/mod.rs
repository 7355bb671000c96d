//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Every random draw goes through `RandomSource`
//! - Stable iteration order (bricks by layout slot, gnomes by spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod effects;
pub mod events;
pub mod layout;
pub mod physics;
pub mod rng;
pub mod state;
pub mod target;
pub mod tick;

pub use autopilot::autopilot_input;
pub use collision::{CollisionResult, ball_rect_collision};
pub use events::GameEvent;
pub use layout::{generate_layout, start_level};
pub use physics::closing_remark;
pub use rng::{GameRng, RandomSource, ScriptedRng};
pub use state::{
    Ball, Brick, EffectKind, Effects, Gnome, GnomeKind, GnomePhase, Objective, Paddle, Phase,
    PromptMode, Rect, WorldState,
};
pub use target::refresh_target;
pub use tick::{TickInput, tick};
