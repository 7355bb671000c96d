//! Game balance parameters
//!
//! Every score constant, timer and probability the simulation reads lives here so a
//! balance pass never touches gameplay code. Loadable from JSON; missing fields keep
//! their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::layout::{brick_field, grid_cell};

/// How the Layout Generator sizes bricks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LayoutStyle {
    /// Width derived from the label length, packed left-to-right
    #[default]
    WordWidth,
    /// Fixed cells, `columns` per row
    Grid { columns: u32 },
}

impl LayoutStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutStyle::WordWidth => "word-width",
            LayoutStyle::Grid { .. } => "grid",
        }
    }
}

/// Errors from loading or validating tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning parameter `{name}` is out of range: {reason}")]
    Invalid { name: &'static str, reason: &'static str },
}

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Scoring ===
    /// Points for destroying the target brick
    pub base_score: u64,
    /// Extra points per combo step already banked
    pub combo_bonus: u64,
    /// Points lost on a wrong-brick hit (score floors at zero)
    pub wrong_hit_penalty: u64,
    /// Every Nth consecutive wrong hit spawns a harmful gnome
    pub wrong_hit_threshold: u32,
    /// Points for bursting a gnome with the ball
    pub gnome_burst_bonus: u64,

    // === Run ===
    pub starting_lives: u32,
    pub bricks_per_level: usize,
    /// Non-interactive "SECTOR n" window after a layout is generated
    pub level_intro_ticks: u32,
    /// Simulation freeze after destroying a target
    pub hit_stop_ticks: u32,

    // === Ball / paddle ===
    /// Canonical ball speed (px per tick)
    pub ball_speed: f32,
    /// Ball speed multiplier while speed-up is active
    pub speed_up_multiplier: f32,
    /// Paddle travel per tick while a direction is held
    pub paddle_speed: f32,
    /// Horizontal rebound at the paddle edge, as a multiple of ball speed
    pub paddle_rebound: f32,
    /// Horizontal pull toward the paddle centre per tick under magnet
    pub magnet_pull: f32,
    /// Paddle width factor under shrink
    pub shrink_factor: f32,
    /// Paddle width factor under grow
    pub grow_factor: f32,

    // === Effect durations (ticks) ===
    pub reverse_ticks: u32,
    pub shrink_ticks: u32,
    pub grow_ticks: u32,
    pub speed_up_ticks: u32,
    pub shield_ticks: u32,
    pub magnet_ticks: u32,

    // === Gnomes ===
    /// Chance that destroying the target drops a gnome
    pub gnome_spawn_chance: f32,
    /// Variant weights for gnomes dropped by target kills
    pub beneficial_weight: f32,
    pub harmful_weight: f32,
    pub speedy_weight: f32,
    /// Downward acceleration per tick
    pub gnome_gravity: f32,
    /// Max horizontal launch speed (either direction)
    pub gnome_spread: f32,
    /// Burst countdown after the ball pops a gnome
    pub burst_ticks_ball: u32,
    /// Burst countdown after the paddle catches a gnome
    pub burst_ticks_paddle: u32,

    // === Layout ===
    pub layout: LayoutStyle,
    /// Chance a brick is reinforced (two hits)
    pub reinforced_chance: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_score: 100,
            combo_bonus: 50,
            wrong_hit_penalty: 25,
            wrong_hit_threshold: 2,
            gnome_burst_bonus: 500,

            starting_lives: 3,
            bricks_per_level: 15,
            level_intro_ticks: 60,
            hit_stop_ticks: 2,

            ball_speed: 8.0,
            speed_up_multiplier: 1.5,
            paddle_speed: 16.0,
            paddle_rebound: 1.8,
            magnet_pull: 0.05,
            shrink_factor: 0.6,
            grow_factor: 1.5,

            reverse_ticks: 400,
            shrink_ticks: 400,
            grow_ticks: 400,
            speed_up_ticks: 400,
            shield_ticks: 600,
            magnet_ticks: 400,

            gnome_spawn_chance: 1.0,
            beneficial_weight: 0.8,
            harmful_weight: 0.12,
            speedy_weight: 0.08,
            gnome_gravity: 0.2,
            gnome_spread: 3.0,
            burst_ticks_ball: 15,
            burst_ticks_paddle: 10,

            layout: LayoutStyle::WordWidth,
            reinforced_chance: 0.2,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys, serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Reject values that would break simulation invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(name: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { name, reason })
        }

        if !(self.ball_speed > 0.0 && self.ball_speed.is_finite()) {
            return invalid("ball_speed", "must be positive");
        }
        if !(self.speed_up_multiplier > 0.0) {
            return invalid("speed_up_multiplier", "must be positive");
        }
        if self.wrong_hit_threshold == 0 {
            return invalid("wrong_hit_threshold", "must be at least 1");
        }
        if self.starting_lives == 0 {
            return invalid("starting_lives", "must be at least 1");
        }
        if self.bricks_per_level == 0 {
            return invalid("bricks_per_level", "must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.gnome_spawn_chance) {
            return invalid("gnome_spawn_chance", "must be within 0..=1");
        }
        if !(0.0..=1.0).contains(&self.reinforced_chance) {
            return invalid("reinforced_chance", "must be within 0..=1");
        }
        let weights = [self.beneficial_weight, self.harmful_weight, self.speedy_weight];
        if weights.iter().any(|w| *w < 0.0) || weights.iter().sum::<f32>() <= 0.0 {
            return invalid("gnome weights", "must be non-negative with a positive sum");
        }
        if !(self.shrink_factor > 0.0 && self.grow_factor > 0.0) {
            return invalid("paddle factors", "must be positive");
        }
        if let LayoutStyle::Grid { columns } = self.layout {
            if columns == 0 {
                return invalid("layout.columns", "must be at least 1");
            }
            let field = brick_field(crate::canvas_size());
            if grid_cell(&field, columns, self.bricks_per_level).is_none() {
                return invalid("layout.columns", "grid cannot fit bricks_per_level");
            }
        }
        Ok(())
    }

    /// Ball speed with or without the speed-up effect
    pub fn ball_speed_for(&self, speed_up: bool) -> f32 {
        if speed_up {
            self.ball_speed * self.speed_up_multiplier
        } else {
            self.ball_speed
        }
    }
}
