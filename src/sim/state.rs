//! World state and core simulation types
//!
//! `WorldState` is the single mutable aggregate the tick advances. Cosmetic state
//! (particles, ripples, floating text) is deliberately absent: the render side derives
//! it from `GameEvent`s.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;
use crate::vocab::VocabId;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// "SECTOR n" window after a layout is generated; input is ignored
    LevelIntro { ticks_left: u32 },
    /// Frozen until the player resumes
    Paused,
    /// Active gameplay
    Playing,
    /// Lives exhausted, run ended
    GameOver,
    /// Player quit to the outer menu
    Quit,
}

impl Phase {
    /// True once the run can no longer tick
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::GameOver | Phase::Quit)
    }
}

/// Axis-aligned rectangle, `min` is the top-left corner (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict overlap test (touching edges do not overlap)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max().x
            && other.min.x < self.max().x
            && self.min.y < other.max().y
            && other.min.y < self.max().y
    }

    /// True if `self` lies fully inside `outer`
    pub fn within(&self, outer: &Rect) -> bool {
        self.min.x >= outer.min.x
            && self.min.y >= outer.min.y
            && self.max().x <= outer.max().x
            && self.max().y <= outer.max().y
    }
}

/// Trail point for ball rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub alpha: f32,
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Held above the paddle by the magnet effect until released
    pub caught: bool,
    /// Recent positions, oldest first
    pub trail: Vec<TrailPoint>,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            radius: BALL_RADIUS,
            caught: false,
            trail: Vec::with_capacity(TRAIL_LENGTH + 1),
        }
    }

    /// Record current position to trail (call each playing tick)
    pub fn record_trail(&mut self) {
        self.trail.push(TrailPoint {
            pos: self.pos,
            alpha: 0.6,
        });
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.remove(0);
        }
        for point in &mut self.trail {
            point.alpha = (point.alpha - 0.1).max(0.0);
        }
    }

    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }

    /// Pin the ball just above the paddle centre
    pub fn rest_on(&mut self, paddle: &Paddle) {
        self.pos = Vec2::new(paddle.center_x(), paddle.pos.y - self.radius - 2.0);
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Width without shrink/grow applied
    pub base_width: f32,
}

impl Paddle {
    pub fn new(canvas: Vec2) -> Self {
        Self {
            pos: Vec2::new(
                (canvas.x - PADDLE_WIDTH) / 2.0,
                canvas.y - PADDLE_BOTTOM_OFFSET,
            ),
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            base_width: PADDLE_WIDTH,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }

    /// Clamp the paddle inside `[0, canvas_width]`
    pub fn clamp_to(&mut self, canvas_width: f32) {
        let max_x = (canvas_width - self.width).max(0.0);
        self.pos.x = self.pos.x.clamp(0.0, max_x);
    }

    pub fn set_center_x(&mut self, x: f32, canvas_width: f32) {
        self.pos.x = x - self.width / 2.0;
        self.clamp_to(canvas_width);
    }

    /// Resize around the current centre
    pub fn set_width(&mut self, width: f32, canvas_width: f32) {
        let center = self.center_x();
        self.width = width.min(canvas_width);
        self.set_center_x(center, canvas_width);
    }
}

/// A vocabulary brick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    /// Vocabulary item this brick shows
    pub id: VocabId,
    pub rect: Rect,
    pub active: bool,
    pub text: String,
    pub is_target: bool,
    /// Hits left before destruction
    pub hits: u8,
    pub max_hits: u8,
}

impl Brick {
    pub fn new(id: VocabId, rect: Rect, text: &str, max_hits: u8) -> Self {
        Self {
            id,
            rect,
            active: true,
            text: text.to_string(),
            is_target: false,
            hits: max_hits,
            max_hits,
        }
    }

    /// Reinforced and not yet cracked
    pub fn is_reinforced(&self) -> bool {
        self.max_hits > 1 && self.hits > 1
    }
}

/// Timed paddle/ball modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    ReverseControls,
    Shrink,
    Grow,
    SpeedUp,
    Shield,
    Magnet,
}

impl EffectKind {
    pub const ALL: [EffectKind; 6] = [
        EffectKind::ReverseControls,
        EffectKind::Shrink,
        EffectKind::Grow,
        EffectKind::SpeedUp,
        EffectKind::Shield,
        EffectKind::Magnet,
    ];

    /// HUD/popup label
    pub fn label(&self) -> &'static str {
        match self {
            EffectKind::ReverseControls => "REVERSED",
            EffectKind::Shrink => "SHRINK",
            EffectKind::Grow => "GROW",
            EffectKind::SpeedUp => "SPEED UP",
            EffectKind::Shield => "SHIELD",
            EffectKind::Magnet => "MAGNET",
        }
    }

    /// Whether catching this effect helps the player
    pub fn is_beneficial(&self) -> bool {
        matches!(self, EffectKind::Grow | EffectKind::Shield | EffectKind::Magnet)
    }

    /// Duration granted when applied
    pub fn duration(&self, tuning: &Tuning) -> u32 {
        match self {
            EffectKind::ReverseControls => tuning.reverse_ticks,
            EffectKind::Shrink => tuning.shrink_ticks,
            EffectKind::Grow => tuning.grow_ticks,
            EffectKind::SpeedUp => tuning.speed_up_ticks,
            EffectKind::Shield => tuning.shield_ticks,
            EffectKind::Magnet => tuning.magnet_ticks,
        }
    }
}

/// Remaining ticks per effect; zero means inactive
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effects {
    pub reverse_controls: u32,
    pub shrink: u32,
    pub grow: u32,
    pub speed_up: u32,
    pub shield: u32,
    pub magnet: u32,
}

impl Effects {
    pub fn get(&self, kind: EffectKind) -> u32 {
        match kind {
            EffectKind::ReverseControls => self.reverse_controls,
            EffectKind::Shrink => self.shrink,
            EffectKind::Grow => self.grow,
            EffectKind::SpeedUp => self.speed_up,
            EffectKind::Shield => self.shield,
            EffectKind::Magnet => self.magnet,
        }
    }

    pub fn set(&mut self, kind: EffectKind, ticks: u32) {
        let slot = match kind {
            EffectKind::ReverseControls => &mut self.reverse_controls,
            EffectKind::Shrink => &mut self.shrink,
            EffectKind::Grow => &mut self.grow,
            EffectKind::SpeedUp => &mut self.speed_up,
            EffectKind::Shield => &mut self.shield,
            EffectKind::Magnet => &mut self.magnet,
        };
        *slot = ticks;
    }

    #[inline]
    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.get(kind) > 0
    }

    /// Decrement every counter by one tick
    pub fn tick(&mut self) {
        for kind in EffectKind::ALL {
            self.set(kind, self.get(kind).saturating_sub(1));
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Active effects with remaining ticks, in display order
    pub fn active(&self) -> impl Iterator<Item = (EffectKind, u32)> + '_ {
        EffectKind::ALL
            .into_iter()
            .map(|kind| (kind, self.get(kind)))
            .filter(|(_, ticks)| *ticks > 0)
    }
}

/// Gnome variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GnomeKind {
    /// Red hat, grants a helpful effect
    Beneficial,
    /// Purple devil, inflicts a hindrance
    Harmful,
    /// Blue speedster, speeds up the ball
    Speedy,
}

/// Gnome lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GnomePhase {
    Falling,
    /// Has bounced off a side wall at least once
    Bouncing,
    /// Popped; removed when the timer runs out
    Bursting,
}

/// A falling bonus/penalty character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gnome {
    pub id: u32,
    /// Top-left of the bounding box
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: GnomeKind,
    pub phase: GnomePhase,
    /// Burst countdown (only meaningful while bursting)
    pub timer: u32,
    /// Applied to the paddle on contact
    pub effect: EffectKind,
    pub bounce_count: u32,
    /// Sprite rotation (radians)
    pub rotation: f32,
}

impl Gnome {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, GNOME_WIDTH, GNOME_HEIGHT)
    }

    pub fn is_bursting(&self) -> bool {
        self.phase == GnomePhase::Bursting
    }

    pub fn burst(&mut self, ticks: u32) {
        self.phase = GnomePhase::Bursting;
        self.timer = ticks;
    }
}

/// Prompt flavour for the current target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromptMode {
    Synonym,
    Antonym,
}

/// The current objective: which brick to hit and what the player is told
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    pub brick_id: VocabId,
    pub mode: PromptMode,
    /// The synonym/antonym shown to the player
    pub clue: String,
}

impl Objective {
    /// Human-readable prompt, e.g. `FIND SYNONYM OF: TOUGH`
    pub fn prompt(&self) -> String {
        let mode = match self.mode {
            PromptMode::Synonym => "SYNONYM",
            PromptMode::Antonym => "ANTONYM",
        };
        format!("FIND {} OF: {}", mode, self.clue.to_uppercase())
    }
}

/// Complete world state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    pub canvas: Vec2,
    pub ball: Ball,
    pub paddle: Paddle,
    /// Current level's bricks; destroyed ones stay with `active = false`
    pub bricks: Vec<Brick>,
    pub gnomes: Vec<Gnome>,
    pub effects: Effects,
    pub score: u64,
    pub lives: u32,
    /// 1-based level counter
    pub level: u32,
    pub combo: u32,
    /// Consecutive wrong hits since the last harmful spawn
    pub wrong_hits: u32,
    pub phase: Phase,
    /// Remaining hit-stop ticks
    pub hit_stop: u32,
    pub objective: Option<Objective>,
    /// Short HUD feed message
    pub log: String,
    /// Simulated ticks (paused/intro frames excluded)
    pub tick: u64,
    /// Latched when the termination notice has been issued
    pub run_ended: bool,
    next_gnome_id: u32,
}

impl WorldState {
    /// A fresh run with no layout yet (see `layout::start_level`)
    pub fn new(tuning: &Tuning) -> Self {
        let canvas = crate::canvas_size();
        let paddle = Paddle::new(canvas);
        let ball = Ball::new(
            Vec2::new(canvas.x / 2.0, canvas.y - BALL_SPAWN_OFFSET),
            Vec2::new(0.0, -tuning.ball_speed),
        );
        Self {
            canvas,
            ball,
            paddle,
            bricks: Vec::new(),
            gnomes: Vec::new(),
            effects: Effects::default(),
            score: 0,
            lives: tuning.starting_lives,
            level: 1,
            combo: 0,
            wrong_hits: 0,
            phase: Phase::Paused,
            hit_stop: 0,
            objective: None,
            log: "SYSTEM READY.".to_string(),
            tick: 0,
            run_ended: false,
            next_gnome_id: 1,
        }
    }

    pub fn canvas_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.canvas.x, self.canvas.y)
    }

    pub fn next_gnome_id(&mut self) -> u32 {
        let id = self.next_gnome_id;
        self.next_gnome_id += 1;
        id
    }

    pub fn active_brick_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.active).count()
    }

    /// The brick flagged as target, if any
    pub fn target(&self) -> Option<&Brick> {
        self.bricks.iter().find(|b| b.active && b.is_target)
    }

    /// Fraction of this level's bricks destroyed
    pub fn level_progress(&self) -> f32 {
        if self.bricks.is_empty() {
            return 0.0;
        }
        1.0 - self.active_brick_count() as f32 / self.bricks.len() as f32
    }

    /// Drop gnomes, effects, hit-stop and a caught ball
    pub fn clear_transient(&mut self) {
        self.gnomes.clear();
        self.effects.clear();
        self.hit_stop = 0;
        self.ball.caught = false;
        self.paddle.set_width(self.paddle.base_width, self.canvas.x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&Rect::new(9.0, 9.0, 5.0, 5.0)));
    }

    #[test]
    fn test_effects_tick_and_clear() {
        let mut effects = Effects::default();
        effects.set(EffectKind::Shield, 2);
        effects.set(EffectKind::Magnet, 1);
        effects.tick();
        assert_eq!(effects.get(EffectKind::Shield), 1);
        assert!(!effects.is_active(EffectKind::Magnet));
        effects.tick();
        effects.tick();
        assert_eq!(effects.get(EffectKind::Shield), 0);
        effects.set(EffectKind::Grow, 5);
        assert_eq!(effects.active().count(), 1);
        effects.clear();
        assert_eq!(effects, Effects::default());
    }

    #[test]
    fn test_trail_is_bounded_and_fades() {
        let mut ball = Ball::new(Vec2::ZERO, Vec2::new(0.0, -8.0));
        for i in 0..10 {
            ball.pos.x = i as f32;
            ball.record_trail();
        }
        assert_eq!(ball.trail.len(), TRAIL_LENGTH);
        assert_eq!(ball.trail.last().unwrap().pos.x, 9.0);
        assert!(ball.trail[0].alpha < ball.trail[TRAIL_LENGTH - 1].alpha);
    }

    #[test]
    fn test_paddle_resize_keeps_center() {
        let mut paddle = Paddle::new(crate::canvas_size());
        let center = paddle.center_x();
        paddle.set_width(paddle.base_width * 1.5, CANVAS_WIDTH);
        assert!((paddle.center_x() - center).abs() < 1e-3);
        paddle.set_center_x(-500.0, CANVAS_WIDTH);
        assert_eq!(paddle.pos.x, 0.0);
    }

    #[test]
    fn test_objective_prompt() {
        let objective = Objective {
            brick_id: 1,
            mode: PromptMode::Synonym,
            clue: "tough".into(),
        };
        assert_eq!(objective.prompt(), "FIND SYNONYM OF: TOUGH");
    }
}
