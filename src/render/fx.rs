//! Cosmetic feedback layer
//!
//! Particles, paddle ripples, floating score text, effect popups and screen shake. Fed
//! only by `GameEvent`s; nothing here is ever read back by the simulation. Uses its own
//! RNG so cosmetic randomness never perturbs a seeded run.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::Label;
use super::shapes;
use super::vertex::{Vertex, colors, with_alpha};
use crate::sim::events::GameEvent;
use crate::sim::state::GnomeKind;

/// Maximum concurrent particles
const MAX_PARTICLES: usize = 512;
const PARTICLE_GRAVITY: f32 = 0.15;
const PARTICLE_DECAY: f32 = 0.02;
const RIPPLE_GROWTH: f32 = 2.5;
const RIPPLE_DECAY: f32 = 0.04;
const FLOATER_RISE: f32 = 1.2;
const POPUP_TICKS: u32 = 60;
const SHAKE_DECAY: f32 = 0.5;

#[derive(Debug, Clone, Copy)]
struct Particle {
    pos: Vec2,
    vel: Vec2,
    life: f32,
    color: [f32; 4],
    size: f32,
}

#[derive(Debug, Clone, Copy)]
struct Ripple {
    pos: Vec2,
    radius: f32,
    life: f32,
}

/// Rising text such as `+150` or `CRACK!`
#[derive(Debug, Clone)]
struct Floater {
    pos: Vec2,
    text: String,
    color: [f32; 4],
    life: f32,
}

/// Centred announcement such as `SHIELD SAVED`
#[derive(Debug, Clone)]
struct Popup {
    pos: Vec2,
    text: String,
    color: [f32; 4],
    timer: u32,
}

/// Event-driven cosmetic state
pub struct FxLayer {
    particles: Vec<Particle>,
    ripples: Vec<Ripple>,
    floaters: Vec<Floater>,
    popups: Vec<Popup>,
    shake: f32,
    shake_offset: Vec2,
    rng: Pcg32,
}

impl FxLayer {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::with_capacity(MAX_PARTICLES),
            ripples: Vec::new(),
            floaters: Vec::new(),
            popups: Vec::new(),
            shake: 0.0,
            shake_offset: Vec2::ZERO,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// React to this frame's gameplay events
    pub fn observe(&mut self, events: &[GameEvent]) {
        for event in events {
            self.shake = self.shake.max(event.impact());

            match event {
                GameEvent::LevelStarted { .. } => self.clear(),
                GameEvent::BrickDestroyed { pos, gain, .. } => {
                    self.burst(*pos, colors::GAIN, 12);
                    self.float(*pos, format!("+{}", gain), colors::GAIN);
                }
                GameEvent::BrickCracked { pos, .. } => {
                    self.burst(*pos, colors::CRACK, 5);
                    self.float(*pos, "CRACK!".to_string(), colors::CRACK);
                }
                GameEvent::WrongHit { pos, penalty, .. } => {
                    self.burst(*pos, colors::PENALTY, 10);
                    self.float(*pos, format!("-{}", penalty), colors::PENALTY);
                }
                GameEvent::PaddleBounce { pos } => self.ripples.push(Ripple {
                    pos: *pos,
                    radius: 0.0,
                    life: 1.0,
                }),
                GameEvent::GnomeBurst { kind, pos, bonus } => {
                    let color = match kind {
                        GnomeKind::Beneficial => colors::GNOME_HAT,
                        GnomeKind::Harmful => colors::DEVIL_HAT,
                        GnomeKind::Speedy => colors::SPEEDY_FACE,
                    };
                    self.burst(*pos, color, 15);
                    self.float(*pos, format!("+{}", bonus), colors::GAIN);
                }
                GameEvent::EffectApplied { effect, pos } => {
                    let color = if effect.is_beneficial() {
                        colors::PADDLE
                    } else {
                        colors::PADDLE_REVERSED
                    };
                    self.popup(*pos - Vec2::new(0.0, 40.0), effect.label(), color);
                }
                GameEvent::ShieldSaved { pos } => {
                    self.popup(Vec2::new(pos.x, pos.y - 40.0), "SHIELD SAVED", colors::SHIELD);
                }
                _ => {}
            }
        }
    }

    /// Advance every cosmetic timer by one frame
    pub fn update(&mut self) {
        self.particles.retain_mut(|p| {
            p.pos += p.vel;
            p.vel.y += PARTICLE_GRAVITY;
            p.life -= PARTICLE_DECAY;
            p.life > 0.0
        });
        self.ripples.retain_mut(|r| {
            r.radius += RIPPLE_GROWTH;
            r.life -= RIPPLE_DECAY;
            r.life > 0.0
        });
        self.floaters.retain_mut(|f| {
            f.pos.y -= FLOATER_RISE;
            f.life -= PARTICLE_DECAY;
            f.life > 0.0
        });
        self.popups.retain_mut(|p| {
            p.timer = p.timer.saturating_sub(1);
            p.pos.y -= 0.5;
            p.timer > 0
        });

        self.shake = (self.shake - SHAKE_DECAY).max(0.0);
        self.shake_offset = if self.shake > 0.0 {
            Vec2::new(
                self.rng.random_range(-0.5..0.5),
                self.rng.random_range(-0.5..0.5),
            ) * self.shake
        } else {
            Vec2::ZERO
        };
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.ripples.clear();
        self.floaters.clear();
        self.popups.clear();
        self.shake = 0.0;
        self.shake_offset = Vec2::ZERO;
    }

    /// Camera offset for this frame
    pub fn shake_offset(&self) -> Vec2 {
        self.shake_offset
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn is_idle(&self) -> bool {
        self.particles.is_empty()
            && self.ripples.is_empty()
            && self.floaters.is_empty()
            && self.popups.is_empty()
            && self.shake == 0.0
    }

    pub fn vertices(&self) -> Vec<Vertex> {
        let mut vertices = Vec::new();
        for r in &self.ripples {
            vertices.extend(shapes::ring(
                r.pos,
                r.radius,
                r.radius + 2.0,
                with_alpha(colors::PADDLE, r.life),
                24,
            ));
        }
        for p in &self.particles {
            vertices.extend(shapes::circle(p.pos, p.size, with_alpha(p.color, p.life), 6));
        }
        vertices
    }

    pub fn labels(&self) -> Vec<Label> {
        let floaters = self.floaters.iter().map(|f| Label {
            text: f.text.clone(),
            pos: f.pos,
            color: with_alpha(f.color, f.life),
            size: 20.0,
        });
        let popups = self.popups.iter().map(|p| Label {
            text: p.text.clone(),
            pos: p.pos,
            color: with_alpha(p.color, p.timer as f32 / POPUP_TICKS as f32),
            size: 28.0,
        });
        floaters.chain(popups).collect()
    }

    fn burst(&mut self, pos: Vec2, color: [f32; 4], count: usize) {
        let room = MAX_PARTICLES.saturating_sub(self.particles.len());
        for _ in 0..count.min(room) {
            let vel = Vec2::new(
                self.rng.random_range(-5.0..5.0),
                self.rng.random_range(-5.0..5.0),
            );
            let size = self.rng.random_range(1.0..4.0);
            self.particles.push(Particle {
                pos,
                vel,
                life: 1.0,
                color,
                size,
            });
        }
    }

    fn float(&mut self, pos: Vec2, text: String, color: [f32; 4]) {
        self.floaters.push(Floater {
            pos,
            text,
            color,
            life: 1.0,
        });
    }

    fn popup(&mut self, pos: Vec2, text: &str, color: [f32; 4]) {
        self.popups.push(Popup {
            pos,
            text: text.to_string(),
            color,
            timer: POPUP_TICKS,
        });
    }
}
