//! Scene assembly
//!
//! `SceneRenderer` is a [`RenderSink`] that tessellates a snapshot into one triangle list
//! plus text labels. Draw order: background, ripples and particles, bricks, trail,
//! paddle and effect gauges, ball, gnomes, floating text, HUD, overlay.

use glam::Vec2;

use super::fx::FxLayer;
use super::shapes;
use super::vertex::{Vertex, colors, with_alpha};
use super::{Label, Overlay, RenderSink, Snapshot};
use crate::sim::events::GameEvent;
use crate::sim::state::{EffectKind, Rect, WorldState};

/// Spacing of the background dot grid
const GRID_SPACING: f32 = 80.0;
/// Vertical gap between stacked effect gauges above the paddle
const GAUGE_STEP: f32 = 6.0;

/// One tessellated frame
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub vertices: Vec<Vertex>,
    pub labels: Vec<Label>,
    /// Camera offset from screen shake
    pub offset: Vec2,
}

/// Render sink producing a `Frame` per tick
pub struct SceneRenderer {
    fx: FxLayer,
    frame: Frame,
    frames_presented: u64,
}

impl SceneRenderer {
    pub fn new(fx_seed: u64) -> Self {
        Self {
            fx: FxLayer::new(fx_seed),
            frame: Frame::default(),
            frames_presented: 0,
        }
    }

    /// The most recently assembled frame
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn fx(&self) -> &FxLayer {
        &self.fx
    }

    fn draw_background(&self, world: &WorldState, out: &mut Vec<Vertex>) {
        out.extend(shapes::rect(&world.canvas_rect(), colors::BACKGROUND));
        let mut x = 20.0;
        while x < world.canvas.x {
            let mut y = 20.0;
            while y < world.canvas.y {
                out.extend(shapes::circle(Vec2::new(x, y), 1.0, colors::GRID, 4));
                y += GRID_SPACING;
            }
            x += GRID_SPACING;
        }
    }

    fn draw_bricks(&self, world: &WorldState, out: &mut Vec<Vertex>, labels: &mut Vec<Label>) {
        // Target outline pulses with the tick counter
        let pulse = 0.5 + 0.5 * (world.tick as f32 * 0.16).sin();

        for brick in world.bricks.iter().filter(|b| b.active) {
            let reinforced = brick.is_reinforced();
            let fill = if reinforced {
                colors::BRICK_REINFORCED
            } else {
                colors::BRICK
            };
            out.extend(shapes::rect(&brick.rect, fill));

            let thickness = if reinforced { 3.0 } else { 1.5 };
            if brick.is_target {
                let glow = Rect::new(
                    brick.rect.min.x - 3.0,
                    brick.rect.min.y - 3.0,
                    brick.rect.size.x + 6.0,
                    brick.rect.size.y + 6.0,
                );
                out.extend(shapes::rect_outline(
                    &glow,
                    3.0,
                    with_alpha(colors::TARGET_GLOW, 0.3 * pulse),
                ));
                out.extend(shapes::rect_outline(&brick.rect, thickness, colors::PADDLE));
            } else {
                out.extend(shapes::rect_outline(&brick.rect, thickness, colors::BRICK_BORDER));
            }

            labels.push(Label {
                text: brick.text.clone(),
                pos: brick.rect.center(),
                color: if reinforced { colors::CRACK } else { colors::TEXT },
                size: 12.0,
            });
        }
    }

    fn draw_paddle(&self, snapshot: &Snapshot<'_>, out: &mut Vec<Vertex>) {
        let world = snapshot.world;
        let rect = world.paddle.rect();
        let reversed = world.effects.is_active(EffectKind::ReverseControls);
        let color = if reversed {
            colors::PADDLE_REVERSED
        } else {
            colors::PADDLE
        };
        out.extend(shapes::rect(&rect, color));
        out.extend(shapes::rect_outline(&rect, 1.0, colors::BALL));

        for (slot, gauge) in snapshot.hud.effects.iter().enumerate() {
            let y = rect.min.y - GAUGE_STEP * (slot as f32 + 1.0);
            let track = Rect::new(rect.min.x, y, rect.size.x, 2.0);
            let fill = match gauge.kind {
                EffectKind::Shield => colors::SHIELD,
                EffectKind::Magnet => colors::MAGNET,
                kind if kind.is_beneficial() => colors::GAIN,
                _ => colors::PADDLE_REVERSED,
            };
            out.extend(shapes::bar(&track, gauge.fraction, with_alpha(colors::GRID, 0.2), fill));
        }
    }

    fn draw_hud(&self, snapshot: &Snapshot<'_>, out: &mut Vec<Vertex>, labels: &mut Vec<Label>) {
        let hud = &snapshot.hud;
        let width = snapshot.world.canvas.x;

        let score = if hud.combo > 1 {
            format!("SCORE {:06} x{}", hud.score, hud.combo)
        } else {
            format!("SCORE {:06}", hud.score)
        };
        let top = [
            (score, 110.0),
            (format!("LIVES {}", hud.lives), 260.0),
            (hud.objective.clone(), width / 2.0 + 60.0),
            (format!("SECTOR {:02}", hud.level), width - 80.0),
        ];
        for (text, x) in top {
            labels.push(Label {
                text,
                pos: Vec2::new(x, 24.0),
                color: colors::TEXT,
                size: 12.0,
            });
        }
        labels.push(Label {
            text: hud.log.clone(),
            pos: Vec2::new(width / 2.0, snapshot.world.canvas.y - 14.0),
            color: colors::CRACK,
            size: 10.0,
        });

        let progress = Rect::new(width / 2.0 - 140.0, 40.0, 400.0, 4.0);
        out.extend(shapes::bar(&progress, hud.progress, colors::GRID, colors::HUD_BAR));
    }

    fn draw_overlay(
        &self,
        overlay: &Overlay,
        world: &WorldState,
        out: &mut Vec<Vertex>,
        labels: &mut Vec<Label>,
    ) {
        out.extend(shapes::rect(&world.canvas_rect(), colors::OVERLAY));
        let center = world.canvas / 2.0;
        for (i, text) in overlay.lines().into_iter().enumerate() {
            let (size, color) = if i == 0 {
                (28.0, colors::MAGNET)
            } else {
                (9.0, colors::TEXT)
            };
            labels.push(Label {
                text,
                pos: Vec2::new(center.x, center.y - 40.0 + 30.0 * i as f32),
                color,
                size,
            });
        }
    }

    fn assemble(&self, snapshot: &Snapshot<'_>) -> Frame {
        let world = snapshot.world;
        let mut vertices = Vec::new();
        let mut labels = Vec::new();

        self.draw_background(world, &mut vertices);
        vertices.extend(self.fx.vertices());
        self.draw_bricks(world, &mut vertices, &mut labels);
        vertices.extend(shapes::ball_trail(&world.ball.trail, world.ball.radius * 0.8));
        self.draw_paddle(snapshot, &mut vertices);
        vertices.extend(shapes::circle(world.ball.pos, world.ball.radius, colors::BALL, 20));

        for gnome in world.gnomes.iter().filter(|g| !g.is_bursting()) {
            let center = gnome.rect().center();
            vertices.extend(shapes::gnome(center, gnome.rotation, gnome.kind, 1.0));
        }

        labels.extend(self.fx.labels());
        self.draw_hud(snapshot, &mut vertices, &mut labels);
        if let Some(overlay) = &snapshot.overlay {
            self.draw_overlay(overlay, world, &mut vertices, &mut labels);
        }

        Frame {
            vertices,
            labels,
            offset: self.fx.shake_offset(),
        }
    }
}

impl RenderSink for SceneRenderer {
    fn present(&mut self, snapshot: &Snapshot<'_>, events: &[GameEvent]) {
        self.fx.observe(events);
        // Cosmetics freeze with the world while an overlay is up
        if snapshot.overlay.is_none() {
            self.fx.update();
        }
        self.frame = self.assemble(snapshot);
        self.frames_presented += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::layout::start_level;
    use crate::sim::rng::GameRng;
    use crate::sim::state::Phase;
    use crate::tuning::Tuning;
    use crate::vocab::VocabPool;

    fn world_with_level() -> (WorldState, Tuning) {
        let tuning = Tuning::default();
        let pool = VocabPool::builtin();
        let mut world = WorldState::new(&tuning);
        let mut rng = GameRng::new(8);
        let mut events = Vec::new();
        start_level(&mut world, &pool, &tuning, &mut rng, &mut events);
        (world, tuning)
    }

    #[test]
    fn test_frame_has_brick_labels_and_overlay() {
        let (world, tuning) = world_with_level();
        let mut scene = SceneRenderer::new(1);
        scene.present(&Snapshot::capture(&world, &tuning), &[]);

        let frame = scene.frame();
        assert!(!frame.vertices.is_empty());
        assert_eq!(frame.vertices.len() % 3, 0);
        for brick in &world.bricks {
            assert!(frame.labels.iter().any(|l| l.text == brick.text));
        }
        assert!(frame.labels.iter().any(|l| l.text == "SECTOR 1"));
        assert_eq!(scene.frames_presented(), 1);
    }

    #[test]
    fn test_playing_frame_has_no_overlay() {
        let (mut world, tuning) = world_with_level();
        world.phase = Phase::Playing;
        let mut scene = SceneRenderer::new(1);
        scene.present(&Snapshot::capture(&world, &tuning), &[]);
        assert!(!scene.frame().labels.iter().any(|l| l.text == "PAUSED"));
    }

    #[test]
    fn test_events_feed_fx() {
        let (mut world, tuning) = world_with_level();
        world.phase = Phase::Playing;
        let mut scene = SceneRenderer::new(1);
        let events = [GameEvent::WrongHit {
            id: 1,
            pos: Vec2::new(200.0, 200.0),
            penalty: 25,
        }];
        scene.present(&Snapshot::capture(&world, &tuning), &events);
        assert!(scene.fx().particle_count() > 0);
        assert!(scene.frame().labels.iter().any(|l| l.text == "-25"));
        assert_ne!(scene.frame().offset, Vec2::ZERO);
    }
}
