//! Level layout generation
//!
//! Samples words from the pool and packs their bricks left-to-right, top-to-bottom
//! inside the brick field. Starting a level also resets the ball, paddle and every
//! transient effect.

use glam::Vec2;

use super::events::GameEvent;
use super::rng::{RandomSource, shuffle};
use super::state::{Ball, Brick, Paddle, Phase, Rect, WorldState};
use super::target::refresh_target;
use crate::consts::BALL_SPAWN_OFFSET;
use crate::tuning::{LayoutStyle, Tuning};
use crate::vocab::VocabPool;

/// Brick field margins from the canvas edges
pub const MARGIN_X: f32 = 80.0;
pub const MARGIN_Y: f32 = 80.0;
/// Gaps between bricks
pub const PADDING_X: f32 = 40.0;
pub const PADDING_Y: f32 = 30.0;
pub const BRICK_HEIGHT: f32 = 65.0;
/// Bricks stay above this fraction of the canvas height, clear of the paddle zone
pub const FIELD_BOTTOM_FRACTION: f32 = 0.8;

/// Width of a word-sized brick
pub fn brick_width_for(label: &str) -> f32 {
    label.chars().count() as f32 * 12.0 + 40.0
}

/// The area bricks may occupy
pub fn brick_field(canvas: Vec2) -> Rect {
    let bottom = canvas.y * FIELD_BOTTOM_FRACTION;
    Rect::new(
        MARGIN_X,
        MARGIN_Y,
        (canvas.x - 2.0 * MARGIN_X).max(0.0),
        (bottom - MARGIN_Y).max(0.0),
    )
}

/// Cell size of a `columns`-wide grid holding `count` bricks, or `None` if it cannot fit
pub fn grid_cell(field: &Rect, columns: u32, count: usize) -> Option<Vec2> {
    let columns = columns.max(1) as usize;
    let rows = count.div_ceil(columns).max(1);
    let cell_w = (field.size.x - PADDING_X * (columns - 1) as f32) / columns as f32;
    let cell_h =
        ((field.size.y - PADDING_Y * (rows - 1) as f32) / rows as f32).min(BRICK_HEIGHT);
    (cell_w >= 1.0 && cell_h >= 1.0).then(|| Vec2::new(cell_w, cell_h))
}

/// Build a fresh brick set of up to `count` distinct words
///
/// Bricks never overlap and always lie inside the brick field. If the field runs out of
/// room the remaining words are dropped.
pub fn generate_layout(
    pool: &VocabPool,
    count: usize,
    canvas: Vec2,
    style: LayoutStyle,
    reinforced_chance: f32,
    rng: &mut dyn RandomSource,
) -> Vec<Brick> {
    let mut order: Vec<usize> = (0..pool.len()).collect();
    shuffle(rng, &mut order);
    order.truncate(count);

    let field = brick_field(canvas);
    let mut bricks = Vec::with_capacity(order.len());

    match style {
        LayoutStyle::WordWidth => {
            let right = field.max().x;
            let bottom = field.max().y;
            let mut cursor = field.min;

            for index in order {
                let item = &pool.items()[index];
                let max_hits = if rng.chance(reinforced_chance) { 2 } else { 1 };
                let width = brick_width_for(&item.word).min(field.size.x);

                if cursor.x > field.min.x && cursor.x + width > right {
                    cursor.x = field.min.x;
                    cursor.y += BRICK_HEIGHT + PADDING_Y;
                }
                if cursor.y + BRICK_HEIGHT > bottom {
                    log::warn!(
                        "Brick field full after {} bricks, dropping the rest",
                        bricks.len()
                    );
                    break;
                }

                let rect = Rect::new(cursor.x, cursor.y, width, BRICK_HEIGHT);
                bricks.push(Brick::new(item.id, rect, &item.word, max_hits));
                cursor.x += width + PADDING_X;
            }
        }
        LayoutStyle::Grid { columns } => {
            let Some(cell) = grid_cell(&field, columns, order.len()) else {
                log::warn!("Grid of {} columns does not fit the brick field", columns);
                return bricks;
            };
            let (cell_w, cell_h) = (cell.x, cell.y);
            let columns = columns.max(1) as usize;

            for (slot, index) in order.into_iter().enumerate() {
                let item = &pool.items()[index];
                let max_hits = if rng.chance(reinforced_chance) { 2 } else { 1 };
                let col = (slot % columns) as f32;
                let row = (slot / columns) as f32;
                let rect = Rect::new(
                    field.min.x + col * (cell_w + PADDING_X),
                    field.min.y + row * (cell_h + PADDING_Y),
                    cell_w,
                    cell_h,
                );
                bricks.push(Brick::new(item.id, rect, &item.word, max_hits));
            }
        }
    }

    bricks
}

/// Spawn ball: centred, heading up with a random horizontal drift
pub fn spawn_ball(canvas: Vec2, speed: f32, rng: &mut dyn RandomSource) -> Ball {
    let drift = rng.range(-3.0, 3.0);
    Ball::new(
        Vec2::new(canvas.x / 2.0, canvas.y - BALL_SPAWN_OFFSET),
        crate::with_speed(Vec2::new(drift, -speed), speed),
    )
}

/// Replace the level: new bricks, new target, ball/paddle at spawn, transient state cleared
///
/// The level counter is not touched; the caller advances it on a clear.
pub fn start_level(
    world: &mut WorldState,
    pool: &VocabPool,
    tuning: &Tuning,
    rng: &mut dyn RandomSource,
    events: &mut Vec<GameEvent>,
) {
    world.bricks = generate_layout(
        pool,
        tuning.bricks_per_level,
        world.canvas,
        tuning.layout,
        tuning.reinforced_chance,
        rng,
    );
    // An empty field would read as an instant clear on every tick
    if world.bricks.is_empty() && tuning.layout != LayoutStyle::WordWidth {
        log::error!(
            "Layout {} produced no bricks, falling back to word-width",
            tuning.layout.as_str()
        );
        world.bricks = generate_layout(
            pool,
            tuning.bricks_per_level,
            world.canvas,
            LayoutStyle::WordWidth,
            tuning.reinforced_chance,
            rng,
        );
    }
    world.objective = refresh_target(&mut world.bricks, pool, rng);

    world.clear_transient();
    world.ball = spawn_ball(world.canvas, tuning.ball_speed, rng);
    world.paddle = Paddle::new(world.canvas);
    world.combo = 0;
    world.wrong_hits = 0;
    world.log = "READY.".to_string();
    world.phase = if tuning.level_intro_ticks > 0 {
        Phase::LevelIntro {
            ticks_left: tuning.level_intro_ticks,
        }
    } else {
        Phase::Paused
    };

    log::info!(
        "Level {} started: {} bricks ({} reinforced), layout {}",
        world.level,
        world.bricks.len(),
        world.bricks.iter().filter(|b| b.max_hits > 1).count(),
        tuning.layout.as_str()
    );
    events.push(GameEvent::LevelStarted {
        level: world.level,
        bricks: world.bricks.len(),
    });
}
