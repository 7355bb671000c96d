//! Collision detection and response for the ball against axis-aligned boxes
//!
//! Bricks, the paddle and gnomes are all rectangles. The ball is tested by its bounding
//! box, and the response axis is the one with the smaller penetration.

use glam::Vec2;

use super::state::Rect;

/// Gap left between the ball and a surface after position correction
pub const SEPARATION_EPSILON: f32 = 0.01;

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Axis-aligned surface normal, pointing from the box toward the ball
    pub normal: Vec2,
    /// Distance the ball must move along `normal` to stop overlapping
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Bounding-box overlap between the ball and a rectangle
#[inline]
pub fn ball_rect_overlap(ball_pos: Vec2, ball_radius: f32, rect: &Rect) -> bool {
    let max = rect.max();
    ball_pos.x + ball_radius > rect.min.x
        && ball_pos.x - ball_radius < max.x
        && ball_pos.y + ball_radius > rect.min.y
        && ball_pos.y - ball_radius < max.y
}

/// Check collision between the ball and a rectangle
///
/// Penetration is measured on all four sides; the smallest overlap on each axis wins, and
/// the axis with the smaller of those two is the collision axis. Ties resolve vertically,
/// so a zero-size box or an exactly tangent ball still yields a usable normal.
pub fn ball_rect_collision(ball_pos: Vec2, ball_radius: f32, rect: &Rect) -> CollisionResult {
    if !ball_rect_overlap(ball_pos, ball_radius, rect) {
        return CollisionResult::miss();
    }

    let max = rect.max();
    let from_left = ball_pos.x + ball_radius - rect.min.x;
    let from_right = max.x - (ball_pos.x - ball_radius);
    let from_top = ball_pos.y + ball_radius - rect.min.y;
    let from_bottom = max.y - (ball_pos.y - ball_radius);

    let (overlap_x, normal_x) = if from_left < from_right {
        (from_left, Vec2::NEG_X)
    } else {
        (from_right, Vec2::X)
    };
    let (overlap_y, normal_y) = if from_top < from_bottom {
        (from_top, Vec2::NEG_Y)
    } else {
        (from_bottom, Vec2::Y)
    };

    if overlap_x < overlap_y {
        CollisionResult {
            hit: true,
            normal: normal_x,
            penetration: overlap_x,
        }
    } else {
        CollisionResult {
            hit: true,
            normal: normal_y,
            penetration: overlap_y,
        }
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Make the velocity leave the surface: reflect if heading into it, keep otherwise
#[inline]
pub fn bounce_off(velocity: Vec2, normal: Vec2) -> Vec2 {
    if velocity.dot(normal) < 0.0 {
        reflect_velocity(velocity, normal)
    } else {
        velocity
    }
}

/// Push the ball fully outside the box along the collision normal
#[inline]
pub fn separate(ball_pos: Vec2, result: &CollisionResult) -> Vec2 {
    ball_pos + result.normal * (result.penetration + SEPARATION_EPSILON)
}

/// Horizontal rebound factor in `[-1, 1]` from where the ball met the paddle
#[inline]
pub fn paddle_hit_offset(ball_x: f32, paddle: &Rect) -> f32 {
    let half = paddle.size.x / 2.0;
    if half <= f32::EPSILON {
        return 0.0;
    }
    ((ball_x - paddle.center().x) / half).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brick() -> Rect {
        Rect::new(100.0, 100.0, 120.0, 60.0)
    }

    #[test]
    fn test_miss_when_apart() {
        let result = ball_rect_collision(Vec2::new(50.0, 50.0), 8.0, &brick());
        assert!(!result.hit);
    }

    #[test]
    fn test_hit_from_below_resolves_vertically() {
        // Ball just under the brick's bottom edge, moving up
        let result = ball_rect_collision(Vec2::new(160.0, 165.0), 8.0, &brick());
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::Y);
        assert!((result.penetration - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_hit_from_side_resolves_horizontally() {
        let result = ball_rect_collision(Vec2::new(95.0, 130.0), 8.0, &brick());
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::NEG_X);
    }

    #[test]
    fn test_separation_clears_overlap() {
        let rect = brick();
        let pos = Vec2::new(160.0, 165.0);
        let result = ball_rect_collision(pos, 8.0, &rect);
        let fixed = separate(pos, &result);
        assert!(!ball_rect_overlap(fixed, 8.0, &rect));
    }

    #[test]
    fn test_zero_size_box_has_valid_normal() {
        let rect = Rect::new(200.0, 200.0, 0.0, 0.0);
        let result = ball_rect_collision(Vec2::new(200.0, 200.0), 8.0, &rect);
        assert!(result.hit);
        assert!((result.normal.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_reflect_velocity() {
        let velocity = Vec2::new(100.0, 0.0);
        let normal = Vec2::new(-1.0, 0.0);

        let reflected = reflect_velocity(velocity, normal);
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    #[test]
    fn test_bounce_off_ignores_receding_ball() {
        let receding = Vec2::new(0.0, 5.0);
        assert_eq!(bounce_off(receding, Vec2::Y), receding);
        assert_eq!(bounce_off(Vec2::new(1.0, -5.0), Vec2::Y), Vec2::new(1.0, 5.0));
    }

    #[test]
    fn test_paddle_hit_offset() {
        let paddle = Rect::new(100.0, 500.0, 100.0, 16.0);
        assert_eq!(paddle_hit_offset(150.0, &paddle), 0.0);
        assert_eq!(paddle_hit_offset(200.0, &paddle), 1.0);
        assert_eq!(paddle_hit_offset(75.0, &paddle), -1.0);
        assert!((paddle_hit_offset(125.0, &paddle) + 0.5).abs() < 1e-6);
    }
}
