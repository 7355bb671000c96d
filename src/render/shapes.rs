//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors, with_alpha};
use crate::sim::state::{GnomeKind, Rect, TrailPoint};

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (min, max) = (r.min, r.max());
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Rectangle border of the given thickness, drawn inside `r`
pub fn rect_outline(r: &Rect, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let t = thickness.min(r.size.x / 2.0).min(r.size.y / 2.0).max(0.0);
    let (min, size) = (r.min, r.size);
    let sides = [
        Rect::new(min.x, min.y, size.x, t),
        Rect::new(min.x, min.y + size.y - t, size.x, t),
        Rect::new(min.x, min.y + t, t, size.y - 2.0 * t),
        Rect::new(min.x + size.x - t, min.y + t, t, size.y - 2.0 * t),
    ];
    sides.iter().flat_map(|side| rect(side, color)).collect()
}

/// Horizontal progress bar: background track plus a filled fraction
pub fn bar(r: &Rect, fraction: f32, track: [f32; 4], fill: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = rect(r, track);
    let filled = Rect::new(r.min.x, r.min.y, r.size.x * fraction.clamp(0.0, 1.0), r.size.y);
    if filled.size.x > 0.0 {
        vertices.extend(rect(&filled, fill));
    }
    vertices
}

/// Generate vertices for a filled triangle
pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        let (dir1, dir2) = (Vec2::from_angle(theta1), Vec2::from_angle(theta2));

        let inner1 = center + dir1 * inner_radius;
        let outer1 = center + dir1 * outer_radius;
        let inner2 = center + dir2 * inner_radius;
        let outer2 = center + dir2 * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Ball trail: one shrinking disc per recorded point, faded by its alpha
pub fn ball_trail(trail: &[TrailPoint], ball_radius: f32) -> Vec<Vertex> {
    let len = trail.len().max(1) as f32;
    trail
        .iter()
        .enumerate()
        .filter(|(_, point)| point.alpha > 0.0)
        .flat_map(|(i, point)| {
            let scale = 0.4 + 0.6 * (i as f32 + 1.0) / len;
            circle(point.pos, ball_radius * scale, with_alpha(colors::TRAIL, point.alpha), 12)
        })
        .collect()
}

/// Gnome sprite: a pointed hat over a round face, rotated about the box centre
pub fn gnome(center: Vec2, rotation: f32, kind: GnomeKind, alpha: f32) -> Vec<Vertex> {
    let (hat, face) = match kind {
        GnomeKind::Beneficial => (colors::GNOME_HAT, colors::GNOME_FACE),
        GnomeKind::Harmful => (colors::DEVIL_HAT, colors::DEVIL_FACE),
        GnomeKind::Speedy => (colors::SPEEDY_HAT, colors::SPEEDY_FACE),
    };
    let rot = Vec2::from_angle(rotation);
    let at = |x: f32, y: f32| center + rot.rotate(Vec2::new(x, y));

    let mut vertices = triangle(at(0.0, -40.0), at(20.0, 5.0), at(-20.0, 5.0), with_alpha(hat, alpha));
    vertices.extend(circle(at(0.0, 15.0), 16.0, with_alpha(face, alpha), 16));
    vertices
}
