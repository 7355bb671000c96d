//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    /// Byte stride of one vertex in an uploaded buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// View a vertex list as raw bytes for upload
pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

/// Same color with a different alpha
#[inline]
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha.clamp(0.0, 1.0)]
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.01, 0.02, 0.09, 1.0];
    pub const GRID: [f32; 4] = [0.12, 0.16, 0.28, 0.4];
    pub const PADDLE: [f32; 4] = [0.23, 0.51, 0.96, 1.0];
    pub const PADDLE_REVERSED: [f32; 4] = [0.66, 0.33, 0.97, 1.0];
    pub const SHIELD: [f32; 4] = [0.23, 0.51, 0.96, 0.6];
    pub const MAGNET: [f32; 4] = [0.98, 0.8, 0.08, 1.0];
    pub const BALL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const TRAIL: [f32; 4] = [0.58, 0.77, 0.99, 1.0];
    pub const BRICK: [f32; 4] = [0.12, 0.16, 0.23, 1.0];
    pub const BRICK_REINFORCED: [f32; 4] = [0.28, 0.33, 0.41, 1.0];
    pub const BRICK_BORDER: [f32; 4] = [0.2, 0.25, 0.33, 1.0];
    pub const TARGET_GLOW: [f32; 4] = [0.2, 0.83, 0.6, 1.0];
    pub const TEXT: [f32; 4] = [0.89, 0.91, 0.94, 1.0];
    pub const GAIN: [f32; 4] = [0.2, 0.83, 0.6, 1.0];
    pub const PENALTY: [f32; 4] = [0.97, 0.44, 0.44, 1.0];
    pub const CRACK: [f32; 4] = [0.58, 0.64, 0.72, 1.0];
    pub const HUD_BAR: [f32; 4] = [0.2, 0.83, 0.6, 0.9];
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.7];

    pub const GNOME_HAT: [f32; 4] = [0.73, 0.11, 0.11, 1.0];
    pub const GNOME_FACE: [f32; 4] = [1.0, 0.93, 0.84, 1.0];
    pub const DEVIL_HAT: [f32; 4] = [0.3, 0.11, 0.58, 1.0];
    pub const DEVIL_FACE: [f32; 4] = [0.93, 0.28, 0.6, 1.0];
    pub const SPEEDY_HAT: [f32; 4] = [0.12, 0.23, 0.54, 1.0];
    pub const SPEEDY_FACE: [f32; 4] = [0.38, 0.65, 0.98, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_is_tightly_packed() {
        assert_eq!(Vertex::STRIDE, 24);
        let verts = [Vertex::new(1.0, 2.0, colors::BALL); 3];
        assert_eq!(as_bytes(&verts).len(), 72);
    }

    #[test]
    fn test_with_alpha_clamps() {
        assert_eq!(with_alpha(colors::BALL, 2.0)[3], 1.0);
        assert_eq!(with_alpha(colors::BALL, 0.25)[0], 1.0);
    }
}
