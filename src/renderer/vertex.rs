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
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Same color with a different alpha
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha]
}

/// HSL (degrees, 0-1, 0-1) to RGBA
pub fn hsl(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> [f32; 4] {
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let h = hue.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    [r + m, g + m, b + m, alpha]
}

/// Colors for game elements
pub mod colors {
    pub const SPACE: [f32; 4] = [0.435, 0.529, 0.620, 1.0]; // #6f879e
    pub const LOBBY: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const LOUNGE: [f32; 4] = [0.102, 0.102, 0.180, 1.0]; // #1a1a2e
    pub const SCRIM: [f32; 4] = [0.0, 0.0, 0.0, 0.8];
    pub const STAR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PLAYER_HULL: [f32; 4] = [0.85, 0.88, 0.95, 1.0];
    pub const PLAYER_COCKPIT: [f32; 4] = [0.2, 0.6, 1.0, 1.0];
    pub const ENEMY_DOME: [f32; 4] = [0.5, 0.95, 0.45, 1.0];
    pub const ENEMY_DISC: [f32; 4] = [0.45, 0.25, 0.6, 1.0];
    pub const BULLET: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const ENEMY_BULLET: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const PICKUP: [f32; 4] = [1.0, 0.647, 0.0, 1.0]; // orange
    pub const BUTTON: [f32; 4] = [0.15, 0.2, 0.45, 1.0];
    pub const BUTTON_HOVER: [f32; 4] = [0.3, 0.45, 0.9, 1.0];
    pub const BUTTON_EDGE: [f32; 4] = [0.8, 0.85, 1.0, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f32; 4], b: [f32; 4]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-4)
    }

    #[test]
    fn test_hsl_primaries() {
        assert!(close(hsl(0.0, 1.0, 0.5, 1.0), [1.0, 0.0, 0.0, 1.0]));
        assert!(close(hsl(120.0, 1.0, 0.5, 1.0), [0.0, 1.0, 0.0, 1.0]));
        assert!(close(hsl(240.0, 1.0, 0.5, 0.5), [0.0, 0.0, 1.0, 0.5]));
    }

    #[test]
    fn test_hsl_wraps_hue() {
        assert!(close(hsl(360.0, 1.0, 0.5, 1.0), hsl(0.0, 1.0, 0.5, 1.0)));
    }
}
