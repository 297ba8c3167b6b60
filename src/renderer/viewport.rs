//! Letterboxed mapping between the logical canvas and the surface
//!
//! The 400x600 play area is scaled uniformly to fit the surface and centered;
//! the bars on either side stay background colored.

use glam::Vec2;

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Surface size in pixels
    pub size: Vec2,
    /// Pixels per canvas unit
    pub scale: f32,
    /// Pixel position of the canvas origin
    pub offset: Vec2,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        let size = Vec2::new(width.max(1) as f32, height.max(1) as f32);
        let scale = (size.x / CANVAS_WIDTH).min(size.y / CANVAS_HEIGHT);
        let offset = (size - Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT) * scale) / 2.0;
        Self {
            size,
            scale,
            offset,
        }
    }

    /// Canvas units to normalized device coordinates (y up)
    pub fn canvas_to_ndc(&self, p: Vec2) -> Vec2 {
        let px = self.offset + p * self.scale;
        Vec2::new(px.x / self.size.x * 2.0 - 1.0, 1.0 - px.y / self.size.y * 2.0)
    }

    /// Surface pixels to canvas units
    pub fn pixel_to_canvas(&self, px: Vec2) -> Vec2 {
        (px - self.offset) / self.scale
    }

    /// Element-relative CSS position to canvas units.
    ///
    /// `client_size` is the element's CSS size; it differs from the surface
    /// size by the device pixel ratio.
    pub fn client_to_canvas(&self, client: Vec2, client_size: Vec2) -> Vec2 {
        let ratio = self.size / client_size.max(Vec2::ONE);
        self.pixel_to_canvas(client * ratio)
    }
}
