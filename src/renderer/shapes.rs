//! Shape generation for 2D primitives
//!
//! All shapes are triangle lists in canvas coordinates.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors, with_alpha};
use crate::sim::Rect;

/// Two triangles covering a rectangle
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0) = (r.x, r.y);
    let (x1, y1) = (r.x + r.width, r.y + r.height);
    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Rectangle outline of the given thickness, drawn inside the bounds
pub fn rect_outline(r: &Rect, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let t = thickness.min(r.width / 2.0).min(r.height / 2.0);
    let mut vertices = Vec::with_capacity(24);
    vertices.extend(rect(&Rect::new(r.x, r.y, r.width, t), color));
    vertices.extend(rect(&Rect::new(r.x, r.y + r.height - t, r.width, t), color));
    vertices.extend(rect(&Rect::new(r.x, r.y + t, t, r.height - 2.0 * t), color));
    vertices.extend(rect(
        &Rect::new(r.x + r.width - t, r.y + t, t, r.height - 2.0 * t),
        color,
    ));
    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    ellipse(center, Vec2::splat(radius), color, segments)
}

/// Filled axis-aligned ellipse
pub fn ellipse(center: Vec2, radii: Vec2, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radii.x * theta1.cos(),
            center.y + radii.y * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radii.x * theta2.cos(),
            center.y + radii.y * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Filled star polygon with the first point straight up
pub fn star(center: Vec2, radius: f32, points: u32, inset: f32, color: [f32; 4]) -> Vec<Vertex> {
    let points = points.max(2);
    let corners = points * 2;
    let step = PI / points as f32;
    let corner = |i: u32| {
        let r = if i % 2 == 0 { radius } else { radius * inset };
        // Screen y grows downward, so "up" is -y
        let theta = i as f32 * step - PI / 2.0;
        Vec2::new(center.x + r * theta.cos(), center.y + r * theta.sin())
    };

    let mut vertices = Vec::with_capacity((corners * 3) as usize);
    for i in 0..corners {
        let a = corner(i);
        let b = corner((i + 1) % corners);
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(a.x, a.y, color));
        vertices.push(Vertex::new(b.x, b.y, color));
    }
    vertices
}

/// Player craft filling its bounding box, nose up
pub fn ship(bounds: &Rect, alpha: f32) -> Vec<Vertex> {
    let hull = with_alpha(colors::PLAYER_HULL, alpha);
    let cockpit = with_alpha(colors::PLAYER_COCKPIT, alpha);
    let Rect {
        x,
        y,
        width: w,
        height: h,
    } = *bounds;

    let mut vertices = vec![
        // Fuselage
        Vertex::new(x + w * 0.5, y, hull),
        Vertex::new(x + w * 0.3, y + h * 0.85, hull),
        Vertex::new(x + w * 0.7, y + h * 0.85, hull),
        // Left wing
        Vertex::new(x + w * 0.4, y + h * 0.4, hull),
        Vertex::new(x, y + h, hull),
        Vertex::new(x + w * 0.4, y + h * 0.85, hull),
        // Right wing
        Vertex::new(x + w * 0.6, y + h * 0.4, hull),
        Vertex::new(x + w * 0.6, y + h * 0.85, hull),
        Vertex::new(x + w, y + h, hull),
    ];
    vertices.extend(ellipse(
        Vec2::new(x + w * 0.5, y + h * 0.45),
        Vec2::new(w * 0.08, h * 0.14),
        cockpit,
        12,
    ));
    vertices
}

/// Enemy saucer filling its bounding box
pub fn saucer(bounds: &Rect) -> Vec<Vertex> {
    let center = bounds.center();
    let mut vertices = ellipse(
        Vec2::new(center.x, bounds.y + bounds.height * 0.35),
        Vec2::new(bounds.width * 0.25, bounds.height * 0.3),
        colors::ENEMY_DOME,
        16,
    );
    vertices.extend(ellipse(
        Vec2::new(center.x, bounds.y + bounds.height * 0.6),
        Vec2::new(bounds.width * 0.5, bounds.height * 0.22),
        colors::ENEMY_DISC,
        20,
    ));
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inside(v: &Vertex, r: &Rect) -> bool {
        let eps = 1e-3;
        v.position[0] >= r.x - eps
            && v.position[0] <= r.x + r.width + eps
            && v.position[1] >= r.y - eps
            && v.position[1] <= r.y + r.height + eps
    }

    #[test]
    fn test_rect_is_two_triangles() {
        let r = Rect::new(1.0, 2.0, 3.0, 4.0);
        let vertices = rect(&r, [1.0; 4]);
        assert_eq!(vertices.len(), 6);
        assert!(vertices.iter().all(|v| inside(v, &r)));
    }

    #[test]
    fn test_star_points_up() {
        let vertices = star(Vec2::new(10.0, 10.0), 6.0, 5, 0.5, [1.0; 4]);
        assert_eq!(vertices.len(), 30);
        let top = vertices
            .iter()
            .map(|v| v.position[1])
            .fold(f32::INFINITY, f32::min);
        assert!((top - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_sprites_stay_in_bounds() {
        let r = Rect::new(100.0, 200.0, 40.0, 40.0);
        assert!(ship(&r, 1.0).iter().all(|v| inside(v, &r)));
        assert!(saucer(&r).iter().all(|v| inside(v, &r)));
    }
}
