//! Axis-aligned rectangle overlap
//!
//! Every entity in the game is a box, so this is the only collision shape.

use glam::Vec2;

/// Axis-aligned rectangle in canvas coordinates (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Point test with inclusive bounds on every edge (hover semantics)
    pub fn contains_inclusive(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    /// Point test with an exclusive bottom edge (click semantics), so stacked
    /// controls sharing an edge never both claim a click
    pub fn contains_click(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }
}

/// Strict open-interval overlap on both axes.
///
/// Touching edges do not overlap. A zero-size rectangle strictly inside the
/// other one does.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.width
        && a.x + a.width > b.x
        && a.y < b.y + b.height
        && a.y + a.height > b.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlapping_boxes() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!overlaps(&a, &right));
        assert!(!overlaps(&a, &below));
    }

    #[test]
    fn test_fully_contained() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 4.0, 10.0);
        assert!(overlaps(&outer, &inner));
        assert!(overlaps(&inner, &outer));
    }

    #[test]
    fn test_zero_size_inside() {
        let outer = Rect::new(0.0, 0.0, 20.0, 20.0);
        let point = Rect::new(10.0, 10.0, 0.0, 0.0);
        assert!(overlaps(&outer, &point));
        assert!(overlaps(&point, &outer));
    }

    #[test]
    fn test_separated_on_one_axis() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 30.0, 10.0, 10.0);
        assert!(!overlaps(&a, &b));
    }

    #[test]
    fn test_click_excludes_bottom_edge() {
        let r = Rect::new(250.0, 450.0, 120.0, 70.0);
        assert!(r.contains_click(Vec2::new(250.0, 450.0)));
        assert!(!r.contains_click(Vec2::new(300.0, 520.0)));
        assert!(r.contains_inclusive(Vec2::new(300.0, 520.0)));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -50.0f32..450.0, ay in -50.0f32..650.0, aw in 0.0f32..60.0, ah in 0.0f32..60.0,
            bx in -50.0f32..450.0, by in -50.0f32..650.0, bw in 0.0f32..60.0, bh in 0.0f32..60.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }
    }
}
