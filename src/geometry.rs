//! Screen-space rectangles and viewport
//!
//! All coordinates are CSS pixels relative to the viewport, y pointing down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Inclusive point test (edges count as inside)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }
}

/// Visible area of the page
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Fraction of `rect`'s height inside the viewport's vertical extent.
    /// Zero-height rects report 0.
    pub fn visible_height_fraction(&self, rect: &Rect) -> f32 {
        if rect.height <= 0.0 {
            return 0.0;
        }
        let visible = rect.bottom().min(self.height) - rect.top.max(0.0);
        (visible / rect.height).max(0.0)
    }

    /// True if `rect` lies fully within the horizontal viewport bounds
    pub fn contains_horizontally(&self, rect: &Rect) -> bool {
        rect.left >= 0.0 && rect.right() <= self.width
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges_are_inside() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert!(r.contains(Vec2::new(10.0, 20.0)));
        assert!(r.contains(Vec2::new(110.0, 70.0)));
        assert!(!r.contains(Vec2::new(110.1, 70.0)));
        assert_eq!(r.center(), Vec2::new(60.0, 45.0));
    }

    #[test]
    fn test_visible_fraction_partially_below_fold() {
        let vp = Viewport::new(1000.0, 800.0);
        // 40 of 100 px on screen
        let r = Rect::new(0.0, 760.0, 100.0, 100.0);
        assert!((vp.visible_height_fraction(&r) - 0.4).abs() < 1e-5);
        // Entirely above the viewport
        let above = Rect::new(0.0, -300.0, 100.0, 100.0);
        assert_eq!(vp.visible_height_fraction(&above), 0.0);
        // Degenerate
        let flat = Rect::new(0.0, 100.0, 100.0, 0.0);
        assert_eq!(vp.visible_height_fraction(&flat), 0.0);
    }

    #[test]
    fn test_horizontal_containment() {
        let vp = Viewport::new(1000.0, 800.0);
        assert!(vp.contains_horizontally(&Rect::new(0.0, 0.0, 1000.0, 10.0)));
        assert!(!vp.contains_horizontally(&Rect::new(-1.0, 0.0, 50.0, 10.0)));
        assert!(!vp.contains_horizontally(&Rect::new(980.0, 0.0, 50.0, 10.0)));
    }
}
