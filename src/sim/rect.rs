//! Axis-aligned rectangle geometry
//!
//! Every object's rect is both its render bound and its collision bound.
//! Rects are stored top-left anchored but constructed from a center point,
//! since positions in the simulation are center-anchored.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Build a rect centered on `center` with the given size
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            x: center.x - size.x / 2.0,
            y: center.y - size.y / 2.0,
            w: size.x,
            h: size.y,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// True if `other` lies entirely inside this rect
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// True if the two rects overlap (touching edges do not count)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Grow the rect by `dw` total width and `dh` total height, keeping its
    /// center fixed (half the growth is applied to each side)
    pub fn inflate(&self, dw: f32, dh: f32) -> Self {
        Self {
            x: self.x - dw / 2.0,
            y: self.y - dh / 2.0,
            w: self.w + dw,
            h: self.h + dh,
        }
    }

    /// Return the center this rect would have after being pushed fully
    /// inside `outer`. Positional only: callers keep their velocity.
    pub fn clamped_center_within(&self, outer: &Rect) -> Vec2 {
        let x = self.x.clamp(outer.x, (outer.right() - self.w).max(outer.x));
        let y = self.y.clamp(outer.y, (outer.bottom() - self.h).max(outer.y));
        Vec2::new(x + self.w / 2.0, y + self.h / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_center_round_trip() {
        let r = Rect::from_center(Vec2::new(100.0, 50.0), Vec2::new(20.0, 10.0));
        assert_eq!(r.x, 90.0);
        assert_eq!(r.y, 45.0);
        assert_eq!(r.center(), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_contains() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));

        // Poking past the right edge
        let edge = Rect::new(90.0, 10.0, 20.0, 20.0);
        assert!(!outer.contains(&edge));
    }

    #[test]
    fn test_intersects() {
        let a = Rect::new(0.0, 0.0, 50.0, 50.0);
        let b = Rect::new(40.0, 40.0, 50.0, 50.0);
        let c = Rect::new(60.0, 60.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));

        // Exactly touching edges do not overlap
        let d = Rect::new(50.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&d));
    }

    #[test]
    fn test_inflate_keeps_center() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        let grown = r.inflate(40.0, 20.0);
        assert_eq!(grown.center(), r.center());
        assert_eq!(grown.w, 60.0);
        assert_eq!(grown.h, 40.0);
        assert_eq!(grown.x, -10.0);
    }

    #[test]
    fn test_clamped_center_within() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);

        // Already inside: unchanged
        let r = Rect::from_center(Vec2::new(50.0, 50.0), Vec2::new(10.0, 10.0));
        assert_eq!(r.clamped_center_within(&outer), Vec2::new(50.0, 50.0));

        // Past the left edge: pushed back in
        let r = Rect::from_center(Vec2::new(-20.0, 50.0), Vec2::new(10.0, 10.0));
        assert_eq!(r.clamped_center_within(&outer), Vec2::new(5.0, 50.0));

        // Past the bottom-right corner
        let r = Rect::from_center(Vec2::new(130.0, 130.0), Vec2::new(10.0, 10.0));
        assert_eq!(r.clamped_center_within(&outer), Vec2::new(95.0, 95.0));
    }
}
