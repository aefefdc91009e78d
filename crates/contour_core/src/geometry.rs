//! Core geometry types

// ─────────────────────────────────────────────────────────────────────────────
// Point / Size
// ─────────────────────────────────────────────────────────────────────────────

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rect
// ─────────────────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle
///
/// A rect with zero area is *degenerate*. Bounding boxes use the degenerate
/// state to mean "nothing measured yet".
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn x(&self) -> f32 {
        self.origin.x
    }

    pub fn y(&self) -> f32 {
        self.origin.y
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn max_x(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Signed area (width * height)
    pub fn area(&self) -> f32 {
        self.size.width * self.size.height
    }

    /// True when the rect encloses no area
    pub fn is_degenerate(&self) -> bool {
        self.area() == 0.0
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x <= self.max_x()
            && point.y >= self.origin.y
            && point.y <= self.max_y()
    }

    /// Create a rect from two corner points
    pub fn from_points(p1: Point, p2: Point) -> Self {
        let min_x = p1.x.min(p2.x);
        let min_y = p1.y.min(p2.y);
        let max_x = p1.x.max(p2.x);
        let max_y = p1.y.max(p2.y);
        Rect {
            origin: Point::new(min_x, min_y),
            size: Size::new(max_x - min_x, max_y - min_y),
        }
    }

    /// Get the union of two rects (smallest rect containing both)
    pub fn union(&self, other: &Rect) -> Self {
        let min_x = self.origin.x.min(other.origin.x);
        let min_y = self.origin.y.min(other.origin.y);
        let max_x = self.max_x().max(other.max_x());
        let max_y = self.max_y().max(other.max_y());
        Rect {
            origin: Point::new(min_x, min_y),
            size: Size::new(max_x - min_x, max_y - min_y),
        }
    }

    /// Expand rect to include a point
    pub fn expand_to_include(&self, point: Point) -> Self {
        let min_x = self.origin.x.min(point.x);
        let min_y = self.origin.y.min(point.y);
        let max_x = self.max_x().max(point.x);
        let max_y = self.max_y().max(point.y);
        Rect {
            origin: Point::new(min_x, min_y),
            size: Size::new(max_x - min_x, max_y - min_y),
        }
    }

    /// Grow an accumulated bounding box by `other`.
    ///
    /// Degenerate rects contribute nothing. The first non-degenerate rect
    /// replaces a degenerate accumulator; later ones are merged by union.
    pub fn merge_bounds(&self, other: &Rect) -> Self {
        if other.is_degenerate() {
            *self
        } else if self.is_degenerate() {
            *other
        } else {
            self.union(other)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, -5.0, 10.0, 5.0);
        assert_eq!(a.union(&b), Rect::new(0.0, -5.0, 15.0, 15.0));
        assert_eq!(a.union(&b), b.union(&a));
    }

    #[test]
    fn test_degenerate() {
        assert!(Rect::ZERO.is_degenerate());
        assert!(Rect::new(3.0, 4.0, 10.0, 0.0).is_degenerate());
        assert!(!Rect::new(3.0, 4.0, 1.0, 1.0).is_degenerate());
    }

    #[test]
    fn test_merge_bounds_seeds_from_first_real_box() {
        // A degenerate accumulator away from the origin must not stretch the result.
        let seed = Rect::new(100.0, 100.0, 0.0, 0.0);
        let b = Rect::new(0.0, 0.0, 2.0, 2.0);
        assert_eq!(seed.merge_bounds(&b), b);
    }

    #[test]
    fn test_merge_bounds_ignores_degenerate() {
        let acc = Rect::new(0.0, 0.0, 2.0, 2.0);
        let line = Rect::new(50.0, 0.0, 10.0, 0.0);
        assert_eq!(acc.merge_bounds(&line), acc);
    }

    #[test]
    fn test_from_points_and_contains() {
        let r = Rect::from_points(Point::new(4.0, 8.0), Point::new(0.0, 2.0));
        assert_eq!(r, Rect::new(0.0, 2.0, 4.0, 6.0));
        assert!(r.contains(Point::new(2.0, 5.0)));
        assert!(!r.contains(Point::new(5.0, 5.0)));
        assert_eq!(
            r.expand_to_include(Point::new(-1.0, 10.0)),
            Rect::new(-1.0, 2.0, 5.0, 8.0)
        );
    }
}
