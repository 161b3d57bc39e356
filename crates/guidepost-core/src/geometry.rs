#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All values are `f64` pixels. A [`Rect`] is in document-absolute
//! coordinates unless stated otherwise: its origin is the top-left of the
//! full scrollable content, so it does not move when the surface scrolls.

/// A point in document-absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A rectangle used for targets, the backdrop cutout, and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from an origin and a size.
    #[inline]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Top-left corner.
    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Width and height.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Horizontal centre line.
    #[inline]
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Check if `other` lies entirely within this rectangle (edges inclusive).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Grow the rectangle by `amount` on every side.
    ///
    /// Negative amounts shrink it; the result is not clamped.
    pub fn inflate(&self, amount: f64) -> Rect {
        Rect {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + amount * 2.0,
            height: self.height + amount * 2.0,
        }
    }

    /// Move the rectangle by `offset`.
    #[inline]
    pub fn translate(&self, offset: Point) -> Rect {
        Rect::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }

    /// Create a new rectangle that is the union of this rectangle and another.
    ///
    /// The result is the smallest rectangle that contains both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());

        Rect {
            x,
            y,
            width: right - x,
            height: bottom - y,
        }
    }
}

/// A raw measurement as reported by a render surface.
///
/// `rect` is relative to the current viewport; `scroll` is the surface's
/// scroll offset at the time of measuring.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Measurement {
    pub rect: Rect,
    pub scroll: Point,
}

impl Measurement {
    /// Create a measurement.
    #[inline]
    pub const fn new(rect: Rect, scroll: Point) -> Self {
        Self { rect, scroll }
    }

    /// Convert to document-absolute coordinates.
    #[inline]
    pub fn to_document(&self) -> Rect {
        self.rect.translate(self.scroll)
    }
}

#[cfg(test)]
mod tests {
    use super::{Measurement, Point, Rect, Size};

    #[test]
    fn rect_contains_edges() {
        let rect = Rect::new(2.0, 3.0, 4.0, 5.0);
        assert!(rect.contains(Point::new(2.0, 3.0)));
        assert!(rect.contains(Point::new(5.9, 7.9)));
        assert!(!rect.contains(Point::new(6.0, 3.0)));
        assert!(!rect.contains(Point::new(2.0, 8.0)));
    }

    #[test]
    fn inflate_grows_every_side() {
        let rect = Rect::new(100.0, 200.0, 50.0, 30.0);
        assert_eq!(rect.inflate(10.0), Rect::new(90.0, 190.0, 70.0, 50.0));
        assert!(rect.inflate(10.0).contains_rect(&rect));
    }

    #[test]
    fn inflate_zero_size_rect() {
        let rect = Rect::new(5.0, 5.0, 0.0, 0.0);
        assert!(rect.is_empty());
        assert_eq!(rect.inflate(2.0), Rect::new(3.0, 3.0, 4.0, 4.0));
    }

    #[test]
    fn union_covers_both() {
        let a = Rect::new(0.0, 0.0, 4.0, 4.0);
        let b = Rect::new(2.0, 2.0, 4.0, 4.0);
        assert_eq!(a.union(&b), Rect::new(0.0, 0.0, 6.0, 6.0));
    }

    #[test]
    fn center_x_of_target() {
        assert_eq!(Rect::new(10.0, 0.0, 30.0, 5.0).center_x(), 25.0);
    }

    #[test]
    fn origin_and_size_round_trip() {
        let rect = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(
            Rect::from_origin_size(rect.origin(), rect.size()),
            rect
        );
        assert_eq!(rect.size(), Size::new(3.0, 4.0));
    }

    #[test]
    fn measurement_adds_scroll_offset() {
        let m = Measurement::new(Rect::new(10.0, -40.0, 20.0, 20.0), Point::new(0.0, 540.0));
        assert_eq!(m.to_document(), Rect::new(10.0, 500.0, 20.0, 20.0));
    }
}
