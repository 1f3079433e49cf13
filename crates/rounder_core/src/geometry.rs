//! Geometry types
//!
//! Window geometry arrives from the compositor in logical coordinates as
//! floating point rectangles. Regions and raster images work on whole pixels,
//! so both representations live here.

// ─────────────────────────────────────────────────────────────────────────────
// Identity
// ─────────────────────────────────────────────────────────────────────────────

/// Identity of a physical output as reported by the compositor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScreenId(pub u32);

// ─────────────────────────────────────────────────────────────────────────────
// Floating point geometry
// ─────────────────────────────────────────────────────────────────────────────

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// 2D rectangle in logical (or, after [`Rect::scaled`], device) coordinates
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

    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn x(&self) -> f64 {
        self.origin.x
    }

    pub fn y(&self) -> f64 {
        self.origin.y
    }

    pub fn width(&self) -> f64 {
        self.size.width
    }

    pub fn height(&self) -> f64 {
        self.size.height
    }

    pub fn right(&self) -> f64 {
        self.origin.x + self.size.width
    }

    pub fn bottom(&self) -> f64 {
        self.origin.y + self.size.height
    }

    /// Multiply every field (origin and size) by a device scale factor
    pub fn scaled(&self, factor: f64) -> Self {
        Rect::new(
            self.origin.x * factor,
            self.origin.y * factor,
            self.size.width * factor,
            self.size.height * factor,
        )
    }

    /// Check if this rect intersects with another
    ///
    /// Returns true if the two rects overlap at any point.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.origin.x < other.right()
            && self.right() > other.origin.x
            && self.origin.y < other.bottom()
            && self.bottom() > other.origin.y
    }

    /// Round to the nearest pixel rectangle
    pub fn to_irect(&self) -> IRect {
        IRect::new(
            self.origin.x.round() as i32,
            self.origin.y.round() as i32,
            self.size.width.round() as i32,
            self.size.height.round() as i32,
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pixel geometry
// ─────────────────────────────────────────────────────────────────────────────

/// Integer pixel rectangle. Covers `x..x + width` and `y..y + height`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl IRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build from left/top/right/bottom edges (right and bottom exclusive)
    pub fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(left, top, right.saturating_sub(left), bottom.saturating_sub(top))
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn area(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.width as i64 * self.height as i64
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy), self.width, self.height)
    }

    /// Overlapping part of two rects, if any
    pub fn intersection(&self, other: &IRect) -> Option<IRect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        let r = IRect::from_ltrb(left, top, right, bottom);
        (!r.is_empty()).then_some(r)
    }

    /// Smallest rect containing both. Empty rects are ignored.
    pub fn union(&self, other: &IRect) -> IRect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        IRect::from_ltrb(
            self.x.min(other.x),
            self.y.min(other.y),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    /// Multiply every field by a scale factor, rounding to whole pixels
    pub fn scaled(&self, factor: f64) -> IRect {
        Rect::new(
            self.x as f64,
            self.y as f64,
            self.width as f64,
            self.height as f64,
        )
        .scaled(factor)
        .to_irect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_scaled_multiplies_every_field() {
        let r = Rect::new(10.0, 20.0, 300.0, 200.0).scaled(1.5);
        assert_eq!(r, Rect::new(15.0, 30.0, 450.0, 300.0));
    }

    #[test]
    fn test_rect_intersects() {
        let screen = Rect::new(0.0, 0.0, 1920.0, 1080.0);
        assert!(screen.intersects(&Rect::new(1900.0, 100.0, 200.0, 200.0)));
        assert!(!screen.intersects(&Rect::new(1920.0, 100.0, 200.0, 200.0)));
        assert!(!screen.intersects(&Rect::new(-300.0, 0.0, 300.0, 10.0)));
    }

    #[test]
    fn test_irect_intersection() {
        let a = IRect::new(0, 0, 10, 10);
        assert_eq!(
            a.intersection(&IRect::new(5, 5, 10, 10)),
            Some(IRect::new(5, 5, 5, 5))
        );
        assert_eq!(a.intersection(&IRect::new(10, 0, 5, 5)), None);
    }

    #[test]
    fn test_irect_edges_saturate() {
        let far = IRect::new(i32::MAX - 10, 0, 100, 100);
        assert_eq!(far.right(), i32::MAX);
        assert_eq!(far.translated(50, 0).x, i32::MAX);
        assert_eq!(
            far.intersection(&IRect::new(0, 0, i32::MAX, 50)),
            Some(IRect::new(i32::MAX - 10, 0, 10, 50))
        );
    }

    #[test]
    fn test_irect_union_ignores_empty() {
        let a = IRect::new(3, 4, 5, 6);
        assert_eq!(a.union(&IRect::default()), a);
        assert_eq!(IRect::default().union(&a), a);
        assert_eq!(
            a.union(&IRect::new(0, 0, 1, 1)),
            IRect::from_ltrb(0, 0, 8, 10)
        );
    }
}
