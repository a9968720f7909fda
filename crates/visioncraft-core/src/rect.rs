//! Rectangle type for image regions.
//!
//! # Coordinate System
//!
//! All coordinates use the standard image convention:
//! - Origin (0, 0) is at the **top-left** corner
//! - X increases to the right (columns)
//! - Y increases downward (rows)
//!
//! ```text
//! (0,0) ────────► X
//!   │
//!   │   ┌──────────┐
//!   │   │  Image   │
//!   │   │  Region  │
//!   │   └──────────┘
//!   ▼
//!   Y
//! ```
//!
//! Coordinates are signed: crop requests arrive from callers as plain
//! integers and may start left of or above the image, or carry a negative
//! extent. Edge arithmetic is done in `i64` so that no combination of `i32`
//! inputs overflows.
//!
//! # Usage
//!
//! ```rust
//! use visioncraft_core::Rect;
//!
//! let request = Rect::new(90, 90, 50, 50);
//! let clipped = request.clip_to(100, 100).unwrap();
//! assert_eq!(clipped, Rect::new(90, 90, 10, 10));
//!
//! assert!(Rect::new(200, 200, 10, 10).clip_to(100, 100).is_none());
//! ```

/// A rectangle defined by origin (x, y) and dimensions (width, height).
///
/// # Invariants
///
/// A rectangle with zero or negative width or height is considered empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate of the left edge (inclusive)
    pub x: i32,
    /// Y coordinate of the top edge (inclusive)
    pub y: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle with the given origin and dimensions.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle from origin (0, 0) covering `cols` x `rows`.
    ///
    /// Sizes beyond `i32::MAX` saturate.
    #[inline]
    pub fn from_size(cols: usize, rows: usize) -> Self {
        let w = i32::try_from(cols).unwrap_or(i32::MAX);
        let h = i32::try_from(rows).unwrap_or(i32::MAX);
        Self::new(0, 0, w, h)
    }

    /// Returns the X coordinate of the right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Returns the Y coordinate of the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Returns the area in pixels, zero for empty rectangles.
    #[inline]
    pub const fn area(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.width as u64 * self.height as u64
        }
    }

    /// Returns `true` if the rectangle has zero or negative extent.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Returns `true` if the point (px, py) is inside this rectangle.
    ///
    /// Inclusive on the left/top edges, exclusive on the right/bottom edges.
    #[inline]
    pub const fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x
            && (px as i64) < self.right()
            && py >= self.y
            && (py as i64) < self.bottom()
    }

    /// Returns the intersection of this rectangle with another.
    ///
    /// Returns `None` if the overlap is empty.
    ///
    /// # Example
    ///
    /// ```rust
    /// use visioncraft_core::Rect;
    ///
    /// let a = Rect::new(0, 0, 100, 100);
    /// let b = Rect::new(50, 50, 100, 100);
    /// assert_eq!(a.intersect(&b), Some(Rect::new(50, 50, 50, 50)));
    /// ```
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if (x as i64) < right && (y as i64) < bottom {
            // Both extents are bounded by the narrower input, so they fit in i32.
            let w = (right - x as i64) as i32;
            let h = (bottom - y as i64) as i32;
            Some(Rect::new(x, y, w, h))
        } else {
            None
        }
    }

    /// Clips this rectangle to an image of `cols` x `rows`.
    ///
    /// Returns `None` when nothing of the rectangle lies inside the image.
    #[inline]
    pub fn clip_to(&self, cols: usize, rows: usize) -> Option<Rect> {
        self.intersect(&Rect::from_size(cols, rows))
    }

    /// Returns `true` if the rectangle is non-empty and lies fully inside an
    /// image of `cols` x `rows`.
    #[inline]
    pub fn fits_within(&self, cols: usize, rows: usize) -> bool {
        !self.is_empty()
            && self.x >= 0
            && self.y >= 0
            && self.right() <= cols as i64
            && self.bottom() <= rows as i64
    }
}

impl From<(i32, i32, i32, i32)> for Rect {
    fn from((x, y, width, height): (i32, i32, i32, i32)) -> Self {
        Self::new(x, y, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10, 20, 100, 50);
        assert_eq!(r.right(), 110);
        assert_eq!(r.bottom(), 70);
        assert_eq!(r.area(), 5000);
    }

    #[test]
    fn test_rect_empty() {
        assert!(Rect::new(0, 0, 0, 10).is_empty());
        assert!(Rect::new(0, 0, 10, -5).is_empty());
        assert!(!Rect::new(0, 0, 1, 1).is_empty());
        assert_eq!(Rect::new(0, 0, -3, 4).area(), 0);
    }

    #[test]
    fn test_rect_contains() {
        let r = Rect::new(10, 10, 100, 100);
        assert!(r.contains(10, 10));
        assert!(r.contains(109, 109));
        assert!(!r.contains(110, 110));
        assert!(!r.contains(9, 50));
    }

    #[test]
    fn test_clip_inside() {
        let r = Rect::new(10, 10, 50, 50).clip_to(100, 100);
        assert_eq!(r, Some(Rect::new(10, 10, 50, 50)));
    }

    #[test]
    fn test_clip_partial() {
        let r = Rect::new(90, 90, 50, 50).clip_to(100, 100);
        assert_eq!(r, Some(Rect::new(90, 90, 10, 10)));
    }

    #[test]
    fn test_clip_negative_origin() {
        let r = Rect::new(-5, -10, 20, 20).clip_to(100, 100);
        assert_eq!(r, Some(Rect::new(0, 0, 15, 10)));
    }

    #[test]
    fn test_clip_outside() {
        assert_eq!(Rect::new(200, 200, 10, 10).clip_to(100, 100), None);
        assert_eq!(Rect::new(10, 10, -5, 20).clip_to(100, 100), None);
    }

    #[test]
    fn test_clip_no_overflow() {
        let r = Rect::new(i32::MAX, i32::MAX, i32::MAX, i32::MAX);
        assert_eq!(r.clip_to(100, 100), None);

        let huge = Rect::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        assert_eq!(huge.clip_to(100, 100), None);
    }

    #[test]
    fn test_fits_within() {
        assert!(Rect::new(0, 0, 100, 100).fits_within(100, 100));
        assert!(!Rect::new(1, 0, 100, 100).fits_within(100, 100));
        assert!(!Rect::new(-1, 0, 10, 10).fits_within(100, 100));
    }
}
