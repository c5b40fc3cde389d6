#![forbid(unsafe_code)]

//! Geometric primitives in CSS pixel space (origin at top-left).

/// A point in viewport-relative CSS pixels.
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

    /// Translate by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Pixel dimensions of a surface or viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Check if either dimension is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width as a float, for position math.
    #[inline]
    pub fn width_f64(&self) -> f64 {
        f64::from(self.width)
    }

    /// Height as a float, for position math.
    #[inline]
    pub fn height_f64(&self) -> f64 {
        f64::from(self.height)
    }

    /// Whether `p` lies in `[0, width) × [0, height)`.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0.0 && p.x < self.width_f64() && p.y >= 0.0 && p.y < self.height_f64()
    }

    /// Wrap `p` onto the torus `[0, width) × [0, height)`.
    #[inline]
    #[must_use]
    pub fn wrap(&self, p: Point) -> Point {
        Point::new(
            wrap_coordinate(p.x, self.width_f64()),
            wrap_coordinate(p.y, self.height_f64()),
        )
    }
}

/// Wrap `value` into `[0, extent)` using the Euclidean remainder.
///
/// Works for displacements of any magnitude. A zero, negative, or non-finite
/// extent pins the result to `0.0`, as does a non-finite `value`.
#[inline]
pub fn wrap_coordinate(value: f64, extent: f64) -> f64 {
    if !extent.is_finite() || extent <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs.
    if wrapped >= extent { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_inside_is_identity() {
        assert_eq!(wrap_coordinate(12.5, 100.0), 12.5);
        assert_eq!(wrap_coordinate(0.0, 100.0), 0.0);
    }

    #[test]
    fn wrap_low_side_lands_near_far_edge() {
        assert!((wrap_coordinate(-0.25, 100.0) - 99.75).abs() < 1e-9);
    }

    #[test]
    fn wrap_high_side_lands_near_zero() {
        assert!((wrap_coordinate(100.25, 100.0) - 0.25).abs() < 1e-9);
        assert_eq!(wrap_coordinate(100.0, 100.0), 0.0);
    }

    #[test]
    fn wrap_skips_multiple_widths() {
        assert!((wrap_coordinate(1050.0, 100.0) - 50.0).abs() < 1e-9);
        assert!((wrap_coordinate(-1050.0, 100.0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn wrap_tiny_negative_never_returns_extent() {
        let w = wrap_coordinate(-1e-300, 100.0);
        assert!((0.0..100.0).contains(&w), "got {w}");
    }

    #[test]
    fn wrap_degenerate_extent_pins_to_zero() {
        assert_eq!(wrap_coordinate(5.0, 0.0), 0.0);
        assert_eq!(wrap_coordinate(5.0, -3.0), 0.0);
        assert_eq!(wrap_coordinate(f64::NAN, 10.0), 0.0);
    }

    #[test]
    fn size_contains_is_half_open() {
        let size = Size::new(10, 20);
        assert!(size.contains(Point::new(0.0, 0.0)));
        assert!(!size.contains(Point::new(10.0, 5.0)));
        assert!(!size.contains(Point::new(5.0, 20.0)));
        assert!(!size.contains(Point::new(-0.1, 5.0)));
    }

    #[test]
    fn size_wrap_both_axes() {
        let size = Size::new(10, 20);
        assert_eq!(size.wrap(Point::new(-1.0, 25.0)), Point::new(9.0, 5.0));
    }

    #[test]
    fn empty_size() {
        assert!(Size::new(0, 5).is_empty());
        assert!(Size::default().is_empty());
        assert!(!Size::new(1, 1).is_empty());
    }
}
