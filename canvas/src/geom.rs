//! Points, sizes, and the three coordinate spaces the scene uses.
//!
//! Devices store a normalized base position (`0..1`), the overlay speaks in
//! percentages of its bounding box, and the canvas draws in pixels. The
//! conversions between them live here so every caller agrees on the maths.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

/// A point in pixel space (canvas or client coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are strictly positive.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// A position in percent of an enclosing box (`50.0` = centre).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentPos {
    pub x: f64,
    pub y: f64,
}

impl PercentPos {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Percent position for a normalized `0..1` position.
    #[must_use]
    pub fn from_normalized(x: f64, y: f64) -> Self {
        Self { x: x * 100.0, y: y * 100.0 }
    }

    /// Pixel point inside a box of the given size.
    #[must_use]
    pub fn to_pixels(self, size: Size) -> Point {
        Point { x: self.x / 100.0 * size.width, y: self.y / 100.0 * size.height }
    }
}
