//! Basic pixel-space shapes.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Closed vertex loop; the last vertex implicitly connects to the first.
pub type Polygon = Vec<Vector2<f64>>;

/// Axis-aligned rectangle, `(x, y)` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    #[inline]
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Square of side `size` with top-left corner at `p`.
    #[inline]
    pub fn square_at(p: Vector2<f64>, size: f64) -> Self {
        Self::new(p.x, p.y, size, size)
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// Zero or negative extent on either axis.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.w > 0.0 && self.h > 0.0)
    }

    /// Corners in clockwise screen order starting at the top-left.
    pub fn corners(&self) -> [Vector2<f64>; 4] {
        [
            Vector2::new(self.x, self.y),
            Vector2::new(self.right(), self.y),
            Vector2::new(self.right(), self.bottom()),
            Vector2::new(self.x, self.bottom()),
        ]
    }

    /// Grow by `margin` on every side.
    pub fn inflate(&self, margin: f64) -> Self {
        Self::new(
            self.x - margin,
            self.y - margin,
            self.w + 2.0 * margin,
            self.h + 2.0 * margin,
        )
    }

    /// Strict interior containment (boundary points are outside).
    #[inline]
    pub fn contains_strict(&self, p: Vector2<f64>) -> bool {
        p.x > self.x && p.x < self.right() && p.y > self.y && p.y < self.bottom()
    }
}
