//! Collision predicates between rectangles and polygons.
//!
//! - `rects_overlap`: strict interval overlap on both axes.
//! - `point_in_polygon`: crossing-number (even-odd) membership.
//! - `rect_collides_polygon`: any rectangle corner inside the polygon. Misses
//!   polygon edges that pierce the rectangle without enclosing a corner; kept
//!   as the default so generated maps stay reproducible.
//! - `rect_collides_polygon_exact`: corners, enclosed polygon vertices, or a
//!   proper edge crossing.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::types::Rect;

/// How wall rectangles are tested against swept path polygons.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionModel {
    /// Corner containment only.
    #[default]
    Corners,
    /// Corner containment, vertex containment, and edge crossings.
    Exact,
}

impl CollisionModel {
    #[inline]
    pub fn collides(self, rect: &Rect, polygon: &[Vector2<f64>]) -> bool {
        match self {
            Self::Corners => rect_collides_polygon(rect, polygon),
            Self::Exact => rect_collides_polygon_exact(rect, polygon),
        }
    }
}

/// Axis-aligned overlap; rectangles that only share an edge do not overlap.
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Crossing-number test. Fewer than three vertices never contain a point.
pub fn point_in_polygon(p: Vector2<f64>, polygon: &[Vector2<f64>]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[j];
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// True if any of the rectangle's four corners lies inside the polygon.
pub fn rect_collides_polygon(rect: &Rect, polygon: &[Vector2<f64>]) -> bool {
    rect.corners()
        .into_iter()
        .any(|c| point_in_polygon(c, polygon))
}

/// Corner test plus enclosed polygon vertices and proper edge crossings.
pub fn rect_collides_polygon_exact(rect: &Rect, polygon: &[Vector2<f64>]) -> bool {
    if rect_collides_polygon(rect, polygon) {
        return true;
    }
    if polygon.iter().any(|&v| rect.contains_strict(v)) {
        return true;
    }
    let corners = rect.corners();
    let n = polygon.len();
    (0..n).any(|i| {
        let (p, q) = (polygon[i], polygon[(i + 1) % n]);
        (0..4).any(|k| segments_cross(p, q, corners[k], corners[(k + 1) % 4]))
    })
}

#[inline]
fn orient(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

/// Proper crossing: each segment strictly separates the other's endpoints.
fn segments_cross(p: Vector2<f64>, q: Vector2<f64>, r: Vector2<f64>, s: Vector2<f64>) -> bool {
    let d1 = orient(p, q, r);
    let d2 = orient(p, q, s);
    let d3 = orient(r, s, p);
    let d4 = orient(r, s, q);
    d1 * d2 < 0.0 && d3 * d4 < 0.0
}

/// Tightest axis-aligned rectangle containing both inputs.
pub fn bounding_union(a: &Rect, b: &Rect) -> Rect {
    let min_x = a.x.min(b.x);
    let min_y = a.y.min(b.y);
    let max_x = a.right().max(b.right());
    let max_y = a.bottom().max(b.bottom());
    Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
}

/// Overlapping, or within `margin` along one axis while strictly overlapping
/// on the perpendicular axis.
pub fn touching_or_overlapping(a: &Rect, b: &Rect, margin: f64) -> bool {
    let x_near = a.right() >= b.x - margin && a.x <= b.right() + margin;
    let y_near = a.bottom() >= b.y - margin && a.y <= b.bottom() + margin;
    let x_strict = a.x < b.right() && a.right() > b.x;
    let y_strict = a.y < b.bottom() && a.bottom() > b.y;
    (x_near && y_strict) || (y_near && x_strict)
}

/// The bounding union is no larger than the two areas combined, i.e. the
/// pair overlaps or shares a full edge.
#[inline]
pub fn union_within_area(a: &Rect, b: &Rect) -> bool {
    bounding_union(a, b).area() <= a.area() + b.area()
}
