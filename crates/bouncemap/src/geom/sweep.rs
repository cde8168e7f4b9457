use nalgebra::Vector2;

use super::collide::bounding_union;
use super::types::{Polygon, Rect};

#[inline]
fn sign(v: f64) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Region swept by a square of side `size` moving from `start` to `end`
/// (top-left corners) along `direction`.
///
/// Diagonal motion yields a hexagon: the two corners of the start square on
/// the trailing side, the three leading corners of the end square, and the
/// remaining start corner. Axis-aligned (or zero) motion yields the four
/// corners of the bounding rectangle of both squares.
pub fn swept_polygon(
    direction: Vector2<f64>,
    start: Vector2<f64>,
    end: Vector2<f64>,
    size: f64,
) -> Polygon {
    let s = |x: f64, y: f64| Vector2::new(start.x + x, start.y + y);
    let e = |x: f64, y: f64| Vector2::new(end.x + x, end.y + y);
    match (sign(direction.x), sign(direction.y)) {
        // towards bottom right
        (1, 1) => vec![
            s(0.0, 0.0),
            s(size, 0.0),
            e(size, 0.0),
            e(size, size),
            e(0.0, size),
            s(0.0, size),
        ],
        // towards bottom left
        (-1, 1) => vec![
            s(size, 0.0),
            s(0.0, 0.0),
            e(0.0, 0.0),
            e(0.0, size),
            e(size, size),
            s(size, size),
        ],
        // towards top right
        (1, -1) => vec![
            s(0.0, size),
            s(size, size),
            e(size, size),
            e(size, 0.0),
            e(0.0, 0.0),
            s(0.0, 0.0),
        ],
        // towards top left
        (-1, -1) => vec![
            s(size, size),
            s(0.0, size),
            e(0.0, size),
            e(0.0, 0.0),
            e(size, 0.0),
            s(size, 0.0),
        ],
        _ => {
            let hull = bounding_union(&Rect::square_at(start, size), &Rect::square_at(end, size));
            hull.corners().to_vec()
        }
    }
}
