use nalgebra::Vector2;

use crate::cfg::SNAP_EPS;

/// Snap one coordinate onto the grid.
///
/// Values within `SNAP_EPS` of a main grid line (multiples of `cell`) land on
/// that line; everything else rounds to the nearest multiple of `sub` inside
/// the cell, never past the cell's far edge.
pub fn snap_coordinate(coord: f64, cell: f64, sub: f64) -> f64 {
    let cell_index = (coord / cell).floor();
    let base = cell_index * cell;
    let local = coord - base;
    let local = if local < SNAP_EPS {
        0.0
    } else if (local - cell).abs() < SNAP_EPS {
        cell
    } else {
        ((local / sub).round() * sub).min(cell)
    };
    base + local
}

/// Snap both components of `p`.
#[inline]
pub fn snap_position(p: Vector2<f64>, cell: f64, sub: f64) -> Vector2<f64> {
    Vector2::new(
        snap_coordinate(p.x, cell, sub),
        snap_coordinate(p.y, cell, sub),
    )
}
