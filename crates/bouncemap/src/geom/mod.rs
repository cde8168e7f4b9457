//! Grid geometry for the bounce search (axis-aligned rectangles and swept polygons).
//!
//! Purpose
//! - Provide the small set of predicates the search validates every step
//!   with: rectangle overlap, point-in-polygon, rectangle-vs-polygon, bounding
//!   unions, and the neighbour test used by merging.
//! - Keep coordinates in pixel space (`f64`, y grows downward) and snap them
//!   to the cell grid so wall rectangles stay grid-aligned.
//!
//! Conventions
//! - `Rect` is `(x, y, w, h)` with `(x, y)` the top-left corner.
//! - Overlap is strict: rectangles sharing only an edge do not overlap.
//! - Polygons are open vertex loops; the last vertex connects to the first.

mod collide;
mod snap;
mod sweep;
mod types;

pub use collide::{
    bounding_union, point_in_polygon, rect_collides_polygon, rect_collides_polygon_exact,
    rects_overlap, touching_or_overlapping, union_within_area, CollisionModel,
};
pub use snap::{snap_coordinate, snap_position};
pub use sweep::swept_polygon;
pub use types::{Polygon, Rect};

#[cfg(test)]
mod tests;
