//! Bounce-path synthesis for beat-synchronised square animations.
//!
//! Given the ordered times of musical events, the crate finds a sequence of
//! bounces for a square moving diagonally on a grid such that the swept
//! path never runs back into a wall it already placed, then derives
//! per-bounce speeds and the merged "safe area" geometry for rendering.
//!
//! Layout
//! - `geom`: rectangles, polygons, collision predicates, snapping.
//! - `merge`: fixpoint merge of rectangle sets.
//! - `reach`: bounded flood fill over the cell grid.
//! - `search`: randomized backtracking search producing bounces.
//! - `post`: speed derivation and floating/connected classification.
//! - `map`: the `generate_map` entry point tying it together.
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API; the
//!   renderer and the CLI are the only consumers.

pub mod cfg;
pub mod geom;
pub mod map;
pub mod merge;
pub mod post;
pub mod reach;
pub mod search;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom::Rect;
pub use map::{generate_map, generate_map_with_rng, Map, MapCfg, MapError};
pub use nalgebra::Vector2 as Vec2;
pub use search::{search, SearchCfg, SearchEnd, SearchStats};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom::{
        bounding_union, point_in_polygon, rect_collides_polygon, rects_overlap, snap_position,
        swept_polygon, touching_or_overlapping, CollisionModel, Polygon, Rect,
    };
    pub use crate::map::{generate_map, generate_map_with_rng, Map, MapCfg, MapError};
    pub use crate::merge::{merge_rects, MergeRule};
    pub use crate::reach::{reachable_cells, Cell};
    pub use crate::search::{search, Axis, Bounce, Heading, SearchCfg, SearchEnd, SearchStats};
    pub use nalgebra::Vector2 as Vec2;
}
