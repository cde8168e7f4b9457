//! Tolerance defaults (internal).
//!
//! Policy
//! - Values that are tuning knobs live in `MapCfg`/`SearchCfg`. The constants
//!   here are fixed: changing them changes what "on the grid" or "touching"
//!   means for every caller.

/// Distance below which a coordinate counts as lying on a main grid line.
pub const SNAP_EPS: f64 = 0.01;
/// Gap (px) under which two rectangles count as neighbours for `MergeRule::Neighboring`.
pub const NEIGHBOR_MARGIN: f64 = 2.0;
