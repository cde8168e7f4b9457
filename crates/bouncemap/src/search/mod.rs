//! Bounce path search: timestamps in, collision-free bounce sequence out.
//!
//! Purpose
//! - For every event time, decide whether the square bounces off a
//!   horizontal or a vertical wall, such that no swept path segment of the
//!   branch ever runs into a wall placed on that branch.
//! - Depth-first with explicit undo; randomized axis priority and a bounded
//!   multi-level unwind keep dense inputs from exploring dead subtrees forever.
//!
//! Layout
//! - `types.rs`: motion state, `Bounce`, configs, stats and results.
//! - `trail.rs`: push/pop arena for the active branch's geometry.
//! - `dfs.rs`: the frame-stack runner.

mod dfs;
mod trail;
mod types;

pub use dfs::search;
pub use types::{
    Axis, Bounce, Heading, MapCfg, Mover, SearchCfg, SearchEnd, SearchStats, Solution,
};
