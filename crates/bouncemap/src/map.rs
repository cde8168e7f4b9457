//! Top-level map generation: validate, search, merge, classify, time.
//!
//! `generate_map` is the single entry point most callers need. It owns the
//! error surface of the crate; everything below it reports plain outcomes.

use std::fmt;

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::geom::{Polygon, Rect};
use crate::merge::{merge_rects, MergeRule};
use crate::post::{assign_speeds, classify};
use crate::search::{search, Bounce, SearchCfg, SearchEnd, SearchStats};

pub use crate::search::MapCfg;

/// Errors surfaced by `generate_map`.
#[derive(Debug, Clone, PartialEq)]
pub enum MapError {
    /// A timestamp is not finite, negative, or smaller than its predecessor.
    InvalidTimestamps { index: usize, reason: String },
    InvalidConfig { reason: String },
    /// The search tried every branch it was allowed to.
    NoFeasiblePath,
    /// The step budget ran out before the search finished.
    StepBudgetExhausted { steps: u64 },
}

impl MapError {
    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    fn timestamp(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidTimestamps {
            index,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTimestamps { index, reason } => {
                write!(f, "invalid timestamp at index {index}: {reason}")
            }
            Self::InvalidConfig { reason } => write!(f, "invalid config: {reason}"),
            Self::NoFeasiblePath => write!(f, "no feasible bounce path for these timestamps"),
            Self::StepBudgetExhausted { steps } => {
                write!(f, "search gave up after {steps} steps")
            }
        }
    }
}

impl std::error::Error for MapError {}

/// A finished bounce map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Map {
    /// One bounce per input timestamp, with speed and classification set.
    pub bounces: Vec<Bounce>,
    /// Merged footprints of the square along the path.
    pub safe_areas: Vec<Rect>,
    pub floating_walls: Vec<Rect>,
    pub connected_walls: Vec<Rect>,
    /// Swept path polygon of every step.
    pub paths: Vec<Polygon>,
    pub stats: SearchStats,
}

impl Map {
    /// Time of the last bounce, or 0 for an empty map.
    pub fn duration(&self) -> f64 {
        self.bounces.last().map_or(0.0, |b| b.time)
    }
}

/// Generate a map with an RNG seeded from `scfg.seed`.
pub fn generate_map(timestamps: &[f64], cfg: &MapCfg, scfg: &SearchCfg) -> Result<Map, MapError> {
    let mut rng = StdRng::seed_from_u64(scfg.seed);
    generate_map_with_rng(timestamps, cfg, scfg, &mut rng)
}

/// Generate a map, drawing the search heuristics from `rng`.
pub fn generate_map_with_rng<R: Rng + ?Sized>(
    timestamps: &[f64],
    cfg: &MapCfg,
    scfg: &SearchCfg,
    rng: &mut R,
) -> Result<Map, MapError> {
    cfg.validate()?;
    scfg.validate()?;
    validate_timestamps(timestamps)?;

    debug!(timestamps = timestamps.len(), speed = cfg.speed, "bounce search");
    let (end, stats) = search(timestamps, cfg, scfg, rng);
    let solution = match end {
        SearchEnd::Found(solution) => solution,
        SearchEnd::Exhausted => {
            warn!(
                calls = stats.calls,
                rejections = stats.rejections,
                backtracks = stats.backtracks,
                "no feasible path"
            );
            return Err(MapError::NoFeasiblePath);
        }
        SearchEnd::OutOfSteps => {
            warn!(calls = stats.calls, deepest = stats.deepest, "step budget exhausted");
            return Err(MapError::StepBudgetExhausted { steps: stats.calls });
        }
    };
    info!(
        bounces = solution.bounces.len(),
        calls = stats.calls,
        rejections = stats.rejections,
        backtracks = stats.backtracks,
        "bounce path found"
    );

    let safe_areas = merge_rects(&solution.footprints, MergeRule::AreaBound);
    let mut bounces = solution.bounces;
    let (floating_walls, connected_walls) = classify(&mut bounces, &safe_areas, cfg);
    assign_speeds(&mut bounces, cfg.speed);

    Ok(Map {
        bounces,
        safe_areas,
        floating_walls,
        connected_walls,
        paths: solution.paths,
        stats,
    })
}

fn validate_timestamps(timestamps: &[f64]) -> Result<(), MapError> {
    let mut prev = 0.0;
    for (i, &t) in timestamps.iter().enumerate() {
        if !t.is_finite() {
            return Err(MapError::timestamp(i, "not finite"));
        }
        if t < prev {
            let reason = if i == 0 {
                "negative".to_string()
            } else {
                format!("{t} is before {prev}")
            };
            return Err(MapError::timestamp(i, reason));
        }
        prev = t;
    }
    Ok(())
}
