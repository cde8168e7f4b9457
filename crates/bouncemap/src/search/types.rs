//! Data types for the bounce search: motion state, bounces, configs, results.
//!
//! Kept small and explicit to make `trail` and `dfs` easy to read.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::geom::{CollisionModel, Polygon, Rect};
use crate::map::MapError;
use crate::reach::Cell;

/// Which component of the heading a bounce inverts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Bounce off a left/right wall; `dx` flips.
    Horizontal,
    /// Bounce off a top/bottom wall; `dy` flips.
    Vertical,
}

impl Axis {
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// Direction with each component in `{-1, 0, +1}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Heading {
    pub dx: i8,
    pub dy: i8,
}

impl Heading {
    pub const DOWN_RIGHT: Self = Self { dx: 1, dy: 1 };

    /// Components are clamped to their sign.
    #[inline]
    pub fn new(dx: i8, dy: i8) -> Self {
        Self {
            dx: dx.signum(),
            dy: dy.signum(),
        }
    }

    #[inline]
    pub fn inverted(self, axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => Self {
                dx: -self.dx,
                ..self
            },
            Axis::Vertical => Self {
                dy: -self.dy,
                ..self
            },
        }
    }

    #[inline]
    pub fn is_diagonal(self) -> bool {
        self.dx != 0 && self.dy != 0
    }

    #[inline]
    pub fn to_vec(self) -> Vector2<f64> {
        Vector2::new(f64::from(self.dx), f64::from(self.dy))
    }
}

/// The moving square: top-left position, heading, and speed (px/s).
///
/// Copied by value into every search frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mover {
    pub position: Vector2<f64>,
    pub heading: Heading,
    pub speed: f64,
}

impl Mover {
    /// Position after travelling `speed * dt` along the heading.
    #[inline]
    pub fn advanced(self, dt: f64) -> Self {
        Self {
            position: self.position + self.heading.to_vec() * (self.speed * dt),
            ..self
        }
    }

    #[inline]
    pub fn square(&self, size: f64) -> Rect {
        Rect::square_at(self.position, size)
    }
}

/// A direction change at a snapped grid position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounce {
    /// Index in the bounce sequence.
    pub id: usize,
    /// Event time in seconds.
    pub time: f64,
    /// Top-left of the square at the bounce.
    pub position: Vector2<f64>,
    /// Heading after the bounce.
    pub heading: Heading,
    pub axis: Axis,
    /// Speed until the next bounce (px/s).
    pub speed: f64,
    /// Wall touches no safe area.
    pub floating: bool,
    /// Cells reachable from the wall; empty for floating bounces.
    pub reachable: Vec<Cell>,
}

impl Bounce {
    pub fn new(
        id: usize,
        time: f64,
        position: Vector2<f64>,
        heading: Heading,
        axis: Axis,
        speed: f64,
    ) -> Self {
        Self {
            id,
            time,
            position,
            heading,
            axis,
            speed,
            floating: false,
            reachable: Vec::new(),
        }
    }

    /// Wall flush against the side of the square the mover bounced off.
    ///
    /// A heading with a zero component on the bounce axis has no wall side and
    /// yields a zero-size rectangle at the bounce position.
    pub fn wall_rect(&self, cfg: &MapCfg) -> Rect {
        let p = self.position;
        let size = cfg.square_size;
        let (len, thick) = (cfg.wall_length, cfg.wall_thickness);
        let across = size / 2.0 - len / 2.0;
        match (self.axis, self.heading.dx, self.heading.dy) {
            // left wall
            (Axis::Horizontal, 1, _) => Rect::new(p.x - thick, p.y + across, thick, len),
            // right wall
            (Axis::Horizontal, -1, _) => Rect::new(p.x + size, p.y + across, thick, len),
            // top wall
            (Axis::Vertical, _, 1) => Rect::new(p.x + across, p.y - thick, len, thick),
            // bottom wall
            (Axis::Vertical, _, -1) => Rect::new(p.x + across, p.y + size, len, thick),
            _ => Rect::new(p.x, p.y, 0.0, 0.0),
        }
    }

    /// `wall_rect` pushed `wall_offset` further away from the square, so the
    /// path segments meeting at this bounce do not count as hitting it.
    pub fn collision_rect(&self, cfg: &MapCfg) -> Rect {
        let mut r = self.wall_rect(cfg);
        let off = cfg.wall_offset;
        match (self.axis, self.heading.dx, self.heading.dy) {
            (Axis::Horizontal, 1, _) => r.x -= off,
            (Axis::Horizontal, -1, _) => r.x += off,
            (Axis::Vertical, _, 1) => r.y -= off,
            (Axis::Vertical, _, -1) => r.y += off,
            _ => {}
        }
        r
    }
}

/// Geometry and motion parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapCfg {
    pub square_size: f64,
    pub wall_length: f64,
    pub wall_thickness: f64,
    pub wall_offset: f64,
    pub cell_size: f64,
    pub sub_cell_size: f64,
    /// Start speed (px/s); also the fallback for zero-length intervals.
    pub speed: f64,
    pub start_position: Vector2<f64>,
    pub start_heading: Heading,
    /// Hop bound for reachable-cell annotation of connected bounces.
    pub reach_hops: u32,
    pub collision: CollisionModel,
}

impl Default for MapCfg {
    fn default() -> Self {
        Self {
            square_size: 50.0,
            wall_length: 30.0,
            wall_thickness: 10.0,
            wall_offset: 1.0,
            cell_size: 10.0,
            sub_cell_size: 10.0,
            speed: 400.0,
            start_position: Vector2::zeros(),
            start_heading: Heading::DOWN_RIGHT,
            reach_hops: 75,
            collision: CollisionModel::Corners,
        }
    }
}

impl MapCfg {
    pub fn validate(&self) -> Result<(), MapError> {
        let positive = [
            ("square_size", self.square_size),
            ("wall_length", self.wall_length),
            ("wall_thickness", self.wall_thickness),
            ("cell_size", self.cell_size),
            ("sub_cell_size", self.sub_cell_size),
            ("speed", self.speed),
        ];
        for (name, v) in positive {
            if !(v.is_finite() && v > 0.0) {
                return Err(MapError::config(format!("{name} must be finite and > 0")));
            }
        }
        if self.sub_cell_size > self.cell_size {
            return Err(MapError::config("sub_cell_size <= cell_size required"));
        }
        if !(self.wall_offset.is_finite() && self.wall_offset >= 0.0) {
            return Err(MapError::config("wall_offset must be finite and >= 0"));
        }
        if !self.start_heading.is_diagonal() {
            return Err(MapError::config("start_heading must be diagonal"));
        }
        Ok(())
    }

    /// Mover at the configured start.
    #[inline]
    pub fn start(&self) -> Mover {
        Mover {
            position: self.start_position,
            heading: self.start_heading,
            speed: self.speed,
        }
    }
}

/// Search heuristics and bounds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchCfg {
    /// Chance that a node swaps the axis priority it inherited.
    pub change_dir_chance: f64,
    /// Chance that a rejected step deep in the tree starts a multi-level unwind.
    pub backtrack_chance: f64,
    /// Number of ancestor levels an unwind abandons.
    pub backtrack_jump: usize,
    /// Rejections at depth <= this never start an unwind.
    pub backtrack_min_depth: usize,
    /// Total step attempts before giving up.
    pub max_steps: u64,
    /// Seed for `generate_map`.
    pub seed: u64,
}

impl Default for SearchCfg {
    fn default() -> Self {
        Self {
            change_dir_chance: 0.5,
            backtrack_chance: 0.2,
            backtrack_jump: 40,
            backtrack_min_depth: 10_000_000,
            max_steps: 50_000_000,
            seed: 0,
        }
    }
}

impl SearchCfg {
    pub fn validate(&self) -> Result<(), MapError> {
        for (name, p) in [
            ("change_dir_chance", self.change_dir_chance),
            ("backtrack_chance", self.backtrack_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(MapError::config(format!("{name} must lie in [0, 1]")));
            }
        }
        Ok(())
    }
}

/// Counters collected during one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Step attempts (one per visited node).
    pub calls: u64,
    /// Steps rejected by the collision gate.
    pub rejections: u64,
    /// Unwinds started.
    pub backtracks: u64,
    /// Value of `calls` when the most recent unwind started.
    pub last_backtrack_call: Option<u64>,
    /// Largest timestamp index reached.
    pub deepest: usize,
}

/// Everything accumulated on the successful branch.
#[derive(Clone, Debug, Default)]
pub struct Solution {
    pub bounces: Vec<Bounce>,
    /// Per-step safe-area rectangles (unmerged), one per bounce.
    pub footprints: Vec<Rect>,
    /// Swept path polygons, one per timestamp.
    pub paths: Vec<Polygon>,
}

/// How a search ended.
#[derive(Clone, Debug)]
pub enum SearchEnd {
    Found(Solution),
    /// Every branch failed (or was unwound).
    Exhausted,
    /// `SearchCfg::max_steps` was reached first.
    OutOfSteps,
}
