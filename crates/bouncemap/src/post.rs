//! Post-processing of a finished bounce sequence.
//!
//! - `assign_speeds`: outgoing speed of every bounce but the last, from the
//!   displacement to the next bounce along the axis the bounce did not flip.
//! - `classify`: floating vs connected walls against the merged safe areas;
//!   connected bounces get their reachable cells attached.

use crate::geom::{rects_overlap, Rect};
use crate::reach::reachable_cells;
use crate::search::{Axis, Bounce, MapCfg};

/// Set `speed` on every bounce but the last.
///
/// A vertical bounce keeps moving along x at the same rate as along y, so its
/// speed is `|Δx| / Δt` (and `|Δy| / Δt` for horizontal ones). Intervals with
/// `Δt <= 0` fall back to `default_speed`.
pub fn assign_speeds(bounces: &mut [Bounce], default_speed: f64) {
    for i in 1..bounces.len() {
        let (head, tail) = bounces.split_at_mut(i);
        let (cur, next) = (&mut head[i - 1], &tail[0]);
        let dt = next.time - cur.time;
        let dist = match cur.axis {
            Axis::Vertical => (next.position.x - cur.position.x).abs(),
            Axis::Horizontal => (next.position.y - cur.position.y).abs(),
        };
        cur.speed = if dt > 0.0 { dist / dt } else { default_speed };
    }
}

/// Mark each bounce floating or connected; returns `(floating, connected)`
/// wall rectangles in bounce order.
pub fn classify(bounces: &mut [Bounce], safe_areas: &[Rect], cfg: &MapCfg) -> (Vec<Rect>, Vec<Rect>) {
    let mut floating = Vec::new();
    let mut connected = Vec::new();
    for b in bounces.iter_mut() {
        let wall = b.wall_rect(cfg);
        if safe_areas.iter().any(|s| rects_overlap(&wall, s)) {
            b.floating = false;
            b.reachable = reachable_cells(&wall, safe_areas, cfg.reach_hops, cfg.cell_size);
            connected.push(wall);
        } else {
            b.floating = true;
            b.reachable.clear();
            floating.push(wall);
        }
    }
    (floating, connected)
}
