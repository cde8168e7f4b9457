//! Bounded flood fill over the cell grid.
//!
//! A footprint rectangle (spanning one or more cells) is moved one cell at a
//! time in the four axis directions. A placement is accepted if it was not
//! visited yet, lies within `max_hops` moves of the start, and its pixel
//! rectangle overlaps none of the obstacles. The start placement itself is
//! always part of the result, even when it overlaps an obstacle.
//!
//! Obstacles are prefiltered against the largest box the fill can reach, so
//! each placement only scans nearby rectangles.

use std::collections::{HashSet, VecDeque};

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::geom::{rects_overlap, Rect};

/// Grid cell index; pixel origin is `(cx, cy) * cell_size`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub cx: i64,
    pub cy: i64,
}

impl Cell {
    #[inline]
    pub const fn new(cx: i64, cy: i64) -> Self {
        Self { cx, cy }
    }

    /// Cell containing the pixel point `p`.
    #[inline]
    pub fn containing(p: Vector2<f64>, cell_size: f64) -> Self {
        Self::new(
            (p.x / cell_size).floor() as i64,
            (p.y / cell_size).floor() as i64,
        )
    }

    /// Top-left corner in pixels.
    #[inline]
    pub fn origin(&self, cell_size: f64) -> Vector2<f64> {
        Vector2::new(self.cx as f64 * cell_size, self.cy as f64 * cell_size)
    }

    /// Pixel rectangle of a `w × h`-cell footprint anchored at this cell.
    #[inline]
    pub fn footprint(&self, w: i64, h: i64, cell_size: f64) -> Rect {
        let o = self.origin(cell_size);
        Rect::new(o.x, o.y, w as f64 * cell_size, h as f64 * cell_size)
    }

    /// Manhattan distance in cells.
    #[inline]
    pub fn hops_to(&self, other: &Cell) -> u64 {
        self.cx.abs_diff(other.cx) + self.cy.abs_diff(other.cy)
    }
}

/// Cells reachable by the footprint of `rect`, in BFS discovery order.
pub fn reachable_cells(rect: &Rect, obstacles: &[Rect], max_hops: u32, cell_size: f64) -> Vec<Cell> {
    // one extra cell covers a start rectangle that is not grid-aligned
    let reach_px = (f64::from(max_hops) + 1.0) * cell_size;
    let bounds = rect.inflate(reach_px);
    let nearby: Vec<Rect> = obstacles
        .iter()
        .filter(|o| rects_overlap(&bounds, o))
        .copied()
        .collect();

    let start = Cell::containing(Vector2::new(rect.x, rect.y), cell_size);
    let w = ((rect.w / cell_size).floor() as i64).max(1);
    let h = ((rect.h / cell_size).floor() as i64).max(1);

    let mut visited: HashSet<Cell> = HashSet::from([start]);
    let mut queue: VecDeque<(Cell, u32)> = VecDeque::from([(start, 0)]);
    let mut out = Vec::new();

    while let Some((cell, hops)) = queue.pop_front() {
        out.push(cell);
        if hops >= max_hops {
            continue;
        }
        // up, down, left, right
        for (dx, dy) in [(0, -1), (0, 1), (-1, 0), (1, 0)] {
            let next = Cell::new(cell.cx + dx, cell.cy + dy);
            if visited.contains(&next) {
                continue;
            }
            let placed = next.footprint(w, h, cell_size);
            if nearby.iter().any(|o| rects_overlap(&placed, o)) {
                continue;
            }
            visited.insert(next);
            queue.push_back((next, hops + 1));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    /// Shortest hop counts from `cells[0]`, moving only through `cells`.
    fn hops_within(cells: &[Cell]) -> HashMap<Cell, u32> {
        let members: HashSet<Cell> = cells.iter().copied().collect();
        let mut dist = HashMap::new();
        let mut queue = VecDeque::new();
        if let Some(&start) = cells.first() {
            dist.insert(start, 0);
            queue.push_back(start);
        }
        while let Some(c) = queue.pop_front() {
            let d = dist[&c];
            for (dx, dy) in [(0, -1), (0, 1), (-1, 0), (1, 0)] {
                let n = Cell::new(c.cx + dx, c.cy + dy);
                if members.contains(&n) && !dist.contains_key(&n) {
                    dist.insert(n, d + 1);
                    queue.push_back(n);
                }
            }
        }
        dist
    }

    #[test]
    fn open_field_is_a_diamond() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let cells = reachable_cells(&rect, &[], 2, 10.0);
        // 1 + 4 + 8 cells within Manhattan distance 2
        assert_eq!(cells.len(), 13);
        assert_eq!(cells[0], Cell::new(0, 0));
        assert!(cells.contains(&Cell::new(-2, 0)));
        assert!(!cells.contains(&Cell::new(2, 1)));
    }

    #[test]
    fn zero_hops_is_just_the_start() {
        let rect = Rect::new(35.0, -12.0, 30.0, 10.0);
        let cells = reachable_cells(&rect, &[], 0, 10.0);
        assert_eq!(cells, vec![Cell::new(3, -2)]);
    }

    #[test]
    fn walls_block_the_fill() {
        // footprint 1x1 at the origin, boxed in on the right by a tall wall
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let wall = Rect::new(10.0, -100.0, 10.0, 200.0);
        let cells = reachable_cells(&rect, &[wall], 3, 10.0);
        assert!(cells.iter().all(|c| c.cx <= 0));
        assert!(cells.contains(&Cell::new(-3, 0)));
    }

    #[test]
    fn wide_footprint_moves_as_a_whole() {
        // a 3x1 footprint cannot slide under a 1-cell notch
        let rect = Rect::new(0.0, 0.0, 30.0, 10.0);
        let notch = Rect::new(20.0, 10.0, 10.0, 10.0);
        let cells = reachable_cells(&rect, &[notch], 1, 10.0);
        assert!(!cells.contains(&Cell::new(0, 1)));
        assert!(cells.contains(&Cell::new(0, -1)));
        assert!(cells.contains(&Cell::new(-1, 0)));
        // moving right keeps the footprint clear of the notch's row
        assert!(cells.contains(&Cell::new(1, 0)));
    }

    #[test]
    fn bfs_order_is_non_decreasing_in_hops() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let cells = reachable_cells(&rect, &[], 4, 10.0);
        let start = cells[0];
        let hops: Vec<u64> = cells.iter().map(|c| c.hops_to(&start)).collect();
        assert!(hops.windows(2).all(|w| w[0] <= w[1]));
    }

    fn arb_obstacle() -> impl Strategy<Value = Rect> {
        (-8i32..8, -8i32..8, 1i32..4, 1i32..4).prop_map(|(x, y, w, h)| {
            Rect::new(x as f64 * 10.0, y as f64 * 10.0, w as f64 * 10.0, h as f64 * 10.0)
        })
    }

    proptest! {
        #[test]
        fn reachable_cells_respect_bounds_and_obstacles(
            obstacles in prop::collection::vec(arb_obstacle(), 0..10),
            max_hops in 0u32..6,
            fw in 1i32..4,
            fh in 1i32..3,
        ) {
            let rect = Rect::new(0.0, 0.0, fw as f64 * 10.0, fh as f64 * 10.0);
            let cells = reachable_cells(&rect, &obstacles, max_hops, 10.0);
            let start = Cell::new(0, 0);
            prop_assert_eq!(cells.first().copied(), Some(start));
            let unique: HashSet<Cell> = cells.iter().copied().collect();
            prop_assert_eq!(unique.len(), cells.len());
            let hops = hops_within(&cells);
            prop_assert_eq!(hops.len(), cells.len());
            for c in cells.iter().skip(1) {
                prop_assert!(hops[c] <= max_hops);
                let placed = c.footprint(fw as i64, fh as i64, 10.0);
                prop_assert!(obstacles.iter().all(|o| !rects_overlap(&placed, o)));
            }
        }
    }
}
