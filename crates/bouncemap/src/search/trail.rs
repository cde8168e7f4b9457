//! Push/pop arena for the geometry of the active search branch.
//!
//! Invariant: `bounces`, `walls` and `footprints` always have equal length
//! (one entry per accepted bounce on the branch), and `paths` holds one
//! polygon per step entered on the branch. Undo truncates back to a recorded
//! length, so the state after a failed subtree equals the state before it.

use crate::geom::{CollisionModel, Polygon, Rect};

use super::types::{Bounce, Solution};

#[derive(Debug, Default)]
pub(crate) struct Trail {
    paths: Vec<Polygon>,
    bounces: Vec<Bounce>,
    /// Collision variants of the bounce walls.
    walls: Vec<Rect>,
    footprints: Vec<Rect>,
}

impl Trail {
    #[inline]
    pub(crate) fn depth(&self) -> usize {
        self.bounces.len()
    }

    /// Length marker for `rewind`.
    #[inline]
    pub(crate) fn mark(&self) -> usize {
        self.paths.len()
    }

    #[inline]
    pub(crate) fn push_path(&mut self, path: Polygon) {
        self.paths.push(path);
    }

    #[inline]
    pub(crate) fn rewind(&mut self, mark: usize) {
        self.paths.truncate(mark);
    }

    pub(crate) fn push_bounce(&mut self, bounce: Bounce, wall: Rect, footprint: Rect) {
        self.bounces.push(bounce);
        self.walls.push(wall);
        self.footprints.push(footprint);
        debug_assert_eq!(self.bounces.len(), self.walls.len());
        debug_assert_eq!(self.bounces.len(), self.footprints.len());
    }

    pub(crate) fn pop_bounce(&mut self) {
        self.bounces.pop();
        self.walls.pop();
        self.footprints.pop();
    }

    /// Step gate: the newest wall against every path, or every wall against
    /// the newest path.
    pub(crate) fn newest_collides(&self, model: CollisionModel) -> bool {
        let (Some(wall), Some(path)) = (self.walls.last(), self.paths.last()) else {
            return false;
        };
        self.paths.iter().any(|p| model.collides(wall, p))
            || self.walls.iter().any(|w| model.collides(w, path))
    }

    /// A candidate wall against every path on the branch.
    pub(crate) fn wall_hits_any_path(&self, wall: &Rect, model: CollisionModel) -> bool {
        self.paths.iter().any(|p| model.collides(wall, p))
    }

    pub(crate) fn into_solution(self) -> Solution {
        Solution {
            bounces: self.bounces,
            footprints: self.footprints,
            paths: self.paths,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::types::{Axis, Heading};
    use nalgebra::vector;

    fn bounce(id: usize) -> Bounce {
        Bounce::new(
            id,
            id as f64,
            vector![0.0, 0.0],
            Heading::DOWN_RIGHT,
            Axis::Vertical,
            400.0,
        )
    }

    fn square_path(x: f64, y: f64) -> Polygon {
        Rect::new(x, y, 50.0, 50.0).corners().to_vec()
    }

    #[test]
    fn rewind_and_pop_restore_exact_state() {
        let mut trail = Trail::default();
        trail.push_path(square_path(0.0, 0.0));
        trail.push_bounce(bounce(0), Rect::new(0.0, 0.0, 1.0, 1.0), Rect::new(0.0, 0.0, 50.0, 50.0));
        let mark = trail.mark();
        trail.push_path(square_path(100.0, 0.0));
        trail.push_bounce(bounce(1), Rect::new(5.0, 5.0, 1.0, 1.0), Rect::new(9.0, 9.0, 9.0, 9.0));
        assert_eq!(trail.depth(), 2);

        trail.pop_bounce();
        trail.rewind(mark);
        assert_eq!(trail.depth(), 1);
        assert_eq!(trail.mark(), 1);
        let sol = trail.into_solution();
        assert_eq!(sol.bounces, vec![bounce(0)]);
        assert_eq!(sol.footprints, vec![Rect::new(0.0, 0.0, 50.0, 50.0)]);
        assert_eq!(sol.paths.len(), 1);
    }

    #[test]
    fn gate_checks_newest_wall_and_newest_path() {
        let model = CollisionModel::Corners;
        let mut trail = Trail::default();
        trail.push_path(square_path(0.0, 0.0));
        // no walls yet
        assert!(!trail.newest_collides(model));

        trail.push_bounce(bounce(0), Rect::new(200.0, 200.0, 10.0, 10.0), Rect::new(0.0, 0.0, 50.0, 50.0));
        trail.push_path(square_path(100.0, 100.0));
        assert!(!trail.newest_collides(model));

        // newest path runs over the old wall
        trail.push_path(square_path(190.0, 190.0));
        assert!(trail.newest_collides(model));
        trail.rewind(2);
        assert!(!trail.newest_collides(model));

        // newest wall sits inside an old path
        trail.push_bounce(bounce(1), Rect::new(10.0, 10.0, 10.0, 10.0), Rect::new(0.0, 0.0, 1.0, 1.0));
        assert!(trail.newest_collides(model));
        assert!(trail.wall_hits_any_path(&Rect::new(110.0, 110.0, 5.0, 5.0), model));
        assert!(!trail.wall_hits_any_path(&Rect::new(500.0, 500.0, 5.0, 5.0), model));
    }
}
