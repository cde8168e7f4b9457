//! Randomized backtracking search over bounce axes.
//!
//! Each node consumes one timestamp: it advances the mover, snaps it to the
//! grid, sweeps the path polygon, and runs the collision gate. An accepted
//! node then tries its two bounce axes in priority order, each trying the
//! rest of the timestamps as a child.
//!
//! The tree is walked with an explicit frame stack, so input length is not
//! bounded by the native call stack. Frames own their mover by value; the
//! shared geometry lives in a `Trail` with exact push/pop undo.
//!
//! Unwinding: once a rejected node lies deeper than `backtrack_min_depth`, it
//! may set an unwind budget. While the budget is positive, every ancestor that
//! gets a failed child decrements it and fails instead of trying its next axis.

use rand::Rng;

use crate::geom::{bounding_union, snap_position, swept_polygon, Rect};

use super::trail::Trail;
use super::types::{Axis, Bounce, MapCfg, Mover, SearchCfg, SearchEnd, SearchStats};

/// Search for a bounce sequence covering every timestamp.
///
/// `rng` drives the axis-priority swaps and unwind triggers; a seeded RNG
/// makes the result reproducible.
pub fn search<R: Rng + ?Sized>(
    timestamps: &[f64],
    cfg: &MapCfg,
    scfg: &SearchCfg,
    rng: &mut R,
) -> (SearchEnd, SearchStats) {
    DfsRunner::new(timestamps, cfg, scfg, rng).run()
}

/// Result of entering one node.
enum Step {
    /// No timestamps left: the branch is complete.
    Complete,
    /// Collision gate failed.
    Rejected,
    Accepted(Frame),
    OutOfSteps,
}

/// One accepted node on the stack.
#[derive(Clone, Copy, Debug)]
struct Frame {
    /// Snapped position, incoming heading.
    mover: Mover,
    /// Timestamp consumed by this node.
    index: usize,
    priority: [Axis; 2],
    /// Axes tried so far.
    tried: usize,
    /// A bounce of this frame is on the trail and its child subtree is live.
    pending: bool,
    footprint: Rect,
    /// Trail mark from before this node's path polygon.
    mark: usize,
}

struct DfsRunner<'a, R: ?Sized> {
    times: &'a [f64],
    cfg: &'a MapCfg,
    scfg: &'a SearchCfg,
    rng: &'a mut R,
    trail: Trail,
    frames: Vec<Frame>,
    unwind: usize,
    stats: SearchStats,
}

impl<'a, R: Rng + ?Sized> DfsRunner<'a, R> {
    fn new(times: &'a [f64], cfg: &'a MapCfg, scfg: &'a SearchCfg, rng: &'a mut R) -> Self {
        Self {
            times,
            cfg,
            scfg,
            rng,
            trail: Trail::default(),
            frames: Vec::new(),
            unwind: 0,
            stats: SearchStats::default(),
        }
    }

    fn run(mut self) -> (SearchEnd, SearchStats) {
        match self.enter(self.cfg.start(), 0, [Axis::Vertical, Axis::Horizontal]) {
            Step::Complete => return self.found(),
            Step::Rejected => return (SearchEnd::Exhausted, self.stats),
            Step::OutOfSteps => return (SearchEnd::OutOfSteps, self.stats),
            Step::Accepted(frame) => self.frames.push(frame),
        }

        while let Some(top) = self.frames.len().checked_sub(1) {
            if self.frames[top].pending {
                // the child subtree failed
                self.frames[top].pending = false;
                self.trail.pop_bounce();
                if self.unwind > 0 {
                    self.unwind -= 1;
                    self.abandon();
                    continue;
                }
            }

            let frame = self.frames[top];
            let Some(&axis) = frame.priority.get(frame.tried) else {
                self.abandon();
                continue;
            };
            self.frames[top].tried += 1;

            let heading = frame.mover.heading.inverted(axis);
            let bounce = Bounce::new(
                self.trail.depth(),
                self.times[frame.index],
                frame.mover.position,
                heading,
                axis,
                frame.mover.speed,
            );
            let wall = bounce.collision_rect(self.cfg);
            let is_last = frame.index + 1 == self.times.len();
            if is_last && self.trail.wall_hits_any_path(&wall, self.cfg.collision) {
                continue;
            }

            self.trail.push_bounce(bounce, wall, frame.footprint);
            self.frames[top].pending = true;
            let next = Mover {
                heading,
                ..frame.mover
            };
            match self.enter(next, frame.index + 1, frame.priority) {
                Step::Complete => return self.found(),
                Step::Rejected => {}
                Step::Accepted(child) => self.frames.push(child),
                Step::OutOfSteps => return (SearchEnd::OutOfSteps, self.stats),
            }
        }
        (SearchEnd::Exhausted, self.stats)
    }

    /// Advance, snap, sweep, and gate the step for timestamp `index`.
    fn enter(&mut self, mover: Mover, index: usize, priority: [Axis; 2]) -> Step {
        let Some(&time) = self.times.get(index) else {
            return Step::Complete;
        };
        if self.stats.calls >= self.scfg.max_steps {
            return Step::OutOfSteps;
        }
        self.stats.calls += 1;
        self.stats.deepest = self.stats.deepest.max(index);

        let cfg = self.cfg;
        let prev_time = if index == 0 { 0.0 } else { self.times[index - 1] };
        let moved = mover.advanced(time - prev_time);
        let arrived = Mover {
            position: snap_position(moved.position, cfg.cell_size, cfg.sub_cell_size),
            ..moved
        };

        let mark = self.trail.mark();
        self.trail.push_path(swept_polygon(
            arrived.heading.to_vec(),
            mover.position,
            arrived.position,
            cfg.square_size,
        ));
        if self.trail.newest_collides(cfg.collision) {
            self.trail.rewind(mark);
            self.stats.rejections += 1;
            if index > self.scfg.backtrack_min_depth
                && self.rng.gen::<f64>() < self.scfg.backtrack_chance
            {
                self.unwind = self.scfg.backtrack_jump;
                self.stats.backtracks += 1;
                self.stats.last_backtrack_call = Some(self.stats.calls);
            }
            return Step::Rejected;
        }

        let mut priority = priority;
        if self.rng.gen::<f64>() < self.scfg.change_dir_chance {
            priority.swap(0, 1);
        }
        let footprint = bounding_union(
            &mover.square(cfg.square_size),
            &arrived.square(cfg.square_size),
        );
        Step::Accepted(Frame {
            mover: arrived,
            index,
            priority,
            tried: 0,
            pending: false,
            footprint,
            mark,
        })
    }

    /// Pop the top frame and its path polygon.
    fn abandon(&mut self) {
        if let Some(frame) = self.frames.pop() {
            self.trail.rewind(frame.mark);
        }
    }

    fn found(self) -> (SearchEnd, SearchStats) {
        (SearchEnd::Found(self.trail.into_solution()), self.stats)
    }
}
