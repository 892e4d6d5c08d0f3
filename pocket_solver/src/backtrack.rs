use std::time::Instant;

use log::{debug, info};
use pocket_core::{cube::Cube, move_set::MoveSet};
use thiserror::Error;

use crate::{
    report::{BacktrackReport, BacktrackStats, Solution},
    start, success, working,
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BacktrackError {
    #[error("No solution within the bound cap of {0} moves")]
    MaxBoundExceeded(usize),
}

/// One entry on the probe's path stack.
struct Frame {
    cube: Cube,
    /// Move-table index that produced this entry, `None` at the root.
    via: Option<usize>,
    /// Next move-table index to try from here.
    next_move: usize,
}

/// Depth-bounded backtracking with an iterative-deepening driver.
///
/// Each probe walks the move tree behind an explicit frame stack, so the
/// recursion depth of the search never touches the call stack. A node is
/// rejected on entry if it repeats a configuration already on the path or
/// if the path has outgrown the bound; the goal test runs first, so a
/// probe at bound `b` accepts traces of exactly `b` moves.
pub struct BacktrackSolver<'a> {
    move_set: &'a MoveSet,
    max_bound: Option<usize>,
}

impl<'a> BacktrackSolver<'a> {
    pub fn new(move_set: &'a MoveSet) -> Self {
        BacktrackSolver {
            move_set,
            max_bound: None,
        }
    }

    /// Gives up instead of escalating the depth bound past `bound`.
    #[must_use]
    pub fn with_max_bound(mut self, bound: usize) -> Self {
        self.max_bound = Some(bound);
        self
    }

    /// Deepens the bound from 1 until a probe succeeds.
    ///
    /// Because every shorter bound has already been exhausted, the winning
    /// bound equals the move count of the returned trace. Statistics
    /// accumulate across all probes of the invocation.
    pub fn solve(&self, root: Cube) -> Result<BacktrackReport, BacktrackError> {
        info!(start!("Searching with iterative deepening"));
        let start = Instant::now();

        let mut stats = BacktrackStats::default();
        let mut bound = 1;
        loop {
            if let Some(cap) = self.max_bound
                && bound > cap
            {
                return Err(BacktrackError::MaxBoundExceeded(cap));
            }
            debug!(working!("Searching bound {}..."), bound);
            let bound_start = Instant::now();
            let calls_before = stats.calls;
            let result = self.probe(root, bound, &mut stats);
            debug!(
                working!("Traversed {} nodes in {:.3}s"),
                stats.calls - calls_before,
                bound_start.elapsed().as_secs_f64()
            );
            if let Some(solution) = result {
                info!(
                    success!("Backtracking solved in {:.3}s at bound {}"),
                    start.elapsed().as_secs_f64(),
                    bound
                );
                return Ok(BacktrackReport {
                    solution,
                    bound,
                    stats,
                });
            }
            bound += 1;
        }
    }

    /// One depth-bounded walk from `root`. `None` means the bound
    /// exhausted without reaching the goal.
    fn probe(&self, root: Cube, bound: usize, stats: &mut BacktrackStats) -> Option<Solution> {
        stats.calls += 1;
        if root.is_solved() {
            return Some(Solution::new(vec![], vec![root]));
        }
        if 1 > bound {
            stats.bound_prunes += 1;
            return None;
        }

        let mut stack = vec![Frame {
            cube: root,
            via: None,
            next_move: 0,
        }];
        while let Some(deepest) = stack.len().checked_sub(1) {
            let next = stack[deepest].next_move;
            if next == self.move_set.len() {
                stats.dead_ends += 1;
                stack.pop();
                continue;
            }
            stack[deepest].next_move += 1;

            let child = stack[deepest].cube.apply(&self.move_set.moves()[next]);
            stats.calls += 1;
            if child.is_solved() {
                return Some(self.trace(&stack, next, child));
            }
            if stack.iter().any(|frame| frame.cube == child) {
                stats.cycle_prunes += 1;
                continue;
            }
            if stack.len() + 1 > bound {
                stats.bound_prunes += 1;
                continue;
            }
            stack.push(Frame {
                cube: child,
                via: Some(next),
                next_move: 0,
            });
        }
        None
    }

    fn trace(&self, stack: &[Frame], via: usize, goal: Cube) -> Solution {
        let mut names = Vec::with_capacity(stack.len());
        let mut states = Vec::with_capacity(stack.len() + 1);
        for frame in stack {
            if let Some(index) = frame.via {
                names.push(self.move_set.moves()[index].name().to_owned());
            }
            states.push(frame.cube);
        }
        names.push(self.move_set.moves()[via].name().to_owned());
        states.push(goal);
        Solution::new(names, states)
    }
}
