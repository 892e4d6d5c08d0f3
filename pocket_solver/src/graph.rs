use std::{collections::VecDeque, time::Instant};

use fxhash::FxHashMap;
use log::{debug, info};
use pocket_core::{cube::Cube, move_set::MoveSet};

use crate::{
    arena::SearchArena,
    report::{Outcome, SearchReport, SearchStats},
    start, success, working,
};

/// Which end of the frontier [`GraphSolver`] removes from.
///
/// `Fifo` expands the oldest entry first and walks the graph in breadth
/// order; `Lifo` expands the newest first and dives depth first. The rest
/// of the walk is identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontierDiscipline {
    Fifo,
    Lifo,
}

/// Uninformed search over the cube graph, with an explicit frontier and a
/// membership index covering every configuration materialized so far.
pub struct GraphSolver<'a> {
    move_set: &'a MoveSet,
    discipline: FrontierDiscipline,
}

impl<'a> GraphSolver<'a> {
    pub fn new(move_set: &'a MoveSet, discipline: FrontierDiscipline) -> Self {
        GraphSolver {
            move_set,
            discipline,
        }
    }

    /// Expands nodes from `root` until the goal comes off the frontier or
    /// the frontier drains.
    ///
    /// The goal test runs at expansion, not at generation. A configuration
    /// reached again on a strictly shorter path adopts the new parent and
    /// depth whether it is still queued or already expanded, so the
    /// reported trace never includes a detour the search later shortened.
    pub fn solve(&self, root: Cube) -> SearchReport {
        let label = match self.discipline {
            FrontierDiscipline::Fifo => "breadth-first",
            FrontierDiscipline::Lifo => "depth-first",
        };
        info!(start!("Searching in {} order"), label);
        let start = Instant::now();

        let mut arena = SearchArena::with_root(root);
        let mut index_of: FxHashMap<Cube, usize> = FxHashMap::default();
        index_of.insert(root, 0);
        let mut frontier: VecDeque<usize> = VecDeque::new();
        frontier.push_back(0);
        let mut stats = SearchStats {
            generated: 1,
            expanded: 0,
        };
        let mut deepest = 0;
        debug!(working!("Expanding depth {}..."), deepest);

        while let Some(index) = frontier.pop_front() {
            let node = *arena.node(index);
            stats.expanded += 1;
            if node.depth > deepest {
                deepest = node.depth;
                debug!(working!("Expanding depth {}..."), deepest);
            }
            if node.cube.is_solved() {
                info!(
                    success!("Goal expanded in {:.3}s after {} nodes"),
                    start.elapsed().as_secs_f64(),
                    stats.expanded
                );
                let solution = arena.path_to(index, self.move_set);
                return SearchReport {
                    outcome: Outcome::Solved(solution),
                    stats,
                };
            }
            let child_depth = node.depth + 1;
            for (via, mv) in self.move_set.moves().iter().enumerate() {
                let child = node.cube.apply(mv);
                match index_of.get(&child) {
                    None => {
                        let child_index = arena.push_child(index, via, child);
                        index_of.insert(child, child_index);
                        match self.discipline {
                            FrontierDiscipline::Fifo => frontier.push_back(child_index),
                            FrontierDiscipline::Lifo => frontier.push_front(child_index),
                        }
                        stats.generated += 1;
                    }
                    Some(&seen) => {
                        if arena.node(seen).depth > child_depth {
                            arena.relax(seen, index, via);
                        }
                    }
                }
            }
        }

        info!(
            "Frontier drained without reaching the goal in {:.3}s",
            start.elapsed().as_secs_f64()
        );
        SearchReport {
            outcome: Outcome::Exhausted,
            stats,
        }
    }
}
