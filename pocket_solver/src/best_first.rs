use std::{cmp::Ordering, collections::BinaryHeap, time::Instant};

use fxhash::FxHashMap;
use log::{debug, info};
use pocket_core::{cube::Cube, move_set::MoveSet};

use crate::{
    arena::SearchArena,
    report::{Outcome, SearchReport, SearchStats},
    start, success, working,
};

/// Heap entry for one queued node.
///
/// Ordering is inverted so `BinaryHeap`'s max-pop yields the lowest
/// weight, and among equal weights the earlier-queued entry wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueuedNode {
    weight: u32,
    seq: u64,
    index: usize,
}

impl Ord for QueuedNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueuedNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The weight a node is ranked by: scaled depth plus face disorder.
fn rank(depth: usize, cube: &Cube) -> u32 {
    6 * depth as u32 + cube.disorder_weight()
}

/// Greedy best-first search over the cube graph.
///
/// Works like [`crate::graph::GraphSolver`] except the frontier is a
/// priority queue ranked by scaled depth plus face disorder. Relaxed
/// nodes re-enter the queue under their improved weight; the entries they
/// leave behind are recognized by their out-of-date weight and skipped
/// when popped.
pub struct BestFirstSolver<'a> {
    move_set: &'a MoveSet,
}

impl<'a> BestFirstSolver<'a> {
    pub fn new(move_set: &'a MoveSet) -> Self {
        BestFirstSolver { move_set }
    }

    pub fn solve(&self, root: Cube) -> SearchReport {
        info!(start!("Searching in best-first order"));
        let start = Instant::now();

        let mut arena = SearchArena::with_root(root);
        let mut index_of: FxHashMap<Cube, usize> = FxHashMap::default();
        index_of.insert(root, 0);
        let mut closed = vec![false];
        let mut heap = BinaryHeap::new();
        let mut seq = 0u64;
        heap.push(QueuedNode {
            weight: rank(0, &root),
            seq,
            index: 0,
        });
        let mut stats = SearchStats {
            generated: 1,
            expanded: 0,
        };

        while let Some(entry) = heap.pop() {
            let node = *arena.node(entry.index);
            // Entries left behind by relaxation or an earlier expansion.
            if closed[entry.index] || entry.weight != rank(node.depth, &node.cube) {
                continue;
            }
            closed[entry.index] = true;
            stats.expanded += 1;
            if stats.expanded % 10_000 == 0 {
                debug!(
                    working!("Traversed {} nodes in {:.3}s"),
                    stats.expanded,
                    start.elapsed().as_secs_f64()
                );
            }
            if node.cube.is_solved() {
                info!(
                    success!("Goal expanded in {:.3}s after {} nodes"),
                    start.elapsed().as_secs_f64(),
                    stats.expanded
                );
                let solution = arena.path_to(entry.index, self.move_set);
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
                        let child_index = arena.push_child(entry.index, via, child);
                        index_of.insert(child, child_index);
                        closed.push(false);
                        seq += 1;
                        heap.push(QueuedNode {
                            weight: rank(child_depth, &child),
                            seq,
                            index: child_index,
                        });
                        stats.generated += 1;
                    }
                    Some(&seen) => {
                        if arena.node(seen).depth > child_depth {
                            arena.relax(seen, entry.index, via);
                            // Already-expanded nodes keep the improved link
                            // without returning to the frontier.
                            if !closed[seen] {
                                seq += 1;
                                heap.push(QueuedNode {
                                    weight: rank(child_depth, &child),
                                    seq,
                                    index: seen,
                                });
                            }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queued_nodes_pop_lowest_weight_first() {
        let mut heap = BinaryHeap::new();
        heap.push(QueuedNode {
            weight: 250,
            seq: 0,
            index: 0,
        });
        heap.push(QueuedNode {
            weight: 6,
            seq: 1,
            index: 1,
        });
        heap.push(QueuedNode {
            weight: 130,
            seq: 2,
            index: 2,
        });
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop()).map(|e| e.index).collect();
        assert_eq!(order, [1, 2, 0]);
    }

    #[test]
    fn equal_weights_pop_in_queue_order() {
        let mut heap = BinaryHeap::new();
        for index in 0..4 {
            heap.push(QueuedNode {
                weight: 190,
                seq: index as u64,
                index,
            });
        }
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop()).map(|e| e.index).collect();
        assert_eq!(order, [0, 1, 2, 3]);
    }

    #[test]
    fn solved_root_ranks_at_the_floor() {
        assert_eq!(rank(0, &Cube::solved()), 6);
        assert_eq!(rank(3, &Cube::solved()), 24);
    }
}
