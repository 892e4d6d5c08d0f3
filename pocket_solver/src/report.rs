use std::fmt;

use itertools::Itertools;
use pocket_core::cube::Cube;

/// A root-to-goal trace.
///
/// `states` always holds one more entry than `moves`: the root, then the
/// configuration after each move. An already-solved root yields an empty
/// move list and a single state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    moves: Vec<String>,
    states: Vec<Cube>,
}

impl Solution {
    pub(crate) fn new(moves: Vec<String>, states: Vec<Cube>) -> Solution {
        debug_assert_eq!(states.len(), moves.len() + 1);
        Solution { moves, states }
    }

    /// The move names in execution order.
    pub fn moves(&self) -> &[String] {
        &self.moves
    }

    /// Every configuration along the trace, the root first.
    pub fn states(&self) -> &[Cube] {
        &self.states
    }

    /// How many moves the trace performs.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// The configuration the trace ends on.
    pub fn terminal(&self) -> &Cube {
        &self.states[self.moves.len()]
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.moves.iter().join(" "))
    }
}

/// Node accounting for one frontier-search invocation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// States materialized, the root included.
    pub generated: u64,
    /// States removed from the frontier and expanded.
    pub expanded: u64,
}

/// What a frontier search concluded.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The goal was reached, with the trace that got there.
    Solved(Solution),
    /// The frontier drained without reaching the goal.
    Exhausted,
}

impl Outcome {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Outcome::Solved(solution) => Some(solution),
            Outcome::Exhausted => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, Outcome::Solved(_))
    }
}

/// Everything one frontier-search invocation produced.
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub outcome: Outcome,
    pub stats: SearchStats,
}

/// Prune accounting for one backtracking invocation, accumulated across
/// every bound the driver tries.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BacktrackStats {
    /// Nodes entered, the root of each bounded probe included.
    pub calls: u64,
    /// Nodes rejected for repeating a configuration already on the path.
    pub cycle_prunes: u64,
    /// Nodes rejected for exceeding the depth bound.
    pub bound_prunes: u64,
    /// Nodes whose every child failed.
    pub dead_ends: u64,
}

/// Everything one iterative-deepening backtracking invocation produced.
#[derive(Debug, Clone)]
pub struct BacktrackReport {
    pub solution: Solution,
    /// The depth bound the winning probe ran under.
    pub bound: usize,
    pub stats: BacktrackStats,
}
