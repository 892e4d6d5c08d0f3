use pocket_core::{cube::Cube, move_set::MoveSet};

use crate::report::Solution;

/// One materialized search node.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StateNode {
    pub cube: Cube,
    pub depth: usize,
    /// Arena index of the node this one was reached from, `None` at the
    /// root.
    pub parent: Option<usize>,
    /// Move-table index of the move that produced this node from its
    /// parent, `None` at the root.
    pub via: Option<usize>,
}

/// Flat arena of every node a search has materialized.
///
/// Parent links are indices into the same arena, so rebinding a node onto
/// a shorter path is a plain field update and reconstructing a trace is a
/// walk toward the root.
#[derive(Debug)]
pub(crate) struct SearchArena {
    nodes: Vec<StateNode>,
}

impl SearchArena {
    pub fn with_root(cube: Cube) -> SearchArena {
        SearchArena {
            nodes: vec![StateNode {
                cube,
                depth: 0,
                parent: None,
                via: None,
            }],
        }
    }

    pub fn node(&self, index: usize) -> &StateNode {
        &self.nodes[index]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Appends a child of `parent` reached by the move at `via`, returning
    /// the child's index.
    pub fn push_child(&mut self, parent: usize, via: usize, cube: Cube) -> usize {
        let depth = self.nodes[parent].depth + 1;
        self.nodes.push(StateNode {
            cube,
            depth,
            parent: Some(parent),
            via: Some(via),
        });
        self.nodes.len() - 1
    }

    /// Rebinds `index` under `parent`, adopting the improved depth and the
    /// move that now produces it.
    pub fn relax(&mut self, index: usize, parent: usize, via: usize) {
        let depth = self.nodes[parent].depth + 1;
        debug_assert!(depth < self.nodes[index].depth);
        let node = &mut self.nodes[index];
        node.parent = Some(parent);
        node.via = Some(via);
        node.depth = depth;
    }

    /// Rebuilds the root-to-`index` trace by walking parent links.
    pub fn path_to(&self, index: usize, moves: &MoveSet) -> Solution {
        let mut names = Vec::new();
        let mut states = Vec::new();
        let mut cursor = Some(index);
        while let Some(current) = cursor {
            let node = &self.nodes[current];
            states.push(node.cube);
            if let Some(via) = node.via {
                names.push(moves.moves()[via].name().to_owned());
            }
            cursor = node.parent;
        }
        names.reverse();
        states.reverse();
        Solution::new(names, states)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_walks_back_to_the_root() {
        let moves = MoveSet::pocket_cube();
        let root = Cube::solved();
        let mut arena = SearchArena::with_root(root);

        let r = moves.find("R").unwrap();
        let u = moves.find("U").unwrap();
        let after_r = root.apply(&moves.moves()[r]);
        let after_ru = after_r.apply(&moves.moves()[u]);

        let first = arena.push_child(0, r, after_r);
        let second = arena.push_child(first, u, after_ru);
        assert_eq!(arena.len(), 3);
        assert_eq!(arena.node(second).depth, 2);

        let solution = arena.path_to(second, &moves);
        assert_eq!(solution.moves(), ["R", "U"]);
        assert_eq!(solution.states(), [root, after_r, after_ru]);
    }

    #[test]
    fn relax_rebinds_parent_depth_and_move() {
        // A table where "RR" reaches in one move what two "R"s reach.
        let pocket = MoveSet::pocket_cube();
        let r_perm = *pocket.moves()[pocket.find("R").unwrap()].permutation();
        let moves = MoveSet::from_entries(&[
            ("R", *r_perm.mapping()),
            ("RR", *r_perm.then(&r_perm).mapping()),
        ])
        .unwrap();

        let root = Cube::solved();
        let after_r = root.apply(&moves.moves()[0]);
        let after_rr = after_r.apply(&moves.moves()[0]);

        let mut arena = SearchArena::with_root(root);
        let first = arena.push_child(0, 0, after_r);
        let second = arena.push_child(first, 0, after_rr);
        assert_eq!(arena.node(second).depth, 2);

        arena.relax(second, 0, 1);
        assert_eq!(arena.node(second).depth, 1);
        assert_eq!(arena.node(second).parent, Some(0));
        assert_eq!(arena.node(second).via, Some(1));

        let solution = arena.path_to(second, &moves);
        assert_eq!(solution.moves(), ["RR"]);
        assert_eq!(solution.states(), [root, after_rr]);
    }
}
