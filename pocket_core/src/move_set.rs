use std::fmt;

use thiserror::Error;

use crate::{TILE_COUNT, cube::Cube, permutation::Permutation};

/// A named quarter turn.
#[derive(Debug, Clone)]
pub struct Move {
    name: String,
    permutation: Permutation,
}

impl Move {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MoveSetError {
    #[error("A move table needs at least one move")]
    Empty,
    #[error("Move {0:?} does not map every tile index exactly once")]
    NotAPermutation(String),
    #[error("Move {0:?} appears twice in the table")]
    DuplicateName(String),
    #[error("No move named {0:?} in the table")]
    UnknownMove(String),
}

/// An immutable table of moves, fixed for the lifetime of a search.
///
/// Construction validates every mapping and records which table entries
/// undo which, so callers can pair a move with its inverse without
/// rescanning the table.
#[derive(Debug, Clone)]
pub struct MoveSet {
    moves: Box<[Move]>,
    inverses: Box<[Option<usize>]>,
}

impl MoveSet {
    pub fn from_entries(entries: &[(&str, [u8; TILE_COUNT])]) -> Result<MoveSet, MoveSetError> {
        if entries.is_empty() {
            return Err(MoveSetError::Empty);
        }
        let mut moves: Vec<Move> = Vec::with_capacity(entries.len());
        for (name, mapping) in entries {
            if moves.iter().any(|mv| mv.name == *name) {
                return Err(MoveSetError::DuplicateName((*name).to_owned()));
            }
            let permutation = Permutation::new(*mapping)
                .ok_or_else(|| MoveSetError::NotAPermutation((*name).to_owned()))?;
            moves.push(Move {
                name: (*name).to_owned(),
                permutation,
            });
        }
        let inverses = moves
            .iter()
            .map(|mv| {
                let inverse = mv.permutation.inverse();
                moves.iter().position(|other| other.permutation == inverse)
            })
            .collect();
        Ok(MoveSet {
            moves: moves.into_boxed_slice(),
            inverses,
        })
    }

    /// The twelve quarter turns of the pocket cube.
    pub fn pocket_cube() -> MoveSet {
        // The builtin table is statically well formed.
        Self::from_entries(&POCKET_CUBE_TURNS).expect("builtin move table is valid")
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Index of the move called `name`.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.moves.iter().position(|mv| mv.name == name)
    }

    /// Index of the move that undoes the move at `index`, when the table
    /// contains one.
    pub fn inverse_of(&self, index: usize) -> Option<usize> {
        self.inverses[index]
    }

    /// A table holding only the named subset of this table's moves.
    pub fn with_moves(&self, names: &[&str]) -> Result<MoveSet, MoveSetError> {
        let entries = names
            .iter()
            .map(|name| {
                self.find(name)
                    .map(|index| (*name, *self.moves[index].permutation.mapping()))
                    .ok_or_else(|| MoveSetError::UnknownMove((*name).to_owned()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_entries(&entries)
    }

    /// Applies a whole sequence of moves by name, or `None` when a name is
    /// not in the table.
    pub fn apply_all<'a>(
        &self,
        start: Cube,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Option<Cube> {
        let mut cube = start;
        for name in names {
            cube = cube.apply(&self.moves[self.find(name)?]);
        }
        Some(cube)
    }
}

/// Mappings for the clockwise and counterclockwise quarter turns of each
/// of the six faces.
///
/// Tile positions on the flattened net:
///
/// ```text
///          0  1
///          2  3
/// 16 17    8  9    4  5   20 21
/// 18 19   10 11    6  7   22 23
///         12 13
///         14 15
/// ```
///
/// Entry `i` of a mapping names the position whose tile the turn moves
/// into position `i`.
const POCKET_CUBE_TURNS: [(&str, [u8; TILE_COUNT]); 12] = [
    (
        "U",
        [
            2, 0, 3, 1, 20, 21, 6, 7, 4, 5, 10, 11, 12, 13, 14, 15, 8, 9, 18, 19, 16, 17, 22, 23,
        ],
    ),
    (
        "U'",
        [
            1, 3, 0, 2, 8, 9, 6, 7, 16, 17, 10, 11, 12, 13, 14, 15, 20, 21, 18, 19, 4, 5, 22, 23,
        ],
    ),
    (
        "R",
        [
            0, 9, 2, 11, 6, 4, 7, 5, 8, 13, 10, 15, 12, 22, 14, 20, 16, 17, 18, 19, 3, 21, 1, 23,
        ],
    ),
    (
        "R'",
        [
            0, 22, 2, 20, 5, 7, 4, 6, 8, 1, 10, 3, 12, 9, 14, 11, 16, 17, 18, 19, 15, 21, 13, 23,
        ],
    ),
    (
        "F",
        [
            0, 1, 19, 17, 2, 5, 3, 7, 10, 8, 11, 9, 6, 4, 14, 15, 16, 12, 18, 13, 20, 21, 22, 23,
        ],
    ),
    (
        "F'",
        [
            0, 1, 4, 6, 13, 5, 12, 7, 9, 11, 8, 10, 17, 19, 14, 15, 16, 3, 18, 2, 20, 21, 22, 23,
        ],
    ),
    (
        "D",
        [
            0, 1, 2, 3, 4, 5, 10, 11, 8, 9, 18, 19, 14, 12, 15, 13, 16, 17, 22, 23, 20, 21, 6, 7,
        ],
    ),
    (
        "D'",
        [
            0, 1, 2, 3, 4, 5, 22, 23, 8, 9, 6, 7, 13, 15, 12, 14, 16, 17, 10, 11, 20, 21, 18, 19,
        ],
    ),
    (
        "L",
        [
            23, 1, 21, 3, 4, 5, 6, 7, 0, 9, 2, 11, 8, 13, 10, 15, 18, 16, 19, 17, 20, 14, 22, 12,
        ],
    ),
    (
        "L'",
        [
            8, 1, 10, 3, 4, 5, 6, 7, 12, 9, 14, 11, 23, 13, 21, 15, 17, 19, 16, 18, 20, 2, 22, 0,
        ],
    ),
    (
        "B",
        [
            5, 7, 2, 3, 4, 15, 6, 14, 8, 9, 10, 11, 12, 13, 16, 18, 1, 17, 0, 19, 22, 20, 23, 21,
        ],
    ),
    (
        "B'",
        [
            18, 16, 2, 3, 4, 0, 6, 1, 8, 9, 10, 11, 12, 13, 7, 5, 14, 17, 15, 19, 21, 23, 20, 22,
        ],
    ),
];

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn builtin_table_lists_all_twelve_turns() {
        let moves = MoveSet::pocket_cube();
        assert_eq!(
            moves.moves().iter().map(Move::name).collect_vec(),
            ["U", "U'", "R", "R'", "F", "F'", "D", "D'", "L", "L'", "B", "B'"]
        );
    }

    #[test]
    fn every_builtin_turn_pairs_with_its_inverse() {
        let moves = MoveSet::pocket_cube();
        let scrambled = moves.apply_all(Cube::solved(), ["R", "U", "F"]).unwrap();
        for index in 0..moves.len() {
            let inverse = moves.inverse_of(index).unwrap();
            assert_ne!(inverse, index);
            assert_eq!(moves.inverse_of(inverse), Some(index));
            let there = scrambled.apply(&moves.moves()[index]);
            let back = there.apply(&moves.moves()[inverse]);
            assert_eq!(back, scrambled);
        }
        assert_eq!(moves.inverse_of(moves.find("U").unwrap()), moves.find("U'"));
        assert_eq!(moves.inverse_of(moves.find("B'").unwrap()), moves.find("B"));
    }

    #[test]
    fn four_equal_quarter_turns_return_to_start() {
        let moves = MoveSet::pocket_cube();
        let start = moves.apply_all(Cube::solved(), ["F", "D"]).unwrap();
        for mv in moves.moves() {
            let mut cube = start;
            for _ in 0..4 {
                cube = cube.apply(mv);
            }
            assert_eq!(cube, start);
        }
    }

    #[test]
    fn rejects_malformed_tables() {
        assert_eq!(MoveSet::from_entries(&[]).unwrap_err(), MoveSetError::Empty);

        let identity = *Permutation::identity().mapping();
        assert_eq!(
            MoveSet::from_entries(&[("A", identity), ("A", identity)]).unwrap_err(),
            MoveSetError::DuplicateName("A".to_owned())
        );

        let mut doubled = identity;
        doubled[0] = doubled[1];
        assert_eq!(
            MoveSet::from_entries(&[("A", doubled)]).unwrap_err(),
            MoveSetError::NotAPermutation("A".to_owned())
        );
    }

    #[test]
    fn with_moves_narrows_the_table() {
        let moves = MoveSet::pocket_cube();
        let narrowed = moves.with_moves(&["R", "R'"]).unwrap();
        assert_eq!(narrowed.len(), 2);
        assert_eq!(narrowed.find("R"), Some(0));
        assert_eq!(narrowed.find("U"), None);
        assert_eq!(narrowed.inverse_of(0), Some(1));

        assert_eq!(
            moves.with_moves(&["R", "Z"]).unwrap_err(),
            MoveSetError::UnknownMove("Z".to_owned())
        );
    }

    #[test]
    fn apply_all_walks_the_whole_sequence() {
        let moves = MoveSet::pocket_cube();
        assert_eq!(
            moves.apply_all(Cube::solved(), ["R", "U", "U'", "R'"]),
            Some(Cube::solved())
        );
        assert_eq!(moves.apply_all(Cube::solved(), ["R", "X"]), None);
    }
}
