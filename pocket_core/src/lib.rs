pub mod cube;
pub mod move_set;
pub mod permutation;

/// Visible tiles on the puzzle.
pub const TILE_COUNT: usize = 24;
/// Faces of the puzzle. The goal requires every face to be a single color.
pub const FACE_COUNT: usize = 6;
/// Tiles per face.
pub const FACE_SIZE: usize = 4;
