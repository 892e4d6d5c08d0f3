use std::{fmt, str::FromStr};

use itertools::Itertools;
use thiserror::Error;

use crate::{FACE_COUNT, FACE_SIZE, TILE_COUNT, move_set::Move};

/// One of the six sticker colors, identified by its one-letter symbol.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Color {
    White,
    Red,
    Green,
    Yellow,
    Orange,
    Blue,
}

impl Color {
    pub fn from_symbol(symbol: char) -> Option<Color> {
        Some(match symbol {
            'W' => Color::White,
            'R' => Color::Red,
            'G' => Color::Green,
            'Y' => Color::Yellow,
            'O' => Color::Orange,
            'B' => Color::Blue,
            _ => return None,
        })
    }

    pub fn symbol(self) -> char {
        match self {
            Color::White => 'W',
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Yellow => 'Y',
            Color::Orange => 'O',
            Color::Blue => 'B',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The color each face shows when the cube is solved, in face order.
const FACE_COLORS: [Color; FACE_COUNT] = [
    Color::White,
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Orange,
    Color::Blue,
];

/// A complete assignment of colors to the 24 tile positions.
///
/// The tile array is the whole identity of a configuration. Two cubes
/// compare equal exactly when every position shows the same color, so a
/// `Cube` can serve directly as a hash-map key during search.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Cube {
    tiles: [Color; TILE_COUNT],
}

impl Cube {
    /// The goal configuration, with every face a single color.
    pub fn solved() -> Cube {
        Cube {
            tiles: std::array::from_fn(|i| FACE_COLORS[i / FACE_SIZE]),
        }
    }

    pub fn from_tiles(tiles: [Color; TILE_COUNT]) -> Cube {
        Cube { tiles }
    }

    pub fn tiles(&self) -> &[Color; TILE_COUNT] {
        &self.tiles
    }

    /// The configuration reached by performing `mv` on this one.
    #[must_use]
    pub fn apply(&self, mv: &Move) -> Cube {
        Cube {
            tiles: mv.permutation().permute(&self.tiles),
        }
    }

    pub fn faces(&self) -> impl Iterator<Item = &[Color]> {
        self.tiles.chunks_exact(FACE_SIZE)
    }

    /// Whether every face shows one uniform color.
    pub fn is_solved(&self) -> bool {
        self.faces()
            .all(|face| face[1..].iter().all(|tile| *tile == face[0]))
    }

    /// Scaled measure of how far the faces are from uniform.
    ///
    /// Each face contributes the number of distinct colors it shows, and
    /// every face showing more than one color adds a flat penalty of 60.
    /// The total is six times the natural per-face average, so it stays
    /// integral and combines with `6 * depth` when a search ranks nodes.
    /// A solved cube weighs exactly 6.
    pub fn disorder_weight(&self) -> u32 {
        let mut mixed_faces = 0;
        let mut distinct_total = 0;
        for face in self.faces() {
            let mut palette = 0u8;
            for tile in face {
                palette |= 1 << *tile as u8;
            }
            let distinct = palette.count_ones();
            if distinct > 1 {
                mixed_faces += 1;
            }
            distinct_total += distinct;
        }
        60 * mixed_faces + distinct_total
    }

    /// Renders the flattened net, with the top face first, the middle band
    /// in left/front/right/back order, and the bottom face last.
    pub fn grid(&self) -> String {
        let pair = |face: usize, row: usize| {
            let base = face * FACE_SIZE + row * 2;
            format!("{}{}", self.tiles[base], self.tiles[base + 1])
        };
        let mut lines = Vec::with_capacity(FACE_COUNT);
        for row in 0..2 {
            lines.push(format!("   {}", pair(0, row)));
        }
        for row in 0..2 {
            lines.push(format!(
                "{} {} {} {}",
                pair(4, row),
                pair(2, row),
                pair(1, row),
                pair(5, row)
            ));
        }
        for row in 0..2 {
            lines.push(format!("   {}", pair(3, row)));
        }
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

impl Default for Cube {
    fn default() -> Self {
        Cube::solved()
    }
}

impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spaced = self
            .faces()
            .map(|face| face.iter().map(|tile| tile.symbol()).collect::<String>())
            .join(" ");
        f.write_str(&spaced)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScrambleError {
    #[error("Expected {TILE_COUNT} tile symbols, found {0}")]
    WrongTileCount(usize),
    #[error("Unrecognized color symbol {0:?}, expected one of W R G Y O B")]
    UnknownSymbol(char),
}

impl FromStr for Cube {
    type Err = ScrambleError;

    /// Parses 24 color symbols, ignoring any whitespace grouping.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut tiles = [Color::White; TILE_COUNT];
        let mut count = 0;
        for symbol in text.chars().filter(|symbol| !symbol.is_whitespace()) {
            let color =
                Color::from_symbol(symbol).ok_or(ScrambleError::UnknownSymbol(symbol))?;
            if let Some(slot) = tiles.get_mut(count) {
                *slot = color;
            }
            count += 1;
        }
        if count != TILE_COUNT {
            return Err(ScrambleError::WrongTileCount(count));
        }
        Ok(Cube { tiles })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_set::MoveSet;

    #[test]
    fn solved_face_layout() {
        assert_eq!(
            Cube::solved().to_string(),
            "WWWW RRRR GGGG YYYY OOOO BBBB"
        );
        assert!(Cube::solved().is_solved());
    }

    #[test]
    fn parse_ignores_whitespace_grouping() {
        let packed: Cube = "WWWWRRRRGGGGYYYYOOOOBBBB".parse().unwrap();
        let grouped: Cube = "WWWW RRRR GGGG YYYY OOOO BBBB".parse().unwrap();
        let ragged: Cube = "WW WWRRRR GGGG\tYYYY OOOO BB BB".parse().unwrap();
        assert_eq!(packed, Cube::solved());
        assert_eq!(grouped, packed);
        assert_eq!(ragged, packed);
    }

    #[test]
    fn parse_rejects_wrong_tile_counts() {
        assert_eq!(
            "WWWW RRRR".parse::<Cube>(),
            Err(ScrambleError::WrongTileCount(8))
        );
        assert_eq!(
            "WWWW RRRR GGGG YYYY OOOO BBBB W".parse::<Cube>(),
            Err(ScrambleError::WrongTileCount(25))
        );
    }

    #[test]
    fn parse_rejects_unknown_symbols() {
        assert_eq!(
            "WWWW RRRR GGGG YYYY OOOO BBBX".parse::<Cube>(),
            Err(ScrambleError::UnknownSymbol('X'))
        );
    }

    #[test]
    fn quarter_turn_leaves_goal() {
        let moves = MoveSet::pocket_cube();
        let turned = Cube::solved().apply(&moves.moves()[moves.find("R").unwrap()]);
        assert!(!turned.is_solved());
        assert_ne!(turned, Cube::solved());
    }

    #[test]
    fn disorder_weight_of_solved_is_six() {
        assert_eq!(Cube::solved().disorder_weight(), 6);
    }

    #[test]
    fn disorder_weight_counts_mixed_faces() {
        let moves = MoveSet::pocket_cube();
        let turned = Cube::solved().apply(&moves.moves()[moves.find("R").unwrap()]);
        // R disturbs the up, front, down, and back faces, leaving each with
        // two colors, and keeps the right and left faces uniform.
        assert_eq!(turned.disorder_weight(), 60 * 4 + (2 + 1 + 2 + 2 + 1 + 2));
    }

    #[test]
    fn grid_lays_out_the_net() {
        assert_eq!(
            Cube::solved().grid(),
            "   WW\n   WW\nOO GG RR BB\nOO GG RR BB\n   YY\n   YY\n"
        );
    }
}
