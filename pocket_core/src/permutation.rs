use crate::TILE_COUNT;

/// A bijection over the tile positions.
///
/// Applying a permutation `p` to a tile array produces a new array whose
/// `i`th entry is the old entry at position `p[i]`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Permutation([u8; TILE_COUNT]);

impl Permutation {
    /// The mapping that leaves every tile in place.
    pub fn identity() -> Self {
        let mut mapping = [0; TILE_COUNT];
        for (i, slot) in mapping.iter_mut().enumerate() {
            *slot = i as u8;
        }
        Permutation(mapping)
    }

    /// Accepts `mapping` only if it hits every index in `0..TILE_COUNT`
    /// exactly once.
    pub fn new(mapping: [u8; TILE_COUNT]) -> Option<Self> {
        let mut seen = [false; TILE_COUNT];
        for &index in &mapping {
            if index as usize >= TILE_COUNT || seen[index as usize] {
                return None;
            }
            seen[index as usize] = true;
        }
        Some(Permutation(mapping))
    }

    pub fn mapping(&self) -> &[u8; TILE_COUNT] {
        &self.0
    }

    /// The permutation equivalent to applying `self` first and `other`
    /// second.
    #[must_use]
    pub fn then(&self, other: &Permutation) -> Permutation {
        Permutation(std::array::from_fn(|i| self.0[other.0[i] as usize]))
    }

    /// The permutation that undoes `self`.
    #[must_use]
    pub fn inverse(&self) -> Permutation {
        let mut mapping = [0; TILE_COUNT];
        for (i, &index) in self.0.iter().enumerate() {
            mapping[index as usize] = i as u8;
        }
        Permutation(mapping)
    }

    /// Moves the item at position `mapping[i]` into position `i` for every
    /// `i`.
    pub fn permute<T: Copy>(&self, items: &[T; TILE_COUNT]) -> [T; TILE_COUNT] {
        std::array::from_fn(|i| items[self.0[i] as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rotated(offset: usize) -> Permutation {
        Permutation::new(std::array::from_fn(|i| ((i + offset) % TILE_COUNT) as u8)).unwrap()
    }

    #[test]
    fn identity_leaves_items_in_place() {
        let items: [u8; TILE_COUNT] = std::array::from_fn(|i| i as u8);
        assert_eq!(Permutation::identity().permute(&items), items);
    }

    #[test]
    fn rejects_out_of_range_indices() {
        let mut mapping = *Permutation::identity().mapping();
        mapping[5] = TILE_COUNT as u8;
        assert_eq!(Permutation::new(mapping), None);
    }

    #[test]
    fn rejects_duplicate_indices() {
        let mut mapping = *Permutation::identity().mapping();
        mapping[5] = mapping[6];
        assert_eq!(Permutation::new(mapping), None);
    }

    #[test]
    fn then_applies_left_operand_first() {
        let p = rotated(1);
        let q = rotated(3);
        let items: [u8; TILE_COUNT] = std::array::from_fn(|i| i as u8);
        assert_eq!(
            p.then(&q).permute(&items),
            q.permute(&p.permute(&items)),
        );
        assert_eq!(p.then(&q), rotated(4));
    }

    #[test]
    fn inverse_round_trips_to_identity() {
        let p = rotated(7);
        assert_eq!(p.then(&p.inverse()), Permutation::identity());
        assert_eq!(p.inverse().then(&p), Permutation::identity());
    }
}
