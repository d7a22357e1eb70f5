//! RNG module - deterministic piece generation
//!
//! Shape kind is drawn uniformly from the seven kinds, and every occupied cell gets an
//! independently uniform fruit from the level's palette (see [`crate::scoring::palette`]).
//! A simple LCG keeps the whole sequence reproducible from a seed.

use crate::pieces::{ActivePiece, PIECE_CELLS};
use crate::scoring::palette;
use crate::types::{FruitType, ShapeKind};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Maps the full 32-bit output onto the range with a multiply-shift, so the
    /// well-mixed high bits pick the value rather than the weak low bits.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Pick one element of a non-empty slice
    pub fn pick<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.next_range(items.len() as u32) as usize).copied()
    }

    /// Current internal state (for restarting with the same sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Uniform piece generator
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: SimpleRng,
}

impl PieceGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Draw a shape kind uniformly over all seven kinds
    pub fn next_kind(&mut self) -> ShapeKind {
        self.rng.pick(&ShapeKind::ALL).unwrap_or(ShapeKind::O)
    }

    /// Draw one fruit per occupied cell from the palette of `level`
    pub fn next_fruits(&mut self, level: u32) -> [FruitType; PIECE_CELLS] {
        let palette = palette(level);
        let mut fruits = [FruitType::Cherry; PIECE_CELLS];
        for fruit in fruits.iter_mut() {
            *fruit = self.rng.pick(palette).unwrap_or(FruitType::Cherry);
        }
        fruits
    }

    /// Generate a full piece at the spawn position
    pub fn next_piece(&mut self, level: u32) -> ActivePiece {
        let kind = self.next_kind();
        let fruits = self.next_fruits(level);
        ActivePiece::spawn(kind, fruits)
    }

    /// Get the current RNG state (for restarting game with same sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        let v1 = rng1.next_u32();
        let v2 = rng2.next_u32();
        assert_ne!(v1, v2);
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
        }
        assert_eq!(rng.next_range(0), 0);
    }

    #[test]
    fn test_generator_covers_every_kind() {
        let mut generator = PieceGenerator::new(42);
        let mut seen = [false; 7];
        for _ in 0..500 {
            let kind = generator.next_kind();
            let i = ShapeKind::ALL.iter().position(|k| *k == kind).unwrap();
            seen[i] = true;
        }
        assert!(seen.iter().all(|s| *s), "{:?}", seen);
    }

    #[test]
    fn test_fruits_respect_level_palette() {
        let mut generator = PieceGenerator::new(3);
        for _ in 0..200 {
            for fruit in generator.next_fruits(1) {
                assert!(fruit.index() < 4, "{:?} outside level 1 palette", fruit);
            }
        }
    }

    #[test]
    fn test_same_seed_same_pieces() {
        let mut a = PieceGenerator::new(99);
        let mut b = PieceGenerator::new(99);
        for _ in 0..50 {
            assert_eq!(a.next_piece(5), b.next_piece(5));
        }
    }
}
