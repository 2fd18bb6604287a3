//! Seeded random stream shared by every generation stage.
//!
//! All randomness in a map or dungeon flows through one [`DungeonRng`], so a
//! seed reproduces the exact same sequence of rooms, caverns and corridors.

use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Clone, Debug)]
pub struct DungeonRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl DungeonRng {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed), seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        (self.rng.next_u64() >> 11) as f64 * (1.0 / (1_u64 << 53) as f64)
    }

    /// `floor(next * (max - min) + min)`, so `[min, max)` whenever `max > min`.
    pub fn next_int(&mut self, min: i32, max: i32) -> i32 {
        let span = f64::from(max) - f64::from(min);
        (self.next_f64() * span + f64::from(min)).floor() as i32
    }

    pub fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    pub fn sample<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = self.next_int(0, items.len() as i32) as usize;
        items.get(index)
    }

    pub fn sample_and_remove<T>(&mut self, items: &mut Vec<T>) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        let index = self.next_int(0, items.len() as i32) as usize;
        Some(items.remove(index.min(items.len() - 1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_seeds_produce_identical_streams() {
        let mut left = DungeonRng::new(2_024);
        let mut right = DungeonRng::new(2_024);
        for _ in 0..256 {
            assert_eq!(left.next_f64().to_bits(), right.next_f64().to_bits());
        }
    }

    #[test]
    fn next_f64_stays_in_unit_interval() {
        let mut rng = DungeonRng::new(7);
        for _ in 0..10_000 {
            let value = rng.next_f64();
            assert!((0.0..1.0).contains(&value), "{value} escaped [0, 1)");
        }
    }

    #[test]
    fn next_int_is_half_open() {
        let mut rng = DungeonRng::new(99);
        let mut seen = [false; 5];
        for _ in 0..2_000 {
            let value = rng.next_int(3, 8);
            assert!((3..8).contains(&value));
            seen[(value - 3) as usize] = true;
        }
        assert!(seen.iter().all(|&hit| hit), "every value in range should appear: {seen:?}");
    }

    #[test]
    fn sampling_an_empty_slice_yields_none() {
        let mut rng = DungeonRng::new(1);
        let empty: Vec<u8> = Vec::new();
        assert_eq!(rng.sample(&empty), None);
        let mut empty = empty;
        assert_eq!(rng.sample_and_remove(&mut empty), None);
    }

    #[test]
    fn sample_and_remove_drains_without_repeats() {
        let mut rng = DungeonRng::new(31);
        let mut items: Vec<u32> = (0..20).collect();
        let mut drawn = Vec::new();
        while let Some(item) = rng.sample_and_remove(&mut items) {
            drawn.push(item);
        }
        drawn.sort_unstable();
        assert_eq!(drawn, (0..20).collect::<Vec<_>>());
    }
}
