//! Seeded, reproducible shuffling.
//!
//! A 32-bit linear congruential generator feeds a Fisher-Yates shuffle. The same seed and
//! input always produce the same permutation, on every platform and in every process.

const LCG_MULTIPLIER: u32 = 1_664_525;
const LCG_INCREMENT: u32 = 1_013_904_223;
const UNIT_DIVISOR: f64 = u32::MAX as f64;

#[derive(Clone, Debug)]
pub struct SeededSequence {
  state: u32,
}

impl SeededSequence {
  pub fn new(seed: u32) -> Self {
    Self { state: seed }
  }

  /// Advance the state and map it into `[0, 1]`.
  pub fn next_unit(&mut self) -> f64 {
    self.state = self.state.wrapping_mul(LCG_MULTIPLIER).wrapping_add(LCG_INCREMENT);
    f64::from(self.state) / UNIT_DIVISOR
  }

  /// Fisher-Yates from the last index down to 1.
  pub fn shuffle_in_place<T>(&mut self, items: &mut [T]) {
    for i in (1..items.len()).rev() {
      // draw == 1.0 only when the state hits u32::MAX; clamp so it stays a valid index.
      let j = ((self.next_unit() * (i + 1) as f64).floor() as usize).min(i);
      items.swap(i, j);
    }
  }
}

/// Returns a permuted copy of `items`, fully determined by `seed`.
pub fn seeded_shuffle<T: Clone>(items: &[T], seed: u32) -> Vec<T> {
  let mut out = items.to_vec();
  SeededSequence::new(seed).shuffle_in_place(&mut out);
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn same_seed_same_permutation() {
    let items: Vec<u32> = (0..25).collect();
    assert_eq!(seeded_shuffle(&items, 42), seeded_shuffle(&items, 42));
  }

  #[test]
  fn output_is_a_permutation() {
    let items: Vec<u32> = (0..50).collect();
    for seed in [0, 1, 7, 19, 35, 4_000_000_000] {
      let mut out = seeded_shuffle(&items, seed);
      assert_eq!(out.len(), items.len());
      out.sort_unstable();
      assert_eq!(out, items);
    }
  }

  #[test]
  fn different_seeds_usually_differ() {
    let items: Vec<u32> = (0..10).collect();
    let distinct: std::collections::HashSet<Vec<u32>> =
      (0..20).map(|seed| seeded_shuffle(&items, seed)).collect();
    assert!(distinct.len() > 10, "only {} distinct permutations", distinct.len());
  }

  #[test]
  fn first_draws_follow_the_recurrence() {
    let mut seq = SeededSequence::new(0);
    let first = seq.next_unit();
    assert!((first - 1_013_904_223.0 / 4_294_967_295.0).abs() < 1e-12);

    // state_2 = 1664525 * 1013904223 + 1013904223 (mod 2^32)
    let expected = 1_013_904_223u32.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
    let second = seq.next_unit();
    assert!((second - f64::from(expected) / 4_294_967_295.0).abs() < 1e-12);
  }

  #[test]
  fn known_small_shuffle() {
    // seed 0: draws d1 ~ 0.2361, d2 ~ 0.2786.
    // i=2: j = floor(d1 * 3) = 0 -> [c, b, a]; i=1: j = floor(d2 * 2) = 0 -> [b, c, a]
    let out = seeded_shuffle(&["a", "b", "c"], 0);
    assert_eq!(out, vec!["b", "c", "a"]);
  }

  #[test]
  fn empty_and_single_are_untouched() {
    assert!(seeded_shuffle::<u8>(&[], 3).is_empty());
    assert_eq!(seeded_shuffle(&[9], 3), vec![9]);
  }
}
