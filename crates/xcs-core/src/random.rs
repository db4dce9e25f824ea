//! Random source shared by every stochastic decision in the learning loop.
//!
//! A single seedable generator is created once by the host and passed down
//! as `&mut RandomSource`. Seeding it with a fixed value makes a whole run
//! reproducible: tie-breaks, exploration draws, roulette spins, and symbol
//! generalization all pull from the same stream.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hash::Hash;

/// Seedable pseudo-random generator with the selection helpers XCS needs.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    /// Create a deterministic source from a seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a source seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Uniform draw in `[0, 1)`.
    pub fn next_double(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Uniform draw in `[min, max)`. A zero-width range yields `min`.
    pub fn next_double_range(&mut self, min: f64, max: f64) -> f64 {
        assert!(min <= max, "next_double_range: inverted range {}..{}", min, max);
        if min == max {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    /// Uniform integer in `[min, max]` (inclusive on both ends).
    pub fn next_int(&mut self, min: usize, max: usize) -> usize {
        assert!(min <= max, "next_int: empty range {}..={}", min, max);
        self.rng.gen_range(min..=max)
    }

    /// Bernoulli trial with the given success probability.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.next_double() < probability
    }

    /// Uniformly pick one element of a non-empty slice.
    pub fn choose_from<T: Clone>(&mut self, items: &[T]) -> T {
        assert!(!items.is_empty(), "choose_from: empty sequence");
        let idx = self.next_int(0, items.len() - 1);
        items[idx].clone()
    }

    /// Uniformly pick one element of a set.
    ///
    /// The set is materialized into a sequence first, so the result depends
    /// on the set's iteration order.
    pub fn choose_from_set<'a, T, I>(&mut self, items: I) -> T
    where
        T: Clone + Eq + Hash + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let materialized: Vec<T> = items.into_iter().cloned().collect();
        self.choose_from(&materialized)
    }

    /// Roulette-wheel selection by weight.
    ///
    /// Spins a uniform draw over `[0, sum)` and returns the first index whose
    /// cumulative weight exceeds it. The weight sum must be positive.
    pub fn roulette_wheel_selection(&mut self, weights: &[f64]) -> usize {
        let mut wheel = Vec::with_capacity(weights.len());
        let mut sum = 0.0;
        for &w in weights {
            sum += w;
            wheel.push(sum);
        }
        assert!(sum > 0.0, "roulette_wheel_selection: weight sum must be positive");

        let spin = self.next_double_range(0.0, sum);
        wheel
            .partition_point(|&cumulative| cumulative <= spin)
            .min(weights.len() - 1)
    }

    /// Index of a maximal value, ties broken uniformly at random.
    pub fn greedy_selection(&mut self, values: &[f64]) -> usize {
        assert!(!values.is_empty(), "greedy_selection: empty sequence");
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let best: Vec<usize> = values
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v == max)
            .map(|(i, _)| i)
            .collect();
        self.choose_from(&best)
    }

    /// With probability `epsilon` a uniformly random index, otherwise greedy.
    pub fn epsilon_greedy_selection(&mut self, values: &[f64], epsilon: f64) -> usize {
        assert!(!values.is_empty(), "epsilon_greedy_selection: empty sequence");
        if self.chance(epsilon) {
            self.next_int(0, values.len() - 1)
        } else {
            self.greedy_selection(values)
        }
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = RandomSource::seeded(7);
        let mut b = RandomSource::seeded(7);
        for _ in 0..32 {
            assert_eq!(a.next_double().to_bits(), b.next_double().to_bits());
        }
    }

    #[test]
    fn next_double_stays_in_unit_interval() {
        let mut rng = RandomSource::seeded(1);
        for _ in 0..1000 {
            let x = rng.next_double();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn next_double_range_stays_in_range() {
        let mut rng = RandomSource::seeded(5);
        for _ in 0..1000 {
            let x = rng.next_double_range(0.25, 0.5);
            assert!((0.25..0.5).contains(&x));
        }
        assert_eq!(rng.next_double_range(0.3, 0.3), 0.3);
    }

    #[test]
    #[should_panic(expected = "inverted range")]
    fn next_double_range_rejects_inverted_bounds() {
        RandomSource::seeded(0).next_double_range(1.0, 0.0);
    }

    #[test]
    fn next_int_is_inclusive() {
        let mut rng = RandomSource::seeded(2);
        let mut seen = [false; 3];
        for _ in 0..500 {
            seen[rng.next_int(0, 2)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn roulette_wheel_favors_heavy_weight() {
        let mut rng = RandomSource::seeded(42);
        let trials = 20_000;
        let mut hits = [0usize; 3];
        for _ in 0..trials {
            hits[rng.roulette_wheel_selection(&[1.0, 1.0, 2.0])] += 1;
        }
        let p2 = hits[2] as f64 / trials as f64;
        assert!((p2 - 0.5).abs() < 0.02, "index 2 picked with p = {}", p2);
        assert!(hits[0] > 0 && hits[1] > 0);
    }

    #[test]
    fn roulette_wheel_never_picks_zero_weight() {
        let mut rng = RandomSource::seeded(3);
        for _ in 0..1000 {
            assert_ne!(rng.roulette_wheel_selection(&[0.0, 1.0, 0.0, 3.0]), 0);
        }
    }

    #[test]
    #[should_panic(expected = "weight sum must be positive")]
    fn roulette_wheel_rejects_zero_sum() {
        RandomSource::seeded(0).roulette_wheel_selection(&[0.0, 0.0]);
    }

    #[test]
    fn greedy_only_returns_maximal_indices() {
        let mut rng = RandomSource::seeded(5);
        let mut seen = [0usize; 4];
        for _ in 0..1000 {
            seen[rng.greedy_selection(&[0.2, 0.9, 0.1, 0.9])] += 1;
        }
        assert_eq!(seen[0], 0);
        assert_eq!(seen[2], 0);
        assert!(seen[1] > 400 && seen[3] > 400);
    }

    #[test]
    fn epsilon_one_explores_everything() {
        let mut rng = RandomSource::seeded(9);
        let mut seen = [false; 3];
        for _ in 0..300 {
            seen[rng.epsilon_greedy_selection(&[5.0, 0.0, 0.0], 1.0)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn choose_from_set_returns_member() {
        let mut rng = RandomSource::seeded(11);
        let set: std::collections::HashSet<u8> = [3, 5, 8].into_iter().collect();
        for _ in 0..50 {
            let x = rng.choose_from_set(&set);
            assert!(set.contains(&x));
        }
    }
}
