//! Seedable random source shared by every stochastic component.
//!
//! [`RandomSource`] is passed explicitly (`&mut RandomSource`) to selection,
//! crossover, mutation and initialization, so fixing the seed makes a whole
//! run reproducible. It also implements [`RngCore`], which lets it feed any
//! helper written against [`Rng`].

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};

/// A single seeded pseudo-random stream.
///
/// # Examples
///
/// ```
/// use u_evo::RandomSource;
///
/// let mut a = RandomSource::new(42);
/// let mut b = RandomSource::new(42);
/// assert_eq!(a.next_double(), b.next_double());
///
/// // Empty ranges are tolerated and return the lower bound.
/// assert_eq!(a.next_int(5, 5), 5);
/// ```
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
    seed: u64,
}

impl RandomSource {
    /// Creates a stream seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates a stream with a seed drawn from the thread-local generator.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Restarts the stream from `seed`.
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.seed = seed;
    }

    /// The seed the stream was last (re)started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform double in `[0, 1)`.
    pub fn next_double(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Uniform double in `[lo, hi)`. Returns `lo` when `hi <= lo` or when
    /// the span `hi - lo` is not finite.
    pub fn next_double_in(&mut self, lo: f64, hi: f64) -> f64 {
        if !(hi > lo) || !(hi - lo).is_finite() {
            return lo;
        }
        self.rng.random_range(lo..hi)
    }

    /// Uniform integer in `[lo, hi)`. Returns `lo` when `hi <= lo`.
    pub fn next_int(&mut self, lo: i64, hi: i64) -> i64 {
        if hi <= lo {
            return lo;
        }
        self.rng.random_range(lo..hi)
    }

    /// Uniform index in `[0, len)`. Returns 0 when `len == 0`.
    pub fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.random_range(0..len)
    }

    /// Fair coin flip.
    pub fn next_bool(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }

    /// Returns `true` with the given probability.
    ///
    /// Always consumes exactly one draw so that gated operators keep the
    /// stream aligned regardless of the outcome.
    pub fn hit(&mut self, probability: f64) -> bool {
        self.next_double() < probability
    }

    /// Random permutation of `[0, length)` (Fisher-Yates).
    pub fn permutation(&mut self, length: usize) -> Vec<usize> {
        let mut perm: Vec<usize> = (0..length).collect();
        self.shuffle(&mut perm);
        perm
    }

    /// Shuffles `items` in place (Fisher-Yates).
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

impl RngCore for RandomSource {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.rng.fill_bytes(dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = RandomSource::new(7);
        let mut b = RandomSource::new(7);
        for _ in 0..100 {
            assert_eq!(a.next_double().to_bits(), b.next_double().to_bits());
            assert_eq!(a.next_int(-10, 10), b.next_int(-10, 10));
        }
    }

    #[test]
    fn test_set_seed_restarts_stream() {
        let mut rng = RandomSource::new(1);
        let first: Vec<f64> = (0..5).map(|_| rng.next_double()).collect();
        rng.set_seed(1);
        let again: Vec<f64> = (0..5).map(|_| rng.next_double()).collect();
        assert_eq!(first, again);
        assert_eq!(rng.seed(), 1);
    }

    #[test]
    fn test_next_double_range() {
        let mut rng = RandomSource::new(42);
        for _ in 0..1000 {
            let x = rng.next_double();
            assert!((0.0..1.0).contains(&x));
            let y = rng.next_double_in(-5.0, 5.0);
            assert!((-5.0..5.0).contains(&y));
        }
    }

    #[test]
    fn test_next_double_in_excludes_upper_bound() {
        let mut rng = RandomSource::new(7);
        for _ in 0..10_000 {
            let x = rng.next_double_in(1.0, 3.0);
            assert!(x >= 1.0 && x < 3.0, "{x} outside [1, 3)");
            let tight = rng.next_double_in(1.0, 1.0 + f64::EPSILON);
            assert!(tight < 1.0 + f64::EPSILON);
        }
    }

    #[test]
    fn test_next_double_in_degenerate_spans() {
        let mut rng = RandomSource::new(7);
        assert_eq!(rng.next_double_in(-f64::MAX, f64::MAX), -f64::MAX);
        assert_eq!(rng.next_double_in(0.0, f64::INFINITY), 0.0);
        assert!(rng.next_double_in(f64::NAN, 1.0).is_nan());
        assert_eq!(rng.next_double_in(0.0, f64::NAN), 0.0);
    }

    #[test]
    fn test_next_int_empty_range_returns_lo() {
        let mut rng = RandomSource::new(42);
        assert_eq!(rng.next_int(3, 3), 3);
        assert_eq!(rng.next_int(3, -2), 3);
        assert_eq!(rng.next_double_in(2.0, 1.0), 2.0);
        assert_eq!(rng.next_index(0), 0);
    }

    #[test]
    fn test_next_int_covers_range() {
        let mut rng = RandomSource::new(42);
        let seen: HashSet<i64> = (0..500).map(|_| rng.next_int(0, 5)).collect();
        assert_eq!(seen, (0..5).collect());
    }

    #[test]
    fn test_permutation_is_valid() {
        let mut rng = RandomSource::new(42);
        for len in [0, 1, 2, 10, 50] {
            let perm = rng.permutation(len);
            let set: HashSet<usize> = perm.iter().copied().collect();
            assert_eq!(perm.len(), len);
            assert_eq!(set.len(), len);
            assert!(perm.iter().all(|&v| v < len));
        }
    }

    #[test]
    fn test_shuffle_keeps_items_and_replays() {
        let mut a: Vec<u32> = (0..20).collect();
        let mut b = a.clone();
        RandomSource::new(9).shuffle(&mut a);
        RandomSource::new(9).shuffle(&mut b);
        assert_eq!(a, b);
        let mut sorted = a.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_usable_as_rng() {
        let mut rng = RandomSource::new(42);
        let v: u32 = rng.random_range(0..10);
        assert!(v < 10);
    }
}
