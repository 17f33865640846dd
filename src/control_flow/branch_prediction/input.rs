//! Input generation for the accumulation kernels.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seed applied right before every generation so each scenario sees the
/// same value stream on every run.
pub const GENERATOR_SEED: u64 = 1;

/// Upper bound (inclusive) of a raw draw: the classic 31-bit `RAND_MAX`.
pub const DRAW_MAX: u32 = i32::MAX as u32;

/// Raw draw in `[0, DRAW_MAX]`.
#[inline]
pub fn draw<R: Rng>(rng: &mut R) -> u32 {
    rng.random_range(0..=DRAW_MAX)
}

/// The three equal-length sequences consumed by a kernel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputTriple {
    pub values_a: Vec<u64>,
    pub values_b: Vec<u64>,
    pub decisions: Vec<u8>,
}

impl InputTriple {
    /// Build a triple from explicit sequences.
    ///
    /// Returns `None` when the lengths differ.
    pub fn new(values_a: Vec<u64>, values_b: Vec<u64>, decisions: Vec<u8>) -> Option<Self> {
        (values_a.len() == values_b.len() && values_b.len() == decisions.len()).then_some(Self {
            values_a,
            values_b,
            decisions,
        })
    }

    /// Generate `n` elements from a generator seeded with `seed`.
    ///
    /// For each element, in this order: `values_a[i]` and `values_b[i]` are
    /// raw draws, then `decide` is invoked once for `decisions[i]`. The
    /// closure receives the same generator, so policies that draw advance
    /// the shared stream and policies that don't leave it untouched.
    pub fn generate<F>(n: usize, seed: u64, mut decide: F) -> Self
    where
        F: FnMut(&mut StdRng) -> bool,
    {
        let mut rng = StdRng::seed_from_u64(seed);

        let mut values_a = Vec::with_capacity(n);
        let mut values_b = Vec::with_capacity(n);
        let mut decisions = Vec::with_capacity(n);

        for _ in 0..n {
            values_a.push(u64::from(draw(&mut rng)));
            values_b.push(u64::from(draw(&mut rng)));
            decisions.push(u8::from(decide(&mut rng)));
        }

        Self {
            values_a,
            values_b,
            decisions,
        }
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    /// Borrow the sequences in kernel argument order.
    pub fn as_slices(&self) -> (&[u64], &[u64], &[u8]) {
        (&self.values_a, &self.values_b, &self.decisions)
    }

    /// Fraction of nonzero decisions.
    pub fn true_ratio(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let taken = self.decisions.iter().filter(|&&d| d != 0).count();
        taken as f64 / self.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_lengths_match() {
        let inputs = InputTriple::generate(1000, GENERATOR_SEED, |rng| draw(rng) & 1 == 1);
        assert_eq!(inputs.values_a.len(), 1000);
        assert_eq!(inputs.values_b.len(), 1000);
        assert_eq!(inputs.decisions.len(), 1000);
    }

    #[test]
    fn test_same_seed_same_inputs() {
        let first = InputTriple::generate(4096, GENERATOR_SEED, |rng| draw(rng) & 1 == 1);
        let second = InputTriple::generate(4096, GENERATOR_SEED, |rng| draw(rng) & 1 == 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_seed_different_inputs() {
        let first = InputTriple::generate(64, 1, |_| true);
        let second = InputTriple::generate(64, 2, |_| true);
        assert_ne!(first.values_a, second.values_a);
    }

    #[test]
    fn test_values_within_draw_range() {
        let inputs = InputTriple::generate(10_000, GENERATOR_SEED, |_| false);
        let max = u64::from(DRAW_MAX);
        assert!(inputs.values_a.iter().chain(&inputs.values_b).all(|&v| v <= max));
    }

    #[test]
    fn test_decisions_are_zero_or_one() {
        let inputs = InputTriple::generate(2048, GENERATOR_SEED, |rng| draw(rng) % 3 == 0);
        assert!(inputs.decisions.iter().all(|&d| d <= 1));
    }

    #[test]
    fn test_empty_generation() {
        let inputs = InputTriple::generate(0, GENERATOR_SEED, |_| true);
        assert!(inputs.is_empty());
        assert_eq!(inputs.true_ratio(), 0.0);
    }

    #[test]
    fn test_new_rejects_mismatched_lengths() {
        assert!(InputTriple::new(vec![1, 2], vec![3, 4], vec![1, 0]).is_some());
        assert!(InputTriple::new(vec![1, 2], vec![3], vec![1, 0]).is_none());
        assert!(InputTriple::new(vec![1], vec![3], vec![]).is_none());
    }
}
