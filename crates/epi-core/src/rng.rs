//! The engine-owned deterministic RNG.
//!
//! # Determinism strategy
//!
//! A run owns exactly one `SimRng`, seeded once from the configured seed.
//! It is passed by `&mut` to every stochastic step (network generation, age
//! assignment, initial infections, contact sampling, transmission draws,
//! timers, interventions), always in the same order.  Two engines built from
//! the same configuration therefore consume identical streams and produce
//! identical histories.
//!
//! There is no global or thread-local generator anywhere in the workspace.
//! Streams are reproducible within this implementation only; they are not
//! meant to match any other library's generator bit for bit.

use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::distributions::{Distribution, Standard};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;

/// Simulation-level RNG exposing uniform, integer, Bernoulli and normal draws.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Draw a seed from OS entropy for runs configured without one.
    ///
    /// The caller is expected to record the returned value so the run can be
    /// replayed.
    pub fn fresh_seed() -> u64 {
        rand::random()
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        Standard: Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Uniform `f64` in `[0, 1)`.
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// One draw from `N(mean, std_dev)`.
    ///
    /// A degenerate distribution (`std_dev == 0`) returns `mean`.  Parameters
    /// are validated at configuration time; an invalid pair also yields `mean`.
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        match Normal::new(mean, std_dev) {
            Ok(dist) if std_dev > 0.0 => dist.sample(&mut self.0),
            _ => mean,
        }
    }

    /// Sample from any `rand` distribution (e.g. a prebuilt `WeightedIndex`).
    #[inline]
    pub fn sample<T, D: Distribution<T>>(&mut self, dist: &D) -> T {
        dist.sample(&mut self.0)
    }

    /// Choose a random element from a slice, with replacement across calls.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        if slice.is_empty() {
            return None;
        }
        let i = self.0.gen_range(0..slice.len());
        slice.get(i)
    }

    /// `amount` distinct indices from `0..len`, in draw order.
    ///
    /// # Panics
    /// Panics if `amount > len`.
    pub fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.0, len, amount).into_vec()
    }
}
