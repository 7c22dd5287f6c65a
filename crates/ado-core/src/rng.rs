//! Deterministic per-ado and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each ado gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (ado_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive ids across the seed space.  Ados never share
//! RNG state, so velocity sampling does not depend on query order or on the
//! thread that performed it.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::AdoId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AdoRng ────────────────────────────────────────────────────────────────────

/// Per-ado deterministic RNG.
pub struct AdoRng(SmallRng);

impl AdoRng {
    /// Seed deterministically from the run's global seed and an ado id.
    pub fn new(global_seed: u64, ado: AdoId) -> Self {
        let seed = global_seed ^ (ado.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AdoRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with distribution sampling.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for scene generation and other global draws.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
