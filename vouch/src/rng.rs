//! Random source construction.
//!
//! Every run draws from a single `StdRng`. Unseeded runs still pick a concrete
//! seed up front so that a failure can always be replayed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Create a new RNG with a specific seed
pub fn create_seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Create a new RNG seeded from system entropy
pub fn create_rng() -> StdRng {
    StdRng::from_entropy()
}

/// Draw a fresh seed from system entropy
pub fn fresh_seed() -> u64 {
    rand::thread_rng().r#gen()
}

/// Resolve an optional seed into the seed actually used and its RNG
pub fn seeded(seed: Option<u64>) -> (u64, StdRng) {
    let seed = seed.unwrap_or_else(fresh_seed);
    (seed, create_seeded_rng(seed))
}
