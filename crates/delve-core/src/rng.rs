//! Random number generation for layout generation
//!
//! Every random decision made by the layout pipeline goes through the
//! [`RandomSource`] trait, so a run is reproducible from its seed and tests
//! can substitute a scripted source.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Uniform integer source consumed by the layout pipeline.
pub trait RandomSource {
    /// Returns an integer in `min..max_exclusive`.
    ///
    /// Returns `min` if the range is empty.
    fn range_int(&mut self, min: i32, max_exclusive: i32) -> i32;

    /// Unweighted coin flip
    fn coin_flip(&mut self) -> bool {
        self.range_int(0, 2) == 0
    }
}

/// Layout random number generator
///
/// Wraps ChaCha8Rng for reproducible random number generation.
/// Only the seed is serialized; deserializing restarts the stream from it.
#[derive(Debug, Clone)]
pub struct LayoutRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl Serialize for LayoutRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LayoutRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u64::deserialize(deserializer)?;
        Ok(LayoutRng::new(seed))
    }
}

impl LayoutRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for LayoutRng {
    fn range_int(&mut self, min: i32, max_exclusive: i32) -> i32 {
        if max_exclusive <= min {
            return min;
        }
        self.rng.gen_range(min..max_exclusive)
    }
}

impl Default for LayoutRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
