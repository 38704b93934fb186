//! Seeded pseudo-random source shared by palettes, bits and patterns.

use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Small, seedable random generator with 8/16-bit helpers
#[derive(Debug, Clone)]
pub struct Random {
    rng: SmallRng,
}

impl Random {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Derive an independent generator, e.g. for a freshly constructed pattern
    pub fn fork(&mut self) -> Self {
        Self::new(self.rng.gen_range(0..=u64::MAX))
    }

    /// Uniform value in `0..=255`
    pub fn random8(&mut self) -> u8 {
        self.rng.gen_range(0..=u8::MAX)
    }

    /// Uniform value in `0..limit`, or 0 when `limit` is 0
    pub fn random8_below(&mut self, limit: u8) -> u8 {
        if limit == 0 {
            return 0;
        }
        self.rng.gen_range(0..limit)
    }

    /// Uniform value in `0..limit`, or 0 when `limit` is 0
    pub fn random16_below(&mut self, limit: u16) -> u16 {
        if limit == 0 {
            return 0;
        }
        self.rng.gen_range(0..limit)
    }

    /// Uniform index into a collection of `len` items
    pub fn index_below(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new(0x5EED)
    }
}
