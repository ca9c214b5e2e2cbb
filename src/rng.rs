//! Linear congruential generator using GCC's constants.
//!
//! state = (1103515245 * state + 12345) mod 2^31
//!
//! The generator is a plain value: whoever owns the event stream owns the
//! state, so a seed fully determines every sample.

use rand::{RngCore, SeedableRng};

const MODULUS: u64 = 0x8000_0000;
const MULTIPLIER: u64 = 1_103_515_245;
const INCREMENT: u64 = 12_345;

/// Seed used when none (or zero) is given.
pub const DEFAULT_SEED: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        let seed = if seed == 0 { DEFAULT_SEED } else { seed };
        Self {
            state: (seed as u64 % MODULUS) as u32,
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    /// Next raw value in `[0, 2^31)`.
    pub fn next_int(&mut self) -> u32 {
        let next = (MULTIPLIER * self.state as u64 + INCREMENT) % MODULUS;
        self.state = next as u32;
        self.state
    }

    /// Next sample in `[0, range)`.
    pub fn next_sample(&mut self, range: u32) -> u32 {
        self.next_u32() % range
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl RngCore for Lcg {
    fn next_u32(&mut self) -> u32 {
        self.next_int()
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.next_int() as u64;
        let lo = self.next_int() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_int().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Lcg {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new((state % MODULUS) as u32)
    }
}
