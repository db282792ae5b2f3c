//! Seeded pseudo-random generator and seed hashing.
//!
//! RULE: nothing in the simulation may call a platform RNG. Every draw
//! comes from a `SeededRng` created inside the call that consumes it.
//!
//! The generator is a 32-bit mulberry-style mixer. All state arithmetic
//! is `u32` wrapping; signed or widened arithmetic changes the stream.

use crate::error::RngError;

/// 2^32 as a float, used to map a `u32` into `[0, 1)`.
const UINT32_RANGE: f64 = 4_294_967_296.0;

/// Per-draw state increment.
const MIX_INCREMENT: u32 = 0x6d2b_79f5;

/// Accumulator start for `hash_seed_parts`.
const HASH_OFFSET: u32 = 2_166_136_261;

/// Multiplicative mix for `hash_seed_parts`.
const HASH_PRIME: u32 = 16_777_619;

/// Anything that can seed the generator.
///
/// Integers are reduced modulo 2^32. Floats are truncated toward zero
/// first; NaN and infinities map to 1. A reduced value of 0 maps to 1.
pub trait SeedValue {
    fn to_seed(self) -> u32;
}

impl SeedValue for u32 {
    fn to_seed(self) -> u32 {
        non_zero(self)
    }
}

impl SeedValue for i32 {
    fn to_seed(self) -> u32 {
        non_zero(self as u32)
    }
}

impl SeedValue for u64 {
    fn to_seed(self) -> u32 {
        non_zero(self as u32)
    }
}

impl SeedValue for i64 {
    fn to_seed(self) -> u32 {
        non_zero(self as u32)
    }
}

impl SeedValue for f64 {
    fn to_seed(self) -> u32 {
        if !self.is_finite() {
            return 1;
        }
        let wrapped = self.trunc().rem_euclid(UINT32_RANGE);
        if wrapped >= UINT32_RANGE {
            return 1;
        }
        non_zero(wrapped as u32)
    }
}

fn non_zero(seed: u32) -> u32 {
    if seed == 0 {
        1
    } else {
        seed
    }
}

/// Normalize any seed to the generator's non-zero `u32` state.
pub fn normalize_seed<S: SeedValue>(seed: S) -> u32 {
    seed.to_seed()
}

/// Order-dependent combination of integers into one `u32`.
///
/// Each part is seed-normalized, xored into the accumulator, then the
/// accumulator is multiplied by a fixed prime (wrapping).
pub fn hash_seed_parts(parts: &[i64]) -> u32 {
    parts.iter().fold(HASH_OFFSET, |hash, &part| {
        (hash ^ normalize_seed(part)).wrapping_mul(HASH_PRIME)
    })
}

/// Deterministic generator. One instance per call chain; never shared
/// between simulations.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new<S: SeedValue>(seed: S) -> Self {
        Self {
            state: normalize_seed(seed),
        }
    }

    /// Raw 32-bit draw.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(MIX_INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Uniform float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / UINT32_RANGE
    }

    /// Uniform integer in `[min, max]` inclusive.
    pub fn int(&mut self, min: i64, max: i64) -> Result<i64, RngError> {
        if max < min {
            return Err(RngError::InvalidRange { min, max });
        }
        let span = max as f64 - min as f64 + 1.0;
        Ok((self.next_f64() * span).floor() as i64 + min)
    }

    /// Uniformly selected element.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, RngError> {
        if items.is_empty() {
            return Err(RngError::EmptyCollection);
        }
        let index = self.int(0, items.len() as i64 - 1)?;
        Ok(&items[index as usize])
    }

    /// `true` with the given probability, clamped to `[0, 1]`.
    pub fn chance(&mut self, probability: f64) -> bool {
        let bounded = probability.max(0.0).min(1.0);
        self.next_f64() < bounded
    }
}
