//! Deterministic random number generation.
//!
//! RULE: Nothing in the core may call any platform RNG.
//! All randomness flows through `Lcg32` instances built from a folded
//! seed (see `seed.rs`). Generators are created per reading and thrown
//! away; no generator outlives the query that needed it.
//!
//! The generator is a 32-bit linear congruential generator:
//!   state = (state * 1664525 + 13904223) mod 2^32
//! The constants are fixed forever. Changing either one changes
//! every figure the dashboard has ever shown for a given day.
//!
//! The float helpers live on `UnitDraws`, which any `rand::RngCore`
//! gets for free. A unit draw is `next_u32() / 2^32`, so an `Lcg32`
//! yields its state scaled into [0, 1).

use rand::{Error, RngCore, SeedableRng};
use std::f64::consts::PI;

pub const LCG_MULTIPLIER: u32 = 1_664_525;
pub const LCG_INCREMENT: u32 = 13_904_223;

const TWO_POW_32: f64 = 4_294_967_296.0;

/// Seeded uniform generator. Scalar state only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg32 {
    state: u32,
}

impl Lcg32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    fn step(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        self.state
    }
}

/// Float draws layered on a 32-bit stream.
pub trait UnitDraws: RngCore {
    /// Roll a float in [0.0, 1.0).
    fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / TWO_POW_32
    }

    /// Roll a float in (0.0, 1.0). Re-draws on an exact zero.
    fn next_f64_nonzero(&mut self) -> f64 {
        loop {
            let u = self.next_f64();
            if u != 0.0 {
                return u;
            }
        }
    }

    /// Sample N(mean, std_dev) via Box-Muller.
    ///
    /// Consumes exactly two non-zero draws (`u` then `v`). The result is
    /// unbounded; callers clamp.
    fn next_gaussian(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u = self.next_f64_nonzero();
        let v = self.next_f64_nonzero();
        mean + std_dev * (-2.0 * u.ln()).sqrt() * (2.0 * PI * v).cos()
    }

    /// `base + u * span`, not rounded.
    fn next_in_band(&mut self, base: f64, span: f64) -> f64 {
        base + self.next_f64() * span
    }
}

impl<R: RngCore + ?Sized> UnitDraws for R {}

impl RngCore for Lcg32 {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        let hi = u64::from(self.step());
        let lo = u64::from(self.step());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Lcg32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }

    /// Truncates to the low 32 bits, matching `Lcg32::new`.
    fn seed_from_u64(state: u64) -> Self {
        Self::new(state as u32)
    }
}
