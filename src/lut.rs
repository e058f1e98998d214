//! Sine lookup table
//!
//! One full turn sampled into [`LUT_SIZE`] entries. Lookups are O(1) and
//! allocation-free, with a quantization error bounded by `2π / LUT_SIZE`.

use core::f32::consts::{FRAC_PI_2, TAU};

/// Number of samples in the table
pub const LUT_SIZE: usize = 4096;

/// Upper bound of the lookup error, in absolute sine units
pub const LUT_MAX_ERROR: f32 = TAU / LUT_SIZE as f32;

/// Precomputed sine table over `[0, 2π)`
///
/// Built once at startup and only read afterwards.
#[derive(Clone)]
pub struct SineLut {
    table: [f32; LUT_SIZE],
}

impl core::fmt::Debug for SineLut {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SineLut").field("size", &LUT_SIZE).finish()
    }
}

impl SineLut {
    /// Fill the table with one full turn of sine samples
    #[allow(clippy::cast_precision_loss)]
    pub fn build() -> Self {
        let mut table = [0.0; LUT_SIZE];
        for (i, sample) in table.iter_mut().enumerate() {
            let angle = i as f32 * TAU / LUT_SIZE as f32;
            *sample = libm::sinf(angle);
        }
        Self { table }
    }

    /// Map an arbitrary angle onto its table index
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn index(theta: f32) -> usize {
        let mut wrapped = libm::fmodf(theta, TAU);
        if wrapped < 0.0 {
            wrapped += TAU;
        }
        let index = libm::floorf(wrapped / TAU * LUT_SIZE as f32) as usize;
        // `wrapped` may round up to exactly TAU for tiny negative inputs
        index.min(LUT_SIZE - 1)
    }

    /// Sine of `theta` (radians, any range)
    #[inline]
    pub fn sin(&self, theta: f32) -> f32 {
        self.table[Self::index(theta)]
    }

    /// Cosine of `theta`, read from the same table a quarter turn ahead
    #[inline]
    pub fn cos(&self, theta: f32) -> f32 {
        self.sin(theta + FRAC_PI_2)
    }
}
