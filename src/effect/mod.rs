//! Procedural row patterns
//!
//! Patterns that compute their colors directly from row index and time,
//! without going through the color resolver.

mod alternating;
mod fade;
mod sweep;

use embassy_time::Instant;

pub use alternating::AlternatingEffect;
pub use fade::{FADE_PERIOD_MS, fade_level};
pub use sweep::RainbowSweepEffect;

use crate::{color::Rgb, lut::SineLut};

pub trait Effect {
    /// Render a single frame
    fn render(&mut self, now: Instant, rows: &mut [Rgb], lut: &SineLut);
}
