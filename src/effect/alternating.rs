//! Alternating red/blue rows
//!
//! Even rows pulse red, odd rows pulse blue a quarter period later.

use core::f32::consts::{FRAC_PI_2, TAU};

use embassy_time::{Duration, Instant};

use super::Effect;
use crate::{color::Rgb, lut::SineLut, math8::unit8};

const DEFAULT_ALTERNATING_PERIOD_MS: u64 = 1_500;

#[derive(Debug, Clone)]
pub struct AlternatingEffect {
    period: Duration,
}

impl Default for AlternatingEffect {
    fn default() -> Self {
        Self {
            period: Duration::from_millis(DEFAULT_ALTERNATING_PERIOD_MS),
        }
    }
}

impl AlternatingEffect {
    #[must_use]
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Brightness of the even and odd rows at `now`
    #[allow(clippy::cast_precision_loss)]
    pub fn levels(&self, now: Instant, lut: &SineLut) -> (u8, u8) {
        let period = self.period.as_millis().max(1);
        let phase = (now.as_millis() % period) as f32 / period as f32 * TAU;
        let even = (lut.sin(phase) + 1.0) / 2.0;
        let odd = (lut.sin(phase + FRAC_PI_2) + 1.0) / 2.0;
        (unit8(even), unit8(odd))
    }
}

impl Effect for AlternatingEffect {
    fn render(&mut self, now: Instant, rows: &mut [Rgb], lut: &SineLut) {
        let (even, odd) = self.levels(now, lut);
        for (i, row) in rows.iter_mut().enumerate() {
            *row = if i % 2 == 0 {
                Rgb { r: even, g: 0, b: 0 }
            } else {
                Rgb { r: 0, g: 0, b: odd }
            };
        }
    }
}
