//! Rainbow sweep
//!
//! Three cosine bands 120° apart produce a spectrum across the rows that
//! scrolls over time.

use core::f32::consts::TAU;

use embassy_time::{Duration, Instant};

use super::Effect;
use crate::{color::Rgb, lut::SineLut, math8::unit8};

const DEFAULT_SWEEP_PERIOD_MS: u64 = 4_000;
const BAND_OFFSET: f32 = TAU / 3.0;

#[derive(Debug, Clone)]
pub struct RainbowSweepEffect {
    /// Time for the spectrum to scroll one full wall height
    period: Duration,
    /// Whether the spectrum moves at all
    scroll: bool,
}

impl Default for RainbowSweepEffect {
    fn default() -> Self {
        Self {
            period: Duration::from_millis(DEFAULT_SWEEP_PERIOD_MS),
            scroll: true,
        }
    }
}

impl RainbowSweepEffect {
    #[must_use]
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Freeze the spectrum in place
    #[must_use]
    pub fn without_scroll(mut self) -> Self {
        self.scroll = false;
        self
    }

    /// Color of one row at a given phase offset
    pub fn row_color(row: usize, rows: usize, shift: f32, lut: &SineLut) -> Rgb {
        #[allow(clippy::cast_precision_loss)]
        let phase = TAU * (row as f32 / rows.max(1) as f32 + shift);
        let band = |offset: f32| unit8((lut.cos(phase - offset) + 1.0) / 2.0);
        Rgb {
            r: band(0.0),
            g: band(BAND_OFFSET),
            b: band(2.0 * BAND_OFFSET),
        }
    }
}

impl Effect for RainbowSweepEffect {
    #[allow(clippy::cast_precision_loss)]
    fn render(&mut self, now: Instant, rows: &mut [Rgb], lut: &SineLut) {
        let shift = if self.scroll {
            let period = self.period.as_millis().max(1);
            (now.as_millis() % period) as f32 / period as f32
        } else {
            0.0
        };
        let count = rows.len();
        for (i, row) in rows.iter_mut().enumerate() {
            *row = Self::row_color(i, count, shift, lut);
        }
    }
}
