use core::f32::consts::PI;

use embassy_time::Instant;

use crate::{lut::SineLut, math8::elapsed_ms};

/// Fade period; the level reaches zero halfway through
pub const FADE_PERIOD_MS: u64 = 2_000;

/// Brightness of a fade started at `start`
///
/// Follows a half cosine from 1 down to 0 over the first half of the period,
/// then holds at 0.
#[allow(clippy::cast_precision_loss)]
pub fn fade_level(start: Instant, now: Instant, lut: &SineLut) -> f32 {
    let elapsed = elapsed_ms(start, now);
    if elapsed >= FADE_PERIOD_MS / 2 {
        return 0.0;
    }
    let phase = elapsed as f32 / FADE_PERIOD_MS as f32 * PI;
    lut.cos(phase).max(0.0)
}
