//! Audio level tracking
//!
//! Raw 0-255 samples are smoothed exponentially into a level in
//! `[MIN_LEVEL, 1]` that scales most render modes.

/// Floor of the smoothed level, keeps the display from going fully dark
pub const MIN_LEVEL: f32 = 0.05;

/// Weight of a new sample in the exponential average
pub const SMOOTHING: f32 = 0.3;

/// Non-blocking source of audio level samples
pub trait AudioSampleSource {
    /// Read at most one sample; `None` when nothing is pending
    fn read_sample(&mut self) -> Option<u8>;
}

/// Smoothed audio level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioLevel {
    level: f32,
}

impl Default for AudioLevel {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioLevel {
    /// Start at full level so output is visible before any sample arrives
    pub const fn new() -> Self {
        Self { level: 1.0 }
    }

    pub const fn get(&self) -> f32 {
        self.level
    }

    /// Fold one raw sample into the average
    pub fn update(&mut self, sample: u8) {
        let target = f32::from(sample) / 255.0;
        self.level += (target - self.level) * SMOOTHING;
        self.level = self.level.clamp(MIN_LEVEL, 1.0);
    }
}
