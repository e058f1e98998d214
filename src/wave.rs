//! Traveling wave pulses
//!
//! Up to [`MAX_WAVES`] pulses travel along the rows at [`WAVE_SPEED`]. New
//! pulses take the next ring slot in round-robin order, replacing whatever
//! was there. Overlapping pulses add up, saturating each channel at 255.

use core::f32::consts::PI;

use embassy_time::Instant;

use crate::{
    LED_ROWS,
    color::{BLACK, Rgb, add_colors, scale_color},
    lut::SineLut,
    math8::elapsed_ms,
};

/// Number of simultaneous pulses
pub const MAX_WAVES: usize = 4;

/// Pulse width in rows, also the number of envelope samples
pub const WAVE_SIZE: usize = 8;

/// Rows travelled per millisecond
pub const WAVE_SPEED: f32 = 1.0 / 32.0;

const HALF_WAVE: i32 = (WAVE_SIZE / 2) as i32;

/// Row color buffer produced each frame
pub type RowBuffer = [Rgb; LED_ROWS];

/// Travel direction of a pulse
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// From the last row towards row 0
    Up,
    /// From row 0 towards the last row
    #[default]
    Down,
}

/// One traveling pulse
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveEntry {
    /// Current center row; may lie outside the grid while entering/leaving
    pub focus: f32,
    pub start: Instant,
    pub direction: Direction,
    pub finished: bool,
}

impl WaveEntry {
    const IDLE: Self = Self {
        focus: 0.0,
        start: Instant::from_ticks(0),
        direction: Direction::Down,
        finished: true,
    };

    /// Position of the pulse center at `now`
    #[allow(clippy::cast_precision_loss)]
    pub fn focus_at(&self, now: Instant) -> f32 {
        let travelled = elapsed_ms(self.start, now) as f32 * WAVE_SPEED;
        match self.direction {
            Direction::Down => travelled,
            Direction::Up => (LED_ROWS - 1) as f32 - travelled,
        }
    }
}

/// Whether a pulse centered at `focus` has left the track
///
/// The track spans `[-WAVE_SIZE, LED_ROWS + WAVE_SIZE - 1)`.
#[allow(clippy::cast_precision_loss)]
pub fn is_off_track(focus: f32) -> bool {
    focus < -(WAVE_SIZE as f32) || focus >= (LED_ROWS + WAVE_SIZE - 1) as f32
}

/// Ring of traveling pulses
#[derive(Debug, Clone)]
pub struct WaveSimulator {
    entries: [WaveEntry; MAX_WAVES],
    cursor: usize,
    envelope: [f32; WAVE_SIZE],
}

impl WaveSimulator {
    pub fn new(lut: &SineLut) -> Self {
        Self {
            entries: [WaveEntry::IDLE; MAX_WAVES],
            cursor: 0,
            envelope: build_envelope(lut),
        }
    }

    /// Brightness profile across the pulse width
    pub const fn envelope(&self) -> &[f32; WAVE_SIZE] {
        &self.envelope
    }

    pub const fn entries(&self) -> &[WaveEntry; MAX_WAVES] {
        &self.entries
    }

    /// Number of spawns so far; the next slot is this modulo [`MAX_WAVES`]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn active_count(&self) -> usize {
        self.entries.iter().filter(|entry| !entry.finished).count()
    }

    /// Drop every pulse
    pub fn clear(&mut self) {
        self.entries = [WaveEntry::IDLE; MAX_WAVES];
    }

    /// Start a new pulse in the next ring slot, returning the slot index
    pub fn spawn(&mut self, direction: Direction, now: Instant) -> usize {
        let slot = self.cursor % MAX_WAVES;
        let mut entry = WaveEntry {
            focus: 0.0,
            start: now,
            direction,
            finished: false,
        };
        entry.focus = entry.focus_at(now);
        self.entries[slot] = entry;
        self.cursor = self.cursor.wrapping_add(1);
        slot
    }

    /// Clear `rows`, then add every live pulse tinted with `color`
    pub fn render(&mut self, now: Instant, color: Rgb, rows: &mut RowBuffer) {
        rows.fill(BLACK);

        for entry in self.entries.iter_mut().filter(|entry| !entry.finished) {
            entry.focus = entry.focus_at(now);
            if is_off_track(entry.focus) {
                entry.finished = true;
                continue;
            }
            add_pulse(rows, entry.focus, color, &self.envelope);
        }
    }
}

/// Half-sine hump sampled from the table: `envelope[i] = sin(i / WAVE_SIZE * π)`
#[allow(clippy::cast_precision_loss)]
fn build_envelope(lut: &SineLut) -> [f32; WAVE_SIZE] {
    let mut envelope = [0.0; WAVE_SIZE];
    for (i, sample) in envelope.iter_mut().enumerate() {
        *sample = lut.sin(i as f32 / WAVE_SIZE as f32 * PI);
    }
    envelope
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn add_pulse(rows: &mut RowBuffer, focus: f32, color: Rgb, envelope: &[f32; WAVE_SIZE]) {
    let center = libm::roundf(focus) as i32;
    for offset in -HALF_WAVE..HALF_WAVE {
        let row = center + offset;
        if row < 0 || row >= LED_ROWS as i32 {
            continue;
        }
        let weight = envelope[(offset + HALF_WAVE) as usize];
        let row = &mut rows[row as usize];
        *row = add_colors(*row, scale_color(color, weight));
    }
}
