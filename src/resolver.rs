//! Color resolver
//!
//! Maps the selected [`ColorMode`] to the base color of a frame. Solid modes
//! are a palette lookup. Multi-segment modes own a segment index and either
//! step it on audio transients (in [`AnimationMode::Solid`]) or cross-fade
//! through their palette on a fixed period (every other mode).

use core::f32::consts::PI;

use embassy_time::Instant;

use crate::{
    color::{Hsv, Rgb, blend_colors, hsv2rgb, rgb_from_u32},
    lut::SineLut,
    math8::{elapsed_ms, unit8},
    mode::AnimationMode,
};

/// Full cycle through a multi-segment palette
pub const COLOR_PERIOD_MS: u64 = 6_000;

/// Audio level above which a segment step fires
pub const SEGMENT_THRESHOLD: f32 = 0.1;

/// Hue distance between rainbow segments
const RAINBOW_HUE_STEP: f32 = 120.0;
const RAINBOW_SEGMENTS: u8 = 3;

#[allow(clippy::unreadable_literal)]
const RED: Rgb = rgb_from_u32(0xFF0000);
#[allow(clippy::unreadable_literal)]
const ORANGE: Rgb = rgb_from_u32(0xFF5000);
#[allow(clippy::unreadable_literal)]
const YELLOW: Rgb = rgb_from_u32(0xFFB400);
#[allow(clippy::unreadable_literal)]
const GREEN: Rgb = rgb_from_u32(0x00FF00);
#[allow(clippy::unreadable_literal)]
const BLUE: Rgb = rgb_from_u32(0x0000FF);
#[allow(clippy::unreadable_literal)]
const PURPLE: Rgb = rgb_from_u32(0xA000FF);
#[allow(clippy::unreadable_literal)]
const WHITE: Rgb = rgb_from_u32(0xFFFFFF);

const RED_BLUE_PALETTE: [Rgb; 2] = [RED, BLUE];
const GREEN_BLUE_PALETTE: [Rgb; 2] = [GREEN, BLUE];

const COLOR_NAME_RAINBOW: &str = "rainbow";
const COLOR_NAME_RED: &str = "red";
const COLOR_NAME_ORANGE: &str = "orange";
const COLOR_NAME_YELLOW: &str = "yellow";
const COLOR_NAME_GREEN: &str = "green";
const COLOR_NAME_BLUE: &str = "blue";
const COLOR_NAME_PURPLE: &str = "purple";
const COLOR_NAME_WHITE: &str = "white";
const COLOR_NAME_RED_BLUE: &str = "red_blue";
const COLOR_NAME_GREEN_BLUE: &str = "green_blue";

/// Selectable palette
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum ColorMode {
    #[default]
    Rainbow = 0,
    Red = 1,
    Orange = 2,
    Yellow = 3,
    Green = 4,
    Blue = 5,
    Purple = 6,
    White = 7,
    RedBlue = 8,
    GreenBlue = 9,
}

impl ColorMode {
    /// All modes in selection order
    pub const ALL: [Self; 10] = [
        Self::Rainbow,
        Self::Red,
        Self::Orange,
        Self::Yellow,
        Self::Green,
        Self::Blue,
        Self::Purple,
        Self::White,
        Self::RedBlue,
        Self::GreenBlue,
    ];

    pub fn from_raw(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value)).copied()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rainbow => COLOR_NAME_RAINBOW,
            Self::Red => COLOR_NAME_RED,
            Self::Orange => COLOR_NAME_ORANGE,
            Self::Yellow => COLOR_NAME_YELLOW,
            Self::Green => COLOR_NAME_GREEN,
            Self::Blue => COLOR_NAME_BLUE,
            Self::Purple => COLOR_NAME_PURPLE,
            Self::White => COLOR_NAME_WHITE,
            Self::RedBlue => COLOR_NAME_RED_BLUE,
            Self::GreenBlue => COLOR_NAME_GREEN_BLUE,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.as_str() == s)
    }

    /// Constant color of a single-color mode
    pub const fn solid_color(self) -> Option<Rgb> {
        match self {
            Self::Red => Some(RED),
            Self::Orange => Some(ORANGE),
            Self::Yellow => Some(YELLOW),
            Self::Green => Some(GREEN),
            Self::Blue => Some(BLUE),
            Self::Purple => Some(PURPLE),
            Self::White => Some(WHITE),
            Self::Rainbow | Self::RedBlue | Self::GreenBlue => None,
        }
    }

    /// Number of segments in the palette cycle (1 for solid modes)
    pub const fn segments(self) -> u8 {
        match self {
            Self::Rainbow => RAINBOW_SEGMENTS,
            Self::RedBlue | Self::GreenBlue => 2,
            _ => 1,
        }
    }

    pub const fn is_multi_segment(self) -> bool {
        self.segments() > 1
    }

    /// Color of segment `index`, wrapping over the palette
    pub fn segment_color(self, index: u8) -> Rgb {
        let index = index % self.segments();
        match self {
            Self::Rainbow => rainbow_color(f32::from(index)),
            Self::RedBlue => RED_BLUE_PALETTE[usize::from(index)],
            Self::GreenBlue => GREEN_BLUE_PALETTE[usize::from(index)],
            solid => solid.solid_color().unwrap_or(WHITE),
        }
    }
}

/// Full-saturation rainbow color at a fractional segment position
fn rainbow_color(position: f32) -> Rgb {
    hsv2rgb(Hsv::new(position * RAINBOW_HUE_STEP, 1.0, 1.0))
}

/// Edge-trigger latch for audio-driven segment steps
///
/// A step fires once when the level rises above the threshold while armed,
/// and the latch re-arms only after the level falls back to or below it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SegmentLatch {
    #[default]
    Armed,
    Fired,
}

impl SegmentLatch {
    /// Latch state matching a level observed without a preceding dip
    ///
    /// A level already above the threshold counts as an excursion in
    /// progress, so it does not fire until it has dropped back first.
    pub fn seeded(level: f32) -> Self {
        if level > SEGMENT_THRESHOLD {
            Self::Fired
        } else {
            Self::Armed
        }
    }

    /// Feed an audio level; returns true when a step should fire
    pub fn update(&mut self, level: f32) -> bool {
        match (*self, level > SEGMENT_THRESHOLD) {
            (Self::Armed, true) => {
                *self = Self::Fired;
                true
            }
            (Self::Fired, false) => {
                *self = Self::Armed;
                false
            }
            _ => false,
        }
    }
}

/// Resolves the base color of each frame
#[derive(Debug, Clone)]
pub struct ColorResolver {
    mode: ColorMode,
    segment: u8,
    segment_start: Instant,
    latch: SegmentLatch,
}

impl ColorResolver {
    /// Start at segment 0; `audio_level` is the level current at `now`
    pub fn new(mode: ColorMode, now: Instant, audio_level: f32) -> Self {
        Self {
            mode,
            segment: 0,
            segment_start: now,
            latch: SegmentLatch::seeded(audio_level),
        }
    }

    pub const fn mode(&self) -> ColorMode {
        self.mode
    }

    pub const fn segment(&self) -> u8 {
        self.segment
    }

    pub const fn latch(&self) -> SegmentLatch {
        self.latch
    }

    /// Select a palette and restart its segment cycle
    pub fn set_mode(&mut self, mode: ColorMode, now: Instant, audio_level: f32) {
        *self = Self::new(mode, now, audio_level);
    }

    /// Length of one cross-fade between neighbouring segments
    pub const fn sub_period_ms(&self) -> u64 {
        COLOR_PERIOD_MS / self.mode.segments() as u64
    }

    /// Compute the base color for the frame at `now`
    pub fn resolve(
        &mut self,
        now: Instant,
        animation: AnimationMode,
        audio_level: f32,
        lut: &SineLut,
    ) -> Rgb {
        if let Some(color) = self.mode.solid_color() {
            return color;
        }

        if animation == AnimationMode::Solid {
            if self.latch.update(audio_level) {
                self.advance(now);
            }
            return self.mode.segment_color(self.segment);
        }

        self.cross_fade(now, lut)
    }

    #[allow(clippy::cast_precision_loss)]
    fn cross_fade(&mut self, now: Instant, lut: &SineLut) -> Rgb {
        let sub_period = self.sub_period_ms();
        if elapsed_ms(self.segment_start, now) >= sub_period {
            self.advance(now);
        }

        let progress = elapsed_ms(self.segment_start, now) as f32 / sub_period as f32;
        let ramp = (1.0 - lut.cos(progress * PI)) / 2.0;

        match self.mode {
            ColorMode::Rainbow => rainbow_color(f32::from(self.segment) + ramp),
            mode => blend_colors(
                mode.segment_color(self.segment),
                mode.segment_color(self.segment.wrapping_add(1)),
                unit8(ramp),
            ),
        }
    }

    fn advance(&mut self, now: Instant) {
        self.segment = (self.segment + 1) % self.mode.segments();
        self.segment_start = now;
    }
}
