//! Floating point HSV model
//!
//! Hue is expressed in degrees, saturation and value in `[0, 1]`.

use crate::color::Rgb;

/// HSV color with continuous channels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    /// Hue in degrees, wrapped into `[0, 360)`
    pub hue: f32,
    /// Saturation in `[0, 1]`
    pub sat: f32,
    /// Value in `[0, 1]`
    pub val: f32,
}

impl Hsv {
    pub const fn new(hue: f32, sat: f32, val: f32) -> Self {
        Self { hue, sat, val }
    }
}

/// Convert HSV to RGB using the piecewise-linear sextant transform
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn hsv2rgb(hsv: Hsv) -> Rgb {
    let mut hue = libm::fmodf(hsv.hue, 360.0);
    if hue < 0.0 {
        hue += 360.0;
    }
    let sat = hsv.sat.clamp(0.0, 1.0);
    let val = hsv.val.clamp(0.0, 1.0);

    let c = val * sat;
    let sector = hue / 60.0;
    let x = c * (1.0 - libm::fabsf(libm::fmodf(sector, 2.0) - 1.0));
    let m = val - c;

    let (r, g, b) = match sector as u8 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let channel = |v: f32| ((v + m) * 255.0).clamp(0.0, 255.0) as u8;
    Rgb {
        r: channel(r),
        g: channel(g),
        b: channel(b),
    }
}
