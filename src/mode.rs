//! Animation modes
//!
//! Exactly one mode is active engine-wide. Each mode carries a stable code
//! used by the preset (board-rendered) output variant.

const MODE_NAME_OFF: &str = "off";
const MODE_NAME_SOLID: &str = "solid";
const MODE_NAME_STROBE: &str = "strobe";
const MODE_NAME_FADE: &str = "fade";
const MODE_NAME_WAVE: &str = "wave";
const MODE_NAME_RAINBOW_SWEEP: &str = "rainbow_sweep";
const MODE_NAME_ALTERNATING: &str = "alternating";
const MODE_NAME_PONG: &str = "pong";

const MODE_CODE_OFF: u8 = 0;
const MODE_CODE_SOLID: u8 = 1;
const MODE_CODE_STROBE: u8 = 2;
const MODE_CODE_FADE: u8 = 3;
const MODE_CODE_WAVE: u8 = 4;
const MODE_CODE_RAINBOW_SWEEP: u8 = 5;
const MODE_CODE_ALTERNATING: u8 = 6;
const MODE_CODE_PONG: u8 = 7;

/// Render mode of the engine
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum AnimationMode {
    #[default]
    Off = MODE_CODE_OFF,
    Solid = MODE_CODE_SOLID,
    /// Momentary: active only while its key is held
    Strobe = MODE_CODE_STROBE,
    Fade = MODE_CODE_FADE,
    Wave = MODE_CODE_WAVE,
    RainbowSweep = MODE_CODE_RAINBOW_SWEEP,
    Alternating = MODE_CODE_ALTERNATING,
    Pong = MODE_CODE_PONG,
}

impl AnimationMode {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            MODE_CODE_OFF => Self::Off,
            MODE_CODE_SOLID => Self::Solid,
            MODE_CODE_STROBE => Self::Strobe,
            MODE_CODE_FADE => Self::Fade,
            MODE_CODE_WAVE => Self::Wave,
            MODE_CODE_RAINBOW_SWEEP => Self::RainbowSweep,
            MODE_CODE_ALTERNATING => Self::Alternating,
            MODE_CODE_PONG => Self::Pong,
            _ => return None,
        })
    }

    /// Code sent in a mode-select frame
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => MODE_NAME_OFF,
            Self::Solid => MODE_NAME_SOLID,
            Self::Strobe => MODE_NAME_STROBE,
            Self::Fade => MODE_NAME_FADE,
            Self::Wave => MODE_NAME_WAVE,
            Self::RainbowSweep => MODE_NAME_RAINBOW_SWEEP,
            Self::Alternating => MODE_NAME_ALTERNATING,
            Self::Pong => MODE_NAME_PONG,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            MODE_NAME_OFF => Some(Self::Off),
            MODE_NAME_SOLID => Some(Self::Solid),
            MODE_NAME_STROBE => Some(Self::Strobe),
            MODE_NAME_FADE => Some(Self::Fade),
            MODE_NAME_WAVE => Some(Self::Wave),
            MODE_NAME_RAINBOW_SWEEP => Some(Self::RainbowSweep),
            MODE_NAME_ALTERNATING => Some(Self::Alternating),
            MODE_NAME_PONG => Some(Self::Pong),
            _ => None,
        }
    }

    /// Whether the smoothed audio level multiplies the output
    pub const fn is_audio_scaled(self) -> bool {
        !matches!(self, Self::Wave | Self::Pong)
    }
}
