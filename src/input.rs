//! Input processing module
//!
//! Turns raw key events into engine [`Command`]s through a configurable
//! [`Keymap`].

use crate::{
    pong::{PaddleMove, Player},
    resolver::ColorMode,
    wave::Direction,
};

/// Bit marking a release in the key-forwarder wire encoding
const RELEASE_BIT: u8 = 0x80;

/// Number of distinct key codes
pub const NUM_KEYS: usize = 128;

/// Key codes of the default keymap (virtual-key numbering)
pub mod keys {
    pub const SPACE: u8 = 0x20;
    pub const UP: u8 = 0x26;
    pub const DOWN: u8 = 0x28;
    pub const NUMPAD_ADD: u8 = 0x6B;
    pub const NUMPAD_SUBTRACT: u8 = 0x6D;
    pub const F5: u8 = 0x74;
}

/// A single key transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// Stable key identifier in `1..128`
    pub code: u8,
    pub pressed: bool,
}

impl KeyEvent {
    pub const fn press(code: u8) -> Self {
        Self {
            code,
            pressed: true,
        }
    }

    pub const fn release(code: u8) -> Self {
        Self {
            code,
            pressed: false,
        }
    }

    /// Decode a key-forwarder byte: `code` on press, `code + 128` on release
    pub const fn from_wire(byte: u8) -> Option<Self> {
        let code = byte & !RELEASE_BIT;
        if code == 0 {
            return None;
        }
        Some(Self {
            code,
            pressed: byte & RELEASE_BIT == 0,
        })
    }

    pub const fn to_wire(self) -> u8 {
        if self.pressed {
            self.code
        } else {
            self.code | RELEASE_BIT
        }
    }
}

/// Source of key events, polled once per frame
pub trait InputSource {
    /// Next pending event, `None` once drained
    fn poll(&mut self) -> Option<KeyEvent>;
}

/// Discrete command for the engine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    SelectColor(ColorMode),
    ToggleSolid,
    /// Key-down of the momentary strobe key
    StrobeOn,
    /// Key-up of the momentary strobe key
    StrobeOff,
    StartFade,
    SpawnWave(Direction),
    ToggleRainbowSweep,
    ToggleAlternating,
    TogglePong,
    Paddle {
        player: Player,
        movement: PaddleMove,
        held: bool,
    },
    BrightnessUp,
    BrightnessDown,
    /// Recycle the transport handle
    Reconnect,
}

/// Key bindings
#[derive(Debug, Clone)]
pub struct Keymap {
    /// Keys selecting each [`ColorMode`], in [`ColorMode::ALL`] order
    pub colors: [u8; 10],
    pub solid: u8,
    pub strobe: u8,
    pub fade: u8,
    pub wave_up: u8,
    pub wave_down: u8,
    pub rainbow_sweep: u8,
    pub alternating: u8,
    pub pong: u8,
    pub paddle_one_up: u8,
    pub paddle_one_down: u8,
    pub paddle_two_up: u8,
    pub paddle_two_down: u8,
    pub brightness_up: u8,
    pub brightness_down: u8,
    pub reconnect: u8,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            colors: *b"1234567890",
            solid: b'Q',
            strobe: keys::SPACE,
            fade: b'F',
            wave_up: keys::UP,
            wave_down: keys::DOWN,
            rainbow_sweep: b'R',
            alternating: b'T',
            pong: b'P',
            paddle_one_up: b'W',
            paddle_one_down: b'S',
            paddle_two_up: b'I',
            paddle_two_down: b'K',
            brightness_up: keys::NUMPAD_ADD,
            brightness_down: keys::NUMPAD_SUBTRACT,
            reconnect: keys::F5,
        }
    }
}

impl Keymap {
    /// Map a key transition to a command, if the key is bound
    ///
    /// Paddle keys and the strobe key report both edges, every other binding
    /// fires on key-down only.
    pub fn command(&self, event: KeyEvent) -> Option<Command> {
        let code = event.code;
        let held = event.pressed;

        let paddle = [
            (self.paddle_one_up, Player::One, PaddleMove::Up),
            (self.paddle_one_down, Player::One, PaddleMove::Down),
            (self.paddle_two_up, Player::Two, PaddleMove::Up),
            (self.paddle_two_down, Player::Two, PaddleMove::Down),
        ];
        if let Some(&(_, player, movement)) = paddle.iter().find(|(key, ..)| *key == code) {
            return Some(Command::Paddle {
                player,
                movement,
                held,
            });
        }

        if code == self.strobe {
            return Some(if held {
                Command::StrobeOn
            } else {
                Command::StrobeOff
            });
        }

        if !held {
            return None;
        }

        if let Some(index) = self.colors.iter().position(|key| *key == code) {
            return ColorMode::ALL.get(index).copied().map(Command::SelectColor);
        }

        Some(match code {
            c if c == self.solid => Command::ToggleSolid,
            c if c == self.fade => Command::StartFade,
            c if c == self.wave_up => Command::SpawnWave(Direction::Up),
            c if c == self.wave_down => Command::SpawnWave(Direction::Down),
            c if c == self.rainbow_sweep => Command::ToggleRainbowSweep,
            c if c == self.alternating => Command::ToggleAlternating,
            c if c == self.pong => Command::TogglePong,
            c if c == self.brightness_up => Command::BrightnessUp,
            c if c == self.brightness_down => Command::BrightnessDown,
            c if c == self.reconnect => Command::Reconnect,
            _ => return None,
        })
    }
}

/// Tracks held keys and converts edges into commands
#[derive(Debug, Clone)]
pub struct InputProcessor {
    keymap: Keymap,
    held: [bool; NUM_KEYS],
}

impl InputProcessor {
    pub const fn new(keymap: Keymap) -> Self {
        Self {
            keymap,
            held: [false; NUM_KEYS],
        }
    }

    pub const fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn is_held(&self, code: u8) -> bool {
        self.held.get(usize::from(code)).copied().unwrap_or(false)
    }

    /// Handle one event; repeated presses and stray releases are dropped
    pub fn process(&mut self, event: KeyEvent) -> Option<Command> {
        let held = self.held.get_mut(usize::from(event.code))?;
        if event.code == 0 || *held == event.pressed {
            return None;
        }
        *held = event.pressed;
        self.keymap.command(event)
    }
}
