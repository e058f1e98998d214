use embassy_time::Instant;

#[cfg(feature = "log")]
use log::debug;

use crate::audio::AudioLevel;
use crate::color::{BLACK, Rgb, scale_color};
use crate::effect::{AlternatingEffect, Effect, RainbowSweepEffect, fade_level};
use crate::input::{Command, InputProcessor, InputSource, KeyEvent, Keymap};
use crate::lut::SineLut;
use crate::mode::AnimationMode;
use crate::pong::{PaddleInput, PongSimulator, PongState};
use crate::resolver::{ColorMode, ColorResolver};
use crate::wave::{RowBuffer, WaveSimulator};
use crate::LED_ROWS;

/// Brightness change per key press
pub const BRIGHTNESS_STEP: f32 = 0.05;

/// Upper bound of the brightness multiplier
pub const MAX_BRIGHTNESS: f32 = 1.5;

/// Configuration for the engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub keymap: Keymap,
    /// Initial brightness multiplier, clamped to `[0, MAX_BRIGHTNESS]`
    pub brightness: f32,
    pub color: ColorMode,
    pub mode: AnimationMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            keymap: Keymap::default(),
            brightness: 1.0,
            color: ColorMode::default(),
            mode: AnimationMode::default(),
        }
    }
}

/// Side effects of input processing the frame loop has to apply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputEffects {
    /// A reconnect of the transport was requested
    pub reconnect: bool,
    /// Number of commands applied to the engine
    pub applied: usize,
}

/// Rendered output of one frame
#[derive(Debug)]
pub enum Frame<'a> {
    /// One color per logical row
    Rows(&'a RowBuffer),
    /// Game state for the board-side pong renderer
    Pong {
        state: &'a PongState,
        score_changed: bool,
    },
}

/// Engine - owns all animation and game state
pub struct Engine {
    lut: SineLut,
    input: InputProcessor,

    // Mode state
    mode: AnimationMode,
    brightness: f32,
    audio: AudioLevel,
    fade_start: Instant,
    score_pending: bool,

    // Simulators
    resolver: ColorResolver,
    waves: WaveSimulator,
    pong: PongSimulator,
    paddles: PaddleInput,
    sweep: RainbowSweepEffect,
    alternating: AlternatingEffect,

    rows: RowBuffer,
}

impl Engine {
    /// Build the sine table and all simulators
    pub fn new(config: &EngineConfig, now: Instant) -> Self {
        let lut = SineLut::build();
        let waves = WaveSimulator::new(&lut);
        let audio = AudioLevel::new();
        let mut engine = Self {
            input: InputProcessor::new(config.keymap.clone()),
            mode: AnimationMode::Off,
            brightness: config.brightness.clamp(0.0, MAX_BRIGHTNESS),
            audio,
            fade_start: now,
            score_pending: false,
            resolver: ColorResolver::new(config.color, now, audio.get()),
            waves,
            pong: PongSimulator::new(now),
            paddles: PaddleInput::default(),
            sweep: RainbowSweepEffect::default(),
            alternating: AlternatingEffect::default(),
            rows: [BLACK; LED_ROWS],
            lut,
        };
        engine.enter(config.mode, now);
        engine
    }

    pub const fn mode(&self) -> AnimationMode {
        self.mode
    }

    pub const fn brightness(&self) -> f32 {
        self.brightness
    }

    pub const fn audio_level(&self) -> f32 {
        self.audio.get()
    }

    pub const fn lut(&self) -> &SineLut {
        &self.lut
    }

    pub const fn resolver(&self) -> &ColorResolver {
        &self.resolver
    }

    pub const fn waves(&self) -> &WaveSimulator {
        &self.waves
    }

    pub const fn pong(&self) -> &PongSimulator {
        &self.pong
    }

    /// Drain `source` and apply every resulting command
    pub fn process_input<S: InputSource>(&mut self, source: &mut S, now: Instant) -> InputEffects {
        let mut effects = InputEffects::default();
        while let Some(event) = source.poll() {
            match self.handle_key(event, now) {
                Some(Command::Reconnect) => effects.reconnect = true,
                Some(_) => effects.applied += 1,
                None => {}
            }
        }
        effects
    }

    /// Apply a single key event, returning the command it mapped to
    pub fn handle_key(&mut self, event: KeyEvent, now: Instant) -> Option<Command> {
        let command = self.input.process(event)?;
        self.apply(command, now);
        Some(command)
    }

    /// Fold a raw audio sample into the smoothed level
    pub fn feed_audio(&mut self, sample: u8) {
        self.audio.update(sample);
    }

    /// Apply a command to the state machine
    pub fn apply(&mut self, command: Command, now: Instant) {
        match command {
            Command::SelectColor(color) => {
                self.resolver.set_mode(color, now, self.audio.get());
            }
            Command::ToggleSolid => self.toggle(AnimationMode::Solid, now),
            Command::StrobeOn => self.enter(AnimationMode::Strobe, now),
            Command::StrobeOff => {
                if self.mode == AnimationMode::Strobe {
                    self.enter(AnimationMode::Off, now);
                }
            }
            Command::StartFade => self.enter(AnimationMode::Fade, now),
            Command::SpawnWave(direction) => {
                self.waves.spawn(direction, now);
                self.enter(AnimationMode::Wave, now);
            }
            Command::ToggleRainbowSweep => self.toggle(AnimationMode::RainbowSweep, now),
            Command::ToggleAlternating => self.toggle(AnimationMode::Alternating, now),
            Command::TogglePong => self.toggle(AnimationMode::Pong, now),
            Command::Paddle {
                player,
                movement,
                held,
            } => self.paddles.set(player, movement, held),
            Command::BrightnessUp => self.adjust_brightness(BRIGHTNESS_STEP),
            Command::BrightnessDown => self.adjust_brightness(-BRIGHTNESS_STEP),
            // Handled by the frame loop
            Command::Reconnect => {}
        }
    }

    fn toggle(&mut self, mode: AnimationMode, now: Instant) {
        let next = if self.mode == mode {
            AnimationMode::Off
        } else {
            mode
        };
        self.enter(next, now);
    }

    /// Switch mode, running the entry action of the new one
    fn enter(&mut self, mode: AnimationMode, now: Instant) {
        match mode {
            AnimationMode::Fade => self.fade_start = now,
            AnimationMode::Pong => {
                self.pong.restart(now);
                self.score_pending = true;
            }
            _ => {}
        }
        #[cfg(feature = "log")]
        if mode != self.mode {
            debug!("[Engine] mode {} -> {}", self.mode.as_str(), mode.as_str());
        }
        self.mode = mode;
    }

    fn adjust_brightness(&mut self, step: f32) {
        self.brightness = (self.brightness + step).clamp(0.0, MAX_BRIGHTNESS);
    }

    /// Process one frame
    ///
    /// Input must already be applied; the returned frame is complete.
    pub fn render(&mut self, now: Instant) -> Frame<'_> {
        let audio = if self.mode.is_audio_scaled() {
            self.audio.get()
        } else {
            1.0
        };
        let gain = self.brightness * audio;

        match self.mode {
            AnimationMode::Off => self.rows.fill(BLACK),
            AnimationMode::Solid | AnimationMode::Strobe => {
                let color = self.base_color(now);
                self.rows.fill(scale_color(color, gain));
            }
            AnimationMode::Fade => {
                let color = self.base_color(now);
                let level = fade_level(self.fade_start, now, &self.lut);
                self.rows.fill(scale_color(color, gain * level));
            }
            AnimationMode::Wave => {
                let color = scale_color(self.base_color(now), self.brightness);
                self.waves.render(now, color, &mut self.rows);
            }
            AnimationMode::RainbowSweep => {
                self.sweep.render(now, &mut self.rows, &self.lut);
                scale_rows(&mut self.rows, gain);
            }
            AnimationMode::Alternating => {
                self.alternating.render(now, &mut self.rows, &self.lut);
                scale_rows(&mut self.rows, gain);
            }
            AnimationMode::Pong => {
                let scored = self.pong.update(now, self.paddles, &self.lut);
                let score_changed = scored || core::mem::take(&mut self.score_pending);
                return Frame::Pong {
                    state: self.pong.state(),
                    score_changed,
                };
            }
        }

        Frame::Rows(&self.rows)
    }

    fn base_color(&mut self, now: Instant) -> Rgb {
        self.resolver
            .resolve(now, self.mode, self.audio.get(), &self.lut)
    }
}

fn scale_rows(rows: &mut RowBuffer, gain: f32) {
    for row in rows.iter_mut() {
        *row = scale_color(*row, gain);
    }
}
