//! Frame loop
//!
//! Ties the engine to its collaborators. Each tick applies input, reads at
//! most one audio sample, renders, encodes and writes exactly one packet.
//! The caller owns the clock and is responsible for sleeping between frames.

use embassy_time::{Duration, Instant};

#[cfg(feature = "log")]
use log::{info, warn};

use crate::audio::AudioSampleSource;
use crate::engine::Engine;
use crate::input::InputSource;
use crate::mode::AnimationMode;
use crate::protocol::{Encoder, Packet, ProtocolConfig};
use crate::transport::{Transport, TransportError};

/// Default pause after each pong frame, bounds the game's frame rate
pub const DEFAULT_PONG_FRAME_DELAY: Duration = Duration::from_millis(5);

/// What the board expects to receive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputVariant {
    /// The engine renders every frame and streams it
    #[default]
    Streaming,
    /// The board renders presets; only mode changes are sent
    Preset,
}

/// Configuration for the frame loop
#[derive(Debug, Clone, Copy)]
pub struct SchedulerConfig {
    pub output: OutputVariant,
    pub protocol: ProtocolConfig,
    pub pong_frame_delay: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            output: OutputVariant::default(),
            protocol: ProtocolConfig::default(),
            pong_frame_delay: DEFAULT_PONG_FRAME_DELAY,
        }
    }
}

/// Transport link state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkState {
    #[default]
    Connected,
    /// Writes are skipped until a reconnect succeeds
    Unavailable,
}

/// Delivery counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStats {
    /// Packets written completely
    pub frames_sent: u32,
    /// Packets cut short by a write timeout
    pub partial_writes: u32,
    /// Packets not written because the link was unavailable
    pub skipped_frames: u32,
    /// Frames that did not fit the packet buffer
    pub encode_errors: u32,
}

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameResult {
    /// Bytes handed to the transport this frame
    pub bytes_written: usize,
    /// How long to wait before the next frame
    pub sleep_duration: Duration,
}

/// Frame scheduler that drives the engine without async
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(engine, keys, audio, serial, &config);
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct FrameScheduler<I: InputSource, A: AudioSampleSource, T: Transport> {
    engine: Engine,
    input: I,
    audio: A,
    transport: T,
    encoder: Encoder,
    config: SchedulerConfig,
    link: LinkState,
    stats: LinkStats,
    /// Last mode fully written in preset output
    announced: Option<AnimationMode>,
}

impl<I: InputSource, A: AudioSampleSource, T: Transport> FrameScheduler<I, A, T> {
    pub fn new(engine: Engine, input: I, audio: A, transport: T, config: &SchedulerConfig) -> Self {
        Self {
            engine,
            input,
            audio,
            transport,
            encoder: Encoder::new(config.protocol),
            config: *config,
            link: LinkState::Connected,
            stats: LinkStats::default(),
            announced: None,
        }
    }

    /// Process one frame and return timing information.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        let effects = self.engine.process_input(&mut self.input, now);
        if effects.reconnect {
            self.reconnect();
        }

        if let Some(sample) = self.audio.read_sample() {
            self.engine.feed_audio(sample);
        }

        let mut packet = Packet::new();
        let mut announcing = None;
        let encoded = match self.config.output {
            OutputVariant::Streaming => {
                let frame = self.engine.render(now);
                self.encoder.encode_frame(&frame, &mut packet)
            }
            OutputVariant::Preset => match self.pending_announcement() {
                Some(mode) => {
                    announcing = Some(mode);
                    self.encoder.encode_mode_select(mode, &mut packet)
                }
                None => Ok(()),
            },
        };

        let bytes_written = match encoded {
            Ok(()) if !packet.is_empty() => self.send(&packet),
            Ok(()) => 0,
            Err(_err) => {
                self.stats.encode_errors += 1;
                #[cfg(feature = "log")]
                warn!("[FrameScheduler] dropping frame: {}", _err);
                0
            }
        };

        // A mode select that did not fully arrive is sent again next tick
        if announcing.is_some() && bytes_written == packet.len() {
            self.announced = announcing;
        }

        let paced = self.config.output == OutputVariant::Streaming
            && self.engine.mode() == AnimationMode::Pong;
        FrameResult {
            bytes_written,
            sleep_duration: if paced {
                self.config.pong_frame_delay
            } else {
                Duration::from_ticks(0)
            },
        }
    }

    /// Mode not yet fully written to the board
    fn pending_announcement(&self) -> Option<AnimationMode> {
        let mode = self.engine.mode();
        (self.announced != Some(mode)).then_some(mode)
    }

    /// Write a complete packet, tracking partial writes and link loss
    fn send(&mut self, packet: &[u8]) -> usize {
        if self.link == LinkState::Unavailable {
            self.stats.skipped_frames += 1;
            return 0;
        }

        match self.transport.write(packet) {
            Ok(written) if written >= packet.len() => {
                self.stats.frames_sent += 1;
                written
            }
            Ok(written) => {
                self.stats.partial_writes += 1;
                #[cfg(feature = "log")]
                warn!(
                    "[FrameScheduler] partial write: {} of {} bytes",
                    written,
                    packet.len()
                );
                written
            }
            Err(TransportError::Timeout) => {
                self.stats.partial_writes += 1;
                #[cfg(feature = "log")]
                warn!("[FrameScheduler] write timed out, 0 of {} bytes", packet.len());
                0
            }
            Err(TransportError::Unavailable) => {
                self.link = LinkState::Unavailable;
                self.stats.skipped_frames += 1;
                #[cfg(feature = "log")]
                warn!("[FrameScheduler] transport unavailable, output paused until reconnect");
                0
            }
        }
    }

    fn reconnect(&mut self) {
        match self.transport.reconnect() {
            Ok(()) => {
                self.link = LinkState::Connected;
                self.announced = None;
                #[cfg(feature = "log")]
                info!("[FrameScheduler] transport reconnected");
            }
            Err(_err) => {
                self.link = LinkState::Unavailable;
                #[cfg(feature = "log")]
                warn!("[FrameScheduler] reconnect failed: {}", _err);
            }
        }
    }

    pub const fn link_state(&self) -> LinkState {
        self.link
    }

    pub const fn stats(&self) -> LinkStats {
        self.stats
    }

    pub const fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}
