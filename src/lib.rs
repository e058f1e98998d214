#![no_std]

pub mod audio;
pub mod channel;
pub mod color;
pub mod effect;
pub mod engine;
pub mod frame_scheduler;
pub mod input;
pub mod lut;
pub mod math8;
pub mod mode;
pub mod pong;
pub mod protocol;
pub mod resolver;
pub mod transport;
pub mod wave;

/// Logical rows in a row-color frame; each maps to two physical rows
pub const LED_ROWS: usize = 32;

/// Physical rows of the wall, the vertical extent of the pong board
pub const FULL_ROWS: usize = 2 * LED_ROWS;

pub use audio::{AudioLevel, AudioSampleSource};
pub use channel::{KeyChannel, KeyReceiver, KeySender};
pub use engine::{Engine, EngineConfig, Frame, InputEffects};
pub use frame_scheduler::{FrameResult, FrameScheduler, LinkState, LinkStats, OutputVariant, SchedulerConfig};
pub use input::{Command, InputSource, KeyEvent, Keymap};
pub use lut::SineLut;
pub use mode::AnimationMode;
pub use pong::{PongSimulator, PongState};
pub use protocol::{Encoder, Packet, ProtocolConfig, ProtocolError};
pub use resolver::{ColorMode, ColorResolver};
pub use transport::{Transport, TransportError};
pub use wave::{Direction, RowBuffer, WaveSimulator};

pub use color::{Hsv, Rgb};
pub use embassy_time::{Duration, Instant};
