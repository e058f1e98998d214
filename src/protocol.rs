//! Wire protocol encoder
//!
//! Every frame starts with the [`CMD`] sentinel followed by an opcode byte.
//!
//! | Frame       | Layout                                    |
//! |-------------|-------------------------------------------|
//! | Row colors  | `CMD, 22, g0, r0, b0, g1, r1, b1, ...`    |
//! | Pong data   | `CMD, 24, paddle1_y, paddle2_y, x, y`     |
//! | Pong score  | `CMD, 25, score1, score2`                 |
//! | Mode select | `CMD, mode_code`                          |

use heapless::Vec;
use thiserror::Error;

use crate::{
    LED_ROWS,
    color::Rgb,
    engine::Frame,
    mode::AnimationMode,
    pong::PongState,
};

/// Frame sentinel
pub const CMD: u8 = 0xFF;

pub const OPCODE_ROWS: u8 = 22;
pub const OPCODE_PONG_DATA: u8 = 24;
/// Pong data opcode understood by older board firmware
pub const OPCODE_PONG_DATA_LEGACY: u8 = 23;
pub const OPCODE_PONG_SCORE: u8 = 25;

pub const ROW_FRAME_LEN: usize = 2 + 3 * LED_ROWS;
pub const PONG_DATA_FRAME_LEN: usize = 6;
pub const PONG_SCORE_FRAME_LEN: usize = 4;
pub const MODE_FRAME_LEN: usize = 2;

/// Largest packet a single frame produces
pub const MAX_PACKET_LEN: usize = ROW_FRAME_LEN;

/// Bytes sent to the transport in one frame
pub type Packet = Vec<u8, MAX_PACKET_LEN>;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("packet buffer full")]
    BufferFull,
}

/// Protocol options that differ between board firmware versions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolConfig {
    pub pong_data_opcode: u8,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            pong_data_opcode: OPCODE_PONG_DATA,
        }
    }
}

/// Serializes engine output into wire frames
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    config: ProtocolConfig,
}

impl Encoder {
    pub const fn new(config: ProtocolConfig) -> Self {
        Self { config }
    }

    /// Encode a rendered frame; in pong, a pending score precedes the data
    pub fn encode_frame(&self, frame: &Frame<'_>, packet: &mut Packet) -> Result<(), ProtocolError> {
        match frame {
            Frame::Rows(rows) => self.encode_rows(rows.as_slice(), packet),
            Frame::Pong {
                state,
                score_changed,
            } => {
                if *score_changed {
                    self.encode_pong_score(state, packet)?;
                }
                self.encode_pong_data(state, packet)
            }
        }
    }

    /// One `(g, r, b)` triple per row
    pub fn encode_rows(&self, rows: &[Rgb], packet: &mut Packet) -> Result<(), ProtocolError> {
        push(packet, &[CMD, OPCODE_ROWS])?;
        for row in rows {
            push(packet, &[row.g, row.r, row.b])?;
        }
        Ok(())
    }

    /// Paddle and ball positions, each truncated to a byte
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn encode_pong_data(&self, state: &PongState, packet: &mut Packet) -> Result<(), ProtocolError> {
        push(
            packet,
            &[
                CMD,
                self.config.pong_data_opcode,
                state.paddle1.y as u8,
                state.paddle2.y as u8,
                state.ball.x as u8,
                state.ball.y as u8,
            ],
        )
    }

    pub fn encode_pong_score(&self, state: &PongState, packet: &mut Packet) -> Result<(), ProtocolError> {
        let (one, two) = state.scores();
        push(packet, &[CMD, OPCODE_PONG_SCORE, one, two])
    }

    /// Select a board-side preset
    pub fn encode_mode_select(&self, mode: AnimationMode, packet: &mut Packet) -> Result<(), ProtocolError> {
        push(packet, &[CMD, mode.code()])
    }
}

fn push(packet: &mut Packet, bytes: &[u8]) -> Result<(), ProtocolError> {
    packet
        .extend_from_slice(bytes)
        .map_err(|()| ProtocolError::BufferFull)
}
