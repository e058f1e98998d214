//! Two-player pong simulation
//!
//! The board is [`COLS`] wide and [`FULL_ROWS`] tall, player one defends the
//! left edge and player two the right one. Motion is integrated with forward
//! Euler over the elapsed microseconds of each frame, so a fast enough ball
//! can tunnel through a paddle.

use embassy_time::Instant;

use crate::{
    FULL_ROWS,
    color::{Rgb, rgb_from_u32},
    lut::SineLut,
};

/// Board width in columns
pub const COLS: usize = 32;

pub const PADDLE_HEIGHT: f32 = 12.0;
pub const PADDLE_WIDTH: f32 = 1.0;
pub const BALL_SIZE: f32 = 1.0;

/// Paddle speed in rows per microsecond (40 rows/s)
pub const PADDLE_SPEED: f32 = 40.0e-6;

/// Horizontal ball speed in columns per microsecond (20 cols/s)
pub const BALL_SPEED: f32 = 20.0e-6;

/// Largest outgoing angle after a paddle hit, in radians
pub const MAX_BALL_ANGLE: f32 = 0.9;

pub const POINTS_PER_GOAL: u8 = 4;

/// Scores above this clear both sides
pub const MAX_SCORE: u8 = 36;

#[allow(clippy::cast_precision_loss)]
const BOARD_WIDTH: f32 = COLS as f32;
#[allow(clippy::cast_precision_loss)]
const BOARD_HEIGHT: f32 = FULL_ROWS as f32;
const PADDLE_MAX_Y: f32 = BOARD_HEIGHT - PADDLE_HEIGHT;

#[allow(clippy::unreadable_literal)]
const PADDLE_ONE_COLOR: Rgb = rgb_from_u32(0xFF0000);
#[allow(clippy::unreadable_literal)]
const PADDLE_TWO_COLOR: Rgb = rgb_from_u32(0x0000FF);
#[allow(clippy::unreadable_literal)]
const BALL_COLOR: Rgb = rgb_from_u32(0xFFFFFF);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Player {
    One,
    Two,
}

/// Vertical paddle movement
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaddleMove {
    /// Towards row 0
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paddle {
    pub score: u8,
    /// Top row of the paddle, within `[0, FULL_ROWS - PADDLE_HEIGHT]`
    pub y: f32,
    pub color: Rgb,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    /// Columns per microsecond
    pub vx: f32,
    /// Rows per microsecond
    pub vy: f32,
    pub color: Rgb,
}

/// Full game state
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PongState {
    pub paddle1: Paddle,
    pub paddle2: Paddle,
    pub ball: Ball,
}

impl PongState {
    const fn new() -> Self {
        Self {
            paddle1: Paddle {
                score: 0,
                y: PADDLE_MAX_Y / 2.0,
                color: PADDLE_ONE_COLOR,
            },
            paddle2: Paddle {
                score: 0,
                y: PADDLE_MAX_Y / 2.0,
                color: PADDLE_TWO_COLOR,
            },
            ball: Ball {
                x: (BOARD_WIDTH - BALL_SIZE) / 2.0,
                y: (BOARD_HEIGHT - BALL_SIZE) / 2.0,
                vx: BALL_SPEED,
                vy: 0.0,
                color: BALL_COLOR,
            },
        }
    }

    pub const fn paddle(&self, player: Player) -> &Paddle {
        match player {
            Player::One => &self.paddle1,
            Player::Two => &self.paddle2,
        }
    }

    pub const fn scores(&self) -> (u8, u8) {
        (self.paddle1.score, self.paddle2.score)
    }
}

/// Keys currently held for each paddle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaddleInput {
    pub one_up: bool,
    pub one_down: bool,
    pub two_up: bool,
    pub two_down: bool,
}

impl PaddleInput {
    /// Record a press or release of a paddle key
    pub fn set(&mut self, player: Player, movement: PaddleMove, held: bool) {
        let key = match (player, movement) {
            (Player::One, PaddleMove::Up) => &mut self.one_up,
            (Player::One, PaddleMove::Down) => &mut self.one_down,
            (Player::Two, PaddleMove::Up) => &mut self.two_up,
            (Player::Two, PaddleMove::Down) => &mut self.two_down,
        };
        *key = held;
    }

    /// Net direction for a paddle: -1 up, 1 down, 0 idle or both held
    fn axis(up: bool, down: bool) -> f32 {
        match (up, down) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Angle leaving a paddle for a ball hitting it at `ball_center_y`
///
/// The offset from the paddle center is normalized by half the paddle height,
/// clamped to `[-1, 1]` and scaled by [`MAX_BALL_ANGLE`].
pub fn deflection_angle(ball_center_y: f32, paddle_y: f32) -> f32 {
    let paddle_center = paddle_y + PADDLE_HEIGHT / 2.0;
    let offset = (ball_center_y - paddle_center) / (PADDLE_HEIGHT / 2.0);
    offset.clamp(-1.0, 1.0) * MAX_BALL_ANGLE
}

/// Pong simulation driven by a microsecond clock
#[derive(Debug, Clone)]
pub struct PongSimulator {
    state: PongState,
    last_tick: Instant,
}

impl PongSimulator {
    pub const fn new(now: Instant) -> Self {
        Self {
            state: PongState::new(),
            last_tick: now,
        }
    }

    pub const fn state(&self) -> &PongState {
        &self.state
    }

    /// Start a fresh game: scores cleared, player one serving
    pub fn restart(&mut self, now: Instant) {
        self.state.paddle1.score = 0;
        self.state.paddle2.score = 0;
        self.reset(Player::One, now);
    }

    /// Serve: paddles and ball to the center, ball heading away from `server`
    pub fn reset(&mut self, server: Player, now: Instant) {
        let fresh = PongState::new();
        self.state.paddle1.y = fresh.paddle1.y;
        self.state.paddle2.y = fresh.paddle2.y;
        self.state.ball = Ball {
            vx: match server {
                Player::One => BALL_SPEED,
                Player::Two => -BALL_SPEED,
            },
            vy: 0.0,
            ..fresh.ball
        };
        self.last_tick = now;
    }

    /// Advance one frame; returns true when the score changed
    #[allow(clippy::cast_precision_loss)]
    pub fn update(&mut self, now: Instant, input: PaddleInput, lut: &SineLut) -> bool {
        let dt = now.as_micros().saturating_sub(self.last_tick.as_micros()) as f32;
        self.last_tick = now;

        self.move_paddles(input, dt);
        self.bounce_walls();
        self.bounce_paddles(lut);

        if let Some(scorer) = self.goal() {
            self.award(scorer, now);
            return true;
        }

        let ball = &mut self.state.ball;
        ball.x += ball.vx * dt;
        ball.y += ball.vy * dt;
        false
    }

    fn move_paddles(&mut self, input: PaddleInput, dt: f32) {
        let step = PADDLE_SPEED * dt;
        let one = PaddleInput::axis(input.one_up, input.one_down);
        let two = PaddleInput::axis(input.two_up, input.two_down);
        self.state.paddle1.y = (self.state.paddle1.y + one * step).clamp(0.0, PADDLE_MAX_Y);
        self.state.paddle2.y = (self.state.paddle2.y + two * step).clamp(0.0, PADDLE_MAX_Y);
    }

    fn bounce_walls(&mut self) {
        let ball = &mut self.state.ball;
        if ball.y <= 0.0 {
            ball.y = 0.0;
            ball.vy = libm::fabsf(ball.vy);
        } else if ball.y >= BOARD_HEIGHT - BALL_SIZE {
            ball.y = BOARD_HEIGHT - BALL_SIZE;
            ball.vy = -libm::fabsf(ball.vy);
        }
    }

    fn bounce_paddles(&mut self, lut: &SineLut) {
        let ball = self.state.ball;
        let hit = if ball.vx < 0.0 && (0.0..=PADDLE_WIDTH).contains(&ball.x) {
            Some((Player::One, self.state.paddle1.y))
        } else if ball.vx > 0.0
            && (BOARD_WIDTH - PADDLE_WIDTH - BALL_SIZE..=BOARD_WIDTH - BALL_SIZE)
                .contains(&ball.x)
        {
            Some((Player::Two, self.state.paddle2.y))
        } else {
            None
        };

        let Some((player, paddle_y)) = hit else {
            return;
        };
        if ball.y + BALL_SIZE <= paddle_y || ball.y >= paddle_y + PADDLE_HEIGHT {
            return;
        }

        let theta = deflection_angle(ball.y + BALL_SIZE / 2.0, paddle_y);
        let away = match player {
            Player::One => 1.0,
            Player::Two => -1.0,
        };
        let ball = &mut self.state.ball;
        ball.vx = away * BALL_SPEED;
        ball.vy = BALL_SPEED * lut.sin(theta) / lut.cos(theta);
    }

    /// Player that scores if the ball has fully left the board
    fn goal(&self) -> Option<Player> {
        let x = self.state.ball.x;
        if x < 0.0 {
            Some(Player::Two)
        } else if x > BOARD_WIDTH - BALL_SIZE {
            Some(Player::One)
        } else {
            None
        }
    }

    fn award(&mut self, scorer: Player, now: Instant) {
        let (winner, server) = match scorer {
            Player::One => (&mut self.state.paddle1, Player::Two),
            Player::Two => (&mut self.state.paddle2, Player::One),
        };
        winner.score = winner.score.saturating_add(POINTS_PER_GOAL);
        self.reset(server, now);

        let (one, two) = self.state.scores();
        if one > MAX_SCORE || two > MAX_SCORE {
            self.state.paddle1.score = 0;
            self.state.paddle2.score = 0;
        }
    }
}
