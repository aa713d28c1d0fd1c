//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in one `GameState` aggregate.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{BrickGrid, BrickKind};
use crate::clamp_paddle_x;
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting on the start screen
    #[default]
    Idle,
    /// Active gameplay; the only phase in which the simulation advances
    Running,
    /// Game is paused
    Paused,
    /// Out of lives
    GameOver,
    /// Every brick destroyed
    GameClear,
}

impl GamePhase {
    /// Phases from which `start()` may begin a new round
    pub fn can_start(self) -> bool {
        matches!(self, GamePhase::Idle | GamePhase::GameOver | GamePhase::GameClear)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::GameClear)
    }
}

/// Paddle movement intent sampled at the start of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaddleDirection {
    Left,
    Right,
    #[default]
    None,
}

/// Something that happened during collision resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    BrickBroken {
        col: usize,
        row: usize,
        kind: BrickKind,
    },
    WallBounced,
    PaddleBounced,
    LifeLost,
    AllBricksCleared,
}

/// The ball. Velocity components keep a fixed magnitude; bounces only flip signs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::new(BALL_SPEED, -BALL_SPEED),
            radius: BALL_RADIUS,
        }
    }
}

impl Ball {
    /// Position the ball will occupy after this tick's move
    #[inline]
    pub fn next_pos(&self) -> Vec2 {
        self.pos + self.vel
    }
}

/// The player's paddle. Only x moves; it is pinned to the bottom of the field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: (FIELD_WIDTH - PADDLE_WIDTH) / 2.0,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
        }
    }
}

impl Paddle {
    /// Whether a horizontal coordinate lies over the paddle (edges included)
    pub fn covers(&self, x: f32) -> bool {
        x >= self.x && x <= self.x + self.width
    }

    /// Top edge in field coordinates
    pub fn top(&self, field_height: f32) -> f32 {
        field_height - self.height
    }
}

/// Ball and paddle, replaced together whenever a round starts or a life is lost
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BallPaddleState {
    pub ball: Ball,
    pub paddle: Paddle,
}

impl BallPaddleState {
    /// Serve position: ball centered above the bottom edge heading up with a
    /// random horizontal direction, paddle centered.
    pub fn reset<R: Rng>(&mut self, field_width: f32, field_height: f32, rng: &mut R) {
        let dx = if rng.random_bool(0.5) {
            BALL_SPEED
        } else {
            -BALL_SPEED
        };
        self.ball = Ball {
            pos: Vec2::new(field_width / 2.0, field_height - BALL_START_OFFSET_Y),
            vel: Vec2::new(dx, -BALL_SPEED),
            radius: BALL_RADIUS,
        };
        self.paddle = Paddle {
            x: (field_width - PADDLE_WIDTH) / 2.0,
            ..Paddle::default()
        };
    }

    /// Move the paddle one fixed step in the held direction, clamped to the field
    pub fn apply_paddle_input(&mut self, direction: PaddleDirection, field_width: f32) {
        let step = match direction {
            PaddleDirection::Left => -PADDLE_STEP,
            PaddleDirection::Right => PADDLE_STEP,
            PaddleDirection::None => 0.0,
        };
        self.paddle.x = clamp_paddle_x(self.paddle.x + step, field_width);
    }

    /// Center the paddle under the pointer, clamped to the field
    pub fn set_paddle_from_pointer(&mut self, pointer_x: f32, field_width: f32) {
        self.paddle.x = clamp_paddle_x(pointer_x - self.paddle.width / 2.0, field_width);
    }

    /// Commit this tick's move
    pub fn advance(&mut self) {
        self.ball.pos += self.ball.vel;
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Serve-direction RNG
    pub rng: Pcg32,
    pub field_width: f32,
    pub field_height: f32,
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u8,
    pub grid: BrickGrid,
    pub bodies: BallPaddleState,
    /// Ticks simulated in the current round
    pub time_ticks: u64,
}

impl GameState {
    /// Create an idle game on the default field with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_field(seed, FIELD_WIDTH, FIELD_HEIGHT)
    }

    pub fn with_field(seed: u64, field_width: f32, field_height: f32) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            field_width,
            field_height,
            phase: GamePhase::Idle,
            score: 0,
            lives: STARTING_LIVES,
            grid: BrickGrid::default(),
            bodies: BallPaddleState::default(),
            time_ticks: 0,
        };
        state.reset_round();
        state
    }

    /// Replace score, lives, grid and ball/paddle with fresh round values.
    /// Phase and RNG are left alone.
    pub fn reset_round(&mut self) {
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.time_ticks = 0;
        self.grid = BrickGrid::default();
        self.reset_ball_and_paddle();
    }

    pub fn reset_ball_and_paddle(&mut self) {
        let (w, h) = (self.field_width, self.field_height);
        self.bodies.reset(w, h, &mut self.rng);
    }

    #[inline]
    pub fn ball(&self) -> &Ball {
        &self.bodies.ball
    }

    #[inline]
    pub fn paddle(&self) -> &Paddle {
        &self.bodies.paddle
    }
}
