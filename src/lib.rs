//! Brick Break - a single-level ball-and-paddle brick breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, ball/paddle, collisions, game state)
//! - `game`: Per-frame loop tying the simulation to its collaborators
//! - `input`: Held-key and pointer input sampled once per tick
//! - `renderer`: Frame tessellation and WebGPU rendering pipeline
//! - `audio`: Procedural tones keyed by game event
//! - `hud`: Page element changes per phase
//! - `settings`: User preferences

pub mod audio;
pub mod error;
pub mod game;
pub mod hud;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::Error;
pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Play field dimensions (canvas units, origin top-left, y down)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Paddle is pinned to the bottom edge of the field
    pub const PADDLE_WIDTH: f32 = 120.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    /// Horizontal paddle travel per tick while a direction key is held
    pub const PADDLE_STEP: f32 = 7.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.0;
    /// Magnitude of each velocity component; only its sign ever changes
    pub const BALL_SPEED: f32 = 4.0;
    /// Distance of the serve position above the bottom edge
    pub const BALL_START_OFFSET_Y: f32 = 50.0;

    /// Brick grid layout
    pub const BRICK_COLUMNS: usize = 8;
    pub const BRICK_ROWS: usize = 5;
    /// Rows with index below this are SPECIAL
    pub const SPECIAL_ROWS: usize = 2;
    pub const BRICK_WIDTH: f32 = 80.0;
    pub const BRICK_HEIGHT: f32 = 25.0;
    pub const BRICK_PADDING: f32 = 15.0;
    pub const BRICK_OFFSET_LEFT: f32 = 35.0;
    pub const BRICK_OFFSET_TOP: f32 = 40.0;

    /// Scoring
    pub const NORMAL_BRICK_SCORE: u32 = 10;
    pub const SPECIAL_BRICK_SCORE: u32 = 20;

    /// Lives at the start of a round
    pub const STARTING_LIVES: u8 = 3;
}

/// Clamp a paddle's left edge so the whole paddle stays inside the field
#[inline]
pub fn clamp_paddle_x(x: f32, field_width: f32) -> f32 {
    x.clamp(0.0, (field_width - consts::PADDLE_WIDTH).max(0.0))
}
