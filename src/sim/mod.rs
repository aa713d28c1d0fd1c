//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, no time deltas
//! - Seeded RNG only
//! - Stable iteration order (column-major brick grid)
//! - No rendering or platform dependencies

pub mod collision;
pub mod grid;
pub mod machine;
pub mod state;
pub mod tick;

pub use collision::{VerticalContact, first_brick_hit, hits_side_wall, resolve, vertical_contact};
pub use grid::{Brick, BrickGrid, BrickKind, BrickStatus};
pub use machine::{Cue, apply_event, start, toggle_pause};
pub use state::{Ball, BallPaddleState, GameEvent, GamePhase, GameState, PaddleDirection, Paddle};
pub use tick::{TickInput, TickReport, tick};
