//! Rendering module
//!
//! The game hands a read-only [`FrameSnapshot`] to a [`Renderer`] once per
//! frame. `shapes` turns it into colored triangles in field coordinates and
//! `pipeline` draws those with wgpu.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;

use crate::sim::{Ball, BrickGrid, GamePhase, GameState, Paddle};

/// Everything needed to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameSnapshot<'a> {
    pub grid: &'a BrickGrid,
    pub ball: &'a Ball,
    pub paddle: &'a Paddle,
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u8,
    pub field_width: f32,
    pub field_height: f32,
}

impl<'a> FrameSnapshot<'a> {
    pub fn of(state: &'a GameState) -> Self {
        Self {
            grid: &state.grid,
            ball: state.ball(),
            paddle: state.paddle(),
            phase: state.phase,
            score: state.score,
            lives: state.lives,
            field_width: state.field_width,
            field_height: state.field_height,
        }
    }
}

/// Draws snapshots. Failures are handled (logged) by the implementation.
pub trait Renderer {
    fn draw_frame(&mut self, frame: &FrameSnapshot<'_>);
}

/// A renderer that failed to initialise draws nothing; the game still runs
impl<R: Renderer> Renderer for Option<R> {
    fn draw_frame(&mut self, frame: &FrameSnapshot<'_>) {
        if let Some(renderer) = self {
            renderer.draw_frame(frame);
        }
    }
}
