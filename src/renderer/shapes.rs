//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::FrameSnapshot;
use super::vertex::{Vertex, colors};
use crate::sim::{BrickKind, GamePhase};
use crate::consts::{BRICK_HEIGHT, BRICK_WIDTH};

/// Segments used for the ball outline
pub const BALL_SEGMENTS: u32 = 24;

/// Generate vertices for an axis-aligned filled rectangle (top-left origin)
pub fn rect(origin: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0) = (origin.x, origin.y);
    let (x1, y1) = (origin.x + size.x, origin.y + size.y);

    // Two triangles
    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Tessellate a whole frame in field coordinates: alive bricks, ball, paddle,
/// and the dimming overlay while paused
pub fn frame(snapshot: &FrameSnapshot<'_>) -> Vec<Vertex> {
    let mut vertices = Vec::new();

    for brick in snapshot.grid.alive() {
        let color = match brick.kind {
            BrickKind::Special => colors::BRICK_SPECIAL,
            BrickKind::Normal => colors::BRICK_NORMAL,
        };
        vertices.extend(rect(brick.pos, Vec2::new(BRICK_WIDTH, BRICK_HEIGHT), color));
    }

    vertices.extend(circle(
        snapshot.ball.pos,
        snapshot.ball.radius,
        colors::BALL,
        BALL_SEGMENTS,
    ));

    let paddle = snapshot.paddle;
    vertices.extend(rect(
        Vec2::new(paddle.x, paddle.top(snapshot.field_height)),
        Vec2::new(paddle.width, paddle.height),
        colors::PADDLE,
    ));

    if snapshot.phase == GamePhase::Paused {
        vertices.extend(rect(
            Vec2::ZERO,
            Vec2::new(snapshot.field_width, snapshot.field_height),
            colors::PAUSE_OVERLAY,
        ));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameState, start, toggle_pause};

    #[test]
    fn test_rect_covers_corners() {
        let v = rect(Vec2::new(10.0, 20.0), Vec2::new(30.0, 5.0), colors::PADDLE);
        assert_eq!(v.len(), 6);
        let xs: Vec<f32> = v.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = v.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 25.0);
    }

    #[test]
    fn test_frame_counts() {
        let state = GameState::new(3);
        let v = frame(&FrameSnapshot::of(&state));
        let expected = 40 * 6 + (BALL_SEGMENTS as usize) * 3 + 6;
        assert_eq!(v.len(), expected);
    }

    #[test]
    fn test_destroyed_bricks_not_drawn() {
        let mut state = GameState::new(3);
        state.grid.mark_destroyed(0, 0);
        state.grid.mark_destroyed(5, 4);
        let v = frame(&FrameSnapshot::of(&state));
        let expected = 38 * 6 + (BALL_SEGMENTS as usize) * 3 + 6;
        assert_eq!(v.len(), expected);
    }

    #[test]
    fn test_pause_adds_overlay() {
        let mut state = GameState::new(3);
        start(&mut state);
        toggle_pause(&mut state);
        let v = frame(&FrameSnapshot::of(&state));
        let overlay = &v[v.len() - 6..];
        assert!(overlay.iter().all(|v| v.color == colors::PAUSE_OVERLAY));
    }

    #[test]
    fn test_special_rows_use_special_color() {
        let state = GameState::new(3);
        let v = frame(&FrameSnapshot::of(&state));
        // First brick in column-major order is (0, 0), a special brick
        assert_eq!(v[0].color, colors::BRICK_SPECIAL);
        // (0, 2) is the third brick
        assert_eq!(v[12].color, colors::BRICK_NORMAL);
    }
}
