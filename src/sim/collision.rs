//! Collision detection and response
//!
//! Ball vs bricks is a point-in-rectangle test on the ball's current center.
//! Walls and the bottom edge use look-ahead: the position the ball would reach
//! this tick is tested before the move is committed, so a bounce and the
//! post-bounce move happen in the same tick.

use glam::Vec2;

use super::grid::BrickGrid;
use super::state::{BallPaddleState, GameEvent};

/// Which horizontal boundary the look-ahead position crosses, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalContact {
    Top,
    Bottom,
}

/// First alive brick (column-major order) whose interior contains `point`
pub fn first_brick_hit(grid: &BrickGrid, point: Vec2) -> Option<(usize, usize)> {
    grid.alive()
        .find(|b| b.contains_point(point))
        .map(|b| (b.col, b.row))
}

/// Whether the next x would leave the field, accounting for ball radius
#[inline]
pub fn hits_side_wall(next_x: f32, radius: f32, field_width: f32) -> bool {
    next_x > field_width - radius || next_x < radius
}

/// Top edge takes precedence; the bottom is only considered if the top isn't hit
#[inline]
pub fn vertical_contact(next_y: f32, radius: f32, field_height: f32) -> Option<VerticalContact> {
    if next_y < radius {
        Some(VerticalContact::Top)
    } else if next_y > field_height - radius {
        Some(VerticalContact::Bottom)
    } else {
        None
    }
}

/// Resolve one tick of collisions, flipping velocity signs and destroying at
/// most one brick. Returns the events in the order they happened.
///
/// Does not move the ball and does not touch score, lives or phase.
pub fn resolve(
    bodies: &mut BallPaddleState,
    grid: &mut BrickGrid,
    field_width: f32,
    field_height: f32,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let ball = &mut bodies.ball;

    if let Some((col, row)) = first_brick_hit(grid, ball.pos) {
        let kind = grid.get(col, row).map(|b| b.kind).unwrap_or_default();
        if grid.mark_destroyed(col, row) {
            ball.vel.y = -ball.vel.y;
            events.push(GameEvent::BrickBroken { col, row, kind });

            if grid.count_alive() == 0 {
                events.push(GameEvent::AllBricksCleared);
                return events;
            }
        }
    }

    if hits_side_wall(ball.next_pos().x, ball.radius, field_width) {
        ball.vel.x = -ball.vel.x;
        events.push(GameEvent::WallBounced);
    }

    match vertical_contact(ball.next_pos().y, ball.radius, field_height) {
        Some(VerticalContact::Top) => {
            ball.vel.y = -ball.vel.y;
            events.push(GameEvent::WallBounced);
        }
        Some(VerticalContact::Bottom) => {
            if bodies.paddle.covers(ball.pos.x) {
                ball.vel.y = -ball.vel.y;
                events.push(GameEvent::PaddleBounced);
            } else {
                events.push(GameEvent::LifeLost);
            }
        }
        None => {}
    }

    events
}
