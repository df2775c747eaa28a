//! Collision detection for the only shapes in play: one circle, two
//! axis-aligned paddles and the top/bottom edges of the surface.

use super::state::{Ball, Paddle, Side, Surface};

/// Which horizontal edge the ball touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Top,
    Bottom,
}

/// Check the ball's leading edge against the top and bottom edges
pub fn wall_contact(ball: &Ball, surface: &Surface) -> Option<Wall> {
    if ball.pos.y - ball.radius <= 0.0 {
        Some(Wall::Top)
    } else if ball.pos.y + ball.radius >= surface.height {
        Some(Wall::Bottom)
    } else {
        None
    }
}

/// Reflect off a wall and clamp the ball back inside.
///
/// Returns the wall that was touched, if any.
pub fn resolve_wall(ball: &mut Ball, surface: &Surface) -> Option<Wall> {
    let wall = wall_contact(ball, surface)?;
    ball.vel.y = -ball.vel.y;
    ball.pos.y = match wall {
        Wall::Top => ball.radius,
        Wall::Bottom => surface.height - ball.radius,
    };
    Some(wall)
}

/// Whether the ball's edge has reached the paddle's front face while
/// within its vertical span.
///
/// One-directional threshold: direction of travel is not checked, so a
/// ball anywhere behind the front plane and within the span counts.
pub fn touches_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    let reached = match paddle.side {
        Side::Player => ball.pos.x - ball.radius <= paddle.front_x(),
        Side::Opponent => ball.pos.x + ball.radius >= paddle.front_x(),
    };
    reached && ball.pos.y >= paddle.y && ball.pos.y <= paddle.y + paddle.height
}

/// Where on the paddle the ball struck: -0.5 at the top, 0 at center,
/// 0.5 at the bottom
#[inline]
pub fn hit_position(ball_y: f32, paddle: &Paddle) -> f32 {
    (ball_y - paddle.y) / paddle.height - 0.5
}

/// Ball x that rests exactly against the paddle face
#[inline]
pub fn contact_x(paddle: &Paddle, radius: f32) -> f32 {
    paddle.front_x() + paddle.side.away() * radius
}
