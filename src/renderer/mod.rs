//! Draw list generation
//!
//! Builds a flat triangle list in surface coordinates (origin top-left,
//! y down) that any host backend can upload as-is.

pub mod shapes;
pub mod vertex;

use glam::Vec2;

use crate::sim::{GameState, Paddle};
pub use vertex::{Vertex, colors};

/// Center line dash length
pub const DASH_LENGTH: f32 = 10.0;
/// Center line gap between dashes
pub const DASH_GAP: f32 = 10.0;
/// Center line stroke width
pub const CENTER_LINE_WIDTH: f32 = 2.0;
/// Triangles per ball
pub const BALL_SEGMENTS: u32 = 24;

/// Build the full frame: background, center line, paddles, ball.
///
/// Drawn in every phase so the field is visible behind the overlay.
pub fn scene(state: &GameState) -> Vec<Vertex> {
    let surface = &state.surface;
    let mut vertices = Vec::with_capacity(256);

    vertices.extend(shapes::rect(
        Vec2::ZERO,
        Vec2::new(surface.width, surface.height),
        colors::BACKGROUND,
    ));
    vertices.extend(shapes::dashed_vline(
        surface.width / 2.0,
        0.0,
        surface.height,
        CENTER_LINE_WIDTH,
        DASH_LENGTH,
        DASH_GAP,
        colors::CENTER_LINE,
    ));
    vertices.extend(paddle(&state.player));
    vertices.extend(paddle(&state.opponent.paddle));
    vertices.extend(shapes::circle(
        state.ball.pos,
        state.ball.radius,
        colors::BALL,
        BALL_SEGMENTS,
    ));

    vertices
}

fn paddle(paddle: &Paddle) -> Vec<Vertex> {
    shapes::rect(
        Vec2::new(paddle.x, paddle.y),
        Vec2::new(paddle.width, paddle.height),
        colors::PADDLE,
    )
}

/// Raw bytes of a vertex list, ready for a GPU or canvas upload
pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}
