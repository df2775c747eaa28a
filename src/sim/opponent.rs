//! CPU opponent: predictive tracking with deliberate imperfection

use rand::Rng;

use super::state::{Ball, Opponent, Surface};
use crate::tuning::Tuning;

/// Horizontal speeds at or below this are treated as "not approaching"
const MIN_APPROACH_SPEED: f32 = 1e-4;

/// Linear extrapolation of the ball's y when it reaches `paddle_x`.
///
/// Walls are ignored. Returns `None` when the ball is not traveling
/// toward the right-hand paddle.
pub fn predict_arrival_y(ball: &Ball, paddle_x: f32) -> Option<f32> {
    if ball.vel.x <= MIN_APPROACH_SPEED {
        return None;
    }
    let time_to_reach = (paddle_x - ball.pos.x) / ball.vel.x;
    Some(ball.pos.y + ball.vel.y * time_to_reach)
}

/// Where the CPU wants its paddle center this frame, before smoothing
pub fn aim_y(ball: &Ball, paddle_x: f32, error_margin: f32, rng: &mut impl Rng) -> f32 {
    match predict_arrival_y(ball, paddle_x) {
        Some(y) => y + (rng.random::<f32>() - 0.5) * error_margin * 2.0,
        None => ball.pos.y,
    }
}

/// Run the CPU for one frame
pub fn update(
    opponent: &mut Opponent,
    ball: &Ball,
    surface: &Surface,
    tuning: &Tuning,
    rng: &mut impl Rng,
) {
    let predicted = aim_y(ball, opponent.paddle.x, tuning.cpu_error_margin, rng);
    opponent.target_y += (predicted - opponent.target_y) * tuning.cpu_reaction;

    let paddle = &mut opponent.paddle;
    let diff = opponent.target_y - paddle.center_y();
    if diff.abs() > tuning.paddle_speed {
        paddle.y += diff.signum() * tuning.paddle_speed;
    } else {
        paddle.y += diff;
    }
    paddle.clamp_to(surface);
}
