//! Data-driven game balance
//!
//! Everything the simulation reads that a difficulty preset or a settings
//! file may change. `Tuning::default()` is the classic game.

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Points needed to win the match
    pub winning_score: u32,
    /// Ball speed at each serve (units per frame)
    pub initial_ball_speed: f32,
    /// Multiplier applied to ball speed on every paddle hit
    pub speed_increase: f32,
    /// Paddle speed for keys and the CPU (units per frame)
    pub paddle_speed: f32,
    /// CPU exponential smoothing factor
    pub cpu_reaction: f32,
    /// CPU prediction error, ± units
    pub cpu_error_margin: f32,
    /// Outgoing angle per unit of hit position (radians); hit position
    /// spans ±0.5, so the steepest return is half of this
    pub deflection_scale: f32,
    /// Max serve angle from horizontal (radians)
    pub max_serve_angle: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            winning_score: WINNING_SCORE,
            initial_ball_speed: INITIAL_BALL_SPEED,
            speed_increase: BALL_SPEED_INCREASE,
            paddle_speed: PADDLE_SPEED,
            cpu_reaction: CPU_REACTION_SPEED,
            cpu_error_margin: CPU_ERROR_MARGIN,
            deflection_scale: DEFLECTION_SCALE,
            max_serve_angle: MAX_SERVE_ANGLE,
        }
    }
}
