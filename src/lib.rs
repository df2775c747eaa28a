//! Pong Duel - a two-paddle ball game against a predictive CPU opponent
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, paddles, match flow)
//! - `renderer`: Per-frame draw list for whatever surface the host draws on
//! - `audio`: Procedural tone cues for wall/paddle/score events
//! - `ui`: Overlay and score text derived from match state
//! - `platform`: Fixed-rate frame clock and logger setup
//! - `tuning`: Data-driven game balance
//! - `settings`: Persisted player preferences

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use settings::{Difficulty, Settings, SettingsError};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use std::f32::consts::{FRAC_PI_3, FRAC_PI_6};

    /// One simulation tick per display refresh
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Maximum ticks per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Host frame times above this are clamped (tab switches, debugger pauses)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// First side to reach this many points wins
    pub const WINNING_SCORE: u32 = 11;

    /// Ball speed at every serve (units per frame)
    pub const INITIAL_BALL_SPEED: f32 = 8.0;
    /// Speed multiplier applied on every paddle hit (uncapped)
    pub const BALL_SPEED_INCREASE: f32 = 1.05;
    /// Keyboard and CPU paddle speed (units per frame)
    pub const PADDLE_SPEED: f32 = 10.0;

    /// CPU target smoothing factor per frame
    pub const CPU_REACTION_SPEED: f32 = 0.08;
    /// CPU prediction error (± units)
    pub const CPU_ERROR_MARGIN: f32 = 25.0;

    /// Paddle return angle per unit of hit position (hit position is ±0.5)
    pub const DEFLECTION_SCALE: f32 = FRAC_PI_3;
    /// Maximum serve angle, measured from horizontal
    pub const MAX_SERVE_ANGLE: f32 = FRAC_PI_6;

    /// Gap between a paddle and its side of the surface
    pub const PADDLE_MARGIN: f32 = 10.0;
    pub const PADDLE_HEIGHT_RATIO: f32 = 0.15;
    pub const PADDLE_WIDTH_RATIO: f32 = 0.015;
    pub const BALL_RADIUS_RATIO: f32 = 0.01;
    pub const BALL_MIN_RADIUS: f32 = 8.0;

    /// Surface size caps (4:3)
    pub const MAX_SURFACE_WIDTH: f32 = 800.0;
    pub const MAX_SURFACE_HEIGHT: f32 = 600.0;
    /// Window space reserved around the surface for page chrome
    pub const VIEWPORT_MARGIN_X: f32 = 40.0;
    pub const VIEWPORT_MARGIN_Y: f32 = 200.0;
}

/// Velocity of magnitude `speed` at `angle` from horizontal.
///
/// `direction` is the horizontal sign: +1 travels right, -1 travels left.
#[inline]
pub fn launch_velocity(speed: f32, angle: f32, direction: f32) -> Vec2 {
    Vec2::new(direction * speed * angle.cos(), speed * angle.sin())
}

