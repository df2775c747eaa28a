//! Game state and core simulation types
//!
//! Plain data for the ball, both paddles and the surface, plus the match
//! context that owns them.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Idle, waiting for the start trigger
    Menu,
    /// Physics and input run every frame
    Playing,
    /// Idle, showing the result, waiting for the restart trigger
    GameOver,
}

impl MatchPhase {
    /// Whether a start/restart trigger is accepted in this phase
    pub fn accepts_start(&self) -> bool {
        matches!(self, MatchPhase::Menu | MatchPhase::GameOver)
    }
}

/// Which end of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Human paddle, left edge
    Player,
    /// CPU paddle, right edge
    Opponent,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    /// Horizontal sign of travel toward this side
    pub fn toward(self) -> f32 {
        match self {
            Side::Player => -1.0,
            Side::Opponent => 1.0,
        }
    }

    /// Horizontal sign of travel away from this side (after a hit)
    pub fn away(self) -> f32 {
        -self.toward()
    }
}

/// Something the simulation wants the host to know about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball bounced off the top or bottom edge
    WallBounce,
    /// Ball was returned by a paddle
    PaddleHit(Side),
    /// A point was scored by the given side
    Scored(Side),
    /// Match finished
    MatchOver { winner: Side },
    /// A fresh match began (scores reset)
    MatchStarted,
}

/// Playfield size; every other dimension is derived from it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Surface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Largest 4:3 surface that fits a window, capped at 800x600
    pub fn fit_viewport(window_width: f32, window_height: f32) -> Self {
        let ratio = MAX_SURFACE_WIDTH / MAX_SURFACE_HEIGHT;

        let mut width = (window_width - VIEWPORT_MARGIN_X).min(MAX_SURFACE_WIDTH);
        let mut height = width / ratio;

        if height > window_height - VIEWPORT_MARGIN_Y {
            height = window_height - VIEWPORT_MARGIN_Y;
            width = height * ratio;
        }

        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    #[inline]
    pub fn paddle_height(&self) -> f32 {
        self.height * PADDLE_HEIGHT_RATIO
    }

    #[inline]
    pub fn paddle_width(&self) -> f32 {
        self.width * PADDLE_WIDTH_RATIO
    }

    #[inline]
    pub fn ball_radius(&self) -> f32 {
        (self.width * BALL_RADIUS_RATIO).max(BALL_MIN_RADIUS)
    }

    /// Fixed x of a paddle's left edge
    pub fn paddle_x(&self, side: Side) -> f32 {
        match side {
            Side::Player => PADDLE_MARGIN,
            Side::Opponent => self.width - PADDLE_MARGIN - self.paddle_width(),
        }
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Tracked magnitude of `vel`; grows on paddle hits, reset on serve
    pub speed: f32,
    pub radius: f32,
}

impl Ball {
    /// A stationary ball at the surface center
    pub fn new(surface: &Surface, speed: f32) -> Self {
        Self {
            pos: surface.center(),
            vel: Vec2::ZERO,
            speed,
            radius: surface.ball_radius(),
        }
    }

    /// Place the ball at `center` moving at `speed`, `angle` from horizontal
    pub fn serve(&mut self, center: Vec2, speed: f32, angle: f32, direction: f32) {
        self.pos = center;
        self.speed = speed;
        self.vel = crate::launch_velocity(speed, angle, direction);
    }
}

/// A paddle (axis-aligned rectangle, moves only vertically)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    /// Left edge (fixed per side)
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub score: u32,
}

impl Paddle {
    /// A vertically centered paddle for `side`
    pub fn new(side: Side, surface: &Surface) -> Self {
        let mut paddle = Self {
            side,
            x: surface.paddle_x(side),
            y: 0.0,
            width: surface.paddle_width(),
            height: surface.paddle_height(),
            score: 0,
        };
        paddle.recenter(surface);
        paddle
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn recenter(&mut self, surface: &Surface) {
        self.y = surface.height / 2.0 - self.height / 2.0;
    }

    /// Highest valid `y` for this paddle
    pub fn max_y(&self, surface: &Surface) -> f32 {
        (surface.height - self.height).max(0.0)
    }

    /// Keep the paddle within [0, surface height - paddle height]
    pub fn clamp_to(&mut self, surface: &Surface) {
        self.y = self.y.clamp(0.0, self.max_y(surface));
    }

    /// x of the face the ball strikes
    pub fn front_x(&self) -> f32 {
        match self.side {
            Side::Player => self.x + self.width,
            Side::Opponent => self.x,
        }
    }

    /// Recompute size and x from the surface and recenter
    pub fn fit_to(&mut self, surface: &Surface) {
        self.x = surface.paddle_x(self.side);
        self.width = surface.paddle_width();
        self.height = surface.paddle_height();
        self.recenter(surface);
    }
}

/// The CPU paddle plus its smoothed aim point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Opponent {
    pub paddle: Paddle,
    /// Smoothed prediction of where the ball will arrive (paddle-center y)
    pub target_y: f32,
}

impl Opponent {
    pub fn new(surface: &Surface) -> Self {
        Self {
            paddle: Paddle::new(Side::Opponent, surface),
            target_y: surface.height / 2.0,
        }
    }
}

/// Complete match context (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: MatchPhase,
    pub surface: Surface,
    pub ball: Ball,
    pub player: Paddle,
    pub opponent: Opponent,
    /// Winner of the last finished match (display only)
    pub winner: Option<Side>,
    pub tuning: Tuning,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Match RNG (serve angles, serve side, CPU error)
    pub rng: Pcg32,
}

impl GameState {
    /// Create a match in the menu phase with classic tuning
    pub fn new(surface: Surface, seed: u64) -> Self {
        Self::with_tuning(surface, Tuning::default(), seed)
    }

    pub fn with_tuning(surface: Surface, tuning: Tuning, seed: u64) -> Self {
        Self {
            phase: MatchPhase::Menu,
            surface,
            ball: Ball::new(&surface, tuning.initial_ball_speed),
            player: Paddle::new(Side::Player, &surface),
            opponent: Opponent::new(&surface),
            winner: None,
            tuning,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent.paddle,
        }
    }

    /// (player, opponent) scores
    pub fn scores(&self) -> (u32, u32) {
        (self.player.score, self.opponent.paddle.score)
    }

    pub fn is_playing(&self) -> bool {
        self.phase == MatchPhase::Playing
    }
}
