//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame, distances in units per frame
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod opponent;
pub mod physics;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::{Wall, hit_position, resolve_wall, touches_paddle};
pub use physics::{advance, serve};
pub use player::{Key, PlayerInput, autopilot};
pub use state::{Ball, GameEvent, GameState, MatchPhase, Opponent, Paddle, Side, Surface};
pub use tick::{resize, start_match, tick, touch_move, touch_start};
