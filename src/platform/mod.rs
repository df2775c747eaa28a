//! Platform layer
//!
//! Host-side pieces shared by the native runner and the browser build:
//! fixed-rate frame pacing and logger setup.

use crate::consts::{FRAME_DT, MAX_FRAME_DT, MAX_SUBSTEPS};
use crate::sim::{GameEvent, GameState, PlayerInput, tick};

/// Turns variable host frame times into fixed simulation ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    accumulator: f32,
    step: f32,
    max_substeps: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// 60 Hz clock with the default substep cap
    pub fn new() -> Self {
        Self::with_step(FRAME_DT, MAX_SUBSTEPS)
    }

    pub fn with_step(step: f32, max_substeps: u32) -> Self {
        Self {
            accumulator: 0.0,
            step,
            max_substeps: max_substeps.max(1),
        }
    }

    /// Unspent host time
    pub fn accumulated(&self) -> f32 {
        self.accumulator
    }

    /// Drop unspent time (after a pause in frame delivery)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Run as many fixed ticks as `dt` seconds of host time cover.
    ///
    /// `dt` is clamped to `MAX_FRAME_DT`; at most `max_substeps` ticks run
    /// per call and time beyond that cap is dropped. Events from every
    /// tick are returned in order.
    pub fn advance(
        &mut self,
        dt: f32,
        state: &mut GameState,
        input: &mut PlayerInput,
    ) -> Vec<GameEvent> {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            events.extend(tick(state, input));
            self.accumulator -= self.step;
            substeps += 1;
        }

        // Spiral-of-death guard
        if substeps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.step);
        }

        events
    }
}

/// Install the logger for this target. Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Install the console logger and panic hook. Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Session seed from the wall clock
#[cfg(target_arch = "wasm32")]
pub fn clock_seed() -> u64 {
    js_sys::Date::now() as u64
}

/// Session seed from the wall clock
#[cfg(not(target_arch = "wasm32"))]
pub fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
