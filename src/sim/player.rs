//! Human paddle control and the input channel that feeds it
//!
//! Host events arrive between frames; the frame consumes them at the start
//! of its update. Absolute pointer/touch samples are one-shot (taken and
//! cleared), key flags are level-triggered.

use serde::{Deserialize, Serialize};

use super::state::{Ball, Paddle, Surface};

/// Directional key state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
}

impl Key {
    /// Map a DOM-style key name to a paddle key
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" | "w" | "W" => Some(Key::Up),
            "ArrowDown" | "s" | "S" => Some(Key::Down),
            _ => None,
        }
    }
}

/// Input for the human paddle, written by the host and read by the frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerInput {
    pub up: bool,
    pub down: bool,
    /// Latest pointer y in surface coordinates (one-shot)
    pointer_y: Option<f32>,
    /// Latest touch y in surface coordinates (one-shot)
    touch_y: Option<f32>,
}

impl PlayerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer sample; replaces any unconsumed one
    pub fn set_pointer_y(&mut self, y: f32) {
        self.pointer_y = Some(y);
    }

    /// Record a touch sample; replaces any unconsumed one
    pub fn set_touch_y(&mut self, y: f32) {
        self.touch_y = Some(y);
    }

    pub fn take_pointer_y(&mut self) -> Option<f32> {
        self.pointer_y.take()
    }

    pub fn take_touch_y(&mut self) -> Option<f32> {
        self.touch_y.take()
    }

    pub fn set_key(&mut self, key: Key, pressed: bool) {
        match key {
            Key::Up => self.up = pressed,
            Key::Down => self.down = pressed,
        }
    }

    /// Handle a key-down by name; returns false for unmapped keys
    pub fn key_down(&mut self, name: &str) -> bool {
        Key::from_name(name)
            .map(|key| self.set_key(key, true))
            .is_some()
    }

    /// Handle a key-up by name; returns false for unmapped keys
    pub fn key_up(&mut self, name: &str) -> bool {
        Key::from_name(name)
            .map(|key| self.set_key(key, false))
            .is_some()
    }
}

/// Move the human paddle for one frame.
///
/// Precedence: pointer sample, then touch sample, then key flags. The
/// result is always clamped to the surface.
pub fn update(paddle: &mut Paddle, input: &mut PlayerInput, surface: &Surface, paddle_speed: f32) {
    if let Some(y) = input.take_pointer_y() {
        paddle.y = y - paddle.height / 2.0;
    } else if let Some(y) = input.take_touch_y() {
        paddle.y = y - paddle.height / 2.0;
    } else {
        if input.up {
            paddle.y -= paddle_speed;
        }
        if input.down {
            paddle.y += paddle_speed;
        }
    }

    paddle.clamp_to(surface);
}

/// Demo autopilot: hold the key that moves the paddle center toward the
/// ball, with a dead zone so it does not jitter.
pub fn autopilot(input: &mut PlayerInput, paddle: &Paddle, ball: &Ball, dead_zone: f32) {
    let diff = ball.pos.y - paddle.center_y();
    input.up = diff < -dead_zone;
    input.down = diff > dead_zone;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Side;
    use proptest::prelude::*;

    fn setup() -> (Surface, Paddle, PlayerInput) {
        let surface = Surface::new(800.0, 600.0);
        (surface, Paddle::new(Side::Player, &surface), PlayerInput::new())
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Key::from_name("ArrowUp"), Some(Key::Up));
        assert_eq!(Key::from_name("w"), Some(Key::Up));
        assert_eq!(Key::from_name("S"), Some(Key::Down));
        assert_eq!(Key::from_name("x"), None);

        let mut input = PlayerInput::new();
        assert!(input.key_down("W"));
        assert!(input.up);
        assert!(!input.key_down("Enter"));
        assert!(input.key_up("ArrowUp"));
        assert!(!input.up);
    }

    #[test]
    fn test_pointer_sets_center_once() {
        let (surface, mut paddle, mut input) = setup();
        input.set_pointer_y(200.0);

        update(&mut paddle, &mut input, &surface, 10.0);
        assert!((paddle.center_y() - 200.0).abs() < 1e-4);

        // Sample consumed: a second frame with no input leaves the paddle alone
        let y = paddle.y;
        update(&mut paddle, &mut input, &surface, 10.0);
        assert_eq!(paddle.y, y);
    }

    #[test]
    fn test_pointer_wins_over_touch_and_keys() {
        let (surface, mut paddle, mut input) = setup();
        input.set_pointer_y(150.0);
        input.set_touch_y(400.0);
        input.down = true;

        update(&mut paddle, &mut input, &surface, 10.0);
        assert!((paddle.center_y() - 150.0).abs() < 1e-4);

        // Touch sample survives until the next frame
        update(&mut paddle, &mut input, &surface, 10.0);
        assert!((paddle.center_y() - 400.0).abs() < 1e-4);

        // Then the keys take over
        let y = paddle.y;
        update(&mut paddle, &mut input, &surface, 10.0);
        assert!((paddle.y - (y + 10.0)).abs() < 1e-4);
    }

    #[test]
    fn test_keys_step_and_cancel() {
        let (surface, mut paddle, mut input) = setup();
        let start = paddle.y;

        input.up = true;
        update(&mut paddle, &mut input, &surface, 10.0);
        assert!((paddle.y - (start - 10.0)).abs() < 1e-4);

        input.down = true;
        update(&mut paddle, &mut input, &surface, 10.0);
        assert!((paddle.y - (start - 10.0)).abs() < 1e-4);
    }

    #[test]
    fn test_clamped_to_surface() {
        let (surface, mut paddle, mut input) = setup();
        input.set_pointer_y(-1000.0);
        update(&mut paddle, &mut input, &surface, 10.0);
        assert_eq!(paddle.y, 0.0);

        input.set_touch_y(5000.0);
        update(&mut paddle, &mut input, &surface, 10.0);
        assert!((paddle.y - (surface.height - paddle.height)).abs() < 1e-4);
    }

    #[test]
    fn test_autopilot_follows_ball() {
        let (surface, paddle, mut input) = setup();
        let mut ball = Ball::new(&surface, 8.0);

        ball.pos.y = paddle.center_y() - 50.0;
        autopilot(&mut input, &paddle, &ball, 5.0);
        assert!(input.up && !input.down);

        ball.pos.y = paddle.center_y() + 50.0;
        autopilot(&mut input, &paddle, &ball, 5.0);
        assert!(input.down && !input.up);

        ball.pos.y = paddle.center_y() + 1.0;
        autopilot(&mut input, &paddle, &ball, 5.0);
        assert!(!input.down && !input.up);
    }

    proptest! {
        #[test]
        fn prop_paddle_always_in_bounds(
            samples in proptest::collection::vec((any::<u8>(), -2000.0f32..2000.0), 1..64),
        ) {
            let (surface, mut paddle, mut input) = setup();
            for (kind, y) in samples {
                match kind % 4 {
                    0 => input.set_pointer_y(y),
                    1 => input.set_touch_y(y),
                    2 => input.up = y > 0.0,
                    _ => input.down = y > 0.0,
                }
                update(&mut paddle, &mut input, &surface, 10.0);
                prop_assert!(paddle.y >= 0.0);
                prop_assert!(paddle.y <= surface.height - paddle.height + 1e-3);
            }
        }
    }
}
