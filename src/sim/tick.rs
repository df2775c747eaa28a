//! Per-frame match update and match lifecycle
//!
//! Menu -> Playing -> GameOver -> Playing ... There is no pause.

use rand::Rng;

use super::state::{GameEvent, GameState, MatchPhase, Side, Surface};
use super::{opponent, physics, player};
use super::player::PlayerInput;

/// Advance the match by one frame.
///
/// Does nothing outside `Playing`. Order: player paddle, CPU paddle, ball,
/// then scoring.
pub fn tick(state: &mut GameState, input: &mut PlayerInput) -> Vec<GameEvent> {
    if !state.is_playing() {
        return Vec::new();
    }

    state.time_ticks += 1;

    player::update(&mut state.player, input, &state.surface, state.tuning.paddle_speed);
    opponent::update(
        &mut state.opponent,
        &state.ball,
        &state.surface,
        &state.tuning,
        &mut state.rng,
    );

    let mut events = physics::advance(
        &mut state.ball,
        &state.player,
        &state.opponent.paddle,
        &state.surface,
        &state.tuning,
    );

    if let Some(scorer) = physics::scoring_side(&state.ball, &state.surface) {
        award_point(state, scorer, &mut events);
    }

    events
}

/// Credit a point, then either end the match or serve to the side that
/// just lost the point
fn award_point(state: &mut GameState, scorer: Side, events: &mut Vec<GameEvent>) {
    let rally_speed = state.ball.speed;
    let paddle = state.paddle_mut(scorer);
    paddle.score += 1;
    let score = paddle.score;

    events.push(GameEvent::Scored(scorer));
    log::debug!(
        "{:?} scored ({} - {}), rally ended at speed {:.2}",
        scorer,
        state.player.score,
        state.opponent.paddle.score,
        rally_speed
    );

    if score >= state.tuning.winning_score {
        state.phase = MatchPhase::GameOver;
        state.winner = Some(scorer);
        events.push(GameEvent::MatchOver { winner: scorer });
        log::info!(
            "Match over: {:?} wins {} - {}",
            scorer,
            state.player.score,
            state.opponent.paddle.score
        );
    } else {
        log::debug!("Serving toward {:?}", scorer.other());
        physics::serve(
            &mut state.ball,
            &state.surface,
            &state.tuning,
            scorer.other(),
            &mut state.rng,
        );
    }
}

/// Start (or restart) a match.
///
/// Accepted only from `Menu` or `GameOver`; returns `None` otherwise.
pub fn start_match(state: &mut GameState) -> Option<GameEvent> {
    if !state.phase.accepts_start() {
        return None;
    }

    let surface = state.surface;
    for side in [Side::Player, Side::Opponent] {
        let paddle = state.paddle_mut(side);
        paddle.score = 0;
        paddle.recenter(&surface);
    }
    state.opponent.target_y = surface.height / 2.0;
    state.winner = None;

    let receiver = if state.rng.random_bool(0.5) {
        Side::Opponent
    } else {
        Side::Player
    };
    physics::serve(&mut state.ball, &surface, &state.tuning, receiver, &mut state.rng);

    state.phase = MatchPhase::Playing;
    log::info!("Match started, serving toward {:?}", receiver);

    Some(GameEvent::MatchStarted)
}

/// Touch-start: a start trigger when idle, a touch sample while playing
pub fn touch_start(state: &mut GameState, input: &mut PlayerInput, y: f32) -> Option<GameEvent> {
    if state.phase.accepts_start() {
        start_match(state)
    } else {
        input.set_touch_y(y);
        None
    }
}

/// Touch-move: only tracked while playing
pub fn touch_move(state: &GameState, input: &mut PlayerInput, y: f32) {
    if state.is_playing() {
        input.set_touch_y(y);
    }
}

/// Apply a new surface size.
///
/// Paddle and ball sizes are re-derived and both paddles recentered; the
/// ball keeps its position and velocity.
pub fn resize(state: &mut GameState, surface: Surface) {
    state.surface = surface;
    state.player.fit_to(&surface);
    state.opponent.paddle.fit_to(&surface);
    state.ball.radius = surface.ball_radius();
    log::info!("Surface resized to {:.0}x{:.0}", surface.width, surface.height);
}
