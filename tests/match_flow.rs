//! Full match through the public API: start, play, game over, restart

use pong_duel::audio::{AudioBackend, AudioManager, Tone};
use pong_duel::platform::FrameClock;
use pong_duel::sim::{
    GameEvent, GameState, MatchPhase, PlayerInput, Side, Surface, autopilot, start_match,
    touch_start,
};
use pong_duel::ui::{Hud, Overlay, UiUpdate};
use pong_duel::{Settings, consts};
use std::cell::Cell;

const MAX_FRAMES: u32 = 500_000;

#[derive(Default)]
struct CountingBackend {
    tones: Cell<u32>,
}

impl AudioBackend for CountingBackend {
    fn play_tone(&self, _tone: &Tone, _volume: f32) {
        self.tones.set(self.tones.get() + 1);
    }
}

/// Run frames with the player on autopilot until the match ends
fn play_out(state: &mut GameState, input: &mut PlayerInput, clock: &mut FrameClock) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let mut frames = 0;
    while state.phase == MatchPhase::Playing && frames < MAX_FRAMES {
        autopilot(input, &state.player, &state.ball, 6.0);
        events.extend(clock.advance(consts::FRAME_DT, state, input));
        frames += 1;
    }
    events
}

#[test]
fn full_match_and_restart() {
    let settings = Settings {
        winning_score: 5,
        ..Settings::default()
    };
    let surface = Surface::fit_viewport(1280.0, 900.0);
    let mut state = GameState::with_tuning(surface, settings.tuning(), 2024);
    let mut input = PlayerInput::new();
    let mut clock = FrameClock::new();
    let mut hud = Hud::new();
    let audio = AudioManager::new(CountingBackend::default());

    assert_eq!(state.phase, MatchPhase::Menu);
    assert!(hud.sync(&state).contains(&UiUpdate::Overlay(Overlay::for_phase(MatchPhase::Menu, None))));

    assert_eq!(touch_start(&mut state, &mut input, 100.0), Some(GameEvent::MatchStarted));
    let events = play_out(&mut state, &mut input, &mut clock);
    audio.play_events(&events);

    assert_eq!(state.phase, MatchPhase::GameOver);
    let winner = state.winner.expect("match has a winner");
    let (player, cpu) = state.scores();
    let (won, lost) = match winner {
        Side::Player => (player, cpu),
        Side::Opponent => (cpu, player),
    };
    assert_eq!(won, 5);
    assert!(lost < 5);

    let scored = events.iter().filter(|e| matches!(e, GameEvent::Scored(_))).count() as u32;
    assert_eq!(scored, player + cpu);
    assert_eq!(events.last(), Some(&GameEvent::MatchOver { winner }));
    assert!(events.iter().any(|e| matches!(e, GameEvent::PaddleHit(_))));
    assert!(audio.backend().tones.get() >= scored);

    let overlay = Overlay::for_phase(MatchPhase::GameOver, Some(winner));
    assert!(hud.sync(&state).contains(&UiUpdate::Overlay(overlay)));

    // Frozen until restart
    let ball = state.ball;
    assert!(clock.advance(consts::FRAME_DT, &mut state, &mut input).is_empty());
    assert_eq!(state.ball, ball);

    // Restart
    assert_eq!(start_match(&mut state), Some(GameEvent::MatchStarted));
    assert_eq!(state.phase, MatchPhase::Playing);
    assert_eq!(state.scores(), (0, 0));
    assert_eq!(state.winner, None);
    assert_eq!(state.ball.pos, state.surface.center());
    assert_eq!(state.ball.speed, consts::INITIAL_BALL_SPEED);

    let updates = hud.sync(&state);
    assert!(updates.contains(&UiUpdate::Scores {
        player: "0".into(),
        opponent: "0".into()
    }));
}

#[test]
fn same_seed_same_match() {
    let run = |seed: u64| {
        let mut state = GameState::new(Surface::new(800.0, 600.0), seed);
        let mut input = PlayerInput::new();
        let mut clock = FrameClock::new();
        start_match(&mut state);
        for _ in 0..3_000 {
            autopilot(&mut input, &state.player, &state.ball, 6.0);
            clock.advance(consts::FRAME_DT, &mut state, &mut input);
        }
        (state.scores(), state.ball, state.opponent, state.time_ticks)
    };

    assert_eq!(run(77), run(77));
}
