//! Overlay and HUD text
//!
//! Pure functions of the match state; the host applies the resulting
//! updates to whatever it displays (DOM elements, a terminal, ...).

use crate::sim::{GameState, MatchPhase, Side};

/// Center-screen overlay contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    pub visible: bool,
    pub title: &'static str,
    pub subtitle: &'static str,
}

impl Overlay {
    /// Overlay for a phase. `winner` only matters in `GameOver`.
    pub fn for_phase(phase: MatchPhase, winner: Option<Side>) -> Self {
        match phase {
            MatchPhase::Menu => Self {
                visible: true,
                title: "PONG",
                subtitle: "Click or tap to start",
            },
            MatchPhase::Playing => Self {
                visible: false,
                title: "",
                subtitle: "",
            },
            MatchPhase::GameOver => Self {
                visible: true,
                title: match winner {
                    Some(Side::Player) => "YOU WIN!",
                    _ => "CPU WINS",
                },
                subtitle: "Click or tap to restart",
            },
        }
    }
}

/// Change for the host to apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiUpdate {
    Overlay(Overlay),
    Scores { player: String, opponent: String },
}

/// Tracks what the host last displayed and reports only changes
#[derive(Debug, Default)]
pub struct Hud {
    shown_overlay: Option<Overlay>,
    shown_scores: Option<(u32, u32)>,
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates needed to bring the display in line with `state`.
    ///
    /// The first call always reports both overlay and scores.
    pub fn sync(&mut self, state: &GameState) -> Vec<UiUpdate> {
        let mut updates = Vec::new();

        let overlay = Overlay::for_phase(state.phase, state.winner);
        if self.shown_overlay != Some(overlay) {
            self.shown_overlay = Some(overlay);
            updates.push(UiUpdate::Overlay(overlay));
        }

        let scores = state.scores();
        if self.shown_scores != Some(scores) {
            self.shown_scores = Some(scores);
            updates.push(UiUpdate::Scores {
                player: scores.0.to_string(),
                opponent: scores.1.to_string(),
            });
        }

        updates
    }

    /// Forget what was shown so the next `sync` repaints everything
    pub fn invalidate(&mut self) {
        self.shown_overlay = None;
        self.shown_scores = None;
    }
}
