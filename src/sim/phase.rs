//! Top-level screens and the transitions between them

use serde::{Deserialize, Serialize};

/// Which screen is active
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen with the sortie and menu controls
    #[default]
    Lobby,
    /// Controls and rules, shown before the first game only
    Tutorial,
    /// Session statistics
    Lounge,
    /// Simulation running
    Playing,
    /// Run finished, waiting for acknowledgement
    GameOver,
}

impl GamePhase {
    pub fn runs_simulation(self) -> bool {
        self == GamePhase::Playing
    }

    pub fn name(self) -> &'static str {
        match self {
            GamePhase::Lobby => "lobby",
            GamePhase::Tutorial => "tutorial",
            GamePhase::Lounge => "lounge",
            GamePhase::Playing => "playing",
            GamePhase::GameOver => "game over",
        }
    }
}

/// A discrete user activation, already hit-tested by the input adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// Primary control (sortie)
    Sortie,
    /// Secondary control (menu / lounge)
    Menu,
    /// Confirm key (space or enter)
    Confirm,
    /// Pointer press that did not land on a named control
    PointerDown,
}

/// Where an action leads from a phase, if anywhere.
///
/// `tutorial_seen` decides whether sortie from the lobby shows the tutorial.
/// Game over is entered by the simulation, never by an action.
pub fn next_phase(phase: GamePhase, action: UiAction, tutorial_seen: bool) -> Option<GamePhase> {
    use GamePhase::*;
    use UiAction::*;

    match (phase, action) {
        (Lobby, Sortie) if tutorial_seen => Some(Playing),
        (Lobby, Sortie) => Some(Tutorial),
        (Lobby, Menu) => Some(Lounge),
        (Tutorial, Confirm | PointerDown | Sortie | Menu) => Some(Playing),
        (Lounge, PointerDown | Sortie | Menu) => Some(Lobby),
        (GameOver, Confirm | PointerDown | Sortie | Menu) => Some(Lobby),
        _ => None,
    }
}
