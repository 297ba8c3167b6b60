//! Text overlay model
//!
//! Everything textual on screen is described here and painted by the host
//! (DOM overlay on the web, stdout natively). Building the model never
//! touches game state.

use crate::consts::{SHIELD_BLINK_HALF_PERIOD_MS, SHIELD_BLINK_LEVEL};
use crate::session::Session;
use crate::sim::GamePhase;

pub const TITLE: &str = "Galaxy Defender";
pub const SORTIE_LABEL: &str = "Sortie";
pub const MENU_LABEL: &str = "Menu";

const TUTORIAL_LINES: [&str; 9] = [
    "[ Controls ]",
    "Left / Right (or A, D): move",
    "Space: fire",
    "[ Rules ]",
    "Destroyed enemies may drop star items",
    "A star item restores 5% shield",
    "Enemy bullet hit: -10% shield",
    "Enemy collision: -5% shield",
    "The game ends at 10% shield or less",
];

/// Shield text color (CSS hex) by level
pub fn shield_color(shield: u32) -> &'static str {
    match shield {
        81.. => "#0080ff",
        61..=80 => "#00ff00",
        41..=60 => "#ffff00",
        _ => "#ff0000",
    }
}

/// Shield text opacity; blinks at low shield from wall-clock time
pub fn shield_alpha(shield: u32, now_ms: f64, blink: bool) -> f32 {
    if !blink || shield > SHIELD_BLINK_LEVEL {
        return 1.0;
    }
    let phase = (now_ms / SHIELD_BLINK_HALF_PERIOD_MS).floor() as u64;
    if phase % 2 == 0 { 0.3 } else { 1.0 }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShieldReadout {
    pub text: String,
    pub color: &'static str,
    pub alpha: f32,
}

impl ShieldReadout {
    pub fn new(shield: u32, now_ms: f64, blink: bool) -> Self {
        Self {
            text: format!("Shield {shield}%"),
            color: shield_color(shield),
            alpha: shield_alpha(shield, now_ms, blink),
        }
    }
}

/// Everything the overlay shows for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HudModel {
    pub score: Option<String>,
    pub shield: Option<ShieldReadout>,
    pub heading: Option<String>,
    pub lines: Vec<String>,
    pub footer: Option<String>,
    /// Labels for the two lobby controls
    pub controls: Option<[&'static str; 2]>,
    /// Game-over notice awaiting acknowledgement
    pub notice: Option<[String; 2]>,
}

impl HudModel {
    pub fn build(session: &Session, now_ms: f64) -> Self {
        let mut hud = Self::default();

        match session.phase() {
            GamePhase::Lobby => {
                hud.heading = Some(TITLE.to_string());
                hud.controls = Some([SORTIE_LABEL, MENU_LABEL]);
            }
            GamePhase::Tutorial => {
                hud.heading = Some("How to Play".to_string());
                hud.lines = TUTORIAL_LINES.iter().map(|s| s.to_string()).collect();
                hud.footer = Some("Press Space to start".to_string());
            }
            GamePhase::Lounge => {
                hud.heading = Some("Game Statistics".to_string());
                hud.lines = session.stats().lounge_lines().to_vec();
                hud.footer = Some("Click anywhere to return to the lobby".to_string());
            }
            GamePhase::Playing | GamePhase::GameOver => {
                let state = session.state();
                hud.score = Some(format!("Score: {}", state.score));
                hud.shield = Some(ShieldReadout::new(
                    state.shield,
                    now_ms,
                    session.settings().effective_blink(),
                ));
                hud.notice = session.notice().map(|n| n.lines());
            }
        }

        hud
    }
}
