//! Session statistics
//!
//! Cumulative counters for the lifetime of the process. Kept in memory only;
//! serde exists for logging the final report.

use serde::{Deserialize, Serialize};

/// Counters surviving across playthroughs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Runs that ended with a depleted shield
    pub deaths: u32,
    /// Enemies destroyed by player bullets
    pub enemies_killed: u64,
    /// Sum of final scores
    pub total_score: u64,
    pub games_played: u32,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_game_started(&mut self) {
        self.games_played += 1;
    }

    pub fn record_kill(&mut self) {
        self.enemies_killed += 1;
    }

    /// Fold a finished run into the totals
    pub fn record_death(&mut self, score: u64) {
        self.deaths += 1;
        self.total_score += score;
    }

    /// Lines shown on the lounge screen
    pub fn lounge_lines(&self) -> [String; 4] {
        [
            format!("Collisions: {}", self.deaths),
            format!("Enemies destroyed: {}", self.enemies_killed),
            format!("Total score: {}", self.total_score),
            format!("Games played: {}", self.games_played),
        ]
    }
}
