//! Phase controller
//!
//! `Session` owns the world, the phase and the injected statistics. It is the
//! only place phases change: user actions arrive through `handle_action`, and
//! the end of a run is picked up from simulation events at the tick boundary.

use std::time::Duration;

use crate::audio::{AudioSink, SoundCue};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, UiAction, next_phase, tick};
use crate::stats::SessionStats;

/// Seed used when settings do not provide one
pub const DEFAULT_SEED: u64 = 0x6A1A_C7DE;

/// End-of-run message, shown until acknowledged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverNotice {
    pub score: u64,
}

impl GameOverNotice {
    pub fn lines(&self) -> [String; 2] {
        [
            "No more fighting is possible. Retreat!".to_string(),
            format!("Score: {}", self.score),
        ]
    }
}

pub struct Session {
    state: GameState,
    stats: SessionStats,
    settings: Settings,
    phase: GamePhase,
    tutorial_seen: bool,
    notice: Option<GameOverNotice>,
    base_seed: u64,
    /// Held input must be dropped before the next frame
    input_reset: bool,
}

impl Session {
    pub fn new(stats: SessionStats, settings: Settings) -> Self {
        let seed = settings.seed.unwrap_or(DEFAULT_SEED);
        Self::with_seed(stats, settings, seed)
    }

    pub fn with_seed(stats: SessionStats, settings: Settings, seed: u64) -> Self {
        let mut state = GameState::new(seed);
        state.max_particles = settings.max_particles();
        Self {
            state,
            stats,
            settings,
            phase: GamePhase::Lobby,
            tutorial_seen: false,
            notice: None,
            base_seed: seed,
            input_reset: false,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn into_stats(self) -> SessionStats {
        self.stats
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn notice(&self) -> Option<&GameOverNotice> {
        self.notice.as_ref()
    }

    pub fn tutorial_seen(&self) -> bool {
        self.tutorial_seen
    }

    /// True once after any transition that must clear held keys
    pub fn take_input_reset(&mut self) -> bool {
        std::mem::take(&mut self.input_reset)
    }

    /// Apply a user activation. Returns true if the phase changed.
    pub fn handle_action(&mut self, action: UiAction) -> bool {
        match next_phase(self.phase, action, self.tutorial_seen) {
            Some(target) => {
                self.enter(target);
                true
            }
            None => false,
        }
    }

    /// Advance the simulation by one step if playing.
    ///
    /// Events raised by the tick become statistics and sound cues. A depleted
    /// shield moves the session to game over after the tick has finished.
    pub fn step(&mut self, input: &TickInput, dt: Duration, audio: &mut impl AudioSink) {
        if !self.phase.runs_simulation() {
            return;
        }

        tick(&mut self.state, input, dt);

        let mut final_score = None;
        for event in self.state.drain_events() {
            match event {
                GameEvent::ShotFired => audio.play(SoundCue::Shoot),
                GameEvent::EnemyDestroyed => {
                    self.stats.record_kill();
                    audio.play(SoundCue::Explosion);
                }
                GameEvent::PickupCollected => audio.play(SoundCue::Item),
                GameEvent::PlayerHit => audio.play(SoundCue::Hit),
                GameEvent::ShieldDepleted { score } => final_score = Some(score),
            }
        }

        if let Some(score) = final_score {
            self.finish_run(score, audio);
        }
    }

    fn finish_run(&mut self, score: u64, audio: &mut impl AudioSink) {
        self.stats.record_death(score);
        audio.play(SoundCue::GameOver);
        self.notice = Some(GameOverNotice { score });
        log::info!(
            "Game over: score {score}, deaths {}, total score {}",
            self.stats.deaths,
            self.stats.total_score
        );
        self.transition(GamePhase::GameOver);
    }

    fn enter(&mut self, target: GamePhase) {
        match target {
            GamePhase::Tutorial => self.tutorial_seen = true,
            GamePhase::Playing => self.start_game(),
            GamePhase::Lobby => {
                if self.phase == GamePhase::GameOver {
                    self.notice = None;
                    self.state.reset_run();
                }
                self.input_reset = true;
            }
            GamePhase::Lounge | GamePhase::GameOver => {}
        }
        self.transition(target);
    }

    fn start_game(&mut self) {
        self.stats.record_game_started();
        let seed = self
            .base_seed
            .wrapping_add(u64::from(self.stats.games_played));
        self.state.reseed(seed);
        self.state.reset_run();
        self.state.max_particles = self.settings.max_particles();
        self.notice = None;
        self.input_reset = true;
        log::info!(
            "Starting game {} (seed {seed:#x})",
            self.stats.games_played
        );
    }

    fn transition(&mut self, target: GamePhase) {
        log::info!("Phase: {} -> {}", self.phase.name(), target.name());
        self.phase = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::platform::InputState;
    use crate::sim::{Bullet, Enemy};

    #[derive(Default)]
    struct Recorder(Vec<SoundCue>);

    impl AudioSink for Recorder {
        fn play(&mut self, cue: SoundCue) {
            self.0.push(cue);
        }
    }

    fn session() -> Session {
        Session::new(SessionStats::new(), Settings::default())
    }

    fn playing_session() -> Session {
        let mut session = session();
        session.handle_action(UiAction::Sortie);
        session.handle_action(UiAction::Confirm);
        assert_eq!(session.phase(), GamePhase::Playing);
        session
    }

    /// Queue an enemy bullet that drops the shield from 15 to 5 next step
    fn force_game_over(session: &mut Session, audio: &mut Recorder) {
        let state = session.state_mut();
        state.shield = 15;
        let mut shooter = Enemy::new(state.player.pos.x);
        shooter.pos.y = state.player.pos.y - 50.0;
        state.enemy_bullets.push(Bullet::from_enemy(&shooter));
        session.step(&TickInput::default(), SIM_DT, audio);
    }

    #[test]
    fn test_tutorial_only_on_first_sortie() {
        let mut session = session();
        assert!(session.handle_action(UiAction::Sortie));
        assert_eq!(session.phase(), GamePhase::Tutorial);
        assert!(session.tutorial_seen());
        session.handle_action(UiAction::PointerDown);
        assert_eq!(session.phase(), GamePhase::Playing);

        force_game_over(&mut session, &mut Recorder::default());
        session.handle_action(UiAction::Confirm);
        assert_eq!(session.phase(), GamePhase::Lobby);

        for _ in 0..3 {
            session.handle_action(UiAction::Sortie);
            assert_eq!(session.phase(), GamePhase::Playing);
            force_game_over(&mut session, &mut Recorder::default());
            session.handle_action(UiAction::PointerDown);
        }
        assert_eq!(session.stats().games_played, 4);
    }

    #[test]
    fn test_lounge_and_back() {
        let mut session = session();
        session.handle_action(UiAction::Menu);
        assert_eq!(session.phase(), GamePhase::Lounge);
        assert!(!session.handle_action(UiAction::Confirm));
        session.handle_action(UiAction::PointerDown);
        assert_eq!(session.phase(), GamePhase::Lobby);
        // Visiting the lounge does not count as seeing the tutorial
        session.handle_action(UiAction::Sortie);
        assert_eq!(session.phase(), GamePhase::Tutorial);
    }

    #[test]
    fn test_entering_playing_resets_world() {
        let mut session = playing_session();
        let mut audio = Recorder::default();
        let fire = TickInput {
            fire: true,
            right: true,
            ..Default::default()
        };
        for _ in 0..200 {
            session.step(&fire, SIM_DT, &mut audio);
        }
        session.state_mut().score = 55;
        force_game_over(&mut session, &mut audio);
        assert_eq!(session.phase(), GamePhase::GameOver);
        session.handle_action(UiAction::Confirm);
        session.handle_action(UiAction::Sortie);

        let state = session.state();
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.shield, SHIELD_MAX);
        assert!(state.bullets.is_empty());
        assert!(state.enemy_bullets.is_empty());
        assert!(state.enemies.is_empty());
        assert!(state.pickups.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.player.pos.x, PLAYER_START_X);
        assert_eq!(state.player.pos.y, PLAYER_START_Y);
        assert_eq!(state.fire.shots_in_burst, 0);
        assert!(!state.fire.on_cooldown());
    }

    #[test]
    fn test_game_over_updates_stats_and_freezes() {
        let mut session = playing_session();
        let mut audio = Recorder::default();
        session.state_mut().score = 37;
        force_game_over(&mut session, &mut audio);

        assert_eq!(session.phase(), GamePhase::GameOver);
        assert_eq!(session.state().shield, 5);
        assert_eq!(session.stats().deaths, 1);
        assert_eq!(session.stats().total_score, 37);
        assert_eq!(session.notice(), Some(&GameOverNotice { score: 37 }));
        assert_eq!(audio.0, vec![SoundCue::Hit, SoundCue::GameOver]);

        let frozen = session.state().elapsed;
        for _ in 0..120 {
            session.step(&TickInput::default(), SIM_DT, &mut audio);
        }
        assert_eq!(session.state().elapsed, frozen);
        assert!(session.state().enemies.is_empty());
        assert_eq!(session.stats().deaths, 1);

        session.handle_action(UiAction::PointerDown);
        assert_eq!(session.phase(), GamePhase::Lobby);
        assert!(session.notice().is_none());
        assert_eq!(session.state().score, 0);
        assert_eq!(session.state().shield, SHIELD_MAX);
    }

    #[test]
    fn test_held_fire_does_not_dismiss_notice() {
        let mut session = playing_session();
        let mut audio = Recorder::default();
        let mut input = InputState::new();
        if let Some(action) = input.key_down(" ") {
            session.handle_action(action);
        }
        assert_eq!(session.phase(), GamePhase::Playing);

        let state = session.state_mut();
        state.shield = 15;
        let mut shooter = Enemy::new(state.player.pos.x);
        shooter.pos.y = state.player.pos.y - 50.0;
        state.enemy_bullets.push(Bullet::from_enemy(&shooter));
        session.step(&input.tick_input(), SIM_DT, &mut audio);
        assert_eq!(session.phase(), GamePhase::GameOver);

        // Auto-repeat from the trigger that was held through the hit
        for _ in 0..10 {
            if let Some(action) = input.key_down(" ") {
                session.handle_action(action);
            }
        }
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert!(session.notice().is_some());

        input.key_up(" ");
        let action = input.key_down(" ").unwrap();
        session.handle_action(action);
        assert_eq!(session.phase(), GamePhase::Lobby);
        assert!(session.notice().is_none());
    }

    #[test]
    fn test_no_spawns_outside_playing() {
        let mut session = session();
        let mut audio = Recorder::default();
        for _ in 0..600 {
            session.step(&TickInput::default(), SIM_DT, &mut audio);
        }
        assert!(session.state().enemies.is_empty());
        assert_eq!(session.state().elapsed, Duration::ZERO);
    }

    #[test]
    fn test_spawner_restarts_on_new_game() {
        let mut session = playing_session();
        let mut audio = Recorder::default();
        // Half an interval into the first game
        for _ in 0..30 {
            session.step(&TickInput::default(), SIM_DT, &mut audio);
        }
        assert!(session.state().enemies.is_empty());
        force_game_over(&mut session, &mut audio);
        session.handle_action(UiAction::Confirm);
        session.handle_action(UiAction::Sortie);

        for i in 1..=60 {
            session.step(&TickInput::default(), SIM_DT, &mut audio);
            let expected = usize::from(i == 60);
            assert_eq!(session.state().enemies.len(), expected, "step {i}");
        }
    }

    #[test]
    fn test_kills_flow_into_stats_and_audio() {
        let mut session = playing_session();
        let mut audio = Recorder::default();
        let state = session.state_mut();
        let mut enemy = Enemy::new(100.0);
        enemy.pos.y = 100.0;
        state.enemies.push(enemy);
        let mut bullet = Bullet::from_player(&state.player);
        bullet.pos = glam::Vec2::new(118.0, 120.0);
        state.bullets.push(bullet);

        session.step(&TickInput::default(), SIM_DT, &mut audio);

        assert_eq!(session.stats().enemies_killed, 1);
        assert_eq!(session.state().score, KILL_SCORE);
        assert_eq!(audio.0, vec![SoundCue::Explosion]);
    }

    #[test]
    fn test_input_reset_on_start_and_lobby() {
        let mut session = session();
        assert!(!session.take_input_reset());
        session.handle_action(UiAction::Sortie);
        assert!(!session.take_input_reset());
        session.handle_action(UiAction::Confirm);
        assert!(session.take_input_reset());
        assert!(!session.take_input_reset());
    }

    #[test]
    fn test_particles_disabled_by_settings() {
        let settings = Settings {
            particles: false,
            ..Default::default()
        };
        let mut session = Session::new(SessionStats::new(), settings);
        session.handle_action(UiAction::Sortie);
        session.handle_action(UiAction::Confirm);
        assert_eq!(session.state().max_particles, 0);
    }

    #[test]
    fn test_stats_outlive_session() {
        let mut stats = SessionStats::new();
        stats.games_played = 9;
        let mut session = Session::new(stats, Settings::default());
        session.handle_action(UiAction::Sortie);
        session.handle_action(UiAction::Confirm);
        assert_eq!(session.into_stats().games_played, 10);
    }

    #[test]
    fn test_notice_text() {
        let lines = GameOverNotice { score: 12 }.lines();
        assert_eq!(lines[0], "No more fighting is possible. Retreat!");
        assert_eq!(lines[1], "Score: 12");
    }
}
