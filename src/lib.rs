//! Galaxy Defender - A single-screen arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, spawning, phases)
//! - `session`: Phase controller tying screens to the simulation
//! - `renderer`: WebGPU rendering pipeline and HUD model
//! - `platform`: Clock, fixed-step driver and input mapping
//! - `audio`: Fire-and-forget sound cues

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod stats;

pub use audio::{AudioManager, AudioSink, NullAudio, SoundCue};
pub use session::{GameOverNotice, Session};
pub use settings::Settings;
pub use stats::SessionStats;

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Fixed simulation timestep (one tick per 60 Hz display refresh)
    pub const SIM_DT: Duration = Duration::from_micros(16_667);
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame gap fed into the accumulator
    pub const MAX_FRAME_GAP: Duration = Duration::from_millis(100);

    /// Logical canvas dimensions
    pub const CANVAS_WIDTH: f32 = 400.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Player craft
    pub const PLAYER_START_X: f32 = 180.0;
    pub const PLAYER_START_Y: f32 = 550.0;
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const PLAYER_SPEED: f32 = 5.0;

    /// Projectiles (units per tick)
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 10.0;
    pub const BULLET_SPEED: f32 = 7.0;
    pub const ENEMY_BULLET_SPEED: f32 = 4.0;

    /// Enemies
    pub const ENEMY_SIZE: f32 = 40.0;
    pub const ENEMY_SPEED: f32 = 2.0;

    /// Pickups
    pub const PICKUP_SIZE: f32 = 12.0;
    pub const PICKUP_SPEED: f32 = 2.0;
    pub const PICKUP_DROP_CHANCE: f64 = 0.3;

    /// Burst-fire weapon limiter
    pub const BURST_LIMIT: u32 = 5;
    pub const FIRE_COOLDOWN: Duration = Duration::from_millis(200);

    /// Spawner intervals
    pub const ENEMY_SPAWN_INTERVAL: Duration = Duration::from_millis(1000);
    pub const ENEMY_FIRE_INTERVAL: Duration = Duration::from_millis(1500);

    /// Shield (percent)
    pub const SHIELD_MAX: u32 = 100;
    pub const SHIELD_GAME_OVER: u32 = 10;
    pub const ENEMY_CONTACT_DAMAGE: u32 = 5;
    pub const ENEMY_BULLET_DAMAGE: u32 = 10;
    pub const PICKUP_HEAL: u32 = 5;

    /// Scoring
    pub const KILL_SCORE: u64 = 1;
    pub const PICKUP_SCORE: u64 = 10;

    /// Explosion particles
    pub const PARTICLE_BURST: usize = 10;
    pub const PARTICLE_LIFETIME: u32 = 30;

    /// Background starfield
    pub const STAR_COUNT: usize = 50;

    /// Shield readout blinks at or below this level
    pub const SHIELD_BLINK_LEVEL: u32 = 20;
    pub const SHIELD_BLINK_HALF_PERIOD_MS: f64 = 500.0;
}
