//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, time carried as `Duration`
//! - Seeded RNG only
//! - Mark-then-compact removal, so iteration order never changes outcomes
//! - No rendering or platform dependencies

pub mod collision;
pub mod phase;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Rect, overlaps};
pub use phase::{GamePhase, UiAction, next_phase};
pub use spawner::{IntervalTimer, Spawner};
pub use state::{
    Bullet, Enemy, FireControl, GameEvent, GameState, MAX_PARTICLES, Particle, Pickup, Player,
    Star,
};
pub use tick::{TickInput, tick};
