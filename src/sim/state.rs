//! Game state and core simulation types
//!
//! The whole world lives in one `GameState` that the tick and the session
//! pass around by reference.

use std::time::Duration;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::spawner::Spawner;
use crate::consts::*;

/// Seed offset for the decoration RNG, keeps visuals off the gameplay stream
const FX_SEED_OFFSET: u64 = 0x9E37_79B9_7F4A_7C15;

/// Default particle cap when no settings override it
pub const MAX_PARTICLES: usize = 512;

/// Something the simulation wants the outside world to know about.
///
/// Drained once per tick by the session, which turns them into statistics
/// and sound cues.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Player bullet fired
    ShotFired,
    /// Enemy destroyed by a player bullet
    EnemyDestroyed,
    /// Pickup collected by the player
    PickupCollected,
    /// Shield took damage (enemy contact or enemy bullet)
    PlayerHit,
    /// Shield fell to the game-over threshold
    ShieldDepleted { score: u64 },
}

/// The player's craft
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            size: Vec2::splat(PLAYER_SIZE),
            speed: PLAYER_SPEED,
        }
    }
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Move horizontally, staying inside the canvas
    pub fn strafe(&mut self, direction: f32) {
        let max_x = CANVAS_WIDTH - self.size.x;
        self.pos.x = (self.pos.x + direction * self.speed).clamp(0.0, max_x);
    }
}

/// A projectile. Player bullets travel up, enemy bullets travel down.
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    pub size: Vec2,
    /// Signed vertical speed per tick (negative is up)
    pub vel_y: f32,
    /// Consumed this tick, removed at compaction
    pub hit: bool,
}

impl Bullet {
    /// Bullet fired from the nose of the player craft
    pub fn from_player(player: &Player) -> Self {
        Self {
            pos: Vec2::new(
                player.pos.x + player.size.x / 2.0 - BULLET_WIDTH / 2.0,
                player.pos.y,
            ),
            size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            vel_y: -BULLET_SPEED,
            hit: false,
        }
    }

    /// Bullet dropped from the bottom-center of an enemy
    pub fn from_enemy(enemy: &Enemy) -> Self {
        Self {
            pos: Vec2::new(
                enemy.pos.x + enemy.size.x / 2.0 - BULLET_WIDTH / 2.0,
                enemy.pos.y + enemy.size.y,
            ),
            size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            vel_y: ENEMY_BULLET_SPEED,
            hit: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// A descending enemy saucer
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub hit: bool,
}

impl Enemy {
    pub fn new(x: f32) -> Self {
        Self {
            pos: Vec2::new(x, 0.0),
            size: Vec2::splat(ENEMY_SIZE),
            speed: ENEMY_SPEED,
            hit: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Star item that heals the shield
#[derive(Debug, Clone, PartialEq)]
pub struct Pickup {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub collected: bool,
}

impl Pickup {
    /// Drop a pickup centered horizontally under a destroyed enemy
    pub fn dropped_by(enemy_pos: Vec2) -> Self {
        Self {
            pos: Vec2::new(
                enemy_pos.x + ENEMY_SIZE / 2.0 - PICKUP_SIZE / 2.0,
                enemy_pos.y,
            ),
            size: Vec2::splat(PICKUP_SIZE),
            speed: PICKUP_SPEED,
            collected: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// A particle for explosion effects
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Ticks remaining
    pub life: u32,
    /// Hue in degrees, drawn at full saturation
    pub hue: f32,
}

/// Background star (visual only)
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
}

/// Burst-then-cooldown weapon limiter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FireControl {
    /// Shots fired since the last cooldown
    pub shots_in_burst: u32,
    /// Run time at which the current cooldown began
    pub cooldown_since: Option<Duration>,
}

impl FireControl {
    pub fn on_cooldown(&self) -> bool {
        self.cooldown_since.is_some()
    }

    /// Clear the cooldown once it has lasted long enough
    pub fn refresh(&mut self, now: Duration) {
        if let Some(since) = self.cooldown_since {
            if now.saturating_sub(since) >= FIRE_COOLDOWN {
                self.cooldown_since = None;
            }
        }
    }

    /// Count a shot, entering cooldown when the burst is spent
    pub fn record_shot(&mut self, now: Duration) {
        self.shots_in_burst += 1;
        if self.shots_in_burst >= BURST_LIMIT {
            self.cooldown_since = Some(now);
            self.shots_in_burst = 0;
        }
    }
}

/// Complete world state for one session (deterministic given the seed)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Gameplay RNG (spawn positions, shooter choice, pickup drops)
    pub rng: Pcg32,
    /// Decoration RNG (stars, particles)
    pub fx_rng: Pcg32,
    /// Simulated time since the run started
    pub elapsed: Duration,
    pub score: u64,
    /// Shield percentage, always within [0, SHIELD_MAX]
    pub shield: u32,
    /// Enemies destroyed by bullets this run
    pub kills: u32,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub pickups: Vec<Pickup>,
    pub particles: Vec<Particle>,
    pub stars: Vec<Star>,
    pub fire: FireControl,
    pub spawner: Spawner,
    /// Set once the shield is depleted; the tick refuses to advance after that
    pub run_over: bool,
    /// Particle cap (0 disables effects)
    pub max_particles: usize,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            rng: Pcg32::seed_from_u64(seed),
            fx_rng: Pcg32::seed_from_u64(seed.wrapping_add(FX_SEED_OFFSET)),
            elapsed: Duration::ZERO,
            score: 0,
            shield: SHIELD_MAX,
            kills: 0,
            player: Player::default(),
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            enemies: Vec::new(),
            pickups: Vec::new(),
            particles: Vec::new(),
            stars: Vec::with_capacity(STAR_COUNT),
            fire: FireControl::default(),
            spawner: Spawner::new(),
            run_over: false,
            max_particles: MAX_PARTICLES,
            events: Vec::new(),
        };

        for _ in 0..STAR_COUNT {
            let star = Star {
                pos: Vec2::new(
                    state.fx_rng.random_range(0.0..CANVAS_WIDTH),
                    state.fx_rng.random_range(0.0..CANVAS_HEIGHT),
                ),
                size: state.fx_rng.random_range(1.0..3.0),
                speed: state.fx_rng.random_range(0.5..1.5),
            };
            state.stars.push(star);
        }

        state
    }

    /// Restart the gameplay RNG stream (decoration keeps its own)
    pub fn reseed(&mut self, seed: u64) {
        self.rng = Pcg32::seed_from_u64(seed);
    }

    /// Put the run back to its starting conditions.
    ///
    /// Stars keep drifting across runs; everything that affects play resets,
    /// including both spawner timers.
    pub fn reset_run(&mut self) {
        self.elapsed = Duration::ZERO;
        self.score = 0;
        self.shield = SHIELD_MAX;
        self.kills = 0;
        self.player = Player::default();
        self.bullets.clear();
        self.enemy_bullets.clear();
        self.enemies.clear();
        self.pickups.clear();
        self.particles.clear();
        self.fire = FireControl::default();
        self.spawner.reset();
        self.run_over = false;
        self.events.clear();
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Subtract shield, flagging the end of the run at the threshold.
    /// Returns true if this hit ended the run.
    pub fn damage_shield(&mut self, amount: u32) -> bool {
        self.shield = self.shield.saturating_sub(amount);
        self.push_event(GameEvent::PlayerHit);
        if self.shield <= SHIELD_GAME_OVER {
            self.run_over = true;
            self.push_event(GameEvent::ShieldDepleted { score: self.score });
            return true;
        }
        false
    }

    pub fn heal_shield(&mut self, amount: u32) {
        self.shield = (self.shield + amount).min(SHIELD_MAX);
    }

    /// Radial burst of particles at a destruction point
    pub fn spawn_burst(&mut self, at: Vec2) {
        use std::f32::consts::TAU;

        for _ in 0..PARTICLE_BURST {
            if self.particles.len() >= self.max_particles {
                break;
            }
            let angle = self.fx_rng.random_range(0.0..TAU);
            let speed = self.fx_rng.random_range(1.0..3.0);
            let particle = Particle {
                pos: at,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                radius: self.fx_rng.random_range(2.0..5.0),
                life: PARTICLE_LIFETIME,
                hue: self.fx_rng.random_range(0.0..360.0),
            };
            self.particles.push(particle);
        }
    }

    /// Roll the pickup drop for a kill
    pub fn roll_pickup_drop(&mut self) -> bool {
        self.rng.random_bool(PICKUP_DROP_CHANCE)
    }
}
