//! Tick-counted enemy and enemy-bullet generators
//!
//! Both generators accumulate simulated time handed to them by the tick, so
//! spawn timing is a pure function of how many ticks ran while playing.

use std::time::Duration;

use rand::Rng;

use super::state::{Bullet, Enemy, GameState};
use crate::consts::*;

/// Fires once per elapsed interval of accumulated time
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalTimer {
    interval: Duration,
    accumulated: Duration,
}

impl IntervalTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulated: Duration::ZERO,
        }
    }

    /// Add time; returns how many whole intervals completed
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.interval.is_zero() {
            return 0;
        }
        self.accumulated += dt;
        let mut fired = 0;
        while self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            fired += 1;
        }
        fired
    }

    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }
}

/// Number of spawns a single advance produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnOrders {
    pub enemies: u32,
    pub enemy_shots: u32,
}

/// The two periodic generators active during play
#[derive(Debug, Clone, PartialEq)]
pub struct Spawner {
    enemy: IntervalTimer,
    enemy_fire: IntervalTimer,
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spawner {
    pub fn new() -> Self {
        Self {
            enemy: IntervalTimer::new(ENEMY_SPAWN_INTERVAL),
            enemy_fire: IntervalTimer::new(ENEMY_FIRE_INTERVAL),
        }
    }

    pub fn advance(&mut self, dt: Duration) -> SpawnOrders {
        SpawnOrders {
            enemies: self.enemy.advance(dt),
            enemy_shots: self.enemy_fire.advance(dt),
        }
    }

    /// Drop any partially accumulated interval on both generators
    pub fn reset(&mut self) {
        self.enemy.reset();
        self.enemy_fire.reset();
    }
}

/// Advance the spawners and apply whatever they produced
pub fn run_spawner(state: &mut GameState, dt: Duration) {
    let orders = state.spawner.advance(dt);

    for _ in 0..orders.enemies {
        spawn_enemy(state);
    }
    for _ in 0..orders.enemy_shots {
        enemy_shoot(state);
    }
}

/// New enemy at a random x along the top edge
pub fn spawn_enemy(state: &mut GameState) {
    let x = state.rng.random_range(0.0..CANVAS_WIDTH - ENEMY_SIZE);
    state.enemies.push(Enemy::new(x));
}

/// A random enemy drops a bullet; nothing happens with no enemies on screen
pub fn enemy_shoot(state: &mut GameState) {
    if state.enemies.is_empty() {
        return;
    }
    let index = state.rng.random_range(0..state.enemies.len());
    let bullet = Bullet::from_enemy(&state.enemies[index]);
    state.enemy_bullets.push(bullet);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_interval_timer_fires_on_boundary() {
        let mut timer = IntervalTimer::new(Duration::from_millis(1000));
        assert_eq!(timer.advance(Duration::from_millis(999)), 0);
        assert_eq!(timer.advance(Duration::from_millis(1)), 1);
        assert_eq!(timer.advance(Duration::from_millis(2500)), 2);
        // 500 ms carried over
        assert_eq!(timer.advance(Duration::from_millis(499)), 0);
        assert_eq!(timer.advance(Duration::from_millis(1)), 1);
    }

    #[test]
    fn test_reset_discards_partial_interval() {
        let mut timer = IntervalTimer::new(Duration::from_millis(1000));
        timer.advance(Duration::from_millis(900));
        timer.reset();
        assert_eq!(timer.advance(Duration::from_millis(900)), 0);
    }

    #[test]
    fn test_enemy_shoot_without_enemies_is_noop() {
        let mut state = GameState::new(5);
        enemy_shoot(&mut state);
        assert!(state.enemy_bullets.is_empty());
    }

    #[test]
    fn test_enemy_shot_leaves_bottom_center() {
        let mut state = GameState::new(5);
        state.enemies.push(Enemy::new(100.0));
        state.enemies[0].pos.y = 50.0;
        enemy_shoot(&mut state);
        assert_eq!(state.enemy_bullets.len(), 1);
        let bullet = &state.enemy_bullets[0];
        assert_eq!(bullet.pos.x, 118.0);
        assert_eq!(bullet.pos.y, 90.0);
        assert!(bullet.vel_y > 0.0);
    }

    #[test]
    fn test_spawned_enemy_inside_canvas() {
        let mut state = GameState::new(11);
        for _ in 0..500 {
            spawn_enemy(&mut state);
        }
        for enemy in &state.enemies {
            assert!(enemy.pos.x >= 0.0 && enemy.pos.x < CANVAS_WIDTH - ENEMY_SIZE);
            assert_eq!(enemy.pos.y, 0.0);
        }
    }

    #[test]
    fn test_run_spawner_fires_from_live_enemy() {
        let mut state = GameState::new(3);
        state.enemies.push(Enemy::new(60.0));
        run_spawner(&mut state, ENEMY_FIRE_INTERVAL - Duration::from_millis(1));
        assert!(state.enemy_bullets.is_empty());
        // Keep only the placed enemy; the 1 s generator added another
        state.enemies.truncate(1);

        run_spawner(&mut state, Duration::from_millis(1));
        assert_eq!(state.enemy_bullets.len(), 1);
        assert_eq!(state.enemy_bullets[0].pos.x, 78.0);
    }

    proptest! {
        #[test]
        fn spawn_count_tracks_elapsed_time(steps in prop::collection::vec(1u64..250_000, 1..200)) {
            let mut spawner = Spawner::new();
            let mut total = Duration::ZERO;
            let mut enemies = 0u64;
            let mut shots = 0u64;
            for micros in steps {
                let dt = Duration::from_micros(micros);
                total += dt;
                let orders = spawner.advance(dt);
                enemies += u64::from(orders.enemies);
                shots += u64::from(orders.enemy_shots);
            }
            let expected = (total.as_nanos() / ENEMY_SPAWN_INTERVAL.as_nanos()) as u64;
            prop_assert_eq!(enemies, expected);
            let expected_shots = (total.as_nanos() / ENEMY_FIRE_INTERVAL.as_nanos()) as u64;
            prop_assert_eq!(shots, expected_shots);
        }
    }
}
