//! Fixed timestep simulation tick
//!
//! Core game loop that advances the world deterministically. Every pass that
//! removes entities marks them first and compacts the collection afterwards.

use std::time::Duration;

use glam::Vec2;
use rand::Rng;

use super::collision::overlaps;
use super::spawner::run_spawner;
use super::state::{Bullet, GameEvent, GameState, Pickup};
use crate::consts::*;

/// Held controls for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl TickInput {
    fn direction(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Advance the game state by one fixed timestep.
///
/// Does nothing once the run is over; the session decides what comes next.
pub fn tick(state: &mut GameState, input: &TickInput, dt: Duration) {
    if state.run_over {
        return;
    }
    state.elapsed += dt;

    update_stars(state);
    update_particles(state);
    update_pickups(state);
    state.fire.refresh(state.elapsed);
    update_player(state, input);
    update_bullets(state);

    if update_enemies(state) {
        return;
    }
    resolve_bullet_hits(state);
    if update_enemy_bullets(state) {
        return;
    }

    run_spawner(state, dt);
}

fn update_stars(state: &mut GameState) {
    for star in &mut state.stars {
        star.pos.y += star.speed;
        if star.pos.y > CANVAS_HEIGHT {
            star.pos.y = 0.0;
            star.pos.x = state.fx_rng.random_range(0.0..CANVAS_WIDTH);
        }
    }
}

fn update_particles(state: &mut GameState) {
    for particle in &mut state.particles {
        particle.pos += particle.vel;
        particle.life = particle.life.saturating_sub(1);
    }
    state.particles.retain(|p| p.life > 0);
}

fn update_pickups(state: &mut GameState) {
    let player_rect = state.player.rect();
    let mut collected = 0;

    for pickup in &mut state.pickups {
        pickup.pos.y += pickup.speed;
        if overlaps(&pickup.rect(), &player_rect) {
            pickup.collected = true;
            collected += 1;
        }
    }

    for _ in 0..collected {
        state.score += PICKUP_SCORE;
        state.heal_shield(PICKUP_HEAL);
        state.push_event(GameEvent::PickupCollected);
    }

    state
        .pickups
        .retain(|p| !p.collected && p.pos.y < CANVAS_HEIGHT);
}

fn update_player(state: &mut GameState, input: &TickInput) {
    state.player.strafe(input.direction());

    if input.fire && !state.fire.on_cooldown() {
        let bullet = Bullet::from_player(&state.player);
        state.bullets.push(bullet);
        state.fire.record_shot(state.elapsed);
        state.push_event(GameEvent::ShotFired);
    }
}

fn update_bullets(state: &mut GameState) {
    for bullet in &mut state.bullets {
        bullet.pos.y += bullet.vel_y;
    }
    state.bullets.retain(|b| b.pos.y > 0.0);
}

/// Move enemies and resolve contact with the player. Returns true if a
/// contact ended the run.
fn update_enemies(state: &mut GameState) -> bool {
    let player_rect = state.player.rect();
    let mut ended = false;

    for i in 0..state.enemies.len() {
        let rect = {
            let enemy = &mut state.enemies[i];
            enemy.pos.y += enemy.speed;
            enemy.rect()
        };
        if !overlaps(&rect, &player_rect) {
            continue;
        }

        state.enemies[i].hit = true;
        state.spawn_burst(rect.center());
        if state.damage_shield(ENEMY_CONTACT_DAMAGE) {
            ended = true;
            break;
        }
    }

    state
        .enemies
        .retain(|e| !e.hit && e.pos.y < CANVAS_HEIGHT);
    ended
}

/// Each enemy is credited to at most one bullet, and each bullet to at most
/// one enemy.
fn resolve_bullet_hits(state: &mut GameState) {
    let mut kills: Vec<(Vec2, Vec2)> = Vec::new();

    for enemy in &mut state.enemies {
        let rect = enemy.rect();
        let Some(bullet) = state
            .bullets
            .iter_mut()
            .find(|b| !b.hit && overlaps(&b.rect(), &rect))
        else {
            continue;
        };
        bullet.hit = true;
        enemy.hit = true;
        kills.push((enemy.pos, rect.center()));
    }

    if kills.is_empty() {
        return;
    }

    for (pos, center) in kills {
        state.score += KILL_SCORE;
        state.kills += 1;
        state.spawn_burst(center);
        if state.roll_pickup_drop() {
            state.pickups.push(Pickup::dropped_by(pos));
        }
        state.push_event(GameEvent::EnemyDestroyed);
    }

    state.enemies.retain(|e| !e.hit);
    state.bullets.retain(|b| !b.hit);
}

/// Move enemy bullets and resolve hits on the player. Returns true if a hit
/// ended the run.
fn update_enemy_bullets(state: &mut GameState) -> bool {
    let player_rect = state.player.rect();
    let mut ended = false;

    for i in 0..state.enemy_bullets.len() {
        let rect = {
            let bullet = &mut state.enemy_bullets[i];
            bullet.pos.y += bullet.vel_y;
            bullet.rect()
        };
        if !overlaps(&rect, &player_rect) {
            continue;
        }

        state.enemy_bullets[i].hit = true;
        state.spawn_burst(player_rect.center());
        if state.damage_shield(ENEMY_BULLET_DAMAGE) {
            ended = true;
            break;
        }
    }

    state
        .enemy_bullets
        .retain(|b| !b.hit && b.pos.y < CANVAS_HEIGHT);
    ended
}
