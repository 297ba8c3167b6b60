//! Per-phase geometry
//!
//! Turns the session into one triangle list in canvas coordinates. Purely a
//! read of the session; text lives in `hud`.

use super::shapes;
use super::vertex::{Vertex, colors, hsl, with_alpha};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, PARTICLE_LIFETIME};
use crate::platform::{InputState, MENU_BUTTON, SORTIE_BUTTON};
use crate::session::Session;
use crate::sim::{GamePhase, GameState, Rect};

const FULL_CANVAS: Rect = Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT);

/// Star item radius and point count
const PICKUP_RADIUS: f32 = 6.0;
const PICKUP_POINTS: u32 = 5;
const PICKUP_INSET: f32 = 0.5;

pub fn build(session: &Session, input: &InputState) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(4096);

    match session.phase() {
        GamePhase::Lobby => {
            vertices.extend(shapes::rect(&FULL_CANVAS, colors::LOBBY));
            vertices.extend(button(&SORTIE_BUTTON, input.sortie_hovered));
            vertices.extend(button(&MENU_BUTTON, input.menu_hovered));
        }
        GamePhase::Tutorial => {
            vertices.extend(shapes::rect(&FULL_CANVAS, colors::LOBBY));
            vertices.extend(shapes::rect(&FULL_CANVAS, colors::SCRIM));
        }
        GamePhase::Lounge => {
            vertices.extend(shapes::rect(&FULL_CANVAS, colors::LOUNGE));
        }
        GamePhase::Playing => {
            world(&mut vertices, session.state(), session.settings().starfield);
        }
        GamePhase::GameOver => {
            world(&mut vertices, session.state(), session.settings().starfield);
            vertices.extend(shapes::rect(&FULL_CANVAS, with_alpha(colors::SCRIM, 0.5)));
        }
    }

    vertices
}

fn button(bounds: &Rect, hovered: bool) -> Vec<Vertex> {
    let fill = if hovered {
        colors::BUTTON_HOVER
    } else {
        colors::BUTTON
    };
    let mut vertices = shapes::rect(bounds, fill);
    vertices.extend(shapes::rect_outline(bounds, 2.0, colors::BUTTON_EDGE));
    vertices
}

/// Draw order follows the play screen: stars, particles, items, enemies,
/// bullets, enemy bullets, player
fn world(vertices: &mut Vec<Vertex>, state: &GameState, starfield: bool) {
    vertices.extend(shapes::rect(&FULL_CANVAS, colors::SPACE));

    if starfield {
        for star in &state.stars {
            vertices.extend(shapes::circle(star.pos, star.size, colors::STAR, 8));
        }
    }

    for particle in &state.particles {
        let alpha = particle.life as f32 / PARTICLE_LIFETIME as f32;
        let color = hsl(particle.hue, 1.0, 0.6, alpha);
        vertices.extend(shapes::circle(particle.pos, particle.radius, color, 10));
    }

    for pickup in &state.pickups {
        let center = pickup.rect().center();
        vertices.extend(shapes::star(
            center,
            PICKUP_RADIUS,
            PICKUP_POINTS,
            PICKUP_INSET,
            colors::PICKUP,
        ));
    }

    for enemy in &state.enemies {
        vertices.extend(shapes::saucer(&enemy.rect()));
    }

    for bullet in &state.bullets {
        vertices.extend(shapes::rect(&bullet.rect(), colors::BULLET));
    }

    for bullet in &state.enemy_bullets {
        vertices.extend(shapes::rect(&bullet.rect(), colors::ENEMY_BULLET));
    }

    vertices.extend(shapes::ship(&state.player.rect(), 1.0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{Enemy, UiAction};
    use crate::stats::SessionStats;
    use glam::Vec2;

    fn bounds(vertices: &[Vertex]) -> Option<(Vec2, Vec2)> {
        let first = vertices.first()?;
        let start = Vec2::from(first.position);
        Some(vertices.iter().fold((start, start), |(lo, hi), v| {
            let p = Vec2::from(v.position);
            (lo.min(p), hi.max(p))
        }))
    }

    fn playing() -> Session {
        let mut session = Session::new(SessionStats::new(), Settings::default());
        session.handle_action(UiAction::Sortie);
        session.handle_action(UiAction::Confirm);
        session
    }

    #[test]
    fn test_lobby_hover_changes_button_color() {
        let session = Session::new(SessionStats::new(), Settings::default());
        let idle = build(&session, &InputState::new());
        let mut input = InputState::new();
        input.pointer_moved(GamePhase::Lobby, SORTIE_BUTTON.center());
        let hovered = build(&session, &input);
        assert_eq!(idle.len(), hovered.len());
        assert!(hovered.iter().any(|v| v.color == colors::BUTTON_HOVER));
        assert!(!idle.iter().any(|v| v.color == colors::BUTTON_HOVER));
    }

    #[test]
    fn test_enemies_add_geometry() {
        let mut session = playing();
        let empty = build(&session, &InputState::new()).len();
        session.state_mut().enemies.push(Enemy::new(50.0));
        let one = build(&session, &InputState::new()).len();
        assert!(one > empty);
    }

    #[test]
    fn test_starfield_setting() {
        let with_stars = build(&playing(), &InputState::new()).len();
        let settings = Settings {
            starfield: false,
            ..Default::default()
        };
        let mut session = Session::new(SessionStats::new(), settings);
        session.handle_action(UiAction::Sortie);
        session.handle_action(UiAction::Confirm);
        let without = build(&session, &InputState::new()).len();
        assert!(with_stars > without);
    }

    #[test]
    fn test_scene_stays_on_canvas() {
        let session = playing();
        let vertices = build(&session, &InputState::new());
        let Some((lo, hi)) = bounds(&vertices) else {
            panic!("empty scene");
        };
        assert!(lo.x >= -3.0 && lo.y >= -3.0);
        assert!(hi.x <= CANVAS_WIDTH + 3.0 && hi.y <= CANVAS_HEIGHT + 3.0);
    }
}
