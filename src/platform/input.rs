//! Input mapping
//!
//! Turns raw key names and pointer positions (already in canvas units) into
//! held controls for the tick and discrete `UiAction`s for the session.

use glam::Vec2;

use crate::sim::{GamePhase, Rect, TickInput, UiAction};

/// Primary lobby control
pub const SORTIE_BUTTON: Rect = Rect::new(250.0, 450.0, 120.0, 70.0);
/// Secondary lobby control, directly below sortie
pub const MENU_BUTTON: Rect = Rect::new(250.0, 520.0, 120.0, 70.0);

/// Logical key a browser key name maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Left,
    Right,
    /// Space fires and confirms
    FireConfirm,
    Confirm,
}

/// Map a `KeyboardEvent.key` value to a binding
pub fn binding(key: &str) -> Option<Binding> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(Binding::Left),
        "ArrowRight" | "d" | "D" => Some(Binding::Right),
        " " | "Spacebar" => Some(Binding::FireConfirm),
        "Enter" => Some(Binding::Confirm),
        _ => None,
    }
}

/// Cursor shown over the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Default,
    Pointer,
}

impl CursorHint {
    pub fn css(self) -> &'static str {
        match self {
            CursorHint::Default => "default",
            CursorHint::Pointer => "pointer",
        }
    }
}

/// Which lobby control a click lands on. Sortie wins where both could claim it.
pub fn pointer_action(phase: GamePhase, pos: Vec2) -> UiAction {
    if phase == GamePhase::Lobby {
        if SORTIE_BUTTON.contains_click(pos) {
            return UiAction::Sortie;
        }
        if MENU_BUTTON.contains_click(pos) {
            return UiAction::Menu;
        }
    }
    UiAction::PointerDown
}

/// Held keys plus pointer hover state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    /// Enter held
    pub confirm: bool,
    pub pointer: Option<Vec2>,
    pub sortie_hovered: bool,
    pub menu_hovered: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns the action it triggers, if any.
    ///
    /// Confirm fires on the press edge only, so a key that is already held
    /// (auto-repeat) never acknowledges a screen.
    pub fn key_down(&mut self, key: &str) -> Option<UiAction> {
        let held = match binding(key)? {
            Binding::Left => {
                self.left = true;
                return None;
            }
            Binding::Right => {
                self.right = true;
                return None;
            }
            Binding::FireConfirm => std::mem::replace(&mut self.fire, true),
            Binding::Confirm => std::mem::replace(&mut self.confirm, true),
        };
        (!held).then_some(UiAction::Confirm)
    }

    pub fn key_up(&mut self, key: &str) {
        match binding(key) {
            Some(Binding::Left) => self.left = false,
            Some(Binding::Right) => self.right = false,
            Some(Binding::FireConfirm) => self.fire = false,
            Some(Binding::Confirm) => self.confirm = false,
            None => {}
        }
    }

    /// Drop every held key
    pub fn clear(&mut self) {
        self.left = false;
        self.right = false;
        self.fire = false;
        self.confirm = false;
    }

    pub fn tick_input(&self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            fire: self.fire,
        }
    }

    /// Track the pointer; lobby controls light up under it
    pub fn pointer_moved(&mut self, phase: GamePhase, pos: Vec2) {
        self.pointer = Some(pos);
        let in_lobby = phase == GamePhase::Lobby;
        self.sortie_hovered = in_lobby && SORTIE_BUTTON.contains_inclusive(pos);
        self.menu_hovered = in_lobby && MENU_BUTTON.contains_inclusive(pos);
    }

    pub fn pointer_down(&mut self, phase: GamePhase, pos: Vec2) -> UiAction {
        self.pointer = Some(pos);
        pointer_action(phase, pos)
    }

    pub fn cursor_hint(&self, phase: GamePhase) -> CursorHint {
        match phase {
            GamePhase::Lobby if self.sortie_hovered || self.menu_hovered => CursorHint::Pointer,
            GamePhase::Lounge => CursorHint::Pointer,
            _ => CursorHint::Default,
        }
    }
}
