//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time and the fixed-step frame loop
//! - Input events

pub mod input;
pub mod time;

pub use input::{CursorHint, InputState, MENU_BUTTON, SORTIE_BUTTON, pointer_action};
pub use time::{Clock, FixedStep, FrameDriver, ManualClock, SystemClock};
