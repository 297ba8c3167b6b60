//! WebGPU rendering module
//!
//! The scene is flat-colored triangles built on the CPU each frame; text is
//! described by the HUD model and painted by the host.

pub mod hud;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;
pub mod viewport;

pub use hud::{HudModel, ShieldReadout};
pub use pipeline::RenderState;
pub use vertex::Vertex;
pub use viewport::Viewport;
