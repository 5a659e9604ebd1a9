//! Glimmer — a compact deferred-shading demo renderer built on wgpu.
//!
//! One fixed multi-pass pipeline per frame: shadow depth → G-buffer fill →
//! lighting resolve → skybox composite → bloom blur → tone-mapped present →
//! optional debug overlay. See [`renderer::Renderer`] for the frame driver
//! and [`app::run`] for the windowed demo loop.

pub mod app;
pub mod assets;
pub mod errors;
pub mod renderer;
pub mod scene;
pub mod utils;

pub use errors::{RenderError, Result};
pub use renderer::{DebugChannel, RenderSettings, Renderer};
pub use scene::camera::Camera;
pub use scene::lighting::LightingState;
