//! Graph Contexts
//!
//! The two views a pass gets of the frame: [`PrepareContext`] during the
//! mutable preparation phase (device/queue access for uploads and bind-group
//! rebuilds) and [`ExecuteContext`] during read-only command recording.

use crate::renderer::frame_state::FrameState;
use crate::renderer::targets::RenderTargetSet;
use crate::renderer::uniforms::SharedUniforms;
use crate::renderer::RenderSettings;
use crate::scene::content::{DrawItem, SceneContent};
use crate::scene::lighting::LightingState;

/// Shared state available while nodes prepare the frame.
pub struct PrepareContext<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub targets: &'a RenderTargetSet,
    pub shared: &'a SharedUniforms,
    pub frame: &'a FrameState,
    pub lighting: &'a LightingState,
    pub content: &'a SceneContent,
    pub draw_items: &'a [DrawItem],
    pub settings: &'a RenderSettings,
    /// Surface color format, for nodes that render to the swapchain.
    pub surface_format: wgpu::TextureFormat,
}

/// Shared state available while nodes record commands.
pub struct ExecuteContext<'a> {
    pub targets: &'a RenderTargetSet,
    pub shared: &'a SharedUniforms,
    pub surface_view: &'a wgpu::TextureView,
    pub content: &'a SceneContent,
    pub draw_items: &'a [DrawItem],
    pub settings: &'a RenderSettings,
}
