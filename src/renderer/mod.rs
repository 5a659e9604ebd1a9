//! Renderer
//!
//! Owns the GPU context, the render targets, the shared uniforms, the demo
//! scene content and the render graph, and drives one frame per
//! [`Renderer::render`] call:
//!
//! 1. acquire the surface texture (failure skips the whole frame)
//! 2. rebuild the per-frame state and draw list, upload shared uniforms
//! 3. run every node's `prepare`
//! 4. record and submit the graph, then present
//!
//! The fixed pass topology is: shadow depth → G-buffer fill → lighting
//! resolve → skybox composite → bloom blur → tone-mapped present → optional
//! debug overlay.

pub mod context;
pub mod drawable;
pub mod frame_state;
pub mod graph;
pub mod primitives;
pub mod targets;
pub mod uniforms;

use std::path::Path;

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

use crate::errors::{RenderError, Result};
use crate::scene::camera::Camera;
use crate::scene::content::{DrawItem, SceneContent};
use crate::scene::lighting::LightingState;
use context::GpuContext;
use frame_state::FrameState;
use graph::passes::{
    BloomBlurPass, DebugOverlayPass, GeometryPass, LightingResolvePass, PresentCompositePass,
    ShadowDepthPass, SkyboxCompositePass,
};
use graph::{ExecuteContext, PrepareContext, RenderGraph, RenderNode};
use targets::{RenderTargetSet, deferred_target_specs};
use uniforms::{FrameUniforms, SharedUniforms};

/// G-buffer channel shown by the debug overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugChannel {
    Position,
    Normal,
    Albedo,
}

impl DebugChannel {
    /// The next channel in the F11 cycle.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Position => Self::Normal,
            Self::Normal => Self::Albedo,
            Self::Albedo => Self::Position,
        }
    }
}

/// Renderer configuration, mutated between frames only.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    /// Tone-mapping exposure of the present composite.
    pub exposure: f32,
    /// Number of separable blur iterations (pairs of 2 = full Gaussian
    /// passes). Zero disables the blur and presents the raw bright buffer.
    pub blur_iterations: u32,
    /// Edge length of the square directional shadow map.
    pub shadow_map_size: u32,
    /// When false the shadow map is cleared but never rendered into.
    pub shadows_enabled: bool,
    /// Active debug overlay channel, if any.
    pub debug_channel: Option<DebugChannel>,
    /// Enable vertical synchronization.
    pub vsync: bool,
    /// GPU adapter selection preference.
    pub power_preference: wgpu::PowerPreference,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            exposure: 0.3,
            blur_iterations: 4,
            shadow_map_size: 2048,
            shadows_enabled: true,
            debug_channel: None,
            vsync: true,
            power_preference: wgpu::PowerPreference::HighPerformance,
        }
    }
}

/// The deferred-shading renderer.
pub struct Renderer {
    ctx: GpuContext,
    targets: RenderTargetSet,
    shared: SharedUniforms,
    content: SceneContent,
    lighting: LightingState,
    graph: RenderGraph,
    settings: RenderSettings,

    draw_items: Vec<DrawItem>,
}

impl Renderer {
    /// Initializes the GPU context, all render targets, the demo content and
    /// the validated render graph.
    pub async fn new<W>(
        window: W,
        settings: RenderSettings,
        asset_root: &Path,
        width: u32,
        height: u32,
    ) -> Result<Self>
    where
        W: HasWindowHandle + HasDisplayHandle + Send + Sync + 'static,
    {
        let ctx = GpuContext::new(window, &settings, width, height).await?;
        let device = &ctx.device;

        let targets = RenderTargetSet::new(
            device,
            &deferred_target_specs(settings.shadow_map_size),
            width,
            height,
        )?;
        let shared = SharedUniforms::new(device);
        let content = SceneContent::demo(device, &ctx.queue, &shared, asset_root)?;
        let lighting = LightingState::demo();

        let surface_format = ctx.color_format();
        let nodes: Vec<Box<dyn RenderNode>> = vec![
            Box::new(ShadowDepthPass::new(device, &shared)),
            Box::new(GeometryPass::new(device, &shared)?),
            Box::new(LightingResolvePass::new(device)),
            Box::new(SkyboxCompositePass::new(device, &shared)),
            Box::new(BloomBlurPass::new(device)),
            Box::new(PresentCompositePass::new(device, surface_format)),
            Box::new(DebugOverlayPass::new(device, surface_format)),
        ];
        let graph = RenderGraph::build(nodes)?;

        log::info!(
            "Renderer initialized: {}x{}, {} passes, surface {:?}",
            width,
            height,
            graph.node_count(),
            surface_format
        );

        Ok(Self {
            ctx,
            targets,
            shared,
            content,
            lighting,
            graph,
            settings,
            draw_items: Vec::new(),
        })
    }

    /// Renders one frame.
    ///
    /// A failed surface acquisition abandons the frame before any pass runs
    /// and returns [`RenderError::FrameSkip`]; the caller retries next frame.
    pub fn render(&mut self, camera: &Camera, elapsed: f32) -> Result<()> {
        let output = match self.ctx.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.ctx.reconfigure();
                log::warn!("Surface lost or outdated, reconfigured; skipping frame");
                return Err(RenderError::FrameSkip("surface lost".to_string()));
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                return Err(RenderError::ResourceCreation(
                    "surface out of memory".to_string(),
                ));
            }
            Err(err) => {
                log::warn!("Surface acquisition failed ({err}), skipping frame");
                return Err(RenderError::FrameSkip(err.to_string()));
            }
        };
        let surface_view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.lighting.animate(elapsed);

        let (width, height) = self.ctx.size();
        let aspect = width as f32 / height.max(1) as f32;
        let frame = FrameState::build(camera, &self.lighting, aspect, elapsed);

        let (draw_items, models) = self.content.frame_draw_data(&self.lighting);
        self.draw_items = draw_items;
        self.shared
            .write_frame(&self.ctx.queue, &FrameUniforms::from_frame(&frame));
        self.shared.write_models(&self.ctx.queue, &models);

        let mut prepare_ctx = PrepareContext {
            device: &self.ctx.device,
            queue: &self.ctx.queue,
            targets: &self.targets,
            shared: &self.shared,
            frame: &frame,
            lighting: &self.lighting,
            content: &self.content,
            draw_items: &self.draw_items,
            settings: &self.settings,
            surface_format: self.ctx.color_format(),
        };
        self.graph.prepare(&mut prepare_ctx);

        let execute_ctx = ExecuteContext {
            targets: &self.targets,
            shared: &self.shared,
            surface_view: &surface_view,
            content: &self.content,
            draw_items: &self.draw_items,
            settings: &self.settings,
        };
        self.graph
            .execute(&self.ctx.device, &self.ctx.queue, &execute_ctx);

        output.present();
        Ok(())
    }

    /// Resizes the surface and every window-sized render target. Call only
    /// between frames.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.ctx.resize(width, height);
        self.targets.resize(&self.ctx.device, width, height)
    }

    #[must_use]
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut RenderSettings {
        &mut self.settings
    }

    #[must_use]
    pub fn lighting(&self) -> &LightingState {
        &self.lighting
    }

    pub fn lighting_mut(&mut self) -> &mut LightingState {
        &mut self.lighting
    }

    /// Current surface size.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.ctx.size()
    }
}
