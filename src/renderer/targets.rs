//! Render Targets
//!
//! All intermediate GPU images of the frame pipeline live here, owned
//! exclusively by a [`RenderTargetSet`] and identified by [`TargetId`].
//! A target's size, format and filter mode are fixed for its lifetime;
//! window-sized targets are recreated in place by [`RenderTargetSet::resize`],
//! which must only be called between frames. Texture memory is released by
//! `wgpu::Texture` drop when the set (or a replaced target) goes away.

use crate::errors::{RenderError, Result};

/// HDR color format used by the scene/bright/blur targets.
pub const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;
/// Depth format shared by the shadow map and the G-buffer depth.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
/// G-buffer albedo + specular-intensity format.
pub const ALBEDO_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Identifies one render target of the fixed pipeline topology.
///
/// `Surface` names the swapchain image; it is *not* owned by the target set
/// and only appears in pass read/write declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetId {
    /// Directional-light shadow depth map (fixed size).
    ShadowMap,
    /// G-buffer world-space position.
    GBufferPosition,
    /// G-buffer world-space normal (+ emissive strength in alpha).
    GBufferNormal,
    /// G-buffer albedo + specular intensity.
    GBufferAlbedo,
    /// G-buffer depth.
    GBufferDepth,
    /// HDR lit scene color.
    SceneColor,
    /// HDR over-threshold color feeding the bloom blur.
    BrightColor,
    /// Bloom ping-pong buffer A.
    BlurPing,
    /// Bloom ping-pong buffer B.
    BlurPong,
    /// The swapchain surface (external, presented each frame).
    Surface,
}

/// Whether a target tracks the window size or keeps a fixed extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSize {
    Fixed { width: u32, height: u32 },
    Window,
}

/// Immutable description of one render target.
#[derive(Debug, Clone, Copy)]
pub struct RenderTargetSpec {
    pub id: TargetId,
    pub format: wgpu::TextureFormat,
    pub size: TargetSize,
    pub filter: wgpu::FilterMode,
    pub label: &'static str,
}

impl RenderTargetSpec {
    fn is_depth(&self) -> bool {
        matches!(
            self.format,
            wgpu::TextureFormat::Depth32Float
                | wgpu::TextureFormat::Depth24Plus
                | wgpu::TextureFormat::Depth24PlusStencil8
        )
    }

    fn extent(&self, window_width: u32, window_height: u32) -> (u32, u32) {
        match self.size {
            TargetSize::Fixed { width, height } => (width, height),
            TargetSize::Window => (window_width, window_height),
        }
    }
}

/// The nine internal targets of the deferred pipeline.
#[must_use]
pub fn deferred_target_specs(shadow_map_size: u32) -> Vec<RenderTargetSpec> {
    vec![
        RenderTargetSpec {
            id: TargetId::ShadowMap,
            format: DEPTH_FORMAT,
            size: TargetSize::Fixed {
                width: shadow_map_size,
                height: shadow_map_size,
            },
            filter: wgpu::FilterMode::Linear,
            label: "Shadow Map",
        },
        RenderTargetSpec {
            id: TargetId::GBufferPosition,
            format: HDR_FORMAT,
            size: TargetSize::Window,
            filter: wgpu::FilterMode::Nearest,
            label: "GBuffer Position",
        },
        RenderTargetSpec {
            id: TargetId::GBufferNormal,
            format: HDR_FORMAT,
            size: TargetSize::Window,
            filter: wgpu::FilterMode::Nearest,
            label: "GBuffer Normal",
        },
        RenderTargetSpec {
            id: TargetId::GBufferAlbedo,
            format: ALBEDO_FORMAT,
            size: TargetSize::Window,
            filter: wgpu::FilterMode::Nearest,
            label: "GBuffer Albedo",
        },
        RenderTargetSpec {
            id: TargetId::GBufferDepth,
            format: DEPTH_FORMAT,
            size: TargetSize::Window,
            filter: wgpu::FilterMode::Nearest,
            label: "GBuffer Depth",
        },
        RenderTargetSpec {
            id: TargetId::SceneColor,
            format: HDR_FORMAT,
            size: TargetSize::Window,
            filter: wgpu::FilterMode::Linear,
            label: "Scene Color",
        },
        RenderTargetSpec {
            id: TargetId::BrightColor,
            format: HDR_FORMAT,
            size: TargetSize::Window,
            filter: wgpu::FilterMode::Linear,
            label: "Bright Color",
        },
        RenderTargetSpec {
            id: TargetId::BlurPing,
            format: HDR_FORMAT,
            size: TargetSize::Window,
            filter: wgpu::FilterMode::Linear,
            label: "Blur Ping",
        },
        RenderTargetSpec {
            id: TargetId::BlurPong,
            format: HDR_FORMAT,
            size: TargetSize::Window,
            filter: wgpu::FilterMode::Linear,
            label: "Blur Pong",
        },
    ]
}

struct RenderTarget {
    spec: RenderTargetSpec,
    // Kept alive so the view stays valid; dropped (and freed) on recreate.
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
}

/// Owns every internal render target of the pipeline.
pub struct RenderTargetSet {
    targets: Vec<RenderTarget>,
    width: u32,
    height: u32,
    generation: u64,
}

impl RenderTargetSet {
    /// Creates all targets from their specs, validating each one.
    pub fn new(
        device: &wgpu::Device,
        specs: &[RenderTargetSpec],
        width: u32,
        height: u32,
    ) -> Result<Self> {
        let mut targets = Vec::with_capacity(specs.len());
        for spec in specs {
            targets.push(Self::create_target(device, spec, width, height)?);
        }
        Ok(Self {
            targets,
            width,
            height,
            generation: 0,
        })
    }

    fn create_target(
        device: &wgpu::Device,
        spec: &RenderTargetSpec,
        window_width: u32,
        window_height: u32,
    ) -> Result<RenderTarget> {
        if spec.id == TargetId::Surface {
            return Err(RenderError::ResourceCreation(
                "the surface is external and cannot be created as a render target".to_string(),
            ));
        }

        let (width, height) = spec.extent(window_width, window_height);
        if width == 0 || height == 0 {
            return Err(RenderError::ResourceCreation(format!(
                "target {:?} has a zero extent ({width}x{height})",
                spec.id
            )));
        }
        if spec.is_depth() && spec.id != TargetId::ShadowMap && spec.filter != wgpu::FilterMode::Nearest {
            return Err(RenderError::ResourceCreation(format!(
                "depth target {:?} must use nearest filtering",
                spec.id
            )));
        }

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(spec.label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: spec.format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        log::debug!("Created render target {:?} ({width}x{height}, {:?})", spec.id, spec.format);

        Ok(RenderTarget {
            spec: *spec,
            _texture: texture,
            view,
        })
    }

    fn find(&self, id: TargetId) -> Option<&RenderTarget> {
        self.targets.iter().find(|t| t.spec.id == id)
    }

    /// The view for an internal target.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not owned by the set (notably [`TargetId::Surface`]);
    /// the pipeline topology is fixed, so this is a programming error.
    #[must_use]
    pub fn view(&self, id: TargetId) -> &wgpu::TextureView {
        match self.find(id) {
            Some(target) => &target.view,
            None => panic!("target {id:?} is not owned by the render target set"),
        }
    }

    /// Recreates all window-sized targets for the new surface size.
    ///
    /// Must only be called between frames: passes hold no views across frames,
    /// they re-resolve them against the bumped [`Self::generation`].
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 || (width == self.width && height == self.height) {
            return Ok(());
        }
        self.width = width;
        self.height = height;
        for index in 0..self.targets.len() {
            if self.targets[index].spec.size == TargetSize::Window {
                let spec = self.targets[index].spec;
                self.targets[index] = Self::create_target(device, &spec, width, height)?;
            }
        }
        self.generation += 1;
        Ok(())
    }

    /// Monotonic counter bumped whenever any view is replaced. Passes compare
    /// it to decide whether their cached bind groups are stale.
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Current window-sized target extent.
    #[inline]
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

// ---------------------------------------------------------------------------
// Framebuffer binding validation
// ---------------------------------------------------------------------------

/// Attachment arity a pass requires from its framebuffer binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachmentRequirements {
    pub color_count: usize,
    pub needs_depth: bool,
}

/// The color/depth attachments one pass renders into.
#[derive(Debug, Clone)]
pub struct FramebufferBinding {
    pub color: Vec<TargetId>,
    pub depth: Option<TargetId>,
}

impl FramebufferBinding {
    /// Checks the binding against a pass's declared requirements. Runs at
    /// graph construction so a wrong attachment count is an init error.
    pub fn validate(&self, requirements: AttachmentRequirements) -> Result<()> {
        if self.color.len() != requirements.color_count {
            return Err(RenderError::ResourceCreation(format!(
                "framebuffer binding has {} color attachments, pass requires {}",
                self.color.len(),
                requirements.color_count
            )));
        }
        if requirements.needs_depth != self.depth.is_some() {
            return Err(RenderError::ResourceCreation(format!(
                "framebuffer binding depth attachment mismatch: present={}, required={}",
                self.depth.is_some(),
                requirements.needs_depth
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deferred_specs_cover_the_fixed_topology() {
        let specs = deferred_target_specs(2048);
        assert_eq!(specs.len(), 9);
        let shadow = specs.iter().find(|s| s.id == TargetId::ShadowMap).unwrap();
        assert_eq!(
            shadow.size,
            TargetSize::Fixed {
                width: 2048,
                height: 2048
            }
        );
        assert_eq!(shadow.format, DEPTH_FORMAT);

        for id in [
            TargetId::SceneColor,
            TargetId::BrightColor,
            TargetId::BlurPing,
            TargetId::BlurPong,
        ] {
            let spec = specs.iter().find(|s| s.id == id).unwrap();
            assert_eq!(spec.format, HDR_FORMAT);
            assert_eq!(spec.size, TargetSize::Window);
        }
    }
}
