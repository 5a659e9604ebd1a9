//! Bloom Blur Pass
//!
//! Separable Gaussian blur of the bright-color buffer, ping-ponging between
//! two dedicated blur targets. Iteration 0 always samples the bright buffer,
//! so no uninitialized blur target is ever read; the final written buffer
//! follows the iteration-count parity and is reported by [`blur_output`] for
//! the present pass to consume.
//!
//! Two static direction uniform buffers (horizontal / vertical) are written
//! once at creation, avoiding per-iteration uploads.

use crate::renderer::graph::context::{ExecuteContext, PrepareContext};
use crate::renderer::graph::node::RenderNode;
use crate::renderer::targets::{HDR_FORMAT, TargetId};
use crate::renderer::uniforms::BlurUniforms;

/// `true` when the given iteration blurs horizontally (even iterations).
#[inline]
#[must_use]
pub fn blur_is_horizontal(iteration: u32) -> bool {
    iteration % 2 == 0
}

/// The buffer an iteration samples from. Iteration 0 reads the bright
/// buffer; later iterations read the previous iteration's target.
#[must_use]
pub fn blur_source(iteration: u32) -> TargetId {
    if iteration == 0 {
        TargetId::BrightColor
    } else if blur_is_horizontal(iteration) {
        TargetId::BlurPong
    } else {
        TargetId::BlurPing
    }
}

/// The buffer an iteration renders into.
#[must_use]
pub fn blur_target(iteration: u32) -> TargetId {
    if blur_is_horizontal(iteration) {
        TargetId::BlurPing
    } else {
        TargetId::BlurPong
    }
}

/// The buffer holding the finished blur after `iterations` passes. With zero
/// iterations the bright buffer passes through unblurred.
#[must_use]
pub fn blur_output(iterations: u32) -> TargetId {
    if iterations == 0 {
        TargetId::BrightColor
    } else {
        blur_target(iterations - 1)
    }
}

pub struct BloomBlurPass {
    pipeline: wgpu::RenderPipeline,
    layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,

    horizontal_buffer: wgpu::Buffer,
    vertical_buffer: wgpu::Buffer,

    // One bind group per possible (source, direction) pairing.
    from_bright: Option<wgpu::BindGroup>,
    from_ping: Option<wgpu::BindGroup>,
    from_pong: Option<wgpu::BindGroup>,
    targets_generation: Option<u64>,
}

impl BloomBlurPass {
    #[must_use]
    pub fn new(device: &wgpu::Device) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Blur Shader"),
            source: wgpu::ShaderSource::Wgsl(std::borrow::Cow::Borrowed(include_str!(
                "../../../../shaders/blur.wgsl"
            ))),
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Blur Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<BlurUniforms>() as u64,
                        ),
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Blur Pipeline Layout"),
            bind_group_layouts: &[&layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Blur Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: HDR_FORMAT,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Blur Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let direction_buffer = |horizontal: u32, label| {
            use wgpu::util::DeviceExt;
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::bytes_of(&BlurUniforms {
                    horizontal,
                    _pad: [0; 3],
                }),
                usage: wgpu::BufferUsages::UNIFORM,
            })
        };
        let horizontal_buffer = direction_buffer(1, "Blur Horizontal");
        let vertical_buffer = direction_buffer(0, "Blur Vertical");

        Self {
            pipeline,
            layout,
            sampler,
            horizontal_buffer,
            vertical_buffer,
            from_bright: None,
            from_ping: None,
            from_pong: None,
            targets_generation: None,
        }
    }

    fn make_bind_group(
        &self,
        ctx: &PrepareContext<'_>,
        source: TargetId,
        direction: &wgpu::Buffer,
        label: &str,
    ) -> wgpu::BindGroup {
        ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(ctx.targets.view(source)),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: direction.as_entire_binding(),
                },
            ],
        })
    }

    fn bind_group_for(&self, iteration: u32) -> Option<&wgpu::BindGroup> {
        match blur_source(iteration) {
            TargetId::BrightColor => self.from_bright.as_ref(),
            TargetId::BlurPing => self.from_ping.as_ref(),
            _ => self.from_pong.as_ref(),
        }
    }
}

impl RenderNode for BloomBlurPass {
    fn name(&self) -> &'static str {
        "Bloom Blur Pass"
    }

    fn reads(&self) -> &'static [TargetId] {
        &[TargetId::BrightColor]
    }

    fn writes(&self) -> &'static [TargetId] {
        &[TargetId::BlurPing, TargetId::BlurPong]
    }

    fn prepare(&mut self, ctx: &mut PrepareContext<'_>) {
        if self.targets_generation != Some(ctx.targets.generation()) {
            // Iteration 0 is horizontal and samples the bright buffer; later
            // horizontal iterations sample pong, vertical ones sample ping.
            self.from_bright = Some(self.make_bind_group(
                ctx,
                TargetId::BrightColor,
                &self.horizontal_buffer,
                "Blur BG bright",
            ));
            self.from_ping = Some(self.make_bind_group(
                ctx,
                TargetId::BlurPing,
                &self.vertical_buffer,
                "Blur BG ping",
            ));
            self.from_pong = Some(self.make_bind_group(
                ctx,
                TargetId::BlurPong,
                &self.horizontal_buffer,
                "Blur BG pong",
            ));
            self.targets_generation = Some(ctx.targets.generation());
        }
    }

    fn run(&self, ctx: &ExecuteContext<'_>, encoder: &mut wgpu::CommandEncoder) {
        for iteration in 0..ctx.settings.blur_iterations {
            let Some(bind_group) = self.bind_group_for(iteration) else {
                return;
            };

            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Bloom Blur Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: ctx.targets.view(blur_target(iteration)),
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, bind_group, &[]);
            pass.draw(0..3, 0..1);
        }
    }
}
