//! Lighting Resolve Pass
//!
//! Full-screen resolve of the G-buffer into two HDR targets: the lit scene
//! color and the over-threshold bright color that feeds the bloom blur.
//! All lighting math (Blinn-Phong, PCF shadow lookup, attenuation, bright
//! extraction) lives in the WGSL; this pass only wires the inputs.

use crate::renderer::graph::context::{ExecuteContext, PrepareContext};
use crate::renderer::graph::node::RenderNode;
use crate::renderer::targets::{HDR_FORMAT, TargetId};
use crate::renderer::uniforms::LightUniforms;

pub struct LightingResolvePass {
    pipeline: wgpu::RenderPipeline,
    gbuffer_layout: wgpu::BindGroupLayout,
    nearest_sampler: wgpu::Sampler,
    shadow_sampler: wgpu::Sampler,

    light_buffer: wgpu::Buffer,
    light_bind_group: wgpu::BindGroup,

    gbuffer_bind_group: Option<wgpu::BindGroup>,
    targets_generation: Option<u64>,
}

impl LightingResolvePass {
    #[must_use]
    pub fn new(device: &wgpu::Device) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Lighting Shader"),
            source: wgpu::ShaderSource::Wgsl(std::borrow::Cow::Borrowed(include_str!(
                "../../../../shaders/lighting.wgsl"
            ))),
        });

        let texture_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };

        let gbuffer_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Lighting GBuffer Layout"),
            entries: &[
                texture_entry(0),
                texture_entry(1),
                texture_entry(2),
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                // Shadow map is depth-sampled with a comparison sampler.
                wgpu::BindGroupLayoutEntry {
                    binding: 4,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Depth,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 5,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                    count: None,
                },
            ],
        });

        let light_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Lighting Uniform Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<LightUniforms>() as u64
                    ),
                },
                count: None,
            }],
        });

        let light_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Light Uniform Buffer"),
            size: std::mem::size_of::<LightUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let light_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Lighting Uniform BindGroup"),
            layout: &light_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: light_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Lighting Pipeline Layout"),
            bind_group_layouts: &[&gbuffer_layout, &light_layout],
            immediate_size: 0,
        });

        let hdr_target = Some(wgpu::ColorTargetState {
            format: HDR_FORMAT,
            blend: Some(wgpu::BlendState::REPLACE),
            write_mask: wgpu::ColorWrites::ALL,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Lighting Pipeline"),
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
                targets: &[hdr_target.clone(), hdr_target],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let nearest_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("GBuffer Sampler"),
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let shadow_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Shadow Comparison Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });

        Self {
            pipeline,
            gbuffer_layout,
            nearest_sampler,
            shadow_sampler,
            light_buffer,
            light_bind_group,
            gbuffer_bind_group: None,
            targets_generation: None,
        }
    }
}

impl RenderNode for LightingResolvePass {
    fn name(&self) -> &'static str {
        "Lighting Resolve Pass"
    }

    fn reads(&self) -> &'static [TargetId] {
        &[
            TargetId::GBufferPosition,
            TargetId::GBufferNormal,
            TargetId::GBufferAlbedo,
            TargetId::ShadowMap,
        ]
    }

    fn writes(&self) -> &'static [TargetId] {
        &[TargetId::SceneColor, TargetId::BrightColor]
    }

    fn prepare(&mut self, ctx: &mut PrepareContext<'_>) {
        let uniforms =
            LightUniforms::build(ctx.frame, ctx.lighting, ctx.settings.shadows_enabled);
        ctx.queue
            .write_buffer(&self.light_buffer, 0, bytemuck::bytes_of(&uniforms));

        // G-buffer views only change on resize.
        if self.targets_generation != Some(ctx.targets.generation()) {
            self.gbuffer_bind_group =
                Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("Lighting GBuffer BindGroup"),
                    layout: &self.gbuffer_layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: wgpu::BindingResource::TextureView(
                                ctx.targets.view(TargetId::GBufferPosition),
                            ),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::TextureView(
                                ctx.targets.view(TargetId::GBufferNormal),
                            ),
                        },
                        wgpu::BindGroupEntry {
                            binding: 2,
                            resource: wgpu::BindingResource::TextureView(
                                ctx.targets.view(TargetId::GBufferAlbedo),
                            ),
                        },
                        wgpu::BindGroupEntry {
                            binding: 3,
                            resource: wgpu::BindingResource::Sampler(&self.nearest_sampler),
                        },
                        wgpu::BindGroupEntry {
                            binding: 4,
                            resource: wgpu::BindingResource::TextureView(
                                ctx.targets.view(TargetId::ShadowMap),
                            ),
                        },
                        wgpu::BindGroupEntry {
                            binding: 5,
                            resource: wgpu::BindingResource::Sampler(&self.shadow_sampler),
                        },
                    ],
                }));
            self.targets_generation = Some(ctx.targets.generation());
        }
    }

    fn run(&self, ctx: &ExecuteContext<'_>, encoder: &mut wgpu::CommandEncoder) {
        let Some(gbuffer_bind_group) = &self.gbuffer_bind_group else {
            return;
        };

        let attachment = |id| {
            Some(wgpu::RenderPassColorAttachment {
                view: ctx.targets.view(id),
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })
        };

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Lighting Resolve Pass"),
            color_attachments: &[
                attachment(TargetId::SceneColor),
                attachment(TargetId::BrightColor),
            ],
            ..Default::default()
        });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, gbuffer_bind_group, &[]);
        pass.set_bind_group(1, &self.light_bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
}
