//! Skybox Composite Pass
//!
//! Draws the skybox cube into the already-lit scene color, with the
//! G-buffer depth attached. The vertex shader pins the cube to the far plane
//! (`z = w`), so with a `LessEqual` compare only pixels no geometry touched
//! survive. Depth writes are disabled and both states are baked into this
//! pass's pipeline object; no global depth state exists to restore
//! afterwards.

use crate::renderer::drawable::{Drawable, Vertex};
use crate::renderer::graph::context::{ExecuteContext, PrepareContext};
use crate::renderer::graph::node::RenderNode;
use crate::renderer::targets::{DEPTH_FORMAT, HDR_FORMAT, TargetId};
use crate::renderer::uniforms::SharedUniforms;
use crate::scene::content::MeshHandle;

/// Depth state of the skybox composite: read-only, pass at the far plane.
#[must_use]
pub fn skybox_depth_state() -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: false,
        depth_compare: wgpu::CompareFunction::LessEqual,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

pub struct SkyboxCompositePass {
    pipeline: wgpu::RenderPipeline,
    cubemap_layout: wgpu::BindGroupLayout,
    cubemap_bind_group: Option<wgpu::BindGroup>,
}

impl SkyboxCompositePass {
    #[must_use]
    pub fn new(device: &wgpu::Device, shared: &SharedUniforms) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Skybox Shader"),
            source: wgpu::ShaderSource::Wgsl(std::borrow::Cow::Borrowed(include_str!(
                "../../../../shaders/skybox.wgsl"
            ))),
        });

        let cubemap_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Skybox Cubemap Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::Cube,
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
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Skybox Pipeline Layout"),
            bind_group_layouts: &[&shared.frame_layout, &cubemap_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Skybox Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout()],
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
            // The camera sits inside the cube, so its back faces are visible.
            primitive: wgpu::PrimitiveState {
                cull_mode: Some(wgpu::Face::Front),
                ..Default::default()
            },
            depth_stencil: Some(skybox_depth_state()),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            cubemap_layout,
            cubemap_bind_group: None,
        }
    }
}

impl RenderNode for SkyboxCompositePass {
    fn name(&self) -> &'static str {
        "Skybox Composite Pass"
    }

    fn reads(&self) -> &'static [TargetId] {
        &[TargetId::SceneColor, TargetId::GBufferDepth]
    }

    fn writes(&self) -> &'static [TargetId] {
        &[TargetId::SceneColor]
    }

    fn prepare(&mut self, ctx: &mut PrepareContext<'_>) {
        if self.cubemap_bind_group.is_none() {
            self.cubemap_bind_group =
                Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("Skybox Cubemap BindGroup"),
                    layout: &self.cubemap_layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: wgpu::BindingResource::TextureView(&ctx.content.skybox_view),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::Sampler(&ctx.content.skybox_sampler),
                        },
                    ],
                }));
        }
    }

    fn run(&self, ctx: &ExecuteContext<'_>, encoder: &mut wgpu::CommandEncoder) {
        let Some(cubemap_bind_group) = &self.cubemap_bind_group else {
            return;
        };

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Skybox Composite Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: ctx.targets.view(TargetId::SceneColor),
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: ctx.targets.view(TargetId::GBufferDepth),
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &ctx.shared.frame_bind_group, &[]);
        pass.set_bind_group(1, cubemap_bind_group, &[]);
        ctx.content.mesh(MeshHandle::Cube).draw(&mut pass);
    }
}
