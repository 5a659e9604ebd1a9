//! Demo Scene Content
//!
//! GPU meshes, materials and the per-frame draw list of the demo scene:
//! nine textured cubes on a grid, a wood floor, four HDR marker spheres on
//! the point lights and an arrow tracking the directional light.

use std::path::Path;

use glam::{Mat4, Vec3};

use crate::assets;
use crate::errors::Result;
use crate::renderer::drawable::GpuMesh;
use crate::renderer::primitives;
use crate::renderer::uniforms::{ModelUniforms, SharedUniforms};
use crate::scene::lighting::LightingState;

/// Which mesh a draw item uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshHandle {
    Cube,
    Floor,
    Sphere,
    Arrow,
}

/// Which material bind group a draw item uses in the geometry pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
    Container,
    Floor,
    /// Flat color from the model uniforms; the bound texture is ignored.
    Flat,
}

/// One entry of the per-frame draw list. `slot` indexes the shared model
/// uniform table.
#[derive(Debug, Clone, Copy)]
pub struct DrawItem {
    pub mesh: MeshHandle,
    pub material: MaterialKind,
    pub slot: u32,
    pub casts_shadow: bool,
}

/// All GPU-resident content of the demo scene.
pub struct SceneContent {
    cube: GpuMesh,
    floor: GpuMesh,
    sphere: GpuMesh,
    arrow: GpuMesh,

    container_bind_group: wgpu::BindGroup,
    floor_bind_group: wgpu::BindGroup,
    flat_bind_group: wgpu::BindGroup,

    pub skybox_view: wgpu::TextureView,
    pub skybox_sampler: wgpu::Sampler,

    object_positions: Vec<Vec3>,
}

impl SceneContent {
    /// Loads the demo content. Missing asset files degrade to placeholders.
    pub fn demo(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        shared: &SharedUniforms,
        asset_root: &Path,
    ) -> Result<Self> {
        let cube = GpuMesh::new(device, "Cube Mesh", &primitives::cube(), None);
        let floor = GpuMesh::new(device, "Floor Mesh", &primitives::plane(25.0, 25.0), None);
        let (sphere_vertices, sphere_indices) = primitives::sphere(1.0, 36, 18);
        let sphere = GpuMesh::new(
            device,
            "Sphere Mesh",
            &sphere_vertices,
            Some(&sphere_indices),
        );
        let (arrow_vertices, arrow_indices) = primitives::arrow(16);
        let arrow = GpuMesh::new(device, "Arrow Mesh", &arrow_vertices, Some(&arrow_indices));

        let material_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Material Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let container_view =
            assets::load_texture(device, queue, &asset_root.join("container_diffuse.png"));
        let floor_view = assets::load_texture(device, queue, &asset_root.join("wood_floor.jpg"));
        // The flat material binds the container texture too; the shader never
        // samples it when the textured flag is off.
        let flat_view =
            assets::load_texture(device, queue, &asset_root.join("container_diffuse.png"));

        let make_material = |view: &wgpu::TextureView, label: &str| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &shared.material_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&material_sampler),
                    },
                ],
            })
        };

        let container_bind_group = make_material(&container_view, "Container Material");
        let floor_bind_group = make_material(&floor_view, "Floor Material");
        let flat_bind_group = make_material(&flat_view, "Flat Material");

        let skybox_view = assets::load_cubemap(
            device,
            queue,
            &asset_root.join("skybox"),
            &[
                "right.jpg",
                "left.jpg",
                "top.jpg",
                "bottom.jpg",
                "front.jpg",
                "back.jpg",
            ],
        );
        let skybox_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Skybox Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        // 3x3 grid, all objects resting just above the floor
        let mut object_positions = Vec::with_capacity(9);
        for x in -1..=1 {
            for z in -1..=1 {
                object_positions.push(Vec3::new(x as f32 * 3.0, -0.5, z as f32 * 3.0 - 3.0));
            }
        }

        Ok(Self {
            cube,
            floor,
            sphere,
            arrow,
            container_bind_group,
            floor_bind_group,
            flat_bind_group,
            skybox_view,
            skybox_sampler,
            object_positions,
        })
    }

    #[must_use]
    pub fn mesh(&self, handle: MeshHandle) -> &GpuMesh {
        match handle {
            MeshHandle::Cube => &self.cube,
            MeshHandle::Floor => &self.floor,
            MeshHandle::Sphere => &self.sphere,
            MeshHandle::Arrow => &self.arrow,
        }
    }

    #[must_use]
    pub fn material(&self, kind: MaterialKind) -> &wgpu::BindGroup {
        match kind {
            MaterialKind::Container => &self.container_bind_group,
            MaterialKind::Floor => &self.floor_bind_group,
            MaterialKind::Flat => &self.flat_bind_group,
        }
    }

    /// Builds the draw list and the matching model uniform table for one
    /// frame. Slots are assigned in list order.
    #[must_use]
    pub fn frame_draw_data(&self, lighting: &LightingState) -> (Vec<DrawItem>, Vec<ModelUniforms>) {
        let mut items = Vec::new();
        let mut models = Vec::new();

        let mut push = |mesh, material, casts_shadow, model: ModelUniforms| {
            items.push(DrawItem {
                mesh,
                material,
                slot: models.len() as u32,
                casts_shadow,
            });
            models.push(model);
        };

        for position in &self.object_positions {
            push(
                MeshHandle::Cube,
                MaterialKind::Container,
                true,
                ModelUniforms::textured(Mat4::from_translation(*position)),
            );
        }

        push(
            MeshHandle::Floor,
            MaterialKind::Floor,
            true,
            ModelUniforms::textured(Mat4::from_translation(Vec3::new(0.0, -1.5, 0.0))),
        );

        for light in lighting.points() {
            push(
                MeshHandle::Sphere,
                MaterialKind::Flat,
                false,
                ModelUniforms::flat(
                    Mat4::from_translation(light.position) * Mat4::from_scale(Vec3::splat(0.1)),
                    light.marker_color,
                ),
            );
        }

        // The arrow points the way the light travels, toward the scene.
        let arrow_model = Mat4::from_translation(Vec3::new(2.0, 5.0, -5.0))
            * primitives::arrow_rotation(-lighting.directional.direction)
            * Mat4::from_scale(Vec3::splat(2.0));
        push(
            MeshHandle::Arrow,
            MaterialKind::Flat,
            false,
            ModelUniforms::flat(arrow_model, Vec3::new(1.0, 0.8, 0.2)),
        );

        (items, models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_positions_sit_on_the_object_plane() {
        // Mirrors the grid built in SceneContent::demo without a GPU.
        let mut positions = Vec::new();
        for x in -1..=1 {
            for z in -1..=1 {
                positions.push(Vec3::new(x as f32 * 3.0, -0.5, z as f32 * 3.0 - 3.0));
            }
        }
        assert_eq!(positions.len(), 9);
        assert!(positions.iter().all(|p| (p.y + 0.5).abs() < 1e-6));
    }
}
