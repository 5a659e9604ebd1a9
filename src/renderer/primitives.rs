//! Primitive Mesh Generation
//!
//! CPU-side generators for the demo geometry: unit cube, ground plane,
//! UV sphere and a direction-indicator arrow. All primitives produce
//! interleaved [`Vertex`] data; the sphere and arrow are indexed.

use std::f32::consts::PI;

use glam::{Mat4, Quat, Vec3};

use crate::renderer::drawable::Vertex;

fn vertex(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Vertex {
    Vertex {
        position,
        normal,
        uv,
    }
}

/// A unit cube centered on the origin (half extent 0.5), 36 vertices,
/// non-indexed, outward normals.
#[must_use]
pub fn cube() -> Vec<Vertex> {
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        // (normal, tangent u, tangent v)
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ];

    let mut vertices = Vec::with_capacity(36);
    for (normal, tangent_u, tangent_v) in faces {
        let n = Vec3::from(normal);
        let u = Vec3::from(tangent_u);
        let v = Vec3::from(tangent_v);
        let corners = [
            (-0.5, -0.5, [0.0, 0.0]),
            (0.5, -0.5, [1.0, 0.0]),
            (0.5, 0.5, [1.0, 1.0]),
            (-0.5, 0.5, [0.0, 1.0]),
        ];
        // Two CCW triangles per face
        for index in [0usize, 1, 2, 0, 2, 3] {
            let (cu, cv, uv) = corners[index];
            let position = n * 0.5 + u * cu + v * cv;
            vertices.push(vertex(position.to_array(), normal, uv));
        }
    }
    vertices
}

/// A flat plane in the XZ axis at y = 0 with a +Y normal.
///
/// `uv_tiling` repeats the texture across the plane (the demo floor tiles
/// its wood texture 25×).
#[must_use]
pub fn plane(half_extent: f32, uv_tiling: f32) -> Vec<Vertex> {
    let normal = [0.0, 1.0, 0.0];
    let corners = [
        ([-half_extent, 0.0, half_extent], [0.0, 0.0]),
        ([half_extent, 0.0, half_extent], [uv_tiling, 0.0]),
        ([half_extent, 0.0, -half_extent], [uv_tiling, uv_tiling]),
        ([-half_extent, 0.0, -half_extent], [0.0, uv_tiling]),
    ];
    [0usize, 1, 2, 0, 2, 3]
        .into_iter()
        .map(|index| {
            let (position, uv) = corners[index];
            vertex(position, normal, uv)
        })
        .collect()
}

/// A UV sphere with the given radius and segment counts.
#[must_use]
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> (Vec<Vertex>, Vec<u16>) {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);

    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for y in 0..=height_segments {
        let v_ratio = y as f32 / height_segments as f32;
        // Latitude from south pole to north pole
        let theta = v_ratio * PI;
        let py = -radius * theta.cos();
        let ring_radius = radius * theta.sin();

        for x in 0..=width_segments {
            let u_ratio = x as f32 / width_segments as f32;
            let phi = u_ratio * 2.0 * PI;

            let px = -ring_radius * phi.cos();
            let pz = ring_radius * phi.sin();

            vertices.push(vertex(
                [px, py, pz],
                [px / radius, py / radius, pz / radius],
                [u_ratio, 1.0 - v_ratio],
            ));
        }
    }

    // Two triangles per grid cell; pole cells degenerate and are discarded
    // by the GPU.
    let stride = width_segments + 1;
    for y in 0..height_segments {
        for x in 0..width_segments {
            let v0 = (y * stride + x) as u16;
            let v1 = v0 + 1;
            let v2 = ((y + 1) * stride + x) as u16;
            let v3 = v2 + 1;

            indices.extend_from_slice(&[v0, v1, v2]);
            indices.extend_from_slice(&[v1, v3, v2]);
        }
    }

    (vertices, indices)
}

/// An arrow pointing along −Z: a cylindrical shaft from the origin and a cone
/// head ending at the tip `(0, 0, -1)`. Orient it with [`arrow_rotation`].
#[must_use]
pub fn arrow(segments: u32) -> (Vec<Vertex>, Vec<u16>) {
    let segments = segments.max(3);
    let shaft_radius = 0.05;
    let head_radius = 0.12;
    let shaft_length = 0.7;
    let total_length = 1.0;

    let mut vertices: Vec<Vertex> = Vec::new();
    let mut indices: Vec<u16> = Vec::new();

    let ring = |radius: f32, z: f32| -> Vec<(Vec3, f32)> {
        (0..=segments)
            .map(|segment| {
                let angle = segment as f32 / segments as f32 * 2.0 * PI;
                (
                    Vec3::new(radius * angle.cos(), radius * angle.sin(), z),
                    segment as f32 / segments as f32,
                )
            })
            .collect()
    };

    // --- Shaft side ---
    let base = ring(shaft_radius, 0.0);
    let top = ring(shaft_radius, -shaft_length);
    let shaft_start = vertices.len() as u16;
    for (position, u) in base.iter().chain(top.iter()) {
        let normal = Vec3::new(position.x, position.y, 0.0).normalize();
        vertices.push(vertex(position.to_array(), normal.to_array(), [*u, 0.0]));
    }
    let ring_len = (segments + 1) as u16;
    for segment in 0..segments as u16 {
        let a = shaft_start + segment;
        let b = a + 1;
        let c = a + ring_len;
        let d = c + 1;
        indices.extend_from_slice(&[a, c, b, b, c, d]);
    }

    // --- Cone side ---
    // The cone slope tilts the side normal toward -Z.
    let slope = head_radius / (total_length - shaft_length);
    let cone_base = ring(head_radius, -shaft_length);
    let cone_start = vertices.len() as u16;
    for (position, u) in &cone_base {
        let radial = Vec3::new(position.x, position.y, 0.0).normalize();
        let normal = (radial + Vec3::new(0.0, 0.0, -slope)).normalize();
        vertices.push(vertex(position.to_array(), normal.to_array(), [*u, 0.0]));
    }
    // One tip vertex per segment keeps the side normals distinct.
    let tip_start = vertices.len() as u16;
    for segment in 0..segments {
        let angle = (segment as f32 + 0.5) / segments as f32 * 2.0 * PI;
        let radial = Vec3::new(angle.cos(), angle.sin(), 0.0);
        let normal = (radial + Vec3::new(0.0, 0.0, -slope)).normalize();
        vertices.push(vertex(
            [0.0, 0.0, -total_length],
            normal.to_array(),
            [0.5, 1.0],
        ));
    }
    for segment in 0..segments as u16 {
        indices.extend_from_slice(&[
            cone_start + segment,
            tip_start + segment,
            cone_start + segment + 1,
        ]);
    }

    // --- Cone back cap (annulus facing +Z) ---
    let cap_start = vertices.len() as u16;
    for (position, u) in &cone_base {
        vertices.push(vertex(position.to_array(), [0.0, 0.0, 1.0], [*u, 0.0]));
    }
    let cap_center = vertices.len() as u16;
    vertices.push(vertex(
        [0.0, 0.0, -shaft_length],
        [0.0, 0.0, 1.0],
        [0.5, 0.5],
    ));
    for segment in 0..segments as u16 {
        indices.extend_from_slice(&[cap_center, cap_start + segment, cap_start + segment + 1]);
    }

    // --- Shaft back cap ---
    let back_start = vertices.len() as u16;
    for (position, u) in &base {
        vertices.push(vertex(position.to_array(), [0.0, 0.0, 1.0], [*u, 0.0]));
    }
    let back_center = vertices.len() as u16;
    vertices.push(vertex([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.5, 0.5]));
    for segment in 0..segments as u16 {
        indices.extend_from_slice(&[back_center, back_start + segment, back_start + segment + 1]);
    }

    (vertices, indices)
}

/// Rotation carrying the arrow's rest direction (−Z) onto `direction`.
#[must_use]
pub fn arrow_rotation(direction: Vec3) -> Mat4 {
    let target = if direction.length_squared() > 1e-6 {
        direction.normalize()
    } else {
        -Vec3::Z
    };
    Mat4::from_quat(Quat::from_rotation_arc(-Vec3::Z, target))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn cube_has_36_unit_normal_vertices() {
        let vertices = cube();
        assert_eq!(vertices.len(), 36);
        for v in &vertices {
            let normal = Vec3::from(v.normal);
            assert!((normal.length() - 1.0).abs() < EPSILON);
            // Position projected on the face normal is always the half extent
            assert!((Vec3::from(v.position).dot(normal) - 0.5).abs() < EPSILON);
        }
    }

    #[test]
    fn sphere_vertices_sit_on_the_radius() {
        let (vertices, indices) = sphere(1.0, 36, 18);
        assert_eq!(vertices.len(), 37 * 19);
        assert_eq!(indices.len() as u32, 36 * 18 * 6);
        for v in &vertices {
            assert!((Vec3::from(v.position).length() - 1.0).abs() < EPSILON);
        }
    }

    #[test]
    fn arrow_rotation_maps_rest_direction() {
        let direction = Vec3::new(1.0, 2.0, -0.5).normalize();
        let rotated = arrow_rotation(direction).transform_vector3(-Vec3::Z);
        assert!((rotated - direction).length() < EPSILON);
    }

    #[test]
    fn arrow_rotation_handles_opposite_direction() {
        let rotated = arrow_rotation(Vec3::Z).transform_vector3(-Vec3::Z);
        assert!((rotated - Vec3::Z).length() < EPSILON);
    }

    #[test]
    fn plane_tiles_uvs() {
        let vertices = plane(25.0, 25.0);
        assert_eq!(vertices.len(), 6);
        let max_u = vertices.iter().map(|v| v.uv[0]).fold(0.0f32, f32::max);
        assert!((max_u - 25.0).abs() < EPSILON);
    }
}
