//! Per-Frame State
//!
//! [`FrameState`] is a plain value rebuilt at the start of every frame from
//! the camera and lighting state. All passes read it during prepare; nothing
//! mutates it afterwards, and it is discarded at frame end.
//!
//! The builder functions are pure so the matrix conventions can be verified
//! without a GPU.

use glam::{Mat4, Vec3, Vec4};

use crate::scene::camera::Camera;
use crate::scene::lighting::LightingState;

/// Distance of the virtual directional-light camera from the scene center.
pub const LIGHT_CAMERA_DISTANCE: f32 = 20.0;
/// Half extent of the directional shadow orthographic volume.
pub const LIGHT_ORTHO_HALF_EXTENT: f32 = 10.0;
/// Near plane of the shadow projection.
pub const LIGHT_NEAR: f32 = 0.1;
/// Far plane of the shadow projection.
pub const LIGHT_FAR: f32 = 50.0;
/// Look-at center of the shadow camera.
pub const SHADOW_SCENE_CENTER: Vec3 = Vec3::new(0.0, -0.5, 0.0);

/// Everything the passes need to know about the current frame.
#[derive(Debug, Clone)]
pub struct FrameState {
    pub view: Mat4,
    pub projection: Mat4,
    pub view_proj: Mat4,
    pub camera_position: Vec3,
    /// Directional-light view-projection used by the shadow pass and the
    /// shadow lookup in the lighting resolve.
    pub light_space: Mat4,
    /// 90°-fov view-projections for the six cube faces around the first
    /// point light.
    pub cube_faces: [Mat4; 6],
    pub elapsed: f32,
}

impl FrameState {
    /// Builds the frame state for one frame.
    #[must_use]
    pub fn build(camera: &Camera, lighting: &LightingState, aspect: f32, elapsed: f32) -> Self {
        let (view, projection) = build_view_projection(camera, aspect);
        let light_space = build_directional_light_space(
            lighting.directional.direction,
            SHADOW_SCENE_CENTER,
            LIGHT_ORTHO_HALF_EXTENT,
            LIGHT_NEAR,
            LIGHT_FAR,
        );
        let cube_origin = lighting
            .points()
            .first()
            .map_or(Vec3::ZERO, |light| light.position);
        let cube_faces = build_point_light_cube_faces(cube_origin, LIGHT_NEAR, LIGHT_FAR, 1.0);

        Self {
            view,
            projection,
            view_proj: projection * view,
            camera_position: camera.position,
            light_space,
            cube_faces,
            elapsed,
        }
    }
}

/// View and projection matrices for the camera at the given aspect ratio.
///
/// The view matrix is the inverse of the camera's world transform: applying
/// it to the camera position yields the origin.
#[must_use]
pub fn build_view_projection(camera: &Camera, aspect: f32) -> (Mat4, Mat4) {
    (camera.view_matrix(), camera.projection_matrix(aspect))
}

fn safe_direction(direction: Vec3) -> Vec3 {
    if direction.length_squared() > 1e-6 {
        direction.normalize()
    } else {
        -Vec3::Z
    }
}

/// Orthographic view-projection of the directional light.
///
/// A virtual light camera sits at `direction * LIGHT_CAMERA_DISTANCE` looking
/// at `scene_center`; `direction` points from the scene toward the light.
#[must_use]
pub fn build_directional_light_space(
    direction: Vec3,
    scene_center: Vec3,
    ortho_half_extent: f32,
    near: f32,
    far: f32,
) -> Mat4 {
    let safe_dir = safe_direction(direction);
    let up = if safe_dir.y.abs() > 0.99 { Vec3::X } else { Vec3::Y };

    let eye = safe_dir * LIGHT_CAMERA_DISTANCE;
    let view = Mat4::look_at_rh(eye, scene_center, up);
    let proj = Mat4::orthographic_rh(
        -ortho_half_extent,
        ortho_half_extent,
        -ortho_half_extent,
        ortho_half_extent,
        near,
        far,
    );
    proj * view
}

/// View-projection matrices for the six faces of an omnidirectional depth
/// capture around `position`.
///
/// Faces are ordered +X, −X, +Y, −Y, +Z, −Z with the cube-map up-vector
/// convention: ±X and ±Z look with up −Y, +Y with up +Z, −Y with up −Z.
#[must_use]
pub fn build_point_light_cube_faces(position: Vec3, near: f32, far: f32, aspect: f32) -> [Mat4; 6] {
    let proj = Mat4::perspective_rh(std::f32::consts::FRAC_PI_2, aspect, near, far);
    let faces: [(Vec3, Vec3); 6] = [
        (Vec3::X, -Vec3::Y),
        (-Vec3::X, -Vec3::Y),
        (Vec3::Y, Vec3::Z),
        (-Vec3::Y, -Vec3::Z),
        (Vec3::Z, -Vec3::Y),
        (-Vec3::Z, -Vec3::Y),
    ];
    faces.map(|(forward, up)| proj * Mat4::look_at_rh(position, position + forward, up))
}

/// Returns `true` when a clip-space point lies inside its frustum after the
/// perspective divide (wgpu depth range `[0, 1]`).
#[must_use]
pub fn clip_contains(clip: Vec4) -> bool {
    if clip.w <= 0.0 {
        return false;
    }
    let ndc = clip / clip.w;
    (-1.0..=1.0).contains(&ndc.x) && (-1.0..=1.0).contains(&ndc.y) && (0.0..=1.0).contains(&ndc.z)
}
