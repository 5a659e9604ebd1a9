//! Matrix-convention checks for the per-frame camera and light transforms.

use glam::{Vec3, Vec4};
use glimmer::renderer::frame_state::{
    LIGHT_FAR, LIGHT_NEAR, LIGHT_ORTHO_HALF_EXTENT, SHADOW_SCENE_CENTER,
    build_directional_light_space, build_point_light_cube_faces, build_view_projection,
    clip_contains,
};
use glimmer::scene::camera::Camera;

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn approx_vec3(a: Vec3, b: Vec3) -> bool {
    approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
}

#[test]
fn view_matrix_maps_camera_position_to_origin() {
    let mut camera = Camera::default();
    camera.position = Vec3::new(3.0, 1.5, -7.0);
    let (view, _) = build_view_projection(&camera, 800.0 / 600.0);

    let eye = view * Vec4::new(camera.position.x, camera.position.y, camera.position.z, 1.0);
    assert!(approx_vec3(eye.truncate(), Vec3::ZERO));
}

#[test]
fn projection_respects_aspect_ratio() {
    let camera = Camera::default();
    let (_, proj) = build_view_projection(&camera, 2.0);

    // A point off the view axis lands at half the horizontal NDC extent of
    // its vertical one when the aspect ratio is 2.
    let clip_x = proj * Vec4::new(1.0, 0.0, -10.0, 1.0);
    let clip_y = proj * Vec4::new(0.0, 1.0, -10.0, 1.0);
    assert!(approx(clip_x.x / clip_x.w, (clip_y.y / clip_y.w) / 2.0));
}

#[test]
fn shadow_center_projects_onto_the_light_axis() {
    let light_space = build_directional_light_space(
        Vec3::new(0.0, 0.0, -1.0),
        SHADOW_SCENE_CENTER,
        LIGHT_ORTHO_HALF_EXTENT,
        LIGHT_NEAR,
        LIGHT_FAR,
    );

    let clip = light_space
        * Vec4::new(
            SHADOW_SCENE_CENTER.x,
            SHADOW_SCENE_CENTER.y,
            SHADOW_SCENE_CENTER.z,
            1.0,
        );
    let ndc = clip / clip.w;
    assert!(approx(ndc.x, 0.0));
    assert!(approx(ndc.y, 0.0));
    // The look-at center sits roughly 20 units in front of the light camera,
    // well inside the [0.1, 50] depth range.
    assert!(ndc.z > 0.1 && ndc.z < 0.9);
    assert!(clip_contains(clip));
}

#[test]
fn shadow_volume_clips_distant_points() {
    let light_space = build_directional_light_space(
        Vec3::new(0.4, 1.0, 0.3),
        SHADOW_SCENE_CENTER,
        LIGHT_ORTHO_HALF_EXTENT,
        LIGHT_NEAR,
        LIGHT_FAR,
    );

    // Points inside the ortho volume survive; far-off ones do not.
    assert!(clip_contains(light_space * Vec4::new(2.0, 0.0, 2.0, 1.0)));
    assert!(!clip_contains(light_space * Vec4::new(500.0, 0.0, 0.0, 1.0)));
}

#[test]
fn degenerate_light_direction_falls_back_to_a_valid_volume() {
    let light_space = build_directional_light_space(
        Vec3::ZERO,
        SHADOW_SCENE_CENTER,
        LIGHT_ORTHO_HALF_EXTENT,
        LIGHT_NEAR,
        LIGHT_FAR,
    );
    assert!(clip_contains(light_space * Vec4::new(0.0, -0.5, 0.0, 1.0)));
}

#[test]
fn vertical_light_direction_keeps_a_stable_basis() {
    let light_space = build_directional_light_space(
        Vec3::Y,
        SHADOW_SCENE_CENTER,
        LIGHT_ORTHO_HALF_EXTENT,
        LIGHT_NEAR,
        LIGHT_FAR,
    );
    // look_at with a parallel up vector would produce NaNs.
    assert!(clip_contains(light_space * Vec4::new(1.0, 0.0, 1.0, 1.0)));
}

#[test]
fn cube_faces_cover_every_direction() {
    let position = Vec3::new(0.7, 3.0, 2.0);
    let faces = build_point_light_cube_faces(position, 0.1, 50.0, 1.0);

    let directions = [
        Vec3::X,
        -Vec3::X,
        Vec3::Y,
        -Vec3::Y,
        Vec3::Z,
        -Vec3::Z,
        Vec3::new(0.3, 0.2, 0.9).normalize(),
        Vec3::new(-0.8, 0.1, -0.4).normalize(),
        Vec3::new(0.1, -0.9, 0.2).normalize(),
    ];
    for direction in directions {
        let point = position + direction * 10.0;
        let world = Vec4::new(point.x, point.y, point.z, 1.0);
        let covering = faces
            .iter()
            .filter(|face| clip_contains(**face * world))
            .count();
        assert!(covering >= 1, "direction {direction:?} not covered");
    }

    // A direction on a face edge lands in at most the two adjacent faces.
    let edge = position + Vec3::new(1.0, 1.0, 0.0).normalize() * 10.0;
    let world = Vec4::new(edge.x, edge.y, edge.z, 1.0);
    let covering = faces
        .iter()
        .filter(|face| clip_contains(**face * world))
        .count();
    assert!((1..=2).contains(&covering));
}

#[test]
fn cube_face_axes_map_to_their_own_face() {
    let position = Vec3::ZERO;
    let faces = build_point_light_cube_faces(position, 0.1, 50.0, 1.0);
    let axes = [Vec3::X, -Vec3::X, Vec3::Y, -Vec3::Y, Vec3::Z, -Vec3::Z];

    for (face, axis) in faces.iter().zip(axes) {
        let point = axis * 5.0;
        let clip = *face * Vec4::new(point.x, point.y, point.z, 1.0);
        assert!(clip_contains(clip), "axis {axis:?} missed its face");
        // On the face axis the point projects to the NDC center.
        let ndc = clip / clip.w;
        assert!(approx(ndc.x, 0.0) && approx(ndc.y, 0.0));
    }
}

#[test]
fn cube_face_projection_is_square() {
    let faces = build_point_light_cube_faces(Vec3::ZERO, 0.1, 50.0, 1.0);
    // 90° fov at aspect 1: a point as far off-axis as it is deep sits exactly
    // on the frustum edge.
    let edge = faces[0] * Vec4::new(5.0, 5.0, 0.0, 1.0);
    let ndc = edge / edge.w;
    assert!(approx(ndc.y.abs(), 1.0) || approx(ndc.x.abs(), 1.0));
}
