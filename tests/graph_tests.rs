//! Pipeline-topology checks: pass ordering, attachment arity and the bloom
//! ping-pong bookkeeping, all validated without a GPU.

use glimmer::RenderError;
use glimmer::renderer::graph::passes::{
    blur_is_horizontal, blur_output, blur_source, blur_target, geometry_depth_state,
    skybox_depth_state,
};
use glimmer::renderer::graph::{PassIo, validate_pass_order};
use glimmer::renderer::targets::{AttachmentRequirements, FramebufferBinding, TargetId};

/// The declared target I/O of the seven passes, in execution order.
fn deferred_pass_io() -> Vec<PassIo> {
    vec![
        PassIo {
            name: "Shadow Depth Pass",
            reads: vec![],
            writes: vec![TargetId::ShadowMap],
        },
        PassIo {
            name: "Geometry Pass",
            reads: vec![],
            writes: vec![
                TargetId::GBufferPosition,
                TargetId::GBufferNormal,
                TargetId::GBufferAlbedo,
                TargetId::GBufferDepth,
            ],
        },
        PassIo {
            name: "Lighting Resolve Pass",
            reads: vec![
                TargetId::GBufferPosition,
                TargetId::GBufferNormal,
                TargetId::GBufferAlbedo,
                TargetId::ShadowMap,
            ],
            writes: vec![TargetId::SceneColor, TargetId::BrightColor],
        },
        PassIo {
            name: "Skybox Composite Pass",
            reads: vec![TargetId::SceneColor, TargetId::GBufferDepth],
            writes: vec![TargetId::SceneColor],
        },
        PassIo {
            name: "Bloom Blur Pass",
            reads: vec![TargetId::BrightColor],
            writes: vec![TargetId::BlurPing, TargetId::BlurPong],
        },
        PassIo {
            name: "Present Composite Pass",
            reads: vec![TargetId::SceneColor, TargetId::BlurPing, TargetId::BlurPong],
            writes: vec![TargetId::Surface],
        },
        PassIo {
            name: "Debug Overlay Pass",
            reads: vec![
                TargetId::GBufferPosition,
                TargetId::GBufferNormal,
                TargetId::GBufferAlbedo,
            ],
            writes: vec![TargetId::Surface],
        },
    ]
}

#[test]
fn canonical_pass_order_validates() {
    assert!(validate_pass_order(&deferred_pass_io()).is_ok());
}

#[test]
fn reader_before_writer_is_rejected() {
    let mut passes = deferred_pass_io();
    // Move the lighting resolve ahead of the geometry pass; its G-buffer
    // reads now have no producer.
    passes.swap(1, 2);
    let err = validate_pass_order(&passes).unwrap_err();
    assert!(matches!(err, RenderError::PassOrdering(_)));
}

#[test]
fn empty_graph_validates() {
    assert!(validate_pass_order(&[]).is_ok());
}

#[test]
fn framebuffer_binding_arity_is_enforced() {
    let gbuffer = FramebufferBinding {
        color: vec![
            TargetId::GBufferPosition,
            TargetId::GBufferNormal,
            TargetId::GBufferAlbedo,
        ],
        depth: Some(TargetId::GBufferDepth),
    };
    assert!(
        gbuffer
            .validate(AttachmentRequirements {
                color_count: 3,
                needs_depth: true,
            })
            .is_ok()
    );
    assert!(
        gbuffer
            .validate(AttachmentRequirements {
                color_count: 2,
                needs_depth: true,
            })
            .is_err()
    );
    assert!(
        gbuffer
            .validate(AttachmentRequirements {
                color_count: 3,
                needs_depth: false,
            })
            .is_err()
    );
}

#[test]
fn blur_alternates_directions_and_targets() {
    assert!(blur_is_horizontal(0));
    assert!(!blur_is_horizontal(1));

    assert_eq!(blur_source(0), TargetId::BrightColor);
    assert_eq!(blur_target(0), TargetId::BlurPing);
    assert_eq!(blur_source(1), TargetId::BlurPing);
    assert_eq!(blur_target(1), TargetId::BlurPong);
    assert_eq!(blur_source(2), TargetId::BlurPong);
    assert_eq!(blur_target(2), TargetId::BlurPing);
}

#[test]
fn blur_never_samples_its_own_target() {
    for iteration in 0..16 {
        assert_ne!(blur_source(iteration), blur_target(iteration));
    }
}

#[test]
fn blur_output_follows_iteration_parity() {
    assert_eq!(blur_output(0), TargetId::BrightColor);
    assert_eq!(blur_output(1), TargetId::BlurPing);
    assert_eq!(blur_output(2), TargetId::BlurPong);
    assert_eq!(blur_output(4), TargetId::BlurPong);
    assert_eq!(blur_output(5), TargetId::BlurPing);
}

#[test]
fn skybox_tests_but_never_writes_depth() {
    let geometry = geometry_depth_state();
    assert!(geometry.depth_write_enabled);
    assert_eq!(geometry.depth_compare, wgpu::CompareFunction::Less);

    let skybox = skybox_depth_state();
    assert!(!skybox.depth_write_enabled);
    // `pos.xyww` puts the box exactly at the far plane; LessEqual lets it
    // pass where nothing else has drawn.
    assert_eq!(skybox.depth_compare, wgpu::CompareFunction::LessEqual);
    assert_eq!(skybox.format, geometry.format);
}
