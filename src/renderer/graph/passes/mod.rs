//! The seven passes of the deferred pipeline, in execution order.

pub mod shadow;
pub mod geometry;
pub mod lighting;
pub mod skybox;
pub mod bloom;
pub mod present;
pub mod debug;

pub use bloom::{BloomBlurPass, blur_is_horizontal, blur_output, blur_source, blur_target};
pub use debug::DebugOverlayPass;
pub use geometry::{GeometryPass, geometry_depth_state};
pub use lighting::LightingResolvePass;
pub use present::PresentCompositePass;
pub use shadow::ShadowDepthPass;
pub use skybox::{SkyboxCompositePass, skybox_depth_state};
