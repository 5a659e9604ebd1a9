pub mod camera;
pub mod content;
pub mod lighting;

pub use camera::Camera;
pub use content::{DrawItem, MaterialKind, MeshHandle, SceneContent};
pub use lighting::{DirectionalLight, LightingState, MAX_POINT_LIGHTS, PointLight};
