pub mod context;
pub mod graph;
pub mod node;
pub mod passes;

pub use context::{ExecuteContext, PrepareContext};
pub use graph::{PassIo, RenderGraph, validate_pass_order};
pub use node::RenderNode;
