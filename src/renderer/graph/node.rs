//! Render Node Trait
//!
//! Every pass of the pipeline implements [`RenderNode`].
//!
//! # Design
//! - `prepare` receives a mutable borrow of the node and the shared
//!   [`PrepareContext`]; all uniform uploads and bind-group (re)builds happen
//!   here.
//! - `run` is read-only and records GPU commands into the frame encoder.
//! - `reads`/`writes` declare the node's render-target data flow; the graph
//!   validates the declared sequence at construction time.

use super::context::{ExecuteContext, PrepareContext};
use crate::renderer::targets::TargetId;

pub trait RenderNode {
    /// Node name, used for GPU debug groups and diagnostics.
    fn name(&self) -> &'static str;

    /// Targets this node samples or attaches read-only.
    fn reads(&self) -> &'static [TargetId] {
        &[]
    }

    /// Targets this node renders into.
    fn writes(&self) -> &'static [TargetId] {
        &[]
    }

    /// Preparation phase: upload uniforms, rebuild stale bind groups.
    fn prepare(&mut self, _ctx: &mut PrepareContext<'_>) {}

    /// Execution phase: record render commands.
    fn run(&self, ctx: &ExecuteContext<'_>, encoder: &mut wgpu::CommandEncoder);
}
