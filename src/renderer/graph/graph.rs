//! Render Graph Executor
//!
//! `RenderGraph` owns the ordered pass list and executes it linearly:
//! a single `CommandEncoder` spans the whole graph, each node records inside
//! its own debug group, and the encoder is submitted once per frame.
//!
//! Construction validates the declared target reads/writes of the sequence:
//! a node reading a target no earlier node has written is a
//! [`RenderError::PassOrdering`] error at init time, never a mid-frame
//! surprise.

use std::collections::HashSet;

use super::context::{ExecuteContext, PrepareContext};
use super::node::RenderNode;
use crate::errors::{RenderError, Result};
use crate::renderer::targets::TargetId;

/// Declared target I/O of one pass, as seen by the ordering validator.
#[derive(Debug, Clone)]
pub struct PassIo {
    pub name: &'static str,
    pub reads: Vec<TargetId>,
    pub writes: Vec<TargetId>,
}

/// Checks that the pass sequence is a topological order of its target data
/// flow: every read must be preceded by a write of the same target.
pub fn validate_pass_order(passes: &[PassIo]) -> Result<()> {
    let mut written: HashSet<TargetId> = HashSet::new();
    for pass in passes {
        for read in &pass.reads {
            if !written.contains(read) {
                return Err(RenderError::PassOrdering(format!(
                    "pass '{}' reads {read:?} before any pass writes it",
                    pass.name
                )));
            }
        }
        written.extend(pass.writes.iter().copied());
    }
    Ok(())
}

/// Ordered list of render nodes executed once per frame.
pub struct RenderGraph {
    nodes: Vec<Box<dyn RenderNode>>,
}

impl RenderGraph {
    /// Builds the graph, validating the node sequence's target ordering.
    pub fn build(nodes: Vec<Box<dyn RenderNode>>) -> Result<Self> {
        let io: Vec<PassIo> = nodes
            .iter()
            .map(|node| PassIo {
                name: node.name(),
                reads: node.reads().to_vec(),
                writes: node.writes().to_vec(),
            })
            .collect();
        validate_pass_order(&io)?;
        Ok(Self { nodes })
    }

    /// Runs the preparation phase of every node in order.
    pub fn prepare(&mut self, ctx: &mut PrepareContext<'_>) {
        for node in &mut self.nodes {
            node.prepare(ctx);
        }
    }

    /// Records and submits the whole frame.
    ///
    /// All nodes share one `CommandEncoder` to keep submission count at one;
    /// debug groups only cost anything under a GPU debugger.
    pub fn execute(&self, device: &wgpu::Device, queue: &wgpu::Queue, ctx: &ExecuteContext<'_>) {
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Graph Encoder"),
        });

        for node in &self.nodes {
            encoder.push_debug_group(node.name());
            node.run(ctx, &mut encoder);
            encoder.pop_debug_group();
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    /// Number of nodes in the graph.
    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
