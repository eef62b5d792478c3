//! Drawing surface contract for the scene tree.
//!
//! Nodes hand the canvas their resolved world transform; what gets drawn
//! for a node (sprite, mesh, nothing) is the canvas implementation's call.

use crate::api::types::NodeId;
use crate::core::transform::Transform;

/// Receives draw calls from [`SceneNode::render`](crate::core::node::SceneNode::render).
pub trait Canvas {
    /// Draw one node at its world transform. Called parent-first.
    fn draw_node(&mut self, node: NodeId, world: &Transform);

    /// Draw a debug overlay for a node after its subtree has been drawn.
    fn draw_debug_bounds(&mut self, _node: NodeId, _world: &Transform) {}
}
