use bytemuck::{Pod, Zeroable};

use crate::api::types::NodeId;
use crate::core::transform::Transform;
use super::canvas::Canvas;

/// Per-node render data in world space, laid out for direct upload.
/// 6 x 4 bytes = 24 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// X position in world space.
    pub x: f32,
    /// Y position in world space.
    pub y: f32,
    /// Rotation in radians.
    pub angle: f32,
    /// Rendered width (size * scale).
    pub width: f32,
    /// Rendered height (size * scale).
    pub height: f32,
    /// Node the instance was drawn for.
    pub node: u32,
}

impl RenderInstance {
    pub const STRIDE_BYTES: usize = std::mem::size_of::<Self>();

    pub fn from_world(node: NodeId, world: &Transform) -> Self {
        let extent = world.scaled_size();
        Self {
            x: world.position.x,
            y: world.position.y,
            angle: world.angle,
            width: extent.x,
            height: extent.y,
            node: node.0,
        }
    }
}

/// A [`Canvas`] that records instances in draw order.
pub struct RenderBuffer {
    /// Node instances, parents before children.
    pub instances: Vec<RenderInstance>,
    /// Debug bounds for nodes with their debug flag set.
    pub debug_bounds: Vec<RenderInstance>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(256),
            debug_bounds: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.debug_bounds.clear();
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Instance data as raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas for RenderBuffer {
    fn draw_node(&mut self, node: NodeId, world: &Transform) {
        self.instances.push(RenderInstance::from_world(node, world));
    }

    fn draw_debug_bounds(&mut self, node: NodeId, world: &Transform) {
        self.debug_bounds.push(RenderInstance::from_world(node, world));
    }
}
