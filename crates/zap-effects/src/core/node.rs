use glam::Vec2;

use crate::api::types::{EffectId, NodeId};
use crate::core::transform::Transform;
use crate::effects::effect::Effect;
use crate::effects::handler::EffectsHandler;
use crate::renderer::canvas::Canvas;

/// A node in the scene tree: a transform, child nodes, and the effects
/// animating it.
#[derive(Debug)]
pub struct SceneNode {
    /// Unique identifier.
    pub id: NodeId,
    /// String tag for finding nodes by name.
    pub tag: String,
    /// Inactive nodes (and their subtrees) are neither updated nor rendered.
    pub active: bool,
    /// Draw bounds overlay after the node and its children.
    pub debug: bool,
    /// Transform relative to the parent node.
    pub transform: Transform,
    children: Vec<SceneNode>,
    effects: EffectsHandler,
}

impl SceneNode {
    /// Create a new node with the given ID at the origin.
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            debug: false,
            transform: Transform::default(),
            children: Vec::new(),
            effects: EffectsHandler::new(),
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.transform.position = position;
        self
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.transform.angle = angle;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.transform.size = size;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.transform.scale = scale;
        self
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Set the debug flag on this node and its whole subtree.
    pub fn set_debug_recursive(&mut self, debug: bool) {
        self.debug = debug;
        for child in &mut self.children {
            child.set_debug_recursive(debug);
        }
    }

    // -- Children --

    pub fn add_child(&mut self, child: SceneNode) {
        self.children.push(child);
    }

    /// Detach a descendant by ID, searching depth-first.
    pub fn remove_child(&mut self, id: NodeId) -> Option<SceneNode> {
        if let Some(idx) = self.children.iter().position(|c| c.id == id) {
            return Some(self.children.remove(idx));
        }
        self.children.iter_mut().find_map(|c| c.remove_child(id))
    }

    pub fn children(&self) -> &[SceneNode] {
        &self.children
    }

    /// This node or a descendant, depth-first.
    pub fn find(&self, id: NodeId) -> Option<&SceneNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// This node or a descendant, depth-first (mutable).
    pub fn find_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }

    /// First node in this subtree with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&SceneNode> {
        if self.tag == tag {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_tag(tag))
    }

    // -- Effects --

    /// Attach an effect as a root effect of this node.
    pub fn add_effect(&mut self, effect: impl Effect + 'static) -> EffectId {
        self.add_boxed_effect(Box::new(effect))
    }

    /// Attach an already boxed effect, e.g. one built from an `EffectConfig`.
    pub fn add_boxed_effect(&mut self, effect: Box<dyn Effect>) -> EffectId {
        self.effects.add(effect, self.id, &self.transform)
    }

    /// Dispose an effect; it is retired on the next update.
    pub fn remove_effect(&mut self, id: EffectId) -> bool {
        self.effects.remove(id)
    }

    /// Dispose every effect on this node.
    pub fn clear_effects(&mut self) {
        self.effects.clear();
    }

    pub fn effects(&self) -> &EffectsHandler {
        &self.effects
    }

    pub fn effects_mut(&mut self) -> &mut EffectsHandler {
        &mut self.effects
    }

    // -- Frame callbacks --

    /// Advance this node's effects, then its children.
    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.effects.update(dt, &mut self.transform);
        for child in &mut self.children {
            child.update(dt);
        }
    }

    /// Draw this subtree as a top-level node.
    pub fn render(&self, canvas: &mut dyn Canvas) {
        self.render_within(canvas, &Transform::default());
    }

    /// Draw this node in `parent` space, then its children, then the debug overlay.
    pub fn render_within(&self, canvas: &mut dyn Canvas, parent: &Transform) {
        if !self.active {
            return;
        }
        let world = self.transform.compose(parent);
        canvas.draw_node(self.id, &world);
        for child in &self.children {
            child.render_within(canvas, &world);
        }
        if self.debug {
            canvas.draw_debug_bounds(self.id, &world);
        }
    }
}
