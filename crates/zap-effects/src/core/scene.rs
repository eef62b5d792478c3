use crate::api::config::SceneConfig;
use crate::api::types::NodeId;
use crate::core::node::SceneNode;
use crate::core::time::FixedTimestep;
use crate::renderer::canvas::Canvas;

/// Top-level node storage and frame driver.
/// Root nodes live in a flat Vec; each owns its subtree.
pub struct Scene {
    roots: Vec<SceneNode>,
    config: SceneConfig,
    timestep: Option<FixedTimestep>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    pub fn with_config(config: SceneConfig) -> Self {
        let timestep = config
            .fixed_dt
            .filter(|dt| *dt > 0.0)
            .map(|dt| FixedTimestep::new(dt, config.max_steps_per_frame));
        Self {
            roots: Vec::with_capacity(64),
            config,
            timestep,
            next_id: 1,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Generate the next unique node ID.
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a top-level node. Returns its ID.
    pub fn spawn(&mut self, mut node: SceneNode) -> NodeId {
        if self.config.debug {
            node.set_debug_recursive(true);
        }
        let id = node.id;
        self.roots.push(node);
        id
    }

    /// Attach `node` under `parent`. Hands the node back if the parent does not exist.
    pub fn spawn_child(&mut self, parent: NodeId, mut node: SceneNode) -> Result<NodeId, SceneNode> {
        if self.config.debug {
            node.set_debug_recursive(true);
        }
        match self.get_mut(parent) {
            Some(p) => {
                let id = node.id;
                p.add_child(node);
                Ok(id)
            }
            None => Err(node),
        }
    }

    /// Remove a node (and its subtree) by ID, wherever it sits in the tree.
    pub fn despawn(&mut self, id: NodeId) -> Option<SceneNode> {
        if let Some(idx) = self.roots.iter().position(|n| n.id == id) {
            return Some(self.roots.remove(idx));
        }
        self.roots.iter_mut().find_map(|n| n.remove_child(id))
    }

    /// Find a node anywhere in the tree, depth-first.
    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.roots.iter().find_map(|n| n.find(id))
    }

    /// Find a node anywhere in the tree, depth-first (mutable).
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.roots.iter_mut().find_map(|n| n.find_mut(id))
    }

    /// Find the first node with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&SceneNode> {
        self.roots.iter().find_map(|n| n.find_by_tag(tag))
    }

    /// Iterate over top-level nodes.
    pub fn iter(&self) -> impl Iterator<Item = &SceneNode> {
        self.roots.iter()
    }

    /// Advance every node by exactly `dt`.
    pub fn update(&mut self, dt: f32) {
        for node in &mut self.roots {
            node.update(dt);
        }
    }

    /// Advance by one display frame. With a fixed timestep configured this
    /// runs zero or more fixed steps; otherwise one step of `frame_dt`.
    /// Returns the number of steps run.
    pub fn frame(&mut self, frame_dt: f32) -> u32 {
        let Some(timestep) = self.timestep.as_mut() else {
            self.update(frame_dt);
            return 1;
        };
        let steps = timestep.accumulate(frame_dt);
        let dt = timestep.dt();
        for _ in 0..steps {
            self.update(dt);
        }
        steps
    }

    /// Draw every top-level node and its subtree.
    pub fn render(&self, canvas: &mut dyn Canvas) {
        for node in &self.roots {
            node.render(canvas);
        }
    }

    /// Number of top-level nodes.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Remove all nodes.
    pub fn clear(&mut self) {
        self.roots.clear();
        if let Some(timestep) = self.timestep.as_mut() {
            timestep.reset();
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
