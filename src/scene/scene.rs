use slotmap::SlotMap;

use crate::assets::MaterialHandle;
use crate::scene::node::Node;
use crate::scene::{MeshKey, NodeHandle};

/// A renderable surface. The material handle is the only part the frame
/// patcher ever touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mesh {
    pub material: MaterialHandle,
}

impl Mesh {
    #[must_use]
    pub fn new(material: MaterialHandle) -> Self {
        Self { material }
    }
}

/// Scene graph: named nodes in a tree plus a mesh pool.
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,

    pub meshes: SlotMap<MeshKey, Mesh>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
            meshes: SlotMap::with_key(),
        }
    }

    // ========================================================================
    // Node creation & removal
    // ========================================================================

    /// Adds a node at the root level.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    pub fn create_node(&mut self) -> NodeHandle {
        self.add_node(Node::new())
    }

    pub fn create_node_with_name(&mut self, name: &str) -> NodeHandle {
        self.add_node(Node::with_name(name))
    }

    /// Creates a named node directly under `parent`.
    pub fn add_to_parent(&mut self, name: &str, parent: NodeHandle) -> NodeHandle {
        let handle = self.create_node_with_name(name);
        self.attach(handle, parent);
        handle
    }

    /// Removes a node and its whole subtree, including their meshes.
    pub fn remove_node(&mut self, handle: NodeHandle) {
        let Some(node) = self.nodes.get(handle) else {
            return;
        };
        let children = node.children.clone();
        for child in children {
            self.remove_node(child);
        }

        self.unlink(handle);

        if let Some(node) = self.nodes.remove(handle)
            && let Some(mesh) = node.mesh
        {
            self.meshes.remove(mesh);
        }
    }

    // ========================================================================
    // Hierarchy
    // ========================================================================

    /// Moves `child` under `parent`.
    ///
    /// Attaching a node to itself or to one of its own descendants is a no-op.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent || !self.nodes.contains_key(child) || !self.nodes.contains_key(parent)
        {
            return;
        }
        if self.is_ancestor(child, parent) {
            log::warn!("Refusing to attach a node under its own descendant");
            return;
        }

        self.unlink(child);

        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    /// Detaches `handle` from its parent (or the root list) without removing it.
    fn unlink(&mut self, handle: NodeHandle) {
        let parent = self.nodes.get(handle).and_then(|n| n.parent);
        match parent {
            Some(parent) => {
                if let Some(p) = self.nodes.get_mut(parent) {
                    p.children.retain(|&c| c != handle);
                }
            }
            None => self.root_nodes.retain(|&r| r != handle),
        }
        if let Some(node) = self.nodes.get_mut(handle) {
            node.parent = None;
        }
    }

    /// True if `ancestor` lies on the parent chain of `node`.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: NodeHandle, node: NodeHandle) -> bool {
        let mut current = self.parent_of(node);
        while let Some(h) = current {
            if h == ancestor {
                return true;
            }
            current = self.parent_of(h);
        }
        false
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    #[inline]
    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    #[must_use]
    pub fn get_name(&self, handle: NodeHandle) -> Option<&str> {
        self.nodes.get(handle).map(|n| n.name.as_str())
    }

    pub fn set_name(&mut self, handle: NodeHandle, name: &str) {
        if let Some(node) = self.nodes.get_mut(handle) {
            node.name = name.to_string();
        }
    }

    #[inline]
    #[must_use]
    pub fn parent_of(&self, handle: NodeHandle) -> Option<NodeHandle> {
        self.nodes.get(handle).and_then(|n| n.parent)
    }

    /// First node called `name` in depth-first pre-order from the roots.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<NodeHandle> {
        let mut stack: Vec<NodeHandle> = self.root_nodes.iter().rev().copied().collect();
        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            if node.name == name {
                return Some(handle);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }

    /// Visits `root` and all its descendants in depth-first pre-order.
    pub fn traverse(&self, root: NodeHandle, mut visit: impl FnMut(NodeHandle, &Node)) {
        let mut stack = vec![root];
        while let Some(handle) = stack.pop() {
            if let Some(node) = self.nodes.get(handle) {
                visit(handle, node);
                stack.extend(node.children.iter().rev().copied());
            }
        }
    }

    // ========================================================================
    // Components
    // ========================================================================

    /// Gives `handle` a mesh, replacing (and freeing) any previous one.
    pub fn set_mesh(&mut self, handle: NodeHandle, mesh: Mesh) -> Option<MeshKey> {
        let node = self.nodes.get_mut(handle)?;
        let key = self.meshes.insert(mesh);
        if let Some(old) = node.mesh.replace(key) {
            self.meshes.remove(old);
        }
        Some(key)
    }

    #[must_use]
    pub fn get_mesh(&self, handle: NodeHandle) -> Option<&Mesh> {
        let key = self.nodes.get(handle)?.mesh?;
        self.meshes.get(key)
    }

    pub fn get_mesh_mut(&mut self, handle: NodeHandle) -> Option<&mut Mesh> {
        let key = self.nodes.get(handle)?.mesh?;
        self.meshes.get_mut(key)
    }
}
