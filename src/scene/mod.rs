//! Scene graph.
//!
//! A deliberately small stand-in for the host engine's graph:
//! - Node: named node with parent/child links
//! - Mesh: surface component referencing a material
//! - Scene: node arena, root list and mesh pool
//! - SceneAccess / NamedNode: the capability traits the frame logic uses

pub mod access;
pub mod node;
pub mod scene;

pub use access::{NamedNode, NodeRef, SceneAccess};
pub use node::Node;
pub use scene::{Mesh, Scene};

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
    pub struct MeshKey;
}
