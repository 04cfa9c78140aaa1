//! The narrow view of a scene graph the frame logic relies on.
//!
//! Anything that can find an object by name and swap its surface appearance
//! can host picture frames: the bundled [`Scene`], a foreign engine behind a
//! bridge, or a stub in tests.

use crate::assets::MaterialHandle;
use crate::scene::{NodeHandle, Scene};

/// Find / read / write access to object appearances.
pub trait SceneAccess {
    type Object: Copy;
    type Appearance: Clone + PartialEq;

    fn find_by_name(&self, name: &str) -> Option<Self::Object>;

    /// `None` for objects that carry no surface.
    fn appearance(&self, object: Self::Object) -> Option<Self::Appearance>;

    /// Returns false if the object is gone or cannot carry an appearance.
    fn set_appearance(&mut self, object: Self::Object, appearance: Self::Appearance) -> bool;
}

impl SceneAccess for Scene {
    type Object = NodeHandle;
    type Appearance = MaterialHandle;

    fn find_by_name(&self, name: &str) -> Option<NodeHandle> {
        Scene::find_by_name(self, name)
    }

    fn appearance(&self, object: NodeHandle) -> Option<MaterialHandle> {
        self.get_mesh(object).map(|m| m.material)
    }

    fn set_appearance(&mut self, object: NodeHandle, appearance: MaterialHandle) -> bool {
        match self.get_mesh_mut(object) {
            Some(mesh) => {
                mesh.material = appearance;
                true
            }
            None => false,
        }
    }
}

/// Name plus parent link: all a pointer hit needs to be mapped to a slot.
pub trait NamedNode: Sized {
    fn name(&self) -> Option<&str>;
    fn parent(&self) -> Option<Self>;
}

/// Borrowed node of a [`Scene`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    scene: &'a Scene,
    handle: NodeHandle,
}

impl<'a> NodeRef<'a> {
    #[must_use]
    pub fn new(scene: &'a Scene, handle: NodeHandle) -> Self {
        Self { scene, handle }
    }

    #[must_use]
    pub fn handle(&self) -> NodeHandle {
        self.handle
    }
}

impl NamedNode for NodeRef<'_> {
    fn name(&self) -> Option<&str> {
        self.scene.get_name(self.handle)
    }

    fn parent(&self) -> Option<Self> {
        self.scene
            .parent_of(self.handle)
            .map(|handle| Self::new(self.scene, handle))
    }
}
