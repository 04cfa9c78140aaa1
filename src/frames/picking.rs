use glam::Vec3;

use crate::frames::slot::{Slot, SlotBinding};
use crate::scene::NamedNode;

/// Result of the host's raycast against the rendered scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerHit<N> {
    /// The object that was struck (usually a leaf mesh).
    pub node: N,
    pub point: Vec3,
    pub distance: f32,
}

/// Maps a struck node to the frame it belongs to.
///
/// Walks from `node` up through its parents and returns the slot of the
/// nearest node whose name is either a slot id (the frame's group) or the
/// object name bound to a slot (the picture surface). `None` once the walk
/// passes the root.
pub fn slot_for_target<N: NamedNode>(node: N, binding: &SlotBinding) -> Option<Slot> {
    let mut current = Some(node);
    while let Some(node) = current {
        if let Some(name) = node.name() {
            if let Some(slot) = binding.slot(name) {
                return Some(slot);
            }
            if let Some(slot) = binding.slot_for_object(name) {
                return Some(slot.clone());
            }
        }
        current = node.parent();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Parent-pointer chain over a flat list, no scene needed.
    #[derive(Clone, Copy)]
    struct Chain<'a> {
        names: &'a [&'a str],
        index: usize,
    }

    impl NamedNode for Chain<'_> {
        fn name(&self) -> Option<&str> {
            Some(self.names[self.index])
        }

        fn parent(&self) -> Option<Self> {
            (self.index + 1 < self.names.len()).then_some(Chain {
                names: self.names,
                index: self.index + 1,
            })
        }
    }

    #[test]
    fn nearest_ancestor_wins() {
        let binding = SlotBinding::pictures(8);
        // leaf → ... → picture-5 → picture-1 (outer group, should not win)
        let names = ["Mesh 12", "Glass", "Frame", "picture-5", "picture-1", "Room"];
        let hit = Chain { names: &names, index: 0 };
        assert_eq!(slot_for_target(hit, &binding).unwrap().as_str(), "picture-5");
    }

    #[test]
    fn bound_object_name_matches() {
        let binding = SlotBinding::pictures(8);
        let names = ["picture-3-image", "Wall"];
        let hit = Chain { names: &names, index: 0 };
        assert_eq!(slot_for_target(hit, &binding).unwrap().as_str(), "picture-3");
    }

    #[test]
    fn unrelated_chain_is_none() {
        let binding = SlotBinding::pictures(8);
        let names = ["Chair", "Furniture", "Room"];
        let hit = Chain { names: &names, index: 0 };
        assert!(slot_for_target(hit, &binding).is_none());
    }

    #[test]
    fn ids_outside_the_binding_do_not_match() {
        let binding = SlotBinding::pictures(4);
        let names = ["Mesh", "picture-7", "Room"];
        let hit = Chain { names: &names, index: 0 };
        assert!(slot_for_target(hit, &binding).is_none());
    }
}
