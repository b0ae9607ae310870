use crate::node::{Capabilities, Mesh, Node};
use glam::{Mat4, Vec3};
use std::collections::{BTreeMap, BTreeSet};
use townwalk_common::{NodeId, Transform};

/// Errors from scene graph operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("node {0:?} not found")]
    NodeNotFound(NodeId),
    #[error("parenting {node:?} under {parent:?} would form a cycle")]
    Cycle { node: NodeId, parent: NodeId },
}

/// The retained scene graph.
///
/// Nodes hold an optional parent and a local transform; world transforms are
/// composed on demand by walking the parent chain. Shadow casters are tracked
/// on the scene (the lighting side), not on the nodes.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: BTreeMap<NodeId, Node>,
    /// Creation order, for deterministic traversal.
    order: Vec<NodeId>,
    shadow_casters: BTreeSet<NodeId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the scene.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of nodes carrying a mesh.
    pub fn mesh_count(&self) -> usize {
        self.nodes.values().filter(|n| n.is_mesh()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.order.iter().filter_map(|id| self.nodes.get(id).map(|n| (*id, n)))
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Create an empty transform node.
    pub fn create_node(
        &mut self,
        name: impl Into<String>,
        parent: Option<NodeId>,
        local: Transform,
    ) -> Result<NodeId, SceneError> {
        self.insert(Node {
            name: name.into(),
            parent,
            local,
            mesh: None,
            caps: Capabilities::default(),
        })
    }

    /// Create a mesh node.
    pub fn create_mesh(
        &mut self,
        name: impl Into<String>,
        parent: Option<NodeId>,
        local: Transform,
        mesh: Mesh,
        caps: Capabilities,
    ) -> Result<NodeId, SceneError> {
        self.insert(Node {
            name: name.into(),
            parent,
            local,
            mesh: Some(mesh),
            caps,
        })
    }

    fn insert(&mut self, node: Node) -> Result<NodeId, SceneError> {
        if let Some(parent) = node.parent {
            if !self.nodes.contains_key(&parent) {
                return Err(SceneError::NodeNotFound(parent));
            }
        }
        let id = NodeId::new();
        self.nodes.insert(id, node);
        self.order.push(id);
        Ok(id)
    }

    /// Re-parent a node. `None` detaches it to the scene root.
    pub fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) -> Result<(), SceneError> {
        if !self.nodes.contains_key(&id) {
            return Err(SceneError::NodeNotFound(id));
        }
        if let Some(p) = parent {
            if !self.nodes.contains_key(&p) {
                return Err(SceneError::NodeNotFound(p));
            }
            if p == id || self.is_ancestor(id, p) {
                return Err(SceneError::Cycle { node: id, parent: p });
            }
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent = parent;
        }
        Ok(())
    }

    /// True if `ancestor` appears on `node`'s parent chain.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = self.nodes.get(&node).and_then(|n| n.parent);
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.nodes.get(&p).and_then(|n| n.parent);
        }
        false
    }

    pub fn set_local_transform(&mut self, id: NodeId, local: Transform) -> Result<(), SceneError> {
        let node = self.nodes.get_mut(&id).ok_or(SceneError::NodeNotFound(id))?;
        node.local = local;
        Ok(())
    }

    /// Local-to-world matrix, composed through every ancestor.
    pub fn world_matrix(&self, id: NodeId) -> Result<Mat4, SceneError> {
        let node = self.nodes.get(&id).ok_or(SceneError::NodeNotFound(id))?;
        let mut m = node.local.matrix();
        let mut cur = node.parent;
        while let Some(p) = cur {
            let parent = self.nodes.get(&p).ok_or(SceneError::NodeNotFound(p))?;
            m = parent.local.matrix() * m;
            cur = parent.parent;
        }
        Ok(m)
    }

    pub fn world_position(&self, id: NodeId) -> Result<Vec3, SceneError> {
        Ok(self.world_matrix(id)?.transform_point3(Vec3::ZERO))
    }

    /// Direct children in creation order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.iter()
            .filter(|(_, n)| n.parent == Some(id))
            .map(|(c, _)| c)
            .collect()
    }

    /// Every node below `id`, in creation order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        self.iter()
            .filter(|(c, _)| self.is_ancestor(id, *c))
            .map(|(c, _)| c)
            .collect()
    }

    /// Mesh nodes below `id`.
    pub fn child_meshes(&self, id: NodeId) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|c| self.nodes.get(c).is_some_and(Node::is_mesh))
            .collect()
    }

    /// First descendant of `root` with the given name.
    pub fn find_descendant(&self, root: NodeId, name: &str) -> Option<NodeId> {
        self.descendants(root)
            .into_iter()
            .find(|c| self.nodes.get(c).is_some_and(|n| n.name == name))
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> Result<(), SceneError> {
        let node = self.nodes.get_mut(&id).ok_or(SceneError::NodeNotFound(id))?;
        node.caps.visible = visible;
        Ok(())
    }

    /// Visible only if the node and every ancestor are visible.
    pub fn is_visible(&self, id: NodeId) -> bool {
        let mut cur = Some(id);
        while let Some(c) = cur {
            match self.nodes.get(&c) {
                Some(n) if n.caps.visible => cur = n.parent,
                _ => return false,
            }
        }
        true
    }

    // --- Lighting ---

    pub fn add_shadow_caster(&mut self, id: NodeId) -> Result<(), SceneError> {
        if !self.nodes.contains_key(&id) {
            return Err(SceneError::NodeNotFound(id));
        }
        self.shadow_casters.insert(id);
        Ok(())
    }

    /// Register every mesh below `root` as a shadow caster. Returns how many.
    pub fn add_shadow_casters_below(&mut self, root: NodeId) -> usize {
        let meshes = self.child_meshes(root);
        let n = meshes.len();
        self.shadow_casters.extend(meshes);
        n
    }

    pub fn is_shadow_caster(&self, id: NodeId) -> bool {
        self.shadow_casters.contains(&id)
    }

    pub fn shadow_caster_count(&self) -> usize {
        self.shadow_casters.len()
    }

    // --- Teardown ---

    /// Remove a node and its whole subtree. Returns the number removed.
    pub fn remove(&mut self, id: NodeId) -> Result<usize, SceneError> {
        if !self.nodes.contains_key(&id) {
            return Err(SceneError::NodeNotFound(id));
        }
        let mut doomed: BTreeSet<NodeId> = self.descendants(id).into_iter().collect();
        doomed.insert(id);
        for d in &doomed {
            self.nodes.remove(d);
            self.shadow_casters.remove(d);
        }
        self.order.retain(|o| !doomed.contains(o));
        Ok(doomed.len())
    }

    /// Release every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.order.clear();
        self.shadow_casters.clear();
    }

    /// Hash of the scene's structure and appearance, ignoring node ids and
    /// material names. Two scenes built by the same sequence hash equal.
    pub fn content_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        let index: BTreeMap<NodeId, usize> =
            self.order.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        for (id, node) in self.iter() {
            mix(&mut h, node.name.as_bytes());
            let parent = node.parent.and_then(|p| index.get(&p).copied());
            mix(&mut h, &parent.map_or(u64::MAX, |p| p as u64).to_le_bytes());
            for v in node.local.matrix().to_cols_array() {
                mix(&mut h, &v.to_le_bytes());
            }
            if let Some(mesh) = &node.mesh {
                mix(&mut h, mesh.primitive.kind().as_bytes());
                for v in mesh.primitive.half_extents().to_array() {
                    mix(&mut h, &v.to_le_bytes());
                }
                for v in mesh.material.diffuse.to_array() {
                    mix(&mut h, &v.to_le_bytes());
                }
                mix(&mut h, &mesh.material.alpha.to_le_bytes());
            }
            mix(
                &mut h,
                &[
                    node.caps.visible as u8,
                    node.caps.collidable as u8,
                    node.caps.receive_shadows as u8,
                    self.shadow_casters.contains(&id) as u8,
                ],
            );
        }
        h
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Material, Primitive};

    fn cube() -> Mesh {
        Mesh {
            primitive: Primitive::cuboid(1.0, 1.0, 1.0),
            material: Material::rgb(0.5, 0.5, 0.5),
        }
    }

    #[test]
    fn scene_starts_empty() {
        let s = Scene::new();
        assert!(s.is_empty());
        assert_eq!(s.node_count(), 0);
    }

    #[test]
    fn missing_parent_is_rejected() {
        let mut s = Scene::new();
        let ghost = NodeId::new();
        let err = s.create_node("orphan", Some(ghost), Transform::default());
        assert_eq!(err, Err(SceneError::NodeNotFound(ghost)));
    }

    #[test]
    fn world_matrix_composes_parents() {
        let mut s = Scene::new();
        let root = s
            .create_node("root", None, Transform::from_xyz(10.0, 0.0, 5.0))
            .unwrap();
        let child = s
            .create_mesh(
                "child",
                Some(root),
                Transform::from_xyz(0.0, 2.0, 1.0),
                cube(),
                Capabilities::default(),
            )
            .unwrap();
        let p = s.world_position(child).unwrap();
        assert!((p - Vec3::new(10.0, 2.0, 6.0)).length() < 1e-5);
    }

    #[test]
    fn rotated_parent_rotates_child_offset() {
        let mut s = Scene::new();
        let root = s
            .create_node(
                "root",
                None,
                Transform::placed(0.0, 0.0, std::f32::consts::PI),
            )
            .unwrap();
        let child = s
            .create_node("child", Some(root), Transform::from_xyz(0.0, 0.0, 2.0))
            .unwrap();
        let p = s.world_position(child).unwrap();
        assert!((p - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-5);
    }

    #[test]
    fn cycles_are_rejected() {
        let mut s = Scene::new();
        let a = s.create_node("a", None, Transform::default()).unwrap();
        let b = s.create_node("b", Some(a), Transform::default()).unwrap();
        assert_eq!(
            s.set_parent(a, Some(b)),
            Err(SceneError::Cycle { node: a, parent: b })
        );
        assert_eq!(
            s.set_parent(a, Some(a)),
            Err(SceneError::Cycle { node: a, parent: a })
        );
        assert!(s.set_parent(b, None).is_ok());
        assert!(s.set_parent(a, Some(b)).is_ok());
    }

    #[test]
    fn visibility_inherits_from_ancestors() {
        let mut s = Scene::new();
        let root = s.create_node("root", None, Transform::default()).unwrap();
        let child = s
            .create_mesh("c", Some(root), Transform::default(), cube(), Capabilities::default())
            .unwrap();
        assert!(s.is_visible(child));
        s.set_visible(root, false).unwrap();
        assert!(!s.is_visible(child));
        s.set_visible(root, true).unwrap();
        assert!(s.is_visible(child));
    }

    #[test]
    fn shadow_casters_cover_nested_meshes() {
        let mut s = Scene::new();
        let root = s.create_node("root", None, Transform::default()).unwrap();
        let group = s.create_node("group", Some(root), Transform::default()).unwrap();
        s.create_mesh("a", Some(root), Transform::default(), cube(), Capabilities::default())
            .unwrap();
        let nested = s
            .create_mesh("b", Some(group), Transform::default(), cube(), Capabilities::default())
            .unwrap();
        assert_eq!(s.add_shadow_casters_below(root), 2);
        assert!(s.is_shadow_caster(nested));
        assert!(!s.is_shadow_caster(group));
    }

    #[test]
    fn remove_drops_subtree_and_casters() {
        let mut s = Scene::new();
        let keep = s.create_node("keep", None, Transform::default()).unwrap();
        let root = s.create_node("root", None, Transform::default()).unwrap();
        let child = s
            .create_mesh("c", Some(root), Transform::default(), cube(), Capabilities::default())
            .unwrap();
        s.add_shadow_caster(child).unwrap();
        assert_eq!(s.remove(root), Ok(2));
        assert_eq!(s.node_count(), 1);
        assert_eq!(s.shadow_caster_count(), 0);
        assert!(s.get(keep).is_some());
        s.clear();
        assert!(s.is_empty());
    }

    #[test]
    fn find_descendant_by_name() {
        let mut s = Scene::new();
        let root = s.create_node("house", None, Transform::default()).unwrap();
        let pivot = s.create_node("doorPivot", Some(root), Transform::default()).unwrap();
        assert_eq!(s.find_descendant(root, "doorPivot"), Some(pivot));
        assert_eq!(s.find_descendant(root, "chimney"), None);
    }

    #[test]
    fn content_hash_ignores_ids_and_material_names() {
        let build = || {
            let mut s = Scene::new();
            let root = s
                .create_node("root", None, Transform::from_xyz(1.0, 0.0, 2.0))
                .unwrap();
            s.create_mesh("c", Some(root), Transform::default(), cube(), Capabilities::solid())
                .unwrap();
            s.add_shadow_casters_below(root);
            s
        };
        assert_eq!(build().content_hash(), build().content_hash());

        let mut moved = build();
        let first = moved.iter().next().map(|(id, _)| id).unwrap();
        moved
            .set_local_transform(first, Transform::from_xyz(9.0, 0.0, 0.0))
            .unwrap();
        assert_ne!(moved.content_hash(), build().content_hash());
    }
}
