//! Prefabs: plain-data node trees produced by the asset builders and
//! instantiated into a [`Scene`] at a placement.

use crate::node::{Capabilities, Material, Mesh, Primitive};
use crate::scene::{Scene, SceneError};
use townwalk_common::{NodeId, Transform};

/// One node of a prefab tree.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefabNode {
    pub name: String,
    pub local: Transform,
    pub mesh: Option<Mesh>,
    pub caps: Capabilities,
    pub children: Vec<PrefabNode>,
}

impl PrefabNode {
    /// An empty transform node.
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            local: Transform::default(),
            mesh: None,
            caps: Capabilities::default(),
            children: Vec::new(),
        }
    }

    pub fn mesh(name: impl Into<String>, primitive: Primitive, material: Material) -> Self {
        Self {
            mesh: Some(Mesh {
                primitive,
                material,
            }),
            ..Self::group(name)
        }
    }

    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.local.position = glam::Vec3::new(x, y, z);
        self
    }

    pub fn with_caps(mut self, caps: Capabilities) -> Self {
        self.caps = caps;
        self
    }

    pub fn with_child(mut self, child: PrefabNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn push(&mut self, child: PrefabNode) {
        self.children.push(child);
    }

    fn visit<'a>(&'a self, out: &mut Vec<&'a PrefabNode>) {
        out.push(self);
        for c in &self.children {
            c.visit(out);
        }
    }
}

/// A composite prop: a named root with child parts positioned relative to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Prefab {
    pub root: PrefabNode,
}

impl Prefab {
    pub fn new(root: PrefabNode) -> Self {
        Self { root }
    }

    pub fn name(&self) -> &str {
        &self.root.name
    }

    /// All nodes, depth first, root included.
    pub fn nodes(&self) -> Vec<&PrefabNode> {
        let mut out = Vec::new();
        self.root.visit(&mut out);
        out
    }

    pub fn mesh_count(&self) -> usize {
        self.nodes().iter().filter(|n| n.mesh.is_some()).count()
    }

    pub fn find(&self, name: &str) -> Option<&PrefabNode> {
        self.nodes().into_iter().find(|n| n.name == name)
    }

    /// True when both trees have the same shape, transforms and looks,
    /// ignoring generated material names.
    pub fn same_geometry(&self, other: &Prefab) -> bool {
        let (a, b) = (self.nodes(), other.nodes());
        a.len() == b.len()
            && a.iter().zip(b.iter()).all(|(x, y)| {
                x.name == y.name
                    && x.local == y.local
                    && x.caps == y.caps
                    && x.children.len() == y.children.len()
                    && match (&x.mesh, &y.mesh) {
                        (Some(mx), Some(my)) => {
                            mx.primitive == my.primitive
                                && mx.material.same_appearance(&my.material)
                        }
                        (None, None) => true,
                        _ => false,
                    }
            })
    }
}

impl Scene {
    /// Instantiate a prefab. The prefab root's local transform is replaced
    /// by `placement`; children keep theirs. Returns the new root node.
    pub fn instantiate(
        &mut self,
        prefab: &Prefab,
        parent: Option<NodeId>,
        placement: Transform,
    ) -> Result<NodeId, SceneError> {
        let root = self.spawn_prefab_node(&prefab.root, parent, placement)?;
        tracing::trace!(prefab = prefab.name(), root = %root.short(), "instantiated prefab");
        Ok(root)
    }

    fn spawn_prefab_node(
        &mut self,
        node: &PrefabNode,
        parent: Option<NodeId>,
        local: Transform,
    ) -> Result<NodeId, SceneError> {
        let id = match &node.mesh {
            Some(mesh) => self.create_mesh(node.name.clone(), parent, local, mesh.clone(), node.caps)?,
            None => {
                let id = self.create_node(node.name.clone(), parent, local)?;
                if let Some(n) = self.get_mut(id) {
                    n.caps = node.caps;
                }
                id
            }
        };
        for child in &node.children {
            self.spawn_prefab_node(child, Some(id), child.local)?;
        }
        Ok(id)
    }
}
