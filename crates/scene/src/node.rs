//! Node payloads: primitive shapes, materials, capability flags.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use townwalk_common::{Color3, NodeId, Transform};
use uuid::Uuid;

/// Primitive shape a mesh node is built from, in local units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Cylinder {
        height: f32,
        diameter_top: f32,
        diameter_bottom: f32,
        tessellation: u32,
    },
    Sphere {
        diameter: f32,
        segments: u32,
    },
    /// Flat XZ plane at local y = 0.
    Ground {
        width: f32,
        depth: f32,
        subdivisions: u32,
    },
}

impl Primitive {
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Self::Box {
            width,
            height,
            depth,
        }
    }

    /// Half extents of the local bounding box, centred on the node origin.
    pub fn half_extents(&self) -> Vec3 {
        match *self {
            Self::Box {
                width,
                height,
                depth,
            } => Vec3::new(width, height, depth) * 0.5,
            Self::Cylinder {
                height,
                diameter_top,
                diameter_bottom,
                ..
            } => {
                let r = diameter_top.max(diameter_bottom) * 0.5;
                Vec3::new(r, height * 0.5, r)
            }
            Self::Sphere { diameter, .. } => Vec3::splat(diameter * 0.5),
            Self::Ground { width, depth, .. } => Vec3::new(width * 0.5, 0.0, depth * 0.5),
        }
    }

    /// Short lowercase label for debug output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Box { .. } => "box",
            Self::Cylinder { .. } => "cylinder",
            Self::Sphere { .. } => "sphere",
            Self::Ground { .. } => "ground",
        }
    }
}

/// Diffuse material. Every mesh gets its own instance; nothing is shared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Internal name carrying a random suffix. Never affects appearance.
    pub name: String,
    pub diffuse: Color3,
    pub alpha: f32,
}

impl Material {
    pub fn new(diffuse: Color3) -> Self {
        Self {
            name: format!("m{}", &Uuid::new_v4().simple().to_string()[..10]),
            diffuse,
            alpha: 1.0,
        }
    }

    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(Color3::new(r, g, b))
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Same look, ignoring the generated name.
    pub fn same_appearance(&self, other: &Material) -> bool {
        self.diffuse == other.diffuse && self.alpha == other.alpha
    }
}

/// Renderable payload of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub primitive: Primitive,
    pub material: Material,
}

/// What a node can take part in. Shadow casting is registered on the scene's
/// lighting side instead (see [`crate::Scene::add_shadow_caster`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub visible: bool,
    pub collidable: bool,
    pub receive_shadows: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            visible: true,
            collidable: false,
            receive_shadows: false,
        }
    }
}

impl Capabilities {
    /// Solid walls: block movement and receive shadows.
    pub fn solid() -> Self {
        Self {
            collidable: true,
            receive_shadows: true,
            ..Self::default()
        }
    }
}

/// A scene graph node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub parent: Option<NodeId>,
    pub local: Transform,
    pub mesh: Option<Mesh>,
    pub caps: Capabilities,
}

impl Node {
    pub fn is_mesh(&self) -> bool {
        self.mesh.is_some()
    }
}
