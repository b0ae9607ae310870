use crate::shapes::{self, Geometry};
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use std::collections::BTreeMap;
use townwalk_scene::{Primitive, Scene};

/// Per-instance data: model matrix columns plus RGBA colour.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct InstanceData {
    pub model_0: [f32; 4],
    pub model_1: [f32; 4],
    pub model_2: [f32; 4],
    pub model_3: [f32; 4],
    pub color: [f32; 4],
}

impl InstanceData {
    fn new(model: Mat4, color: [f32; 4]) -> Self {
        let cols = model.to_cols_array_2d();
        Self {
            model_0: cols[0],
            model_1: cols[1],
            model_2: cols[2],
            model_3: cols[3],
            color,
        }
    }

    pub fn model(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&[self.model_0, self.model_1, self.model_2, self.model_3])
    }
}

/// Which unit mesh an instance is drawn with. Cylinder radii are stored in
/// thousandths of the bounding diameter so tapers with the same proportions
/// share a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShapeKey {
    Cube,
    Plane,
    Sphere { segments: u32 },
    Cylinder { top: u32, bottom: u32, tessellation: u32 },
}

impl ShapeKey {
    /// Shape plus the scale that stretches the unit mesh to the primitive.
    pub fn of(primitive: &Primitive) -> (Self, Vec3) {
        match *primitive {
            Primitive::Box { width, height, depth } => (Self::Cube, Vec3::new(width, height, depth)),
            Primitive::Ground { width, depth, .. } => (Self::Plane, Vec3::new(width, 1.0, depth)),
            Primitive::Sphere { diameter, segments } => (Self::Sphere { segments }, Vec3::splat(diameter)),
            Primitive::Cylinder {
                height,
                diameter_top,
                diameter_bottom,
                tessellation,
            } => {
                let d = diameter_top.max(diameter_bottom).max(1e-6);
                let permille = |x: f32| ((x / d) * 1000.0).round() as u32;
                (
                    Self::Cylinder {
                        top: permille(diameter_top),
                        bottom: permille(diameter_bottom),
                        tessellation,
                    },
                    Vec3::new(d, height, d),
                )
            }
        }
    }

    pub fn geometry(&self) -> Geometry {
        match *self {
            Self::Cube => shapes::cube(),
            Self::Plane => shapes::plane(),
            Self::Sphere { segments } => shapes::sphere(segments),
            Self::Cylinder {
                top,
                bottom,
                tessellation,
            } => shapes::cylinder(top as f32 / 2000.0, bottom as f32 / 2000.0, tessellation),
        }
    }
}

/// Visible instances grouped by shape, opaque and translucent apart.
#[derive(Debug, Clone, Default)]
pub struct InstanceBatches {
    pub opaque: BTreeMap<ShapeKey, Vec<InstanceData>>,
    pub translucent: BTreeMap<ShapeKey, Vec<InstanceData>>,
}

impl InstanceBatches {
    pub fn instance_count(&self) -> usize {
        self.opaque.values().chain(self.translucent.values()).map(Vec::len).sum()
    }

    /// Every shape referenced by either pass.
    pub fn shapes(&self) -> impl Iterator<Item = &ShapeKey> {
        self.opaque.keys().chain(self.translucent.keys())
    }
}

/// Walk the scene in creation order and batch every visible mesh.
pub fn collect_instances(scene: &Scene) -> InstanceBatches {
    let mut batches = InstanceBatches::default();
    for (id, node) in scene.iter() {
        let Some(mesh) = &node.mesh else { continue };
        if !scene.is_visible(id) {
            continue;
        }
        let Ok(world) = scene.world_matrix(id) else {
            continue;
        };
        let (key, scale) = ShapeKey::of(&mesh.primitive);
        let c = mesh.material.diffuse;
        let alpha = mesh.material.alpha;
        let instance = InstanceData::new(world * Mat4::from_scale(scale), [c.r, c.g, c.b, alpha]);
        let pass = if alpha < 1.0 {
            &mut batches.translucent
        } else {
            &mut batches.opaque
        };
        pass.entry(key).or_default().push(instance);
    }
    batches
}

#[cfg(test)]
mod tests {
    use super::*;
    use townwalk_common::Transform;
    use townwalk_scene::{Capabilities, Material, Mesh};

    fn add(scene: &mut Scene, primitive: Primitive, material: Material, at: Vec3) -> townwalk_common::NodeId {
        scene
            .create_mesh(
                "m",
                None,
                Transform::from_xyz(at.x, at.y, at.z),
                Mesh { primitive, material },
                Capabilities::default(),
            )
            .unwrap()
    }

    #[test]
    fn boxes_share_the_cube_and_carry_their_size() {
        let mut scene = Scene::new();
        add(&mut scene, Primitive::cuboid(2.0, 3.0, 4.0), Material::rgb(1.0, 0.0, 0.0), Vec3::new(5.0, 1.5, 0.0));
        add(&mut scene, Primitive::cuboid(1.0, 1.0, 1.0), Material::rgb(0.0, 1.0, 0.0), Vec3::ZERO);
        let b = collect_instances(&scene);
        assert_eq!(b.opaque.len(), 1);
        let cubes = &b.opaque[&ShapeKey::Cube];
        assert_eq!(cubes.len(), 2);
        let (scale, _, translation) = cubes[0].model().to_scale_rotation_translation();
        assert!((scale - Vec3::new(2.0, 3.0, 4.0)).length() < 1e-5);
        assert_eq!(translation, Vec3::new(5.0, 1.5, 0.0));
        assert_eq!(cubes[0].color, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn translucent_materials_go_to_the_second_pass() {
        let mut scene = Scene::new();
        add(
            &mut scene,
            Primitive::cuboid(4.0, 2.2, 0.05),
            Material::rgb(0.6, 0.85, 0.95).with_alpha(0.5),
            Vec3::ZERO,
        );
        let b = collect_instances(&scene);
        assert!(b.opaque.is_empty());
        assert_eq!(b.translucent[&ShapeKey::Cube][0].color[3], 0.5);
    }

    #[test]
    fn hidden_subtrees_are_skipped() {
        let mut scene = Scene::new();
        let root = scene.create_node("root", None, Transform::default()).unwrap();
        let child = add(&mut scene, Primitive::cuboid(1.0, 1.0, 1.0), Material::rgb(1.0, 1.0, 1.0), Vec3::ZERO);
        scene.set_parent(child, Some(root)).unwrap();
        assert_eq!(collect_instances(&scene).instance_count(), 1);
        scene.set_visible(root, false).unwrap();
        assert_eq!(collect_instances(&scene).instance_count(), 0);
    }

    #[test]
    fn proportional_cylinders_share_a_mesh() {
        let trunk = |h: f32, s: f32| Primitive::Cylinder {
            height: h,
            diameter_top: 0.15 * s,
            diameter_bottom: 0.25 * s,
            tessellation: 8,
        };
        let (a, sa) = ShapeKey::of(&trunk(1.5, 1.0));
        let (b, sb) = ShapeKey::of(&trunk(3.0, 2.0));
        assert_eq!(a, b);
        assert_eq!(a, ShapeKey::Cylinder { top: 600, bottom: 1000, tessellation: 8 });
        assert!((sa - Vec3::new(0.25, 1.5, 0.25)).length() < 1e-6);
        assert!((sb - Vec3::new(0.5, 3.0, 0.5)).length() < 1e-6);
    }

    #[test]
    fn cylinder_geometry_uses_relative_radii() {
        let key = ShapeKey::Cylinder { top: 600, bottom: 1000, tessellation: 8 };
        let g = key.geometry();
        let max_r = g
            .vertices
            .iter()
            .map(|v| Vec3::from(v.position).with_y(0.0).length())
            .fold(0.0, f32::max);
        assert!((max_r - 0.5).abs() < 1e-5);
    }
}
