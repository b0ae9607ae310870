use townwalk_common::Color3;
use townwalk_scene::{Material, Prefab, PrefabNode, Primitive};

/// Box-style humanoid: body, head, eyes, legs and arms. Body and arms share
/// `color`; feet rest on the root's origin.
pub fn character(color: Color3) -> Prefab {
    let body_mat = Material::new(color);
    let skin = Material::rgb(1.0, 0.8, 0.6);
    let legs = Material::rgb(0.27, 0.27, 0.4);
    let eyes = Material::rgb(0.13, 0.13, 0.13);
    let eye = Primitive::Sphere {
        diameter: 0.08,
        segments: 8,
    };

    let root = PrefabNode::group("character")
        .with_child(PrefabNode::mesh("body", Primitive::cuboid(0.5, 0.7, 0.3), body_mat.clone()).at(0.0, 0.75, 0.0))
        .with_child(PrefabNode::mesh("head", Primitive::cuboid(0.35, 0.35, 0.35), skin).at(0.0, 1.3, 0.0))
        .with_child(PrefabNode::mesh("leye", eye, eyes.clone()).at(-0.08, 1.35, 0.18))
        .with_child(PrefabNode::mesh("reye", eye, eyes).at(0.08, 1.35, 0.18))
        .with_child(PrefabNode::mesh("lleg", Primitive::cuboid(0.15, 0.4, 0.2), legs.clone()).at(-0.13, 0.2, 0.0))
        .with_child(PrefabNode::mesh("rleg", Primitive::cuboid(0.15, 0.4, 0.2), legs).at(0.13, 0.2, 0.0))
        .with_child(PrefabNode::mesh("larm", Primitive::cuboid(0.12, 0.5, 0.15), body_mat.clone()).at(-0.37, 0.75, 0.0))
        .with_child(PrefabNode::mesh("rarm", Primitive::cuboid(0.12, 0.5, 0.15), body_mat).at(0.37, 0.75, 0.0));

    Prefab::new(root)
}
