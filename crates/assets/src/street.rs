//! Street furniture and terrain.

use townwalk_common::Color3;
use townwalk_scene::{Capabilities, Material, Prefab, PrefabNode, Primitive};

pub fn tree() -> Prefab {
    let root = PrefabNode::group("tree")
        .with_child(
            PrefabNode::mesh(
                "trunk",
                Primitive::Cylinder {
                    height: 1.5,
                    diameter_top: 0.15,
                    diameter_bottom: 0.25,
                    tessellation: 8,
                },
                Material::rgb(0.55, 0.41, 0.08),
            )
            .at(0.0, 0.75, 0.0),
        )
        .with_child(
            PrefabNode::mesh(
                "foliage",
                Primitive::Sphere {
                    diameter: 1.8,
                    segments: 8,
                },
                Material::rgb(0.18, 0.55, 0.27),
            )
            .at(0.0, 2.2, 0.0),
        );
    Prefab::new(root)
}

/// Pole with an arm reaching +x and a warm light head at its end.
pub fn street_lamp() -> Prefab {
    let metal = Material::rgb(0.3, 0.3, 0.3);
    let root = PrefabNode::group("lamp")
        .with_child(
            PrefabNode::mesh(
                "pole",
                Primitive::Cylinder {
                    height: 4.0,
                    diameter_top: 0.12,
                    diameter_bottom: 0.12,
                    tessellation: 8,
                },
                metal.clone(),
            )
            .at(0.0, 2.0, 0.0),
        )
        .with_child(PrefabNode::mesh("arm", Primitive::cuboid(1.0, 0.08, 0.08), metal).at(0.5, 4.0, 0.0))
        .with_child(
            PrefabNode::mesh("light", Primitive::cuboid(0.5, 0.15, 0.3), Material::rgb(1.0, 0.95, 0.7))
                .at(1.0, 3.9, 0.0),
        );
    Prefab::new(root)
}

pub fn bench() -> Prefab {
    let wood = Material::rgb(0.55, 0.35, 0.15);
    let metal = Material::rgb(0.3, 0.3, 0.3);
    let mut root = PrefabNode::group("bench")
        .with_child(PrefabNode::mesh("seat", Primitive::cuboid(1.5, 0.08, 0.4), wood.clone()).at(0.0, 0.45, 0.0))
        .with_child(PrefabNode::mesh("back", Primitive::cuboid(1.5, 0.5, 0.06), wood).at(0.0, 0.7, -0.17));
    for (i, x) in [-0.6, 0.6].into_iter().enumerate() {
        root.push(
            PrefabNode::mesh(format!("leg{i}"), Primitive::cuboid(0.06, 0.45, 0.3), metal.clone())
                .at(x, 0.225, 0.0),
        );
    }
    Prefab::new(root)
}

/// Straight wooden fence panel of the given length along local x. Blocks movement.
pub fn fence(length: f32) -> Prefab {
    let root = PrefabNode::group("fence").with_child(
        PrefabNode::mesh("panel", Primitive::cuboid(length, 1.0, 0.1), Material::rgb(0.6, 0.45, 0.25))
            .at(0.0, 0.5, 0.0)
            .with_caps(Capabilities {
                collidable: true,
                ..Capabilities::default()
            }),
    );
    Prefab::new(root)
}

/// Asphalt strip lying just above the ground.
pub fn road(width: f32, depth: f32) -> Prefab {
    let root = PrefabNode::group("road").with_child(
        PrefabNode::mesh("asphalt", Primitive::cuboid(width, 0.02, depth), Material::rgb(0.25, 0.25, 0.28))
            .at(0.0, 0.01, 0.0),
    );
    Prefab::new(root)
}

/// One white bar of a zebra crossing; sits above the road surface.
pub fn crossing_stripe() -> Prefab {
    let root = PrefabNode::group("stripe").with_child(
        PrefabNode::mesh("paint", Primitive::cuboid(0.4, 0.025, 1.2), Material::new(Color3::new(0.9, 0.9, 0.9)))
            .at(0.0, 0.02, 0.0),
    );
    Prefab::new(root)
}

pub fn ground(width: f32, depth: f32) -> Prefab {
    let root = PrefabNode::mesh(
        "ground",
        Primitive::Ground {
            width,
            depth,
            subdivisions: 4,
        },
        Material::rgb(0.4, 0.55, 0.3),
    )
    .with_caps(Capabilities {
        receive_shadows: true,
        ..Capabilities::default()
    });
    Prefab::new(root)
}
