use townwalk_common::Color3;
use townwalk_scene::{Capabilities, Material, Prefab, PrefabNode, Primitive};

/// Name of the hinge node every house carries for its front door.
pub const DOOR_PIVOT: &str = "doorPivot";

const DOOR_WIDTH: f32 = 0.6;
const DOOR_HEIGHT: f32 = 1.2;
/// Facade details sit just proud of the wall.
const FACADE_GAP: f32 = 0.03;

/// Small house: walls, a three-step roof, two front windows, and a door
/// hung from a [`DOOR_PIVOT`] node at its left edge so it can swing.
pub fn house(w: f32, h: f32, d: f32, wall: Color3, roof: Color3) -> Prefab {
    let roof_mat = Material::new(roof);
    let front = d / 2.0 + FACADE_GAP;

    let mut root = PrefabNode::group("house")
        .with_child(
            PrefabNode::mesh("walls", Primitive::cuboid(w, h, d), Material::new(wall))
                .at(0.0, h / 2.0, 0.0)
                .with_caps(Capabilities::solid()),
        )
        .with_child(
            PrefabNode::mesh("roof", Primitive::cuboid(w + 0.6, 0.3, d + 0.6), roof_mat.clone())
                .at(0.0, h + 0.15, 0.0),
        )
        .with_child(
            PrefabNode::mesh("peak", Primitive::cuboid(w * 0.7, 0.3, d * 0.7), roof_mat.clone())
                .at(0.0, h + 0.45, 0.0),
        )
        .with_child(
            PrefabNode::mesh("tip", Primitive::cuboid(w * 0.35, 0.25, d * 0.35), roof_mat)
                .at(0.0, h + 0.7, 0.0),
        );

    let door = PrefabNode::mesh(
        "door",
        Primitive::cuboid(DOOR_WIDTH, DOOR_HEIGHT, 0.05),
        Material::rgb(0.35, 0.22, 0.1),
    )
    .at(DOOR_WIDTH / 2.0, DOOR_HEIGHT / 2.0, 0.0);
    root.push(
        PrefabNode::group(DOOR_PIVOT)
            .at(-DOOR_WIDTH / 2.0, 0.0, front)
            .with_child(door),
    );

    let glass = Material::rgb(0.6, 0.8, 1.0);
    for (i, x) in [-w / 3.0, w / 3.0].into_iter().enumerate() {
        root.push(
            PrefabNode::mesh(format!("win{i}"), Primitive::cuboid(0.5, 0.5, 0.05), glass.clone())
                .at(x, h * 0.6, front),
        );
    }

    Prefab::new(root)
}

/// Apartment block: walls, a window grid on front and back, flat roof edge.
///
/// One window row per 2.5 units of height and one column per 2 units of
/// width (at least one), 1.5 apart; rows that would sit within a unit of the
/// roof are skipped.
pub fn building(w: f32, h: f32, d: f32, color: Color3) -> Prefab {
    let mut root = PrefabNode::group("building").with_child(
        PrefabNode::mesh("walls", Primitive::cuboid(w, h, d), Material::new(color))
            .at(0.0, h / 2.0, 0.0)
            .with_caps(Capabilities::solid()),
    );

    let glass = Material::rgb(0.7, 0.85, 1.0);
    let pane = Primitive::cuboid(0.6, 0.8, 0.05);
    let floors = (h / 2.5).floor() as u32;
    let cols = ((w / 2.0).floor() as u32).max(1);
    for floor in 0..floors {
        for col in 0..cols {
            let x = -((cols - 1) as f32 * 1.5) / 2.0 + col as f32 * 1.5;
            let y = 1.5 + floor as f32 * 2.5;
            if y > h - 1.0 {
                continue;
            }
            root.push(
                PrefabNode::mesh(format!("wf{floor}_{col}"), pane, glass.clone())
                    .at(x, y, d / 2.0 + FACADE_GAP),
            );
            root.push(
                PrefabNode::mesh(format!("wb{floor}_{col}"), pane, glass.clone())
                    .at(x, y, -d / 2.0 - FACADE_GAP),
            );
        }
    }

    root.push(
        PrefabNode::mesh("edge", Primitive::cuboid(w + 0.2, 0.3, d + 0.2), Material::new(color.scaled(0.7)))
            .at(0.0, h + 0.15, 0.0),
    );

    Prefab::new(root)
}

/// Convenience store: 6×3×5 walls, blue sign, translucent glass front, flat roof.
pub fn shop() -> Prefab {
    let root = PrefabNode::group("shop")
        .with_child(
            PrefabNode::mesh("walls", Primitive::cuboid(6.0, 3.0, 5.0), Material::rgb(0.95, 0.95, 0.9))
                .at(0.0, 1.5, 0.0)
                .with_caps(Capabilities::solid()),
        )
        .with_child(
            PrefabNode::mesh("sign", Primitive::cuboid(6.2, 0.8, 0.1), Material::rgb(0.1, 0.4, 0.8))
                .at(0.0, 3.4, 2.55),
        )
        .with_child(
            PrefabNode::mesh(
                "glass",
                Primitive::cuboid(4.0, 2.2, 0.05),
                Material::rgb(0.6, 0.85, 0.95).with_alpha(0.5),
            )
            .at(0.0, 1.4, 2.53),
        )
        .with_child(
            PrefabNode::mesh("roof", Primitive::cuboid(6.4, 0.15, 5.4), Material::rgb(0.7, 0.7, 0.7))
                .at(0.0, 3.08, 0.0),
        );
    Prefab::new(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALL: Color3 = Color3::new(0.9, 0.85, 0.75);
    const ROOF: Color3 = Color3::new(0.6, 0.25, 0.2);

    #[test]
    fn house_parts_and_door_hinge() {
        let p = house(5.0, 3.5, 4.0, WALL, ROOF);
        // walls, roof, peak, tip, door, two windows
        assert_eq!(p.mesh_count(), 7);

        let pivot = p.find(DOOR_PIVOT).unwrap();
        assert!(pivot.mesh.is_none());
        assert_eq!(pivot.local.position.x, -0.3);
        assert_eq!(pivot.local.position.z, 2.0 + FACADE_GAP);
        let door = &pivot.children[0];
        assert_eq!(door.name, "door");
        assert_eq!(door.local.position.x, 0.3);
    }

    #[test]
    fn house_walls_are_solid() {
        let p = house(5.0, 3.5, 4.0, WALL, ROOF);
        let walls = p.find("walls").unwrap();
        assert!(walls.caps.collidable);
        assert!(walls.caps.receive_shadows);
        assert!(!p.find("roof").unwrap().caps.collidable);
    }

    #[test]
    fn builders_are_deterministic() {
        assert!(house(5.0, 3.5, 4.0, WALL, ROOF).same_geometry(&house(5.0, 3.5, 4.0, WALL, ROOF)));
        let c = Color3::new(0.7, 0.7, 0.75);
        assert!(building(8.0, 12.0, 8.0, c).same_geometry(&building(8.0, 12.0, 8.0, c)));
        assert!(shop().same_geometry(&shop()));
    }

    #[test]
    fn building_window_grid() {
        // h = 12: floors = 4, rows at 1.5, 4.0, 6.5, 9.0 all below 11.
        // w = 8: cols = 4. Front and back: 4 * 4 * 2 = 32 panes.
        let p = building(8.0, 12.0, 8.0, Color3::new(0.7, 0.7, 0.75));
        let panes = p
            .nodes()
            .iter()
            .filter(|n| n.name.starts_with("wf") || n.name.starts_with("wb"))
            .count();
        assert_eq!(panes, 32);
        let first = p.find("wf0_0").unwrap();
        assert_eq!(first.local.position.x, -2.25);
        assert_eq!(first.local.position.y, 1.5);
    }

    #[test]
    fn window_rows_follow_height() {
        // h = 5: rows at 1.5 and 4.0, the second exactly one unit below the roof.
        let tall = building(2.0, 5.0, 2.0, Color3::WHITE);
        assert!(tall.find("wf1_0").is_some());
        assert!(tall.find("wf2_0").is_none());
        let low = building(2.0, 4.8, 2.0, Color3::WHITE);
        assert!(low.find("wf1_0").is_none());
        assert!(low.find("wf0_0").is_some());
    }

    #[test]
    fn narrow_building_has_one_column() {
        let p = building(1.0, 3.0, 1.0, Color3::WHITE);
        assert!(p.find("wf0_0").is_some());
        assert!(p.find("wf0_1").is_none());
        assert_eq!(p.find("wf0_0").unwrap().local.position.x, 0.0);
    }

    #[test]
    fn roof_edge_is_darker() {
        let c = Color3::new(0.7, 0.7, 0.7);
        let p = building(6.0, 8.0, 6.0, c);
        let edge = p.find("edge").and_then(|n| n.mesh.as_ref()).unwrap();
        assert_eq!(edge.material.diffuse, c.scaled(0.7));
    }

    #[test]
    fn shop_glass_is_translucent() {
        let p = shop();
        let glass = p.find("glass").and_then(|n| n.mesh.as_ref()).unwrap();
        assert_eq!(glass.material.alpha, 0.5);
        assert_eq!(p.mesh_count(), 4);
    }
}
