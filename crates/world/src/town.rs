use crate::doors::{self, DoorInfo};
use crate::layout;
use glam::Vec3;
use townwalk_assets as assets;
use townwalk_common::{NodeId, Transform};
use townwalk_scene::{Prefab, Scene, SceneError};

/// How many of each thing the town placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutSummary {
    pub roads: usize,
    pub stripes: usize,
    pub houses: usize,
    pub buildings: usize,
    pub shops: usize,
    pub trees: usize,
    pub benches: usize,
    pub fences: usize,
    pub lamps: usize,
}

/// The built town. Everything hangs below one `town` root node so the
/// whole layout can be torn down in a single removal.
#[derive(Debug, Clone)]
pub struct OpenWorld {
    root: NodeId,
    doors: Vec<DoorInfo>,
    summary: LayoutSummary,
}

impl OpenWorld {
    /// Place the whole town into `scene`.
    pub fn build(scene: &mut Scene) -> Result<Self, SceneError> {
        let _span = tracing::info_span!("build_town").entered();
        let root = scene.create_node("town", None, Transform::default())?;
        let mut builder = Builder {
            scene,
            root,
            summary: LayoutSummary::default(),
        };

        builder.place(&assets::ground(layout::GROUND_SIZE, layout::GROUND_SIZE), Transform::default(), false)?;

        for r in &layout::ROADS {
            builder.place(&assets::road(r.width, r.depth), Transform::placed(r.x, r.z, 0.0), false)?;
            builder.summary.roads += 1;
        }
        let stripe = assets::crossing_stripe();
        let half = layout::STRIPES_PER_CROSSING / 2;
        for &(cx, cz) in &layout::CROSSINGS {
            for i in -half..=half {
                let x = cx + i as f32 * layout::STRIPE_SPACING;
                builder.place(&stripe, Transform::placed(x, cz, 0.0), false)?;
                builder.summary.stripes += 1;
            }
        }

        let mut doors = Vec::with_capacity(layout::HOUSES.len());
        for h in &layout::HOUSES {
            let house = assets::house(h.w, h.h, h.d, h.wall, h.roof);
            let id = builder.place(&house, Transform::placed(h.x, h.z, h.yaw), true)?;
            let pivot = builder
                .scene
                .find_descendant(id, assets::DOOR_PIVOT)
                .ok_or(SceneError::NodeNotFound(id))?;
            doors.push(DoorInfo::closed(pivot));
            builder.summary.houses += 1;
        }

        for b in &layout::BUILDINGS {
            builder.place(&assets::building(b.w, b.h, b.d, b.color), Transform::placed(b.x, b.z, 0.0), true)?;
            builder.summary.buildings += 1;
        }

        let shop = assets::shop();
        for s in &layout::SHOPS {
            builder.place(&shop, Transform::placed(s.x, s.z, s.yaw), true)?;
            builder.summary.shops += 1;
        }

        let tree = assets::tree();
        for t in layout::PARK_TREES.iter().chain(&layout::TREES) {
            builder.place(&tree, Transform::placed(t.x, t.z, t.yaw), true)?;
            builder.summary.trees += 1;
        }

        let bench = assets::bench();
        for b in &layout::BENCHES {
            builder.place(&bench, Transform::placed(b.x, b.z, b.yaw), false)?;
            builder.summary.benches += 1;
        }
        for f in &layout::FENCES {
            builder.place(&assets::fence(f.length), Transform::placed(f.x, f.z, f.yaw), false)?;
            builder.summary.fences += 1;
        }

        let lamp = assets::street_lamp();
        for l in &layout::LAMPS {
            builder.place(&lamp, Transform::placed(l.x, l.z, l.yaw), false)?;
            builder.summary.lamps += 1;
        }

        let summary = builder.summary;
        tracing::info!(
            meshes = scene.mesh_count(),
            shadow_casters = scene.shadow_caster_count(),
            doors = doors.len(),
            "town built"
        );
        Ok(Self {
            root,
            doors,
            summary,
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn doors(&self) -> &[DoorInfo] {
        &self.doors
    }

    pub fn summary(&self) -> LayoutSummary {
        self.summary
    }

    /// Flip the open state of the door nearest to `position`, if one is within
    /// `reach`. Returns the door's index.
    pub fn toggle_nearest_door(&mut self, scene: &Scene, position: Vec3, reach: f32) -> Option<usize> {
        let i = doors::nearest(&self.doors, scene, position, reach)?;
        let door = &mut self.doors[i];
        door.is_open = !door.is_open;
        tracing::debug!(door = i, open = door.is_open, "door toggled");
        Some(i)
    }

    /// Swing every door toward its open or closed angle.
    pub fn animate_doors(&mut self, scene: &mut Scene, dt: f32) -> Result<(), SceneError> {
        for door in &mut self.doors {
            door.animate(scene, dt)?;
        }
        Ok(())
    }

    /// Remove the town from the scene. Returns how many nodes were released.
    pub fn dispose(self, scene: &mut Scene) -> Result<usize, SceneError> {
        let n = scene.remove(self.root)?;
        tracing::info!(nodes = n, "town disposed");
        Ok(n)
    }
}

struct Builder<'a> {
    scene: &'a mut Scene,
    root: NodeId,
    summary: LayoutSummary,
}

impl Builder<'_> {
    fn place(&mut self, prefab: &Prefab, placement: Transform, casts_shadows: bool) -> Result<NodeId, SceneError> {
        let id = self.scene.instantiate(prefab, Some(self.root), placement)?;
        if casts_shadows {
            self.scene.add_shadow_casters_below(id);
        }
        Ok(id)
    }
}
