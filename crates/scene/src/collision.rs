//! Axis-aligned collision world and ellipsoid collision proxies.
//!
//! Obstacles are world-space boxes taken from collidable mesh nodes and
//! bucketed into a uniform XZ grid. A proxy is an invisible ellipsoid that is
//! swept through the world in short sub-steps; after each sub-step any
//! penetration is pushed out along the contact normal, which leaves the
//! tangential part of the motion intact and so slides along walls.

use crate::scene::Scene;
use glam::{Mat4, Vec3};
use std::collections::HashMap;

/// Penetration passes per sub-step.
const RESOLVE_ITERATIONS: usize = 4;
/// Upper bound on sub-steps for a single move.
const MAX_SUBSTEPS: usize = 64;

/// World-space axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Bounds of a local box (centred on the origin) after `matrix`.
    pub fn transformed(half_extents: Vec3, matrix: Mat4) -> Self {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for sx in [-1.0, 1.0] {
            for sy in [-1.0, 1.0] {
                for sz in [-1.0, 1.0] {
                    let p = matrix.transform_point3(half_extents * Vec3::new(sx, sy, sz));
                    min = min.min(p);
                    max = max.max(p);
                }
            }
        }
        Self { min, max }
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn expanded(&self, by: Vec3) -> Aabb {
        Aabb {
            min: self.min - by,
            max: self.max + by,
        }
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

/// Invisible ellipsoid used for movement, decoupled from the visual mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionProxy {
    /// Foot position; the ellipsoid centre sits at `position + offset`.
    pub position: Vec3,
    /// Ellipsoid radii.
    pub ellipsoid: Vec3,
    pub offset: Vec3,
}

impl CollisionProxy {
    /// Human-sized proxy: radii (0.4, 0.8, 0.4) centred 0.8 above the feet.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ellipsoid: Vec3::new(0.4, 0.8, 0.4),
            offset: Vec3::new(0.0, 0.8, 0.0),
        }
    }

    pub fn center(&self) -> Vec3 {
        self.position + self.offset
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.center(), self.ellipsoid)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CellCoord {
    x: i32,
    z: i32,
}

/// Static obstacles bucketed into a uniform XZ grid.
#[derive(Debug, Clone)]
pub struct CollisionWorld {
    cell_size: f32,
    boxes: Vec<Aabb>,
    cells: HashMap<CellCoord, Vec<usize>>,
}

impl CollisionWorld {
    /// Create an empty world with the given broadphase cell size.
    pub fn new(cell_size: f32) -> Self {
        assert!(cell_size > 0.0, "cell_size must be positive");
        Self {
            cell_size,
            boxes: Vec::new(),
            cells: HashMap::new(),
        }
    }

    /// Collect the world bounds of every collidable mesh in the scene.
    pub fn from_scene(scene: &Scene, cell_size: f32) -> Self {
        let mut world = Self::new(cell_size);
        for (id, node) in scene.iter() {
            let Some(mesh) = node.mesh.as_ref().filter(|_| node.caps.collidable) else {
                continue;
            };
            if let Ok(m) = scene.world_matrix(id) {
                world.insert(Aabb::transformed(mesh.primitive.half_extents(), m));
            }
        }
        tracing::debug!(
            obstacles = world.len(),
            cells = world.cells.len(),
            "built collision world"
        );
        world
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn boxes(&self) -> &[Aabb] {
        &self.boxes
    }

    /// Add an obstacle. Returns its index.
    pub fn insert(&mut self, aabb: Aabb) -> usize {
        let idx = self.boxes.len();
        self.boxes.push(aabb);
        for coord in self.cells_covering(&aabb) {
            self.cells.entry(coord).or_default().push(idx);
        }
        idx
    }

    fn cells_covering(&self, aabb: &Aabb) -> Vec<CellCoord> {
        let x0 = (aabb.min.x / self.cell_size).floor() as i32;
        let x1 = (aabb.max.x / self.cell_size).floor() as i32;
        let z0 = (aabb.min.z / self.cell_size).floor() as i32;
        let z1 = (aabb.max.z / self.cell_size).floor() as i32;
        let mut out = Vec::new();
        for x in x0..=x1 {
            for z in z0..=z1 {
                out.push(CellCoord { x, z });
            }
        }
        out
    }

    /// Indices of obstacles overlapping `area`, ascending.
    pub fn query(&self, area: &Aabb) -> Vec<usize> {
        let mut hits: Vec<usize> = self
            .cells_covering(area)
            .iter()
            .filter_map(|c| self.cells.get(c))
            .flatten()
            .copied()
            .filter(|&i| self.boxes[i].overlaps(area))
            .collect();
        hits.sort_unstable();
        hits.dedup();
        hits
    }

    /// True if the proxy currently intersects any obstacle.
    pub fn intersects(&self, proxy: &CollisionProxy) -> bool {
        let inv = proxy.ellipsoid.recip();
        let c = proxy.center() * inv;
        self.query(&proxy.bounds()).into_iter().any(|i| {
            let b = &self.boxes[i];
            let q = c.clamp(b.min * inv, b.max * inv);
            (c - q).length_squared() < 1.0 - 1e-4
        })
    }

    /// Sweep the proxy by `displacement`, sliding along obstacles. The
    /// proxy's height is kept. Returns the displacement actually applied.
    pub fn move_with_collisions(&self, proxy: &mut CollisionProxy, displacement: Vec3) -> Vec3 {
        let start = proxy.position;
        let len = displacement.length();
        if len <= f32::EPSILON {
            return Vec3::ZERO;
        }
        let max_step = 0.5 * proxy.ellipsoid.x.min(proxy.ellipsoid.z).max(1e-3);
        let steps = ((len / max_step).ceil() as usize).clamp(1, MAX_SUBSTEPS);
        let step = displacement / steps as f32;

        let swept = proxy
            .bounds()
            .union(&Aabb::from_center(proxy.center() + displacement, proxy.ellipsoid));
        let candidates = self.query(&swept);

        let mut center = proxy.center();
        for _ in 0..steps {
            center += step;
            center = self.resolve(center, proxy.ellipsoid, &candidates);
            center.y = start.y + proxy.offset.y;
        }
        proxy.position = center - proxy.offset;
        proxy.position - start
    }

    /// Push an ellipsoid centre out of every candidate box.
    fn resolve(&self, center: Vec3, radii: Vec3, candidates: &[usize]) -> Vec3 {
        let inv = radii.recip();
        let mut c = center * inv;
        for _ in 0..RESOLVE_ITERATIONS {
            let mut moved = false;
            for &i in candidates {
                let b = &self.boxes[i];
                let (bmin, bmax) = (b.min * inv, b.max * inv);
                let q = c.clamp(bmin, bmax);
                let v = c - q;
                let d = v.length();
                if d >= 1.0 {
                    continue;
                }
                if d > 1e-6 {
                    c += v / d * (1.0 - d);
                } else {
                    c += escape_inside(c, bmin, bmax);
                }
                moved = true;
            }
            if !moved {
                break;
            }
        }
        c * radii
    }
}

/// Shortest horizontal push taking a unit sphere centred inside a box clear of it.
fn escape_inside(c: Vec3, bmin: Vec3, bmax: Vec3) -> Vec3 {
    let options = [
        Vec3::new(bmin.x - 1.0 - c.x, 0.0, 0.0),
        Vec3::new(bmax.x + 1.0 - c.x, 0.0, 0.0),
        Vec3::new(0.0, 0.0, bmin.z - 1.0 - c.z),
        Vec3::new(0.0, 0.0, bmax.z + 1.0 - c.z),
    ];
    options
        .into_iter()
        .min_by(|a, b| a.length_squared().total_cmp(&b.length_squared()))
        .unwrap_or(Vec3::ZERO)
}
