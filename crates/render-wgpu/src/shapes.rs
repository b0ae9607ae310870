//! Unit primitive geometry. Every shape fits a 1×1×1 box centred on the
//! origin (the ground plane lies flat at y = 0) and is scaled per instance.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    fn new(p: Vec3, n: Vec3) -> Self {
        Self {
            position: p.to_array(),
            normal: n.to_array(),
        }
    }
}

/// Indexed triangle list. For every triangle `(b - a) × (c - a)` points out
/// of the solid, which is clockwise on screen under the left-handed view.
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Geometry {
    fn quad(&mut self, corners: [Vec3; 4], normal: Vec3) {
        let base = self.vertices.len() as u32;
        self.vertices.extend(corners.map(|c| Vertex::new(c, normal)));
        self.indices.extend([base, base + 1, base + 2, base + 2, base + 3, base]);
    }
}

pub fn cube() -> Geometry {
    let mut g = Geometry::default();
    let p = 0.5;
    for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
        for sign in [1.0, -1.0] {
            let n = axis * sign;
            // Two tangents forming a right-handed frame with the normal.
            let u = n.any_orthonormal_vector();
            let v = n.cross(u);
            let c = n * p;
            g.quad([c - u * p - v * p, c + u * p - v * p, c + u * p + v * p, c - u * p + v * p], n);
        }
    }
    g
}

/// Flat XZ square facing +Y.
pub fn plane() -> Geometry {
    let mut g = Geometry::default();
    let p = 0.5;
    g.quad(
        [
            Vec3::new(-p, 0.0, -p),
            Vec3::new(-p, 0.0, p),
            Vec3::new(p, 0.0, p),
            Vec3::new(p, 0.0, -p),
        ],
        Vec3::Y,
    );
    g
}

/// Capped, possibly tapered cylinder along Y with radii given for a unit
/// bounding diameter.
pub fn cylinder(top_radius: f32, bottom_radius: f32, tessellation: u32) -> Geometry {
    let n = tessellation.max(3);
    let mut g = Geometry::default();
    let (y0, y1) = (-0.5, 0.5);
    let slope = bottom_radius - top_radius;

    for i in 0..n {
        let a0 = TAU * i as f32 / n as f32;
        let a1 = TAU * (i + 1) as f32 / n as f32;
        let dir = |a: f32| Vec3::new(a.cos(), 0.0, a.sin());
        let normal = |a: f32| (dir(a) + Vec3::Y * slope).normalize();

        let base = g.vertices.len() as u32;
        g.vertices.extend([
            Vertex::new(dir(a0) * bottom_radius + Vec3::Y * y0, normal(a0)),
            Vertex::new(dir(a1) * bottom_radius + Vec3::Y * y0, normal(a1)),
            Vertex::new(dir(a1) * top_radius + Vec3::Y * y1, normal(a1)),
            Vertex::new(dir(a0) * top_radius + Vec3::Y * y1, normal(a0)),
        ]);
        g.indices.extend([base, base + 2, base + 1, base, base + 3, base + 2]);

        let cap = g.vertices.len() as u32;
        g.vertices.extend([
            Vertex::new(Vec3::Y * y1, Vec3::Y),
            Vertex::new(dir(a0) * top_radius + Vec3::Y * y1, Vec3::Y),
            Vertex::new(dir(a1) * top_radius + Vec3::Y * y1, Vec3::Y),
            Vertex::new(Vec3::Y * y0, Vec3::NEG_Y),
            Vertex::new(dir(a0) * bottom_radius + Vec3::Y * y0, Vec3::NEG_Y),
            Vertex::new(dir(a1) * bottom_radius + Vec3::Y * y0, Vec3::NEG_Y),
        ]);
        g.indices.extend([cap, cap + 2, cap + 1, cap + 3, cap + 4, cap + 5]);
    }
    g
}

/// UV sphere of diameter 1.
pub fn sphere(segments: u32) -> Geometry {
    let rings = segments.max(3);
    let sectors = rings * 2;
    let mut g = Geometry::default();
    for r in 0..=rings {
        let phi = PI * r as f32 / rings as f32;
        for s in 0..=sectors {
            let theta = TAU * s as f32 / sectors as f32;
            let n = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            g.vertices.push(Vertex::new(n * 0.5, n));
        }
    }
    let stride = sectors + 1;
    for r in 0..rings {
        for s in 0..sectors {
            let a = r * stride + s;
            let b = a + stride;
            g.indices.extend([a, a + 1, b, b, a + 1, b + 1]);
        }
    }
    g
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(g: &Geometry) -> (Vec3, Vec3) {
        g.vertices.iter().fold((Vec3::INFINITY, Vec3::NEG_INFINITY), |(lo, hi), v| {
            let p = Vec3::from(v.position);
            (lo.min(p), hi.max(p))
        })
    }

    fn indices_in_range(g: &Geometry) -> bool {
        g.indices.iter().all(|&i| (i as usize) < g.vertices.len())
    }

    #[test]
    fn cube_is_unit_and_outward_facing() {
        let g = cube();
        assert_eq!(g.vertices.len(), 24);
        assert_eq!(g.indices.len(), 36);
        assert!(indices_in_range(&g));
        let (lo, hi) = bounds(&g);
        assert_eq!((lo, hi), (Vec3::splat(-0.5), Vec3::splat(0.5)));
        for tri in g.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from(g.vertices[i as usize].position));
            let face_n = (b - a).cross(c - a);
            let n = Vec3::from(g.vertices[tri[0] as usize].normal);
            assert!(face_n.dot(n) > 0.0);
        }
    }

    #[test]
    fn tapered_cylinder_radii() {
        let g = cylinder(0.3, 0.5, 8);
        assert!(indices_in_range(&g));
        let (lo, hi) = bounds(&g);
        assert!((lo.y + 0.5).abs() < 1e-6 && (hi.y - 0.5).abs() < 1e-6);
        assert!((hi.x - 0.5).abs() < 1e-5);
        let top_max = g
            .vertices
            .iter()
            .filter(|v| v.position[1] == 0.5)
            .map(|v| Vec3::from(v.position).with_y(0.0).length())
            .fold(0.0, f32::max);
        assert!((top_max - 0.3).abs() < 1e-5);
    }

    #[test]
    fn sphere_fits_unit_diameter() {
        let g = sphere(8);
        assert!(indices_in_range(&g));
        for v in &g.vertices {
            assert!((Vec3::from(v.position).length() - 0.5).abs() < 1e-5);
        }
    }

    #[test]
    fn plane_faces_up() {
        let g = plane();
        let [a, b, c] = [0, 1, 2].map(|i| Vec3::from(g.vertices[g.indices[i] as usize].position));
        assert!((b - a).cross(c - a).y > 0.0);
    }
}
