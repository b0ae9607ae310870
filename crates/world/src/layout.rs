//! Placement tables. Positions are ground-plane (x, z); headings are yaw in
//! radians around +Y.

use std::f32::consts::{FRAC_PI_2, PI};
use townwalk_common::Color3;

pub const GROUND_SIZE: f32 = 200.0;

#[derive(Debug, Clone, Copy)]
pub struct RoadSpot {
    pub x: f32,
    pub z: f32,
    pub width: f32,
    pub depth: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct HouseSpot {
    pub x: f32,
    pub z: f32,
    pub w: f32,
    pub h: f32,
    pub d: f32,
    pub wall: Color3,
    pub roof: Color3,
    pub yaw: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct BuildingSpot {
    pub x: f32,
    pub z: f32,
    pub w: f32,
    pub h: f32,
    pub d: f32,
    pub color: Color3,
}

/// A ground-plane placement with a heading.
#[derive(Debug, Clone, Copy)]
pub struct Spot {
    pub x: f32,
    pub z: f32,
    pub yaw: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct FenceSpot {
    pub x: f32,
    pub z: f32,
    pub length: f32,
    pub yaw: f32,
}

const fn road(x: f32, z: f32, width: f32, depth: f32) -> RoadSpot {
    RoadSpot { x, z, width, depth }
}

const fn spot(x: f32, z: f32, yaw: f32) -> Spot {
    Spot { x, z, yaw }
}

const fn at(x: f32, z: f32) -> Spot {
    Spot { x, z, yaw: 0.0 }
}

#[allow(clippy::too_many_arguments)]
const fn house(x: f32, z: f32, w: f32, h: f32, d: f32, wall: [f32; 3], roof: [f32; 3], yaw: f32) -> HouseSpot {
    HouseSpot {
        x,
        z,
        w,
        h,
        d,
        wall: Color3::new(wall[0], wall[1], wall[2]),
        roof: Color3::new(roof[0], roof[1], roof[2]),
        yaw,
    }
}

const fn building(x: f32, z: f32, w: f32, h: f32, d: f32, c: [f32; 3]) -> BuildingSpot {
    BuildingSpot {
        x,
        z,
        w,
        h,
        d,
        color: Color3::new(c[0], c[1], c[2]),
    }
}

/// Main avenues through the origin plus two side streets on each axis.
pub const ROADS: [RoadSpot; 6] = [
    road(0.0, 0.0, 200.0, 6.0),
    road(0.0, 0.0, 6.0, 200.0),
    road(0.0, 25.0, 200.0, 4.0),
    road(0.0, -25.0, 200.0, 4.0),
    road(30.0, 0.0, 4.0, 200.0),
    road(-30.0, 0.0, 4.0, 200.0),
];

/// Zebra crossing centres.
pub const CROSSINGS: [(f32, f32); 5] = [(0.0, 0.0), (30.0, 0.0), (-30.0, 0.0), (0.0, 25.0), (0.0, -25.0)];
pub const STRIPES_PER_CROSSING: i32 = 5;
pub const STRIPE_SPACING: f32 = 1.2;

pub const HOUSES: [HouseSpot; 12] = [
    house(10.0, 10.0, 5.0, 3.5, 4.0, [0.9, 0.85, 0.75], [0.6, 0.25, 0.2], 0.0),
    house(20.0, 10.0, 4.0, 3.0, 5.0, [0.85, 0.9, 0.85], [0.3, 0.45, 0.3], 0.0),
    house(10.0, -10.0, 6.0, 4.0, 5.0, [0.95, 0.9, 0.8], [0.5, 0.3, 0.15], PI),
    house(22.0, -12.0, 5.0, 3.0, 4.0, [0.8, 0.8, 0.9], [0.35, 0.35, 0.5], PI),
    house(-10.0, 10.0, 5.0, 3.5, 5.0, [0.95, 0.92, 0.85], [0.65, 0.3, 0.15], 0.0),
    house(-20.0, 12.0, 4.5, 3.0, 4.0, [0.88, 0.85, 0.82], [0.4, 0.25, 0.15], 0.0),
    house(-12.0, -10.0, 5.0, 3.5, 4.5, [0.9, 0.88, 0.82], [0.55, 0.2, 0.15], PI),
    house(-22.0, -11.0, 4.0, 3.0, 5.0, [0.85, 0.82, 0.75], [0.3, 0.3, 0.35], PI),
    house(15.0, 35.0, 5.0, 3.0, 4.0, [0.92, 0.88, 0.8], [0.5, 0.25, 0.2], 0.0),
    house(-15.0, 35.0, 4.5, 3.5, 5.0, [0.85, 0.9, 0.85], [0.35, 0.5, 0.3], 0.0),
    house(15.0, -35.0, 5.0, 3.0, 4.0, [0.9, 0.85, 0.8], [0.6, 0.3, 0.2], PI),
    house(-15.0, -35.0, 4.0, 3.0, 5.0, [0.88, 0.88, 0.82], [0.4, 0.3, 0.2], PI),
];

pub const BUILDINGS: [BuildingSpot; 6] = [
    building(40.0, 10.0, 8.0, 12.0, 8.0, [0.7, 0.7, 0.75]),
    building(40.0, -10.0, 6.0, 8.0, 6.0, [0.75, 0.7, 0.65]),
    building(-40.0, 10.0, 7.0, 10.0, 7.0, [0.65, 0.65, 0.7]),
    building(-40.0, -12.0, 8.0, 15.0, 6.0, [0.72, 0.72, 0.72]),
    building(40.0, 35.0, 10.0, 10.0, 8.0, [0.68, 0.7, 0.72]),
    building(-40.0, 35.0, 7.0, 8.0, 7.0, [0.75, 0.72, 0.68]),
];

pub const SHOPS: [Spot; 3] = [spot(8.0, -4.0, PI), spot(-8.0, 4.0, 0.0), spot(35.0, -4.0, PI)];

pub const PARK_TREES: [Spot; 5] = [at(-5.0, 38.0), at(-8.0, 32.0), at(-2.0, 32.0), at(-9.0, 38.0), at(-1.0, 38.0)];

pub const BENCHES: [Spot; 3] = [spot(-5.0, 34.0, 0.0), spot(-5.0, 36.0, PI), spot(-3.0, 35.0, FRAC_PI_2)];

pub const FENCES: [FenceSpot; 4] = [
    FenceSpot { x: -5.0, z: 30.0, length: 12.0, yaw: 0.0 },
    FenceSpot { x: -5.0, z: 40.0, length: 12.0, yaw: 0.0 },
    FenceSpot { x: -11.0, z: 35.0, length: 10.0, yaw: FRAC_PI_2 },
    FenceSpot { x: 1.0, z: 35.0, length: 10.0, yaw: FRAC_PI_2 },
];

/// Street trees along the avenues and around the outskirts.
pub const TREES: [Spot; 30] = [
    at(5.0, 5.0),
    at(-5.0, 5.0),
    at(5.0, -5.0),
    at(-5.0, -5.0),
    at(15.0, 5.0),
    at(-15.0, 5.0),
    at(15.0, -5.0),
    at(-15.0, -5.0),
    at(25.0, 5.0),
    at(-25.0, 5.0),
    at(25.0, -5.0),
    at(-25.0, -5.0),
    at(5.0, 20.0),
    at(-5.0, 20.0),
    at(5.0, -20.0),
    at(-5.0, -20.0),
    at(25.0, 20.0),
    at(-25.0, 20.0),
    at(50.0, 5.0),
    at(-50.0, 5.0),
    at(50.0, -5.0),
    at(-50.0, -5.0),
    at(50.0, 20.0),
    at(-50.0, 20.0),
    at(50.0, -20.0),
    at(-50.0, -20.0),
    at(50.0, 40.0),
    at(-50.0, 40.0),
    at(50.0, -40.0),
    at(-50.0, -40.0),
];

pub const LAMPS: [Spot; 20] = [
    at(4.0, 4.0),
    at(4.0, -4.0),
    at(-4.0, 4.0),
    at(-4.0, -4.0),
    at(15.0, 4.0),
    at(15.0, -4.0),
    at(-15.0, 4.0),
    at(-15.0, -4.0),
    at(25.0, 4.0),
    at(-25.0, 4.0),
    at(4.0, 15.0),
    at(-4.0, 15.0),
    at(4.0, -15.0),
    at(-4.0, -15.0),
    at(35.0, 4.0),
    at(-35.0, 4.0),
    at(4.0, 28.0),
    at(-4.0, 28.0),
    at(4.0, -28.0),
    at(-4.0, -28.0),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_spots_are_unique() {
        for (i, a) in TREES.iter().enumerate() {
            for b in &TREES[i + 1..] {
                assert!(a.x != b.x || a.z != b.z, "duplicate tree at ({}, {})", a.x, a.z);
            }
        }
    }

    #[test]
    fn southern_houses_are_turned_around() {
        for h in &HOUSES {
            if h.z < 0.0 {
                assert_eq!(h.yaw, PI);
            } else {
                assert_eq!(h.yaw, 0.0);
            }
        }
    }
}
