use std::hint::black_box;
use std::time::Instant;

use glam::Vec3;
use townwalk_scene::{CollisionProxy, CollisionWorld, Scene};
use townwalk_world::OpenWorld;

fn bench_build(iterations: usize) {
    let start = Instant::now();
    for _ in 0..iterations {
        let mut scene = Scene::new();
        let _ = black_box(OpenWorld::build(&mut scene));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  town build ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn town_collision(cell_size: f32) -> CollisionWorld {
    let mut scene = Scene::new();
    if let Err(e) = OpenWorld::build(&mut scene) {
        panic!("town build failed: {e}");
    }
    CollisionWorld::from_scene(&scene, cell_size)
}

fn bench_collision_build(cell_size: f32, iterations: usize) {
    let mut scene = Scene::new();
    if let Err(e) = OpenWorld::build(&mut scene) {
        panic!("town build failed: {e}");
    }
    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(CollisionWorld::from_scene(black_box(&scene), cell_size));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  collision build (cell={cell_size}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_sweep(cell_size: f32, iterations: usize) {
    let world = town_collision(cell_size);
    let mut proxy = CollisionProxy::new(Vec3::new(0.0, 0.0, 8.0));

    let start = Instant::now();
    for i in 0..iterations {
        // Walk a slow circle through the central crossing.
        let a = i as f32 * 0.01;
        let step = Vec3::new(a.cos(), 0.0, a.sin()) * (10.0 / 60.0);
        let _ = black_box(world.move_with_collisions(&mut proxy, black_box(step)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  sweep move (cell={cell_size}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn main() {
    println!("=== Town Benchmarks ===\n");

    println!("Town build:");
    bench_build(100);

    println!("\nCollision world build:");
    bench_collision_build(4.0, 1000);
    bench_collision_build(8.0, 1000);
    bench_collision_build(16.0, 1000);

    println!("\nSweep move (player-sized proxy):");
    bench_sweep(4.0, 10000);
    bench_sweep(8.0, 10000);
    bench_sweep(16.0, 10000);

    println!("\n=== Done ===");
}
