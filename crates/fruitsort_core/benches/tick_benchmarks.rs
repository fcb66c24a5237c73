use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fruitsort_core::config::{AppConfig, SimulationMode};
use fruitsort_core::grid::OccupancyGrid;
use fruitsort_core::world::World;
use fruitsort_data::Position;

fn config(mode: SimulationMode) -> AppConfig {
    let mut config = AppConfig::default();
    config.world.width = 60;
    config.world.height = 60;
    config.world.agents = 120;
    config.world.fruits = 800;
    config.world.seed = Some(42);
    config.world.mode = mode;
    config
}

fn bench_forager_tick(c: &mut Criterion) {
    let mut world = match World::populated(config(SimulationMode::Forager)) {
        Ok(world) => world,
        Err(e) => panic!("failed to build world: {e}"),
    };
    c.bench_function("forager_tick_60x60", |b| {
        b.iter(|| {
            world.tick().ok();
            black_box(world.tick)
        })
    });
}

fn bench_cooperative_tick(c: &mut Criterion) {
    let mut world = match World::populated(config(SimulationMode::Cooperative)) {
        Ok(world) => world,
        Err(e) => panic!("failed to build world: {e}"),
    };
    c.bench_function("cooperative_tick_60x60", |b| {
        b.iter(|| {
            world.tick().ok();
            black_box(world.tick)
        })
    });
}

fn bench_empty_neighbors(c: &mut Criterion) {
    let grid = OccupancyGrid::new(100, 100);
    c.bench_function("empty_neighbors_interior", |b| {
        b.iter(|| black_box(grid.empty_neighbors(Position::new(50, 50)).len()))
    });
}

criterion_group!(
    benches,
    bench_forager_tick,
    bench_cooperative_tick,
    bench_empty_neighbors
);
criterion_main!(benches);
