use fruitsort_lib::model::config::{AppConfig, SimulationMode};
use fruitsort_lib::model::world::World;

fn run(seed: u64, mode: SimulationMode, ticks: u64) -> String {
    let mut config = AppConfig::default();
    config.world.width = 20;
    config.world.height = 20;
    config.world.agents = 30;
    config.world.fruits = 80;
    config.world.mode = mode;
    config.world.seed = Some(seed);
    let mut world = World::populated(config).unwrap();
    for _ in 0..ticks {
        world.tick().unwrap();
    }
    world.snapshot().to_json().unwrap()
}

#[test]
fn same_seed_same_forager_run() {
    assert_eq!(
        run(42, SimulationMode::Forager, 150),
        run(42, SimulationMode::Forager, 150)
    );
}

#[test]
fn same_seed_same_cooperative_run() {
    assert_eq!(
        run(42, SimulationMode::Cooperative, 150),
        run(42, SimulationMode::Cooperative, 150)
    );
}

#[test]
fn different_seeds_diverge() {
    assert_ne!(
        run(1, SimulationMode::Forager, 50),
        run(2, SimulationMode::Forager, 50)
    );
}
