pub mod macros;

use fruitsort_data::{AgentRole, FruitKind, Position};
use fruitsort_lib::model::config::{AppConfig, SimulationMode};
use fruitsort_lib::model::world::World;

#[allow(dead_code)]
pub struct WorldBuilder {
    config: AppConfig,
    agents: Vec<(Position, AgentRole)>,
    fruits: Vec<(Position, FruitKind)>,
}

#[allow(dead_code)]
impl WorldBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.world.width = 10;
        config.world.height = 10;
        config.world.agents = 0;
        config.world.fruits = 0;
        config.world.seed = Some(0);
        Self {
            config,
            agents: Vec::new(),
            fruits: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.config.world.width = width;
        self.config.world.height = height;
        self
    }

    pub fn with_mode(mut self, mode: SimulationMode) -> Self {
        self.config.world.mode = mode;
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn with_agent(mut self, x: u16, y: u16, role: AgentRole) -> Self {
        self.agents.push((Position::new(x, y), role));
        self
    }

    pub fn with_fruit(mut self, x: u16, y: u16, kind: FruitKind) -> Self {
        self.fruits.push((Position::new(x, y), kind));
        self
    }

    pub fn build(self) -> World {
        let mut world = World::new(self.config).expect("Failed to create world in test builder");
        for (pos, role) in self.agents {
            world.place_agent(pos, role).expect("agent cell taken");
        }
        for (pos, kind) in self.fruits {
            world.place_fruit(pos, kind).expect("fruit cell taken");
        }
        world.rebuild_occupancy().expect("inconsistent test layout");
        world
    }
}
