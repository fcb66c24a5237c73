//! The world owns every agent, fruit and grid for the duration of a run.

use fruitsort_data::{AgentId, Fruit, FruitId};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::agent::Agent;
use crate::config::AppConfig;
use crate::error::{Result, SimError};
use crate::grid::OccupancyGrid;
use crate::metrics::Metrics;
use crate::pheromone::SignalGrid;

pub mod init;
pub mod state;
pub mod update;

pub struct World {
    pub width: u16,
    pub height: u16,
    pub tick: u64,
    pub config: AppConfig,
    pub agents: Vec<Agent>,
    pub fruits: Vec<Fruit>,
    pub grid: OccupancyGrid,
    pub signals: SignalGrid,
    pub metrics: Metrics,
    /// Turn order, reshuffled every tick. Agent ids stay stable.
    order: Vec<AgentId>,
    rng: ChaCha8Rng,
}

impl World {
    /// Creates an empty world. Nothing is placed yet.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let rng = match config.world.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let (width, height) = (config.world.width, config.world.height);
        Ok(Self {
            width,
            height,
            tick: 0,
            grid: OccupancyGrid::new(width, height),
            signals: SignalGrid::new(width, height),
            agents: Vec::new(),
            fruits: Vec::new(),
            metrics: Metrics::new(),
            order: Vec::new(),
            rng,
            config,
        })
    }

    pub(crate) fn agent_mut(&mut self, id: AgentId) -> Result<&mut Agent> {
        self.agents
            .get_mut(id.0)
            .ok_or(SimError::UnknownAgent { agent: id })
    }

    pub(crate) fn fruit_mut(&mut self, id: FruitId) -> Result<&mut Fruit> {
        self.fruits
            .get_mut(id.0)
            .ok_or(SimError::UnknownFruit { fruit: id })
    }
}
