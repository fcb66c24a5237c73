use fruitsort_data::{AgentId, AgentRole, Cell, Fruit, FruitId, FruitKind, Position};
use rand::Rng;

use crate::agent::Agent;
use crate::config::{AppConfig, FruitMix, SimulationMode};
use crate::error::Result;
use crate::world::World;

impl World {
    /// Creates a world and scatters the configured agents and fruit.
    ///
    /// Placement may fall short of the requested counts on crowded grids;
    /// see [`World::initialize_agents`].
    pub fn populated(config: AppConfig) -> anyhow::Result<Self> {
        let mut world = Self::new(config)?;
        let role = match world.config.world.mode {
            SimulationMode::Forager => AgentRole::Forager,
            SimulationMode::Cooperative => AgentRole::Helper,
        };
        let mix = world.config.fruit_mix();
        world.initialize_agents(world.config.world.agents, role)?;
        world.initialize_fruits(world.config.world.fruits, &mix)?;
        world.rebuild_occupancy()?;
        tracing::info!(
            width = world.width,
            height = world.height,
            agents = world.agents.len(),
            fruits = world.fruits.len(),
            mode = ?world.config.world.mode,
            fingerprint = %world.config.fingerprint(),
            "World populated"
        );
        Ok(world)
    }

    /// Scatters `count` agents on free cells. Returns how many were placed.
    pub fn initialize_agents(&mut self, count: usize, role: AgentRole) -> Result<usize> {
        self.scatter(count, "agents", |world, pos| {
            world.place_agent(pos, role).map(|_| ())
        })
    }

    /// Scatters `count` fruit with types drawn from `mix`. Returns how many
    /// were placed.
    pub fn initialize_fruits(&mut self, count: usize, mix: &FruitMix) -> Result<usize> {
        self.scatter(count, "fruits", |world, pos| {
            let kind = mix.sample(&mut world.rng);
            world.place_fruit(pos, kind).map(|_| ())
        })
    }

    /// Puts a new agent on an empty cell.
    pub fn place_agent(&mut self, pos: Position, role: AgentRole) -> Result<AgentId> {
        let id = AgentId(self.agents.len());
        self.grid.place(pos, Cell::Agent(id))?;
        self.agents.push(Agent::new(
            id,
            pos,
            role,
            self.config.foraging.memory_size,
        ));
        self.order.push(id);
        Ok(id)
    }

    /// Puts a new uncarried fruit on an empty cell.
    pub fn place_fruit(&mut self, pos: Position, kind: FruitKind) -> Result<FruitId> {
        let id = FruitId(self.fruits.len());
        self.grid.place(pos, Cell::Fruit(id, kind))?;
        self.fruits.push(Fruit::new(pos, kind));
        Ok(id)
    }

    fn random_cell(&mut self) -> Position {
        Position::new(
            self.rng.gen_range(0..self.width),
            self.rng.gen_range(0..self.height),
        )
    }

    /// Rejection sampling: one draw plus up to `placement_retries` redraws
    /// per item. An item whose last draw is still taken is skipped.
    fn scatter<F>(&mut self, count: usize, what: &str, mut assign: F) -> Result<usize>
    where
        F: FnMut(&mut Self, Position) -> Result<()>,
    {
        let retries = self.config.world.placement_retries;
        let mut placed = 0;
        for _ in 0..count {
            let mut pos = self.random_cell();
            let mut attempt = 0;
            while attempt < retries && !self.grid.is_empty(pos) {
                pos = self.random_cell();
                attempt += 1;
            }
            if self.grid.is_empty(pos) {
                assign(self, pos)?;
                placed += 1;
            }
        }

        if placed < count {
            let missing = count - placed;
            self.metrics.add_to_counter("placement_shortfall", missing as u64);
            tracing::warn!(
                what,
                requested = count,
                placed,
                missing,
                "Placement retries exhausted"
            );
        }
        Ok(placed)
    }
}
