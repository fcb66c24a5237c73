use fruitsort_data::{Cell, Fruit, FruitId, Position};

use crate::agent::{Agent, TurnContext};
use crate::metrics::clustering_score;
use crate::pheromone::SignalGrid;
use crate::snapshot::{AgentSnapshot, WorldSnapshot};
use crate::world::World;

impl World {
    pub fn signal_grid(&self) -> &SignalGrid {
        &self.signals
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn fruits(&self) -> &[Fruit] {
        &self.fruits
    }

    pub fn cell(&self, pos: Position) -> Option<Cell> {
        self.grid.get(pos)
    }

    pub fn neighbors(&self, pos: Position, radius: u16) -> Vec<Position> {
        self.grid.neighbors(pos, radius).collect()
    }

    pub fn empty_neighbors(&self, pos: Position) -> Vec<Position> {
        self.grid.empty_neighbors(pos)
    }

    /// Uncarried fruit within Chebyshev distance 1 of `pos`.
    pub fn fruit_neighbors(&self, pos: Position) -> Vec<FruitId> {
        self.context().fruit_neighbors(pos)
    }

    pub fn context(&self) -> TurnContext<'_> {
        TurnContext {
            config: &self.config,
            grid: &self.grid,
            signals: &self.signals,
            fruits: &self.fruits,
            agents: &self.agents,
        }
    }

    pub fn clustering(&self) -> f64 {
        clustering_score(&self.grid, &self.fruits)
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        let fruits = &self.fruits;
        WorldSnapshot {
            tick: self.tick,
            width: self.width,
            height: self.height,
            mode: self.config.world.mode,
            cells: self.grid.cells().to_vec(),
            signals: self.signals.cells.clone(),
            agents: self
                .agents
                .iter()
                .map(|a| AgentSnapshot {
                    id: a.id,
                    position: a.position,
                    role: a.role,
                    appearance: a.appearance,
                    carrying: a
                        .carrying
                        .and_then(|id| fruits.get(id.0))
                        .map(|f| f.kind),
                    is_helping: a.is_helping,
                })
                .collect(),
            fruits: self.fruits.clone(),
            clustering: self.clustering(),
        }
    }
}
