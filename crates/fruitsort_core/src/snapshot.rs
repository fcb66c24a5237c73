//! Read-only copies of world state handed to renderers and tests.

use fruitsort_data::{AgentId, AgentRole, Appearance, Cell, Fruit, FruitKind, Position};
use serde::{Deserialize, Serialize};

use crate::config::SimulationMode;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AgentSnapshot {
    pub id: AgentId,
    pub position: Position,
    pub role: AgentRole,
    pub appearance: Appearance,
    pub carrying: Option<FruitKind>,
    pub is_helping: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub width: u16,
    pub height: u16,
    pub mode: SimulationMode,
    /// Occupancy in row-major order.
    pub cells: Vec<Cell>,
    /// Signal intensity in row-major order.
    pub signals: Vec<f32>,
    pub agents: Vec<AgentSnapshot>,
    pub fruits: Vec<Fruit>,
    pub clustering: f64,
}

impl WorldSnapshot {
    fn index(&self, pos: Position) -> Option<usize> {
        (pos.x < self.width && pos.y < self.height)
            .then(|| pos.y as usize * self.width as usize + pos.x as usize)
    }

    pub fn cell(&self, pos: Position) -> Cell {
        self.index(pos)
            .and_then(|i| self.cells.get(i).copied())
            .unwrap_or_default()
    }

    pub fn signal(&self, pos: Position) -> f32 {
        self.index(pos)
            .and_then(|i| self.signals.get(i).copied())
            .unwrap_or(0.0)
    }

    pub fn carried(&self) -> usize {
        self.fruits.iter().filter(|f| f.carried).count()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
