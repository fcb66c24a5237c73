use serde::{Deserialize, Serialize};

use super::agent::AgentId;
use super::fruit::{FruitId, FruitKind};

/// Integer cell coordinate on the sorting grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

impl Position {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Chebyshev (king-move) distance between two cells.
    pub fn chebyshev(&self, other: &Position) -> u16 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    pub fn is_adjacent(&self, other: &Position) -> bool {
        self.chebyshev(other) <= 1
    }
}

/// What occupies a cell after an occupancy rebuild.
///
/// Carried fruit never appears here; it travels with its carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Agent(AgentId),
    Fruit(FruitId, FruitKind),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn agent(&self) -> Option<AgentId> {
        match self {
            Cell::Agent(id) => Some(*id),
            _ => None,
        }
    }
}
