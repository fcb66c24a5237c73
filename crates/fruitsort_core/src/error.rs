//! Error types for the simulation engine.
//!
//! Every variant is a broken engine invariant, not a bad input: the run
//! that produced one must stop. Placement shortfalls during initialisation
//! are not errors and never show up here.

use fruitsort_data::{AgentId, FruitId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// Two entities resolved to one cell during an occupancy rebuild.
    #[error("double occupancy at ({x}, {y})")]
    DoubleOccupancy { x: u16, y: u16 },

    /// An agent in the carrying state has no fruit recorded.
    #[error("agent {} at ({x}, {y}) is carrying but holds no fruit", agent.0)]
    MissingCarriedFruit { agent: AgentId, x: u16, y: u16 },

    /// A heavy-item carrier kept its load but has no partner to anchor.
    #[error("agent {} at ({x}, {y}) hauls a heavy fruit without a helper", agent.0)]
    MissingHelper { agent: AgentId, x: u16, y: u16 },

    /// Signal scan saw a neighbourhood outside 1..=8 cells.
    #[error("signal scan at ({x}, {y}) found {count} neighbours, expected 1..=8")]
    NeighborhoodOutOfRange { x: u16, y: u16, count: usize },

    /// A position fell outside the grid.
    #[error("position ({x}, {y}) is outside the grid")]
    OutOfBounds { x: u16, y: u16 },

    /// An index handle pointed past the fruit list.
    #[error("unknown fruit {}", fruit.0)]
    UnknownFruit { fruit: FruitId },

    /// An index handle pointed past the agent list.
    #[error("unknown agent {}", agent.0)]
    UnknownAgent { agent: AgentId },
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, SimError>;
