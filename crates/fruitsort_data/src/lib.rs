//! Plain data shared by the fruitsort engine, terminal view and driver.

pub mod data;

pub use data::agent::{AgentId, AgentRole, Appearance};
pub use data::fruit::{Fruit, FruitId, FruitKind};
pub use data::grid::{Cell, Position};
