//! # Fruitsort Core
//!
//! The simulation engine for fruitsort - a Deneubourg-style collective
//! sorting model on a discrete grid.
//!
//! Agents wander the grid, remember the item types they recently saw and
//! pick up or drop items with probabilities driven by that memory. Same-type
//! clusters emerge without any central coordination. In cooperative mode a
//! heavy item needs two helpers, and a decaying signal field recruits them.
//!
//! ## Architecture
//!
//! - **Turn-based**: one tick decays the signal field, shuffles agent order
//!   and runs agents one at a time
//! - **Read-after-write**: occupancy is rebuilt after every single agent, so
//!   each agent sees the moves of the agents before it
//! - **Deterministic**: all draws come from one seeded ChaCha stream
//!
//! ## Example
//!
//! ```
//! use fruitsort_core::config::AppConfig;
//! use fruitsort_core::world::World;
//!
//! let mut config = AppConfig::default();
//! config.world.width = 20;
//! config.world.height = 20;
//! config.world.agents = 10;
//! config.world.fruits = 40;
//! config.world.seed = Some(7);
//!
//! let mut world = World::populated(config).unwrap();
//! for _ in 0..10 {
//!     world.tick().unwrap();
//! }
//! assert_eq!(world.tick, 10);
//! ```

/// Per-agent state and the forager decision rules
pub mod agent;
/// Configuration management for simulation parameters
pub mod config;
/// Contract-violation errors raised by the engine
pub mod error;
/// Dense occupancy grid and neighbourhood queries
pub mod grid;
/// Cooperative heavy-item protocol for helper agents
pub mod helper;
/// Bounded observation memory and frequency estimation
pub mod memory;
/// Run counters, clustering score and structured logging
pub mod metrics;
/// Decaying recruit-signal field
pub mod pheromone;
/// Read-only views of the world for renderers and tests
pub mod snapshot;
/// World ownership, initial placement and the tick loop
pub mod world;

pub use agent::{Action, Agent, TurnContext};
pub use config::{AppConfig, FruitMix, SimulationMode};
pub use error::{Result, SimError};
pub use metrics::{init_logging, Metrics};
pub use world::World;
