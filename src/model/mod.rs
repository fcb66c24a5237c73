pub use fruitsort_core::{Action, Agent, TurnContext};
pub mod agent {
    pub use fruitsort_core::agent::*;
}
pub mod config {
    pub use fruitsort_core::config::*;
}
pub mod error {
    pub use fruitsort_core::error::*;
}
pub mod grid {
    pub use fruitsort_core::grid::*;
}
pub mod helper {
    pub use fruitsort_core::helper::*;
}
pub mod memory {
    pub use fruitsort_core::memory::*;
}
pub mod metrics {
    pub use fruitsort_core::metrics::*;
}
pub mod pheromone {
    pub use fruitsort_core::pheromone::*;
}
pub mod snapshot {
    pub use fruitsort_core::snapshot::*;
}
pub mod world {
    pub use fruitsort_core::world::*;
}
pub mod fruit {
    pub use fruitsort_data::{Fruit, FruitId, FruitKind};
}
