use serde::{Deserialize, Serialize};

use super::fruit::FruitKind;

/// Index of an agent in the world's agent list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub usize);

/// Closed set of agent behaviours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AgentRole {
    /// Plain sorter: picks up and drops light items only.
    #[default]
    Forager,
    /// Cooperative sorter: can haul heavy items with a partner and follows
    /// recruit signals.
    Helper,
}

impl AgentRole {
    /// Whether an agent of this role may be recruited to co-carry a heavy item.
    pub fn can_help(self) -> bool {
        matches!(self, AgentRole::Helper)
    }
}

/// Display status of an agent. Carriers and their partners take on the
/// colour of the item they hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Appearance {
    #[default]
    Base,
    Laden(FruitKind),
}

impl Appearance {
    pub const BASE_PALETTE: u8 = 1;

    pub fn palette(self) -> u8 {
        match self {
            Appearance::Base => Self::BASE_PALETTE,
            Appearance::Laden(kind) => kind.palette(),
        }
    }
}
