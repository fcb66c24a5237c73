use serde::{Deserialize, Serialize};

use super::grid::Position;

/// Index of a fruit in the world's fruit list. Fruit are never removed,
/// so the index stays valid for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FruitId(pub usize);

/// Closed set of item types. `A` and `B` are light, `C` needs two carriers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FruitKind {
    A,
    B,
    C,
}

impl FruitKind {
    pub const ALL: [FruitKind; 3] = [FruitKind::A, FruitKind::B, FruitKind::C];

    pub fn is_heavy(self) -> bool {
        matches!(self, FruitKind::C)
    }

    /// Palette slot used by renderers (A→2, B→3, C→4).
    pub fn palette(self) -> u8 {
        match self {
            FruitKind::A => 2,
            FruitKind::B => 3,
            FruitKind::C => 4,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            FruitKind::A => 'A',
            FruitKind::B => 'B',
            FruitKind::C => 'C',
        }
    }
}

/// A typed item lying on the grid or travelling with an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fruit {
    pub position: Position,
    pub kind: FruitKind,
    pub carried: bool,
}

impl Fruit {
    pub fn new(position: Position, kind: FruitKind) -> Self {
        Self {
            position,
            kind,
            carried: false,
        }
    }
}
