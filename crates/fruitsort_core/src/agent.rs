//! Per-agent state and the forager decision rules.
//!
//! An agent never mutates the world while deciding. It reads a
//! [`TurnContext`] and returns an [`Action`]; the world applies the action
//! and rebuilds occupancy before the next agent decides.

use fruitsort_data::{AgentId, AgentRole, Appearance, Fruit, FruitId, FruitKind, Position};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::{Result, SimError};
use crate::grid::OccupancyGrid;
use crate::helper;
use crate::memory::{pickup_probability, release_probability, Memory};
use crate::pheromone::SignalGrid;

/// Everything an agent may read during its turn.
pub struct TurnContext<'a> {
    pub config: &'a AppConfig,
    pub grid: &'a OccupancyGrid,
    pub signals: &'a SignalGrid,
    pub fruits: &'a [Fruit],
    pub agents: &'a [Agent],
}

impl TurnContext<'_> {
    pub fn fruit(&self, id: FruitId) -> Result<&Fruit> {
        self.fruits
            .get(id.0)
            .ok_or(SimError::UnknownFruit { fruit: id })
    }

    pub fn agent(&self, id: AgentId) -> Result<&Agent> {
        self.agents
            .get(id.0)
            .ok_or(SimError::UnknownAgent { agent: id })
    }

    /// Uncarried fruit within Chebyshev distance 1 of `pos`, in fruit-list
    /// order. Scans the fruit list rather than the occupancy map.
    pub fn fruit_neighbors(&self, pos: Position) -> Vec<FruitId> {
        self.fruits
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.carried && f.position.is_adjacent(&pos))
            .map(|(i, _)| FruitId(i))
            .collect()
    }
}

/// Why an agent stayed put to broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalCause {
    /// Boxed in next to a heavy fruit it wanted to lift.
    Blocked,
    /// Wanted a heavy fruit but no idle helper stood next to it.
    NoHelper,
}

/// Outcome of one agent turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// No empty neighbour: nothing changes.
    Stay,
    Move { to: Position },
    /// Step to `to` and leave the load at `drop_at`, freeing any partner.
    Release { to: Position, drop_at: Position },
    /// Keep a heavy load: step to `to`, partner follows onto `helper_to`.
    Haul {
        to: Position,
        helper_to: Position,
        helper: AgentId,
    },
    /// Step onto a light fruit and lift it.
    PickUp { fruit: FruitId },
    /// Step onto a heavy fruit and couple with `helper`.
    CoPickUp { fruit: FruitId, helper: AgentId },
    /// Stay put and emit a recruit signal.
    Signal { cause: SignalCause },
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Agent {
    pub id: AgentId,
    pub position: Position,
    pub role: AgentRole,
    pub memory: Memory,
    pub carrying: Option<FruitId>,
    pub appearance: Appearance,
    /// Set while this helper is slaved to a primary carrier.
    pub is_helping: bool,
    /// The coupled agent: the helper for a primary, the primary for a helper.
    pub partner: Option<AgentId>,
}

impl Agent {
    pub fn new(id: AgentId, position: Position, role: AgentRole, memory_size: usize) -> Self {
        Self {
            id,
            position,
            role,
            memory: Memory::new(memory_size),
            carrying: None,
            appearance: Appearance::Base,
            is_helping: false,
            partner: None,
        }
    }

    pub fn is_carrying(&self) -> bool {
        self.carrying.is_some()
    }

    /// Free to be recruited: neither carrying nor already assisting.
    pub fn is_idle(&self) -> bool {
        !self.is_helping && self.carrying.is_none()
    }

    pub fn frequency(&self, key: FruitKind, config: &AppConfig) -> f64 {
        self.memory.frequency(key, config.foraging.error_rate)
    }

    /// Pickup probability for `kind`. Helpers shy away from heavy items by
    /// `skip_heavy_fruit_rate`.
    pub fn carry_probability(&self, kind: FruitKind, config: &AppConfig) -> f64 {
        let base = pickup_probability(self.frequency(kind, config), config.foraging.k_plus);
        match self.role {
            AgentRole::Helper if kind.is_heavy() => {
                base * (1.0 - config.signal.skip_heavy_fruit_rate)
            }
            _ => base,
        }
    }

    pub fn release_chance(&self, kind: FruitKind, config: &AppConfig) -> f64 {
        release_probability(self.frequency(kind, config), config.foraging.k_minus)
    }

    pub fn will_carry<R: Rng + ?Sized>(
        &self,
        kind: FruitKind,
        config: &AppConfig,
        rng: &mut R,
    ) -> bool {
        rng.gen::<f64>() < self.carry_probability(kind, config)
    }

    pub fn will_release<R: Rng + ?Sized>(
        &self,
        kind: FruitKind,
        config: &AppConfig,
        rng: &mut R,
    ) -> bool {
        rng.gen::<f64>() < self.release_chance(kind, config)
    }

    /// Picks the action for this turn. Memory must already hold this
    /// turn's observation.
    pub fn decide<R: Rng + ?Sized>(
        &self,
        ctx: &TurnContext,
        nearby: &[FruitId],
        rng: &mut R,
    ) -> Result<Action> {
        match self.role {
            AgentRole::Forager => self.decide_as_forager(ctx, nearby, rng),
            AgentRole::Helper => helper::decide(self, ctx, nearby, rng),
        }
    }

    fn decide_as_forager<R: Rng + ?Sized>(
        &self,
        ctx: &TurnContext,
        nearby: &[FruitId],
        rng: &mut R,
    ) -> Result<Action> {
        let empty = ctx.grid.empty_neighbors(self.position);
        let Some(&to) = empty.choose(rng) else {
            return Ok(Action::Stay);
        };

        if let Some(carried) = self.carrying {
            let kind = ctx.fruit(carried)?.kind;
            if self.will_release(kind, ctx.config, rng) {
                return Ok(Action::Release {
                    to,
                    drop_at: self.position,
                });
            }
            return Ok(Action::Move { to });
        }

        match self.first_accepted(ctx, nearby, rng)? {
            Some(fruit) => Ok(Action::PickUp { fruit }),
            None => Ok(Action::Move { to }),
        }
    }

    /// First fruit in `nearby` whose pickup draw succeeds.
    pub(crate) fn first_accepted<R: Rng + ?Sized>(
        &self,
        ctx: &TurnContext,
        nearby: &[FruitId],
        rng: &mut R,
    ) -> Result<Option<FruitId>> {
        for &id in nearby {
            let kind = ctx.fruit(id)?.kind;
            if self.will_carry(kind, ctx.config, rng) {
                return Ok(Some(id));
            }
        }
        Ok(None)
    }
}

/// Samples one neighbouring fruit uniformly to remember its type. This is
/// ambient exposure only and is independent of what the agent later lifts.
pub fn observe<R: Rng + ?Sized>(
    ctx: &TurnContext,
    nearby: &[FruitId],
    rng: &mut R,
) -> Result<Option<FruitKind>> {
    match nearby.choose(rng) {
        Some(&id) => Ok(Some(ctx.fruit(id)?.kind)),
        None => Ok(None),
    }
}
