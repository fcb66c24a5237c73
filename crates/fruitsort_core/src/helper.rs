//! Cooperative heavy-item protocol.
//!
//! A heavy fruit is lifted by two helpers: the primary steps onto the fruit
//! and a second, idle helper standing next to it is coupled as an anchor.
//! While coupled the anchor does nothing on its own and is dragged one step
//! behind its primary. When no partner is around the would-be carrier stays
//! put and broadcasts a recruit signal; free helpers climb that gradient.

use fruitsort_data::{AgentId, Cell, FruitId, Position};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::agent::{Action, Agent, SignalCause, TurnContext};
use crate::error::{Result, SimError};

pub(crate) fn decide<R: Rng + ?Sized>(
    agent: &Agent,
    ctx: &TurnContext,
    nearby: &[FruitId],
    rng: &mut R,
) -> Result<Action> {
    let origin = agent.position;
    let empty = ctx.grid.empty_neighbors(origin);
    let Some(&to) = empty.choose(rng) else {
        return blocked(agent, ctx, nearby, rng);
    };

    if let Some(carried) = agent.carrying {
        let kind = ctx.fruit(carried)?.kind;
        let release = agent.will_release(kind, ctx.config, rng);
        if release {
            return Ok(Action::Release {
                to,
                drop_at: origin,
            });
        }
        if !kind.is_heavy() {
            return Ok(Action::Move { to });
        }
        let helper = agent.partner.ok_or(SimError::MissingHelper {
            agent: agent.id,
            x: origin.x,
            y: origin.y,
        })?;
        return Ok(Action::Haul {
            to,
            helper_to: origin,
            helper,
        });
    }

    if let Some(fruit_id) = agent.first_accepted(ctx, nearby, rng)? {
        let fruit = ctx.fruit(fruit_id)?;
        if !fruit.kind.is_heavy() {
            return Ok(Action::PickUp { fruit: fruit_id });
        }
        return Ok(match find_partner(agent, ctx, fruit.position) {
            Some(helper) => Action::CoPickUp {
                fruit: fruit_id,
                helper,
            },
            None => Action::Signal {
                cause: SignalCause::NoHelper,
            },
        });
    }

    Ok(match follow_signal(ctx, origin, rng)? {
        Some(scented) => Action::Move { to: scented },
        None => Action::Move { to },
    })
}

/// No room to move. A free helper next to a heavy fruit it would lift
/// calls for help instead.
fn blocked<R: Rng + ?Sized>(
    agent: &Agent,
    ctx: &TurnContext,
    nearby: &[FruitId],
    rng: &mut R,
) -> Result<Action> {
    if agent.is_carrying() {
        return Ok(Action::Stay);
    }
    for &id in nearby {
        let kind = ctx.fruit(id)?.kind;
        if kind.is_heavy() && agent.will_carry(kind, ctx.config, rng) {
            return Ok(Action::Signal {
                cause: SignalCause::Blocked,
            });
        }
    }
    Ok(Action::Stay)
}

/// First idle helper, other than `agent`, adjacent to `fruit_pos`.
pub fn find_partner(agent: &Agent, ctx: &TurnContext, fruit_pos: Position) -> Option<AgentId> {
    ctx.grid.neighbors(fruit_pos, 1).find_map(|cell| {
        let id = ctx.grid.get(cell).and_then(|c| c.agent())?;
        if id == agent.id {
            return None;
        }
        ctx.agents
            .get(id.0)
            .filter(|other| other.role.can_help() && other.is_idle())
            .map(|other| other.id)
    })
}

/// Strongest scented, unoccupied neighbour of `origin`, ties broken at
/// random. `None` when no neighbour carries any signal or all scented
/// cells are taken.
pub fn follow_signal<R: Rng + ?Sized>(
    ctx: &TurnContext,
    origin: Position,
    rng: &mut R,
) -> Result<Option<Position>> {
    let mut scored: Vec<(Position, f32)> = ctx
        .grid
        .neighbors(origin, 1)
        .map(|cell| (cell, ctx.signals.get(cell)))
        .collect();
    if !(1..=8).contains(&scored.len()) {
        return Err(SimError::NeighborhoodOutOfRange {
            x: origin.x,
            y: origin.y,
            count: scored.len(),
        });
    }

    scored.shuffle(rng);
    scored.sort_by(|a, b| a.1.total_cmp(&b.1));

    Ok(scored
        .iter()
        .rev()
        .take_while(|(_, intensity)| *intensity > 0.0)
        .find(|(cell, _)| ctx.grid.is_empty(*cell))
        .map(|(cell, _)| *cell))
}
