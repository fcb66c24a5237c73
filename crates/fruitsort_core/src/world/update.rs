use std::time::Instant;

use fruitsort_data::{AgentId, Appearance, Cell, FruitId, FruitKind};
use rand::seq::SliceRandom;

use crate::agent::{self, Action, TurnContext};
use crate::error::{Result, SimError};
use crate::metrics::clustering_score;
use crate::world::World;

impl World {
    /// Advances the simulation by one tick.
    ///
    /// Decays the signal field once, shuffles the turn order, then runs the
    /// agents strictly one after another. Occupancy is rebuilt after every
    /// single agent so later agents see earlier moves.
    ///
    /// # Errors
    /// Any [`SimError`] is a broken invariant; the run must stop.
    pub fn tick(&mut self) -> Result<()> {
        let started = Instant::now();
        self.tick += 1;

        self.signals.decay_all(self.config.signal.decay_rate);
        self.order.shuffle(&mut self.rng);

        for turn in 0..self.order.len() {
            let id = self.order[turn];
            self.step_agent(id)?;
        }

        let carried = self.agents.iter().filter(|a| a.is_carrying()).count();
        self.metrics.record_tick(started.elapsed());
        if self.tick % self.config.display.log_interval == 0 {
            let score = clustering_score(&self.grid, &self.fruits);
            tracing::info!(
                tick = self.tick,
                carried,
                clustering = score,
                signal = self.signals.total(),
                "Simulation tick"
            );
        }
        Ok(())
    }

    /// Runs one agent's turn: observe, remember, decide, act, then rebuild
    /// occupancy. A coupled helper does nothing.
    pub fn step_agent(&mut self, id: AgentId) -> Result<()> {
        let agent = self
            .agents
            .get(id.0)
            .ok_or(SimError::UnknownAgent { agent: id })?;
        if agent.is_helping {
            return Ok(());
        }

        let ctx = TurnContext {
            config: &self.config,
            grid: &self.grid,
            signals: &self.signals,
            fruits: &self.fruits,
            agents: &self.agents,
        };
        let nearby = ctx.fruit_neighbors(agent.position);
        let observed = agent::observe(&ctx, &nearby, &mut self.rng)?;
        self.agents[id.0].memory.record(observed);

        let ctx = TurnContext {
            config: &self.config,
            grid: &self.grid,
            signals: &self.signals,
            fruits: &self.fruits,
            agents: &self.agents,
        };
        let action = self.agents[id.0].decide(&ctx, &nearby, &mut self.rng)?;
        self.apply(id, action)?;
        self.rebuild_occupancy()
    }

    /// Applies a decided action to agent `id`.
    pub fn apply(&mut self, id: AgentId, action: Action) -> Result<()> {
        match action {
            Action::Stay => {}
            Action::Move { to } => {
                self.agent_mut(id)?.position = to;
            }
            Action::Release { to, drop_at } => {
                let agent = self.agent_mut(id)?;
                let fruit_id = agent.carrying.take().ok_or(SimError::MissingCarriedFruit {
                    agent: id,
                    x: agent.position.x,
                    y: agent.position.y,
                })?;
                agent.position = to;
                agent.appearance = Appearance::Base;
                let partner = agent.partner.take();

                let fruit = self.fruit_mut(fruit_id)?;
                fruit.position = drop_at;
                fruit.carried = false;
                let kind = fruit.kind;

                if let Some(helper_id) = partner {
                    let helper = self.agent_mut(helper_id)?;
                    helper.is_helping = false;
                    helper.partner = None;
                    helper.appearance = Appearance::Base;
                }
                self.metrics.increment_counter("releases");
                tracing::debug!(
                    agent = id.0,
                    ?kind,
                    x = drop_at.x,
                    y = drop_at.y,
                    partner = partner.map(|p| p.0),
                    "Fruit released"
                );
            }
            Action::Haul {
                to,
                helper_to,
                helper,
            } => {
                self.agent_mut(id)?.position = to;
                self.agent_mut(helper)?.position = helper_to;
            }
            Action::PickUp { fruit } => {
                let kind = self.lift(id, fruit)?;
                self.metrics.increment_counter("pickups");
                tracing::debug!(agent = id.0, ?kind, "Fruit picked up");
            }
            Action::CoPickUp { fruit, helper } => {
                let kind = self.lift(id, fruit)?;
                self.agent_mut(id)?.partner = Some(helper);
                let partner = self.agent_mut(helper)?;
                partner.is_helping = true;
                partner.partner = Some(id);
                partner.appearance = Appearance::Laden(kind);
                self.metrics.increment_counter("pickups");
                self.metrics.increment_counter("couplings");
                tracing::debug!(agent = id.0, helper = helper.0, ?kind, "Heavy fruit lifted");
            }
            Action::Signal { cause } => {
                let source = self.agent_mut(id)?.position;
                self.signals
                    .emit(source, self.config.signal.diffusion_distance);
                self.metrics.increment_counter("recruit_signals");
                tracing::debug!(agent = id.0, ?cause, x = source.x, y = source.y, "Recruit signal");
            }
        }
        Ok(())
    }

    /// Moves `id` onto the fruit's cell and marks the fruit carried.
    fn lift(&mut self, id: AgentId, fruit_id: FruitId) -> Result<FruitKind> {
        let fruit = self.fruit_mut(fruit_id)?;
        fruit.carried = true;
        let (pos, kind) = (fruit.position, fruit.kind);

        let agent = self.agent_mut(id)?;
        agent.position = pos;
        agent.carrying = Some(fruit_id);
        agent.appearance = Appearance::Laden(kind);
        Ok(kind)
    }

    /// Syncs carried fruit to their carriers, then refills the occupancy
    /// map from agents and uncarried fruit.
    ///
    /// # Errors
    /// [`SimError::DoubleOccupancy`] if two entities share a cell.
    pub fn rebuild_occupancy(&mut self) -> Result<()> {
        for agent in &self.agents {
            if let Some(fruit_id) = agent.carrying {
                let fruit = self
                    .fruits
                    .get_mut(fruit_id.0)
                    .ok_or(SimError::UnknownFruit { fruit: fruit_id })?;
                fruit.position = agent.position;
            }
        }

        let agents = self
            .agents
            .iter()
            .map(|a| (a.position, Cell::Agent(a.id)));
        let fruits = self
            .fruits
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.carried)
            .map(|(i, f)| (f.position, Cell::Fruit(FruitId(i), f.kind)));
        self.grid.rebuild(agents.chain(fruits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use fruitsort_data::{AgentRole, Position};

    fn world(width: u16, height: u16) -> World {
        let mut config = AppConfig::default();
        config.world.width = width;
        config.world.height = height;
        config.world.agents = 0;
        config.world.fruits = 0;
        config.world.seed = Some(5);
        config.signal.skip_heavy_fruit_rate = 0.0;
        World::new(config).unwrap()
    }

    #[test]
    fn test_pickup_moves_agent_onto_fruit() {
        let mut w = world(5, 5);
        let a = w.place_agent(Position::new(0, 0), AgentRole::Forager).unwrap();
        let f = w.place_fruit(Position::new(1, 1), FruitKind::A).unwrap();
        w.apply(a, Action::PickUp { fruit: f }).unwrap();
        w.rebuild_occupancy().unwrap();

        assert_eq!(w.agents[0].position, Position::new(1, 1));
        assert_eq!(w.agents[0].appearance, Appearance::Laden(FruitKind::A));
        assert!(w.fruits[0].carried);
        assert_eq!(w.grid.get(Position::new(1, 1)), Some(Cell::Agent(a)));
        assert!(w.grid.is_empty(Position::new(0, 0)));
    }

    #[test]
    fn test_carried_fruit_tracks_carrier() {
        let mut w = world(5, 5);
        let a = w.place_agent(Position::new(0, 0), AgentRole::Forager).unwrap();
        let f = w.place_fruit(Position::new(1, 1), FruitKind::B).unwrap();
        w.apply(a, Action::PickUp { fruit: f }).unwrap();
        w.apply(a, Action::Move { to: Position::new(2, 2) }).unwrap();
        w.rebuild_occupancy().unwrap();
        assert_eq!(w.fruits[0].position, Position::new(2, 2));
    }

    #[test]
    fn test_release_frees_partner() {
        let mut w = world(6, 6);
        let primary = w.place_agent(Position::new(1, 1), AgentRole::Helper).unwrap();
        let f = w.place_fruit(Position::new(2, 2), FruitKind::C).unwrap();
        let helper = w.place_agent(Position::new(3, 3), AgentRole::Helper).unwrap();

        w.apply(primary, Action::CoPickUp { fruit: f, helper }).unwrap();
        w.rebuild_occupancy().unwrap();
        assert!(w.agents[helper.0].is_helping);
        assert_eq!(w.agents[helper.0].partner, Some(primary));
        assert_eq!(w.agents[helper.0].appearance, Appearance::Laden(FruitKind::C));

        w.apply(
            primary,
            Action::Haul {
                to: Position::new(2, 1),
                helper_to: Position::new(2, 2),
                helper,
            },
        )
        .unwrap();
        w.rebuild_occupancy().unwrap();
        assert_eq!(w.agents[helper.0].position, Position::new(2, 2));

        w.apply(
            primary,
            Action::Release {
                to: Position::new(3, 0),
                drop_at: Position::new(2, 1),
            },
        )
        .unwrap();
        w.rebuild_occupancy().unwrap();
        assert!(!w.fruits[0].carried);
        assert_eq!(w.fruits[0].position, Position::new(2, 1));
        assert!(!w.agents[helper.0].is_helping);
        assert_eq!(w.agents[helper.0].appearance, Appearance::Base);
        assert_eq!(w.agents[helper.0].position, Position::new(2, 2));
        assert_eq!(w.agents[primary.0].partner, None);
        assert_eq!(w.metrics.counter("couplings"), 1);
    }

    #[test]
    fn test_coupled_helper_skips_its_turn() {
        let mut w = world(5, 5);
        let helper = w.place_agent(Position::new(2, 2), AgentRole::Helper).unwrap();
        w.agents[helper.0].is_helping = true;
        w.step_agent(helper).unwrap();
        assert_eq!(w.agents[helper.0].position, Position::new(2, 2));
        assert!(w.agents[helper.0].memory.is_empty());
    }

    #[test]
    fn test_step_records_one_observation() {
        let mut w = world(5, 5);
        let a = w.place_agent(Position::new(4, 4), AgentRole::Forager).unwrap();
        w.step_agent(a).unwrap();
        assert_eq!(w.agents[0].memory.len(), 1);
        assert_eq!(w.agents[0].memory.iter().next(), Some(&None));
    }

    #[test]
    fn test_release_without_load_is_a_violation() {
        let mut w = world(5, 5);
        let a = w.place_agent(Position::new(2, 2), AgentRole::Forager).unwrap();
        let result = w.apply(
            a,
            Action::Release {
                to: Position::new(3, 3),
                drop_at: Position::new(2, 2),
            },
        );
        assert_eq!(
            result,
            Err(SimError::MissingCarriedFruit {
                agent: a,
                x: 2,
                y: 2
            })
        );
    }

    #[test]
    fn test_signal_action_emits_around_agent() {
        let mut w = world(7, 7);
        let a = w.place_agent(Position::new(3, 3), AgentRole::Helper).unwrap();
        w.apply(
            a,
            Action::Signal {
                cause: crate::agent::SignalCause::NoHelper,
            },
        )
        .unwrap();
        assert_eq!(w.signals.get(Position::new(3, 3)), 0.0);
        assert_eq!(w.signals.get(Position::new(4, 4)), 1.0);
        assert_eq!(w.metrics.counter("recruit_signals"), 1);
    }

    #[test]
    fn test_apply_unknown_agent_is_a_violation() {
        let mut w = world(5, 5);
        let ghost = AgentId(3);
        let result = w.apply(
            ghost,
            Action::Signal {
                cause: crate::agent::SignalCause::Blocked,
            },
        );
        assert_eq!(result, Err(SimError::UnknownAgent { agent: ghost }));
        assert_eq!(w.signals.total(), 0.0);
    }

    #[test]
    fn test_tick_counts_and_decays() {
        let mut w = world(5, 5);
        w.signals.add_signal(0, 0, 0.5);
        w.tick().unwrap();
        w.tick().unwrap();
        assert_eq!(w.tick, 2);
        assert!((w.signals.get(Position::new(0, 0)) - 0.3).abs() < 1e-5);
        assert_eq!(w.metrics.tick_count(), 2);
    }
}
