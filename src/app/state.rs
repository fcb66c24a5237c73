use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::time::Duration;

use crate::model::config::AppConfig;
use crate::model::snapshot::WorldSnapshot;
use crate::model::world::World;

pub struct App {
    pub running: bool,
    /// Set once the configured number of ticks has run.
    pub finished: bool,
    pub world: World,
    pub initial: WorldSnapshot,
    pub latest: WorldSnapshot,
    pub total_ticks: u64,
    pub frame_delay: Duration,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let total_ticks = config.world.ticks;
        let frame_delay = Duration::from_millis(config.display.frame_delay_ms);
        let world = World::populated(config)?;
        let initial = world.snapshot();
        Ok(Self {
            running: true,
            finished: total_ticks == 0,
            latest: initial.clone(),
            initial,
            world,
            total_ticks,
            frame_delay,
        })
    }

    /// Runs one tick unless the run is complete.
    pub fn step(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        self.world.tick()?;
        self.latest = self.world.snapshot();
        if self.world.tick >= self.total_ticks {
            self.finished = true;
            self.world.metrics.log_summary();
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            _ if self.finished => self.running = false,
            _ => {}
        }
    }

    /// Runs every remaining tick without a terminal.
    pub fn run_headless(&mut self) -> Result<()> {
        while self.running && !self.finished {
            self.step()?;
        }
        Ok(())
    }
}
