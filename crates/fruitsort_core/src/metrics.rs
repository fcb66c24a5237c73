//! Run metrics and structured logging for the simulation.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use fruitsort_data::{Cell, Fruit};

use crate::grid::OccupancyGrid;

/// Counters collected over one run.
#[derive(Debug, Clone)]
pub struct Metrics {
    tick_count: u64,
    last_tick: Duration,
    counters: BTreeMap<String, u64>,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tick_count: 0,
            last_tick: Duration::ZERO,
            counters: BTreeMap::new(),
            start_time: Instant::now(),
        }
    }

    /// Records a completed tick with its duration.
    pub fn record_tick(&mut self, duration: Duration) {
        self.tick_count += 1;
        self.last_tick = duration;
    }

    pub fn increment_counter(&mut self, name: &str) {
        self.add_to_counter(name, 1);
    }

    pub fn add_to_counter(&mut self, name: &str, amount: u64) {
        *self.counters.entry(name.to_string()).or_insert(0) += amount;
    }

    /// Current value of a named counter, 0 if never touched.
    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn last_tick_duration(&self) -> Duration {
        self.last_tick
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Logs every counter once, typically at the end of a run.
    pub fn log_summary(&self) {
        tracing::info!(
            ticks = self.tick_count,
            elapsed_ms = self.elapsed().as_millis() as u64,
            counters = ?self.counters,
            "Run summary"
        );
    }
}

/// Mean share of same-kind fruit among each lying fruit's fruit
/// neighbours. Fruit with no fruit neighbour are left out; 0 when none
/// qualify. Observability only, agents never read it.
pub fn clustering_score(grid: &OccupancyGrid, fruits: &[Fruit]) -> f64 {
    let mut total = 0.0;
    let mut counted = 0usize;
    for fruit in fruits.iter().filter(|f| !f.carried) {
        let (same, all) = grid
            .neighbors(fruit.position, 1)
            .filter_map(|pos| match grid.get(pos) {
                Some(Cell::Fruit(_, kind)) => Some(kind == fruit.kind),
                _ => None,
            })
            .fold((0usize, 0usize), |(s, a), matched| {
                (s + usize::from(matched), a + 1)
            });
        if all > 0 {
            total += same as f64 / all as f64;
            counted += 1;
        }
    }
    if counted == 0 {
        0.0
    } else {
        total / counted as f64
    }
}

/// Installs the global tracing subscriber.
pub fn init_logging(level: tracing::Level) {
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .finish(),
    )
    .ok();
}
