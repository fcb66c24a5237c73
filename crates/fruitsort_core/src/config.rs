//! Configuration management for simulation parameters.
//!
//! Strongly-typed configuration structures that map to the `config.toml`
//! file. Every section falls back to its defaults, so a file only needs to
//! list the values it overrides.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! width = 30
//! height = 30
//! agents = 40
//! fruits = 200
//! mode = "Cooperative"
//! seed = 42
//!
//! [foraging]
//! memory_size = 100
//! k_plus = 0.1
//! k_minus = 0.3
//!
//! [signal]
//! decay_rate = 0.1
//! diffusion_distance = 3
//! ```

use fruitsort_data::FruitKind;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Which agent population and item mix a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SimulationMode {
    /// Foragers sorting two light item types.
    #[default]
    Forager,
    /// Helpers sorting light and heavy items, with recruit signals.
    Cooperative,
}

/// World-level configuration: dimensions, population and run length.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    pub width: u16,
    pub height: u16,
    pub agents: usize,
    pub fruits: usize,
    /// Extra draws allowed per item when its first random cell is taken.
    pub placement_retries: u32,
    pub seed: Option<u64>,
    pub ticks: u64,
    pub mode: SimulationMode,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 30,
            height: 30,
            agents: 40,
            fruits: 200,
            placement_retries: 10,
            seed: None,
            ticks: 20_000,
            mode: SimulationMode::Forager,
        }
    }
}

/// Pickup/drop law parameters shared by every agent.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ForagingConfig {
    /// Number of observations an agent remembers (W).
    pub memory_size: usize,
    /// Weight given to a remembered item of another type.
    pub error_rate: f64,
    pub k_plus: f64,
    pub k_minus: f64,
    /// Share of type `A` among initial items in forager mode.
    pub type_a_probability: f64,
    /// Item types drawn uniformly in cooperative mode.
    pub kinds: Vec<FruitKind>,
}

impl Default for ForagingConfig {
    fn default() -> Self {
        Self {
            memory_size: 100,
            error_rate: 0.0,
            k_plus: 0.1,
            k_minus: 0.3,
            type_a_probability: 0.5,
            kinds: FruitKind::ALL.to_vec(),
        }
    }
}

/// Recruit-signal field parameters.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SignalConfig {
    /// Amount subtracted from every cell once per tick.
    pub decay_rate: f32,
    /// Chebyshev radius reached by one emission.
    pub diffusion_distance: u16,
    /// Fraction of heavy pickups skipped outright.
    pub skip_heavy_fruit_rate: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            decay_rate: 0.1,
            diffusion_distance: 3,
            skip_heavy_fruit_rate: 0.1,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DisplayConfig {
    pub frame_delay_ms: u64,
    /// Ticks between progress log lines.
    pub log_interval: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            frame_delay_ms: 0,
            log_interval: 1000,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub foraging: ForagingConfig,
    pub signal: SignalConfig,
    pub display: DisplayConfig,
}

/// Distribution used to draw the type of each initial item.
#[derive(Debug, Clone, PartialEq)]
pub enum FruitMix {
    /// `A` with the given probability, `B` otherwise.
    Pair { type_a_probability: f64 },
    /// Uniform over the listed kinds.
    Uniform(Vec<FruitKind>),
}

impl FruitMix {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> FruitKind {
        match self {
            FruitMix::Pair { type_a_probability } => {
                if rng.gen::<f64>() < *type_a_probability {
                    FruitKind::A
                } else {
                    FruitKind::B
                }
            }
            FruitMix::Uniform(kinds) => {
                if kinds.is_empty() {
                    FruitKind::A
                } else {
                    kinds[rng.gen_range(0..kinds.len())]
                }
            }
        }
    }
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a
    /// description of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        let world = &self.world;
        anyhow::ensure!(world.width > 0, "World width must be positive");
        anyhow::ensure!(world.width <= 1000, "World width too large (max 1000)");
        anyhow::ensure!(world.height > 0, "World height must be positive");
        anyhow::ensure!(world.height <= 1000, "World height too large (max 1000)");
        let capacity = world.width as usize * world.height as usize;
        anyhow::ensure!(
            world.agents + world.fruits <= capacity,
            "Agents and fruits ({}) exceed grid capacity ({capacity})",
            world.agents + world.fruits
        );

        let foraging = &self.foraging;
        anyhow::ensure!(foraging.memory_size > 0, "Memory size must be positive");
        anyhow::ensure!(
            (0.0..=1.0).contains(&foraging.error_rate),
            "Error rate must be in [0.0, 1.0]"
        );
        anyhow::ensure!(foraging.k_plus > 0.0, "k_plus must be positive");
        anyhow::ensure!(foraging.k_minus > 0.0, "k_minus must be positive");
        anyhow::ensure!(
            (0.0..=1.0).contains(&foraging.type_a_probability),
            "Type A probability must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            !foraging.kinds.is_empty(),
            "At least one fruit kind is required"
        );

        let signal = &self.signal;
        anyhow::ensure!(
            (0.0..=1.0).contains(&signal.decay_rate),
            "Decay rate must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            signal.diffusion_distance > 0,
            "Diffusion distance must be positive"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&signal.skip_heavy_fruit_rate),
            "Skip heavy fruit rate must be in [0.0, 1.0]"
        );

        anyhow::ensure!(
            self.display.log_interval > 0,
            "Log interval must be positive"
        );

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Item mix for the configured mode.
    pub fn fruit_mix(&self) -> FruitMix {
        match self.world.mode {
            SimulationMode::Forager => FruitMix::Pair {
                type_a_probability: self.foraging.type_a_probability,
            },
            SimulationMode::Cooperative => FruitMix::Uniform(self.foraging.kinds.clone()),
        }
    }

    /// Digest of every parameter that changes agent behaviour.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.world.mode).as_bytes());
        hasher.update(format!("{:?}", self.foraging).as_bytes());
        hasher.update(format!("{:?}", self.signal).as_bytes());
        hex::encode(hasher.finalize())
    }
}
