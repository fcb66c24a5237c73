use anyhow::{Context, Result};
use clap::Parser;
use fruitsort_lib::app::App;
use fruitsort_lib::model::config::{AppConfig, SimulationMode};
use fruitsort_lib::model::metrics::init_logging;
use fruitsort_tui::renderer::ascii_frame;
use fruitsort_tui::Tui;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file path; defaults are used when it does not exist
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Number of ticks to run
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Seed for the random stream
    #[arg(short, long)]
    seed: Option<u64>,

    /// Agent population and item mix
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Run without the terminal view and print the final grid
    #[arg(long)]
    headless: bool,

    /// With --headless, print the final state as JSON instead
    #[arg(long, requires = "headless")]
    json: bool,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Mode {
    Forager,
    Cooperative,
}

impl From<Mode> for SimulationMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Forager => SimulationMode::Forager,
            Mode::Cooperative => SimulationMode::Cooperative,
        }
    }
}

fn load_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    AppConfig::from_toml(&content).with_context(|| format!("parsing {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = load_config(&args.config)?;
    if let Some(ticks) = args.ticks {
        config.world.ticks = ticks;
    }
    if args.seed.is_some() {
        config.world.seed = args.seed;
    }
    if let Some(mode) = args.mode {
        config.world.mode = mode.into();
    }
    config.validate()?;

    // stderr shares the terminal with the alternate screen.
    let level = match (args.verbose, args.headless) {
        (true, _) => tracing::Level::DEBUG,
        (false, true) => tracing::Level::INFO,
        (false, false) => tracing::Level::WARN,
    };
    init_logging(level);

    let mut app = App::new(config)?;

    if args.headless {
        app.run_headless()?;
        if args.json {
            println!("{}", app.latest.to_json()?);
        } else {
            print!("{}", ascii_frame(&app.latest));
        }
        return Ok(());
    }

    let mut tui = Tui::new()?;
    tui.enter()?;
    let res = app.run(&mut tui);
    tui.leave()?;
    res
}
