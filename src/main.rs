use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use city_planner::{
    config::{ConfigLoader, PlannerConfig},
    menu::Menu,
    CityPlanner, GridLoader,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Zoned-grid city planner")]
struct Cli {
    /// Path to the grid data file
    grid: PathBuf,

    /// Path to a planner config YAML file (built-in defaults when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured log level
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ConfigLoader::new(".").load(path)?,
        None => PlannerConfig::default(),
    };

    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    env_logger::Builder::new()
        .parse_filters(level)
        .parse_default_env()
        .init();

    let grid = GridLoader::new(".")
        .load(&cli.grid)
        .context("Error loading grid file")?;
    println!("Grid loaded successfully. Proceeding with city planning...");

    let mut planner = CityPlanner::new(grid);
    planner.set_strategy(config.default_strategy.build());

    let stdin = io::stdin();
    let mut menu = Menu::new(planner, stdin.lock(), io::stdout())
        .show_build_details(config.show_build_details);
    menu.run()
}
