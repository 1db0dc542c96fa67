use puzzle_astar::algorithm::a_star_search;
use puzzle_astar::config::{Cli, Config, PuzzleConfig};
use puzzle_astar::stat::Stats;

use anyhow::Context;
use clap::Parser;
use std::fmt::Display;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let cli = Cli::parse();

    let config = if let Some(config_file) = cli.config.as_ref() {
        let config_str = std::fs::read_to_string(config_file)
            .with_context(|| format!("cannot read config file: {config_file}"))?;
        Config::from_yaml_str(&config_str)
            .with_context(|| format!("error with config file: {config_file}"))?
    } else {
        info!("No config file specified, using default config");
        Config::default()
    }
    .override_from_command_line(&cli)?;
    config.validate()?;

    let mut stats = Stats::default();
    match &config.puzzle {
        PuzzleConfig::Tiles(tiles) => {
            let (puzzle, start) = tiles.build()?;
            if !puzzle.is_solvable(&start) {
                warn!("start board cannot reach the goal, the search will exhaust its state space");
            }
            print_solution(a_star_search(&puzzle, start, &mut stats)?);
        }
        PuzzleConfig::Jugs(jugs) => {
            let (puzzle, start) = jugs.build()?;
            print_solution(a_star_search(&puzzle, start, &mut stats)?);
        }
    }
    stats.print();

    Ok(())
}

fn print_solution<S: Display>(path: Option<Vec<S>>) {
    let Some(path) = path else {
        println!("No solution found.");
        return;
    };

    println!("Solution Found:");
    for (step, state) in path.iter().enumerate() {
        println!("Step {step}:");
        println!("{state}");
        println!();
    }
}
