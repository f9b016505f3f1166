//! Arena Sim - Entry Point
//!
//! Trains two units, fights them and prints the event log. With
//! `--series N` it runs N seeded battles in parallel and prints win counts.

use arena_sim::combat::{run_series, seeded_battle};
use arena_sim::core::error::Result;
use arena_sim::core::ArenaConfig;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Arena Sim - seeded duels between randomly grown units
#[derive(Parser, Debug)]
#[command(name = "arena-sim")]
#[command(about = "Train two units and fight them to the death")]
struct Args {
    /// Name of the first unit (side A)
    #[arg(long, default_value = "Slammer")]
    red: String,

    /// Name of the second unit (side B)
    #[arg(long, default_value = "BuffBoi")]
    blue: String,

    /// Levels of experience granted to each unit after creation
    #[arg(long, default_value_t = 10)]
    levels: u32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file overriding the default arena config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format for a single battle
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Run this many battles (seeds `seed..seed+N`) and print a summary
    #[arg(long)]
    series: Option<u32>,
}

fn main() -> Result<()> {
    // Logs go to stderr so JSON output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("arena_sim=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ArenaConfig::load(path)?,
        None => ArenaConfig::default(),
    };
    config.validate()?;

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, levels = args.levels, "Arena Sim starting");

    let names = (args.red.as_str(), args.blue.as_str());

    if let Some(count) = args.series {
        let summary = run_series(&config, names, args.levels, seed, count)?;
        match args.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
            OutputFormat::Text => {
                println!("=== {} battles, seeds {}.. ===", summary.battles, seed);
                println!("{} wins: {}", args.red, summary.a_wins);
                println!("{} wins: {}", args.blue, summary.b_wins);
                println!("Draws: {}", summary.draws);
                println!("Undecided: {}", summary.undecided);
                println!("Average turns: {:.1}", summary.average_turns());
            }
        }
        return Ok(());
    }

    let (report, ctx) = seeded_battle(&config, names, args.levels, seed)?;
    match args.format {
        OutputFormat::Json => println!("{}", ctx.log.to_json()?),
        OutputFormat::Text => {
            println!("{}", ctx.log.render_text());
            println!();
            match &report.winner {
                Some(winner) => println!(
                    "Winner: {} in {} turns (seed {})",
                    winner, report.turns, seed
                ),
                None => println!(
                    "{:?} after {} turns (seed {})",
                    report.outcome, report.turns, seed
                ),
            }
        }
    }

    Ok(())
}
