//! `ai-sim` - run a voxel AI scenario headless.
//!
//! ```text
//! ai-sim scenarios/courtyard.yaml --ticks 400 --verbose
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use ai_sim::{run, RunSummary, Scenario};

#[derive(Parser)]
#[command(name = "ai-sim")]
#[command(about = "Run a voxel AI scenario headless", version)]
struct Cli {
    /// Scenario file (YAML)
    scenario: PathBuf,

    /// Override the scenario's tick count
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt().with_env_filter(filter).with_target(false).init();

    let scenario = Scenario::load(&cli.scenario)?;
    let summary = run(&scenario, cli.ticks)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!("Ran {} ticks", summary.ticks);
    for (kind, count) in &summary.moves {
        println!("  {:<18} {count}", kind.name());
    }
    println!();
    for agent in &summary.agents {
        println!("Agent {} at {}", agent.id, agent.final_cell);
        println!("  completed: {}", agent.completed.join(", "));
        println!("  failures:  {}", agent.failures);
        if agent.preemptions > 0 {
            println!("  preempted: {}", agent.preemptions);
        }
        if let Some(active) = &agent.active {
            println!("  active:    {active}");
        }
        if !agent.locked_out.is_empty() {
            println!("  locked:    {}", agent.locked_out.join(", "));
        }
    }
}
