use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use joinorder::query::planner::{explain, SearchStrategy};
use joinorder::{JoinPlan, PreparedWorkload, Workload};

#[derive(Parser)]
#[command(author, version, about = "joinorder - choose a left-deep join order for a query workload")]
struct Cli {
    /// Search algorithm (auto, greedy, dp); overrides the workload file
    #[arg(short, long, global = true)]
    strategy: Option<SearchStrategy>,

    /// Join count above which auto switches to the greedy search
    #[arg(short = 't', long, global = true)]
    greedy_threshold: Option<usize>,

    /// Command to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the chosen join order
    Plan {
        /// Workload JSON file
        file: PathBuf,
    },

    /// Print the chosen join order as a tree
    Explain {
        /// Workload JSON file
        file: PathBuf,
    },
}

fn load(cli: &Cli, path: &Path) -> Result<PreparedWorkload> {
    let mut workload = Workload::load(path)
        .with_context(|| format!("Failed to load workload {}", path.display()))?;
    if let Some(strategy) = cli.strategy {
        workload.config.strategy = strategy;
    }
    if let Some(threshold) = cli.greedy_threshold {
        workload.config.greedy_threshold = threshold;
    }
    workload
        .prepare()
        .with_context(|| format!("Invalid workload {}", path.display()))
}

fn optimize(prepared: &PreparedWorkload) -> Result<JoinPlan> {
    prepared
        .order_joins()
        .context("Join ordering failed")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Plan { file } => {
            let prepared = load(&cli, file)?;
            let plan = optimize(&prepared)?;
            if let Some(query) = prepared.plan.query() {
                println!("Query: {}", query);
            }
            println!("{}", plan);
        }
        Commands::Explain { file } => {
            let prepared = load(&cli, file)?;
            let plan = optimize(&prepared)?;
            println!("{}", explain(&plan));
        }
    }

    Ok(())
}
