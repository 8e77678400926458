use clap::{Args, Parser, Subcommand};

use crate::error::Result;
use crate::scenario;

#[derive(Debug, Parser)]
#[command(
    name = "ffeed-demo",
    about = "Scripted FrankenFeed scenarios over a seeded in-memory store",
    version
)]
pub struct Cli {
    /// Debug-level logging.
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Args)]
pub struct ScenarioArgs {
    /// Post the delete scenarios target.
    #[arg(long = "post-id", default_value_t = 1)]
    pub post_id: i64,

    /// Page size for feed listings.
    #[arg(long = "per-page", default_value_t = 12)]
    pub per_page: u32,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Delete a post and watch it commit.
    Success(ScenarioArgs),

    /// Delete a post against a failing store and watch the rollback.
    Failure(ScenarioArgs),

    /// Attempt a delete while the link is down.
    Offline(ScenarioArgs),

    /// Drop the link, restore it, and retry the delete.
    Restore(ScenarioArgs),

    /// Load, filter, and page through the seeded feed.
    Browse(ScenarioArgs),

    /// Run every delete scenario in order.
    All(ScenarioArgs),
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.verbose);
    let runtime = tokio::runtime::Builder::new_current_thread().build()?;
    runtime.block_on(async {
        match cli.command {
            Commands::Success(args) => scenario::run_success(&args).await,
            Commands::Failure(args) => scenario::run_failure(&args).await,
            Commands::Offline(args) => scenario::run_offline(&args).await,
            Commands::Restore(args) => scenario::run_restore(&args).await,
            Commands::Browse(args) => scenario::run_browse(&args).await,
            Commands::All(args) => {
                scenario::run_success(&args).await?;
                scenario::run_failure(&args).await?;
                scenario::run_offline(&args).await?;
                scenario::run_restore(&args).await
            }
        }
    })
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));
    // A second init (tests, repeated run calls) keeps the first subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
