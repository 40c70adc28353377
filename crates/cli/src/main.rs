#![allow(clippy::print_stdout, reason = "CLI prints query results to stdout")]
#![allow(clippy::single_call_fn, reason = "Command runners are called once from main")]

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bear-tracks")]
#[command(about = "Privacy-friendly pageview tracking and dashboard metrics", long_about = None)]
struct Cli {
    #[command(flatten)]
    db: DbArgs,
    #[command(subcommand)]
    command: Commands,
}

/// Where the data lives. A database URL wins when the `postgres` feature is on.
#[derive(Args, Debug, Clone)]
pub(crate) struct DbArgs {
    /// SQLite database file
    #[arg(long, global = true, env = "BEAR_TRACKS_DB_PATH")]
    pub db_path: Option<PathBuf>,
    /// PostgreSQL connection string
    #[arg(long, global = true, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        #[arg(short, long, default_value = "3000")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Row counts per table
    Stats,
    /// Headline metric cards
    Overview,
    /// Most recent pageviews, newest first
    Recent {
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
    /// One session and its pageviews
    Session { id: String },
}

pub(crate) fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bear-tracks")
        .join("tracks.db")
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let storage = commands::open_storage(&cli.db).await?;

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(storage, &host, port).await,
        Commands::Stats => commands::query::run_stats(storage).await,
        Commands::Overview => commands::query::run_overview(storage).await,
        Commands::Recent { limit } => commands::query::run_recent(storage, limit).await,
        Commands::Session { id } => commands::query::run_session(storage, &id).await,
    }
}
