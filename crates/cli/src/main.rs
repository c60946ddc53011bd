//! unisearch command-line entry point.
//!
//! Dispatches to the search and read subcommands, or to the menu-driven
//! interactive mode when invoked without one. Logging goes to stderr so
//! formatted results on stdout stay clean for piping.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod interactive;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    match args.command {
        Some(Commands::Search(search_args)) => cli::run_search(search_args).await,
        Some(Commands::Read(read_args)) => cli::run_read(read_args).await,
        Some(Commands::Interactive(interactive_args)) => {
            interactive::run(interactive_args.key).await
        }
        None => interactive::run(None).await,
    }
}
