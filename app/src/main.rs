#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use command::{
    AskInput, AskStrategy, CommandStrategy, InitStrategy, LookupInput, LookupStrategy, ServeInput,
    ServeStrategy, VersionStrategy,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "campus-finder")]
#[command(about = "Campus building finder", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/campus-finder/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP chat server
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(short, long)]
        port: Option<u16>,

        /// Building CSV file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Answer a single message through the assistant
    Ask {
        #[arg(short = 'm', long)]
        message: String,

        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Look a building up locally, without the language model
    Lookup {
        query: String,

        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Initialize configuration
    Init,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    match cli.command {
        Commands::Serve {
            host,
            port,
            catalog,
        } => {
            ServeStrategy
                .execute(ServeInput {
                    config,
                    host,
                    port,
                    catalog,
                })
                .await
        }
        Commands::Ask { message, catalog } => {
            AskStrategy
                .execute(AskInput {
                    config,
                    message,
                    catalog,
                })
                .await
        }
        Commands::Lookup { query, catalog } => {
            LookupStrategy
                .execute(LookupInput {
                    config,
                    query,
                    catalog,
                })
                .await
        }
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}
