//! Puffin configuration inspector
//!
//! Resolves the configuration exactly as the server does at startup and
//! prints it as JSON.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use puffin_core::{config::Resolver, sanitize::sanitize_map};

#[derive(Parser)]
#[command(name = "puffin-config")]
#[command(version, about = "Print the resolved Puffin configuration", long_about = None)]
struct Cli {
    /// Checkout directory queried for the release version (default: current directory)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Print secret settings instead of redacting them
    #[arg(long)]
    show_secrets: bool,

    /// Single-line JSON output
    #[arg(long)]
    compact: bool,
}

/// Initialize tracing/logging.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,puffin_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let mut resolver = Resolver::new();
    if let Some(dir) = cli.dir {
        resolver = resolver.with_repo_dir(dir);
    }

    let config = resolver.resolve_env().await?;

    let map = if cli.show_secrets {
        config.to_map()
    } else {
        sanitize_map(&config.to_map())
    };

    let output = if cli.compact {
        serde_json::to_string(&map)?
    } else {
        serde_json::to_string_pretty(&map)?
    };
    println!("{}", output);

    Ok(())
}
