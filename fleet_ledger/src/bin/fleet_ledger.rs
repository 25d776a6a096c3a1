use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fleet_ledger::api::{self, AppState, Clock};
use fleet_ledger::config::{FleetConfig, load_config_path};
use fleet_ledger::db::{connection, migrate};
use fleet_ledger::seed::{SeedOptions, apply_seed, load_seed_path};

#[derive(Parser)]
#[command(version, about = "Fleet ledger service")]
struct Cli {
    /// TOML config file; without it DATABASE_URL is required.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Run migrations, then serve the HTTP API.
    Serve {
        #[arg(long, value_name = "ADDR")]
        listen: Option<SocketAddr>,
    },
    /// Apply pending migrations and exit.
    Migrate,
    /// Load reference data from a seed file.
    Seed {
        #[arg(long, value_name = "FILE")]
        file: PathBuf,
        #[arg(long)]
        dry_run: bool,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<FleetConfig> {
    match path {
        Some(p) => load_config_path(p),
        None => FleetConfig::from_env().context("no --config given"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let cfg = load_config(cli.config.as_ref())?;

    match cli.cmd {
        Cmd::Serve { listen } => {
            migrate::run_all(&cfg.database_url)?;
            let addr = listen.unwrap_or(cfg.listen);
            let state = AppState::new(cfg.database_url.as_str(), Clock::System(cfg.timezone()?));

            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("bind {addr}"))?;
            tracing::info!(%addr, timezone = %cfg.timezone, "fleet ledger listening");
            axum::serve(listener, api::router(state)).await?;
        }
        Cmd::Migrate => {
            migrate::run_all(&cfg.database_url)?;
            tracing::info!("migrations up to date");
        }
        Cmd::Seed { file, dry_run } => {
            let (seed, normalization) = load_seed_path(&file)?;
            for dropped in &normalization.dropped {
                tracing::warn!(%dropped, "seed entry skipped");
            }

            migrate::run_all(&cfg.database_url)?;
            let mut conn = connection::connect_sqlite(&cfg.database_url)?;
            let report = apply_seed(&mut conn, &seed, SeedOptions { dry_run })?;
            print!("{report}");
        }
    }

    Ok(())
}
