//! Reservation expiry sweeper.
//!
//! Ending a reservation is never automatic: the core only retires expired
//! reservations when asked. This binary is the scheduler that asks - it
//! runs the sweep on a fixed interval until interrupted, or once with
//! `--once` for cron-style deployments.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use librarium::config;
use librarium::AppState;

#[derive(Parser)]
#[command(name = "librarium", version, about = "Library core reservation sweeper")]
struct Cli {
    /// Run a single sweep and exit instead of looping on the interval.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = config::load_from_env()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    if config.log_format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    config.print_summary();

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let state = AppState::new(pool, &config);

    if cli.once {
        let ended = state.reservations.end_expired_reservations().await?;
        tracing::info!(ended, "single sweep complete");
        return Ok(());
    }

    let mut ticker = tokio::time::interval(Duration::from_secs(config.sweep_interval_secs));
    tracing::info!(
        interval_secs = config.sweep_interval_secs,
        "reservation sweeper running"
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match state.reservations.end_expired_reservations().await {
                    Ok(ended) if ended > 0 => tracing::info!(ended, "sweep retired reservations"),
                    Ok(_) => tracing::debug!("sweep found nothing to retire"),
                    Err(e) => tracing::error!(error = %e, "sweep failed"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                break;
            }
        }
    }

    Ok(())
}
