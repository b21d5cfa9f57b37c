//! Main entry point for the rank-ladder engine daemon
//!
//! Initialises logging and configuration, then runs the periodic rating
//! sweeps (inactivity decay and, when enabled, the soft reset) against the
//! configured store until shutdown. Pairing and result recording are invoked
//! per request by the surrounding service; this binary owns only the
//! scheduled ticks.

use anyhow::Result;
use clap::Parser;
use rank_ladder::config::AppConfig;
use rank_ladder::rating::EloEngine;
use rank_ladder::store::{MemoryStore, PlayerStore};
use rank_ladder::utils::current_date;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

/// Rank Ladder Engine - rating sweeps for competitive ladders
#[derive(Parser)]
#[command(
    name = "rank-ladder",
    version,
    about = "Matchmaking and rating engine daemon for competitive ladders"
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(
        long,
        help = "Validate configuration and exit without starting the daemon"
    )]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    Ok(config)
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C) signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}

/// Tick an optional interval; a disabled sweep never fires
async fn tick_or_pending(timer: &mut Option<tokio::time::Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

/// Decay the ratings of inactive players and persist the updates
async fn run_decay_sweep(store: &Arc<MemoryStore>, engine: &EloEngine) -> Result<usize> {
    let players = store.all_players().await?;
    let updates = engine.apply_decay(&players, current_date());
    for update in &updates {
        store.update_rating(update.player_id, update.new_rating).await?;
    }
    Ok(updates.len())
}

/// Pull every rating halfway back toward the default and persist the updates
async fn run_regression_sweep(store: &Arc<MemoryStore>, engine: &EloEngine) -> Result<usize> {
    let players = store.all_players().await?;
    let updates = engine.apply_regression(&players);
    for update in &updates {
        store.update_rating(update.player_id, update.new_rating).await?;
    }
    Ok(updates.len())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Rank Ladder Engine v{}", rank_ladder::VERSION);
    info!("   Service: {}", config.service.name);
    info!("   Log level: {}", config.service.log_level);
    info!(
        "   Decay sweep interval: {}s",
        config.scheduler.decay_interval_seconds
    );
    info!(
        "   Regression sweep: {}",
        match config.regression_interval() {
            Some(interval) => format!("every {}s", interval.as_secs()),
            None => "disabled".to_string(),
        }
    );

    if args.dry_run {
        info!("Configuration validation successful");
        info!("Dry run completed - exiting without starting the daemon");
        return Ok(());
    }

    let store = Arc::new(MemoryStore::new());
    let engine = match EloEngine::new(config.rating.clone()) {
        Ok(engine) => engine,
        Err(e) => {
            error!("Failed to initialize rating engine: {}", e);
            std::process::exit(1);
        }
    };

    let mut decay_timer = tokio::time::interval(config.decay_interval());
    // The first tick of a tokio interval fires immediately; sweeps should
    // wait a full period
    decay_timer.tick().await;

    let mut regression_timer = config
        .regression_interval()
        .map(tokio::time::interval);
    if let Some(timer) = regression_timer.as_mut() {
        timer.tick().await;
    }

    info!("Rank Ladder Engine is running, press Ctrl+C to shut down");

    loop {
        tokio::select! {
            _ = decay_timer.tick() => {
                match run_decay_sweep(&store, &engine).await {
                    Ok(count) => info!("Decay sweep complete: {} players decayed", count),
                    Err(e) => warn!("Decay sweep failed: {}", e),
                }
            }
            _ = tick_or_pending(&mut regression_timer) => {
                match run_regression_sweep(&store, &engine).await {
                    Ok(count) => info!("Regression sweep complete: {} players regressed", count),
                    Err(e) => warn!("Regression sweep failed: {}", e),
                }
            }
            _ = wait_for_shutdown_signal() => {
                break;
            }
        }
    }

    info!("Rank Ladder Engine stopped");
    Ok(())
}
