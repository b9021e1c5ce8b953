//! Job board service, CLI server
//!
//! ```sh
//! # Run with default config (~/.config/jobboard/config.toml)
//! jobboard-service
//!
//! # Custom config path
//! jobboard-service --config /etc/jobboard/config.toml
//!
//! # Override the port
//! jobboard-service --port 8080
//!
//! # Validate config without starting
//! jobboard-service --check
//!
//! # Write the effective config to the config path and exit
//! jobboard-service --init --port 8080
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use jobboard::config::AppConfig;
use jobboard::server::{init_tracing, ServerHandle, ServerOptions};

/// User authentication and job postings REST API.
#[derive(Parser, Debug)]
#[command(
    name = "jobboard-service",
    version,
    about = "Job board REST API (users + jobs) backed by MongoDB",
    long_about = "Job board REST API: signup/login with JWT bearer tokens and \
                  job posting CRUD backed by MongoDB.\n\n\
                  Default config: ~/.config/jobboard/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "JOBBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Use the in-memory store instead of MongoDB.
    #[arg(long)]
    memory: bool,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Write the effective configuration to the config path and exit.
    #[arg(long)]
    init: bool,

    /// Skip creating MongoDB indexes on startup.
    #[arg(long)]
    no_indexes: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(jobboard::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => {
            let mut cfg = AppConfig::default();
            cfg.apply_env_overrides();
            (cfg, Some(e))
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if cli.memory {
        config.database.driver = jobboard::config::DbDriver::Memory;
    }

    init_tracing(&config);
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    if cli.init {
        config.validate()?;
        config.save(&config_path)?;
        println!("Configuration written to {}", config_path.display());
        return Ok(());
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        config.validate()?;
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.listen_address());
        println!("   Storage     : {}", config.database.driver);
        println!("   Database    : {} / {}", config.database.redacted_uri(), config.database.name);
        println!("   Jobs auth   : {}", config.jobs.require_auth);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        ensure_indexes: !cli.no_indexes,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
