//! Hotel Desk CLI
//!
//! Runs the interactive front desk on the terminal, plus a couple of
//! housekeeping commands:
//! - `desk` (default): sign in and manage clients and reservations
//! - `status`: check the backend and the stored session
//! - `config`: print or write the default configuration

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hotel_desk::backend::{Backend, HttpBackend, HttpBackendConfig};
use hotel_desk::config::{generate_default_config, Config, LoggingConfig};
use hotel_desk::session::{FileTokenStore, TokenStore};
use hotel_desk::shell::{Shell, Terminal};

#[derive(Parser)]
#[command(name = "hotel-desk")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Front desk for hotel workers: clients, rooms and reservations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Reservation backend URL (overrides the config file)
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    /// Config file (default: searched in the usual locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive desk
    Desk,

    /// Check the backend and the stored session
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Config { output }) = &cli.command {
        let config = generate_default_config();
        match output {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, &config)?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", config),
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.backend_url {
        config.backend.url = url;
    }

    init_logging(&config.logging)?;
    tracing::info!("Hotel Desk v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(Commands::Status) => status(&config).await,
        _ => desk(&config).await,
    }
}

fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hotel_desk={}", config.level)));

    let writer = match &config.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Cannot open log file {}", path))?;
            BoxMakeWriter::new(Arc::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(config.file.is_none());

    if config.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init()?;
    }
    Ok(())
}

async fn desk(config: &Config) -> anyhow::Result<()> {
    let backend = HttpBackend::new(HttpBackendConfig::from(&config.backend))?;
    let store = FileTokenStore::new(&config.session.token_file);
    tracing::info!(
        backend = %config.backend.url,
        token_file = %store.path().display(),
        "Opening desk"
    );

    let terminal = Terminal::new(std::io::stdin().lock(), std::io::stdout());
    Shell::new(backend, store, terminal).run().await?;
    Ok(())
}

async fn status(config: &Config) -> anyhow::Result<()> {
    let backend = HttpBackend::new(HttpBackendConfig::from(&config.backend))?;

    println!("Hotel Desk v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Backend: {}", config.backend.url);

    match backend.health().await {
        Ok(health) => println!("Backend status: {}", health.status),
        Err(e) => {
            eprintln!("Cannot reach the reservation backend at {}", config.backend.url);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    let store = FileTokenStore::new(&config.session.token_file);
    match store.load()? {
        None => println!("Session: not signed in"),
        Some(token) => match backend.profile(&token).await {
            Ok(worker) => println!(
                "Session: {} <{}> at {}",
                worker.name, worker.email, worker.hotel_name
            ),
            Err(e) if e.is_unauthorized() => println!("Session: expired, sign in again"),
            Err(e) => println!("Session: could not be verified ({})", e),
        },
    }

    Ok(())
}
