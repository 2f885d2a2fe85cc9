//! # Stockroom Application Library
//!
//! Wires configuration, the inventory store, the catalog loader and the
//! interactive console together.
//!
//! ## Module Organization
//! ```text
//! stockroom_lib/
//! ├── lib.rs          ◄─── You are here (startup & console loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── inventory.rs◄─── Shared store + catalog loader
//! │   ├── view.rs     ◄─── Current query + memoized list
//! │   └── config.rs   ◄─── Loaded configuration
//! ├── commands/       ◄─── catalog, product, view, dashboard
//! ├── console/        ◄─── Line parsing and rendering
//! ├── notify.rs       ◄─── Toast notifications from store events
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod console;
pub mod error;
pub mod notify;
pub mod state;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use stockroom_catalog::{source_from_config, CatalogConfig, CatalogSource, FileCatalogSource};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use console::{Console, Outcome};
use error::ApiError;
use state::{ConfigState, InventoryState, ViewState};

const PROMPT: &str = "stockroom> ";

/// Command-line options.
#[derive(Debug, Default, Parser)]
#[command(name = "stockroom")]
#[command(about = "Track stock levels and deliveries for a product catalog", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: platform config dir, catalog.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Catalog URL, overrides the configured one
    #[arg(long, conflicts_with = "file")]
    pub url: Option<String>,

    /// Read the catalog from a local JSON file instead
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Runs the application until the user quits or stdin closes.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load config: defaults → catalog.toml → STOCKROOM_* env → --url     │
/// │  2. Build the catalog source (HTTP or file)                            │
/// │  3. Create state objects and the console                               │
/// │  4. Load the catalog once (failure is reported, not fatal)             │
/// │  5. Read commands from stdin                                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> Result<(), ApiError> {
    info!("Starting Stockroom");

    let config = load_config(&cli)?;
    let source: Arc<dyn CatalogSource> = match &cli.file {
        Some(path) => Arc::new(FileCatalogSource::new(path.clone())),
        None => source_from_config(&config)?,
    };
    info!(source = %source.describe(), "Catalog source ready");

    let console = Console::new(
        InventoryState::new(source),
        ViewState::new(),
        ConfigState::new(config),
    );

    let mut stdout = tokio::io::stdout();
    let startup = console.execute("load").await;
    if let Outcome::Output(text) = startup {
        write_line(&mut stdout, &text).await?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout
            .write_all(PROMPT.as_bytes())
            .await
            .map_err(io_error)?;
        stdout.flush().await.map_err(io_error)?;

        let Some(line) = lines.next_line().await.map_err(io_error)? else {
            break;
        };

        match console.execute(&line).await {
            Outcome::Output(text) => write_line(&mut stdout, &text).await?,
            Outcome::Quit => break,
        }
    }

    info!("Stockroom stopped");
    Ok(())
}

fn load_config(cli: &Cli) -> Result<CatalogConfig, ApiError> {
    let mut config = match &cli.config {
        Some(path) => CatalogConfig::load(Some(path.clone()))?,
        None => CatalogConfig::load_or_default(None),
    };

    if let Some(url) = &cli.url {
        config.source.url = url.clone();
        config.validate()?;
    }
    if cli.file.is_some() && cli.url.is_none() {
        warn!("--file given, configured catalog URL is ignored");
    }
    Ok(config)
}

async fn write_line(stdout: &mut tokio::io::Stdout, text: &str) -> Result<(), ApiError> {
    if text.is_empty() {
        return Ok(());
    }
    stdout.write_all(text.as_bytes()).await.map_err(io_error)?;
    stdout.write_all(b"\n").await.map_err(io_error)?;
    Ok(())
}

fn io_error(e: std::io::Error) -> ApiError {
    ApiError::internal(format!("Console I/O failed: {}", e))
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so they never interleave with console output.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=stockroom_store=trace` - Trace one crate only
/// - Default: `info,stockroom=debug`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,stockroom=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
