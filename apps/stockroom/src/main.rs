//! # Stockroom Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           stockroom                                     │
//! │                                                                         │
//! │  main.rs ────► parse CLI, start logging, hand over to lib.rs           │
//! │  lib.rs ─────► config, catalog source, state, console loop            │
//! │  commands/ ──► load_catalog, list_products, record_delivery, ...      │
//! │  state/ ─────► InventoryState, ViewState, ConfigState                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use stockroom_lib::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    stockroom_lib::init_tracing();

    if let Err(e) = stockroom_lib::run(cli).await {
        eprintln!("stockroom: {}", e);
        std::process::exit(1);
    }
}
