//! # Interactive Console
//!
//! Reads one command per line, runs it against the application state and
//! prints the result followed by any notifications the store raised.
//!
//! ```text
//! stdin line ──► split_line ──► ConsoleLine (clap) ──► commands::* ──► render
//!                                                                      │
//!                                   ToastEmitter::drain() ─────────────┘
//! ```

mod line;
mod render;

use std::sync::Arc;

use clap::Parser;
use stockroom_core::{FieldErrors, Money, ProductPatch, ValidationError};
use tracing::debug;

use crate::commands::{catalog, dashboard, product, view};
use crate::error::ApiError;
use crate::notify::ToastEmitter;
use crate::state::{ConfigState, InventoryState, ViewState};

pub use line::{split_line, ConsoleCommand, ConsoleLine, Toggle};

/// Result of one console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text to print (may be empty).
    Output(String),
    /// The user asked to leave.
    Quit,
}

/// Console bound to the application state.
pub struct Console {
    inventory: InventoryState,
    view: ViewState,
    config: ConfigState,
    toasts: Arc<ToastEmitter>,
}

impl Console {
    /// Creates a console and subscribes its toast emitter to the store.
    pub fn new(inventory: InventoryState, view: ViewState, config: ConfigState) -> Self {
        let toasts = Arc::new(ToastEmitter::new());
        inventory.subscribe(toasts.clone());
        Console {
            inventory,
            view,
            config,
            toasts,
        }
    }

    pub fn inventory(&self) -> &InventoryState {
        &self.inventory
    }

    /// Notifications raised since the last call.
    pub fn drain_toasts(&self) -> Vec<String> {
        self.toasts.drain().iter().map(ToString::to_string).collect()
    }

    /// Parses and runs one line.
    pub async fn execute(&self, input: &str) -> Outcome {
        let words = match split_line(input) {
            Ok(words) if words.is_empty() => return Outcome::Output(String::new()),
            Ok(words) => words,
            Err(message) => return Outcome::Output(render::error(&ApiError::invalid_input(message))),
        };

        let parsed = match ConsoleLine::try_parse_from(&words) {
            Ok(parsed) => parsed,
            // help and usage errors both render through clap
            Err(e) => return Outcome::Output(e.render().to_string().trim_end().to_string()),
        };

        debug!(command = ?parsed.command, "Console command");

        if matches!(parsed.command, ConsoleCommand::Quit) {
            return Outcome::Quit;
        }

        let body = match self.dispatch(parsed.command).await {
            Ok(text) => text,
            Err(e) => render::error(&e),
        };

        let mut lines = vec![body];
        lines.extend(self.drain_toasts());
        lines.retain(|l| !l.is_empty());
        Outcome::Output(lines.join("\n"))
    }

    async fn dispatch(&self, command: ConsoleCommand) -> Result<String, ApiError> {
        let text = match command {
            ConsoleCommand::Load => {
                render::load_summary(&catalog::load_catalog(&self.inventory).await?)
            }
            ConsoleCommand::Status => {
                render::catalog_status(&catalog::catalog_status(&self.inventory).await?)
            }
            ConsoleCommand::List => {
                render::product_table(&product::list_products(&self.inventory, &self.view)?)
            }
            ConsoleCommand::Show { id } => {
                render::product_details(&product::get_product(&self.inventory, id)?)
            }
            ConsoleCommand::Add(args) => {
                let input = product::NewProductInput {
                    name: args.name,
                    department: args.department,
                    description: args.description,
                    price: args.price,
                    stock: args.stock,
                    sku: args.sku,
                    supplier: args.supplier,
                    image_url: args.image_url,
                    delivered: args.delivered,
                };
                let added = product::add_product(&self.inventory, input)?;
                format!("Added product {} ({})", added.id, added.name)
            }
            ConsoleCommand::Update(args) => {
                let price_cents = args.price.as_deref().map(parse_price).transpose()?;
                let patch = ProductPatch {
                    name: args.name,
                    department: args.department,
                    description: args.description,
                    price_cents,
                    sku: args.sku,
                    supplier: args.supplier,
                    image_url: args.image_url,
                    ..ProductPatch::default()
                };
                if patch.is_empty() {
                    return Err(ApiError::invalid_input("Nothing to update"));
                }
                render::product_details(&product::update_product(&self.inventory, args.id, patch)?)
            }
            ConsoleCommand::Deliver { id, amount } => {
                let updated = product::record_delivery(&self.inventory, id, amount)?;
                format!(
                    "{} now has {} in stock ({} delivered in total)",
                    updated.name, updated.stock, updated.delivered
                )
            }
            ConsoleCommand::Search { words } => {
                view::set_search(&self.view, &words.join(" "))?;
                self.list()?
            }
            ConsoleCommand::Department { name } => {
                view::set_department(&self.view, &name)?;
                self.list()?
            }
            ConsoleCommand::LowStock { state } => {
                view::set_low_stock_only(&self.view, state == Toggle::On)?;
                self.list()?
            }
            ConsoleCommand::Sort { key, direction } => {
                view::set_sort(&self.view, &key, direction.as_deref())?;
                self.list()?
            }
            ConsoleCommand::Reset => {
                view::reset_view(&self.view)?;
                self.list()?
            }
            ConsoleCommand::Open { location } => {
                view::open_location(&self.view, &location)?;
                self.list()?
            }
            ConsoleCommand::Summary => render::dashboard(&dashboard::get_summary(&self.inventory)?),
            ConsoleCommand::Departments => {
                render::departments(&dashboard::get_departments(&self.inventory, &self.config)?)
            }
            ConsoleCommand::Quit => String::new(),
        };
        Ok(text)
    }

    fn list(&self) -> Result<String, ApiError> {
        Ok(render::product_table(&product::list_products(
            &self.inventory,
            &self.view,
        )?))
    }
}

fn parse_price(text: &str) -> Result<i64, ApiError> {
    Money::parse_decimal(text).map(|m| m.cents()).ok_or_else(|| {
        ApiError::from(FieldErrors::from(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: format!("'{}' is not a decimal amount", text.trim()),
        }))
    })
}
