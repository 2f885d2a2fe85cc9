//! Console line grammar.
//!
//! A line is split shell-style (double or single quotes group words) and
//! then parsed by clap as if it were a command line without a program name.

use clap::{Parser, Subcommand, ValueEnum};
use stockroom_core::ProductId;

/// One parsed console line.
#[derive(Debug, Parser)]
#[command(
    name = "stockroom",
    no_binary_name = true,
    disable_version_flag = true,
    override_usage = "<COMMAND> [ARGS]"
)]
pub struct ConsoleLine {
    #[command(subcommand)]
    pub command: ConsoleCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConsoleCommand {
    /// Fetch the catalog again
    Load,

    /// Show catalog source and load state
    Status,

    /// List products for the current view
    #[command(alias = "ls")]
    List,

    /// Show one product
    Show { id: ProductId },

    /// Add a product
    Add(AddArgs),

    /// Change fields of a product (stock moves only through deliver)
    Update(UpdateArgs),

    /// Record units arriving (default 1)
    Deliver { id: ProductId, amount: Option<i64> },

    /// Search name, description and SKU (no words clears the search)
    Search { words: Vec<String> },

    /// Restrict the list to a department ("all" clears)
    #[command(alias = "dept")]
    Department { name: String },

    /// Only show products at or below the low-stock threshold
    LowStock {
        #[arg(value_enum, default_value_t = Toggle::On)]
        state: Toggle,
    },

    /// Order the list by name, price or stock
    Sort {
        key: String,
        direction: Option<String>,
    },

    /// Clear search, filters and sort
    Reset,

    /// Follow a link such as /products?department=toys
    Open { location: String },

    /// Dashboard totals
    Summary,

    /// Department cards
    Departments,

    /// Leave the console
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

#[derive(Debug, clap::Args)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub department: String,
    #[arg(long)]
    pub description: String,
    /// Decimal amount, e.g. 12.50
    #[arg(long)]
    pub price: String,
    #[arg(long, default_value_t = 0)]
    pub stock: i64,
    #[arg(long)]
    pub sku: String,
    #[arg(long)]
    pub supplier: String,
    #[arg(long)]
    pub image_url: String,
    #[arg(long)]
    pub delivered: Option<i64>,
}

#[derive(Debug, clap::Args)]
pub struct UpdateArgs {
    pub id: ProductId,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub department: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Decimal amount, e.g. 12.50
    #[arg(long)]
    pub price: Option<String>,
    #[arg(long)]
    pub sku: Option<String>,
    #[arg(long)]
    pub supplier: Option<String>,
    #[arg(long)]
    pub image_url: Option<String>,
}

/// Splits a line into words, honoring single and double quotes.
///
/// Backslash escapes the next character inside double quotes and outside
/// quotes. Returns `Err` with a message on an unterminated quote.
pub fn split_line(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some('\''), '\'') | (Some('"'), '"') => quote = None,
            (Some('"'), '\\') | (None, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
                in_word = true;
            }
            (Some(_), c) => current.push(c),
            (None, '\'') | (None, '"') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(format!("Unterminated {} quote", q));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
