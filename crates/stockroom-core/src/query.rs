//! # View Pipeline
//!
//! Produces the ordered product list a screen displays from a collection
//! snapshot and a [`ProductQuery`].
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        apply_query(products, query)                     │
//! │                                                                         │
//! │  collection snapshot (&[Product], never mutated)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. Search      term empty, or substring of name | description | sku   │
//! │       │         (case-insensitive)                                      │
//! │       ▼                                                                 │
//! │  2. Department  "all", or case-insensitive equality                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. Stock       !low_stock_only, or stock <= 10                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  4. Sort        name (collation) | price | stock, asc | desc           │
//! │       │         stable: equal keys keep collection order               │
//! │       ▼                                                                 │
//! │  Vec<Product> (fresh clones, owned by the caller)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pipeline never fails: an unknown department or an odd search term
//! simply matches nothing.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::types::Product;
use crate::ALL_DEPARTMENTS;

// =============================================================================
// Department Filter
// =============================================================================

/// Which department the list is restricted to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DepartmentFilter {
    /// No restriction.
    #[default]
    All,
    /// Products whose department equals this label, ignoring case.
    Named(String),
}

impl DepartmentFilter {
    /// Parses a filter value. Empty and `"all"` (any case) mean no restriction.
    ///
    /// Any other value is kept verbatim and compared for case-insensitive
    /// equality, so `" Toys"` matches no department.
    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value.eq_ignore_ascii_case(ALL_DEPARTMENTS) {
            DepartmentFilter::All
        } else {
            DepartmentFilter::Named(value.to_string())
        }
    }

    /// Returns true if `product` passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            DepartmentFilter::All => true,
            DepartmentFilter::Named(name) => product.in_department(name),
        }
    }
}

impl From<String> for DepartmentFilter {
    fn from(value: String) -> Self {
        DepartmentFilter::parse(&value)
    }
}

impl From<DepartmentFilter> for String {
    fn from(filter: DepartmentFilter) -> Self {
        filter.to_string()
    }
}

impl fmt::Display for DepartmentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepartmentFilter::All => write!(f, "{}", ALL_DEPARTMENTS),
            DepartmentFilter::Named(name) => write!(f, "{}", name),
        }
    }
}

// =============================================================================
// Sort Key / Direction
// =============================================================================

/// Field the list is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Collation order of the product name.
    #[default]
    Name,
    /// Numeric price.
    Price,
    /// Numeric stock level.
    Stock,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "price" => Ok(SortKey::Price),
            "stock" => Ok(SortKey::Stock),
            other => Err(format!(
                "Unknown sort key: '{}'. Valid options: name, price, stock",
                other
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Name => write!(f, "name"),
            SortKey::Price => write!(f, "price"),
            SortKey::Stock => write!(f, "stock"),
        }
    }
}

/// Ascending or descending order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            other => Err(format!(
                "Unknown sort direction: '{}'. Valid options: asc, desc",
                other
            )),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

// =============================================================================
// Product Query
// =============================================================================

/// Search, filter and sort parameters for the product list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductQuery {
    /// Free text matched against name, description and SKU.
    pub search_term: String,
    /// Department restriction.
    pub department: DepartmentFilter,
    /// Only show products at or below the low-stock threshold.
    pub low_stock_only: bool,
    /// Ordering field.
    pub sort_key: SortKey,
    /// Ordering direction.
    pub sort_direction: SortDirection,
}

impl ProductQuery {
    /// Builds the initial query for a screen entered through `location`.
    ///
    /// ## Department Links
    /// The department browser links to `/products?department=kitchen`.
    /// Only the `department` parameter is read; everything else keeps its
    /// default. Relative paths are accepted. A location that cannot be
    /// parsed yields the default query.
    ///
    /// ```rust
    /// use stockroom_core::query::{DepartmentFilter, ProductQuery};
    ///
    /// let query = ProductQuery::from_location("/products?department=kitchen");
    /// assert_eq!(query.department, DepartmentFilter::Named("kitchen".into()));
    /// ```
    pub fn from_location(location: &str) -> Self {
        let mut query = ProductQuery::default();
        query.seed_from_location(location);
        query
    }

    /// Overwrites `department` from the location's query string, if present.
    pub fn seed_from_location(&mut self, location: &str) {
        let parsed = Url::parse(location).or_else(|_| {
            Url::parse("http://localhost/").and_then(|base| base.join(location))
        });

        if let Ok(url) = parsed {
            if let Some((_, value)) = url.query_pairs().find(|(key, _)| key == "department") {
                self.department = DepartmentFilter::parse(&value);
            }
        }
    }

    /// Sets the search term.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Restricts to a department (`"all"` clears the restriction).
    pub fn in_department(mut self, department: &str) -> Self {
        self.department = DepartmentFilter::parse(department);
        self
    }

    /// Only keep low-stock products.
    pub fn low_stock_only(mut self) -> Self {
        self.low_stock_only = true;
        self
    }

    /// Orders by `key`, keeping the current direction.
    pub fn sorted_by(mut self, key: SortKey) -> Self {
        self.sort_key = key;
        self
    }

    /// Reverses the comparator.
    pub fn descending(mut self) -> Self {
        self.sort_direction = SortDirection::Desc;
        self
    }

    /// Returns true if `product` survives steps 1–3 of the pipeline.
    pub fn matches(&self, product: &Product) -> bool {
        matches_search(product, &normalize_search_term(&self.search_term))
            && self.department.matches(product)
            && (!self.low_stock_only || product.is_low_stock())
    }
}

// =============================================================================
// Pipeline
// =============================================================================

/// Runs the View Pipeline over a collection snapshot.
///
/// Same inputs always produce the same output. The returned products are
/// clones, so the caller may modify them freely without touching the store.
pub fn apply_query(products: &[Product], query: &ProductQuery) -> Vec<Product> {
    let needle = normalize_search_term(&query.search_term);

    let mut visible: Vec<Product> = products
        .iter()
        .filter(|p| matches_search(p, &needle))
        .filter(|p| query.department.matches(p))
        .filter(|p| !query.low_stock_only || p.is_low_stock())
        .cloned()
        .collect();

    // sort_by is stable, so a reversed comparator keeps ties in input order.
    visible.sort_by(|a, b| {
        let ordering = compare_by(query.sort_key, a, b);
        match query.sort_direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    visible
}

/// Lower-cased search term. Only the empty string means "no search";
/// whitespace is part of the substring.
fn normalize_search_term(term: &str) -> String {
    term.to_lowercase()
}

fn matches_search(product: &Product, needle: &str) -> bool {
    needle.is_empty()
        || product.name.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
        || product.sku.to_lowercase().contains(needle)
}

fn compare_by(key: SortKey, a: &Product, b: &Product) -> Ordering {
    match key {
        SortKey::Name => compare_names(&a.name, &b.name),
        SortKey::Price => a.price_cents.cmp(&b.price_cents),
        SortKey::Stock => a.stock.cmp(&b.stock),
    }
}

/// Collation-style name comparison.
///
/// Letters compare case-insensitively first; names that differ only by case
/// put the lower-case spelling first ("apple" < "Apple" < "banana"), the way
/// a browser's default locale collation orders them.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

// =============================================================================
// Unit Tests
// =============================================================================
