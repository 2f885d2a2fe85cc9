//! # View Commands
//!
//! Each control on the product list screen changes one part of the query.
//! The list itself is read back with [`super::product::list_products`].

use stockroom_core::{DepartmentFilter, ProductQuery, SortDirection, SortKey};
use tracing::debug;

use crate::error::ApiError;
use crate::state::ViewState;

/// Search box.
pub fn set_search(view: &ViewState, term: &str) -> Result<ProductQuery, ApiError> {
    debug!(term, "set_search");
    Ok(view.update_query(|q| q.search_term = term.to_string()))
}

/// Department dropdown. `"all"` or blank clears the restriction.
pub fn set_department(view: &ViewState, department: &str) -> Result<ProductQuery, ApiError> {
    debug!(department, "set_department");
    let filter = DepartmentFilter::parse(department);
    Ok(view.update_query(|q| q.department = filter))
}

/// Low-stock checkbox.
pub fn set_low_stock_only(view: &ViewState, enabled: bool) -> Result<ProductQuery, ApiError> {
    debug!(enabled, "set_low_stock_only");
    Ok(view.update_query(|q| q.low_stock_only = enabled))
}

/// Sort dropdown and direction toggle.
///
/// `key` accepts `name`, `price` or `stock`; `direction` defaults to
/// ascending.
pub fn set_sort(
    view: &ViewState,
    key: &str,
    direction: Option<&str>,
) -> Result<ProductQuery, ApiError> {
    let key: SortKey = key.parse().map_err(ApiError::invalid_input)?;
    let direction: SortDirection = match direction {
        Some(d) => d.parse().map_err(ApiError::invalid_input)?,
        None => SortDirection::Asc,
    };
    debug!(%key, ?direction, "set_sort");

    Ok(view.update_query(|q| {
        q.sort_key = key;
        q.sort_direction = direction;
    }))
}

/// Back to the unfiltered list sorted by name.
pub fn reset_view(view: &ViewState) -> Result<ProductQuery, ApiError> {
    debug!("reset_view");
    Ok(view.update_query(|q| *q = ProductQuery::default()))
}

/// Follows a department browse link such as `/products?department=toys`.
///
/// Only the department is taken from the link; the rest of the query is
/// kept.
pub fn open_location(view: &ViewState, location: &str) -> Result<ProductQuery, ApiError> {
    debug!(location, "open_location");
    Ok(view.update_query(|q| q.seed_from_location(location)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controls_update_query() {
        let view = ViewState::new();

        set_search(&view, "whisk").unwrap();
        set_department(&view, "Kitchen").unwrap();
        set_low_stock_only(&view, true).unwrap();
        let query = set_sort(&view, "price", Some("desc")).unwrap();

        assert_eq!(query.search_term, "whisk");
        assert_eq!(query.department, DepartmentFilter::Named("Kitchen".to_string()));
        assert!(query.low_stock_only);
        assert_eq!(query.sort_key, SortKey::Price);
        assert_eq!(query.sort_direction, SortDirection::Desc);
        assert_eq!(view.query(), query);

        assert_eq!(reset_view(&view).unwrap(), ProductQuery::default());
    }

    #[test]
    fn test_all_department_clears_filter() {
        let view = ViewState::new();
        set_department(&view, "Toys").unwrap();
        let query = set_department(&view, "ALL").unwrap();
        assert_eq!(query.department, DepartmentFilter::All);
    }

    #[test]
    fn test_bad_sort_key_is_invalid_input() {
        let view = ViewState::new();
        let err = set_sort(&view, "colour", None).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::InvalidInput);
        assert_eq!(view.query().sort_key, SortKey::Name);
    }

    #[test]
    fn test_open_location_keeps_search() {
        let view = ViewState::new();
        set_search(&view, "kite").unwrap();
        let query = open_location(&view, "/products?department=toys").unwrap();
        assert_eq!(query.search_term, "kite");
        assert_eq!(query.department, DepartmentFilter::Named("toys".to_string()));
    }
}
