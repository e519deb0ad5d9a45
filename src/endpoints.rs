//! The API endpoints URIs.

/// The route to list and create expenses.
pub const EXPENSES_API: &str = "/api/expenses";
/// The route for the total amount spent within a date range.
pub const EXPENSES_TOTAL: &str = "/api/expenses/total";
/// The route for totals and counts grouped by category.
pub const EXPENSES_BY_CATEGORY: &str = "/api/expenses/by-category";

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::EXPENSES_API);
        assert_endpoint_is_valid_uri(endpoints::EXPENSES_TOTAL);
        assert_endpoint_is_valid_uri(endpoints::EXPENSES_BY_CATEGORY);
    }

    #[test]
    fn aggregation_routes_are_nested_under_expenses() {
        assert!(endpoints::EXPENSES_TOTAL.starts_with(endpoints::EXPENSES_API));
        assert!(endpoints::EXPENSES_BY_CATEGORY.starts_with(endpoints::EXPENSES_API));
    }
}
