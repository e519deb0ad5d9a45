//! Application router configuration.

use axum::{
    Router, middleware,
    routing::get,
};
use tower_http::cors::CorsLayer;

use crate::{
    AppState, endpoints,
    expense::{
        create_expense_endpoint, get_total_endpoint, get_totals_by_category_endpoint,
        list_expenses_endpoint,
    },
    logging::logging_middleware,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::EXPENSES_API,
            get(list_expenses_endpoint).post(create_expense_endpoint),
        )
        .route(endpoints::EXPENSES_TOTAL, get(get_total_endpoint))
        .route(
            endpoints::EXPENSES_BY_CATEGORY,
            get(get_totals_by_category_endpoint),
        )
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        // The client may be served from a different origin.
        .layer(CorsLayer::permissive())
        .with_state(state)
}
