use std::process::ExitCode;

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;

use expense_tracker::{AppState, ServerConfig, build_router, graceful_shutdown, init_tracing};

/// The REST API server for the expense tracker.
#[tokio::main]
async fn main() -> ExitCode {
    let config = ServerConfig::parse();

    init_tracing();

    let state = match AppState::open(config.database_url.as_deref(), !config.no_seed) {
        Ok(state) => state,
        Err(error) => {
            tracing::error!("Could not set up the expense store: {error}");
            return ExitCode::FAILURE;
        }
    };

    let addr = config.socket_addr();

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state));

    tracing::info!("HTTP server listening on {}", addr);
    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server error: {error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but `Error` already
        // logs the cause of every 5xx.
        .on_failure(());

    router.layer(tracing_layer)
}
