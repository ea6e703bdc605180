//! HTTP service for an issuedesk workspace.
//!
//! Exposes the record store and query engine to a browser front end.
//!
//! # Routes
//!
//! - `GET /health`
//! - `GET /issues?search&status&priority&assignee&sortBy&sortOrder&page&pageSize`
//!   (`q` and `sortDir` are accepted as aliases)
//! - `POST /issues`
//! - `GET /issues/{id}`
//! - `PUT /issues/{id}`
//!
//! CORS is permissive: the front end is served from another origin.

pub mod error;
pub mod models;
mod routes;
pub mod state;

pub use error::{Error, Result};
pub use state::AppState;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;

/// Build the router over `state`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route(
            "/issues",
            get(routes::list_issues).post(routes::create_issue),
        )
        .route(
            "/issues/{id}",
            get(routes::get_issue).put(routes::update_issue),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
