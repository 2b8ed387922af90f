use axum::Router;

pub mod cheeses;
pub mod common;
pub mod producers;
pub mod system;

/// Router for all resource endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/producers", producers::router())
        .nest("/cheeses", cheeses::router())
}
