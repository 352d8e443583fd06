pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod routes;

pub use routes::AppState;

/// Create the app router for testing.
///
/// Builds the full Axum router with a fixed test JWT secret, useful for
/// integration testing without starting the full server.
pub fn create_app(pool: sqlx::SqlitePool) -> axum::Router {
    let state = AppState {
        pool,
        jwt_secret: "test-secret-key-at-least-32-bytes!!".to_string(),
        token_ttl: 24 * 60 * 60,
    };

    routes::router(state)
}
