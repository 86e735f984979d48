use std::time::Duration;

pub mod assets;
pub mod auth;
pub mod config;
pub mod error;
pub mod observability;
pub mod routes;
pub mod session;

pub use routes::AppState;

/// Create the app router from a loaded configuration
///
/// Used by the server binary and by integration tests, which point the
/// backend base URL at a stub.
pub fn create_app(config: config::Config) -> anyhow::Result<axum::Router> {
    let api = platewise_client::ApiClient::new(
        &config.backend.base_url,
        Duration::from_secs(config.backend.timeout_secs),
        Duration::from_secs(config.backend.connect_timeout_secs),
    )?;

    let sessions = session::SessionStore::new(
        Duration::from_secs(config.session.ttl_minutes * 60),
        config.session.max_sessions,
    );

    let state = AppState {
        config,
        api,
        sessions,
    };

    Ok(routes::router(state))
}
