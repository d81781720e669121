pub mod auth;
pub mod cart_cookie;
pub mod config;
pub mod email;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod queries;
pub mod routes;

pub use routes::AppState;

/// JWT secret used by [`create_app`].
pub const TEST_JWT_SECRET: &str = "test_secret_key_minimum_32_characters_long";

/// Create app router for testing
///
/// Wires the full router over the given pool and executor with test
/// configuration: an instant payment gateway and a local SMTP endpoint.
/// Integration tests drive this router directly without a listening server.
pub async fn create_app(
    query_pool: sqlx::SqlitePool,
    evento: evento::Sqlite,
) -> anyhow::Result<axum::Router> {
    use std::sync::Arc;
    use std::time::Duration;

    let email_config = email::EmailConfig {
        smtp_host: "localhost".to_string(),
        smtp_port: 1025,
        smtp_username: String::new(),
        smtp_password: String::new(),
        from_email: "test@skillshelf.app".to_string(),
        from_name: "skillshelf".to_string(),
    };

    let state = AppState {
        evento,
        query_pool,
        jwt_secret: TEST_JWT_SECRET.to_string(),
        jwt_expiration_days: 7,
        email_config,
        base_url: "http://localhost:3000".to_string(),
        gateway: Arc::new(skillshelf_access::SimulatedGateway::new(
            Duration::from_millis(0),
        )),
    };

    Ok(routes::router(state))
}
