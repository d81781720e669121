use std::sync::Arc;

use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use skillshelf_access::PaymentGateway;
use sqlx::SqlitePool;

use crate::middleware::auth_middleware;

pub mod about;
pub mod assets;
pub mod cart;
pub mod checkout;
pub mod collections;
pub mod dashboard;
pub mod downloads;
pub mod health;
pub mod index;
pub mod library;
pub mod login;
pub mod module_detail;
pub mod playback;
pub mod subscription;

/// Shared application state for all route handlers
#[derive(Clone)]
pub struct AppState {
    pub evento: evento::Sqlite,
    pub query_pool: SqlitePool,
    pub jwt_secret: String,
    pub jwt_expiration_days: i64,
    pub email_config: crate::email::EmailConfig,
    pub base_url: String,
    pub gateway: Arc<dyn PaymentGateway>,
}

/// Render an askama template into a response, logging render failures.
pub fn render_template<T: askama::Template>(template: T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Failed to render template");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}

/// Entitlements for the signed-in user, fetched fresh per request.
///
/// A fetch failure is logged and read as "no access" for this render only;
/// the page still serves.
pub(crate) async fn load_entitlements(
    state: &AppState,
    user_id: &str,
) -> Vec<skillshelf_access::Entitlement> {
    match crate::queries::entitlement::list_for_user(&state.query_pool, user_id).await {
        Ok(entitlements) => entitlements,
        Err(e) => {
            tracing::error!(error = %e, user_id = %user_id, "Failed to load entitlements");
            Vec::new()
        }
    }
}

#[derive(askama::Template)]
#[template(path = "pages/not_found.html")]
struct NotFoundTemplate;

async fn fallback() -> Response {
    let mut response = render_template(NotFoundTemplate);
    *response.status_mut() = StatusCode::NOT_FOUND;
    response
}

/// Build the full application router.
///
/// Catalog, cart, checkout and subscription pages are public; the member
/// area (dashboard, playback, collections, downloads) and the actions that
/// grant access sit behind the auth middleware.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/dashboard", get(dashboard::get_dashboard))
        .route("/collections", get(collections::get_collections))
        .route("/downloads", get(downloads::get_downloads))
        .route("/watch/{id}", get(playback::get_playback))
        .route("/checkout", post(checkout::post_checkout))
        .route("/subscription/subscribe", post(subscription::post_subscribe))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/", get(index::get_index))
        .route("/library", get(library::get_library))
        .route("/library/{id}", get(module_detail::get_module_detail))
        .route("/cart/add/{id}", post(cart::post_add))
        .route("/cart/remove/{id}", post(cart::post_remove))
        .route("/cart/clear", post(cart::post_clear))
        .route("/checkout", get(checkout::get_checkout))
        .route("/subscription", get(subscription::get_subscription))
        .route("/about", get(about::get_about))
        .route("/login", get(login::get_login).post(login::post_login))
        .route("/auth/confirm", get(login::get_confirm))
        .route("/logout", post(login::post_logout))
        .route("/static/{*path}", get(assets::get_asset))
        .merge(protected)
        .fallback(fallback)
        .with_state(state)
}
