use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;

use crate::auth::{AUTH_COOKIE_NAME, TokenPurpose, validate_token};
use crate::routes::AppState;

/// Auth extension containing the signed-in user extracted from the session
/// cookie.
#[derive(Clone, Debug)]
pub struct Auth {
    pub user_id: String,
    pub email: String,
}

fn login_redirect(req: &Request) -> Response {
    let next = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let location = format!("/login?next={}", urlencoding::encode(next));
    (StatusCode::SEE_OTHER, [("Location", location)]).into_response()
}

/// Authentication middleware that validates the session JWT from the cookie.
///
/// Verifies the user still exists in the read model, then inserts an [`Auth`]
/// extension. Redirects to /login (preserving the requested path as `next`)
/// if:
/// - Cookie is missing
/// - Token is invalid, expired, or not a session token
/// - User does not exist in read model (deleted or not yet synced)
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let token = match jar.get(AUTH_COOKIE_NAME) {
        Some(cookie) => cookie.value(),
        None => {
            return login_redirect(&req);
        }
    };

    let claims = match validate_token(token, &state.jwt_secret, TokenPurpose::Session) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(error = %e, "Invalid session token, redirecting to login");
            return login_redirect(&req);
        }
    };

    // The read model is the source of truth for who exists; a valid token
    // for a deleted or not-yet-synced user does not get through.
    match crate::queries::user::get_user(&state.query_pool, &claims.sub).await {
        Ok(Some(user)) => {
            req.extensions_mut().insert(Auth {
                user_id: user.id,
                email: user.email,
            });
            next.run(req).await
        }
        Ok(None) => {
            tracing::warn!(user_id = %claims.sub, "Session user not in read model, redirecting to login");
            login_redirect(&req)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to look up session user, redirecting to login");
            login_redirect(&req)
        }
    }
}
