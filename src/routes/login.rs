//! Magic-link sign-in: request a link, confirm it, sign out.

use askama::Template;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::{CookieJar, Form, Query};
use serde::Deserialize;
use skillshelf_user::command::{Command, RequestSignInInput, normalize_email};
use skillshelf_user::event::EventMetadata;
use tracing::{error, info, warn};
use validator::Validate;

use super::{AppState, render_template};
use crate::auth::{
    AUTH_COOKIE_NAME, TokenPurpose, generate_magic_token, generate_session_token, validate_token,
};
use crate::email::send_sign_in_email;
use crate::queries::user::get_user_by_email;

#[derive(Template)]
#[template(path = "pages/login.html")]
struct LoginTemplate {
    next: String,
    error: Option<String>,
}

#[derive(Template)]
#[template(path = "pages/login_sent.html")]
struct LoginSentTemplate {
    email: String,
}

#[derive(Deserialize, Default)]
pub struct LoginQuery {
    #[serde(default)]
    next: String,
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    next: String,
}

fn sanitize_next(next: &str) -> String {
    // Only same-site paths; anything else falls back to the dashboard
    if next.starts_with('/') && !next.starts_with("//") {
        next.to_string()
    } else {
        "/dashboard".to_string()
    }
}

/// GET /login - Show the sign-in form. `next` is carried through the whole
/// flow so the visitor lands where they were headed.
pub async fn get_login(Query(query): Query<LoginQuery>) -> Response {
    render_template(LoginTemplate {
        next: sanitize_next(&query.next),
        error: None,
    })
}

/// POST /login - Email a one-time sign-in link.
///
/// A bad address is a local validation error and never reaches the mailer;
/// a mailer failure is reported as a provider problem, so the visitor knows
/// retyping the address will not help.
pub async fn post_login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Response {
    let next = sanitize_next(&form.next);
    let email = normalize_email(&form.email);

    let input = RequestSignInInput {
        email: email.clone(),
    };
    if let Err(errors) = input.validate() {
        warn!(errors = %errors, "Sign-in request rejected by validation");
        return render_template(LoginTemplate {
            next,
            error: Some("Enter a valid email address".to_string()),
        });
    }

    let existing_user_id = match get_user_by_email(&state.query_pool, &email).await {
        Ok(user) => user.map(|u| u.id),
        Err(e) => {
            error!(error = %e, "Failed to look up user by email");
            return render_template(LoginTemplate {
                next,
                error: Some("Something went wrong. Please try again.".to_string()),
            });
        }
    };

    let command = Command::new(state.evento.clone());
    let metadata = EventMetadata::new(existing_user_id.clone());

    let user_id = match command.request_sign_in(input, existing_user_id, metadata).await {
        Ok(id) => id,
        Err(e) => {
            error!(error = %e, "Failed to record sign-in request");
            return render_template(LoginTemplate {
                next,
                error: Some("Something went wrong. Please try again.".to_string()),
            });
        }
    };

    let token = match generate_magic_token(&user_id, &state.jwt_secret) {
        Ok(token) => token,
        Err(e) => {
            error!(error = %e, "Failed to mint sign-in token");
            return render_template(LoginTemplate {
                next,
                error: Some("Something went wrong. Please try again.".to_string()),
            });
        }
    };

    if let Err(e) =
        send_sign_in_email(&email, &token, &next, &state.email_config, &state.base_url).await
    {
        error!(error = %e, "Sign-in email delivery failed");
        return render_template(LoginTemplate {
            next,
            error: Some(
                "We could not send the email right now. Please try again in a moment."
                    .to_string(),
            ),
        });
    }

    render_template(LoginSentTemplate { email })
}

#[derive(Deserialize)]
pub struct ConfirmQuery {
    #[serde(default)]
    token: String,
    #[serde(default)]
    next: String,
}

/// GET /auth/confirm - Land from the emailed link: swap the one-time token
/// for a session cookie and continue to `next`.
pub async fn get_confirm(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<ConfirmQuery>,
) -> (CookieJar, Response) {
    let next = sanitize_next(&query.next);

    let claims = match validate_token(&query.token, &state.jwt_secret, TokenPurpose::Magic) {
        Ok(claims) => claims,
        Err(e) => {
            warn!(error = %e, "Rejected sign-in link");
            return (
                jar,
                render_template(LoginTemplate {
                    next,
                    error: Some("That sign-in link is invalid or has expired. Request a new one.".to_string()),
                }),
            );
        }
    };

    let command = Command::new(state.evento.clone());
    let metadata = EventMetadata::new(Some(claims.sub.clone()));

    if let Err(e) = command.confirm_sign_in(&claims.sub, metadata).await {
        error!(error = %e, user_id = %claims.sub, "Failed to confirm sign-in");
        return (
            jar,
            render_template(LoginTemplate {
                next,
                error: Some("That sign-in link is invalid or has expired. Request a new one.".to_string()),
            }),
        );
    }

    let token = match generate_session_token(
        &claims.sub,
        &state.jwt_secret,
        state.jwt_expiration_days,
    ) {
        Ok(token) => token,
        Err(e) => {
            error!(error = %e, "Failed to mint session token");
            return (
                jar,
                render_template(LoginTemplate {
                    next,
                    error: Some("Something went wrong. Please try again.".to_string()),
                }),
            );
        }
    };

    let cookie = Cookie::build((AUTH_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .build();

    info!(user_id = %claims.sub, "User signed in");

    (jar.add(cookie), Redirect::to(&next).into_response())
}

/// POST /logout - Clear the session cookie.
pub async fn post_logout(jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = jar.remove(Cookie::build(AUTH_COOKIE_NAME).path("/").build());
    (jar, Redirect::to("/"))
}
