//! Member dashboard

use askama::Template;
use axum::{Extension, extract::State, response::Response};
use skillshelf_access::{can_access, has_subscription};
use skillshelf_catalog::modules;
use skillshelf_user::command::display_name;
use time::OffsetDateTime;

use super::index::CardView;
use super::{AppState, load_entitlements, render_template};
use crate::middleware::Auth;

#[derive(Template)]
#[template(path = "pages/dashboard.html")]
struct DashboardTemplate {
    name: String,
    has_subscription: bool,
    accessible: Vec<CardView>,
}

/// GET /dashboard - Everything the signed-in user can watch right now:
/// purchased modules, plus the full catalog under an active subscription.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
) -> Response {
    let entitlements = load_entitlements(&state, &auth.user_id).await;
    let now = OffsetDateTime::now_utc().unix_timestamp();

    let accessible = modules()
        .iter()
        .filter(|m| can_access(&entitlements, m.id, now))
        .map(CardView::from_module)
        .collect();

    render_template(DashboardTemplate {
        name: display_name(&auth.email),
        has_subscription: has_subscription(&entitlements, now),
        accessible,
    })
}
