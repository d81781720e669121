//! Playback page, gated per module

use askama::Template;
use axum::{Extension, extract::Path, extract::State, http::StatusCode, response::Response};
use skillshelf_access::can_access;
use skillshelf_catalog::{Material, Module, find_module};
use time::OffsetDateTime;

use super::index::price_label;
use super::{AppState, load_entitlements, render_template};
use crate::middleware::Auth;

#[derive(Template)]
#[template(path = "pages/playback.html")]
struct PlaybackTemplate {
    module: &'static Module,
    materials: &'static [Material],
}

#[derive(Template)]
#[template(path = "pages/access_required.html")]
struct AccessRequiredTemplate {
    module: &'static Module,
    price_label: String,
}

#[derive(Template)]
#[template(path = "pages/module_missing.html")]
struct ModuleMissingTemplate;

/// GET /watch/{id} - Play a module.
///
/// The same rule gates every module regardless of price: a purchase or an
/// active subscription. Free modules pass through a zero-total checkout.
/// Without access the page offers the purchase path instead of the player.
pub async fn get_playback(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<String>,
) -> Response {
    let Some(module) = find_module(&id) else {
        let mut response = render_template(ModuleMissingTemplate);
        *response.status_mut() = StatusCode::NOT_FOUND;
        return response;
    };

    let entitlements = load_entitlements(&state, &auth.user_id).await;
    let now = OffsetDateTime::now_utc().unix_timestamp();

    if !can_access(&entitlements, module.id, now) {
        return render_template(AccessRequiredTemplate {
            module,
            price_label: price_label(module.price),
        });
    }

    render_template(PlaybackTemplate {
        module,
        materials: module.materials,
    })
}
