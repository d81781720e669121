//! Downloadable materials for accessible modules

use askama::Template;
use axum::{Extension, extract::State, response::Response};
use skillshelf_access::can_access;
use skillshelf_catalog::modules;
use time::OffsetDateTime;

use super::{AppState, load_entitlements, render_template};
use crate::middleware::Auth;

struct DownloadView {
    module_id: &'static str,
    module_title: &'static str,
    material_name: &'static str,
    material_kind: String,
}

#[derive(Template)]
#[template(path = "pages/downloads.html")]
struct DownloadsTemplate {
    downloads: Vec<DownloadView>,
}

/// GET /downloads - Materials from every module the user can access. Same
/// gate as playback: purchase or active subscription.
pub async fn get_downloads(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
) -> Response {
    let entitlements = load_entitlements(&state, &auth.user_id).await;
    let now = OffsetDateTime::now_utc().unix_timestamp();

    let downloads = modules()
        .iter()
        .filter(|m| can_access(&entitlements, m.id, now))
        .flat_map(|module| {
            module.materials.iter().map(|material| DownloadView {
                module_id: module.id,
                module_title: module.title,
                material_name: material.name,
                material_kind: material.kind.to_string(),
            })
        })
        .collect();

    render_template(DownloadsTemplate { downloads })
}
