//! Curated collections, with per-module access markers

use askama::Template;
use axum::{Extension, extract::State, response::Response};
use skillshelf_access::can_access;
use skillshelf_catalog::{collections, modules_in_collection};
use time::OffsetDateTime;

use super::{AppState, load_entitlements, render_template};
use crate::middleware::Auth;

struct CollectionModuleView {
    id: &'static str,
    title: &'static str,
    outcome: &'static str,
    accessible: bool,
}

struct CollectionView {
    name: &'static str,
    description: &'static str,
    modules: Vec<CollectionModuleView>,
}

#[derive(Template)]
#[template(path = "pages/collections.html")]
struct CollectionsTemplate {
    collections: Vec<CollectionView>,
}

/// GET /collections - Every collection, marking which modules the user can
/// already watch.
pub async fn get_collections(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
) -> Response {
    let entitlements = load_entitlements(&state, &auth.user_id).await;
    let now = OffsetDateTime::now_utc().unix_timestamp();

    let collections = collections()
        .iter()
        .map(|collection| CollectionView {
            name: collection.name,
            description: collection.description,
            modules: modules_in_collection(collection.id)
                .into_iter()
                .map(|module| CollectionModuleView {
                    id: module.id,
                    title: module.title,
                    outcome: module.outcome,
                    accessible: can_access(&entitlements, module.id, now),
                })
                .collect(),
        })
        .collect();

    render_template(CollectionsTemplate { collections })
}
