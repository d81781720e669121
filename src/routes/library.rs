//! Module library with search, topic, level and role filters

use askama::Template;
use axum::response::Response;
use axum_extra::extract::Query;
use serde::Deserialize;
use skillshelf_catalog::{Level, ModuleFilter, filter_modules, roles, topics};
use std::str::FromStr;

use super::index::CardView;
use super::render_template;

struct FilterOption {
    name: &'static str,
    selected: bool,
}

#[derive(Template)]
#[template(path = "pages/library.html")]
struct LibraryTemplate {
    modules: Vec<CardView>,
    search: String,
    topics: Vec<FilterOption>,
    roles: Vec<FilterOption>,
    selected_level: String,
}

#[derive(Deserialize, Default)]
pub struct LibraryQuery {
    #[serde(default)]
    q: String,
    #[serde(default)]
    topic: String,
    #[serde(default)]
    level: String,
    #[serde(default)]
    role: String,
}

fn filter_options(names: Vec<&'static str>, selected: &str) -> Vec<FilterOption> {
    names
        .into_iter()
        .map(|name| FilterOption {
            name,
            selected: selected == name,
        })
        .collect()
}

/// GET /library - Full catalog, filtered by free-text search, topic, level
/// and role tag. Unknown filter values fall back to "no filter" rather than
/// erroring.
pub async fn get_library(Query(query): Query<LibraryQuery>) -> Response {
    let search = query.q.trim();
    let level = Level::from_str(&query.level).ok();

    let filter = ModuleFilter {
        search: (!search.is_empty()).then_some(search),
        topic: (!query.topic.is_empty()).then_some(query.topic.as_str()),
        level,
        role: (!query.role.is_empty()).then_some(query.role.as_str()),
    };

    let modules = filter_modules(&filter)
        .into_iter()
        .map(CardView::from_module)
        .collect();

    render_template(LibraryTemplate {
        modules,
        search: search.to_string(),
        topics: filter_options(topics(), &query.topic),
        roles: filter_options(roles(), &query.role),
        selected_level: level.map(|l| l.to_string()).unwrap_or_default(),
    })
}
