//! Landing page

use askama::Template;
use axum::response::Response;
use skillshelf_catalog::{Collection, Module, collections, featured};

use super::render_template;

#[derive(Template)]
#[template(path = "pages/index.html")]
struct IndexTemplate {
    featured: Vec<CardView>,
    collections: Vec<&'static Collection>,
}

pub(super) struct CardView {
    pub id: &'static str,
    pub title: &'static str,
    pub outcome: &'static str,
    pub topic: &'static str,
    pub level: String,
    pub duration_minutes: u16,
    pub price_label: String,
}

impl CardView {
    pub fn from_module(module: &'static Module) -> Self {
        Self {
            id: module.id,
            title: module.title,
            outcome: module.outcome,
            topic: module.topic,
            level: module.level.to_string(),
            duration_minutes: module.duration_minutes,
            price_label: price_label(module.price),
        }
    }
}

/// Minor units to a display price; zero reads as "Free".
pub(super) fn price_label(price: u64) -> String {
    if price == 0 {
        "Free".to_string()
    } else {
        format!("${}.{:02}", price / 100, price % 100)
    }
}

/// GET / - Landing page with featured modules and collections
pub async fn get_index() -> Response {
    render_template(IndexTemplate {
        featured: featured().into_iter().map(CardView::from_module).collect(),
        collections: collections().iter().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_price_reads_free() {
        assert_eq!(price_label(0), "Free");
    }

    #[test]
    fn prices_render_in_major_units() {
        assert_eq!(price_label(2900), "$29.00");
        assert_eq!(price_label(4905), "$49.05");
    }
}
