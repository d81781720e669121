//! Module detail page

use askama::Template;
use axum::{extract::Path, http::StatusCode, response::Response};
use axum_extra::extract::CookieJar;
use skillshelf_catalog::{Material, Module, find_module};

use super::index::price_label;
use super::render_template;
use crate::cart_cookie::read_cart;

#[derive(Template)]
#[template(path = "pages/module_detail.html")]
struct ModuleDetailTemplate {
    module: &'static Module,
    level: String,
    price_label: String,
    materials: &'static [Material],
    in_cart: bool,
}

#[derive(Template)]
#[template(path = "pages/module_missing.html")]
struct ModuleMissingTemplate;

/// GET /library/{id} - Module detail, or a friendly not-found state for
/// unknown ids (stale links should not 500).
pub async fn get_module_detail(Path(id): Path<String>, jar: CookieJar) -> Response {
    let Some(module) = find_module(&id) else {
        let mut response = render_template(ModuleMissingTemplate);
        *response.status_mut() = StatusCode::NOT_FOUND;
        return response;
    };

    let cart = read_cart(&jar);

    render_template(ModuleDetailTemplate {
        module,
        level: module.level.to_string(),
        price_label: price_label(module.price),
        materials: module.materials,
        in_cart: cart.is_in_cart(module.id),
    })
}
