//! About page

use askama::Template;
use axum::response::Response;

use super::render_template;

#[derive(Template)]
#[template(path = "pages/about.html")]
struct AboutTemplate;

/// GET /about
pub async fn get_about() -> Response {
    render_template(AboutTemplate)
}
