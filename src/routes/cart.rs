//! Cart actions. Each action rewrites the cart cookie and redirects; the
//! reducer in skillshelf-cart owns the state rules.

use axum::{
    extract::Path,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use skillshelf_cart::{CartAction, reduce};

use crate::cart_cookie::{read_cart, write_cart};
use crate::error::AppError;

/// POST /cart/add/{id} - Add a module to the cart. Adding an unknown module
/// id is rejected so a stale form cannot plant junk in the cookie.
pub async fn post_add(Path(id): Path<String>, jar: CookieJar) -> Result<Response, AppError> {
    if skillshelf_catalog::find_module(&id).is_none() {
        return Err(AppError::NotFound);
    }

    let cart = reduce(read_cart(&jar), CartAction::AddItem(id.clone()));
    let jar = write_cart(jar, &cart);

    Ok((jar, Redirect::to(&format!("/library/{id}"))).into_response())
}

/// POST /cart/remove/{id} - Remove a module from the cart.
pub async fn post_remove(Path(id): Path<String>, jar: CookieJar) -> Response {
    let cart = reduce(read_cart(&jar), CartAction::RemoveItem(id));
    let jar = write_cart(jar, &cart);

    (jar, Redirect::to("/checkout")).into_response()
}

/// POST /cart/clear - Empty the cart.
pub async fn post_clear(jar: CookieJar) -> Response {
    let cart = reduce(read_cart(&jar), CartAction::Clear);
    let jar = write_cart(jar, &cart);

    (jar, Redirect::to("/checkout")).into_response()
}
