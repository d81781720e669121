//! Cart persistence: the cart lives in a session cookie as base64-encoded
//! JSON, so it survives navigation without a server-side session store.

use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use skillshelf_cart::CartState;

pub const CART_COOKIE_NAME: &str = "cart";

/// Decode the cart from the cookie jar. Any missing, truncated, or
/// hand-edited cookie reads as an empty cart.
pub fn read_cart(jar: &CookieJar) -> CartState {
    jar.get(CART_COOKIE_NAME)
        .and_then(|cookie| URL_SAFE_NO_PAD.decode(cookie.value()).ok())
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_default()
}

/// Write the cart back to the jar as a session cookie.
pub fn write_cart(jar: CookieJar, cart: &CartState) -> CookieJar {
    let encoded = URL_SAFE_NO_PAD.encode(serde_json::to_vec(cart).unwrap_or_default());

    let cookie = Cookie::build((CART_COOKIE_NAME, encoded))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    jar.add(cookie)
}

/// Drop the cart cookie entirely, e.g. after a successful checkout.
pub fn clear_cart(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(CART_COOKIE_NAME).path("/").build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillshelf_cart::{CartAction, reduce};

    #[test]
    fn missing_cookie_reads_as_empty_cart() {
        let jar = CookieJar::new();
        assert!(read_cart(&jar).items.is_empty());
    }

    #[test]
    fn cart_round_trips_through_the_cookie() {
        let cart = reduce(
            CartState::default(),
            CartAction::AddItem("one-on-ones".to_string()),
        );

        let jar = write_cart(CookieJar::new(), &cart);
        let decoded = read_cart(&jar);

        assert_eq!(decoded.items.len(), 1);
        assert_eq!(decoded.items[0].module_id, "one-on-ones");
    }

    #[test]
    fn tampered_cookie_reads_as_empty_cart() {
        let jar = CookieJar::new().add(Cookie::new(CART_COOKIE_NAME, "!!not-base64!!"));
        assert!(read_cart(&jar).items.is_empty());
    }
}
