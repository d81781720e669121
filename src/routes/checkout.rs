//! Checkout page and purchase flow

use askama::Template;
use axum::{
    Extension,
    extract::State,
    response::{Redirect, Response},
};
use axum_extra::extract::{CookieJar, Form, Query};
use serde::Deserialize;
use skillshelf_access::{AccessError, Command as AccessCommand, EventMetadata};
use skillshelf_cart::{CartState, CheckoutFlow, PricedItem, price_order};
use skillshelf_catalog::find_module;
use time::OffsetDateTime;
use tracing::{error, warn};

use super::index::price_label;
use super::{AppState, render_template};
use crate::cart_cookie::{clear_cart, read_cart};
use crate::middleware::Auth;
use crate::queries::entitlement::owned_module_ids;

struct CheckoutLine {
    module_id: &'static str,
    title: &'static str,
    price_label: String,
}

#[derive(Template)]
#[template(path = "pages/checkout.html")]
struct CheckoutTemplate {
    lines: Vec<CheckoutLine>,
    subtotal_label: String,
    discount_label: String,
    total_label: String,
    has_discount: bool,
    promo_code: String,
    error: Option<String>,
}

#[derive(Template)]
#[template(path = "pages/checkout_empty.html")]
struct CheckoutEmptyTemplate;

#[derive(Template)]
#[template(path = "pages/checkout_complete.html")]
struct CheckoutCompleteTemplate {
    granted: usize,
    total_label: String,
}

#[derive(Deserialize, Default)]
pub struct CheckoutQuery {
    #[serde(default)]
    promo: String,
}

#[derive(Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    promo_code: String,
}

/// Roll the flow back to Idle. This only errors when the flow never entered
/// Processing, which is a handler bug worth a log line, not a user error.
fn fail_flow(flow: &mut CheckoutFlow) {
    if let Err(e) = flow.fail() {
        error!(error = %e, "Checkout flow refused to roll back");
    }
}

/// Join cart lines against the catalog. Module ids with no catalog entry
/// (stale cookies after a catalog change) are dropped.
fn priced_items(cart: &CartState) -> Vec<PricedItem> {
    cart.items
        .iter()
        .filter_map(|item| {
            find_module(&item.module_id).map(|module| PricedItem {
                module_id: item.module_id.clone(),
                price: module.price,
                quantity: item.quantity,
            })
        })
        .collect()
}

fn checkout_view(cart: &CartState, promo_code: &str, error: Option<String>) -> CheckoutTemplate {
    let items = priced_items(cart);
    let totals = price_order(&items, promo_code);

    let lines = items
        .iter()
        .filter_map(|item| {
            find_module(&item.module_id).map(|module| CheckoutLine {
                module_id: module.id,
                title: module.title,
                price_label: price_label(module.price),
            })
        })
        .collect();

    CheckoutTemplate {
        lines,
        subtotal_label: price_label(totals.subtotal),
        discount_label: price_label(totals.discount),
        total_label: price_label(totals.total),
        has_discount: totals.discount > 0,
        promo_code: promo_code.to_string(),
        error,
    }
}

/// GET /checkout - Order summary, or the empty-cart state.
pub async fn get_checkout(Query(query): Query<CheckoutQuery>, jar: CookieJar) -> Response {
    let cart = read_cart(&jar);

    if cart.is_empty() {
        return render_template(CheckoutEmptyTemplate);
    }

    render_template(checkout_view(&cart, &query.promo, None))
}

/// POST /checkout - Capture payment and grant entitlements.
///
/// Payment is captured before anything is granted; on failure the cart
/// cookie is untouched so the visitor can retry. The cookie is only cleared
/// once every entitlement has been written.
pub async fn post_checkout(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    jar: CookieJar,
    Form(form): Form<CheckoutForm>,
) -> (CookieJar, Response) {
    let cart = read_cart(&jar);

    let mut flow = CheckoutFlow::default();
    if flow.begin(&cart).is_err() {
        return (jar, Redirect::to("/checkout").into_response());
    }

    let items = priced_items(&cart);
    let now = OffsetDateTime::now_utc().unix_timestamp();

    let already_owned = match owned_module_ids(&state.query_pool, &auth.user_id, now).await {
        Ok(ids) => ids,
        Err(e) => {
            error!(error = %e, user_id = %auth.user_id, "Failed to load owned modules");
            fail_flow(&mut flow);
            return (
                jar,
                render_template(checkout_view(
                    &cart,
                    &form.promo_code,
                    Some("Something went wrong. Please try again.".to_string()),
                )),
            );
        }
    };

    let command = AccessCommand::new(state.evento.clone());
    let metadata = EventMetadata::new(Some(auth.user_id.clone()));

    match command
        .complete_checkout(
            &auth.user_id,
            &items,
            &form.promo_code,
            &already_owned,
            state.gateway.as_ref(),
            metadata,
        )
        .await
    {
        Ok(outcome) => {
            if let Err(e) = flow.complete() {
                error!(error = %e, "Checkout flow refused to complete");
            }
            let jar = clear_cart(jar);
            (
                jar,
                render_template(CheckoutCompleteTemplate {
                    granted: outcome.granted.len(),
                    total_label: price_label(outcome.totals.total),
                }),
            )
        }
        Err(AccessError::Payment(e)) => {
            warn!(error = %e, user_id = %auth.user_id, "Payment failed, cart kept");
            fail_flow(&mut flow);
            (
                jar,
                render_template(checkout_view(
                    &cart,
                    &form.promo_code,
                    Some(format!("Payment failed: {e}. Your cart is unchanged.")),
                )),
            )
        }
        Err(AccessError::Store(e)) => {
            error!(error = %e, user_id = %auth.user_id, "Failed to record purchase");
            fail_flow(&mut flow);
            (
                jar,
                render_template(checkout_view(
                    &cart,
                    &form.promo_code,
                    Some("Something went wrong. Please try again.".to_string()),
                )),
            )
        }
    }
}
