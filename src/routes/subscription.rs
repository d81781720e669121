//! Subscription plans page and activation

use askama::Template;
use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use serde::Deserialize;
use skillshelf_access::{Command as AccessCommand, EventMetadata, Plan};
use std::str::FromStr;
use tracing::{error, warn};

use super::index::price_label;
use super::{AppState, render_template};
use crate::middleware::Auth;

struct PlanView {
    id: String,
    name: &'static str,
    price_label: String,
    billing_note: &'static str,
    highlight: bool,
}

#[derive(Template)]
#[template(path = "pages/subscription.html")]
struct SubscriptionTemplate {
    plans: Vec<PlanView>,
    error: Option<String>,
}

fn plan_views() -> Vec<PlanView> {
    vec![
        PlanView {
            id: Plan::Monthly.to_string(),
            name: "Monthly",
            price_label: price_label(Plan::Monthly.price()),
            billing_note: "per month, billed monthly",
            highlight: false,
        },
        PlanView {
            id: Plan::Yearly.to_string(),
            name: "Yearly",
            price_label: price_label(Plan::Yearly.price()),
            billing_note: "per month, billed yearly",
            highlight: true,
        },
        PlanView {
            id: Plan::Team.to_string(),
            name: "Team",
            price_label: price_label(Plan::Team.price()),
            billing_note: "per month, up to 10 seats",
            highlight: false,
        },
    ]
}

/// GET /subscription - Plan comparison page.
pub async fn get_subscription() -> Response {
    render_template(SubscriptionTemplate {
        plans: plan_views(),
        error: None,
    })
}

#[derive(Deserialize)]
pub struct SubscribeForm {
    plan: String,
}

/// POST /subscription/subscribe - Capture payment for a plan and grant a
/// subscription entitlement. A payment failure grants nothing.
pub async fn post_subscribe(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Form(form): Form<SubscribeForm>,
) -> Response {
    let Ok(plan) = Plan::from_str(&form.plan) else {
        warn!(plan = %form.plan, "Unknown subscription plan");
        return render_template(SubscriptionTemplate {
            plans: plan_views(),
            error: Some("Choose one of the listed plans.".to_string()),
        });
    };

    let command = AccessCommand::new(state.evento.clone());
    let metadata = EventMetadata::new(Some(auth.user_id.clone()));

    match command
        .activate_subscription(&auth.user_id, plan, state.gateway.as_ref(), metadata)
        .await
    {
        Ok(_) => Redirect::to("/dashboard").into_response(),
        Err(e) => {
            error!(error = %e, user_id = %auth.user_id, "Subscription activation failed");
            render_template(SubscriptionTemplate {
                plans: plan_views(),
                error: Some("Payment failed. You have not been charged again; please retry.".to_string()),
            })
        }
    }
}
