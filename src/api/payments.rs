use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, warn};

use super::{non_blank, parse_body, AppState};
use crate::error::{HubError, Result};
use crate::payments::{
    handle_event, parse_event, pricing_plans, verify_signature, BillingCycle, CheckoutSession,
    WebhookOutcome, SIGNATURE_HEADER,
};
use crate::types::PlanTier;

pub async fn config(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "publishable_key": state.config.payments.publishable_key,
        "plans": pricing_plans(),
    }))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CheckoutRequest {
    plan: Option<String>,
    billing: Option<String>,
}

pub async fn create_checkout_session(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<CheckoutSession>> {
    let request: CheckoutRequest = parse_body(&body)?;

    let plan = non_blank(request.plan)
        .and_then(|p| PlanTier::parse(&p))
        .ok_or_else(|| HubError::Payment("Invalid plan".into()))?;
    let billing = match non_blank(request.billing) {
        Some(b) => BillingCycle::parse(&b)?,
        None => BillingCycle::default(),
    };

    let base = state.config.payments.public_base_url.trim_end_matches('/');
    let session = state.checkout.create_session(
        plan,
        billing,
        &format!("{}/success?session_id={{CHECKOUT_SESSION_ID}}", base),
        &format!("{}/cancel", base),
    )?;

    Ok(Json(session))
}

pub async fn webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>> {
    let payments = &state.config.payments;
    let secret = payments
        .webhook_secret
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| HubError::Payment("Webhook secret not configured".into()))?;
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| HubError::Payment("Missing signature header".into()))?;

    verify_signature(
        &body,
        signature,
        secret,
        payments.signature_tolerance_secs,
        Utc::now().timestamp(),
    )
    .inspect_err(|e| warn!("Webhook rejected: {}", e))?;

    let event = parse_event(&body)?;
    let outcome = handle_event(state.users.as_ref(), &event).await?;
    if outcome != WebhookOutcome::Ignored {
        info!("Webhook {} -> {:?}", event.event_type, outcome);
    }

    Ok(Json(json!({ "status": "success" })))
}

#[derive(Debug, Deserialize)]
pub struct SuccessQuery {
    session_id: Option<String>,
}

pub async fn success_page(Query(query): Query<SuccessQuery>) -> Response {
    match non_blank(query.session_id) {
        Some(session_id) => Html(format!(
            "<!DOCTYPE html>\n<html><head><title>Payment successful</title></head>\
             <body><h1>Payment successful</h1>\
             <p>Your subscription is now active.</p>\
             <p>Session: <code>{}</code></p>\
             <a href=\"/\">Back to dashboard</a></body></html>",
            escape_html(&session_id)
        ))
        .into_response(),
        None => (
            StatusCode::BAD_REQUEST,
            Html("<h1>Missing session id</h1>".to_string()),
        )
            .into_response(),
    }
}

pub async fn cancel_page() -> Html<&'static str> {
    Html(
        "<!DOCTYPE html>\n<html><head><title>Payment cancelled</title></head>\
         <body><h1>Payment cancelled</h1>\
         <p>No charge was made. You can pick a plan again at any time.</p>\
         <a href=\"/\">Back to pricing</a></body></html>",
    )
}

fn escape_html(raw: &str) -> String {
    raw.chars()
        .fold(String::with_capacity(raw.len()), |mut out, c| {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                '\'' => out.push_str("&#39;"),
                _ => out.push(c),
            }
            out
        })
}
