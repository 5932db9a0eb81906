//! Payment processor webhooks
//!
//! Signature header: `t=<unix>,v1=<hex hmac>` where the MAC is
//! HMAC-SHA256(secret, "<t>.<raw body>"). Several `v1` entries may be
//! present; any match is accepted.

use hmac::{Hmac, Mac};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use sha2::Sha256;
use tracing::{info, warn};

use crate::auth::constant_time_eq;
use crate::error::{HubError, Result};
use crate::storage::UserRepository;
use crate::types::{PlanTier, SubscriptionStatus, User};

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "Stripe-Signature";

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: EventData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventData {
    pub object: Value,
}

/// What a processed event did to the account store
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookOutcome {
    PlanActivated { email: String, plan: PlanTier },
    RevenueRecorded { email: String, amount: Decimal },
    Downgraded { email: String },
    UnknownAccount,
    Ignored,
}

fn compute_signature(secret: &str, timestamp: i64, payload: &[u8]) -> Result<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| HubError::Internal(format!("HMAC key error: {}", e)))?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Build a signature header value for `payload`
pub fn sign_payload(secret: &str, timestamp: i64, payload: &[u8]) -> Result<String> {
    let signature = compute_signature(secret, timestamp, payload)?;
    Ok(format!("t={},v1={}", timestamp, hex::encode(signature)))
}

/// Check the header against the payload and reject stale timestamps
pub fn verify_signature(
    payload: &[u8],
    header: &str,
    secret: &str,
    tolerance_secs: i64,
    now: i64,
) -> Result<()> {
    let mut timestamp = None;
    let mut candidates = Vec::new();

    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => timestamp = value.parse::<i64>().ok(),
            Some(("v1", value)) => candidates.push(value),
            _ => {}
        }
    }

    let timestamp =
        timestamp.ok_or_else(|| HubError::Payment("Invalid signature: missing timestamp".into()))?;
    if candidates.is_empty() {
        return Err(HubError::Payment("Invalid signature: no v1 signature".into()));
    }

    let tolerance = u64::try_from(tolerance_secs).unwrap_or(0);
    if now.abs_diff(timestamp) > tolerance {
        return Err(HubError::Payment(
            "Invalid signature: timestamp outside tolerance".into(),
        ));
    }

    let expected = compute_signature(secret, timestamp, payload)?;
    let matched = candidates.iter().any(|candidate| {
        hex::decode(candidate)
            .map(|sig| constant_time_eq(&sig, &expected))
            .unwrap_or(false)
    });

    if !matched {
        return Err(HubError::Payment("Invalid signature".into()));
    }
    Ok(())
}

pub fn parse_event(payload: &[u8]) -> Result<WebhookEvent> {
    serde_json::from_slice(payload)
        .map_err(|e| HubError::Payment(format!("Invalid payload: {}", e)))
}

fn str_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    path.iter()
        .try_fold(value, |v, key| v.get(key))
        .and_then(Value::as_str)
}

/// Apply a verified event to the account store
pub async fn handle_event(repo: &dyn UserRepository, event: &WebhookEvent) -> Result<WebhookOutcome> {
    let object = &event.data.object;

    match event.event_type.as_str() {
        "checkout.session.completed" => {
            let Some(email) = str_at(object, &["customer_details", "email"]) else {
                warn!("Checkout completed without customer email");
                return Ok(WebhookOutcome::UnknownAccount);
            };
            let Some(mut user) = repo.find_by_email(email).await? else {
                warn!("Checkout completed for unknown account {}", email);
                return Ok(WebhookOutcome::UnknownAccount);
            };

            let plan = PlanTier::from(str_at(object, &["metadata", "plan"]).unwrap_or_default());
            user.plan = plan;
            user.subscription_status = SubscriptionStatus::Active;
            if let Some(customer) = str_at(object, &["customer"]) {
                user.customer_id = Some(customer.to_string());
            }
            let email = user.email.clone();
            repo.update(user).await?;

            info!("Activated {} plan for {}", plan, email);
            Ok(WebhookOutcome::PlanActivated { email, plan })
        }
        "invoice.payment_succeeded" => {
            let Some(mut user) = find_customer(repo, object).await? else {
                return Ok(WebhookOutcome::UnknownAccount);
            };

            let cents = object.get("amount_paid").and_then(Value::as_i64).unwrap_or(0);
            let amount = Decimal::new(cents, 2);
            user.total_revenue += amount;
            user.subscription_status = SubscriptionStatus::Active;
            let email = user.email.clone();
            repo.update(user).await?;

            info!("Subscription renewed for {}: {} EUR", email, amount);
            Ok(WebhookOutcome::RevenueRecorded { email, amount })
        }
        "customer.subscription.deleted" => {
            let Some(mut user) = find_customer(repo, object).await? else {
                return Ok(WebhookOutcome::UnknownAccount);
            };

            user.plan = PlanTier::Starter;
            user.subscription_status = SubscriptionStatus::Cancelled;
            let email = user.email.clone();
            repo.update(user).await?;

            info!("Subscription cancelled for {}, downgraded to starter", email);
            Ok(WebhookOutcome::Downgraded { email })
        }
        other => {
            info!("Ignoring webhook event {}", other);
            Ok(WebhookOutcome::Ignored)
        }
    }
}

async fn find_customer(repo: &dyn UserRepository, object: &Value) -> Result<Option<User>> {
    let Some(customer) = str_at(object, &["customer"]) else {
        warn!("Webhook event without customer reference");
        return Ok(None);
    };
    let user = repo.find_by_customer_id(customer).await?;
    if user.is_none() {
        warn!("Webhook event for unknown customer {}", customer);
    }
    Ok(user)
}
