use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::plans::{pricing_plan, BillingCycle};
use crate::error::Result;
use crate::types::PlanTier;

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutSession {
    pub checkout_session_id: String,
    pub checkout_url: String,
}

/// Seam for the payment processor's hosted checkout
pub trait CheckoutProvider: Send + Sync {
    fn create_session(
        &self,
        plan: PlanTier,
        billing: BillingCycle,
        success_url: &str,
        cancel_url: &str,
    ) -> Result<CheckoutSession>;

    fn name(&self) -> &str;
}

/// Local stand-in: mints session ids and points straight at the success page
#[derive(Debug, Default, Clone)]
pub struct SimulatedCheckout;

impl CheckoutProvider for SimulatedCheckout {
    fn create_session(
        &self,
        plan: PlanTier,
        billing: BillingCycle,
        success_url: &str,
        _cancel_url: &str,
    ) -> Result<CheckoutSession> {
        let id = format!("cs_test_{}", Uuid::new_v4().simple());
        let price_id = pricing_plan(plan).price_id(billing).to_string();

        info!(
            "Created checkout session {} for {} ({}, {})",
            id,
            plan,
            billing.as_str(),
            price_id
        );

        Ok(CheckoutSession {
            checkout_url: success_url.replace("{CHECKOUT_SESSION_ID}", &id),
            checkout_session_id: id,
        })
    }

    fn name(&self) -> &str {
        "simulated"
    }
}
