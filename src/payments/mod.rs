//! Subscription billing against a simulated payment processor

mod checkout;
mod plans;
mod webhook;


pub use checkout::{CheckoutProvider, CheckoutSession, SimulatedCheckout};
pub use plans::{pricing_plan, pricing_plans, BillingCycle, PricingPlan};
pub use webhook::{
    handle_event, parse_event, sign_payload, verify_signature, EventData, WebhookEvent,
    WebhookOutcome, SIGNATURE_HEADER,
};
