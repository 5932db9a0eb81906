use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{HubError, Result};
use crate::types::PlanTier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    #[default]
    Monthly,
    Annual,
}

impl BillingCycle {
    pub fn parse(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "monthly" => Ok(BillingCycle::Monthly),
            "annual" => Ok(BillingCycle::Annual),
            other => Err(HubError::Payment(format!("Invalid billing cycle '{}'", other))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BillingCycle::Monthly => "monthly",
            BillingCycle::Annual => "annual",
        }
    }
}

/// Public price sheet entry; prices are whole EUR per month
#[derive(Debug, Clone, Serialize)]
pub struct PricingPlan {
    pub name: &'static str,
    pub price_monthly: u32,
    pub price_annual: u32,
    pub price_id_monthly: String,
    pub price_id_annual: String,
    pub features: Vec<&'static str>,
}

impl PricingPlan {
    fn new(tier: PlanTier, name: &'static str, monthly: u32, annual: u32, features: Vec<&'static str>) -> Self {
        Self {
            name,
            price_monthly: monthly,
            price_annual: annual,
            price_id_monthly: format!("price_{}_monthly", tier),
            price_id_annual: format!("price_{}_annual", tier),
            features,
        }
    }

    pub fn price_id(&self, billing: BillingCycle) -> &str {
        match billing {
            BillingCycle::Monthly => &self.price_id_monthly,
            BillingCycle::Annual => &self.price_id_annual,
        }
    }

    pub fn price(&self, billing: BillingCycle) -> u32 {
        match billing {
            BillingCycle::Monthly => self.price_monthly,
            BillingCycle::Annual => self.price_annual,
        }
    }
}

pub fn pricing_plan(tier: PlanTier) -> PricingPlan {
    match tier {
        PlanTier::Starter => PricingPlan::new(
            tier,
            "Starter",
            19,
            13,
            vec!["100 searches/day", "3 marketplaces", "Basic AI", "Email support"],
        ),
        PlanTier::Professional => PricingPlan::new(
            tier,
            "Professional",
            49,
            34,
            vec![
                "Unlimited searches",
                "15+ marketplaces",
                "Full advanced AI",
                "Full automation",
                "Voice commands",
                "Priority support",
            ],
        ),
        PlanTier::Enterprise => PricingPlan::new(
            tier,
            "Enterprise",
            99,
            69,
            vec![
                "Everything in Professional",
                "API access",
                "White-label",
                "Unlimited users",
                "Dedicated support",
            ],
        ),
    }
}

/// Price sheet keyed by tier name
pub fn pricing_plans() -> BTreeMap<&'static str, PricingPlan> {
    PlanTier::ALL
        .into_iter()
        .map(|tier| (tier.as_str(), pricing_plan(tier)))
        .collect()
}
