//! Core domain types shared across the service

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::config::MarketplaceConfig;
use crate::error::{HubError, Result};

/// Subscription tier of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    #[default]
    Starter,
    Professional,
    Enterprise,
}

impl PlanTier {
    pub const ALL: [PlanTier; 3] = [PlanTier::Starter, PlanTier::Professional, PlanTier::Enterprise];

    /// Strict parse, `None` for unknown names
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "starter" => Some(PlanTier::Starter),
            "professional" => Some(PlanTier::Professional),
            "enterprise" => Some(PlanTier::Enterprise),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanTier::Starter => "starter",
            PlanTier::Professional => "professional",
            PlanTier::Enterprise => "enterprise",
        }
    }
}

/// Lenient conversion: unknown tiers fall back to starter
impl From<&str> for PlanTier {
    fn from(name: &str) -> Self {
        PlanTier::parse(name).unwrap_or_default()
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    #[default]
    Trial,
    Active,
    PastDue,
    Cancelled,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Trial => "trial",
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::PastDue => "past_due",
            SubscriptionStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "trial" => Some(SubscriptionStatus::Trial),
            "active" => Some(SubscriptionStatus::Active),
            "past_due" => Some(SubscriptionStatus::PastDue),
            "cancelled" => Some(SubscriptionStatus::Cancelled),
            _ => None,
        }
    }
}

/// Account record held by the user repository
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub plan: PlanTier,
    pub created_at: DateTime<Utc>,
    pub subscription_status: SubscriptionStatus,
    pub api_calls_today: u32,
    pub total_revenue: Decimal,
    /// Payment processor customer reference
    pub customer_id: Option<String>,
}

impl User {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            plan: self.plan,
        }
    }
}

/// Public view of a user returned by the auth endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub plan: PlanTier,
}

/// An active sales channel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marketplace {
    pub id: String,
    pub name: String,
    /// Transaction fee as a fraction (0.15 = 15%)
    pub fee: Decimal,
}

/// Read-only snapshot of the active marketplaces, ordered by id
#[derive(Debug, Clone, Default)]
pub struct MarketplaceSet {
    markets: Vec<Marketplace>,
}

impl MarketplaceSet {
    pub fn new(mut markets: Vec<Marketplace>) -> Self {
        markets.sort_by(|a, b| a.id.cmp(&b.id));
        markets.dedup_by(|a, b| a.id == b.id);
        Self { markets }
    }

    /// Build the snapshot from the configured catalogue, keeping active entries only
    pub fn from_catalogue(catalogue: &BTreeMap<String, MarketplaceConfig>) -> Self {
        let markets = catalogue
            .iter()
            .filter(|(_, m)| m.active)
            .map(|(id, m)| Marketplace {
                id: id.clone(),
                name: m.name.clone(),
                fee: m.fee,
            })
            .collect();
        Self::new(markets)
    }

    pub fn len(&self) -> usize {
        self.markets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markets.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Marketplace> {
        self.markets.iter().find(|m| m.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Marketplace> {
        self.markets.iter()
    }

    pub fn as_slice(&self) -> &[Marketplace] {
        &self.markets
    }

    /// A source/target pair needs two distinct marketplaces
    pub fn ensure_pairable(&self) -> Result<()> {
        if self.markets.len() < 2 {
            return Err(HubError::Configuration(format!(
                "need at least 2 active marketplaces to form a source/target pair, found {}",
                self.markets.len()
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Bucket a 0-100 risk score (lower is safer)
    pub fn from_score(score: Decimal) -> Self {
        if score < Decimal::from(30) {
            RiskLevel::Low
        } else if score < Decimal::from(60) {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompetitionLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Stable,
    Declining,
}
