//! Opportunity record and its profit arithmetic
//!
//! Values are kept exact internally; rounding happens only on
//! serialization (currency to 2 dp, percentages to 1 dp).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::ml::PricePrediction;
use crate::types::{CompetitionLevel, Marketplace, RiskLevel, Trend};

/// Buy side of an opportunity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceLeg {
    pub marketplace: String,
    pub marketplace_id: String,
    #[serde(serialize_with = "money")]
    pub price: Decimal,
    /// Fee fraction, serialized as a percentage
    #[serde(serialize_with = "fraction_as_percent")]
    pub fee: Decimal,
    /// price x (1 + fee)
    #[serde(serialize_with = "money")]
    pub total_cost: Decimal,
}

/// Sell side of an opportunity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetLeg {
    pub marketplace: String,
    pub marketplace_id: String,
    #[serde(serialize_with = "money")]
    pub price: Decimal,
    #[serde(serialize_with = "fraction_as_percent")]
    pub fee: Decimal,
    /// price x (1 - fee)
    #[serde(serialize_with = "money")]
    pub net_revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitBreakdown {
    #[serde(serialize_with = "money")]
    pub gross: Decimal,
    #[serde(serialize_with = "money")]
    pub net: Decimal,
    /// Net profit over acquisition cost, percent
    #[serde(serialize_with = "percent")]
    pub roi: Decimal,
    /// Net profit over target price, percent
    #[serde(serialize_with = "percent")]
    pub margin: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdown {
    #[serde(serialize_with = "money")]
    pub shipping: Decimal,
    #[serde(serialize_with = "money")]
    pub fees_total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    #[serde(serialize_with = "percent")]
    pub score: Decimal,
    pub level: RiskLevel,
    pub factors: Vec<String>,
}

/// A priced buy-low/sell-high candidate across two marketplaces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Opportunity {
    pub id: String,
    pub product_name: String,
    pub source: SourceLeg,
    pub target: TargetLeg,
    pub profit: ProfitBreakdown,
    pub costs: CostBreakdown,
    pub risk: RiskAssessment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_prediction: Option<PricePrediction>,
    pub estimated_sales_per_month: u32,
    pub competition_level: CompetitionLevel,
    pub trend: Trend,
    pub last_updated: DateTime<Utc>,
}

/// Raw draw for one candidate, before any arithmetic
#[derive(Debug, Clone)]
pub struct OpportunityDraft {
    pub id: String,
    pub product_name: String,
    pub source: Marketplace,
    pub source_price: Decimal,
    pub target: Marketplace,
    pub target_price: Decimal,
    pub shipping: Decimal,
    pub risk_score: Decimal,
    pub risk_factors: Vec<String>,
    pub estimated_sales_per_month: u32,
    pub competition_level: CompetitionLevel,
    pub trend: Trend,
}

impl OpportunityDraft {
    /// Compute costs, revenue and profit metrics
    pub fn evaluate(self) -> Opportunity {
        let hundred = Decimal::ONE_HUNDRED;

        let total_cost = self.source_price * (Decimal::ONE + self.source.fee);
        let net_revenue = self.target_price * (Decimal::ONE - self.target.fee);
        let net = net_revenue - total_cost - self.shipping;
        let gross = self.target_price - self.source_price;

        let roi = if total_cost > Decimal::ZERO {
            net / total_cost * hundred
        } else {
            Decimal::ZERO
        };
        let margin = if self.target_price > Decimal::ZERO {
            net / self.target_price * hundred
        } else {
            Decimal::ZERO
        };
        let fees_total = self.source_price * self.source.fee + self.target_price * self.target.fee;

        Opportunity {
            id: self.id,
            product_name: self.product_name,
            source: SourceLeg {
                marketplace: self.source.name,
                marketplace_id: self.source.id,
                price: self.source_price,
                fee: self.source.fee,
                total_cost,
            },
            target: TargetLeg {
                marketplace: self.target.name,
                marketplace_id: self.target.id,
                price: self.target_price,
                fee: self.target.fee,
                net_revenue,
            },
            profit: ProfitBreakdown { gross, net, roi, margin },
            costs: CostBreakdown {
                shipping: self.shipping,
                fees_total,
            },
            risk: RiskAssessment {
                level: RiskLevel::from_score(self.risk_score),
                score: self.risk_score,
                factors: self.risk_factors,
            },
            ai_prediction: None,
            estimated_sales_per_month: self.estimated_sales_per_month,
            competition_level: self.competition_level,
            trend: self.trend,
            last_updated: Utc::now(),
        }
    }
}

fn money<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    Serialize::serialize(&value.round_dp(2), serializer)
}

fn percent<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    Serialize::serialize(&value.round_dp(1), serializer)
}

fn fraction_as_percent<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    Serialize::serialize(&(*value * Decimal::ONE_HUNDRED).round_dp(1), serializer)
}
