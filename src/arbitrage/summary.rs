//! Aggregate statistics over a result list

use rust_decimal::Decimal;
use serde::Serialize;

use super::opportunity::Opportunity;
use crate::types::RiskLevel;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpportunitySummary {
    /// Mean net profit, 2 dp
    pub avg_profit: Decimal,
    /// Mean ROI percent, 1 dp
    pub avg_roi: Decimal,
    /// Sum of net profit x estimated monthly sales, 2 dp
    pub total_potential_profit: Decimal,
    pub low_risk_count: usize,
    pub high_roi_count: usize,
}

impl OpportunitySummary {
    /// Summarize the final list. Empty input yields all zeros.
    pub fn from_opportunities(opportunities: &[Opportunity], high_roi_percent: Decimal) -> Self {
        let mut total_profit = Decimal::ZERO;
        let mut total_roi = Decimal::ZERO;
        let mut potential = Decimal::ZERO;
        let mut low_risk_count = 0;
        let mut high_roi_count = 0;

        for opp in opportunities {
            total_profit += opp.profit.net;
            total_roi += opp.profit.roi;
            potential += opp.profit.net * Decimal::from(opp.estimated_sales_per_month);
            if opp.risk.level == RiskLevel::Low {
                low_risk_count += 1;
            }
            if opp.profit.roi > high_roi_percent {
                high_roi_count += 1;
            }
        }

        let (avg_profit, avg_roi) = if opportunities.is_empty() {
            (Decimal::ZERO, Decimal::ZERO)
        } else {
            let n = Decimal::from(opportunities.len());
            (total_profit / n, total_roi / n)
        };

        Self {
            avg_profit: avg_profit.round_dp(2),
            avg_roi: avg_roi.round_dp(1),
            total_potential_profit: potential.round_dp(2),
            low_risk_count,
            high_roi_count,
        }
    }
}
