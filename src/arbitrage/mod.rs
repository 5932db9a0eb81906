//! Arbitrage opportunity pipeline
//!
//! ```text
//! Generator → Profitability Filter → Ranker → Plan Quota → Summary
//! ```
//!
//! Every stage is a pure transformation over the previous stage's list.
//! Only generation can fail (fewer than two active marketplaces).

mod generator;
mod opportunity;
mod summary;


pub use generator::OpportunityGenerator;
pub use opportunity::{
    CostBreakdown, Opportunity, OpportunityDraft, ProfitBreakdown, RiskAssessment, SourceLeg,
    TargetLeg,
};
pub use summary::OpportunitySummary;

use rand::Rng;
use rust_decimal::prelude::*;
use serde::Serialize;

use crate::config::{ArbitrageConfig, PlanLimits};
use crate::error::Result;
use crate::ml::PricePredictor;
use crate::types::{MarketplaceSet, PlanTier};

/// Response payload of one scan
#[derive(Debug, Clone, Serialize)]
pub struct ArbitrageReport {
    pub total_opportunities: usize,
    pub opportunities: Vec<Opportunity>,
    pub summary: OpportunitySummary,
    /// Cosmetic duration string, e.g. "3.42s"
    pub scan_time: String,
    pub marketplaces_scanned: usize,
}

/// Runs the opportunity pipeline for one caller
#[derive(Debug, Clone)]
pub struct ArbitrageScanner {
    config: ArbitrageConfig,
    limits: PlanLimits,
}

impl ArbitrageScanner {
    pub fn new(config: ArbitrageConfig, limits: PlanLimits) -> Self {
        Self { config, limits }
    }

    pub fn config(&self) -> &ArbitrageConfig {
        &self.config
    }

    pub fn limits(&self) -> &PlanLimits {
        &self.limits
    }

    /// Stage 1: synthetic candidates
    pub fn generate<R: Rng + ?Sized>(
        &self,
        markets: &MarketplaceSet,
        rng: &mut R,
    ) -> Result<Vec<Opportunity>> {
        OpportunityGenerator::new(&self.config).generate(markets, rng)
    }

    /// Both thresholds are strict
    pub fn is_profitable(&self, opportunity: &Opportunity) -> bool {
        opportunity.profit.net > self.config.min_net_profit
            && opportunity.profit.roi > self.config.min_roi_percent
    }

    /// Stage 2: keep profitable candidates, order preserved
    pub fn filter_profitable(&self, candidates: Vec<Opportunity>) -> Vec<Opportunity> {
        candidates
            .into_iter()
            .filter(|o| self.is_profitable(o))
            .collect()
    }

    /// Stage 3: net profit descending; stable so ties keep generation order
    pub fn rank(opportunities: &mut [Opportunity]) {
        opportunities.sort_by(|a, b| b.profit.net.cmp(&a.profit.net));
    }

    /// Stage 4: truncate to the tier's limit
    pub fn apply_quota(&self, tier: PlanTier, mut ranked: Vec<Opportunity>) -> Vec<Opportunity> {
        ranked.truncate(self.limits.limit_for(tier));
        ranked
    }

    /// Stage 5
    pub fn summarize(&self, opportunities: &[Opportunity]) -> OpportunitySummary {
        OpportunitySummary::from_opportunities(opportunities, self.config.high_roi_percent)
    }

    /// Run the full pipeline.
    ///
    /// The predictor, when given, decorates the final entries with a price
    /// forecast; it never influences filtering or ranking.
    pub fn scan<R: Rng + ?Sized>(
        &self,
        tier: PlanTier,
        markets: &MarketplaceSet,
        predictor: Option<&dyn PricePredictor>,
        rng: &mut R,
    ) -> Result<ArbitrageReport> {
        let candidates = self.generate(markets, rng)?;
        let generated = candidates.len();

        let mut profitable = self.filter_profitable(candidates);
        Self::rank(&mut profitable);
        let passed = profitable.len();

        let mut opportunities = self.apply_quota(tier, profitable);

        if let Some(predictor) = predictor {
            for opp in opportunities.iter_mut() {
                let price = opp.target.price.to_f64().unwrap_or_default();
                opp.ai_prediction = Some(predictor.predict(
                    price,
                    rng.random_range(0..10),
                    rng.random_range(0..5),
                ));
            }
        }

        let summary = self.summarize(&opportunities);

        tracing::debug!(
            "Scan for {} plan: {} generated, {} profitable, {} returned",
            tier,
            generated,
            passed,
            opportunities.len()
        );

        Ok(ArbitrageReport {
            total_opportunities: opportunities.len(),
            opportunities,
            summary,
            scan_time: format!("{:.2}s", rng.random_range(2.5..8.0)),
            marketplaces_scanned: markets.len(),
        })
    }
}
