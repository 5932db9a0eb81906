//! Synthetic opportunity generator

use rand::seq::IndexedRandom;
use rand::Rng;
use rust_decimal::prelude::*;

use super::opportunity::{Opportunity, OpportunityDraft};
use crate::config::{ArbitrageConfig, CountRange, FloatRange};
use crate::error::Result;
use crate::types::{CompetitionLevel, MarketplaceSet, Trend};

const PRODUCTS: [&str; 6] = [
    "iPhone Case",
    "Bluetooth Speaker",
    "Smartwatch",
    "Headphones",
    "Power Bank",
    "Laptop Stand",
];

const RISK_FACTORS: [&str; 5] = [
    "High competition",
    "Seasonality",
    "Price volatility",
    "Limited availability",
    "New to market",
];

const COMPETITION: [CompetitionLevel; 3] =
    [CompetitionLevel::Low, CompetitionLevel::Medium, CompetitionLevel::High];

const TRENDS: [Trend; 3] = [Trend::Rising, Trend::Stable, Trend::Declining];

/// Draws candidate opportunities from configured ranges
pub struct OpportunityGenerator<'a> {
    config: &'a ArbitrageConfig,
}

impl<'a> OpportunityGenerator<'a> {
    pub fn new(config: &'a ArbitrageConfig) -> Self {
        Self { config }
    }

    /// Produce a fresh candidate list.
    ///
    /// Fails with a configuration error when fewer than two marketplaces are
    /// active, since no source/target pair can be formed.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        markets: &MarketplaceSet,
        rng: &mut R,
    ) -> Result<Vec<Opportunity>> {
        markets.ensure_pairable()?;

        let count = draw_count(rng, self.config.candidate_count);
        let mut candidates = Vec::with_capacity(count as usize);

        for i in 0..count {
            candidates.push(self.draft(i as usize, markets, rng).evaluate());
        }

        Ok(candidates)
    }

    fn draft<R: Rng + ?Sized>(
        &self,
        index: usize,
        markets: &MarketplaceSet,
        rng: &mut R,
    ) -> OpportunityDraft {
        let pool = markets.as_slice();

        // Uniform over the remaining marketplaces, never the source itself
        let source_idx = rng.random_range(0..pool.len());
        let mut target_idx = rng.random_range(0..pool.len() - 1);
        if target_idx >= source_idx {
            target_idx += 1;
        }

        let source_price = draw_float(rng, self.config.source_price);
        let multiplier = draw_float(rng, self.config.price_multiplier);
        let shipping = draw_float(rng, self.config.shipping_cost);
        let risk_score = draw_float(rng, self.config.risk_score);

        let factor_count = rng.random_range(1..=3);
        let risk_factors = RISK_FACTORS
            .choose_multiple(rng, factor_count)
            .map(|f| f.to_string())
            .collect();

        let product = PRODUCTS.choose(rng).copied().unwrap_or(PRODUCTS[0]);

        OpportunityDraft {
            id: format!("opp_{}_{}", index + 1, rng.random_range(1000..=9999)),
            product_name: format!("Product {} - {}", index + 1, product),
            source: pool[source_idx].clone(),
            source_price: to_decimal(source_price),
            target: pool[target_idx].clone(),
            target_price: to_decimal(source_price * multiplier),
            shipping: to_decimal(shipping),
            risk_score: to_decimal(risk_score),
            risk_factors,
            estimated_sales_per_month: draw_count(rng, self.config.monthly_sales),
            competition_level: COMPETITION.choose(rng).copied().unwrap_or(CompetitionLevel::Medium),
            trend: TRENDS.choose(rng).copied().unwrap_or(Trend::Stable),
        }
    }
}

fn draw_count<R: Rng + ?Sized>(rng: &mut R, range: CountRange) -> u32 {
    if range.min >= range.max {
        return range.min;
    }
    rng.random_range(range.min..=range.max)
}

fn draw_float<R: Rng + ?Sized>(rng: &mut R, range: FloatRange) -> f64 {
    if range.min >= range.max {
        return range.min;
    }
    rng.random_range(range.min..range.max)
}

fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}
