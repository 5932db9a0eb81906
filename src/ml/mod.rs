//! Price prediction
//!
//! The predictor here is a **simulation**: it is fitted to synthetic,
//! randomly generated training data and carries no statistical guarantee.
//! It exists so the API can return a plausible-looking forecast next to
//! each opportunity. Swap in a real model by implementing [`PricePredictor`].

pub mod predictor;

#[cfg(test)]
mod tests;

pub use predictor::{SimulatedPricePredictor, TRAINING_SAMPLES, TRAINING_SEED};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Forecast for a single product price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePrediction {
    /// Forecast price, 2 dp
    pub predicted_price: Decimal,
    /// Model confidence (0-1), 3 dp
    pub confidence: Decimal,
    /// Relative change vs. current price in percent, 2 dp
    pub change_percent: Decimal,
}

/// Trading recommendation derived from the forecast change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Buy,
    Hold,
    Sell,
}

impl Recommendation {
    pub fn from_change(change_percent: Decimal) -> Self {
        if change_percent > Decimal::from(5) {
            Recommendation::Buy
        } else if change_percent > Decimal::from(-5) {
            Recommendation::Hold
        } else {
            Recommendation::Sell
        }
    }
}

/// Trait for price forecasters
pub trait PricePredictor: Send + Sync {
    /// Forecast the next price for a product.
    ///
    /// `category` and `marketplace` are opaque numeric codes.
    fn predict(&self, current_price: f64, category: u32, marketplace: u32) -> PricePrediction;

    /// Model name for logging
    fn name(&self) -> &str;

    fn is_ready(&self) -> bool {
        true
    }
}
