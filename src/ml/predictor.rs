//! Least-squares price model trained on synthetic data
//!
//! Training samples mimic a product catalogue: a current price, a category
//! code, a marketplace code, a seasonality factor in [-1, 1] and an
//! exponentially distributed demand level. The synthetic target is
//! `price * (1 + 0.1 * season + 0.05 * demand + noise)`, so a linear model
//! over `[1, p, p*season, p*demand, category, marketplace]` recovers it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp, Normal};
use rust_decimal::prelude::*;
use std::f64::consts::PI;

use super::{PricePrediction, PricePredictor};
use crate::error::{HubError, Result};

/// Samples drawn at startup
pub const TRAINING_SAMPLES: usize = 10_000;
/// Fixed seed so every process trains the same model
pub const TRAINING_SEED: u64 = 42;

const FEATURES: usize = 6;
const PIVOT_TOLERANCE: f64 = 1e-12;
const DEMAND_MEAN: f64 = 2.0;
const NOISE_STD_DEV: f64 = 0.02;

/// Simulated price forecaster (ordinary least squares)
#[derive(Debug, Clone)]
pub struct SimulatedPricePredictor {
    coefficients: [f64; FEATURES],
    samples: usize,
}

impl SimulatedPricePredictor {
    /// Generate synthetic data and fit the model
    pub fn train(samples: usize, seed: u64) -> Result<Self> {
        if samples < FEATURES {
            return Err(HubError::Validation(format!(
                "need at least {} training samples, got {}",
                FEATURES, samples
            )));
        }

        let demand_dist = Exp::new(1.0 / DEMAND_MEAN)
            .map_err(|e| HubError::Internal(format!("demand distribution: {}", e)))?;
        let noise_dist = Normal::new(0.0, NOISE_STD_DEV)
            .map_err(|e| HubError::Internal(format!("noise distribution: {}", e)))?;

        let mut rng = StdRng::seed_from_u64(seed);
        let mut xtx = [[0.0f64; FEATURES]; FEATURES];
        let mut xty = [0.0f64; FEATURES];

        for _ in 0..samples {
            let price = rng.random::<f64>() * 1000.0;
            let category = rng.random_range(0..10) as f64;
            let marketplace = rng.random_range(0..5) as f64;
            let season = (rng.random::<f64>() * 2.0 * PI).sin();
            let demand = demand_dist.sample(&mut rng);
            let noise = noise_dist.sample(&mut rng);

            let target = price * (1.0 + 0.1 * season + 0.05 * demand + noise);
            let row = feature_row(price, category, marketplace, season, demand);

            for i in 0..FEATURES {
                xty[i] += row[i] * target;
                for j in 0..FEATURES {
                    xtx[i][j] += row[i] * row[j];
                }
            }
        }

        let coefficients = solve_normal_equations(xtx, xty)?;
        tracing::info!("Price model trained on {} synthetic samples", samples);

        Ok(Self { coefficients, samples })
    }

    pub fn coefficients(&self) -> &[f64; FEATURES] {
        &self.coefficients
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Raw model output with explicit seasonality and demand
    pub fn forecast(&self, price: f64, category: u32, marketplace: u32, season: f64, demand: f64) -> f64 {
        let row = feature_row(price, category as f64, marketplace as f64, season, demand);
        row.iter().zip(self.coefficients.iter()).map(|(x, b)| x * b).sum()
    }
}

impl PricePredictor for SimulatedPricePredictor {
    fn predict(&self, current_price: f64, category: u32, marketplace: u32) -> PricePrediction {
        // Neutral season, unit demand
        let predicted = self.forecast(current_price, category, marketplace, 0.0, 1.0);
        let confidence = rand::rng().random_range(0.85..0.97);
        let change = if current_price != 0.0 {
            (predicted - current_price) / current_price * 100.0
        } else {
            0.0
        };

        PricePrediction {
            predicted_price: to_decimal(predicted).round_dp(2),
            confidence: to_decimal(confidence).round_dp(3),
            change_percent: to_decimal(change).round_dp(2),
        }
    }

    fn name(&self) -> &str {
        "simulated-ols"
    }
}

fn feature_row(price: f64, category: f64, marketplace: f64, season: f64, demand: f64) -> [f64; FEATURES] {
    [1.0, price, price * season, price * demand, category, marketplace]
}

/// Solve (X'X) b = X'y with Gauss-Jordan elimination and partial pivoting
pub(crate) fn solve_normal_equations<const N: usize>(
    mut a: [[f64; N]; N],
    mut b: [f64; N],
) -> Result<[f64; N]> {
    for col in 0..N {
        // Find pivot
        let mut max_row = col;
        let mut max_val = a[col][col].abs();
        for row in (col + 1)..N {
            if a[row][col].abs() > max_val {
                max_val = a[row][col].abs();
                max_row = row;
            }
        }

        if max_val < PIVOT_TOLERANCE {
            return Err(HubError::Internal("singular normal matrix".into()));
        }

        if max_row != col {
            a.swap(col, max_row);
            b.swap(col, max_row);
        }

        let pivot = a[col][col];
        for j in 0..N {
            a[col][j] /= pivot;
        }
        b[col] /= pivot;

        let pivot_row = a[col];
        let pivot_b = b[col];
        for row in 0..N {
            if row != col {
                let factor = a[row][col];
                for j in 0..N {
                    a[row][j] -= factor * pivot_row[j];
                }
                b[row] -= factor * pivot_b;
            }
        }
    }

    Ok(b)
}

fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}
