//! Arbitrage Hub
//!
//! A subscription service that surfaces cross-marketplace resale
//! opportunities. All market data is simulated.
//!
//! ## Architecture
//!
//! ```text
//! HTTP (axum) → Auth (bearer token) → Arbitrage pipeline → Plan quota
//!      ↓                                     ↑
//!   Payments (checkout, webhooks)      Price predictor
//!      ↓
//!   User store (memory / SQLite)       Scheduler → Autonomous jobs
//! ```

pub mod api;
pub mod arbitrage;
pub mod auth;
pub mod autonomous;
pub mod config;
pub mod error;
pub mod ml;
pub mod payments;
pub mod scheduler;
pub mod search;
pub mod stats;
pub mod storage;
pub mod types;

#[cfg(test)]
mod config_tests;
