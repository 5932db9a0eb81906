//! Simulated multi-marketplace product search
//!
//! No marketplace is contacted; every active marketplace yields a handful
//! of synthetic listings for the query.

use rand::seq::IndexedRandom;
use rand::Rng;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{HubError, Result};
use crate::types::MarketplaceSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    InStock,
    Limited,
    OutOfStock,
}

const AVAILABILITY: [Availability; 3] = [
    Availability::InStock,
    Availability::Limited,
    Availability::OutOfStock,
];

#[derive(Debug, Clone, Serialize)]
pub struct ProductListing {
    pub id: String,
    pub title: String,
    pub marketplace: String,
    pub marketplace_id: String,
    pub price: Decimal,
    pub currency: &'static str,
    pub availability: Availability,
    pub rating: Decimal,
    pub reviews: u32,
    pub shipping_cost: Decimal,
    pub estimated_delivery: String,
    pub seller_rating: Decimal,
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub total_results: usize,
    pub marketplaces_searched: usize,
    pub results: Vec<ProductListing>,
    pub search_time: String,
}

/// Fixed-point draw in `[lo, hi]` hundredths
fn cents<R: Rng + ?Sized>(rng: &mut R, lo: i64, hi: i64) -> Decimal {
    Decimal::new(rng.random_range(lo..=hi), 2)
}

/// One-decimal draw in `[lo, hi]` tenths
fn tenths<R: Rng + ?Sized>(rng: &mut R, lo: i64, hi: i64) -> Decimal {
    Decimal::new(rng.random_range(lo..=hi), 1)
}

/// Produce 3-8 listings per active marketplace
pub fn search<R: Rng + ?Sized>(
    query: &str,
    markets: &MarketplaceSet,
    rng: &mut R,
) -> Result<SearchResponse> {
    let query = query.trim();
    if query.is_empty() {
        return Err(HubError::Validation("Search query is required".into()));
    }

    let image_text = query.replace(' ', "+");
    let mut results = Vec::new();

    for market in markets.iter() {
        let listings = rng.random_range(3..=8);
        for i in 0..listings {
            results.push(ProductListing {
                id: format!("{}_{}_{}", market.id, i, rng.random_range(1000..=9999)),
                title: format!("{} - Variant {}", query, i + 1),
                marketplace: market.name.clone(),
                marketplace_id: market.id.clone(),
                price: cents(rng, 1_000, 50_000),
                currency: "EUR",
                availability: AVAILABILITY
                    .choose(rng)
                    .copied()
                    .unwrap_or(Availability::InStock),
                rating: tenths(rng, 35, 50),
                reviews: rng.random_range(10..=1000),
                shipping_cost: cents(rng, 0, 1_500),
                estimated_delivery: format!("{} days", rng.random_range(1..=14)),
                seller_rating: tenths(rng, 40, 50),
                image_url: format!("https://via.placeholder.com/300x300?text={}", image_text),
            });
        }
    }

    Ok(SearchResponse {
        query: query.to_string(),
        total_results: results.len(),
        marketplaces_searched: markets.len(),
        results,
        search_time: format!("{:.2}s", rng.random_range(0.5..2.0)),
    })
}
