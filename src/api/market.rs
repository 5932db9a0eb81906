use axum::{body::Bytes, extract::State, response::Json};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use super::{parse_body, AppState, AuthUser};
use crate::arbitrage::ArbitrageReport;
use crate::error::{HubError, Result};
use crate::ml::{PricePrediction, Recommendation};
use crate::search::{self, SearchResponse};
use crate::stats::{dashboard_stats, DashboardStats};

pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "ai_status": if state.predictor.is_ready() { "active" } else { "training" },
        "predictor": state.predictor.name(),
        "marketplaces": state.config.marketplaces.len(),
        "timestamp": Utc::now(),
    }))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    query: String,
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    body: Bytes,
) -> Result<Json<SearchResponse>> {
    let user = state.account(&caller).await?;
    let request: SearchRequest = parse_body(&body)?;

    // ThreadRng is !Send; it must be gone before the next await
    let response = {
        let mut rng = rand::rng();
        search::search(&request.query, &state.markets, &mut rng)?
    };
    state.users.increment_api_calls(&user.email).await?;

    Ok(Json(response))
}

pub async fn opportunities(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
) -> Result<Json<ArbitrageReport>> {
    let user = state.account(&caller).await?;

    let report = state.scanner.scan(
        user.plan,
        &state.markets,
        Some(state.predictor.as_ref()),
        &mut rand::rng(),
    )?;

    Ok(Json(report))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PredictRequest {
    current_price: Option<f64>,
    category: u32,
    marketplace: u32,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    current_price: f64,
    prediction: PricePrediction,
    recommendation: Recommendation,
    timestamp: DateTime<Utc>,
}

pub async fn predict_price(
    State(state): State<Arc<AppState>>,
    _caller: AuthUser,
    body: Bytes,
) -> Result<Json<PredictResponse>> {
    let request: PredictRequest = parse_body(&body)?;
    let current_price = request
        .current_price
        .filter(|p| p.is_finite() && *p > 0.0)
        .ok_or_else(|| HubError::Validation("A positive current_price is required".into()))?;

    let prediction = state
        .predictor
        .predict(current_price, request.category, request.marketplace);

    Ok(Json(PredictResponse {
        current_price,
        recommendation: Recommendation::from_change(prediction.change_percent),
        prediction,
        timestamp: Utc::now(),
    }))
}

pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
) -> Result<Json<DashboardStats>> {
    let user = state.account(&caller).await?;
    let stats = dashboard_stats(
        &user,
        &state.markets,
        state.config.marketplaces.len(),
        &mut rand::rng(),
    );
    Ok(Json(stats))
}

pub async fn marketplaces(State(state): State<Arc<AppState>>) -> Json<Value> {
    let catalogue = &state.config.marketplaces;
    let fees: Vec<Decimal> = catalogue.values().map(|m| m.fee).collect();
    Json(json!({
        "marketplaces": catalogue,
        "total": catalogue.len(),
        "active": state.markets.len(),
        "lowest_fee": fees.iter().min(),
    }))
}
