use axum::{extract::State, response::Json};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;

use super::AppState;
use crate::autonomous::{AutonomousDashboard, BASELINE_USERS};

pub async fn revenue(State(state): State<Arc<AppState>>) -> Json<Value> {
    let income = &state.autonomous.income;
    let pricing = income.optimize_pricing(&mut rand::rng());
    Json(json!({
        "passive_revenue": income.projection(),
        "pricing_optimization": pricing,
        "timestamp": Utc::now(),
    }))
}

pub async fn scaling(State(state): State<Arc<AppState>>) -> Json<Value> {
    let mut rng = rand::rng();
    let manager = &state.autonomous.scaling;
    let metrics = manager.monitor(&mut rng);
    let action = manager.apply(&metrics, &mut rng);
    Json(json!({
        "system_metrics": metrics,
        "scaling_action": action,
        "timestamp": Utc::now(),
    }))
}

pub async fn viral(State(state): State<Arc<AppState>>) -> Json<Value> {
    let mut rng = rand::rng();
    let suite = &state.autonomous;
    Json(json!({
        "growth_projections": suite.growth.project(BASELINE_USERS, &mut rng),
        "referral_incentives": suite.growth.referral_incentives(&mut rng),
        "viral_content": suite.income.viral_post(&mut rng),
        "timestamp": Utc::now(),
    }))
}

pub async fn maintenance(State(state): State<Arc<AppState>>) -> Json<Value> {
    let mut rng = rand::rng();
    let system = &state.autonomous.maintenance;
    Json(json!({
        "system_updates": system.run_updates(&mut rng),
        "backup_status": system.backup(&mut rng),
        "health_metrics": system.health(&mut rng),
        "timestamp": Utc::now(),
    }))
}

pub async fn dashboard(State(state): State<Arc<AppState>>) -> Json<AutonomousDashboard> {
    Json(state.autonomous.dashboard(&mut rand::rng()))
}

pub async fn jobs(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({ "jobs": state.jobs.snapshot() }))
}
