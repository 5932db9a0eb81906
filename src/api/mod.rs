//! HTTP API
//!
//! JSON over axum. Protected routes take an [`AuthUser`], which resolves
//! the bearer token to an account email before the handler runs.

mod auth;
mod autonomous;
mod market;
mod payments;

#[cfg(test)]
mod tests;

use axum::{
    body::Bytes,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    routing::{get, post},
    Router,
};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::arbitrage::ArbitrageScanner;
use crate::auth::{bearer_token, PasswordHasher, TokenSigner};
use crate::autonomous::{AutonomousOpsJob, AutonomousSuite, MarketingAutomationJob};
use crate::config::Config;
use crate::error::{HubError, Result};
use crate::ml::{PricePredictor, SimulatedPricePredictor, TRAINING_SAMPLES, TRAINING_SEED};
use crate::payments::{CheckoutProvider, SimulatedCheckout};
use crate::scheduler::{JobBoard, JobScheduler, JobSpec};
use crate::storage::{open_repository, seed_demo_user, UserRepository};
use crate::types::{MarketplaceSet, User};

/// Everything a request handler can reach
pub struct AppState {
    pub config: Config,
    pub users: Arc<dyn UserRepository>,
    pub scanner: ArbitrageScanner,
    pub markets: MarketplaceSet,
    pub predictor: Arc<dyn PricePredictor>,
    pub hasher: PasswordHasher,
    pub tokens: TokenSigner,
    pub checkout: Arc<dyn CheckoutProvider>,
    pub autonomous: Arc<AutonomousSuite>,
    pub jobs: JobBoard,
}

impl AppState {
    /// Assemble the default wiring for `config`: storage backend, simulated
    /// predictor and checkout, optional demo account
    pub async fn from_config(config: Config) -> Result<Self> {
        let users = open_repository(&config.storage).await?;
        let predictor: Arc<dyn PricePredictor> =
            Arc::new(SimulatedPricePredictor::train(TRAINING_SAMPLES, TRAINING_SEED)?);
        Self::with_parts(config, users, predictor, Arc::new(SimulatedCheckout)).await
    }

    pub async fn with_parts(
        config: Config,
        users: Arc<dyn UserRepository>,
        predictor: Arc<dyn PricePredictor>,
        checkout: Arc<dyn CheckoutProvider>,
    ) -> Result<Self> {
        let hasher = PasswordHasher::new(config.auth.password_iterations);
        if config.storage.seed_demo_user {
            seed_demo_user(users.as_ref(), &hasher).await?;
        }

        let markets = MarketplaceSet::from_catalogue(&config.marketplaces);
        if markets.len() < 2 {
            warn!(
                "Only {} active marketplaces; opportunity scans will fail",
                markets.len()
            );
        }

        info!(
            "Predictor '{}' ready, {} active marketplaces, checkout via {}",
            predictor.name(),
            markets.len(),
            checkout.name()
        );

        Ok(Self {
            scanner: ArbitrageScanner::new(config.arbitrage.clone(), config.plans.clone()),
            tokens: TokenSigner::new(&config.auth.jwt_secret, config.auth.token_ttl_days)?,
            hasher,
            markets,
            users,
            predictor,
            checkout,
            autonomous: Arc::new(AutonomousSuite::new()),
            jobs: JobBoard::default(),
            config,
        })
    }

    /// Scheduler for the background jobs, reporting into `self.jobs`
    pub fn build_scheduler(&self) -> JobScheduler {
        let jobs = &self.config.jobs;
        let mut scheduler = JobScheduler::with_board(self.jobs.clone());

        scheduler.register(JobSpec::new(
            Arc::new(AutonomousOpsJob::new(self.autonomous.clone())),
            Duration::from_secs(jobs.autonomous_interval_secs),
            Duration::from_secs(jobs.autonomous_retry_secs),
        ));
        scheduler.register(JobSpec::new(
            Arc::new(MarketingAutomationJob::new(self.autonomous.clone())),
            Duration::from_secs(jobs.marketing_interval_secs),
            Duration::from_secs(jobs.marketing_retry_secs),
        ));

        scheduler
    }

    /// Account behind an authenticated request
    pub async fn account(&self, caller: &AuthUser) -> Result<User> {
        self.users
            .find_by_email(&caller.email)
            .await?
            .ok_or_else(|| HubError::NotFound("User not found".into()))
    }
}

/// Caller identity taken from a valid bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = HubError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> std::result::Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| HubError::Unauthorized("Missing authorization header".into()))?;

        let token = bearer_token(header)
            .ok_or_else(|| HubError::Unauthorized("Expected a bearer token".into()))?;

        let claims = state.tokens.verify(token).inspect_err(|e| {
            warn!("Rejected token: {}", e);
        })?;

        Ok(AuthUser { email: claims.sub })
    }
}

/// Decode a JSON request body; an empty body reads as `{}`
pub(crate) fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T> {
    let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
        b"{}"
    } else {
        body
    };
    serde_json::from_slice(body)
        .map_err(|e| HubError::Validation(format!("Invalid JSON body: {}", e)))
}

/// Treat absent and blank strings alike
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(market::health))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/search", post(market::search))
        .route("/api/arbitrage/opportunities", get(market::opportunities))
        .route("/api/predict/price", post(market::predict_price))
        .route("/api/stats/dashboard", get(market::dashboard))
        .route("/api/marketplaces", get(market::marketplaces))
        .route("/api/payments/config", get(payments::config))
        .route(
            "/api/payments/create-checkout-session",
            post(payments::create_checkout_session),
        )
        .route("/api/payments/webhook", post(payments::webhook))
        .route("/success", get(payments::success_page))
        .route("/cancel", get(payments::cancel_page))
        .route("/api/autonomous/revenue", get(autonomous::revenue))
        .route("/api/autonomous/scaling", get(autonomous::scaling))
        .route("/api/autonomous/viral", get(autonomous::viral))
        .route("/api/autonomous/maintenance", get(autonomous::maintenance))
        .route("/api/autonomous/dashboard", get(autonomous::dashboard))
        .route("/api/autonomous/jobs", get(autonomous::jobs))
        .with_state(state)
}

/// Serve until `shutdown` resolves
pub async fn serve(
    state: Arc<AppState>,
    addr: SocketAddr,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
