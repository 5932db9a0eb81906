//! Service configuration
//!
//! Loaded from an optional TOML file and overridden by environment
//! variables prefixed with `ARBITRAGE_HUB` (nested keys use `__`, e.g.
//! `ARBITRAGE_HUB__SERVER__PORT=8080`). Every section has defaults, so an
//! empty or missing file yields a runnable configuration.

use crate::error::{HubError, Result};
use crate::types::PlanTier;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub arbitrage: ArbitrageConfig,
    #[serde(default)]
    pub plans: PlanLimits,
    #[serde(default = "default_marketplaces")]
    pub marketplaces: BTreeMap<String, MarketplaceConfig>,
    #[serde(default)]
    pub payments: PaymentsConfig,
    #[serde(default)]
    pub jobs: JobsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            storage: StorageConfig::default(),
            arbitrage: ArbitrageConfig::default(),
            plans: PlanLimits::default(),
            marketplaces: default_marketplaces(),
            payments: PaymentsConfig::default(),
            jobs: JobsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Upper bound on access token lifetime (ten years)
pub const MAX_TOKEN_TTL_DAYS: i64 = 3650;

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for signing access tokens
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_days")]
    pub token_ttl_days: i64,
    /// PBKDF2 rounds for password hashing
    #[serde(default = "default_password_iterations")]
    pub password_iterations: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl_days: default_token_ttl_days(),
            password_iterations: default_password_iterations(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// SQLite file path (`~` and `$VARS` are expanded)
    #[serde(default = "default_db_path")]
    pub path: String,
    /// Create the demo account on startup if it does not exist
    #[serde(default = "default_true")]
    pub seed_demo_user: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_db_path(),
            seed_demo_user: true,
        }
    }
}

/// Inclusive integer range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

/// Half-open float range `[min, max)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatRange {
    pub min: f64,
    pub max: f64,
}

/// Opportunity generator and filter settings
#[derive(Debug, Clone, Deserialize)]
pub struct ArbitrageConfig {
    #[serde(default = "default_candidate_count")]
    pub candidate_count: CountRange,
    #[serde(default = "default_source_price")]
    pub source_price: FloatRange,
    /// Target price = source price x multiplier; min must exceed 1.0
    #[serde(default = "default_price_multiplier")]
    pub price_multiplier: FloatRange,
    #[serde(default = "default_shipping_cost")]
    pub shipping_cost: FloatRange,
    #[serde(default = "default_risk_score")]
    pub risk_score: FloatRange,
    #[serde(default = "default_monthly_sales")]
    pub monthly_sales: CountRange,
    /// Net profit must be strictly greater than this
    #[serde(default = "default_min_net_profit")]
    pub min_net_profit: Decimal,
    /// ROI (percent) must be strictly greater than this
    #[serde(default = "default_min_roi_percent")]
    pub min_roi_percent: Decimal,
    /// ROI (percent) above which an entry counts as high-ROI in the summary
    #[serde(default = "default_high_roi_percent")]
    pub high_roi_percent: Decimal,
}

impl Default for ArbitrageConfig {
    fn default() -> Self {
        Self {
            candidate_count: default_candidate_count(),
            source_price: default_source_price(),
            price_multiplier: default_price_multiplier(),
            shipping_cost: default_shipping_cost(),
            risk_score: default_risk_score(),
            monthly_sales: default_monthly_sales(),
            min_net_profit: default_min_net_profit(),
            min_roi_percent: default_min_roi_percent(),
            high_roi_percent: default_high_roi_percent(),
        }
    }
}

/// Maximum opportunities returned per subscription tier
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlanLimits {
    #[serde(default = "default_starter_limit")]
    pub starter: usize,
    #[serde(default = "default_professional_limit")]
    pub professional: usize,
    #[serde(default = "default_enterprise_limit")]
    pub enterprise: usize,
}

impl PlanLimits {
    pub fn limit_for(&self, tier: PlanTier) -> usize {
        match tier {
            PlanTier::Starter => self.starter,
            PlanTier::Professional => self.professional,
            PlanTier::Enterprise => self.enterprise,
        }
    }

    /// Limit for a raw tier name; unknown names get the starter limit
    pub fn limit_for_name(&self, tier: &str) -> usize {
        self.limit_for(PlanTier::from(tier))
    }
}

impl Default for PlanLimits {
    fn default() -> Self {
        Self {
            starter: default_starter_limit(),
            professional: default_professional_limit(),
            enterprise: default_enterprise_limit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketplaceConfig {
    pub name: String,
    /// Fee as a fraction of the sale price
    pub fee: Decimal,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentsConfig {
    #[serde(default = "default_publishable_key")]
    pub publishable_key: String,
    /// Shared secret for webhook signatures; webhooks are rejected when unset
    #[serde(default)]
    pub webhook_secret: Option<String>,
    /// Base URL used for checkout success/cancel redirects
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    #[serde(default = "default_signature_tolerance_secs")]
    pub signature_tolerance_secs: i64,
}

impl Default for PaymentsConfig {
    fn default() -> Self {
        Self {
            publishable_key: default_publishable_key(),
            webhook_secret: None,
            public_base_url: default_public_base_url(),
            signature_tolerance_secs: default_signature_tolerance_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_autonomous_interval")]
    pub autonomous_interval_secs: u64,
    #[serde(default = "default_autonomous_retry")]
    pub autonomous_retry_secs: u64,
    #[serde(default = "default_marketing_interval")]
    pub marketing_interval_secs: u64,
    #[serde(default = "default_marketing_retry")]
    pub marketing_retry_secs: u64,
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            autonomous_interval_secs: default_autonomous_interval(),
            autonomous_retry_secs: default_autonomous_retry(),
            marketing_interval_secs: default_marketing_interval(),
            marketing_retry_secs: default_marketing_retry(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    pub fn load(path: &str) -> Result<Self> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("ARBITRAGE_HUB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: Config = settings.try_deserialize()?;
        config.storage.path = shellexpand::full(&config.storage.path)
            .map_err(|e| HubError::Validation(format!("Invalid storage path: {}", e)))?
            .into_owned();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(HubError::Validation("auth.jwt_secret must not be empty".into()));
        }
        if self.auth.token_ttl_days <= 0 || self.auth.token_ttl_days > MAX_TOKEN_TTL_DAYS {
            return Err(HubError::Validation(format!(
                "auth.token_ttl_days must lie within [1, {}]",
                MAX_TOKEN_TTL_DAYS
            )));
        }
        if self.auth.password_iterations == 0 {
            return Err(HubError::Validation("auth.password_iterations must be positive".into()));
        }

        let a = &self.arbitrage;
        check_count("arbitrage.candidate_count", a.candidate_count)?;
        check_count("arbitrage.monthly_sales", a.monthly_sales)?;
        check_float("arbitrage.source_price", a.source_price)?;
        check_float("arbitrage.price_multiplier", a.price_multiplier)?;
        check_float("arbitrage.shipping_cost", a.shipping_cost)?;
        check_float("arbitrage.risk_score", a.risk_score)?;

        if a.source_price.min <= 0.0 {
            return Err(HubError::Validation("arbitrage.source_price.min must be positive".into()));
        }
        if a.price_multiplier.min <= 1.0 {
            return Err(HubError::Validation(
                "arbitrage.price_multiplier.min must exceed 1.0".into(),
            ));
        }
        if a.shipping_cost.min < 0.0 {
            return Err(HubError::Validation("arbitrage.shipping_cost must be non-negative".into()));
        }
        if a.risk_score.min < 0.0 || a.risk_score.max > 100.0 {
            return Err(HubError::Validation("arbitrage.risk_score must lie within [0, 100]".into()));
        }

        for (id, market) in &self.marketplaces {
            if market.fee < Decimal::ZERO || market.fee >= Decimal::ONE {
                return Err(HubError::Validation(format!(
                    "marketplace '{}' fee {} must lie within [0, 1)",
                    id, market.fee
                )));
            }
        }

        Ok(())
    }
}

fn check_count(name: &str, range: CountRange) -> Result<()> {
    if range.min > range.max {
        return Err(HubError::Validation(format!(
            "{}: min {} exceeds max {}",
            name, range.min, range.max
        )));
    }
    Ok(())
}

fn check_float(name: &str, range: FloatRange) -> Result<()> {
    if !range.min.is_finite() || !range.max.is_finite() || range.min >= range.max {
        return Err(HubError::Validation(format!(
            "{}: invalid range [{}, {})",
            name, range.min, range.max
        )));
    }
    Ok(())
}

fn default_true() -> bool {
    true
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_jwt_secret() -> String {
    "change-me-in-production".to_string()
}

fn default_token_ttl_days() -> i64 {
    30
}

fn default_password_iterations() -> u32 {
    10_000
}

fn default_db_path() -> String {
    "~/.arbitrage_hub/users.db".to_string()
}

fn default_candidate_count() -> CountRange {
    CountRange { min: 15, max: 50 }
}

fn default_source_price() -> FloatRange {
    FloatRange { min: 20.0, max: 300.0 }
}

fn default_price_multiplier() -> FloatRange {
    FloatRange { min: 1.15, max: 2.5 }
}

fn default_shipping_cost() -> FloatRange {
    FloatRange { min: 2.0, max: 12.0 }
}

fn default_risk_score() -> FloatRange {
    FloatRange { min: 10.0, max: 85.0 }
}

fn default_monthly_sales() -> CountRange {
    CountRange { min: 5, max: 50 }
}

fn default_min_net_profit() -> Decimal {
    dec!(5)
}

fn default_min_roi_percent() -> Decimal {
    dec!(10)
}

fn default_high_roi_percent() -> Decimal {
    dec!(50)
}

fn default_starter_limit() -> usize {
    20
}

fn default_professional_limit() -> usize {
    100
}

fn default_enterprise_limit() -> usize {
    1000
}

fn default_publishable_key() -> String {
    "pk_test_placeholder".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_signature_tolerance_secs() -> i64 {
    300
}

fn default_autonomous_interval() -> u64 {
    3600
}

fn default_autonomous_retry() -> u64 {
    300
}

fn default_marketing_interval() -> u64 {
    86_400
}

fn default_marketing_retry() -> u64 {
    3600
}

/// Built-in marketplace catalogue
pub fn default_marketplaces() -> BTreeMap<String, MarketplaceConfig> {
    [
        ("amazon", "Amazon", dec!(0.15)),
        ("ebay", "eBay", dec!(0.12)),
        ("aliexpress", "AliExpress", dec!(0.08)),
        ("walmart", "Walmart", dec!(0.10)),
        ("shopify", "Shopify", dec!(0.029)),
        ("etsy", "Etsy", dec!(0.065)),
        ("mercadolivre", "Mercado Livre", dec!(0.11)),
        ("olx", "OLX", dec!(0.05)),
        ("facebook", "Facebook Marketplace", dec!(0.05)),
        ("kuantokusta", "KuantoKusta", dec!(0.08)),
    ]
    .into_iter()
    .map(|(id, name, fee)| {
        (
            id.to_string(),
            MarketplaceConfig {
                name: name.to_string(),
                fee,
                active: true,
            },
        )
    })
    .collect()
}
