//! Tests for configuration

#[cfg(test)]
mod tests {
    use super::super::config::*;
    use crate::types::PlanTier;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.auth.token_ttl_days, 30);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert!(config.storage.seed_demo_user);
        assert_eq!(config.marketplaces.len(), 10);
        assert!(config.payments.webhook_secret.is_none());
        assert_eq!(config.payments.signature_tolerance_secs, 300);
        assert!(config.jobs.enabled);
        config.validate().unwrap();
    }

    #[test]
    fn test_arbitrage_defaults() {
        let config = ArbitrageConfig::default();
        assert_eq!(config.candidate_count, CountRange { min: 15, max: 50 });
        assert_eq!(config.min_net_profit, dec!(5));
        assert_eq!(config.min_roi_percent, dec!(10));
        assert_eq!(config.high_roi_percent, dec!(50));
        assert!(config.price_multiplier.min > 1.0);
    }

    #[test]
    fn test_plan_limits() {
        let limits = PlanLimits::default();
        assert_eq!(limits.limit_for(PlanTier::Starter), 20);
        assert_eq!(limits.limit_for(PlanTier::Professional), 100);
        assert_eq!(limits.limit_for(PlanTier::Enterprise), 1000);
        assert_eq!(limits.limit_for_name("enterprise"), 1000);
        assert_eq!(limits.limit_for_name("platinum"), 20);
        assert_eq!(limits.limit_for_name(""), 20);
    }

    #[test]
    fn test_default_catalogue_fees() {
        let markets = default_marketplaces();
        assert_eq!(markets["amazon"].fee, dec!(0.15));
        assert_eq!(markets["shopify"].fee, dec!(0.029));
        assert_eq!(markets["facebook"].name, "Facebook Marketplace");
        assert!(markets.values().all(|m| m.active));
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 8080

            [plans]
            starter = 5

            [marketplaces.amazon]
            name = "Amazon"
            fee = 0.15

            [marketplaces.ebay]
            name = "eBay"
            fee = 0.12
            active = false
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.plans.starter, 5);
        assert_eq!(config.plans.professional, 100);
        assert_eq!(config.marketplaces.len(), 2);
        assert!(!config.marketplaces["ebay"].active);
    }

    #[test]
    fn test_validation_rejects_bad_ranges() {
        let mut config = Config::default();
        config.arbitrage.candidate_count = CountRange { min: 10, max: 5 };
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.arbitrage.price_multiplier = FloatRange { min: 0.9, max: 2.0 };
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.arbitrage.risk_score = FloatRange { min: 10.0, max: 120.0 };
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.arbitrage.source_price = FloatRange { min: 50.0, max: f64::NAN };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_auth_and_fees() {
        let mut config = Config::default();
        config.auth.jwt_secret = "  ".into();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.auth.token_ttl_days = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.auth.token_ttl_days = MAX_TOKEN_TTL_DAYS + 1;
        assert!(config.validate().is_err());
        config.auth.token_ttl_days = MAX_TOKEN_TTL_DAYS;
        config.validate().unwrap();

        let mut config = Config::default();
        if let Some(m) = config.marketplaces.get_mut("amazon") {
            m.fee = Decimal::ONE;
        }
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("amazon"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[storage]\nbackend = \"sqlite\"\npath = \"/tmp/hub/users.db\"\n\n[jobs]\nenabled = false"
        )
        .unwrap();

        let config = Config::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.storage.path, "/tmp/hub/users.db");
        assert!(!config.jobs.enabled);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = Config::load("/nonexistent/arbitrage-hub-config").unwrap();
        assert_eq!(config.plans, PlanLimits::default());
        assert_eq!(config.arbitrage.min_roi_percent, dec!(10));
    }
}
