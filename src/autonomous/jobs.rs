use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use super::AutonomousSuite;
use crate::scheduler::Job;

pub const AUTONOMOUS_OPS: &str = "autonomous-ops";
pub const MARKETING_AUTOMATION: &str = "marketing-automation";

/// Hourly pass: scaling check, maintenance updates, pricing snapshot
pub struct AutonomousOpsJob {
    suite: Arc<AutonomousSuite>,
}

impl AutonomousOpsJob {
    pub fn new(suite: Arc<AutonomousSuite>) -> Self {
        Self { suite }
    }
}

#[async_trait]
impl Job for AutonomousOpsJob {
    fn name(&self) -> &str {
        AUTONOMOUS_OPS
    }

    async fn run(&self) -> anyhow::Result<()> {
        let (action, updates, pricing) = {
            let mut rng = rand::rng();
            (
                self.suite.scaling.auto_scale(&mut rng),
                self.suite.maintenance.run_updates(&mut rng),
                self.suite.income.optimize_pricing(&mut rng),
            )
        };

        info!(
            "Autonomous ops: {}, {} performance optimizations, optimal price {}",
            action.label(),
            updates.updates_applied.performance_optimizations,
            pricing.optimal_price_point
        );
        Ok(())
    }
}

/// Daily marketing automation report
pub struct MarketingAutomationJob {
    suite: Arc<AutonomousSuite>,
}

impl MarketingAutomationJob {
    pub fn new(suite: Arc<AutonomousSuite>) -> Self {
        Self { suite }
    }
}

#[async_trait]
impl Job for MarketingAutomationJob {
    fn name(&self) -> &str {
        MARKETING_AUTOMATION
    }

    async fn run(&self) -> anyhow::Result<()> {
        let report = self.suite.marketing.run_daily(&mut rand::rng());

        info!(
            "🚀 Marketing automation: {} visitors, €{} revenue, {} conversions",
            report.analytics_tracking.website_visitors,
            report.analytics_tracking.revenue_generated,
            report.lead_nurturing.conversions
        );
        Ok(())
    }
}
