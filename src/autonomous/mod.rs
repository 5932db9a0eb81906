//! Randomized growth, scaling and health metrics
//!
//! Every engine here is a simulation for dashboard display. The only state
//! carried between calls is the scaling manager's capacity.

mod growth;
mod jobs;
mod maintenance;
pub mod marketing;
mod revenue;
mod scaling;

#[cfg(test)]
mod tests;

pub use growth::{MonthProjection, ReferralIncentive, ReferralReport, ViralGrowthEngine};
pub use jobs::{AutonomousOpsJob, MarketingAutomationJob};
pub use maintenance::{BackupReport, HealthMetrics, MaintenanceSystem, UpdateReport};
pub use marketing::{AutomatedGrowthSystem, ViralMarketingEngine};
pub use revenue::{PassiveIncomeEngine, PricingSnapshot, RevenueProjection, ViralPost};
pub use scaling::{AutoScalingManager, ScalingAction, SystemMetrics};

use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use serde::Serialize;

/// Starting user base for growth projections
pub const BASELINE_USERS: u64 = 100;

#[derive(Debug, Clone, Serialize)]
pub struct Kpis {
    pub monthly_recurring_revenue: String,
    pub annual_recurring_revenue: String,
    pub user_growth_rate: String,
    pub system_health: &'static str,
    pub passive_income_score: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SystemStatus {
    pub health: &'static str,
    pub load: Decimal,
    pub users_online: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GrowthMetrics {
    pub viral_coefficient: Decimal,
    pub referral_rate: String,
    pub projected_users_12m: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AutomationStatus {
    pub auto_scaling: &'static str,
    pub auto_maintenance: &'static str,
    pub viral_marketing: &'static str,
    pub revenue_optimization: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Milestone {
    pub milestone: &'static str,
    pub eta: &'static str,
    pub probability: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AutonomousDashboard {
    pub kpis: Kpis,
    pub revenue_breakdown: RevenueProjection,
    pub system_status: SystemStatus,
    pub growth_metrics: GrowthMetrics,
    pub automation_status: AutomationStatus,
    pub next_milestones: Vec<Milestone>,
    pub timestamp: DateTime<Utc>,
}

/// The engines behind `/api/autonomous/*` and the background jobs
#[derive(Debug, Default)]
pub struct AutonomousSuite {
    pub income: PassiveIncomeEngine,
    pub scaling: AutoScalingManager,
    pub growth: ViralGrowthEngine,
    pub maintenance: MaintenanceSystem,
    pub marketing: AutomatedGrowthSystem,
}

/// Thousands-separated euro amount, e.g. `€1,150.00`
fn euros(amount: Decimal) -> String {
    let fixed = format!("{:.2}", amount.round_dp(2));
    let (int_part, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{}€{}.{}", sign, grouped, frac)
}

impl AutonomousSuite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dashboard<R: Rng + ?Sized>(&self, rng: &mut R) -> AutonomousDashboard {
        let revenue = self.income.projection();
        let metrics = self.scaling.monitor(rng);
        let projections = self.growth.project(BASELINE_USERS, rng);
        let health = self.maintenance.health(rng);

        AutonomousDashboard {
            kpis: Kpis {
                monthly_recurring_revenue: euros(revenue.current_monthly_revenue),
                annual_recurring_revenue: euros(revenue.projected_12_months),
                user_growth_rate: "15.7%".to_string(),
                system_health: health.overall_health,
                passive_income_score: "9.2/10",
            },
            system_status: SystemStatus {
                health: health.overall_health,
                load: metrics.current_load,
                users_online: metrics.active_users,
            },
            growth_metrics: GrowthMetrics {
                viral_coefficient: self.growth.viral_coefficient,
                referral_rate: format!(
                    "{}%",
                    (self.growth.referral_rate * Decimal::ONE_HUNDRED).normalize()
                ),
                projected_users_12m: projections
                    .last()
                    .map(|p| p.total_users)
                    .unwrap_or(BASELINE_USERS),
            },
            revenue_breakdown: revenue,
            automation_status: AutomationStatus {
                auto_scaling: "active",
                auto_maintenance: "active",
                viral_marketing: "active",
                revenue_optimization: "active",
            },
            next_milestones: vec![
                Milestone {
                    milestone: "€10,000 MRR",
                    eta: "3-4 months",
                    probability: "85%",
                },
                Milestone {
                    milestone: "€25,000 MRR",
                    eta: "6-8 months",
                    probability: "72%",
                },
                Milestone {
                    milestone: "€50,000 MRR",
                    eta: "10-12 months",
                    probability: "58%",
                },
            ],
            timestamp: Utc::now(),
        }
    }
}
