use rand::seq::IndexedRandom;
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Revenue tallied per stream; all zero until real streams exist
#[derive(Debug, Clone, Default, Serialize)]
pub struct RevenueStreams {
    pub subscriptions: Decimal,
    pub transaction_fees: Decimal,
    pub api_licensing: Decimal,
    pub data_insights: Decimal,
    pub affiliate_commissions: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct RevenueProjection {
    pub current_monthly_revenue: Decimal,
    pub projected_6_months: Decimal,
    pub projected_12_months: Decimal,
    pub revenue_streams: RevenueStreams,
    pub growth_rate: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DemandLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompetitorAnalysis {
    pub avg_competitor_price: u32,
    pub our_competitive_advantage: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PricingSnapshot {
    pub current_conversion_rate: Decimal,
    pub optimal_price_point: Decimal,
    pub demand_level: DemandLevel,
    pub competitor_analysis: CompetitorAnalysis,
    pub recommended_action: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ViralPost {
    pub content: String,
    pub platforms: [&'static str; 4],
    pub hashtags: [&'static str; 5],
    pub optimal_posting_time: &'static str,
    pub expected_engagement: String,
}

const POST_TEMPLATES: [&str; 5] = [
    "🚀 I found out how to make €{amount}/month with automated arbitrage! Link in the comments",
    "💰 This AI found me {opportunities} opportunities today! Average ROI: {roi}%",
    "🔥 While I slept, the system surfaced €{profit} in opportunities! Automation is the future!",
    "📈 From €0 to €{revenue}/month in {months} months with smart arbitrage! AMA",
    "🤖 An AI that predicts prices with {accuracy}% accuracy? Yes, it exists! Thread 🧵",
];

/// Compound `base` by `rate` over `periods`
pub(crate) fn compound(base: Decimal, rate: Decimal, periods: u32) -> Decimal {
    (0..periods).fold(base, |acc, _| acc * (Decimal::ONE + rate))
}

/// Revenue projection and pricing snapshots
#[derive(Debug, Clone)]
pub struct PassiveIncomeEngine {
    base_monthly_revenue: Decimal,
    growth_rate: Decimal,
    months_active: u32,
}

impl Default for PassiveIncomeEngine {
    fn default() -> Self {
        Self {
            base_monthly_revenue: dec!(1000),
            growth_rate: dec!(0.15),
            months_active: 1,
        }
    }
}

impl PassiveIncomeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn projection(&self) -> RevenueProjection {
        let current = compound(self.base_monthly_revenue, self.growth_rate, self.months_active);
        RevenueProjection {
            current_monthly_revenue: current.round_dp(2),
            projected_6_months: compound(current, self.growth_rate, 6).round_dp(2),
            projected_12_months: compound(current, self.growth_rate, 12).round_dp(2),
            revenue_streams: RevenueStreams::default(),
            growth_rate: format!("{}%", (self.growth_rate * dec!(100)).normalize()),
        }
    }

    pub fn optimize_pricing<R: Rng + ?Sized>(&self, rng: &mut R) -> PricingSnapshot {
        const LEVELS: [DemandLevel; 4] = [
            DemandLevel::Low,
            DemandLevel::Medium,
            DemandLevel::High,
            DemandLevel::VeryHigh,
        ];

        PricingSnapshot {
            current_conversion_rate: Decimal::new(rng.random_range(250..=850), 2),
            optimal_price_point: Decimal::new(rng.random_range(2900..=7900), 2),
            demand_level: LEVELS.choose(rng).copied().unwrap_or(DemandLevel::Medium),
            competitor_analysis: CompetitorAnalysis {
                avg_competitor_price: 67,
                our_competitive_advantage: "45% cheaper with 300% more features",
            },
            recommended_action: "Increase price by 15% due to high demand",
        }
    }

    pub fn viral_post<R: Rng + ?Sized>(&self, rng: &mut R) -> ViralPost {
        let template = POST_TEMPLATES.choose(rng).copied().unwrap_or(POST_TEMPLATES[0]);
        let content = template
            .replace("{amount}", &rng.random_range(1000..=5000).to_string())
            .replace("{opportunities}", &rng.random_range(50..=200).to_string())
            .replace("{roi}", &rng.random_range(25..=85).to_string())
            .replace("{profit}", &rng.random_range(100..=800).to_string())
            .replace("{revenue}", &rng.random_range(2000..=15000).to_string())
            .replace("{months}", &rng.random_range(3..=12).to_string())
            .replace("{accuracy}", &rng.random_range(82..=96).to_string());

        ViralPost {
            content,
            platforms: ["twitter", "linkedin", "reddit", "facebook"],
            hashtags: ["#arbitrage", "#passiveincome", "#AI", "#ecommerce", "#entrepreneur"],
            optimal_posting_time: "18:00-20:00 UTC",
            expected_engagement: format!("{} interactions", rng.random_range(500..=5000)),
        }
    }
}
