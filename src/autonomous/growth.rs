use rand::Rng;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct MonthProjection {
    pub month: u32,
    pub total_users: u64,
    pub new_referrals: u64,
    pub organic_growth: u64,
    pub monthly_revenue: Decimal,
    pub cumulative_revenue: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReferralIncentive {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub amount: &'static str,
    pub condition: &'static str,
    pub conversion_rate: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReferralReport {
    pub active_incentives: Vec<ReferralIncentive>,
    pub total_referrals_this_month: u32,
    pub referral_revenue: u32,
    pub top_referrer_reward: &'static str,
}

/// User-base projection driven by referrals and organic growth
#[derive(Debug, Clone)]
pub struct ViralGrowthEngine {
    pub referral_rate: Decimal,
    pub viral_coefficient: Decimal,
    pub organic_rate: Decimal,
}

impl Default for ViralGrowthEngine {
    fn default() -> Self {
        Self {
            referral_rate: dec!(0.12),
            viral_coefficient: dec!(1.8),
            organic_rate: dec!(0.05),
        }
    }
}

impl ViralGrowthEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Twelve monthly steps from `current_users`; revenue per user is drawn per month
    pub fn project<R: Rng + ?Sized>(&self, current_users: u64, rng: &mut R) -> Vec<MonthProjection> {
        let mut users = current_users;
        let mut cumulative = Decimal::ZERO;

        (1..=12)
            .map(|month| {
                let base = Decimal::from(users);
                let new_referrals = (base * self.referral_rate * self.viral_coefficient)
                    .floor()
                    .to_u64()
                    .unwrap_or(0);
                let organic_growth = (base * self.organic_rate).floor().to_u64().unwrap_or(0);
                users += new_referrals + organic_growth;

                let per_user = Decimal::new(rng.random_range(1500..=4500), 2);
                let monthly_revenue = (Decimal::from(users) * per_user).round_dp(2);
                cumulative += monthly_revenue;

                MonthProjection {
                    month,
                    total_users: users,
                    new_referrals,
                    organic_growth,
                    monthly_revenue,
                    cumulative_revenue: cumulative,
                }
            })
            .collect()
    }

    pub fn referral_incentives<R: Rng + ?Sized>(&self, rng: &mut R) -> ReferralReport {
        ReferralReport {
            active_incentives: vec![
                ReferralIncentive {
                    kind: "cash_reward",
                    amount: "€25",
                    condition: "Friend signs up for paid plan",
                    conversion_rate: "8.5%",
                },
                ReferralIncentive {
                    kind: "free_month",
                    amount: "1 month free",
                    condition: "3 successful referrals",
                    conversion_rate: "12.3%",
                },
                ReferralIncentive {
                    kind: "premium_features",
                    amount: "Unlock AI Pro",
                    condition: "1 referral signup",
                    conversion_rate: "15.7%",
                },
                ReferralIncentive {
                    kind: "revenue_share",
                    amount: "10% lifetime commission",
                    condition: "Become affiliate partner",
                    conversion_rate: "3.2%",
                },
            ],
            total_referrals_this_month: rng.random_range(50..=300),
            referral_revenue: rng.random_range(1200..=8500),
            top_referrer_reward: "€500 cash bonus",
        }
    }
}
