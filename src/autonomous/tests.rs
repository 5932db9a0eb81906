use super::marketing::{
    Platform, EMAILS_PER_CAMPAIGN, POSTS_PER_PLATFORM, PR_PIECES_PER_CAMPAIGN, REVENUE_PER_LEAD,
    SEO_ARTICLES_PER_CAMPAIGN,
};
use super::revenue::compound;
use super::*;
use crate::scheduler::Job;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal_macros::dec;
use std::sync::Arc;

fn rng() -> StdRng {
    StdRng::seed_from_u64(17)
}

fn loaded(load: Decimal, threshold: Decimal) -> SystemMetrics {
    SystemMetrics {
        current_load: load,
        cpu_usage: "50.0%".into(),
        memory_usage: "40.0%".into(),
        api_requests_per_minute: 500,
        active_users: 100,
        scaling_needed: load > threshold,
    }
}

#[test]
fn test_revenue_projection() {
    let projection = PassiveIncomeEngine::new().projection();
    assert_eq!(projection.current_monthly_revenue, dec!(1150));
    assert_eq!(
        projection.projected_6_months,
        compound(dec!(1150), dec!(0.15), 6).round_dp(2)
    );
    assert!(projection.projected_12_months > projection.projected_6_months);
    assert_eq!(projection.growth_rate, "15%");
}

#[test]
fn test_compound_growth() {
    assert_eq!(compound(dec!(100), dec!(0.1), 0), dec!(100));
    assert_eq!(compound(dec!(100), dec!(0.1), 2), dec!(121));
}

#[test]
fn test_pricing_snapshot_ranges() {
    let mut rng = rng();
    for _ in 0..50 {
        let snap = PassiveIncomeEngine::new().optimize_pricing(&mut rng);
        assert!(snap.current_conversion_rate >= dec!(2.5) && snap.current_conversion_rate <= dec!(8.5));
        assert!(snap.optimal_price_point >= dec!(29) && snap.optimal_price_point <= dec!(79));
    }
}

#[test]
fn test_viral_post_fills_template() {
    let post = PassiveIncomeEngine::new().viral_post(&mut rng());
    assert!(!post.content.contains('{'));
    assert_eq!(post.platforms.len(), 4);
}

#[test]
fn test_scaling_doubles_above_threshold() {
    let manager = AutoScalingManager::default();
    let mut rng = rng();

    let action = manager.apply(&loaded(dec!(0.85), dec!(0.8)), &mut rng);
    assert!(matches!(
        action,
        ScalingAction::ScaleUp {
            old_capacity: 100,
            new_capacity: 200,
            ..
        }
    ));
    assert_eq!(manager.capacity(), 200);
    assert_eq!(action.label(), "scale_up");

    // At the threshold exactly nothing happens
    let action = manager.apply(&loaded(dec!(0.8), dec!(0.8)), &mut rng);
    assert_eq!(action.label(), "maintain");
    assert_eq!(manager.capacity(), 200);
}

#[test]
fn test_scaling_capped_at_max() {
    let manager = AutoScalingManager::new(6000, 10_000, dec!(0.8));
    let mut rng = rng();
    manager.apply(&loaded(dec!(0.9), dec!(0.8)), &mut rng);
    assert_eq!(manager.capacity(), 10_000);
    manager.apply(&loaded(dec!(0.9), dec!(0.8)), &mut rng);
    assert_eq!(manager.capacity(), 10_000);
}

#[test]
fn test_scaling_action_serializes_with_tag() {
    let manager = AutoScalingManager::default();
    let action = manager.apply(&loaded(dec!(0.5), dec!(0.8)), &mut rng());
    let json = serde_json::to_value(&action).unwrap();
    assert_eq!(json["action"], "maintain");
    assert_eq!(json["current_capacity"], 100);
}

#[test]
fn test_growth_projection() {
    let projections = ViralGrowthEngine::new().project(100, &mut rng());
    assert_eq!(projections.len(), 12);

    // month 1: floor(100 * 0.12 * 1.8) = 21 referrals, floor(100 * 0.05) = 5 organic
    assert_eq!(projections[0].new_referrals, 21);
    assert_eq!(projections[0].organic_growth, 5);
    assert_eq!(projections[0].total_users, 126);

    let mut running = Decimal::ZERO;
    for pair in projections.windows(2) {
        assert!(pair[1].total_users > pair[0].total_users);
    }
    for p in &projections {
        running += p.monthly_revenue;
        assert_eq!(p.cumulative_revenue, running);
    }
}

#[test]
fn test_referral_incentives() {
    let report = ViralGrowthEngine::new().referral_incentives(&mut rng());
    assert_eq!(report.active_incentives.len(), 4);
    assert!((50..=300).contains(&report.total_referrals_this_month));
}

#[test]
fn test_maintenance_reports() {
    let system = MaintenanceSystem::new();
    let mut rng = rng();
    let updates = system.run_updates(&mut rng);
    assert_eq!(
        updates.next_scheduled_update - updates.last_update,
        chrono::Duration::hours(24)
    );
    assert!(updates.updates_applied.performance_optimizations >= 1);

    let health = system.health(&mut rng);
    assert!(["Excellent", "Good", "Fair"].contains(&health.overall_health));
    assert!(system.backup(&mut rng).backup_size.ends_with("GB"));
}

#[test]
fn test_social_post_per_platform() {
    let engine = ViralMarketingEngine::new();
    let mut rng = rng();
    for platform in Platform::ALL {
        let post = engine.social_post(platform, &mut rng);
        assert_eq!(post.platform, platform);
        assert!(!post.content.contains("{amount}"));
        let (_, tags) = post.content.split_once("\n\n").unwrap();
        assert_eq!(tags.split(' ').count(), 3);
        assert!(post.viral_score.is_none());
    }
}

#[test]
fn test_viral_potential_capped() {
    let engine = ViralMarketingEngine::new();
    let mut rng = rng();
    for _ in 0..200 {
        let score = engine.viral_potential("results_reveal", &mut rng);
        assert!((9.3..=10.0).contains(&score));
        let score = engine.viral_potential("unknown", &mut rng);
        assert!((7.0..=10.0).contains(&score));
    }
}

#[test]
fn test_campaign_shape_and_estimates() {
    let report = ViralMarketingEngine::new().run_campaign(&mut rng());
    assert_eq!(report.social_media.len(), Platform::ALL.len() * POSTS_PER_PLATFORM);
    assert_eq!(report.seo_content.len(), SEO_ARTICLES_PER_CAMPAIGN);
    assert_eq!(report.email_campaigns.len(), EMAILS_PER_CAMPAIGN);
    assert_eq!(report.pr_content.len(), PR_PIECES_PER_CAMPAIGN);

    let reach: u64 = report.social_media.iter().map(|p| p.estimated_reach).sum();
    assert_eq!(report.estimated_reach, reach);
    assert_eq!(report.estimated_leads, reach * 2 / 100);
    assert_eq!(report.estimated_revenue, report.estimated_leads * REVENUE_PER_LEAD);
    assert!(report.social_media.iter().all(|p| p.viral_score.is_some()));
}

#[test]
fn test_daily_automation_report() {
    let report = AutomatedGrowthSystem::new().run_daily(&mut rng());
    assert_eq!(report.content_creation.social_posts.len(), 2);
    assert_eq!(report.social_media.posts_scheduled, 12);
    assert!((1000..=5000).contains(&report.analytics_tracking.website_visitors));
}

#[test]
fn test_dashboard() {
    let suite = AutonomousSuite::new();
    let dashboard = suite.dashboard(&mut rng());
    assert_eq!(dashboard.kpis.monthly_recurring_revenue, "€1,150.00");
    assert_eq!(dashboard.growth_metrics.referral_rate, "12%");
    assert_eq!(dashboard.next_milestones.len(), 3);
    assert!(dashboard.growth_metrics.projected_users_12m > BASELINE_USERS);
}

#[test]
fn test_euro_formatting() {
    assert_eq!(super::euros(dec!(0)), "€0.00");
    assert_eq!(super::euros(dec!(999.5)), "€999.50");
    assert_eq!(super::euros(dec!(1234567.891)), "€1,234,567.89");
    assert_eq!(super::euros(dec!(-1000)), "-€1,000.00");
}

#[tokio::test]
async fn test_jobs_run() {
    let suite = Arc::new(AutonomousSuite::new());
    let ops = AutonomousOpsJob::new(suite.clone());
    let marketing = MarketingAutomationJob::new(suite);

    assert_eq!(ops.name(), "autonomous-ops");
    assert_eq!(marketing.name(), "marketing-automation");
    ops.run().await.unwrap();
    marketing.run().await.unwrap();
}
