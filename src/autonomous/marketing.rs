//! Templated marketing content and campaign estimates
//!
//! Nothing is published anywhere; these produce the payloads a marketing
//! dashboard would show.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    LinkedIn,
    Reddit,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Twitter, Platform::LinkedIn, Platform::Reddit];

    fn templates(&self) -> &'static [&'static str] {
        match self {
            Platform::Twitter => &[
                "🚀 I found out how to make €{amount}/month with automated arbitrage! Thread 🧵",
                "💰 An AI that finds €{profit}+ opportunities on its own? It exists! 🤖",
                "📈 From €0 to €{revenue}/month in {months} months! AMA in the comments",
                "🔥 While I slept, the system surfaced €{daily_profit} in opportunities! #PassiveIncome",
                "🎯 {roi}% ROI on arbitrage? With AI it is possible! Who wants to know how?",
            ],
            Platform::LinkedIn => &[
                "How AI is changing price arbitrage and producing €{amount}+ a month",
                "3 lessons I learned making €{revenue} with automated arbitrage",
                "Why 90% of entrepreneurs fail at arbitrage (and how to avoid it)",
                "The future of e-commerce: AI that finds profit opportunities automatically",
                "Case study: how I went from €0 to €{amount}/month",
            ],
            Platform::Reddit => &[
                "I built an AI system that makes €{amount}/month with automated arbitrage - AMA",
                "Anyone else using AI for arbitrage? My results after {months} months",
                "€{profit} profit today with automated arbitrage - proof in the comments",
                "A system that finds arbitrage opportunities automatically - worth it?",
                "How AI completely changed my arbitrage business",
            ],
        }
    }

    fn hashtags(&self) -> &'static [&'static str] {
        match self {
            Platform::Twitter => &[
                "#arbitrage",
                "#AI",
                "#passiveincome",
                "#ecommerce",
                "#entrepreneur",
                "#sidehustle",
            ],
            Platform::LinkedIn => &[
                "#artificialintelligence",
                "#ecommerce",
                "#entrepreneurship",
                "#innovation",
                "#business",
            ],
            Platform::Reddit => &[
                "r/entrepreneur",
                "r/passive_income",
                "r/ecommerce",
                "r/MachineLearning",
            ],
        }
    }

    fn posting_times(&self) -> &'static [&'static str] {
        match self {
            Platform::Twitter => &["09:00", "12:00", "18:00", "21:00"],
            Platform::LinkedIn => &["08:00", "12:00", "17:00"],
            Platform::Reddit => &["10:00", "14:00", "20:00", "22:00"],
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Twitter => "twitter",
            Platform::LinkedIn => "linkedin",
            Platform::Reddit => "reddit",
        };
        f.write_str(name)
    }
}

/// Numbers substituted into a content template
#[derive(Debug, Clone, Serialize)]
pub struct ContentData {
    pub amount: u32,
    pub profit: u32,
    pub revenue: u32,
    pub months: u32,
    pub daily_profit: u32,
    pub roi: u32,
}

impl ContentData {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            amount: rng.random_range(1000..=15000),
            profit: rng.random_range(100..=800),
            revenue: rng.random_range(2000..=25000),
            months: rng.random_range(2..=12),
            daily_profit: rng.random_range(50..=500),
            roi: rng.random_range(25..=150),
        }
    }

    fn fill(&self, template: &str) -> String {
        template
            .replace("{amount}", &self.amount.to_string())
            .replace("{profit}", &self.profit.to_string())
            .replace("{revenue}", &self.revenue.to_string())
            .replace("{months}", &self.months.to_string())
            .replace("{daily_profit}", &self.daily_profit.to_string())
            .replace("{roi}", &self.roi.to_string())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SocialPost {
    pub content: String,
    pub platform: Platform,
    pub estimated_reach: u64,
    pub estimated_engagement: u32,
    pub optimal_time: &'static str,
    pub content_data: ContentData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viral_score: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeoArticle {
    pub title: &'static str,
    pub meta_description: &'static str,
    pub keywords: &'static [&'static str],
    pub content_outline: &'static [&'static str],
}

const SEO_ARTICLES: [SeoArticle; 3] = [
    SeoArticle {
        title: "How to Make €10,000/Month with Smart Arbitrage",
        meta_description: "Use AI to find arbitrage opportunities and build passive income. A complete guide with real results.",
        keywords: &["arbitrage", "AI", "passive income", "e-commerce", "Amazon"],
        content_outline: &[
            "What smart arbitrage is",
            "How AI changes arbitrage",
            "Real success stories",
            "Step by step to get started",
            "Essential tools",
        ],
    },
    SeoArticle {
        title: "Arbitrage Hub vs Tactical Arbitrage: A Complete Comparison",
        meta_description: "A detailed comparison of two arbitrage tools. Find out which one earns more.",
        keywords: &["Tactical Arbitrage", "comparison", "arbitrage", "tools"],
        content_outline: &[
            "Tool overview",
            "Features compared",
            "Pricing and value",
            "Real user results",
            "Final verdict",
        ],
    },
    SeoArticle {
        title: "Amazon Arbitrage: A Complete Beginner's Guide",
        meta_description: "Learn Amazon arbitrage from scratch. Strategies, tools and tips to earn €5000+/month.",
        keywords: &["Amazon", "arbitrage", "beginners", "tutorial", "profit"],
        content_outline: &[
            "Introduction to Amazon arbitrage",
            "Finding profitable products",
            "Profit calculator",
            "Common mistakes to avoid",
            "Next steps",
        ],
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct EmailCampaign {
    pub subject: String,
    pub preview: &'static str,
    pub content_type: &'static str,
    pub estimated_open_rate: String,
    pub estimated_click_rate: String,
    pub target_audience: &'static str,
    pub send_time: &'static str,
}

/// (subject, preview, content type)
const EMAIL_TEMPLATES: [(&str, &str, &str); 4] = [
    ("🚀 How I made €{amount} this month with AI", "The strategy that changed everything...", "success_story"),
    ("⚠️ You are losing €{daily_loss}/day without knowing it", "Opportunities slipping past you...", "urgency"),
    ("🎯 {opportunities} opportunities found today", "The AI worked while you slept...", "opportunity_alert"),
    ("💡 The secret behind €{amount}/month in arbitrage", "Revealed: the strategy that works...", "educational"),
];

#[derive(Debug, Clone, Serialize)]
pub struct ReferralOffer {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub amount: &'static str,
    pub condition: &'static str,
    pub viral_factor: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SocialSharing {
    pub twitter: &'static str,
    pub linkedin: &'static str,
    pub whatsapp: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReferralProgram {
    pub incentives: Vec<ReferralOffer>,
    pub referral_link_template: &'static str,
    pub tracking_enabled: bool,
    pub social_sharing: SocialSharing,
}

#[derive(Debug, Clone, Serialize)]
pub struct PrAngle {
    pub headline: &'static str,
    pub angle: &'static str,
    pub target_media: &'static [&'static str],
}

const PR_ANGLES: [PrAngle; 3] = [
    PrAngle {
        headline: "Startup Builds AI That Surfaces €10M+ in Arbitrage Opportunities",
        angle: "innovation_story",
        target_media: &["TechCrunch", "The Next Web", "Startup Digest"],
    },
    PrAngle {
        headline: "How a Student Reinvented Arbitrage with AI",
        angle: "founder_story",
        target_media: &["Business Insider", "Fast Company", "Wired"],
    },
    PrAngle {
        headline: "The Tool Democratizing E-commerce Arbitrage",
        angle: "market_disruption",
        target_media: &["E-commerce News", "Retail Dive", "Marketing Week"],
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct CampaignReport {
    pub social_media: Vec<SocialPost>,
    pub seo_content: Vec<SeoArticle>,
    pub email_campaigns: Vec<EmailCampaign>,
    pub referral_program: ReferralProgram,
    pub pr_content: Vec<PrAngle>,
    pub estimated_reach: u64,
    pub estimated_leads: u64,
    pub estimated_revenue: u64,
}

pub const POSTS_PER_PLATFORM: usize = 3;
pub const SEO_ARTICLES_PER_CAMPAIGN: usize = 5;
pub const EMAILS_PER_CAMPAIGN: usize = 7;
pub const PR_PIECES_PER_CAMPAIGN: usize = 3;
/// Leads per reached person, in percent
pub const LEAD_CONVERSION_PERCENT: u64 = 2;
/// Average revenue per converted lead, EUR
pub const REVENUE_PER_LEAD: u64 = 49;

#[derive(Debug, Clone, Default)]
pub struct ViralMarketingEngine;

impl ViralMarketingEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn social_post<R: Rng + ?Sized>(&self, platform: Platform, rng: &mut R) -> SocialPost {
        let data = ContentData::random(rng);
        let template = platform.templates().choose(rng).copied().unwrap_or_default();
        let hashtags: Vec<&str> = platform.hashtags().choose_multiple(rng, 3).copied().collect();
        let content = format!("{}\n\n{}", data.fill(template), hashtags.join(" "));

        SocialPost {
            content,
            platform,
            estimated_reach: rng.random_range(1000..=50_000),
            estimated_engagement: rng.random_range(50..=2000),
            optimal_time: platform.posting_times().choose(rng).copied().unwrap_or("12:00"),
            content_data: data,
            viral_score: None,
        }
    }

    pub fn seo_article<R: Rng + ?Sized>(&self, rng: &mut R) -> SeoArticle {
        SEO_ARTICLES.choose(rng).cloned().unwrap_or_else(|| SEO_ARTICLES[0].clone())
    }

    pub fn email_campaign<R: Rng + ?Sized>(&self, rng: &mut R) -> EmailCampaign {
        let (subject, preview, content_type) =
            EMAIL_TEMPLATES.choose(rng).copied().unwrap_or(EMAIL_TEMPLATES[0]);
        let subject = subject
            .replace("{amount}", &rng.random_range(5000..=25000).to_string())
            .replace("{daily_loss}", &rng.random_range(100..=500).to_string())
            .replace("{opportunities}", &rng.random_range(50..=200).to_string());

        EmailCampaign {
            subject,
            preview,
            content_type,
            estimated_open_rate: format!("{}%", rng.random_range(25..=45)),
            estimated_click_rate: format!("{}%", rng.random_range(5..=15)),
            target_audience: "entrepreneurs, ecommerce, passive_income",
            send_time: "Tuesday 10:00 AM",
        }
    }

    pub fn referral_program(&self) -> ReferralProgram {
        ReferralProgram {
            incentives: vec![
                ReferralOffer {
                    kind: "cash_reward",
                    amount: "€50",
                    condition: "Friend upgrades to Professional",
                    viral_factor: 2.3,
                },
                ReferralOffer {
                    kind: "free_months",
                    amount: "2 months free",
                    condition: "3 successful referrals",
                    viral_factor: 1.8,
                },
                ReferralOffer {
                    kind: "lifetime_commission",
                    amount: "20% forever",
                    condition: "Become an affiliate",
                    viral_factor: 3.1,
                },
                ReferralOffer {
                    kind: "exclusive_features",
                    amount: "Beta access",
                    condition: "1 active referral",
                    viral_factor: 1.5,
                },
            ],
            referral_link_template: "https://arbitrage-hub.example/ref/{user_id}",
            tracking_enabled: true,
            social_sharing: SocialSharing {
                twitter: "Just found a tool whose AI surfaces arbitrage deals automatically 🚀",
                linkedin: "I recommend this for anyone automating arbitrage with AI",
                whatsapp: "Look at this great tool I found for automated arbitrage!",
            },
        }
    }

    pub fn pr_angle<R: Rng + ?Sized>(&self, rng: &mut R) -> PrAngle {
        PR_ANGLES.choose(rng).cloned().unwrap_or_else(|| PR_ANGLES[0].clone())
    }

    /// Base score per content type, boosted by each engagement factor that
    /// happens to be present (coin flip each), capped at 10
    pub fn viral_potential<R: Rng + ?Sized>(&self, content_type: &str, rng: &mut R) -> f64 {
        let base = match content_type {
            "success_story" => 8.5,
            "tutorial" => 7.2,
            "case_study" => 8.8,
            "controversy" => 9.1,
            "behind_scenes" => 6.8,
            "results_reveal" => 9.3,
            _ => 7.0,
        };

        // numbers, emotion, urgency, social proof, controversy
        const FACTORS: [f64; 5] = [1.2, 1.3, 1.1, 1.4, 1.5];

        let score = FACTORS
            .iter()
            .filter(|_| rng.random_bool(0.5))
            .fold(base, |acc, m| acc * m);
        score.min(10.0)
    }

    pub fn run_campaign<R: Rng + ?Sized>(&self, rng: &mut R) -> CampaignReport {
        let mut social_media = Vec::with_capacity(Platform::ALL.len() * POSTS_PER_PLATFORM);
        for platform in Platform::ALL {
            for _ in 0..POSTS_PER_PLATFORM {
                let mut post = self.social_post(platform, rng);
                post.viral_score = Some(self.viral_potential("success_story", rng));
                social_media.push(post);
            }
        }

        let estimated_reach: u64 = social_media.iter().map(|p| p.estimated_reach).sum();
        let estimated_leads = estimated_reach * LEAD_CONVERSION_PERCENT / 100;

        CampaignReport {
            seo_content: (0..SEO_ARTICLES_PER_CAMPAIGN).map(|_| self.seo_article(rng)).collect(),
            email_campaigns: (0..EMAILS_PER_CAMPAIGN).map(|_| self.email_campaign(rng)).collect(),
            referral_program: self.referral_program(),
            pr_content: (0..PR_PIECES_PER_CAMPAIGN).map(|_| self.pr_angle(rng)).collect(),
            social_media,
            estimated_reach,
            estimated_leads,
            estimated_revenue: estimated_leads * REVENUE_PER_LEAD,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyContent {
    pub blog_post: SeoArticle,
    pub social_posts: Vec<SocialPost>,
    pub email_campaign: EmailCampaign,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeoOptimization {
    pub keywords_targeted: [&'static str; 4],
    pub backlinks_created: u32,
    pub content_optimized: bool,
    pub meta_tags_updated: bool,
    pub sitemap_submitted: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailSequences {
    pub welcome_sequence: &'static str,
    pub nurture_campaigns: &'static str,
    pub abandoned_cart: &'static str,
    pub win_back: &'static str,
    pub upsell_sequences: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SocialAutomation {
    pub posts_scheduled: u32,
    pub engagement_automated: bool,
    pub hashtags_optimized: bool,
    pub influencer_outreach: u32,
    pub community_management: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceTracking {
    pub website_visitors: u32,
    pub conversion_rate: String,
    pub email_open_rate: String,
    pub social_engagement: String,
    pub revenue_generated: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeadNurturing {
    pub leads_contacted: u32,
    pub demos_scheduled: u32,
    pub trials_started: u32,
    pub conversions: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyAutomationReport {
    pub content_creation: DailyContent,
    pub seo_optimization: SeoOptimization,
    pub email_sequences: EmailSequences,
    pub social_media: SocialAutomation,
    pub analytics_tracking: PerformanceTracking,
    pub lead_nurturing: LeadNurturing,
}

/// Daily marketing automation run
#[derive(Debug, Clone, Default)]
pub struct AutomatedGrowthSystem {
    engine: ViralMarketingEngine,
}

impl AutomatedGrowthSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn engine(&self) -> &ViralMarketingEngine {
        &self.engine
    }

    pub fn run_daily<R: Rng + ?Sized>(&self, rng: &mut R) -> DailyAutomationReport {
        DailyAutomationReport {
            content_creation: DailyContent {
                blog_post: self.engine.seo_article(rng),
                social_posts: vec![
                    self.engine.social_post(Platform::Twitter, rng),
                    self.engine.social_post(Platform::LinkedIn, rng),
                ],
                email_campaign: self.engine.email_campaign(rng),
            },
            seo_optimization: SeoOptimization {
                keywords_targeted: [
                    "ai arbitrage",
                    "arbitrage hub",
                    "passive income",
                    "automated e-commerce",
                ],
                backlinks_created: rng.random_range(5..=15),
                content_optimized: true,
                meta_tags_updated: true,
                sitemap_submitted: true,
            },
            email_sequences: EmailSequences {
                welcome_sequence: "active",
                nurture_campaigns: "running",
                abandoned_cart: "enabled",
                win_back: "scheduled",
                upsell_sequences: "optimized",
            },
            social_media: SocialAutomation {
                posts_scheduled: 12,
                engagement_automated: true,
                hashtags_optimized: true,
                influencer_outreach: rng.random_range(3..=8),
                community_management: true,
            },
            analytics_tracking: PerformanceTracking {
                website_visitors: rng.random_range(1000..=5000),
                conversion_rate: format!("{:.1}%", rng.random_range(2.5..8.5)),
                email_open_rate: format!("{:.1}%", rng.random_range(25.0..45.0)),
                social_engagement: format!("{:.1}%", rng.random_range(3.0..12.0)),
                revenue_generated: rng.random_range(500..=3000),
            },
            lead_nurturing: LeadNurturing {
                leads_contacted: rng.random_range(50..=200),
                demos_scheduled: rng.random_range(10..=40),
                trials_started: rng.random_range(15..=60),
                conversions: rng.random_range(5..=25),
            },
        }
    }
}
