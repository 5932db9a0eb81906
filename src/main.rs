//! Arbitrage Hub
//!
//! Serves the HTTP API or runs a one-off scan or price forecast from the
//! command line.

use arbitrage_hub::{
    api::{self, AppState},
    arbitrage::ArbitrageScanner,
    config::Config,
    ml::{PricePredictor, Recommendation, SimulatedPricePredictor, TRAINING_SAMPLES, TRAINING_SEED},
    types::{MarketplaceSet, PlanTier},
};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "arbitrage-hub")]
#[command(about = "Marketplace arbitrage opportunity service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API and background jobs
    Serve,
    /// Run one opportunity scan and print it as JSON
    Scan {
        /// Plan tier whose quota applies
        #[arg(short, long, default_value = "starter")]
        plan: String,
    },
    /// Forecast a product price
    Predict {
        #[arg(long)]
        price: f64,
        #[arg(long, default_value = "0")]
        category: u32,
        #[arg(long, default_value = "0")]
        marketplace: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Serve => serve(config).await,
        Commands::Scan { plan } => scan(config, &plan),
        Commands::Predict {
            price,
            category,
            marketplace,
        } => predict(price, category, marketplace),
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    tracing::info!("🚀 Starting Arbitrage Hub v{}", env!("CARGO_PKG_VERSION"));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let jobs_enabled = config.jobs.enabled;
    let state = Arc::new(AppState::from_config(config).await?);

    let mut scheduler = state.build_scheduler();
    if jobs_enabled {
        scheduler.start();
    } else {
        tracing::warn!("Background jobs disabled");
    }

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
        }
        tracing::info!("Shutdown requested");
    };

    let served = api::serve(state, addr, shutdown).await;
    scheduler.stop().await;
    served
}

fn scan(config: Config, plan: &str) -> anyhow::Result<()> {
    let tier = PlanTier::parse(plan)
        .ok_or_else(|| anyhow::anyhow!("Unknown plan '{}'", plan))?;
    let markets = MarketplaceSet::from_catalogue(&config.marketplaces);
    let predictor = SimulatedPricePredictor::train(TRAINING_SAMPLES, TRAINING_SEED)?;
    let scanner = ArbitrageScanner::new(config.arbitrage, config.plans);

    let predictor: &dyn PricePredictor = &predictor;
    let report = scanner.scan(tier, &markets, Some(predictor), &mut rand::rng())?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn predict(price: f64, category: u32, marketplace: u32) -> anyhow::Result<()> {
    if !price.is_finite() || price <= 0.0 {
        anyhow::bail!("Price must be positive");
    }

    let predictor = SimulatedPricePredictor::train(TRAINING_SAMPLES, TRAINING_SEED)?;
    let prediction = predictor.predict(price, category, marketplace);

    println!("Current price:   {:.2}", price);
    println!("Predicted price: {}", prediction.predicted_price);
    println!("Change:          {}%", prediction.change_percent);
    println!("Confidence:      {}", prediction.confidence);
    println!(
        "Recommendation:  {:?}",
        Recommendation::from_change(prediction.change_percent)
    );
    Ok(())
}
