//! User account storage
//!
//! Handlers only see the [`UserRepository`] trait. The backend is picked
//! from `[storage]` at startup and injected through the app state.

mod memory;
mod sqlite;

#[cfg(test)]
mod tests;

pub use memory::InMemoryUserRepository;
pub use sqlite::SqliteUserRepository;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;

use crate::auth::PasswordHasher;
use crate::config::{StorageBackend, StorageConfig};
use crate::error::Result;
use crate::types::{PlanTier, SubscriptionStatus, User};

pub const DEMO_EMAIL: &str = "user1@example.com";
pub const DEMO_PASSWORD: &str = "password";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn find_by_customer_id(&self, customer_id: &str) -> Result<Option<User>>;

    /// Fails with `Conflict` when the email is taken
    async fn insert(&self, user: User) -> Result<()>;

    /// Replace an existing record; `NotFound` when absent
    async fn update(&self, user: User) -> Result<()>;

    async fn count(&self) -> Result<usize>;

    /// Bump the daily call counter and return the new value
    async fn increment_api_calls(&self, email: &str) -> Result<u32>;
}

/// Sequential account id, `user_001` style
pub async fn next_user_id(repo: &dyn UserRepository) -> Result<String> {
    Ok(format!("user_{:03}", repo.count().await? + 1))
}

/// Build a fresh trial account on the starter plan
pub fn new_account(id: String, name: &str, email: &str, password_hash: String) -> User {
    User {
        id,
        name: name.to_string(),
        email: email.to_string(),
        password_hash,
        plan: PlanTier::Starter,
        created_at: Utc::now(),
        subscription_status: SubscriptionStatus::Trial,
        api_calls_today: 0,
        total_revenue: Decimal::ZERO,
        customer_id: None,
    }
}

/// Insert the demo account unless it already exists
pub async fn seed_demo_user(repo: &dyn UserRepository, hasher: &PasswordHasher) -> Result<()> {
    if repo.find_by_email(DEMO_EMAIL).await?.is_some() {
        return Ok(());
    }

    let mut user = new_account(
        next_user_id(repo).await?,
        "Demo User",
        DEMO_EMAIL,
        hasher.hash(DEMO_PASSWORD)?,
    );
    user.plan = PlanTier::Professional;
    user.subscription_status = SubscriptionStatus::Active;
    repo.insert(user).await?;

    info!("Seeded demo account {}", DEMO_EMAIL);
    Ok(())
}

/// Open the configured backend
pub async fn open_repository(config: &StorageConfig) -> Result<Arc<dyn UserRepository>> {
    match config.backend {
        StorageBackend::Memory => {
            info!("Using in-memory user storage");
            Ok(Arc::new(InMemoryUserRepository::new()))
        }
        StorageBackend::Sqlite => {
            info!("Using sqlite user storage at {}", config.path);
            Ok(Arc::new(SqliteUserRepository::connect(&config.path).await?))
        }
    }
}
