use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::path::Path;
use std::str::FromStr;

use super::UserRepository;
use crate::error::{HubError, Result};
use crate::types::{PlanTier, SubscriptionStatus, User};

const SELECT_USER: &str = r#"
    SELECT id, name, email, password_hash, plan, created_at,
           subscription_status, api_calls_today, total_revenue, customer_id
    FROM users
"#;

/// Sqlite-backed store; the table is created on connect
#[derive(Debug, Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub async fn connect(path: &str) -> Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    HubError::Internal(format!("Cannot create {}: {}", parent.display(), e))
                })?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let repo = Self { pool };
        repo.initialize_schema().await?;
        Ok(repo)
    }

    async fn initialize_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                email TEXT PRIMARY KEY,
                id TEXT NOT NULL,
                name TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                plan TEXT NOT NULL,
                created_at TEXT NOT NULL,
                subscription_status TEXT NOT NULL,
                api_calls_today INTEGER NOT NULL DEFAULT 0,
                total_revenue TEXT NOT NULL DEFAULT '0',
                customer_id TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_customer ON users(customer_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

fn user_from_row(row: &SqliteRow) -> Result<User> {
    let plan: String = row.try_get("plan")?;
    let status: String = row.try_get("subscription_status")?;
    let revenue: String = row.try_get("total_revenue")?;
    let calls: i64 = row.try_get("api_calls_today")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;

    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        plan: PlanTier::from(plan.as_str()),
        created_at,
        subscription_status: SubscriptionStatus::parse(&status).ok_or_else(|| {
            HubError::Internal(format!("Unknown subscription status '{}'", status))
        })?,
        api_calls_today: u32::try_from(calls).unwrap_or(u32::MAX),
        total_revenue: Decimal::from_str(&revenue)
            .map_err(|e| HubError::Internal(format!("Bad revenue value '{}': {}", revenue, e)))?,
        customer_id: row.try_get("customer_id")?,
    })
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query(&format!("{} WHERE email = ?", SELECT_USER))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_by_customer_id(&self, customer_id: &str) -> Result<Option<User>> {
        let row = sqlx::query(&format!("{} WHERE customer_id = ? LIMIT 1", SELECT_USER))
            .bind(customer_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn insert(&self, user: User) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO users
            (email, id, name, password_hash, plan, created_at,
             subscription_status, api_calls_today, total_revenue, customer_id)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.email)
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.password_hash)
        .bind(user.plan.as_str())
        .bind(user.created_at)
        .bind(user.subscription_status.as_str())
        .bind(i64::from(user.api_calls_today))
        .bind(user.total_revenue.to_string())
        .bind(&user.customer_id)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(HubError::Conflict(
                format!("User {} already exists", user.email),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn update(&self, user: User) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                id = ?, name = ?, password_hash = ?, plan = ?, created_at = ?,
                subscription_status = ?, api_calls_today = ?, total_revenue = ?,
                customer_id = ?
            WHERE email = ?
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.password_hash)
        .bind(user.plan.as_str())
        .bind(user.created_at)
        .bind(user.subscription_status.as_str())
        .bind(i64::from(user.api_calls_today))
        .bind(user.total_revenue.to_string())
        .bind(&user.customer_id)
        .bind(&user.email)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(HubError::NotFound(format!("User {} not found", user.email)));
        }
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    async fn increment_api_calls(&self, email: &str) -> Result<u32> {
        let calls: Option<i64> = sqlx::query_scalar(
            "UPDATE users SET api_calls_today = api_calls_today + 1 WHERE email = ? RETURNING api_calls_today",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        match calls {
            Some(calls) => Ok(u32::try_from(calls).unwrap_or(u32::MAX)),
            None => Err(HubError::NotFound(format!("User {} not found", email))),
        }
    }
}
