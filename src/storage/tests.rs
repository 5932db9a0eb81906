use super::*;
use crate::error::HubError;
use rust_decimal_macros::dec;

fn user(email: &str) -> User {
    new_account("user_001".into(), "Test", email, "hash".into())
}

async fn exercise_repository(repo: &dyn UserRepository) {
    assert_eq!(repo.count().await.unwrap(), 0);
    assert!(repo.find_by_email("a@x.io").await.unwrap().is_none());

    repo.insert(user("a@x.io")).await.unwrap();
    assert_eq!(repo.count().await.unwrap(), 1);

    let err = repo.insert(user("a@x.io")).await.unwrap_err();
    assert!(matches!(err, HubError::Conflict(_)));

    let mut stored = repo.find_by_email("a@x.io").await.unwrap().unwrap();
    assert_eq!(stored.plan, PlanTier::Starter);
    assert_eq!(stored.subscription_status, SubscriptionStatus::Trial);

    stored.plan = PlanTier::Enterprise;
    stored.subscription_status = SubscriptionStatus::Active;
    stored.customer_id = Some("cus_123".into());
    stored.total_revenue = dec!(49.50);
    repo.update(stored.clone()).await.unwrap();

    let by_customer = repo.find_by_customer_id("cus_123").await.unwrap().unwrap();
    assert_eq!(by_customer.email, "a@x.io");
    assert_eq!(by_customer.plan, PlanTier::Enterprise);
    assert_eq!(by_customer.total_revenue, dec!(49.50));
    assert!(repo.find_by_customer_id("cus_other").await.unwrap().is_none());

    assert_eq!(repo.increment_api_calls("a@x.io").await.unwrap(), 1);
    assert_eq!(repo.increment_api_calls("a@x.io").await.unwrap(), 2);
    assert!(matches!(
        repo.increment_api_calls("nobody@x.io").await.unwrap_err(),
        HubError::NotFound(_)
    ));

    let err = repo.update(user("ghost@x.io")).await.unwrap_err();
    assert!(matches!(err, HubError::NotFound(_)));
}

#[tokio::test]
async fn test_in_memory_repository() {
    exercise_repository(&InMemoryUserRepository::new()).await;
}

#[tokio::test]
async fn test_sqlite_repository() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("users.db");
    let repo = SqliteUserRepository::connect(path.to_str().unwrap()).await.unwrap();
    exercise_repository(&repo).await;
}

#[tokio::test]
async fn test_sqlite_persists_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.db");
    let path = path.to_str().unwrap();

    {
        let repo = SqliteUserRepository::connect(path).await.unwrap();
        repo.insert(user("keep@x.io")).await.unwrap();
    }

    let repo = SqliteUserRepository::connect(path).await.unwrap();
    let found = repo.find_by_email("keep@x.io").await.unwrap().unwrap();
    assert_eq!(found.id, "user_001");
    assert_eq!(found.name, "Test");
    assert!(found.customer_id.is_none());
}

#[tokio::test]
async fn test_seed_demo_user_once() {
    let repo = InMemoryUserRepository::new();
    let hasher = PasswordHasher::new(10);

    seed_demo_user(&repo, &hasher).await.unwrap();
    seed_demo_user(&repo, &hasher).await.unwrap();
    assert_eq!(repo.count().await.unwrap(), 1);

    let demo = repo.find_by_email(DEMO_EMAIL).await.unwrap().unwrap();
    assert_eq!(demo.id, "user_001");
    assert_eq!(demo.plan, PlanTier::Professional);
    assert_eq!(demo.subscription_status, SubscriptionStatus::Active);
    assert!(hasher.verify(DEMO_PASSWORD, &demo.password_hash));
}

#[tokio::test]
async fn test_seed_skips_existing_account() {
    let mut mock = MockUserRepository::new();
    mock.expect_find_by_email()
        .returning(|email| Ok(Some(user(email))));
    mock.expect_insert().never();

    seed_demo_user(&mock, &PasswordHasher::new(10)).await.unwrap();
}

#[tokio::test]
async fn test_next_user_id_follows_count() {
    let mut mock = MockUserRepository::new();
    mock.expect_count().returning(|| Ok(41));
    assert_eq!(next_user_id(&mock).await.unwrap(), "user_042");
}

#[tokio::test]
async fn test_open_memory_backend() {
    let repo = open_repository(&StorageConfig::default()).await.unwrap();
    assert_eq!(repo.count().await.unwrap(), 0);
}
