use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

use super::UserRepository;
use crate::error::{HubError, Result};
use crate::types::User;

/// Process-local store keyed by email; contents are lost on restart
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.users.read().get(email).cloned())
    }

    async fn find_by_customer_id(&self, customer_id: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.customer_id.as_deref() == Some(customer_id))
            .cloned())
    }

    async fn insert(&self, user: User) -> Result<()> {
        let mut users = self.users.write();
        if users.contains_key(&user.email) {
            return Err(HubError::Conflict(format!("User {} already exists", user.email)));
        }
        users.insert(user.email.clone(), user);
        Ok(())
    }

    async fn update(&self, user: User) -> Result<()> {
        let mut users = self.users.write();
        match users.get_mut(&user.email) {
            Some(existing) => {
                *existing = user;
                Ok(())
            }
            None => Err(HubError::NotFound(format!("User {} not found", user.email))),
        }
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.users.read().len())
    }

    async fn increment_api_calls(&self, email: &str) -> Result<u32> {
        let mut users = self.users.write();
        let user = users
            .get_mut(email)
            .ok_or_else(|| HubError::NotFound(format!("User {} not found", email)))?;
        user.api_calls_today = user.api_calls_today.saturating_add(1);
        Ok(user.api_calls_today)
    }
}
