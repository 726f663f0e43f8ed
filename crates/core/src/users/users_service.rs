use log::{debug, info};
use std::sync::Arc;
use uuid::Uuid;

use super::users_model::{FinancialsUpdate, NewUser, User, UserId};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::errors::{Error, Result};

/// Service for managing users
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl UserServiceTrait for UserService {
    async fn login(&self, new_user: NewUser) -> Result<User> {
        new_user.validate()?;
        let new_user = NewUser {
            email: new_user.email.trim().to_lowercase(),
            name: new_user.name.filter(|n| !n.trim().is_empty()),
        };
        let user = self
            .repository
            .upsert_by_email(Uuid::new_v4().to_string(), new_user)
            .await?;
        info!("User {} logged in", user.id);
        Ok(user)
    }

    fn get_user(&self, user_id: &UserId) -> Result<User> {
        self.repository.get_by_id(user_id)
    }

    async fn update_financials(
        &self,
        user_id: &UserId,
        target_id: &str,
        update: FinancialsUpdate,
    ) -> Result<User> {
        if user_id.as_str() != target_id {
            return Err(Error::not_found("User"));
        }
        if update.is_empty() {
            debug!("Empty financials update for user {}", user_id);
            return self.repository.get_by_id(user_id);
        }
        self.repository.update_financials(user_id, update).await
    }
}
