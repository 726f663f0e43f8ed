use async_trait::async_trait;

use super::users_model::{FinancialsUpdate, NewUser, User, UserId};
use crate::errors::Result;

/// Trait for user repository operations
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn get_by_id(&self, user_id: &UserId) -> Result<User>;
    /// Inserts the user, or refreshes the name of the existing user with the same email.
    async fn upsert_by_email(&self, id: String, new_user: NewUser) -> Result<User>;
    async fn update_financials(&self, user_id: &UserId, update: FinancialsUpdate) -> Result<User>;
}

/// Trait for user service operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    /// Finds the user by email or creates it.
    async fn login(&self, new_user: NewUser) -> Result<User>;
    fn get_user(&self, user_id: &UserId) -> Result<User>;
    /// Updates the caller's cached monthly figures. `target_id` must be the caller's own id.
    async fn update_financials(
        &self,
        user_id: &UserId,
        target_id: &str,
        update: FinancialsUpdate,
    ) -> Result<User>;
}
