use async_trait::async_trait;

use super::goals_model::{Goal, GoalUpdate, NewGoal};
use crate::errors::Result;
use crate::users::UserId;

/// Trait for goal repository operations
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    /// Newest first.
    fn list(&self, owner: &UserId) -> Result<Vec<Goal>>;
    fn get_by_id(&self, owner: &UserId, goal_id: &str) -> Result<Goal>;
    /// Goals that are not completed, newest first, at most `limit`.
    fn list_active(&self, owner: &UserId, limit: i64) -> Result<Vec<Goal>>;
    async fn create(&self, owner: &UserId, goal: Goal) -> Result<Goal>;
    async fn update(&self, owner: &UserId, goal: Goal) -> Result<Goal>;
    /// Stores a new accumulated amount and the status derived from it.
    async fn update_progress(
        &self,
        owner: &UserId,
        goal_id: &str,
        current_amount: f64,
    ) -> Result<Goal>;
    async fn delete(&self, owner: &UserId, goal_id: &str) -> Result<usize>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn get_goals(&self, owner: &UserId) -> Result<Vec<Goal>>;
    fn get_goal(&self, owner: &UserId, goal_id: &str) -> Result<Goal>;
    async fn create_goal(&self, owner: &UserId, new_goal: NewGoal) -> Result<Goal>;
    async fn update_goal(&self, owner: &UserId, goal_id: &str, update: GoalUpdate) -> Result<Goal>;
    async fn delete_goal(&self, owner: &UserId, goal_id: &str) -> Result<()>;
}
