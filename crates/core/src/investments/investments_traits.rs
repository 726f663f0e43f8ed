use async_trait::async_trait;

use super::investments_model::{GoalInvestments, Investment, InvestmentUpdate, NewInvestment};
use crate::errors::Result;
use crate::recompute::Recomputed;
use crate::users::UserId;

/// Trait for investment repository operations
#[async_trait]
pub trait InvestmentRepositoryTrait: Send + Sync {
    /// Newest first.
    fn list(&self, owner: &UserId) -> Result<Vec<Investment>>;
    fn get_by_id(&self, owner: &UserId, investment_id: &str) -> Result<Investment>;
    fn list_by_goal(&self, owner: &UserId, goal_id: &str) -> Result<Vec<Investment>>;
    async fn create(&self, owner: &UserId, investment: Investment) -> Result<Investment>;
    async fn update(&self, owner: &UserId, investment: Investment) -> Result<Investment>;
    async fn set_goal(
        &self,
        owner: &UserId,
        investment_id: &str,
        goal_id: Option<String>,
    ) -> Result<Investment>;
    async fn delete(&self, owner: &UserId, investment_id: &str) -> Result<usize>;
}

/// Trait for investment service operations
#[async_trait]
pub trait InvestmentServiceTrait: Send + Sync {
    fn get_investments(&self, owner: &UserId) -> Result<Vec<Investment>>;
    fn get_investment(&self, owner: &UserId, investment_id: &str) -> Result<Investment>;
    fn get_goal_investments(&self, owner: &UserId, goal_id: &str) -> Result<GoalInvestments>;
    async fn create_investment(
        &self,
        owner: &UserId,
        new_investment: NewInvestment,
    ) -> Result<Recomputed<Investment>>;
    async fn update_investment(
        &self,
        owner: &UserId,
        investment_id: &str,
        update: InvestmentUpdate,
    ) -> Result<Recomputed<Investment>>;
    async fn delete_investment(&self, owner: &UserId, investment_id: &str)
        -> Result<Recomputed<()>>;
    /// Points the investment at `goal_id`; `None` clears the link.
    async fn link_goal(
        &self,
        owner: &UserId,
        investment_id: &str,
        goal_id: Option<String>,
    ) -> Result<Recomputed<Investment>>;
    async fn unlink_goal(
        &self,
        owner: &UserId,
        investment_id: &str,
    ) -> Result<Recomputed<Investment>>;
}
