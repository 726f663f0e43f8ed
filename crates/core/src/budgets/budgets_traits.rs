use async_trait::async_trait;

use super::budgets_model::{Budget, BudgetUpdate, NewBudget};
use crate::errors::Result;
use crate::users::UserId;

/// Trait for budget repository operations
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    /// Newest `created_at` first.
    fn list(&self, owner: &UserId) -> Result<Vec<Budget>>;
    fn get_by_id(&self, owner: &UserId, budget_id: &str) -> Result<Budget>;
    /// The most recently created budget, if any.
    fn latest(&self, owner: &UserId) -> Result<Option<Budget>>;
    async fn create(&self, owner: &UserId, budget: Budget) -> Result<Budget>;
    async fn update(&self, owner: &UserId, budget: Budget) -> Result<Budget>;
    /// Adds `delta` to the expense total and refreshes savings in a single write.
    async fn adjust_total_expenses(
        &self,
        owner: &UserId,
        budget_id: &str,
        delta: f64,
    ) -> Result<Budget>;
    async fn delete(&self, owner: &UserId, budget_id: &str) -> Result<usize>;
}

/// Trait for budget service operations
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    fn get_budgets(&self, owner: &UserId) -> Result<Vec<Budget>>;
    fn get_budget(&self, owner: &UserId, budget_id: &str) -> Result<Budget>;
    async fn create_budget(&self, owner: &UserId, new_budget: NewBudget) -> Result<Budget>;
    async fn update_budget(
        &self,
        owner: &UserId,
        budget_id: &str,
        update: BudgetUpdate,
    ) -> Result<Budget>;
    async fn delete_budget(&self, owner: &UserId, budget_id: &str) -> Result<()>;
}
