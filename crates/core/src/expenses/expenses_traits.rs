use async_trait::async_trait;

use super::expenses_model::{Expense, ExpenseUpdate, NewExpense};
use crate::errors::Result;
use crate::recompute::Recomputed;
use crate::users::UserId;

/// Trait for expense repository operations
#[async_trait]
pub trait ExpenseRepositoryTrait: Send + Sync {
    /// Newest `date` first.
    fn list(&self, owner: &UserId) -> Result<Vec<Expense>>;
    /// The `limit` most recent expenses by `date`.
    fn recent(&self, owner: &UserId, limit: i64) -> Result<Vec<Expense>>;
    fn get_by_id(&self, owner: &UserId, expense_id: &str) -> Result<Expense>;
    async fn create(&self, owner: &UserId, expense: Expense) -> Result<Expense>;
    async fn update(&self, owner: &UserId, expense: Expense) -> Result<Expense>;
    async fn delete(&self, owner: &UserId, expense_id: &str) -> Result<usize>;
}

/// Trait for expense service operations
#[async_trait]
pub trait ExpenseServiceTrait: Send + Sync {
    fn get_expenses(&self, owner: &UserId) -> Result<Vec<Expense>>;
    fn get_expense(&self, owner: &UserId, expense_id: &str) -> Result<Expense>;
    async fn create_expense(
        &self,
        owner: &UserId,
        new_expense: NewExpense,
    ) -> Result<Recomputed<Expense>>;
    async fn update_expense(
        &self,
        owner: &UserId,
        expense_id: &str,
        update: ExpenseUpdate,
    ) -> Result<Recomputed<Expense>>;
    async fn delete_expense(&self, owner: &UserId, expense_id: &str) -> Result<Recomputed<()>>;
}
