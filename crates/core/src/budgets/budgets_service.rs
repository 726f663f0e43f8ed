use chrono::Utc;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use super::budgets_model::{Budget, BudgetUpdate, NewBudget};
use super::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::errors::Result;
use crate::users::UserId;
use crate::utils::time_utils::month_label;

/// Service for managing monthly budgets
pub struct BudgetService {
    repository: Arc<dyn BudgetRepositoryTrait>,
}

impl BudgetService {
    pub fn new(repository: Arc<dyn BudgetRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl BudgetServiceTrait for BudgetService {
    fn get_budgets(&self, owner: &UserId) -> Result<Vec<Budget>> {
        self.repository.list(owner)
    }

    fn get_budget(&self, owner: &UserId, budget_id: &str) -> Result<Budget> {
        self.repository.get_by_id(owner, budget_id)
    }

    async fn create_budget(&self, owner: &UserId, new_budget: NewBudget) -> Result<Budget> {
        new_budget.validate()?;
        let now = Utc::now();
        let mut budget = Budget {
            id: Uuid::new_v4().to_string(),
            user_id: owner.to_string(),
            month: new_budget.month.unwrap_or_else(|| month_label(now)),
            income: new_budget.income,
            total_expenses: new_budget.total_expenses,
            savings: 0.0,
            savings_goal: new_budget.savings_goal,
            savings_percentage: 0.0,
            created_at: now,
            updated_at: now,
        };
        budget.recalculate_savings();

        let created = self.repository.create(owner, budget).await?;
        debug!("Created budget {} ({}) for user {}", created.id, created.month, owner);
        Ok(created)
    }

    async fn update_budget(
        &self,
        owner: &UserId,
        budget_id: &str,
        update: BudgetUpdate,
    ) -> Result<Budget> {
        let mut budget = self.repository.get_by_id(owner, budget_id)?;
        update.validate()?;
        update.apply_to(&mut budget);
        budget.updated_at = Utc::now();
        self.repository.update(owner, budget).await
    }

    async fn delete_budget(&self, owner: &UserId, budget_id: &str) -> Result<()> {
        self.repository.get_by_id(owner, budget_id)?;
        self.repository.delete(owner, budget_id).await?;
        debug!("Deleted budget {} for user {}", budget_id, owner);
        Ok(())
    }
}
