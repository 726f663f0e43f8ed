use chrono::Utc;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use super::expenses_model::{Expense, ExpenseUpdate, NewExpense};
use super::expenses_traits::{ExpenseRepositoryTrait, ExpenseServiceTrait};
use crate::budgets::{BudgetRepositoryTrait, BudgetSavingsRecalculator};
use crate::errors::Result;
use crate::recompute::Recomputed;
use crate::users::UserId;
use crate::utils::normalize_reference;

/// Service for managing expenses and their budget totals
pub struct ExpenseService {
    repository: Arc<dyn ExpenseRepositoryTrait>,
    budget_repository: Arc<dyn BudgetRepositoryTrait>,
    budget_recalculator: Arc<BudgetSavingsRecalculator>,
}

impl ExpenseService {
    pub fn new(
        repository: Arc<dyn ExpenseRepositoryTrait>,
        budget_repository: Arc<dyn BudgetRepositoryTrait>,
        budget_recalculator: Arc<BudgetSavingsRecalculator>,
    ) -> Self {
        Self {
            repository,
            budget_repository,
            budget_recalculator,
        }
    }

    /// Resolves a requested budget reference, failing with not-found when the
    /// budget does not belong to `owner`.
    fn resolve_budget(&self, owner: &UserId, budget_id: Option<String>) -> Result<Option<String>> {
        match normalize_reference(budget_id) {
            Some(budget_id) => {
                let budget = self.budget_repository.get_by_id(owner, &budget_id)?;
                Ok(Some(budget.id))
            }
            None => Ok(None),
        }
    }
}

#[async_trait::async_trait]
impl ExpenseServiceTrait for ExpenseService {
    fn get_expenses(&self, owner: &UserId) -> Result<Vec<Expense>> {
        self.repository.list(owner)
    }

    fn get_expense(&self, owner: &UserId, expense_id: &str) -> Result<Expense> {
        self.repository.get_by_id(owner, expense_id)
    }

    async fn create_expense(
        &self,
        owner: &UserId,
        new_expense: NewExpense,
    ) -> Result<Recomputed<Expense>> {
        new_expense.validate()?;
        let budget_id = self.resolve_budget(owner, new_expense.budget_id)?;

        let now = Utc::now();
        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            user_id: owner.to_string(),
            budget_id,
            category: new_expense.category.trim().to_string(),
            amount: new_expense.amount,
            description: new_expense.description,
            date: new_expense.date.unwrap_or(now),
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.create(owner, expense).await?;
        debug!("Created expense {} for user {}", created.id, owner);

        let mut warnings = Vec::new();
        if let Some(budget_id) = &created.budget_id {
            warnings.extend(
                self.budget_recalculator
                    .apply_or_warn(owner, budget_id, created.amount)
                    .await,
            );
        }
        Ok(Recomputed::with_warnings(created, warnings))
    }

    async fn update_expense(
        &self,
        owner: &UserId,
        expense_id: &str,
        update: ExpenseUpdate,
    ) -> Result<Recomputed<Expense>> {
        let existing = self.repository.get_by_id(owner, expense_id)?;
        update.validate()?;

        let budget_id = match update.budget_id {
            Some(requested) => self.resolve_budget(owner, Some(requested))?,
            None => existing.budget_id.clone(),
        };

        let expense = Expense {
            budget_id,
            category: update.category.trim().to_string(),
            amount: update.amount,
            description: update.description,
            date: update.date.unwrap_or(existing.date),
            updated_at: Utc::now(),
            ..existing.clone()
        };
        let updated = self.repository.update(owner, expense).await?;

        // The previous budget gives back the old amount and only takes the new
        // amount when the expense still points at it. A newly referenced
        // budget is left untouched.
        let mut warnings = Vec::new();
        if let Some(old_budget_id) = &existing.budget_id {
            let delta = if updated.budget_id.as_ref() == Some(old_budget_id) {
                updated.amount - existing.amount
            } else {
                -existing.amount
            };
            warnings.extend(
                self.budget_recalculator
                    .apply_or_warn(owner, old_budget_id, delta)
                    .await,
            );
        }
        Ok(Recomputed::with_warnings(updated, warnings))
    }

    async fn delete_expense(&self, owner: &UserId, expense_id: &str) -> Result<Recomputed<()>> {
        let existing = self.repository.get_by_id(owner, expense_id)?;

        let mut warnings = Vec::new();
        if let Some(budget_id) = &existing.budget_id {
            warnings.extend(
                self.budget_recalculator
                    .apply_or_warn(owner, budget_id, -existing.amount)
                    .await,
            );
        }

        self.repository.delete(owner, expense_id).await?;
        debug!("Deleted expense {} for user {}", expense_id, owner);
        Ok(Recomputed::with_warnings((), warnings))
    }
}
