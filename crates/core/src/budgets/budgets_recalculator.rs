//! Keeps a budget's expense total and savings in line with its expenses.

use log::{debug, warn};
use std::sync::Arc;

use super::budgets_model::Budget;
use super::budgets_traits::BudgetRepositoryTrait;
use crate::errors::Result;
use crate::recompute::{RecomputeTarget, RecomputeWarning};
use crate::users::UserId;

pub struct BudgetSavingsRecalculator {
    budget_repository: Arc<dyn BudgetRepositoryTrait>,
}

impl BudgetSavingsRecalculator {
    pub fn new(budget_repository: Arc<dyn BudgetRepositoryTrait>) -> Self {
        Self { budget_repository }
    }

    /// Adds `delta` to the budget's `total_expenses` and recomputes `savings`.
    pub async fn apply_expense_delta(
        &self,
        owner: &UserId,
        budget_id: &str,
        delta: f64,
    ) -> Result<Budget> {
        debug!("Adjusting budget {} total_expenses by {}", budget_id, delta);
        self.budget_repository
            .adjust_total_expenses(owner, budget_id, delta)
            .await
    }

    /// Same as [`Self::apply_expense_delta`], but a failure is logged and
    /// returned as a warning.
    pub async fn apply_or_warn(
        &self,
        owner: &UserId,
        budget_id: &str,
        delta: f64,
    ) -> Option<RecomputeWarning> {
        match self.apply_expense_delta(owner, budget_id, delta).await {
            Ok(_) => None,
            Err(e) => {
                warn!("Failed to recompute budget {}: {}", budget_id, e);
                Some(RecomputeWarning::new(
                    RecomputeTarget::BudgetSavings,
                    budget_id,
                    &e,
                ))
            }
        }
    }
}
