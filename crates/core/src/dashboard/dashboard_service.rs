use log::debug;
use std::sync::Arc;

use super::dashboard_model::Dashboard;
use crate::budgets::BudgetRepositoryTrait;
use crate::constants::{DASHBOARD_ACTIVE_GOALS_LIMIT, DASHBOARD_RECENT_EXPENSES_LIMIT};
use crate::errors::Result;
use crate::expenses::ExpenseRepositoryTrait;
use crate::goals::GoalRepositoryTrait;
use crate::investments::InvestmentRepositoryTrait;
use crate::users::UserId;

pub trait DashboardServiceTrait: Send + Sync {
    fn get_dashboard(&self, owner: &UserId) -> Result<Dashboard>;
}

pub struct DashboardService {
    investment_repository: Arc<dyn InvestmentRepositoryTrait>,
    goal_repository: Arc<dyn GoalRepositoryTrait>,
    budget_repository: Arc<dyn BudgetRepositoryTrait>,
    expense_repository: Arc<dyn ExpenseRepositoryTrait>,
}

impl DashboardService {
    pub fn new(
        investment_repository: Arc<dyn InvestmentRepositoryTrait>,
        goal_repository: Arc<dyn GoalRepositoryTrait>,
        budget_repository: Arc<dyn BudgetRepositoryTrait>,
        expense_repository: Arc<dyn ExpenseRepositoryTrait>,
    ) -> Self {
        Self {
            investment_repository,
            goal_repository,
            budget_repository,
            expense_repository,
        }
    }
}

impl DashboardServiceTrait for DashboardService {
    fn get_dashboard(&self, owner: &UserId) -> Result<Dashboard> {
        let investments = self.investment_repository.list(owner)?;
        // Folding from 0.0 keeps an empty portfolio at +0.0.
        let total_investments = investments.iter().fold(0.0, |acc, i| acc + i.current_value);
        let total_invested = investments.iter().fold(0.0, |acc, i| acc + i.invested);

        let (monthly_income, monthly_expenses, monthly_savings) =
            match self.budget_repository.latest(owner)? {
                Some(budget) => (budget.income, budget.total_expenses, budget.savings),
                None => (0.0, 0.0, 0.0),
            };

        let goals = self
            .goal_repository
            .list_active(owner, DASHBOARD_ACTIVE_GOALS_LIMIT)?;
        let recent_expenses = self
            .expense_repository
            .recent(owner, DASHBOARD_RECENT_EXPENSES_LIMIT)?;

        debug!(
            "Dashboard for {}: {} investments, {} goals, {} expenses",
            owner,
            investments.len(),
            goals.len(),
            recent_expenses.len()
        );

        Ok(Dashboard {
            total_investments,
            total_gains: total_investments - total_invested,
            monthly_income,
            monthly_expenses,
            monthly_savings,
            investments,
            goals,
            recent_expenses,
        })
    }
}
