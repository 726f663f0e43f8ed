//! In-memory repositories shared by the service tests.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::budgets::{Budget, BudgetRepositoryTrait, BudgetSavingsRecalculator};
use crate::errors::{DatabaseError, Error, Result};
use crate::expenses::{Expense, ExpenseRepositoryTrait, ExpenseService};
use crate::goals::{Goal, GoalAmountRecalculator, GoalRepositoryTrait, GoalService};
use crate::investments::{Investment, InvestmentRepositoryTrait, InvestmentService};
use crate::users::UserId;

/// Mirrors the relational behavior the services rely on, including
/// `ON DELETE SET NULL` for goal and budget references.
#[derive(Default)]
pub struct InMemoryStore {
    pub investments: Mutex<Vec<Investment>>,
    pub goals: Mutex<Vec<Goal>>,
    pub budgets: Mutex<Vec<Budget>>,
    pub expenses: Mutex<Vec<Expense>>,
    /// Makes goal and budget recompute writes fail.
    pub fail_recompute: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_recomputes(&self) {
        self.fail_recompute.store(true, Ordering::SeqCst);
    }

    fn check_recompute(&self) -> Result<()> {
        if self.fail_recompute.load(Ordering::SeqCst) {
            return Err(Error::Database(DatabaseError::QueryFailed(
                "recompute disabled".to_string(),
            )));
        }
        Ok(())
    }
}

pub fn investment_service(store: &Arc<InMemoryStore>) -> InvestmentService {
    let recalculator = Arc::new(GoalAmountRecalculator::new(store.clone(), store.clone()));
    InvestmentService::new(store.clone(), store.clone(), recalculator)
}

pub fn goal_service(store: &Arc<InMemoryStore>) -> GoalService {
    GoalService::new(store.clone())
}

pub fn expense_service(store: &Arc<InMemoryStore>) -> ExpenseService {
    let recalculator = Arc::new(BudgetSavingsRecalculator::new(store.clone()));
    ExpenseService::new(store.clone(), store.clone(), recalculator)
}

fn owned<'a, T>(
    items: impl Iterator<Item = &'a T>,
    owner: &UserId,
    user_id: impl Fn(&T) -> &str,
) -> Vec<T>
where
    T: Clone + 'a,
{
    items
        .filter(|item| user_id(item) == owner.as_str())
        .cloned()
        .collect()
}

#[async_trait]
impl InvestmentRepositoryTrait for InMemoryStore {
    fn list(&self, owner: &UserId) -> Result<Vec<Investment>> {
        let investments = self.investments.lock().unwrap();
        let mut list = owned(investments.iter(), owner, |i| i.user_id.as_str());
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    fn get_by_id(&self, owner: &UserId, investment_id: &str) -> Result<Investment> {
        self.investments
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == investment_id && i.user_id == owner.as_str())
            .cloned()
            .ok_or_else(|| Error::not_found("Investment"))
    }

    fn list_by_goal(&self, owner: &UserId, goal_id: &str) -> Result<Vec<Investment>> {
        Ok(InvestmentRepositoryTrait::list(self, owner)?
            .into_iter()
            .filter(|i| i.goal_id.as_deref() == Some(goal_id))
            .collect())
    }

    async fn create(&self, owner: &UserId, investment: Investment) -> Result<Investment> {
        let investment = Investment {
            user_id: owner.to_string(),
            ..investment
        };
        self.investments.lock().unwrap().push(investment.clone());
        Ok(investment)
    }

    async fn update(&self, owner: &UserId, investment: Investment) -> Result<Investment> {
        let mut investments = self.investments.lock().unwrap();
        let slot = investments
            .iter_mut()
            .find(|i| i.id == investment.id && i.user_id == owner.as_str())
            .ok_or_else(|| Error::not_found("Investment"))?;
        *slot = investment.clone();
        Ok(investment)
    }

    async fn set_goal(
        &self,
        owner: &UserId,
        investment_id: &str,
        goal_id: Option<String>,
    ) -> Result<Investment> {
        let mut investments = self.investments.lock().unwrap();
        let slot = investments
            .iter_mut()
            .find(|i| i.id == investment_id && i.user_id == owner.as_str())
            .ok_or_else(|| Error::not_found("Investment"))?;
        slot.goal_id = goal_id;
        slot.updated_at = Utc::now();
        Ok(slot.clone())
    }

    async fn delete(&self, owner: &UserId, investment_id: &str) -> Result<usize> {
        let mut investments = self.investments.lock().unwrap();
        let before = investments.len();
        investments.retain(|i| !(i.id == investment_id && i.user_id == owner.as_str()));
        Ok(before - investments.len())
    }
}

#[async_trait]
impl GoalRepositoryTrait for InMemoryStore {
    fn list(&self, owner: &UserId) -> Result<Vec<Goal>> {
        let goals = self.goals.lock().unwrap();
        let mut list = owned(goals.iter(), owner, |g| g.user_id.as_str());
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    fn get_by_id(&self, owner: &UserId, goal_id: &str) -> Result<Goal> {
        self.goals
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.id == goal_id && g.user_id == owner.as_str())
            .cloned()
            .ok_or_else(|| Error::not_found("Goal"))
    }

    fn list_active(&self, owner: &UserId, limit: i64) -> Result<Vec<Goal>> {
        Ok(GoalRepositoryTrait::list(self, owner)?
            .into_iter()
            .filter(|g| !g.is_completed())
            .take(limit as usize)
            .collect())
    }

    async fn create(&self, owner: &UserId, goal: Goal) -> Result<Goal> {
        let goal = Goal {
            user_id: owner.to_string(),
            ..goal
        };
        self.goals.lock().unwrap().push(goal.clone());
        Ok(goal)
    }

    async fn update(&self, owner: &UserId, goal: Goal) -> Result<Goal> {
        let mut goals = self.goals.lock().unwrap();
        let slot = goals
            .iter_mut()
            .find(|g| g.id == goal.id && g.user_id == owner.as_str())
            .ok_or_else(|| Error::not_found("Goal"))?;
        *slot = goal.clone();
        Ok(goal)
    }

    async fn update_progress(
        &self,
        owner: &UserId,
        goal_id: &str,
        current_amount: f64,
    ) -> Result<Goal> {
        self.check_recompute()?;
        let mut goals = self.goals.lock().unwrap();
        let slot = goals
            .iter_mut()
            .find(|g| g.id == goal_id && g.user_id == owner.as_str())
            .ok_or_else(|| Error::not_found("Goal"))?;
        slot.current_amount = current_amount;
        slot.refresh_progress();
        slot.updated_at = Utc::now();
        Ok(slot.clone())
    }

    async fn delete(&self, owner: &UserId, goal_id: &str) -> Result<usize> {
        let removed = {
            let mut goals = self.goals.lock().unwrap();
            let before = goals.len();
            goals.retain(|g| !(g.id == goal_id && g.user_id == owner.as_str()));
            before - goals.len()
        };
        if removed > 0 {
            for investment in self.investments.lock().unwrap().iter_mut() {
                if investment.goal_id.as_deref() == Some(goal_id) {
                    investment.goal_id = None;
                }
            }
        }
        Ok(removed)
    }
}

#[async_trait]
impl BudgetRepositoryTrait for InMemoryStore {
    fn list(&self, owner: &UserId) -> Result<Vec<Budget>> {
        let budgets = self.budgets.lock().unwrap();
        let mut list = owned(budgets.iter(), owner, |b| b.user_id.as_str());
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    fn get_by_id(&self, owner: &UserId, budget_id: &str) -> Result<Budget> {
        self.budgets
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == budget_id && b.user_id == owner.as_str())
            .cloned()
            .ok_or_else(|| Error::not_found("Budget"))
    }

    fn latest(&self, owner: &UserId) -> Result<Option<Budget>> {
        Ok(BudgetRepositoryTrait::list(self, owner)?.into_iter().next())
    }

    async fn create(&self, owner: &UserId, budget: Budget) -> Result<Budget> {
        let budget = Budget {
            user_id: owner.to_string(),
            ..budget
        };
        self.budgets.lock().unwrap().push(budget.clone());
        Ok(budget)
    }

    async fn update(&self, owner: &UserId, budget: Budget) -> Result<Budget> {
        let mut budgets = self.budgets.lock().unwrap();
        let slot = budgets
            .iter_mut()
            .find(|b| b.id == budget.id && b.user_id == owner.as_str())
            .ok_or_else(|| Error::not_found("Budget"))?;
        *slot = budget.clone();
        Ok(budget)
    }

    async fn adjust_total_expenses(
        &self,
        owner: &UserId,
        budget_id: &str,
        delta: f64,
    ) -> Result<Budget> {
        self.check_recompute()?;
        let mut budgets = self.budgets.lock().unwrap();
        let slot = budgets
            .iter_mut()
            .find(|b| b.id == budget_id && b.user_id == owner.as_str())
            .ok_or_else(|| Error::not_found("Budget"))?;
        slot.apply_expense_delta(delta);
        slot.updated_at = Utc::now();
        Ok(slot.clone())
    }

    async fn delete(&self, owner: &UserId, budget_id: &str) -> Result<usize> {
        let removed = {
            let mut budgets = self.budgets.lock().unwrap();
            let before = budgets.len();
            budgets.retain(|b| !(b.id == budget_id && b.user_id == owner.as_str()));
            before - budgets.len()
        };
        if removed > 0 {
            for expense in self.expenses.lock().unwrap().iter_mut() {
                if expense.budget_id.as_deref() == Some(budget_id) {
                    expense.budget_id = None;
                }
            }
        }
        Ok(removed)
    }
}

#[async_trait]
impl ExpenseRepositoryTrait for InMemoryStore {
    fn list(&self, owner: &UserId) -> Result<Vec<Expense>> {
        let expenses = self.expenses.lock().unwrap();
        let mut list = owned(expenses.iter(), owner, |e| e.user_id.as_str());
        list.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(list)
    }

    fn recent(&self, owner: &UserId, limit: i64) -> Result<Vec<Expense>> {
        Ok(ExpenseRepositoryTrait::list(self, owner)?
            .into_iter()
            .take(limit as usize)
            .collect())
    }

    fn get_by_id(&self, owner: &UserId, expense_id: &str) -> Result<Expense> {
        self.expenses
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == expense_id && e.user_id == owner.as_str())
            .cloned()
            .ok_or_else(|| Error::not_found("Expense"))
    }

    async fn create(&self, owner: &UserId, expense: Expense) -> Result<Expense> {
        let expense = Expense {
            user_id: owner.to_string(),
            ..expense
        };
        self.expenses.lock().unwrap().push(expense.clone());
        Ok(expense)
    }

    async fn update(&self, owner: &UserId, expense: Expense) -> Result<Expense> {
        let mut expenses = self.expenses.lock().unwrap();
        let slot = expenses
            .iter_mut()
            .find(|e| e.id == expense.id && e.user_id == owner.as_str())
            .ok_or_else(|| Error::not_found("Expense"))?;
        *slot = expense.clone();
        Ok(expense)
    }

    async fn delete(&self, owner: &UserId, expense_id: &str) -> Result<usize> {
        let mut expenses = self.expenses.lock().unwrap();
        let before = expenses.len();
        expenses.retain(|e| !(e.id == expense_id && e.user_id == owner.as_str()));
        Ok(before - expenses.len())
    }
}
