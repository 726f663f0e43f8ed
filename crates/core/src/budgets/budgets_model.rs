//! Budgets domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::utils::time_utils::is_valid_month_label;

pub fn calculate_savings(income: f64, total_expenses: f64) -> f64 {
    income - total_expenses
}

/// Share of the savings goal reached, in percent; 0 without a positive goal.
pub fn calculate_savings_percentage(savings: f64, savings_goal: f64) -> f64 {
    if savings_goal > 0.0 {
        savings / savings_goal * 100.0
    } else {
        0.0
    }
}

/// Domain model representing a monthly budget
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub month: String,
    pub income: f64,
    pub total_expenses: f64,
    pub savings: f64,
    pub savings_goal: f64,
    pub savings_percentage: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Recomputes `savings` and `savings_percentage` from income and expenses.
    pub fn recalculate_savings(&mut self) {
        self.savings = calculate_savings(self.income, self.total_expenses);
        self.savings_percentage = calculate_savings_percentage(self.savings, self.savings_goal);
    }

    /// Adds `delta` to the expense total and refreshes the savings figures.
    pub fn apply_expense_delta(&mut self, delta: f64) {
        self.total_expenses += delta;
        self.recalculate_savings();
    }
}

/// Input model for creating a new budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBudget {
    pub month: Option<String>,
    pub income: f64,
    #[serde(default)]
    pub total_expenses: f64,
    #[serde(default)]
    pub savings_goal: f64,
}

impl NewBudget {
    pub fn validate(&self) -> Result<()> {
        validate_month(self.month.as_deref())?;
        validate_amount("Income", self.income)?;
        validate_amount("Total expenses", self.total_expenses)?;
        validate_amount("Savings goal", self.savings_goal)
    }
}

/// Input model for updating an existing budget. Absent fields keep their stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BudgetUpdate {
    pub month: Option<String>,
    pub income: Option<f64>,
    pub total_expenses: Option<f64>,
    pub savings_goal: Option<f64>,
}

impl BudgetUpdate {
    pub fn validate(&self) -> Result<()> {
        validate_month(self.month.as_deref())?;
        if let Some(income) = self.income {
            validate_amount("Income", income)?;
        }
        if let Some(total) = self.total_expenses {
            validate_amount("Total expenses", total)?;
        }
        if let Some(goal) = self.savings_goal {
            validate_amount("Savings goal", goal)?;
        }
        Ok(())
    }

    /// Overwrites the supplied fields on `budget` and refreshes its savings.
    pub fn apply_to(&self, budget: &mut Budget) {
        if let Some(month) = &self.month {
            budget.month = month.clone();
        }
        if let Some(income) = self.income {
            budget.income = income;
        }
        if let Some(total) = self.total_expenses {
            budget.total_expenses = total;
        }
        if let Some(goal) = self.savings_goal {
            budget.savings_goal = goal;
        }
        budget.recalculate_savings();
    }
}

fn validate_month(month: Option<&str>) -> Result<()> {
    match month {
        Some(m) if !is_valid_month_label(m) => Err(Error::Validation(
            ValidationError::InvalidInput(format!("Invalid month '{}', expected YYYY-MM", m)),
        )),
        _ => Ok(()),
    }
}

fn validate_amount(field: &str, value: f64) -> Result<()> {
    if value.is_nan() || value < 0.0 {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "{} cannot be negative",
            field
        ))));
    }
    Ok(())
}
