//! Expenses domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Domain model representing an expense
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: String,
    pub user_id: String,
    pub budget_id: Option<String>,
    pub category: String,
    pub amount: f64,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input model for creating a new expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExpense {
    pub budget_id: Option<String>,
    pub category: String,
    pub amount: f64,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

impl NewExpense {
    pub fn validate(&self) -> Result<()> {
        validate_expense_fields(&self.category, self.amount)
    }
}

/// Input model for updating an existing expense.
///
/// `date` and `budget_id` keep their stored values when absent; a blank
/// `budget_id` detaches the expense from its budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseUpdate {
    pub budget_id: Option<String>,
    pub category: String,
    pub amount: f64,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

impl ExpenseUpdate {
    pub fn validate(&self) -> Result<()> {
        validate_expense_fields(&self.category, self.amount)
    }
}

fn validate_expense_fields(category: &str, amount: f64) -> Result<()> {
    if category.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "Category".to_string(),
        )));
    }
    if amount.is_nan() || amount <= 0.0 {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Amount must be greater than 0".to_string(),
        )));
    }
    Ok(())
}
