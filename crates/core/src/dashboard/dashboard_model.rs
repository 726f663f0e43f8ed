use serde::{Deserialize, Serialize};

use crate::expenses::Expense;
use crate::goals::Goal;
use crate::investments::Investment;

/// Per-user financial overview.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dashboard {
    /// Sum of `current_value` over all investments.
    pub total_investments: f64,
    /// Sum of `current_value` minus sum of `invested`.
    pub total_gains: f64,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub monthly_savings: f64,
    pub investments: Vec<Investment>,
    pub goals: Vec<Goal>,
    pub recent_expenses: Vec<Expense>,
}
