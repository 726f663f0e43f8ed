//! Database models for budgets.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use fintrack_core::budgets::{calculate_savings_percentage, Budget};

/// Database model for budgets
#[derive(
    Insertable,
    Queryable,
    Identifiable,
    AsChangeset,
    Selectable,
    PartialEq,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BudgetDB {
    pub id: String,
    pub user_id: String,
    pub month: String,
    pub income: f64,
    pub total_expenses: f64,
    pub savings: f64,
    pub savings_goal: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<BudgetDB> for Budget {
    fn from(db: BudgetDB) -> Self {
        Self {
            savings_percentage: calculate_savings_percentage(db.savings, db.savings_goal),
            id: db.id,
            user_id: db.user_id,
            month: db.month,
            income: db.income,
            total_expenses: db.total_expenses,
            savings: db.savings,
            savings_goal: db.savings_goal,
            created_at: db.created_at.and_utc(),
            updated_at: db.updated_at.and_utc(),
        }
    }
}

impl From<Budget> for BudgetDB {
    fn from(domain: Budget) -> Self {
        Self {
            id: domain.id,
            user_id: domain.user_id,
            month: domain.month,
            income: domain.income,
            total_expenses: domain.total_expenses,
            savings: domain.savings,
            savings_goal: domain.savings_goal,
            created_at: domain.created_at.naive_utc(),
            updated_at: domain.updated_at.naive_utc(),
        }
    }
}
