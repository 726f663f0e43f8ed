//! Database models for expenses.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use fintrack_core::expenses::Expense;

/// Database model for expenses
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
#[diesel(table_name = crate::schema::expenses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct ExpenseDB {
    pub id: String,
    pub user_id: String,
    pub budget_id: Option<String>,
    pub category: String,
    pub amount: f64,
    pub description: Option<String>,
    pub date: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<ExpenseDB> for Expense {
    fn from(db: ExpenseDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            budget_id: db.budget_id,
            category: db.category,
            amount: db.amount,
            description: db.description,
            date: db.date.and_utc(),
            created_at: db.created_at.and_utc(),
            updated_at: db.updated_at.and_utc(),
        }
    }
}

impl From<Expense> for ExpenseDB {
    fn from(domain: Expense) -> Self {
        Self {
            id: domain.id,
            user_id: domain.user_id,
            budget_id: domain.budget_id,
            category: domain.category,
            amount: domain.amount,
            description: domain.description,
            date: domain.date.naive_utc(),
            created_at: domain.created_at.naive_utc(),
            updated_at: domain.updated_at.naive_utc(),
        }
    }
}
