//! Database models for goals.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use fintrack_core::goals::{calculate_progress, Goal, GoalStatus};

/// Database model for goals
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
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct GoalDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub deadline: NaiveDateTime,
    pub status: String,
    pub priority: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion to domain models
impl From<GoalDB> for Goal {
    fn from(db: GoalDB) -> Self {
        let progress = calculate_progress(db.current_amount, db.target_amount);
        Self {
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            target_amount: db.target_amount,
            current_amount: db.current_amount,
            progress,
            deadline: db.deadline.and_utc(),
            status: db
                .status
                .parse()
                .unwrap_or_else(|_| GoalStatus::from_progress(progress)),
            priority: db.priority.parse().unwrap_or_default(),
            description: db.description,
            created_at: db.created_at.and_utc(),
            updated_at: db.updated_at.and_utc(),
        }
    }
}

impl From<Goal> for GoalDB {
    fn from(domain: Goal) -> Self {
        Self {
            id: domain.id,
            user_id: domain.user_id,
            name: domain.name,
            target_amount: domain.target_amount,
            current_amount: domain.current_amount,
            deadline: domain.deadline.naive_utc(),
            status: domain.status.as_str().to_string(),
            priority: domain.priority.as_str().to_string(),
            description: domain.description,
            created_at: domain.created_at.naive_utc(),
            updated_at: domain.updated_at.naive_utc(),
        }
    }
}
