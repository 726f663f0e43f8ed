//! Database models for users.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use fintrack_core::users::User;

/// Database model for users
#[derive(Insertable, Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub monthly_income: Option<f64>,
    pub monthly_expenses: Option<f64>,
    pub monthly_savings: Option<f64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        Self {
            id: db.id,
            email: db.email,
            name: db.name,
            monthly_income: db.monthly_income,
            monthly_expenses: db.monthly_expenses,
            monthly_savings: db.monthly_savings,
            created_at: db.created_at.and_utc(),
            updated_at: db.updated_at.and_utc(),
        }
    }
}
