//! Database models for investments.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use fintrack_core::investments::{Investment, InvestmentStatus};

/// Database model for investments
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
#[diesel(table_name = crate::schema::investments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct InvestmentDB {
    pub id: String,
    pub user_id: String,
    pub goal_id: Option<String>,
    pub name: String,
    pub investment_type: String,
    pub invested: f64,
    pub current_value: f64,
    pub returns: Option<f64>,
    pub status: String,
    pub purchase_date: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<InvestmentDB> for Investment {
    fn from(db: InvestmentDB) -> Self {
        let status = db
            .status
            .parse()
            .unwrap_or_else(|_| InvestmentStatus::from_returns(db.returns));
        Self {
            id: db.id,
            user_id: db.user_id,
            goal_id: db.goal_id,
            name: db.name,
            investment_type: db.investment_type,
            invested: db.invested,
            current_value: db.current_value,
            returns: db.returns,
            status,
            purchase_date: db.purchase_date.and_utc(),
            created_at: db.created_at.and_utc(),
            updated_at: db.updated_at.and_utc(),
        }
    }
}

impl From<Investment> for InvestmentDB {
    fn from(domain: Investment) -> Self {
        Self {
            id: domain.id,
            user_id: domain.user_id,
            goal_id: domain.goal_id,
            name: domain.name,
            investment_type: domain.investment_type,
            invested: domain.invested,
            current_value: domain.current_value,
            returns: domain.returns,
            status: domain.status.as_str().to_string(),
            purchase_date: domain.purchase_date.naive_utc(),
            created_at: domain.created_at.naive_utc(),
            updated_at: domain.updated_at.naive_utc(),
        }
    }
}
