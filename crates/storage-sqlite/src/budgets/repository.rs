use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use fintrack_core::budgets::{Budget, BudgetRepositoryTrait};
use fintrack_core::{Error, Result, UserId};

use super::model::BudgetDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::budgets;
use crate::schema::budgets::dsl::*;

pub struct BudgetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        BudgetRepository { pool, writer }
    }
}

fn find_owned(conn: &mut SqliteConnection, owner_id: &str, budget_id: &str) -> Result<Budget> {
    budgets
        .filter(id.eq(budget_id))
        .filter(user_id.eq(owner_id))
        .select(BudgetDB::as_select())
        .first::<BudgetDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .map(Budget::from)
        .ok_or_else(|| Error::not_found("Budget"))
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    fn list(&self, owner: &UserId) -> Result<Vec<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = budgets
            .filter(user_id.eq(owner.as_str()))
            .order((created_at.desc(), id.asc()))
            .select(BudgetDB::as_select())
            .load::<BudgetDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Budget::from).collect())
    }

    fn get_by_id(&self, owner: &UserId, budget_id: &str) -> Result<Budget> {
        let mut conn = get_connection(&self.pool)?;
        find_owned(&mut conn, owner.as_str(), budget_id)
    }

    fn latest(&self, owner: &UserId) -> Result<Option<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        let row = budgets
            .filter(user_id.eq(owner.as_str()))
            .order((created_at.desc(), id.asc()))
            .select(BudgetDB::as_select())
            .first::<BudgetDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(Budget::from))
    }

    async fn create(&self, owner: &UserId, budget: Budget) -> Result<Budget> {
        let mut row = BudgetDB::from(budget);
        row.user_id = owner.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let inserted = diesel::insert_into(budgets::table)
                    .values(&row)
                    .returning(BudgetDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Budget::from(inserted))
            })
            .await
    }

    async fn update(&self, owner: &UserId, budget: Budget) -> Result<Budget> {
        let mut row = BudgetDB::from(budget);
        row.user_id = owner.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                diesel::update(
                    budgets
                        .filter(id.eq(row.id.clone()))
                        .filter(user_id.eq(row.user_id.clone())),
                )
                .set(&row)
                .returning(BudgetDB::as_returning())
                .get_result(conn)
                .optional()
                .map_err(StorageError::from)?
                .map(Budget::from)
                .ok_or_else(|| Error::not_found("Budget"))
            })
            .await
    }

    async fn adjust_total_expenses(
        &self,
        owner: &UserId,
        budget_id: &str,
        delta: f64,
    ) -> Result<Budget> {
        let owner_id = owner.to_string();
        let budget_id = budget_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let mut budget = find_owned(conn, &owner_id, &budget_id)?;
                budget.apply_expense_delta(delta);
                budget.updated_at = Utc::now();

                diesel::update(budgets.filter(id.eq(&budget.id)).filter(user_id.eq(&owner_id)))
                    .set((
                        total_expenses.eq(budget.total_expenses),
                        savings.eq(budget.savings),
                        updated_at.eq(budget.updated_at.naive_utc()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(budget)
            })
            .await
    }

    async fn delete(&self, owner: &UserId, budget_id: &str) -> Result<usize> {
        let owner_id = owner.to_string();
        let budget_id = budget_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let deleted =
                    diesel::delete(budgets.filter(id.eq(budget_id)).filter(user_id.eq(owner_id)))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                if deleted == 0 {
                    return Err(Error::not_found("Budget"));
                }
                Ok(deleted)
            })
            .await
    }
}
