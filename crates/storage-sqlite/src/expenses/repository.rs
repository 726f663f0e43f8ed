use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use fintrack_core::expenses::{Expense, ExpenseRepositoryTrait};
use fintrack_core::{Error, Result, UserId};

use super::model::ExpenseDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::expenses;
use crate::schema::expenses::dsl::*;

pub struct ExpenseRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ExpenseRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ExpenseRepository { pool, writer }
    }
}

#[async_trait]
impl ExpenseRepositoryTrait for ExpenseRepository {
    fn list(&self, owner: &UserId) -> Result<Vec<Expense>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = expenses
            .filter(user_id.eq(owner.as_str()))
            .order((date.desc(), created_at.desc()))
            .select(ExpenseDB::as_select())
            .load::<ExpenseDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Expense::from).collect())
    }

    fn recent(&self, owner: &UserId, limit: i64) -> Result<Vec<Expense>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = expenses
            .filter(user_id.eq(owner.as_str()))
            .order((date.desc(), created_at.desc()))
            .limit(limit)
            .select(ExpenseDB::as_select())
            .load::<ExpenseDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Expense::from).collect())
    }

    fn get_by_id(&self, owner: &UserId, expense_id: &str) -> Result<Expense> {
        let mut conn = get_connection(&self.pool)?;
        expenses
            .filter(id.eq(expense_id))
            .filter(user_id.eq(owner.as_str()))
            .select(ExpenseDB::as_select())
            .first::<ExpenseDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(Expense::from)
            .ok_or_else(|| Error::not_found("Expense"))
    }

    async fn create(&self, owner: &UserId, expense: Expense) -> Result<Expense> {
        let mut row = ExpenseDB::from(expense);
        row.user_id = owner.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Expense> {
                let inserted = diesel::insert_into(expenses::table)
                    .values(&row)
                    .returning(ExpenseDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Expense::from(inserted))
            })
            .await
    }

    async fn update(&self, owner: &UserId, expense: Expense) -> Result<Expense> {
        let mut row = ExpenseDB::from(expense);
        row.user_id = owner.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Expense> {
                diesel::update(
                    expenses
                        .filter(id.eq(row.id.clone()))
                        .filter(user_id.eq(row.user_id.clone())),
                )
                .set(&row)
                .returning(ExpenseDB::as_returning())
                .get_result(conn)
                .optional()
                .map_err(StorageError::from)?
                .map(Expense::from)
                .ok_or_else(|| Error::not_found("Expense"))
            })
            .await
    }

    async fn delete(&self, owner: &UserId, expense_id: &str) -> Result<usize> {
        let owner_id = owner.to_string();
        let expense_id = expense_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let deleted = diesel::delete(
                    expenses
                        .filter(id.eq(expense_id))
                        .filter(user_id.eq(owner_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;
                if deleted == 0 {
                    return Err(Error::not_found("Expense"));
                }
                Ok(deleted)
            })
            .await
    }
}
