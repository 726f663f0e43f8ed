use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use fintrack_core::investments::{Investment, InvestmentRepositoryTrait};
use fintrack_core::{Error, Result, UserId};

use super::model::InvestmentDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::investments;
use crate::schema::investments::dsl::*;

pub struct InvestmentRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl InvestmentRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        InvestmentRepository { pool, writer }
    }
}

#[async_trait]
impl InvestmentRepositoryTrait for InvestmentRepository {
    fn list(&self, owner: &UserId) -> Result<Vec<Investment>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = investments
            .filter(user_id.eq(owner.as_str()))
            .order((created_at.desc(), id.asc()))
            .select(InvestmentDB::as_select())
            .load::<InvestmentDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Investment::from).collect())
    }

    fn get_by_id(&self, owner: &UserId, investment_id: &str) -> Result<Investment> {
        let mut conn = get_connection(&self.pool)?;
        investments
            .filter(id.eq(investment_id))
            .filter(user_id.eq(owner.as_str()))
            .select(InvestmentDB::as_select())
            .first::<InvestmentDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(Investment::from)
            .ok_or_else(|| Error::not_found("Investment"))
    }

    fn list_by_goal(&self, owner: &UserId, linked_goal_id: &str) -> Result<Vec<Investment>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = investments
            .filter(user_id.eq(owner.as_str()))
            .filter(goal_id.eq(linked_goal_id))
            .order((created_at.desc(), id.asc()))
            .select(InvestmentDB::as_select())
            .load::<InvestmentDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Investment::from).collect())
    }

    async fn create(&self, owner: &UserId, investment: Investment) -> Result<Investment> {
        let mut row = InvestmentDB::from(investment);
        row.user_id = owner.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Investment> {
                let inserted = diesel::insert_into(investments::table)
                    .values(&row)
                    .returning(InvestmentDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Investment::from(inserted))
            })
            .await
    }

    async fn update(&self, owner: &UserId, investment: Investment) -> Result<Investment> {
        let mut row = InvestmentDB::from(investment);
        row.user_id = owner.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Investment> {
                diesel::update(
                    investments
                        .filter(id.eq(row.id.clone()))
                        .filter(user_id.eq(row.user_id.clone())),
                )
                .set(&row)
                .returning(InvestmentDB::as_returning())
                .get_result(conn)
                .optional()
                .map_err(StorageError::from)?
                .map(Investment::from)
                .ok_or_else(|| Error::not_found("Investment"))
            })
            .await
    }

    async fn set_goal(
        &self,
        owner: &UserId,
        investment_id: &str,
        new_goal_id: Option<String>,
    ) -> Result<Investment> {
        let owner_id = owner.to_string();
        let investment_id = investment_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Investment> {
                diesel::update(
                    investments
                        .filter(id.eq(investment_id))
                        .filter(user_id.eq(owner_id)),
                )
                .set((
                    goal_id.eq(new_goal_id),
                    updated_at.eq(Utc::now().naive_utc()),
                ))
                .returning(InvestmentDB::as_returning())
                .get_result(conn)
                .optional()
                .map_err(StorageError::from)?
                .map(Investment::from)
                .ok_or_else(|| Error::not_found("Investment"))
            })
            .await
    }

    async fn delete(&self, owner: &UserId, investment_id: &str) -> Result<usize> {
        let owner_id = owner.to_string();
        let investment_id = investment_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let deleted = diesel::delete(
                    investments
                        .filter(id.eq(investment_id))
                        .filter(user_id.eq(owner_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;
                if deleted == 0 {
                    return Err(Error::not_found("Investment"));
                }
                Ok(deleted)
            })
            .await
    }
}
