use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use fintrack_core::goals::{Goal, GoalRepositoryTrait, GoalStatus};
use fintrack_core::{Error, Result, UserId};

use super::model::GoalDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::goals;
use crate::schema::goals::dsl::*;

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }
}

fn find_owned(conn: &mut SqliteConnection, owner_id: &str, goal_id: &str) -> Result<Goal> {
    goals
        .filter(id.eq(goal_id))
        .filter(user_id.eq(owner_id))
        .select(GoalDB::as_select())
        .first::<GoalDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .map(Goal::from)
        .ok_or_else(|| Error::not_found("Goal"))
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn list(&self, owner: &UserId) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = goals
            .filter(user_id.eq(owner.as_str()))
            .order((created_at.desc(), id.asc()))
            .select(GoalDB::as_select())
            .load::<GoalDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Goal::from).collect())
    }

    fn get_by_id(&self, owner: &UserId, goal_id: &str) -> Result<Goal> {
        let mut conn = get_connection(&self.pool)?;
        find_owned(&mut conn, owner.as_str(), goal_id)
    }

    fn list_active(&self, owner: &UserId, limit: i64) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = goals
            .filter(user_id.eq(owner.as_str()))
            .filter(status.ne(GoalStatus::Completed.as_str()))
            .order((created_at.desc(), id.asc()))
            .limit(limit)
            .select(GoalDB::as_select())
            .load::<GoalDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Goal::from).collect())
    }

    async fn create(&self, owner: &UserId, goal: Goal) -> Result<Goal> {
        let mut row = GoalDB::from(goal);
        row.user_id = owner.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let inserted = diesel::insert_into(goals::table)
                    .values(&row)
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Goal::from(inserted))
            })
            .await
    }

    async fn update(&self, owner: &UserId, goal: Goal) -> Result<Goal> {
        let mut row = GoalDB::from(goal);
        row.user_id = owner.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                diesel::update(
                    goals
                        .filter(id.eq(row.id.clone()))
                        .filter(user_id.eq(row.user_id.clone())),
                )
                .set(&row)
                .returning(GoalDB::as_returning())
                .get_result(conn)
                .optional()
                .map_err(StorageError::from)?
                .map(Goal::from)
                .ok_or_else(|| Error::not_found("Goal"))
            })
            .await
    }

    async fn update_progress(
        &self,
        owner: &UserId,
        goal_id: &str,
        new_amount: f64,
    ) -> Result<Goal> {
        let owner_id = owner.to_string();
        let goal_id = goal_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let mut goal = find_owned(conn, &owner_id, &goal_id)?;
                goal.current_amount = new_amount;
                goal.refresh_progress();
                goal.updated_at = Utc::now();

                diesel::update(goals.filter(id.eq(&goal.id)).filter(user_id.eq(&owner_id)))
                    .set((
                        current_amount.eq(goal.current_amount),
                        status.eq(goal.status.as_str()),
                        updated_at.eq(goal.updated_at.naive_utc()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(goal)
            })
            .await
    }

    async fn delete(&self, owner: &UserId, goal_id: &str) -> Result<usize> {
        let owner_id = owner.to_string();
        let goal_id = goal_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let deleted = diesel::delete(goals.filter(id.eq(goal_id)).filter(user_id.eq(owner_id)))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if deleted == 0 {
                    return Err(Error::not_found("Goal"));
                }
                Ok(deleted)
            })
            .await
    }
}
