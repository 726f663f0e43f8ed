use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;

use fintrack_core::users::{FinancialsUpdate, NewUser, User, UserId, UserRepositoryTrait};
use fintrack_core::{Error, Result};

use super::model::UserDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::users;
use crate::schema::users::dsl::*;

pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        UserRepository { pool, writer }
    }
}

fn find_user(conn: &mut SqliteConnection, user_id: &str) -> Result<User> {
    users
        .find(user_id)
        .select(UserDB::as_select())
        .first::<UserDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .map(User::from)
        .ok_or_else(|| Error::not_found("User"))
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn get_by_id(&self, user_id: &UserId) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        find_user(&mut conn, user_id.as_str())
    }

    async fn upsert_by_email(&self, new_id: String, new_user: NewUser) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let now = Utc::now().naive_utc();
                let existing = users
                    .filter(email.eq(&new_user.email))
                    .select(UserDB::as_select())
                    .first::<UserDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?;

                let row = match existing {
                    Some(existing) => {
                        debug!("Refreshing existing user {}", existing.id);
                        diesel::update(users.find(&existing.id))
                            .set((name.eq(new_user.name), updated_at.eq(now)))
                            .returning(UserDB::as_returning())
                            .get_result(conn)
                            .map_err(StorageError::from)?
                    }
                    None => diesel::insert_into(users::table)
                        .values(UserDB {
                            id: new_id,
                            email: new_user.email,
                            name: new_user.name,
                            monthly_income: None,
                            monthly_expenses: None,
                            monthly_savings: None,
                            created_at: now,
                            updated_at: now,
                        })
                        .returning(UserDB::as_returning())
                        .get_result(conn)
                        .map_err(StorageError::from)?,
                };
                Ok(User::from(row))
            })
            .await
    }

    async fn update_financials(&self, user_id: &UserId, update: FinancialsUpdate) -> Result<User> {
        let target_id = user_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let mut user = find_user(conn, &target_id)?;
                update.apply_to(&mut user);

                let row = diesel::update(users.find(&target_id))
                    .set((
                        monthly_income.eq(user.monthly_income),
                        monthly_expenses.eq(user.monthly_expenses),
                        monthly_savings.eq(user.monthly_savings),
                        updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(User::from(row))
            })
            .await
    }
}
