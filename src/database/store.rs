use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use log::debug;
use thiserror::Error;
use uuid::Uuid;

use super::db::DbPool;
use crate::models::usage::{NewUsageLog, UsageLog};
use crate::models::users::{NewUser, User};
use crate::schema::{usage_logs, users};

#[derive(Error, Debug)]
pub enum StoreError {
    /// A unique field (`"Username"` or `"Email"`) is already taken.
    #[error("{0} already registered")]
    Conflict(&'static str),

    #[error("Database connection error: {0}")]
    Pool(String),

    #[error("Database query error: {0}")]
    Database(#[from] DieselError),
}

/// Persistence for accounts and their usage history.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Inserts a new account. Fails with [`StoreError::Conflict`] when the
    /// username or email is taken, even if an earlier lookup said otherwise.
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;

    async fn record_usage(&self, entry: NewUsageLog) -> Result<(), StoreError>;

    /// Usage entries for `user_id`, newest first.
    async fn usage_for_user(&self, user_id: i32) -> Result<Vec<UsageLog>, StoreError>;

    /// Returns `false` when no entry `session_id` belongs to `user_id`.
    async fn set_archived(&self, user_id: i32, session_id: Uuid, archived: bool) -> Result<bool, StoreError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: DbPool,
}

impl PgUserStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn conflict_or_database(e: DieselError) -> StoreError {
    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &e {
        let on_email = info.constraint_name().is_some_and(|name| name.contains("email"));
        return StoreError::Conflict(if on_email { "Email" } else { "Username" });
    }
    StoreError::Database(e)
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let mut conn = self.pool.get().await.map_err(|e| StoreError::Pool(e.to_string()))?;

        Ok(users::table
            .filter(users::username.eq(username))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let mut conn = self.pool.get().await.map_err(|e| StoreError::Pool(e.to_string()))?;

        Ok(users::table
            .filter(users::email.eq(email))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()?)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut conn = self.pool.get().await.map_err(|e| StoreError::Pool(e.to_string()))?;

        let created = diesel::insert_into(users::table)
            .values(&user)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(conflict_or_database)?;

        debug!("Created user {} ({})", created.id, created.username);
        Ok(created)
    }

    async fn record_usage(&self, entry: NewUsageLog) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await.map_err(|e| StoreError::Pool(e.to_string()))?;

        diesel::insert_into(usage_logs::table)
            .values(&entry)
            .execute(&mut conn)
            .await?;
        Ok(())
    }

    async fn usage_for_user(&self, user_id: i32) -> Result<Vec<UsageLog>, StoreError> {
        let mut conn = self.pool.get().await.map_err(|e| StoreError::Pool(e.to_string()))?;

        Ok(usage_logs::table
            .filter(usage_logs::user_id.eq(user_id))
            .order(usage_logs::timestamp.desc())
            .select(UsageLog::as_select())
            .load(&mut conn)
            .await?)
    }

    async fn set_archived(&self, user_id: i32, session_id: Uuid, archived: bool) -> Result<bool, StoreError> {
        let mut conn = self.pool.get().await.map_err(|e| StoreError::Pool(e.to_string()))?;

        let updated = diesel::update(
            usage_logs::table
                .filter(usage_logs::id.eq(session_id))
                .filter(usage_logs::user_id.eq(user_id)),
        )
        .set(usage_logs::is_archived.eq(archived))
        .execute(&mut conn)
        .await?;

        debug!("Set archived={archived} on session {session_id} for user {user_id}: {updated} rows");
        Ok(updated > 0)
    }
}
