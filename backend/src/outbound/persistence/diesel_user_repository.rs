//! PostgreSQL-backed [`UserRepository`] implementation using Diesel.

use async_trait::async_trait;
use diesel_async::RunQueryDsl;
use tracing::debug;

use super::models::NewUserRow;
use super::pool::{DbPool, PoolError};
use super::schema::users;
use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::user::NewUser;

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Build { message } | PoolError::Checkout { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel insert failed");
        }
        other => debug!(error = %other, "diesel insert failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserPersistenceError::query("duplicate user identifier")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        _ => UserPersistenceError::query("database error"),
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert_batch(&self, batch: &[NewUser]) -> Result<(), UserPersistenceError> {
        if batch.is_empty() {
            return Ok(());
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<NewUserRow<'_>> = batch.iter().map(NewUserRow::from).collect();
        diesel::insert_into(users::table)
            .values(&rows)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
