//! PostgreSQL-backed `UserRepository` using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{PasswordHash, User, UserId, Username};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let username =
        Username::new(&row.username).map_err(|err| UserPersistenceError::query(err.to_string()))?;
    let password_hash = PasswordHash::parse(&row.password_hash)
        .map_err(|err| UserPersistenceError::query(err.to_string()))?;
    Ok(User::new(UserId::from(row.id), username, password_hash))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn upsert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let stored_hash = user.password_hash().to_stored();
        let row = NewUserRow {
            id: *user.id().as_uuid(),
            username: user.username().as_str(),
            password_hash: stored_hash.as_str(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .on_conflict(users::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    fn stored_rows_round_trip_into_users() {
        let hash = PasswordHash::derive("maxsecure");
        let row = UserRow {
            id: Uuid::new_v4(),
            username: "john".to_owned(),
            password_hash: hash.to_stored(),
        };

        let user = row_to_user(row).expect("row converts");

        assert_eq!(user.username().as_str(), "john");
        assert!(user.password_hash().verify("maxsecure"));
    }

    #[rstest]
    fn malformed_hash_is_a_query_error() {
        let row = UserRow {
            id: Uuid::new_v4(),
            username: "john".to_owned(),
            password_hash: "plaintext".to_owned(),
        };

        let err = row_to_user(row).expect_err("malformed hash rejected");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }
}
