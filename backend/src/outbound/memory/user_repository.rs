//! In-memory `UserRepository`.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId, Username};

/// User repository keyed by id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E: std::fmt::Display>(error: E) -> UserPersistenceError {
    UserPersistenceError::query(format!("user store lock poisoned: {error}"))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn upsert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.users.write().map_err(poisoned)?;
        let taken = users
            .values()
            .any(|other| other.username() == user.username() && other.id() != user.id());
        if taken {
            return Err(UserPersistenceError::query(format!(
                "username {} already exists",
                user.username()
            )));
        }
        users.insert(user.id().clone(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.get(id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users
            .values()
            .find(|user| user.username() == username)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PasswordHash;
    use rstest::rstest;

    fn user(name: &str) -> User {
        User::new(
            UserId::random(),
            Username::new(name).expect("valid username"),
            PasswordHash::derive("secret"),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn upsert_then_lookup_by_id_and_name() {
        let repo = InMemoryUserRepository::new();
        let john = user("john");
        repo.upsert(&john).await.expect("upsert");

        let by_id = repo.find_by_id(john.id()).await.expect("read");
        let by_name = repo.find_by_username(john.username()).await.expect("read");

        assert_eq!(by_id.as_ref(), Some(&john));
        assert_eq!(by_name.as_ref(), Some(&john));
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_usernames_are_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.upsert(&user("jane")).await.expect("first upsert");

        let err = repo.upsert(&user("jane")).await.expect_err("duplicate");

        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }
}
