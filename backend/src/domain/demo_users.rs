//! Demo account provisioning.
//!
//! Seeds the two well-known demo accounts so a fresh deployment can be
//! exercised without a registration flow.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{PasswordHash, User, UserId, UserValidationError, Username};

/// Built-in demo accounts as `(username, password)` pairs.
pub const DEMO_USERS: [(&str, &str); 2] = [("john", "maxsecure"), ("jane", "minsecure")];

/// Errors raised while seeding demo users.
#[derive(Debug, Error)]
pub enum DemoUserSeedingError {
    /// A built-in username failed validation.
    #[error("demo username failed validation: {0}")]
    InvalidUsername(#[from] UserValidationError),
    /// Persistence adapter failed while seeding.
    #[error("demo user persistence error: {0}")]
    Persistence(#[from] UserPersistenceError),
}

/// Outcome of a seeding run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemoUserSeedOutcome {
    /// Usernames inserted by this run.
    pub created: Vec<String>,
    /// Usernames that already existed and were left untouched.
    pub existing: Vec<String>,
}

/// Inserts the demo accounts that do not exist yet.
#[derive(Clone)]
pub struct DemoUserSeeder<U> {
    users: Arc<U>,
}

impl<U> DemoUserSeeder<U> {
    /// Seed into `users`.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

impl<U> DemoUserSeeder<U>
where
    U: UserRepository,
{
    /// Seed the demo accounts. Existing accounts keep their id and password.
    ///
    /// # Errors
    ///
    /// Returns [`DemoUserSeedingError`] if the repository fails.
    pub async fn seed(&self) -> Result<DemoUserSeedOutcome, DemoUserSeedingError> {
        let mut outcome = DemoUserSeedOutcome::default();
        for (name, password) in DEMO_USERS {
            let username = Username::new(name)?;
            if self.users.find_by_username(&username).await?.is_some() {
                outcome.existing.push(name.to_owned());
                continue;
            }

            let user = User::new(UserId::random(), username, PasswordHash::derive(password));
            self.users.upsert(&user).await?;
            info!(user_id = %user.id(), username = name, "seeded demo user");
            outcome.created.push(name.to_owned());
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockUserRepository;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn seeds_missing_accounts_with_verifiable_passwords() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().times(2).returning(|_| Ok(None));
        repo.expect_upsert()
            .withf(|user| match user.username().as_str() {
                "john" => user.password_hash().verify("maxsecure"),
                "jane" => user.password_hash().verify("minsecure"),
                _ => false,
            })
            .times(2)
            .returning(|_| Ok(()));

        let outcome = DemoUserSeeder::new(Arc::new(repo))
            .seed()
            .await
            .expect("seeding succeeds");

        assert_eq!(outcome.created, vec!["john", "jane"]);
        assert!(outcome.existing.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn leaves_existing_accounts_untouched() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().times(2).returning(|username| {
            Ok(Some(User::new(
                UserId::random(),
                username.clone(),
                PasswordHash::derive("changed"),
            )))
        });
        repo.expect_upsert().never();

        let outcome = DemoUserSeeder::new(Arc::new(repo))
            .seed()
            .await
            .expect("seeding succeeds");

        assert!(outcome.created.is_empty());
        assert_eq!(outcome.existing, vec!["john", "jane"]);
    }

    #[rstest]
    #[tokio::test]
    async fn persistence_failures_bubble_up() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .return_once(|_| Err(UserPersistenceError::query("boom")));

        let err = DemoUserSeeder::new(Arc::new(repo))
            .seed()
            .await
            .expect_err("failure surfaces");

        assert!(matches!(err, DemoUserSeedingError::Persistence(_)));
    }
}
