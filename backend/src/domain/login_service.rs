//! Password login backed by the user repository.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{LoginService, UserPersistenceError, UserRepository};
use crate::domain::{Error, LoginCredentials, PasswordHash, UserId, Username};

const INVALID_CREDENTIALS: &str = "invalid credentials";
const DECOY_PASSWORD: &str = "itembox-decoy-password";

/// [`LoginService`] that checks credentials against stored password hashes.
///
/// Unknown usernames are checked against a decoy hash so a miss costs the
/// same digest as a wrong password.
#[derive(Clone)]
pub struct PasswordLoginService<U> {
    users: Arc<U>,
    decoy: PasswordHash,
}

impl<U> PasswordLoginService<U> {
    /// Build the service over a user repository.
    pub fn new(users: Arc<U>) -> Self {
        Self {
            users,
            decoy: PasswordHash::derive(DECOY_PASSWORD),
        }
    }

    fn reject_unknown(&self, password: &str) -> Error {
        let _ = self.decoy.verify(password);
        Error::unauthorized(INVALID_CREDENTIALS)
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

#[async_trait]
impl<U> LoginService for PasswordLoginService<U>
where
    U: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        // A name that could never be stored cannot match a user.
        let Ok(username) = Username::new(credentials.username()) else {
            return Err(self.reject_unknown(credentials.password()));
        };

        let user = self
            .users
            .find_by_username(&username)
            .await
            .map_err(map_user_error)?;

        let Some(user) = user else {
            debug!(username = %username, "login rejected: unknown user");
            return Err(self.reject_unknown(credentials.password()));
        };
        if user.password_hash().verify(credentials.password()) {
            Ok(user.id().clone())
        } else {
            debug!(username = %username, "login rejected");
            Err(Error::unauthorized(INVALID_CREDENTIALS))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockUserRepository;
    use crate::domain::{ErrorCode, PasswordHash, User};
    use rstest::rstest;

    fn john() -> User {
        User::new(
            UserId::random(),
            Username::new("john").expect("valid username"),
            PasswordHash::derive("maxsecure"),
        )
    }

    fn service_with(user: Option<User>) -> PasswordLoginService<MockUserRepository> {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(move |_| Ok(user.clone()));
        PasswordLoginService::new(Arc::new(repo))
    }

    fn creds(username: &str, password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts(username, password).expect("credentials shape")
    }

    #[rstest]
    #[tokio::test]
    async fn correct_password_returns_user_id() {
        let user = john();
        let expected = user.id().clone();
        let service = service_with(Some(user));

        let id = service
            .authenticate(&creds("john", "maxsecure"))
            .await
            .expect("login succeeds");

        assert_eq!(id, expected);
    }

    #[rstest]
    #[case(Some(john()), "john", "minsecure")]
    #[case(None, "nobody", "maxsecure")]
    #[case(None, "x", "maxsecure")]
    #[tokio::test]
    async fn bad_credentials_are_unauthorized(
        #[case] user: Option<User>,
        #[case] username: &str,
        #[case] password: &str,
    ) {
        let service = service_with(user);

        let err = service
            .authenticate(&creds(username, password))
            .await
            .expect_err("login fails");

        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), INVALID_CREDENTIALS);
    }

    #[rstest]
    #[case::unknown("nobody")]
    #[case::unstorable("x")]
    #[tokio::test]
    async fn decoy_password_never_logs_in_a_missing_user(#[case] username: &str) {
        let service = service_with(None);

        let err = service
            .authenticate(&creds(username, DECOY_PASSWORD))
            .await
            .expect_err("miss stays a miss");

        assert!(service.decoy.verify(DECOY_PASSWORD));
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), INVALID_CREDENTIALS);
    }

    #[rstest]
    #[tokio::test]
    async fn repository_outage_is_service_unavailable() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .return_once(|_| Err(UserPersistenceError::connection("refused")));
        let service = PasswordLoginService::new(Arc::new(repo));

        let err = service
            .authenticate(&creds("john", "maxsecure"))
            .await
            .expect_err("outage surfaces");

        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
