//! Login credentials accepted by the password login flow.
//!
//! Handlers build [`LoginCredentials`] from raw form or JSON values before
//! calling the login port, so blank input never reaches a repository.

use std::fmt;

use serde_json::json;
use zeroize::Zeroizing;

use super::Error;

/// Reason a login payload was rejected before authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl LoginValidationError {
    /// Name of the offending request field.
    pub fn field(self) -> &'static str {
        match self {
            Self::EmptyUsername => "username",
            Self::EmptyPassword => "password",
        }
    }
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} must not be empty", self.field())
    }
}

impl std::error::Error for LoginValidationError {}

impl From<LoginValidationError> for Error {
    fn from(value: LoginValidationError) -> Self {
        Error::invalid_request(value.to_string()).with_details(json!({
            "field": value.field(),
            "code": "empty_field",
        }))
    }
}

/// Username and password pair submitted to `/login`.
///
/// The username is trimmed. The password is kept byte for byte and wiped
/// from memory on drop.
///
/// # Examples
/// ```
/// use itembox::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" john ", "maxsecure").unwrap();
/// assert_eq!(creds.username(), "john");
/// assert_eq!(creds.password(), "maxsecure");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw username and password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Trimmed username.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password exactly as submitted.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

// Keep the password out of logs.
impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
