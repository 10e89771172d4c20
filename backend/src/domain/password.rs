//! Salted password digests.
//!
//! Stored form: `sha256$<salt-hex>$<digest-hex>` where the digest is
//! `SHA-256(salt || password)`.

use std::fmt;

use rand::RngCore;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

const SCHEME: &str = "sha256";
const SALT_LEN: usize = 16;
const DIGEST_LEN: usize = 32;

/// Errors raised when parsing a stored password hash.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    #[error("unsupported password hash scheme")]
    UnsupportedScheme,
    #[error("malformed password hash")]
    Malformed,
}

/// Salted SHA-256 password digest.
///
/// # Examples
/// ```
/// use itembox::domain::PasswordHash;
///
/// let hash = PasswordHash::derive("maxsecure");
/// assert!(hash.verify("maxsecure"));
/// assert!(!hash.verify("minsecure"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash {
    salt: [u8; SALT_LEN],
    digest: [u8; DIGEST_LEN],
}

fn digest(salt: &[u8], password: &str) -> [u8; DIGEST_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

impl PasswordHash {
    /// Hash `password` with a fresh random salt.
    pub fn derive(password: &str) -> Self {
        let mut salt = [0_u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        Self {
            salt,
            digest: digest(&salt, password),
        }
    }

    /// Parse the stored `sha256$salt$digest` representation.
    pub fn parse(stored: &str) -> Result<Self, PasswordHashError> {
        let mut parts = stored.split('$');
        let (Some(scheme), Some(salt), Some(digest), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(PasswordHashError::Malformed);
        };
        if scheme != SCHEME {
            return Err(PasswordHashError::UnsupportedScheme);
        }

        let mut parsed = Self {
            salt: [0; SALT_LEN],
            digest: [0; DIGEST_LEN],
        };
        hex::decode_to_slice(salt, &mut parsed.salt).map_err(|_| PasswordHashError::Malformed)?;
        hex::decode_to_slice(digest, &mut parsed.digest)
            .map_err(|_| PasswordHashError::Malformed)?;
        Ok(parsed)
    }

    /// Check `password` against the stored digest in constant time.
    pub fn verify(&self, password: &str) -> bool {
        let candidate = digest(&self.salt, password);
        candidate.ct_eq(&self.digest).into()
    }

    /// Render the stored representation.
    pub fn to_stored(&self) -> String {
        format!(
            "{SCHEME}${}${}",
            hex::encode(self.salt),
            hex::encode(self.digest)
        )
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn derive_verifies_original_password_only() {
        let hash = PasswordHash::derive("maxsecure");
        assert!(hash.verify("maxsecure"));
        assert!(!hash.verify("maxsecure "));
        assert!(!hash.verify(""));
    }

    #[rstest]
    fn derive_uses_fresh_salt() {
        let first = PasswordHash::derive("same");
        let second = PasswordHash::derive("same");
        assert_ne!(first.to_stored(), second.to_stored());
    }

    #[rstest]
    fn stored_form_parses_back() {
        let hash = PasswordHash::derive("minsecure");
        let stored = hash.to_stored();
        assert!(stored.starts_with("sha256$"));

        let parsed = PasswordHash::parse(&stored).expect("stored form parses");
        assert!(parsed.verify("minsecure"));
    }

    #[rstest]
    #[case("md5$00$00", PasswordHashError::UnsupportedScheme)]
    #[case("sha256$zz$zz", PasswordHashError::Malformed)]
    #[case("sha256$0011", PasswordHashError::Malformed)]
    #[case("sha256$00$00$00", PasswordHashError::Malformed)]
    #[case("sha256$0011$2233", PasswordHashError::Malformed)]
    fn parse_rejects_bad_input(#[case] raw: &str, #[case] expected: PasswordHashError) {
        assert_eq!(PasswordHash::parse(raw), Err(expected));
    }

    #[rstest]
    fn debug_does_not_leak_digest() {
        let hash = PasswordHash::derive("secret");
        assert_eq!(format!("{hash:?}"), "PasswordHash(<redacted>)");
    }
}
