//! Session cookie settings read from the environment.
//!
//! | Variable                  | Default                         |
//! |---------------------------|---------------------------------|
//! | `SESSION_KEY_FILE`        | `/var/run/secrets/session_key`  |
//! | `SESSION_COOKIE_SECURE`   | `1`                             |
//! | `SESSION_ALLOW_EPHEMERAL` | `0`                             |
//!
//! Debug builds fall back to a generated key and warn on bad toggles.
//! Release builds treat both as fatal.

use std::path::PathBuf;

use actix_web::cookie::Key;
use mockable::Env;
use sha2::{Digest, Sha256};
use tracing::warn;
use zeroize::Zeroize;

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
/// Minimum key file length accepted in release builds.
pub const SESSION_KEY_MIN_LEN: usize = 64;
/// Shortest input `Key::derive_from` accepts.
const DERIVE_MIN_LEN: usize = 32;
const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no";

/// Whether configuration problems are tolerated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Warn and fall back.
    Debug,
    /// Fail fast.
    Release,
}

impl BuildMode {
    /// Mode matching the current build profile.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Resolved cookie session settings.
pub struct SessionSettings {
    /// Cookie signing and encryption key.
    pub key: Key,
    /// Mark the cookie `Secure`.
    pub cookie_secure: bool,
}

impl SessionSettings {
    /// Short hex digest of the signing key, safe to log.
    #[must_use]
    pub fn key_fingerprint(&self) -> String {
        let digest = Sha256::digest(self.key.signing());
        hex::encode(&digest[..8])
    }
}

/// Why session settings could not be resolved.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// A boolean toggle had an unrecognised value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidToggle {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// The key file could not be read.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The key file holds too few bytes.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// An ephemeral key was requested in a release build.
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Resolve session settings for `mode`.
///
/// # Errors
///
/// Release builds fail on an unreadable or short key file, an invalid
/// toggle, or `SESSION_ALLOW_EPHEMERAL=1`.
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = toggle(env, mode, COOKIE_SECURE_ENV, true)?;
    let allow_ephemeral = toggle(env, mode, ALLOW_EPHEMERAL_ENV, false)?;
    if allow_ephemeral && mode == BuildMode::Release {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key = session_key(env, mode, allow_ephemeral)?;
    Ok(SessionSettings { key, cookie_secure })
}

fn toggle<E: Env>(
    env: &E,
    mode: BuildMode,
    name: &'static str,
    default: bool,
) -> Result<bool, SessionConfigError> {
    let Some(value) = env.string(name) else {
        return Ok(default);
    };
    match parse_bool(&value) {
        Some(flag) => Ok(flag),
        None if mode == BuildMode::Debug => {
            warn!(variable = name, value = %value, default, "ignoring invalid toggle");
            Ok(default)
        }
        None => Err(SessionConfigError::InvalidToggle {
            name,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}

fn session_key<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| SESSION_KEY_DEFAULT_PATH.to_owned()),
    );
    let ephemeral_ok = mode == BuildMode::Debug || allow_ephemeral;

    let mut bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(source) if ephemeral_ok => {
            warn!(path = %path.display(), error = %source, "using ephemeral session key");
            return Ok(Key::generate());
        }
        Err(source) => return Err(SessionConfigError::KeyRead { path, source }),
    };

    let length = bytes.len();
    let min_len = match mode {
        BuildMode::Release => SESSION_KEY_MIN_LEN,
        BuildMode::Debug => DERIVE_MIN_LEN,
    };
    if length < min_len {
        bytes.zeroize();
        if mode == BuildMode::Debug {
            warn!(path = %path.display(), length, "session key too short; using ephemeral key");
            return Ok(Key::generate());
        }
        return Err(SessionConfigError::KeyTooShort {
            path,
            length,
            min_len,
        });
    }

    let key = Key::derive_from(&bytes);
    bytes.zeroize();
    Ok(key)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
