//! Login check.
//!
//! Authentication sits behind [`Authenticator`] so the credential source can
//! be swapped. [`StaticCredentials`] compares against a single configured
//! username and password.

use serde::Serialize;
use tracing::{info, warn};

use crate::config::AuthConfig;
use crate::error::{Error, Result};

/// A successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    /// The authenticated username.
    pub username: String,
}

/// Something that can verify a username and password.
pub trait Authenticator {
    /// Check the credentials and open a session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthenticationFailed`] when they do not match.
    fn authenticate(&self, username: &str, password: &str) -> Result<Session>;
}

/// Accepts exactly one username/password pair.
#[derive(Clone)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    /// Create an authenticator for one credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl From<&AuthConfig> for StaticCredentials {
    fn from(config: &AuthConfig) -> Self {
        Self::new(config.username.trim(), config.password.trim())
    }
}

// Keep the password out of debug output.
impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl Authenticator for StaticCredentials {
    fn authenticate(&self, username: &str, password: &str) -> Result<Session> {
        let username = username.trim();
        if username == self.username && password.trim() == self.password {
            info!("Login accepted for {username}");
            Ok(Session {
                username: username.to_string(),
            })
        } else {
            warn!("Login rejected for {username}");
            Err(Error::AuthenticationFailed)
        }
    }
}
