//! The signed-in user and their API token.
//!
//! A [`Session`] is created once after sign-in and handed to whatever needs
//! to talk to the backend. Nothing reads the token from ambient storage.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    user: Option<UserProfile>,
    token: String,
}

impl Session {
    pub fn new(
        user: UserProfile,
        token: impl Into<String>,
    ) -> Self {
        Self {
            user: Some(user),
            token: token.into(),
        }
    }

    /// A session known only by its token, e.g. one supplied on the command
    /// line.
    pub fn from_token(token: impl Into<String>) -> Self {
        Self {
            user: None,
            token: token.into(),
        }
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

// Keeps the token out of logs
impl fmt::Debug for Session {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .finish()
    }
}
