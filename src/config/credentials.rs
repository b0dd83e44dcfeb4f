//! Dashboard admin credentials

use serde::{Deserialize, Serialize};

/// Admin login handed to the dashboard container on `up`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    pub user: String,
    pub password: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            user: "admin".to_string(),
            password: "admin".to_string(),
        }
    }
}

// Keep the password out of debug logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}
