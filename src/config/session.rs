//! Login session persisted between CLI invocations
//!
//! Holds only the bearer token issued at login; the owner is recovered by
//! resolving the token on every command.

use serde::{Deserialize, Serialize};

use super::paths::SpendbookPaths;
use crate::error::{SpendbookError, SpendbookResult};
use crate::storage::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Session {
    pub fn load(paths: &SpendbookPaths) -> SpendbookResult<Self> {
        read_json(paths.session_file())
    }

    pub fn store(paths: &SpendbookPaths, token: impl Into<String>) -> SpendbookResult<()> {
        let session = Session {
            token: Some(token.into()),
        };
        write_json_atomic(paths.session_file(), &session)
    }

    /// Remove the session file; returns whether one existed
    pub fn clear(paths: &SpendbookPaths) -> SpendbookResult<bool> {
        let path = paths.session_file();
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&path)
            .map_err(|e| SpendbookError::Io(format!("Failed to remove session: {}", e)))?;
        Ok(true)
    }

    /// The stored token, or Unauthorized when nobody is logged in
    pub fn require_token(&self) -> SpendbookResult<&str> {
        self.token
            .as_deref()
            .ok_or_else(|| SpendbookError::Unauthorized("Not logged in".into()))
    }
}
