use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{config_dir, read_optional, write_private};
use crate::error::{Error, Result};

/// Credentials file name, stored next to the config file
const CREDENTIALS_FILE: &str = "credentials.json";

/// Token record persisted after a successful login or refresh.
///
/// The client secret is kept in plaintext so `auth status` can report the
/// identity in use; the file is written owner read/write only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    /// Seconds, as reported by the token endpoint. Informational only.
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
}

impl Credentials {
    pub fn load() -> Result<Self> {
        Self::load_from(&config_dir()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&config_dir()?)
    }

    pub fn clear() -> Result<()> {
        Self::clear_in(&config_dir()?)
    }

    /// Load credentials from `dir`. A missing file means the user never
    /// logged in (or logged out).
    pub fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(CREDENTIALS_FILE);
        let contents = read_optional(&path)?.ok_or(Error::NotAuthenticated)?;
        serde_json::from_str(&contents).map_err(|e| {
            Error::Config(format!(
                "failed to parse credentials file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    pub fn save_to(&self, dir: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize credentials: {}", e)))?;
        write_private(dir, CREDENTIALS_FILE, &contents)
    }

    /// Delete the credentials file. Deleting a missing file succeeds.
    pub fn clear_in(dir: &Path) -> Result<()> {
        let path = dir.join(CREDENTIALS_FILE);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "Removed credentials");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Config(format!(
                "failed to remove credentials file '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    /// The bearer token, or `NotAuthenticated` when the record holds none.
    pub fn access_token(&self) -> Result<&str> {
        if self.access_token.is_empty() {
            return Err(Error::NotAuthenticated);
        }
        Ok(&self.access_token)
    }

    pub fn is_authenticated(&self) -> bool {
        !self.access_token.is_empty()
    }
}
