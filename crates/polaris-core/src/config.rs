//! CLI configuration management.
//!
//! The configuration holds the Polaris server URL, an optional realm and an
//! optional default catalog prefix for Iceberg REST calls.
//!
//! Configuration is stored at `~/.polaris-cli/config.json`, next to the
//! credentials file managed by [`crate::auth::Credentials`].

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Directory under the user's home that holds config and credentials
const CONFIG_DIR_NAME: &str = ".polaris-cli";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Server used when nothing has been configured yet
pub const DEFAULT_HOST: &str = "http://localhost:8181";

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_prefix: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            realm: None,
            catalog_prefix: None,
        }
    }
}

impl Config {
    /// Load the config from the per-user directory.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_dir()?)
    }

    /// Save the config to the per-user directory.
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_dir()?)
    }

    /// Load the config stored in `dir`, falling back to the default when
    /// no file exists yet.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        let Some(contents) = read_optional(&path)? else {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        };
        let config: Config = serde_json::from_str(&contents).map_err(|e| {
            Error::Config(format!("failed to parse config file '{}': {}", path.display(), e))
        })?;
        Ok(config.normalized())
    }

    pub fn save_to(&self, dir: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(&self.clone().normalized())
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        write_private(dir, CONFIG_FILE, &contents)
    }

    /// Realm to send with every request, if one is set
    pub fn realm(&self) -> Option<&str> {
        self.realm.as_deref().filter(|r| !r.is_empty())
    }

    pub fn catalog_prefix(&self) -> Option<&str> {
        self.catalog_prefix.as_deref().filter(|p| !p.is_empty())
    }

    // Empty strings mean "unset" in files written by older clients.
    fn normalized(mut self) -> Self {
        self.realm = self.realm.filter(|r| !r.is_empty());
        self.catalog_prefix = self.catalog_prefix.filter(|p| !p.is_empty());
        self
    }
}

/// Fixed per-user directory holding `config.json` and `credentials.json`.
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| Error::Config("could not find home directory".to_string()))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Read a file, mapping "not found" to `None`.
pub(crate) fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::Config(format!(
            "failed to read '{}': {}",
            path.display(),
            e
        ))),
    }
}

/// Write `contents` to `dir/file_name`, creating the directory with
/// owner-only permissions and the file as owner read/write only.
pub(crate) fn write_private(dir: &Path, file_name: &str, contents: &str) -> Result<()> {
    ensure_private_dir(dir)?;
    let path = dir.join(file_name);

    let write_error =
        |e: std::io::Error| Error::Config(format!("failed to write '{}': {}", path.display(), e));
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(&path).map_err(write_error)?;
    file.write_all(contents.as_bytes()).map_err(write_error)?;

    // The mode above only applies to newly created files.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).map_err(|e| {
            Error::Config(format!(
                "failed to set permissions on '{}': {}",
                path.display(),
                e
            ))
        })?;
    }

    debug!(path = %path.display(), "Wrote file");
    Ok(())
}

fn ensure_private_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder.create(dir).map_err(|e| {
        Error::Config(format!(
            "failed to create config directory '{}': {}",
            dir.display(),
            e
        ))
    })
}
