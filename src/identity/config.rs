//! Persisted identity settings.
//!
//! A TOML file with top-level `name` and `email` keys. Edits go through
//! `toml_edit`, so other keys and comments in the file survive a save.

use std::path::{Path, PathBuf};

use toml_edit::DocumentMut;
use tracing::debug;

use crate::document::write_atomic;
use crate::error::ConfigError;

use super::{validate_email, validate_name};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV_VAR: &str = "DEBCL_CONFIG";

const NAME_KEY: &str = "name";
const EMAIL_KEY: &str = "email";

/// Default location: `$DEBCL_CONFIG`, else `<config dir>/debcl/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    dirs::config_dir()
        .map(|dir| dir.join("debcl").join("config.toml"))
        .ok_or(ConfigError::NoConfigDir)
}

/// The identity config file, loaded and editable in memory.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    path: PathBuf,
    doc: DocumentMut,
    modified: bool,
}

impl IdentityConfig {
    /// Load the config at `path`. A missing file is an empty config.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file yet");
                String::new()
            }
            Err(source) => {
                return Err(ConfigError::ReadFailed {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::from_toml(path.to_path_buf(), &content)
    }

    pub fn from_toml(path: PathBuf, content: &str) -> Result<Self, ConfigError> {
        let doc = content
            .parse::<DocumentMut>()
            .map_err(|e| ConfigError::ParseFailed {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            path,
            doc,
            modified: false,
        })
    }

    #[cfg(test)]
    pub(crate) fn in_memory(content: &str) -> Self {
        Self::from_toml(PathBuf::from("config.toml"), content).expect("valid test TOML")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The configured name, if set to a valid value.
    pub fn name(&self) -> Option<&str> {
        self.get(NAME_KEY).filter(|n| validate_name(n).is_ok())
    }

    /// The configured email, if set to a valid value.
    pub fn email(&self) -> Option<&str> {
        self.get(EMAIL_KEY).filter(|e| validate_email(e).is_ok())
    }

    /// Store a name. Surrounding whitespace is dropped.
    pub fn set_name(&mut self, name: &str) -> Result<(), ConfigError> {
        let name = name.trim();
        validate_name(name).map_err(|reason| ConfigError::InvalidValue {
            field: NAME_KEY,
            reason: reason.to_string(),
        })?;
        self.doc[NAME_KEY] = toml_edit::value(name);
        self.modified = true;
        Ok(())
    }

    pub fn set_email(&mut self, email: &str) -> Result<(), ConfigError> {
        let email = email.trim();
        validate_email(email).map_err(|reason| ConfigError::InvalidValue {
            field: EMAIL_KEY,
            reason: reason.to_string(),
        })?;
        self.doc[EMAIL_KEY] = toml_edit::value(email);
        self.modified = true;
        Ok(())
    }

    /// Whether a value was set since loading.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Write the file, creating its directory if needed.
    pub fn save(&self) -> Result<(), ConfigError> {
        let write_failed = |source| ConfigError::WriteFailed {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(write_failed)?;
        write_atomic(&self.path, self.doc.to_string().as_bytes()).map_err(write_failed)?;

        debug!(path = %self.path.display(), "config saved");
        Ok(())
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.doc.get(key).and_then(|item| item.as_str())
    }
}
