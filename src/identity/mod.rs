//! Author identity: validation, persisted configuration, and resolution.

pub mod config;
pub mod prompt;

use std::env;
use std::sync::LazyLock;

use regex_lite::Regex;
use tracing::{debug, warn};

use crate::error::{ConfigError, EntryError};

pub use config::IdentityConfig;
pub use prompt::{DialoguerPrompter, IdentityPrompter};

/// Debian convention for the maintainer's full name.
pub const NAME_ENV_VAR: &str = "DEBFULLNAME";

/// Debian convention for the maintainer's email, optionally `Name <addr>`.
pub const EMAIL_ENV_VAR: &str = "DEBEMAIL";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

static NAMED_EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(.*?)\s*<([^<>]*)>\s*$").expect("Invalid DEBEMAIL regex"));

/// The author written into entry trailers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Check a name: it must contain something other than whitespace.
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        Err("Name cannot be empty or contain only spaces")
    } else {
        Ok(())
    }
}

/// Check an email against the simple `local@domain.tld` shape.
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err("Please enter a valid email address")
    }
}

/// Where a resolved identity field came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource {
    Config,
    Environment,
    Prompt,
}

/// An identity plus the origin of each field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    pub identity: Identity,
    pub name_source: IdentitySource,
    pub email_source: IdentitySource,
}

impl ResolvedIdentity {
    /// Whether any field was entered interactively and should be persisted.
    pub fn was_prompted(&self) -> bool {
        self.name_source == IdentitySource::Prompt || self.email_source == IdentitySource::Prompt
    }
}

/// Identity fields taken from `DEBFULLNAME` and `DEBEMAIL`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvIdentity {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl EnvIdentity {
    /// Read the Debian environment variables. `DEBEMAIL` of the form
    /// `Full Name <addr>` supplies a name when `DEBFULLNAME` is unset.
    pub fn from_env() -> Self {
        let full_name = env::var(NAME_ENV_VAR).ok();
        let raw_email = env::var(EMAIL_ENV_VAR).ok();
        Self::from_values(full_name.as_deref(), raw_email.as_deref())
    }

    pub fn from_values(full_name: Option<&str>, raw_email: Option<&str>) -> Self {
        let (embedded_name, email) = match raw_email {
            Some(raw) => match NAMED_EMAIL_RE.captures(raw) {
                Some(caps) => (Some(caps[1].to_string()), Some(caps[2].trim().to_string())),
                None => (None, Some(raw.trim().to_string())),
            },
            None => (None, None),
        };

        let name = full_name
            .map(|n| n.trim().to_string())
            .filter(|n| validate_name(n).is_ok())
            .or(embedded_name.filter(|n| validate_name(n).is_ok()));
        let email = email.filter(|e| validate_email(e).is_ok());

        Self { name, email }
    }
}

/// Resolve the author identity.
///
/// Each field is taken from the config file, then the environment, then the
/// prompter when one is given. Both fields are always attempted. A prompted
/// value that passes validation is stored in `config` right away, so it is
/// there to save even when the other field ends up missing.
pub fn resolve_identity(
    config: &mut IdentityConfig,
    env: &EnvIdentity,
    prompter: Option<&dyn IdentityPrompter>,
) -> Result<ResolvedIdentity, EntryError> {
    let name = resolve_field(
        config.name().map(str::to_string),
        env.name.as_deref(),
        || prompter.and_then(|p| p.prompt_name()),
        |value| config.set_name(value),
    );
    let email = resolve_field(
        config.email().map(str::to_string),
        env.email.as_deref(),
        || prompter.and_then(|p| p.prompt_email()),
        |value| config.set_email(value),
    );

    let (Some((name, name_source)), Some((email, email_source))) = (name, email) else {
        return Err(EntryError::MissingIdentity);
    };

    debug!(?name_source, ?email_source, "identity resolved");
    Ok(ResolvedIdentity {
        identity: Identity { name, email },
        name_source,
        email_source,
    })
}

fn resolve_field(
    configured: Option<String>,
    from_env: Option<&str>,
    prompt: impl FnOnce() -> Option<String>,
    store: impl FnOnce(&str) -> Result<(), ConfigError>,
) -> Option<(String, IdentitySource)> {
    if let Some(value) = configured {
        return Some((value, IdentitySource::Config));
    }
    if let Some(value) = from_env {
        return Some((value.to_string(), IdentitySource::Environment));
    }

    let value = prompt()?.trim().to_string();
    match store(&value) {
        Ok(()) => Some((value, IdentitySource::Prompt)),
        Err(e) => {
            warn!(error = %e, "discarding prompted value");
            None
        }
    }
}
