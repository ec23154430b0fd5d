//! Field validation shared by the interactive form and headless imports.
//!
//! Every validator takes raw user input, trims it, and returns the normalized
//! value or a [`ValidationError`] whose message is fit to show next to a
//! re-prompt.

use crate::profile::{Auth, HostProfile};
use crate::store::Store;
use std::path::PathBuf;
use thiserror::Error;

/// A rejected field value. Never persisted, only reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a {0}.")]
    EmptyField(&'static str),

    #[error("Please enter a valid port number (1-65535), got '{0}'.")]
    InvalidPort(String),

    #[error("Host name '{0}' already exists. Please choose a different name.")]
    DuplicateName(String),

    #[error("The specified key file does not exist: {}", .0.display())]
    KeyFileMissing(PathBuf),

    #[error("A host uses either a key file or a password, not both.")]
    ConflictingAuth,
}

fn required(input: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

/// Validate a profile name against every other entry in `store`.
///
/// `current` is the name being edited; keeping it unchanged is not a
/// duplicate.
pub fn validate_name(
    input: &str,
    store: &Store,
    current: Option<&str>,
) -> Result<String, ValidationError> {
    let name = required(input, "host name")?;
    if current != Some(name.as_str()) && store.contains(&name) {
        return Err(ValidationError::DuplicateName(name));
    }
    Ok(name)
}

pub fn validate_host(input: &str) -> Result<String, ValidationError> {
    required(input, "host address")
}

pub fn validate_user(input: &str) -> Result<String, ValidationError> {
    required(input, "username")
}

/// Parse a port in 1..=65535.
pub fn validate_port(input: &str) -> Result<u16, ValidationError> {
    let trimmed = input.trim();
    trimmed
        .parse::<u16>()
        .ok()
        .filter(|port| *port != 0)
        .ok_or_else(|| ValidationError::InvalidPort(trimmed.to_string()))
}

/// Resolve a key file path (with `~` expansion) and check that it exists.
///
/// Existence is only checked here, at entry time.
pub fn validate_key_path(input: &str) -> Result<PathBuf, ValidationError> {
    let raw = required(input, "SSH key file path")?;
    let path = simple_ssh_paths::expand_tilde(&raw);
    if !path.exists() {
        return Err(ValidationError::KeyFileMissing(path));
    }
    Ok(path)
}

/// Comma-separated tags; blank items are dropped, duplicates are kept.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// One command per entry; blank entries are dropped, order is kept.
pub fn parse_auto_commands<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    clean_entries(lines)
}

fn clean_entries<I, S>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .map(|entry| entry.as_ref().trim().to_string())
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// Trimmed text, or `None` when blank.
pub fn optional_text(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Unvalidated host input, as typed or as found in an import file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostDraft {
    pub name: String,
    pub host: String,
    pub user: String,
    pub port: String,
    pub key_path: Option<String>,
    pub use_password: bool,
    pub auto_commands: Vec<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
}

impl HostDraft {
    /// Draft pre-filled from a stored profile (the starting point of an edit).
    pub fn from_profile(profile: &HostProfile) -> Self {
        Self {
            name: profile.name.clone(),
            host: profile.host.clone(),
            user: profile.user.clone(),
            port: profile.port.to_string(),
            key_path: profile
                .key_path()
                .map(|p| p.to_string_lossy().into_owned()),
            use_password: profile.uses_password(),
            auto_commands: profile.auto_commands.clone(),
            description: profile.description.clone(),
            tags: profile.tags.clone(),
        }
    }

    /// Run every field validator and build the profile.
    ///
    /// `current_name` is the name of the entry being edited, if any.
    pub fn validate(
        &self,
        store: &Store,
        current_name: Option<&str>,
    ) -> Result<HostProfile, ValidationError> {
        let name = validate_name(&self.name, store, current_name)?;
        let host = validate_host(&self.host)?;
        let user = validate_user(&self.user)?;
        let port = validate_port(&self.port)?;

        let key_path = self.key_path.as_deref().and_then(optional_text);
        let auth = match (key_path, self.use_password) {
            (Some(_), true) => return Err(ValidationError::ConflictingAuth),
            (Some(path), false) => Auth::Key(validate_key_path(&path)?),
            (None, true) => Auth::Password,
            (None, false) => Auth::Default,
        };

        Ok(HostProfile {
            name,
            host,
            user,
            port,
            auth,
            auto_commands: parse_auto_commands(&self.auto_commands),
            description: self.description.as_deref().and_then(optional_text),
            tags: clean_entries(&self.tags),
        })
    }
}
