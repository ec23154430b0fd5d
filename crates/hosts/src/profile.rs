//! Host profile records.
//!
//! In memory the authentication method is a single [`Auth`] value. On disk
//! the record keeps the flat `keyPath` / `usePassword` fields, mapped through
//! [`HostRecord`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Port used when a record on disk omits one.
pub const DEFAULT_PORT: u16 = 22;

/// How the SSH client should authenticate against a host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Auth {
    /// Pass the key file with `-i`.
    Key(PathBuf),
    /// Expect an interactive password prompt from the client.
    Password,
    /// Leave authentication to the SSH client's own configuration.
    #[default]
    Default,
}

impl Auth {
    pub fn key_path(&self) -> Option<&Path> {
        match self {
            Self::Key(path) => Some(path),
            _ => None,
        }
    }

    pub fn uses_password(&self) -> bool {
        matches!(self, Self::Password)
    }
}

impl fmt::Display for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(path) => write!(f, "key {}", path.display()),
            Self::Password => write!(f, "password"),
            Self::Default => write!(f, "default SSH settings"),
        }
    }
}

/// One saved SSH destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HostRecord", into = "HostRecord")]
pub struct HostProfile {
    /// Unique key within the store (case-sensitive).
    pub name: String,
    /// Address or domain.
    pub host: String,
    pub user: String,
    pub port: u16,
    pub auth: Auth,
    /// Commands run in order right after the session opens.
    pub auto_commands: Vec<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
}

impl HostProfile {
    /// Profile with default authentication and no optional fields.
    pub fn new(
        name: impl Into<String>,
        host: impl Into<String>,
        user: impl Into<String>,
        port: u16,
    ) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            user: user.into(),
            port,
            auth: Auth::Default,
            auto_commands: Vec::new(),
            description: None,
            tags: Vec::new(),
        }
    }

    /// `user@host:port`
    pub fn address(&self) -> String {
        format!("{}@{}:{}", self.user, self.host, self.port)
    }

    pub fn key_path(&self) -> Option<&Path> {
        self.auth.key_path()
    }

    pub fn uses_password(&self) -> bool {
        self.auth.uses_password()
    }

    pub fn has_auto_commands(&self) -> bool {
        !self.auto_commands.is_empty()
    }
}

/// On-disk shape of a host profile (camelCase, optional fields omitted).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HostRecord {
    name: String,
    host: String,
    user: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    use_password: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    auto_commands: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl TryFrom<HostRecord> for HostProfile {
    type Error = String;

    fn try_from(record: HostRecord) -> Result<Self, Self::Error> {
        if record.port == 0 {
            return Err(format!("host '{}' has invalid port 0", record.name));
        }

        let key_path = record
            .key_path
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        let use_password = record.use_password.unwrap_or(false);

        let auth = match key_path {
            Some(path) => {
                if use_password {
                    tracing::warn!(
                        "Host '{}' has both keyPath and usePassword set, using the key file",
                        record.name
                    );
                }
                Auth::Key(PathBuf::from(path))
            }
            None if use_password => Auth::Password,
            None => Auth::Default,
        };

        Ok(Self {
            name: record.name,
            host: record.host,
            user: record.user,
            port: record.port,
            auth,
            auto_commands: record.auto_commands,
            description: record.description,
            tags: record.tags,
        })
    }
}

impl From<HostProfile> for HostRecord {
    fn from(profile: HostProfile) -> Self {
        let (key_path, use_password) = match profile.auth {
            Auth::Key(path) => (Some(path.to_string_lossy().into_owned()), None),
            Auth::Password => (None, Some(true)),
            Auth::Default => (None, None),
        };

        Self {
            name: profile.name,
            host: profile.host,
            user: profile.user,
            port: profile.port,
            key_path,
            use_password,
            auto_commands: profile.auto_commands,
            description: profile.description,
            tags: profile.tags,
        }
    }
}
