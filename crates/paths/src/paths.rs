//! Centralized path management for simple-ssh.
//!
//! Locations are lazily resolved from the user's home directory and cached.
//! Callers that need another location pass an explicit path instead.

use std::path::PathBuf;
use std::sync::OnceLock;

static CONFIG_DIR: OnceLock<PathBuf> = OnceLock::new();
static DEFAULT_USER: OnceLock<String> = OnceLock::new();

/// Name of the per-user config directory, created under the home directory.
pub const CONFIG_DIR_NAME: &str = ".ssh-easy";

/// Name of the host store document inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// User name used when neither the environment nor the store provides one.
pub const FALLBACK_USER: &str = "root";

/// ~/.ssh-easy
pub fn config_dir() -> &'static PathBuf {
    CONFIG_DIR.get_or_init(|| {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
    })
}

/// Host store path: config_dir()/config.json
pub fn config_file() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}

/// Expand a leading `~/` (or a bare `~`) to the home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = || dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    if path == "~" {
        return home();
    }
    match path.strip_prefix("~/") {
        Some(rest) => home().join(rest),
        None => PathBuf::from(path),
    }
}

/// Login name of the current user (`$USER`, then `$USERNAME`), or `root`.
pub fn default_user() -> &'static str {
    DEFAULT_USER.get_or_init(|| {
        ["USER", "USERNAME"]
            .iter()
            .filter_map(|key| std::env::var(key).ok())
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
            .unwrap_or_else(|| FALLBACK_USER.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_dir_ends_with_ssh_easy() {
        let dir = config_dir();
        assert!(
            dir.ends_with(CONFIG_DIR_NAME),
            "config_dir should end with '.ssh-easy': {:?}",
            dir
        );
    }

    #[test]
    fn config_file_is_json() {
        let path = config_file();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("json"));
        assert!(path.starts_with(config_dir()));
    }

    #[test]
    fn expand_tilde_leaves_absolute_paths() {
        assert_eq!(expand_tilde("/etc/ssh/key"), PathBuf::from("/etc/ssh/key"));
        assert_eq!(expand_tilde("relative/key"), PathBuf::from("relative/key"));
    }

    #[test]
    fn expand_tilde_joins_home() {
        let expanded = expand_tilde("~/.ssh/id_rsa");
        assert!(expanded.ends_with(".ssh/id_rsa"));
        assert!(!expanded.starts_with("~"));
    }

    #[test]
    fn default_user_is_never_empty() {
        assert!(!default_user().is_empty());
    }
}
