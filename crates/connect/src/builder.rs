//! Profile to `ssh` argument translation.
//!
//! Pure: no process or network activity happens here.

use hosts::validate::validate_port;
use hosts::HostProfile;
use thiserror::Error;

/// Default external client.
pub const SSH_PROGRAM: &str = "ssh";

/// Separator between auto-commands. A failing command stops the chain.
pub const COMMAND_SEPARATOR: &str = " && ";

/// Appended after the auto-commands so the session stays open. Runs whether
/// or not the chain succeeded.
pub const INTERACTIVE_SHELL: &str = "exec $SHELL -l";

/// Ad-hoc values given on the command line, applied on top of the profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub user: Option<String>,
    pub port: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("Invalid port '{0}': expected a number between 1 and 65535")]
    InvalidPort(String),
}

/// A ready-to-spawn client invocation plus advisory flags for the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshInvocation {
    pub program: String,
    pub args: Vec<String>,
    /// `user@host` actually used after overrides.
    pub destination: String,
    pub port: u16,
    /// The caller should tell the user to expect a password prompt.
    pub password_notice: bool,
    /// Commands folded into the remote command, in order.
    pub auto_commands: Vec<String>,
}

impl SshInvocation {
    /// Use a different client binary.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Shell-style rendering for display, e.g. `ssh -p 22 bob@h`.
    pub fn display_command(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(shell_quote)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Join auto-commands into one remote command ending in an interactive
/// shell, or `None` when there are none.
pub fn remote_command(commands: &[String]) -> Option<String> {
    if commands.is_empty() {
        return None;
    }
    Some(format!(
        "{}; {}",
        commands.join(COMMAND_SEPARATOR),
        INTERACTIVE_SHELL
    ))
}

/// Build the argument vector for connecting to `profile`.
///
/// Order: `[-i <key>] -p <port> [-t] <user>@<host> [<remote command>]`.
/// `-t` is only added alongside a remote command so the trailing shell gets
/// a terminal.
pub fn build(profile: &HostProfile, overrides: &Overrides) -> Result<SshInvocation, BuildError> {
    let user = overrides
        .user
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .unwrap_or(&profile.user);

    let port = match overrides.port.as_deref() {
        Some(raw) => validate_port(raw).map_err(|_| BuildError::InvalidPort(raw.trim().to_string()))?,
        None => profile.port,
    };

    let destination = format!("{}@{}", user, profile.host);
    let mut args = Vec::new();

    if let Some(key) = profile.key_path() {
        args.push("-i".to_string());
        args.push(key.to_string_lossy().into_owned());
    }
    args.push("-p".to_string());
    args.push(port.to_string());

    match remote_command(&profile.auto_commands) {
        Some(command) => {
            args.push("-t".to_string());
            args.push(destination.clone());
            args.push(command);
        }
        None => args.push(destination.clone()),
    }

    tracing::debug!("Built ssh arguments for '{}': {:?}", profile.name, args);

    Ok(SshInvocation {
        program: SSH_PROGRAM.to_string(),
        args,
        destination,
        port,
        password_notice: profile.uses_password(),
        auto_commands: profile.auto_commands.clone(),
    })
}

fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./@:=,+%".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
