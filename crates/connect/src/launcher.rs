//! Running the external SSH client.

use crate::builder::SshInvocation;
use std::io;
use std::process::{Command, Stdio};
use thiserror::Error;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The client exited with status 0.
    Closed,
    /// Any other status. `None` when the child was killed by a signal.
    ClosedAbnormally(Option<i32>),
}

impl SessionOutcome {
    pub fn from_exit_code(code: Option<i32>) -> Self {
        match code {
            Some(0) => Self::Closed,
            other => Self::ClosedAbnormally(other),
        }
    }
}

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Lost track of '{program}': {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Runs an [`SshInvocation`] to completion.
#[cfg_attr(feature = "test-support", mockall::automock)]
pub trait Launcher {
    fn launch(&self, invocation: &SshInvocation) -> Result<SessionOutcome, LaunchError>;
}

/// Spawns the client as a child process sharing this terminal's stdio and
/// blocks until it exits.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    #[allow(clippy::disallowed_methods)] // Blocks until the session ends
    fn launch(&self, invocation: &SshInvocation) -> Result<SessionOutcome, LaunchError> {
        tracing::info!("Launching {}", invocation.display_command());

        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: invocation.program.clone(),
                source,
            })?;

        let status = child.wait().map_err(|source| LaunchError::Wait {
            program: invocation.program.clone(),
            source,
        })?;

        tracing::debug!("{} exited with {:?}", invocation.program, status.code());
        Ok(SessionOutcome::from_exit_code(status.code()))
    }
}
