//! SSH connection support for simple-ssh.
//!
//! `builder` turns a stored profile into `ssh` arguments; `launcher` runs
//! them. The builder never touches processes, so it is tested in isolation.

mod builder;
mod launcher;

pub use builder::{
    build, remote_command, BuildError, Overrides, SshInvocation, COMMAND_SEPARATOR,
    INTERACTIVE_SHELL, SSH_PROGRAM,
};
#[cfg(feature = "test-support")]
pub use launcher::MockLauncher;
pub use launcher::{LaunchError, Launcher, SessionOutcome, SystemLauncher};
