use crate::cli::ConnectArgs;
use crate::display;
use crate::prompt::Prompter;
use anyhow::Result;
use connect::{Launcher, Overrides, SessionOutcome, SshInvocation};
use hosts::{HostProfile, HostStore};
use std::io::Write;

/// Connect to a host by name, or pick one interactively.
pub fn run(
    store: &HostStore,
    launcher: &dyn Launcher,
    ssh_binary: &str,
    args: &ConnectArgs,
    prompter: &mut dyn Prompter,
    out: &mut dyn Write,
) -> Result<()> {
    let document = store.load();

    let profile = match args.host.as_deref() {
        Some(name) => match document.find(name) {
            Some(profile) => profile.clone(),
            None => {
                display::not_found(out, name)?;
                return Ok(());
            }
        },
        None => match super::pick_host(&document, None, "Select a host to connect:", prompter, out)? {
            Some(profile) => profile,
            None => return Ok(()),
        },
    };

    let overrides = Overrides {
        user: args.user.clone(),
        port: args.port.clone(),
    };
    let invocation = match connect::build(&profile, &overrides) {
        Ok(invocation) => invocation.with_program(ssh_binary),
        Err(e) => {
            writeln!(out, "{}", e)?;
            return Ok(());
        }
    };

    announce(out, &profile, &invocation)?;
    if args.dry_run {
        return Ok(());
    }

    match launcher.launch(&invocation) {
        Ok(SessionOutcome::Closed) => writeln!(out, "SSH connection closed.")?,
        Ok(SessionOutcome::ClosedAbnormally(Some(code))) => {
            writeln!(out, "SSH connection closed with code {}.", code)?
        }
        Ok(SessionOutcome::ClosedAbnormally(None)) => {
            writeln!(out, "SSH connection was terminated by a signal.")?
        }
        Err(e) => {
            tracing::warn!("SSH session for '{}' failed: {}", profile.name, e);
            writeln!(out, "SSH connection failed: {}", e)?
        }
    }
    Ok(())
}

fn announce(out: &mut dyn Write, profile: &HostProfile, invocation: &SshInvocation) -> Result<()> {
    writeln!(out, "Connecting to {}...", profile.name)?;
    writeln!(out, "   Address: {}:{}", invocation.destination, invocation.port)?;
    if !invocation.auto_commands.is_empty() {
        writeln!(out, "   Auto commands:")?;
        for (i, command) in invocation.auto_commands.iter().enumerate() {
            writeln!(out, "     {}. {}", i + 1, command)?;
        }
    }
    if invocation.password_notice {
        writeln!(out, "   You will be prompted for the password.")?;
    }
    writeln!(out, "Command: {}", invocation.display_command())?;
    writeln!(out)?;
    Ok(())
}
