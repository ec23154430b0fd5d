//! simple-ssh - a small address book for SSH hosts.
//!
//! Main entry point for the command-line tool.

mod cli;
mod commands;
mod display;
mod form;
mod prompt;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, ConnectArgs};
use connect::SystemLauncher;
use hosts::{HostStore, StoreDefaults};
use prompt::TerminalPrompter;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::{debug, error};

/// Check if debug mode is enabled via environment variable.
fn is_debug_mode() -> bool {
    std::env::var("SIMPLE_SSH_DEBUG").is_ok()
}

/// Initialize the logging system.
///
/// Logs go to stderr so they never mix with command output.
fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default_filter = if is_debug_mode() {
        "simple_ssh=trace,hosts=trace,connect=trace,info"
    } else {
        "warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_line_number(true),
        )
        .with(filter)
        .init();

    debug!("simple-ssh v{} starting up", env!("CARGO_PKG_VERSION"));
}

fn run(cli: Cli) -> Result<()> {
    let store = match &cli.config {
        Some(path) => HostStore::new(path, StoreDefaults::from_env()),
        None => HostStore::open_default(),
    };
    debug!("Using host store at {:?}", store.path());

    let mut prompter = TerminalPrompter::stdio();
    let mut stdout = io::stdout();
    let out: &mut dyn Write = &mut stdout;

    match cli.command {
        None => commands::connect(
            &store,
            &SystemLauncher,
            &cli.ssh_binary,
            &ConnectArgs::default(),
            &mut prompter,
            out,
        ),
        Some(Command::Connect(args)) => commands::connect(
            &store,
            &SystemLauncher,
            &cli.ssh_binary,
            &args,
            &mut prompter,
            out,
        ),
        Some(Command::List) => commands::list(&store, out),
        Some(Command::Add) => commands::add(&store, &mut prompter, out),
        Some(Command::Edit { host }) => commands::edit(&store, host.as_deref(), &mut prompter, out),
        Some(Command::Remove { host }) => {
            commands::remove(&store, host.as_deref(), &mut prompter, out)
        }
        Some(Command::Show { host }) => commands::show(&store, &host, out),
        Some(Command::Import { file }) => commands::import(&store, &file, out),
    }?;

    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
