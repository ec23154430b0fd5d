//! Command-line surface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "simple-ssh",
    version,
    about = "Simple and convenient SSH connection CLI tool"
)]
pub struct Cli {
    /// Host store to use instead of ~/.ssh-easy/config.json
    #[arg(long, global = true, env = "SIMPLE_SSH_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// SSH client to launch
    #[arg(
        long,
        global = true,
        env = "SIMPLE_SSH_BIN",
        default_value = connect::SSH_PROGRAM,
        value_name = "PATH"
    )]
    pub ssh_binary: String,

    /// Without a subcommand, pick a saved host and connect.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Connect to a saved SSH host
    #[command(visible_alias = "c")]
    Connect(ConnectArgs),

    /// List saved SSH hosts
    #[command(visible_alias = "ls")]
    List,

    /// Add new SSH host
    #[command(visible_alias = "a")]
    Add,

    /// Edit a saved SSH host
    #[command(visible_alias = "e")]
    Edit {
        /// Host name (chosen interactively when omitted)
        host: Option<String>,
    },

    /// Remove a saved SSH host
    #[command(visible_alias = "rm")]
    Remove {
        /// Host name (chosen interactively when omitted)
        host: Option<String>,
    },

    /// Show details of a saved SSH host
    Show {
        /// Host name
        host: String,
    },

    /// Import hosts from a JSON file
    Import {
        /// A JSON array of hosts, or a document with a "hosts" array
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct ConnectArgs {
    /// Host name (chosen interactively when omitted)
    pub host: Option<String>,

    /// Connect as this user instead of the saved one
    #[arg(short, long)]
    pub user: Option<String>,

    /// Connect to this port instead of the saved one
    #[arg(short, long)]
    pub port: Option<String>,

    /// Print the ssh command without running it
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("simple-ssh").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = parse(&[]);
        assert!(cli.command.is_none());
        assert_eq!(cli.ssh_binary, "ssh");
    }

    #[test]
    fn connect_alias_with_overrides() {
        let cli = parse(&["c", "web", "-u", "root", "--port", "2022", "--dry-run"]);
        match cli.command {
            Some(Command::Connect(args)) => {
                assert_eq!(args.host.as_deref(), Some("web"));
                assert_eq!(args.user.as_deref(), Some("root"));
                assert_eq!(args.port.as_deref(), Some("2022"));
                assert!(args.dry_run);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test_case(&["ls"] ; "list")]
    #[test_case(&["a"] ; "add")]
    #[test_case(&["e", "web"] ; "edit")]
    #[test_case(&["rm", "web"] ; "remove")]
    fn short_aliases_parse(args: &[&str]) {
        assert!(parse(args).command.is_some());
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = parse(&["list", "--config", "/tmp/hosts.json", "--ssh-binary", "/opt/ssh"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/hosts.json")));
        assert_eq!(cli.ssh_binary, "/opt/ssh");
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["simple-ssh", "frobnicate"]).is_err());
    }
}
