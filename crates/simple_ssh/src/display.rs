//! Text rendering of hosts for the terminal.

use hosts::{Auth, HostProfile};
use std::io::{self, Write};

pub const NO_HOSTS: &str = "No saved hosts found.";
pub const ADD_HINT: &str = "To add a host: simple-ssh add";

/// Empty-store report shared by every command that needs a host.
pub fn no_hosts(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{}", NO_HOSTS)?;
    writeln!(out, "{}", ADD_HINT)
}

pub fn not_found(out: &mut dyn Write, name: &str) -> io::Result<()> {
    writeln!(out, "Host '{}' not found.", name)
}

/// One line per host in selection lists: `name (user@host:port) - description`.
pub fn choice_label(profile: &HostProfile) -> String {
    match &profile.description {
        Some(description) => format!("{} ({}) - {}", profile.name, profile.address(), description),
        None => format!("{} ({})", profile.name, profile.address()),
    }
}

fn auth_line(auth: &Auth) -> String {
    match auth {
        Auth::Key(path) => format!("Key: {}", path.display()),
        Auth::Password => "Password".to_string(),
        Auth::Default => "Default SSH settings".to_string(),
    }
}

/// Numbered entry used by `list`.
pub fn list_entry(out: &mut dyn Write, index: usize, profile: &HostProfile) -> io::Result<()> {
    writeln!(out, "{}. {}", index + 1, profile.name)?;
    writeln!(out, "   Address: {}", profile.address())?;
    writeln!(out, "   Auth: {}", auth_line(&profile.auth))?;
    if let Some(description) = &profile.description {
        writeln!(out, "   Description: {}", description)?;
    }
    if !profile.tags.is_empty() {
        writeln!(out, "   Tags: {}", profile.tags.join(", "))?;
    }
    if profile.has_auto_commands() {
        writeln!(out, "   Auto commands: {}", profile.auto_commands.len())?;
    }
    writeln!(out)
}

/// Full detail block used after add/edit and by `show`.
pub fn host_info(out: &mut dyn Write, profile: &HostProfile) -> io::Result<()> {
    writeln!(out, "Host information:")?;
    writeln!(out, "   Name: {}", profile.name)?;
    writeln!(out, "   Address: {}", profile.address())?;
    writeln!(out, "   Auth: {}", auth_line(&profile.auth))?;
    if let Some(description) = &profile.description {
        writeln!(out, "   Description: {}", description)?;
    }
    if !profile.tags.is_empty() {
        writeln!(out, "   Tags: {}", profile.tags.join(", "))?;
    }
    if profile.has_auto_commands() {
        writeln!(out, "   Auto commands:")?;
        for (i, command) in profile.auto_commands.iter().enumerate() {
            writeln!(out, "     {}. {}", i + 1, command)?;
        }
    }
    writeln!(out)?;
    writeln!(out, "To connect: simple-ssh connect {}", profile.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn render(f: impl FnOnce(&mut dyn Write) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn choice_label_includes_description() {
        let mut profile = HostProfile::new("web", "example.com", "bob", 22);
        assert_eq!(choice_label(&profile), "web (bob@example.com:22)");
        profile.description = Some("frontend".into());
        assert_eq!(choice_label(&profile), "web (bob@example.com:22) - frontend");
    }

    #[test]
    fn list_entry_summarizes_auth_and_commands() {
        let profile = HostProfile {
            auth: Auth::Key(PathBuf::from("/keys/id")),
            auto_commands: vec!["uptime".into(), "df -h".into()],
            ..HostProfile::new("web", "example.com", "bob", 2222)
        };
        let text = render(|out| list_entry(out, 0, &profile));
        assert!(text.starts_with("1. web\n"));
        assert!(text.contains("Address: bob@example.com:2222"));
        assert!(text.contains("Auth: Key: /keys/id"));
        assert!(text.contains("Auto commands: 2"));
    }

    #[test]
    fn host_info_numbers_commands_and_hints_connect() {
        let profile = HostProfile {
            auth: Auth::Password,
            auto_commands: vec!["cd /srv".into()],
            tags: vec!["prod".into(), "eu".into()],
            ..HostProfile::new("db", "10.0.0.5", "admin", 22)
        };
        let text = render(|out| host_info(out, &profile));
        assert!(text.contains("Auth: Password"));
        assert!(text.contains("Tags: prod, eu"));
        assert!(text.contains("1. cd /srv"));
        assert!(text.ends_with("To connect: simple-ssh connect db\n"));
    }

    #[test]
    fn no_hosts_prints_add_hint() {
        let text = render(|out| no_hosts(out));
        assert_eq!(text, format!("{}\n{}\n", NO_HOSTS, ADD_HINT));
    }
}
