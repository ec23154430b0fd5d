//! Interactive host form used by `add` and `edit`.

use crate::prompt::Prompter;
use anyhow::Result;
use hosts::validate::{
    optional_text, parse_tags, validate_host, validate_key_path, validate_name, validate_port,
    validate_user,
};
use hosts::{Auth, HostDraft, HostProfile, Store, ValidationError};

const DEFAULT_KEY_PATH: &str = "~/.ssh/id_rsa";

const AUTH_CHOICES: [&str; 3] = [
    "SSH key file (recommended)",
    "Password (prompt on connect)",
    "Default SSH settings",
];

/// Ask until `check` accepts the answer, showing each rejection.
fn ask<T>(
    prompter: &mut dyn Prompter,
    message: &str,
    default: Option<&str>,
    check: impl Fn(&str) -> Result<T, ValidationError>,
) -> Result<T> {
    loop {
        let answer = prompter.input(message, default)?;
        match check(&answer) {
            Ok(value) => return Ok(value),
            Err(e) => prompter.notify(&e.to_string())?,
        }
    }
}

fn auth_index(auth: &Auth) -> usize {
    match auth {
        Auth::Key(_) => 0,
        Auth::Password => 1,
        Auth::Default => 2,
    }
}

/// Walk through every field, pre-filled from `existing` when editing.
///
/// Each answer is validated as it is given; the returned profile is ready to
/// persist.
pub fn collect_profile(
    prompter: &mut dyn Prompter,
    store: &Store,
    existing: Option<&HostProfile>,
) -> Result<HostProfile> {
    let current_name = existing.map(|p| p.name.as_str());
    let base = existing.map(HostDraft::from_profile).unwrap_or_else(|| HostDraft {
        user: store.default_user.clone(),
        port: store.default_port.to_string(),
        ..HostDraft::default()
    });

    let name = ask(prompter, "Host name (alias):", non_empty(&base.name), |s| {
        validate_name(s, store, current_name)
    })?;
    let host = ask(
        prompter,
        "Host address (IP or domain):",
        non_empty(&base.host),
        validate_host,
    )?;
    let user = ask(prompter, "Username:", non_empty(&base.user), validate_user)?;
    let port = ask(prompter, "Port number:", non_empty(&base.port), validate_port)?;

    let choices: Vec<String> = AUTH_CHOICES.iter().map(|c| c.to_string()).collect();
    let default_auth = existing.map(|p| auth_index(&p.auth)).unwrap_or(0);
    let (key_path, use_password) =
        match prompter.select("Authentication method:", &choices, default_auth)? {
            0 => {
                let default_key = base.key_path.as_deref().unwrap_or(DEFAULT_KEY_PATH);
                let path = ask(
                    prompter,
                    "SSH key file path:",
                    Some(default_key),
                    validate_key_path,
                )?;
                (Some(path.to_string_lossy().into_owned()), false)
            }
            1 => (None, true),
            _ => (None, false),
        };

    let description = prompter.input(
        "Description (optional):",
        base.description.as_deref(),
    )?;
    let tags = prompter.input(
        "Tags (comma separated, optional):",
        non_empty(&base.tags.join(", ")),
    )?;

    let wants_commands = prompter.confirm(
        "Run commands automatically after connecting?",
        !base.auto_commands.is_empty(),
    )?;
    let auto_commands = if wants_commands {
        prompter.lines("Commands to run", &base.auto_commands)?
    } else {
        Vec::new()
    };

    let draft = HostDraft {
        name,
        host,
        user,
        port: port.to_string(),
        key_path,
        use_password,
        auto_commands,
        description: optional_text(&description),
        tags: parse_tags(&tags),
    };
    Ok(draft.validate(store, current_name)?)
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}
