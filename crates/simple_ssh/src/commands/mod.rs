//! Subcommand implementations.
//!
//! Every command writes its report to `out` and returns `Ok` for expected
//! outcomes (unknown host, cancelled prompt, failed save). Errors are left
//! for broken input or output streams.

mod add;
mod connect;
mod edit;
mod import;
mod list;
mod remove;
mod show;

pub use self::add::run as add;
pub use self::connect::run as connect;
pub use self::edit::run as edit;
pub use self::import::run as import;
pub use self::list::run as list;
pub use self::remove::run as remove;
pub use self::show::run as show;

use crate::display;
use crate::prompt::Prompter;
use anyhow::Result;
use hosts::{HostProfile, Store};
use std::io::Write;

const CANCEL: &str = "Cancel";

/// Resolve the host a command acts on.
///
/// Reports an empty store or an unknown name and returns `None`. Without a
/// name the user picks from a list that ends with a Cancel entry.
fn pick_host(
    store: &Store,
    name: Option<&str>,
    message: &str,
    prompter: &mut dyn Prompter,
    out: &mut dyn Write,
) -> Result<Option<HostProfile>> {
    if store.is_empty() {
        display::no_hosts(out)?;
        return Ok(None);
    }

    if let Some(name) = name {
        return match store.find(name) {
            Some(profile) => Ok(Some(profile.clone())),
            None => {
                display::not_found(out, name)?;
                Ok(None)
            }
        };
    }

    let mut choices: Vec<String> = store.hosts.iter().map(display::choice_label).collect();
    choices.push(CANCEL.to_string());

    let index = prompter.select(message, &choices, 0)?;
    match store.hosts.get(index) {
        Some(profile) => Ok(Some(profile.clone())),
        None => {
            writeln!(out, "Cancelled.")?;
            Ok(None)
        }
    }
}
