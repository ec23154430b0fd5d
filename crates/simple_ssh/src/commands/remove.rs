use crate::display;
use crate::prompt::Prompter;
use anyhow::Result;
use hosts::HostStore;
use std::io::Write;

/// Remove a host after showing it and asking for confirmation.
pub fn run(
    store: &HostStore,
    name: Option<&str>,
    prompter: &mut dyn Prompter,
    out: &mut dyn Write,
) -> Result<()> {
    let document = match store.try_load() {
        Ok(document) => document,
        Err(e) => {
            writeln!(out, "Cannot remove hosts: {}", e)?;
            return Ok(());
        }
    };

    let Some(target) =
        super::pick_host(&document, name, "Select a host to remove:", prompter, out)?
    else {
        return Ok(());
    };

    display::host_info(out, &target)?;
    writeln!(out)?;
    let question = format!("Really remove host '{}'?", target.name);
    if !prompter.confirm(&question, false)? {
        writeln!(out, "Cancelled.")?;
        return Ok(());
    }

    match store.remove_host(&target.name) {
        Ok(true) => writeln!(out, "Host '{}' removed.", target.name)?,
        Ok(false) => display::not_found(out, &target.name)?,
        Err(e) => writeln!(out, "Failed to remove host: {}", e)?,
    }
    Ok(())
}
