use crate::display;
use crate::form;
use crate::prompt::Prompter;
use anyhow::Result;
use hosts::HostStore;
use std::io::Write;

/// Edit a host in place. Renaming keeps its position in the list.
pub fn run(
    store: &HostStore,
    name: Option<&str>,
    prompter: &mut dyn Prompter,
    out: &mut dyn Write,
) -> Result<()> {
    let document = match store.try_load() {
        Ok(document) => document,
        Err(e) => {
            writeln!(out, "Cannot edit hosts: {}", e)?;
            return Ok(());
        }
    };

    let Some(current) = super::pick_host(&document, name, "Select a host to edit:", prompter, out)?
    else {
        return Ok(());
    };

    writeln!(out, "Editing '{}' (press Enter to keep a value)", current.name)?;
    writeln!(out)?;
    let updated = form::collect_profile(prompter, &document, Some(&current))?;

    match store.replace_host(&current.name, updated.clone()) {
        Ok(()) => {
            writeln!(out)?;
            writeln!(out, "Host '{}' updated successfully!", updated.name)?;
            writeln!(out)?;
            display::host_info(out, &updated)?;
        }
        Err(e) => writeln!(out, "Failed to update host: {}", e)?,
    }
    Ok(())
}
