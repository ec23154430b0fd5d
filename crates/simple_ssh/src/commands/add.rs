use crate::display;
use crate::form;
use crate::prompt::Prompter;
use anyhow::Result;
use hosts::HostStore;
use std::io::Write;

pub fn run(store: &HostStore, prompter: &mut dyn Prompter, out: &mut dyn Write) -> Result<()> {
    let document = match store.try_load() {
        Ok(document) => document,
        Err(e) => {
            writeln!(out, "Cannot add a host: {}", e)?;
            return Ok(());
        }
    };

    writeln!(out, "Add new SSH host")?;
    writeln!(out)?;
    let profile = form::collect_profile(prompter, &document, None)?;

    match store.upsert_host(profile.clone()) {
        Ok(()) => {
            writeln!(out)?;
            writeln!(out, "Host '{}' added successfully!", profile.name)?;
            writeln!(out)?;
            display::host_info(out, &profile)?;
        }
        Err(e) => writeln!(out, "Failed to add host: {}", e)?,
    }
    Ok(())
}
