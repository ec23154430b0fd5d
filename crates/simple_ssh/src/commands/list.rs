use crate::display;
use anyhow::Result;
use hosts::HostStore;
use std::io::Write;

pub fn run(store: &HostStore, out: &mut dyn Write) -> Result<()> {
    let document = store.load();
    if document.is_empty() {
        display::no_hosts(out)?;
        return Ok(());
    }

    writeln!(out, "Saved SSH hosts:")?;
    writeln!(out)?;
    for (index, profile) in document.hosts.iter().enumerate() {
        display::list_entry(out, index, profile)?;
    }
    writeln!(out, "Total {} host(s) saved.", document.len())?;
    writeln!(out, "To connect: simple-ssh connect <name>")?;
    Ok(())
}
