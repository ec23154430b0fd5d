use crate::display;
use anyhow::Result;
use hosts::HostStore;
use std::io::Write;

pub fn run(store: &HostStore, name: &str, out: &mut dyn Write) -> Result<()> {
    match store.find_host(name) {
        Some(profile) => display::host_info(out, &profile)?,
        None => display::not_found(out, name)?,
    }
    Ok(())
}
