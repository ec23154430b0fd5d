use anyhow::Result;
use hosts::HostStore;
use std::io::Write;
use std::path::Path;

/// Bulk-add hosts from a JSON file without prompting.
pub fn run(store: &HostStore, file: &Path, out: &mut dyn Write) -> Result<()> {
    let content = match std::fs::read_to_string(file) {
        Ok(content) => content,
        Err(e) => {
            writeln!(out, "Failed to read {}: {}", file.display(), e)?;
            return Ok(());
        }
    };

    let document = match store.try_load() {
        Ok(document) => document,
        Err(e) => {
            writeln!(out, "Failed to import hosts: {}", e)?;
            return Ok(());
        }
    };

    // Missing user/port fall back to the document's defaults, as in `add`.
    let drafts = match hosts::parse_import(&content, &document.defaults()) {
        Ok(drafts) => drafts,
        Err(e) => {
            writeln!(out, "Failed to parse {}: {}", file.display(), e)?;
            return Ok(());
        }
    };

    let report = match store.import(drafts) {
        Ok(report) => report,
        Err(e) => {
            writeln!(out, "Failed to import hosts: {}", e)?;
            return Ok(());
        }
    };

    for rejected in &report.rejected {
        let label = if rejected.name.is_empty() {
            format!("#{}", rejected.index + 1)
        } else {
            format!("'{}'", rejected.name)
        };
        writeln!(out, "Skipped {}: {}", label, rejected.error)?;
    }
    writeln!(
        out,
        "Imported {} host(s), skipped {}.",
        report.imported.len(),
        report.rejected.len()
    )?;
    Ok(())
}
