//! Headless bulk import.
//!
//! Accepts either a bare JSON array of host records or a full store document
//! (`{ "hosts": [...] }`). Records go through the same validators as the
//! interactive form; rejected records are reported, never written.

use crate::store::{HostStore, StoreDefaults, StoreError};
use crate::validate::{HostDraft, ValidationError};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImportDocument {
    List(Vec<ImportRecord>),
    Store { hosts: Vec<ImportRecord> },
}

/// Ports may be written as numbers or strings in hand-edited files.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PortValue {
    Number(i64),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportRecord {
    #[serde(default)]
    name: String,
    #[serde(default)]
    host: String,
    #[serde(default)]
    user: Option<String>,
    #[serde(default)]
    port: Option<PortValue>,
    #[serde(default)]
    key_path: Option<String>,
    #[serde(default)]
    use_password: Option<bool>,
    #[serde(default)]
    auto_commands: Vec<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
}

impl ImportRecord {
    fn into_draft(self, defaults: &StoreDefaults) -> HostDraft {
        let port = match self.port {
            Some(PortValue::Number(n)) => n.to_string(),
            Some(PortValue::Text(s)) => s,
            None => defaults.port.to_string(),
        };

        HostDraft {
            name: self.name,
            host: self.host,
            user: self.user.unwrap_or_else(|| defaults.user.clone()),
            port,
            key_path: self.key_path,
            use_password: self.use_password.unwrap_or(false),
            auto_commands: self.auto_commands,
            description: self.description,
            tags: self.tags,
        }
    }
}

/// Parse an import file into drafts. Missing `user`/`port` fall back to
/// `defaults`.
pub fn parse_import(
    content: &str,
    defaults: &StoreDefaults,
) -> Result<Vec<HostDraft>, serde_json::Error> {
    let records = match serde_json::from_str(content)? {
        ImportDocument::List(records) => records,
        ImportDocument::Store { hosts } => hosts,
    };
    Ok(records
        .into_iter()
        .map(|r| r.into_draft(defaults))
        .collect())
}

/// A record that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedDraft {
    /// Zero-based position in the import file.
    pub index: usize,
    pub name: String,
    pub error: ValidationError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Names written to the store, in file order.
    pub imported: Vec<String>,
    pub rejected: Vec<RejectedDraft>,
}

impl HostStore {
    /// Validate every draft and upsert the valid ones in a single write.
    ///
    /// An existing entry with the same name is replaced, as with
    /// [`HostStore::upsert_host`].
    pub fn import(&self, drafts: Vec<HostDraft>) -> Result<ImportReport, StoreError> {
        let mut store = self.try_load()?;
        let mut report = ImportReport::default();

        for (index, draft) in drafts.into_iter().enumerate() {
            let name = draft.name.trim().to_string();
            match draft.validate(&store, Some(&name)) {
                Ok(profile) => {
                    store.upsert(profile);
                    report.imported.push(name);
                }
                Err(error) => {
                    tracing::debug!("Rejected import record {} ('{}'): {}", index, name, error);
                    report.rejected.push(RejectedDraft { index, name, error });
                }
            }
        }

        if !report.imported.is_empty() {
            self.save(&store)?;
            tracing::info!("Imported {} host(s)", report.imported.len());
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Auth, HostProfile};
    use pretty_assertions::assert_eq;

    fn defaults() -> StoreDefaults {
        StoreDefaults::new("tester", 22)
    }

    #[test]
    fn parses_bare_array() {
        let drafts = parse_import(
            r#"[ { "name": "web", "host": "h", "user": "bob", "port": 2200 } ]"#,
            &defaults(),
        )
        .unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].port, "2200");
        assert_eq!(drafts[0].user, "bob");
    }

    #[test]
    fn parses_store_document_and_fills_defaults() {
        let drafts = parse_import(
            r#"{ "hosts": [ { "name": "web", "host": "h" } ], "defaultPort": 2222 }"#,
            &defaults(),
        )
        .unwrap();
        assert_eq!(drafts[0].user, "tester");
        assert_eq!(drafts[0].port, "22");
    }

    #[test]
    fn accepts_string_ports() {
        let drafts = parse_import(
            r#"[ { "name": "web", "host": "h", "port": "8022" } ]"#,
            &defaults(),
        )
        .unwrap();
        assert_eq!(drafts[0].port, "8022");
    }

    #[test]
    fn rejects_non_json() {
        assert!(parse_import("hosts:\n  - web", &defaults()).is_err());
    }

    #[test]
    fn import_writes_valid_records_and_reports_invalid_ones() {
        let dir = tempfile::tempdir().unwrap();
        let store = HostStore::new(dir.path().join("config.json"), defaults());
        store
            .upsert_host(HostProfile::new("web", "old", "u", 22))
            .unwrap();

        let drafts = parse_import(
            r#"[
                { "name": "web", "host": "new", "user": "bob", "usePassword": true },
                { "name": "", "host": "h" },
                { "name": "db", "host": "h", "port": 70000 },
                { "name": "cache", "host": "10.0.0.3", "tags": ["redis"] }
            ]"#,
            &defaults(),
        )
        .unwrap();

        let report = store.import(drafts).unwrap();
        assert_eq!(report.imported, vec!["web", "cache"]);
        assert_eq!(report.rejected.len(), 2);
        assert_eq!(report.rejected[0].index, 1);
        assert_eq!(
            report.rejected[0].error,
            ValidationError::EmptyField("host name")
        );
        assert_eq!(
            report.rejected[1].error,
            ValidationError::InvalidPort("70000".into())
        );

        let doc = store.load();
        assert_eq!(doc.len(), 2);
        let web = doc.find("web").unwrap();
        assert_eq!(web.host, "new");
        assert_eq!(web.auth, Auth::Password);
        assert_eq!(doc.find("cache").unwrap().tags, vec!["redis"]);
    }

    #[test]
    fn import_with_nothing_valid_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let store = HostStore::new(dir.path().join("config.json"), defaults());
        store.load();
        let before = std::fs::read(store.path()).unwrap();

        let drafts = parse_import(r#"[ { "name": "x", "host": "" } ]"#, &defaults()).unwrap();
        let report = store.import(drafts).unwrap();

        assert!(report.imported.is_empty());
        assert_eq!(std::fs::read(store.path()).unwrap(), before);
    }
}
