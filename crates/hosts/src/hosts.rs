//! Host profile store for simple-ssh.
//!
//! Owns the `HostProfile` record, its JSON document on disk, and the field
//! validation rules used when profiles are created or edited.

mod import;
mod profile;
mod store;
pub mod validate;

pub use import::{parse_import, ImportReport, RejectedDraft};
pub use profile::{Auth, HostProfile, DEFAULT_PORT};
pub use store::{HostStore, Store, StoreDefaults, StoreError, MAX_FILE_SIZE};
pub use validate::{HostDraft, ValidationError};
