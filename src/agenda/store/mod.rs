//! # Storage Layer
//!
//! The [`ContactStore`] trait is the only place agenda touches durable state.
//! The directory itself never does I/O: it is hydrated from a [`Snapshot`] at
//! startup and hands a fresh [`Snapshot`] back after each mutation.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: a single JSON document on disk, written atomically
//!   (temp file + rename).
//! - [`memory::InMemoryStore`]: no persistence, used by tests. It can be told
//!   to fail writes so the save policy in the API layer can be exercised.
//!
//! ## Storage Format
//!
//! ```text
//! {
//!   "contacts": [ { "id": 1, "givenName": "...", "familyName": "...", ... } ],
//!   "nextId": 2
//! }
//! ```
//!
//! A bare array of contacts is also accepted on load; `nextId` is then derived
//! from the highest id. Saves always write the wrapped form.
//!
//! ## Failure Semantics
//!
//! A missing store is a first run, not an error: `load` returns an empty
//! snapshot. Unreadable or malformed content is
//! [`AgendaError::StorageUnavailable`]; it is up to the caller to fall back to
//! an empty directory. Write failures are [`AgendaError::StorageWrite`].

use crate::error::{AgendaError, Result};
use crate::model::{Contact, ContactId};
use serde::{Deserialize, Serialize};

pub mod fs;
pub mod memory;

/// Everything needed to rebuild a directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub contacts: Vec<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_id: Option<ContactId>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Wrapped {
        contacts: Vec<Contact>,
        #[serde(default, rename = "nextId")]
        next_id: Option<u64>,
    },
    Bare(Vec<Contact>),
}

impl Snapshot {
    pub fn from_json(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let document: Document = serde_json::from_str(content).map_err(|_| {
            AgendaError::StorageUnavailable(
                "store is not a contact list or a {\"contacts\": [...]} document".to_string(),
            )
        })?;
        Ok(match document {
            Document::Wrapped { contacts, next_id } => Self {
                contacts,
                next_id: next_id.and_then(ContactId::new),
            },
            Document::Bare(contacts) => Self {
                contacts,
                next_id: None,
            },
        })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(AgendaError::Serialization)
    }
}

/// Durable load/save of directory contents.
pub trait ContactStore {
    /// Read the store. A store that does not exist yet yields an empty snapshot.
    fn load(&self) -> Result<Snapshot>;

    /// Replace the store's contents with `snapshot`.
    fn save(&self, snapshot: &Snapshot) -> Result<()>;

    /// Human-readable location, for messages.
    fn describe(&self) -> String;
}
