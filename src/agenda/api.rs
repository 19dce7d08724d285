//! # API Facade
//!
//! The single entry point for agenda operations, whatever the UI. It owns the
//! in-memory [`Directory`] and the [`ContactStore`] behind it:
//!
//! - **Opens** the directory once, from the store (fail-open: an unreadable
//!   store yields an empty directory plus a warning message)
//! - **Dispatches** to the matching `commands::*::run`
//! - **Persists** after every mutating command, retrying a failed save once
//!
//! A save that fails twice does not roll anything back. The change stays in
//! memory, the API is marked dirty and the result carries a warning. Callers
//! that are about to exit should call [`AgendaApi::flush`].
//!
//! No printing and no formatting happens here.
//!
//! ## Generic Over ContactStore
//!
//! - Production: `AgendaApi<FileStore>`
//! - Testing: `AgendaApi<InMemoryStore>`

use crate::commands::{self, CmdMessage, CmdResult};
use crate::directory::Directory;
use crate::error::Result;
use crate::model::{ContactFields, ContactId};
use crate::store::ContactStore;
use std::path::PathBuf;
use tracing::{debug, warn};

pub struct AgendaApi<S: ContactStore> {
    store: S,
    directory: Directory,
    dirty: bool,
    startup_messages: Vec<CmdMessage>,
}

impl<S: ContactStore> AgendaApi<S> {
    /// Loads the directory from `store` with default search fields and no
    /// name requirement.
    pub fn open(store: S) -> Self {
        Self::open_with(store, |directory| directory)
    }

    /// Loads the directory from `store`, then lets `configure` adjust it.
    pub fn open_with(store: S, configure: impl FnOnce(Directory) -> Directory) -> Self {
        let mut startup_messages = Vec::new();
        let directory = match store.load() {
            Ok(snapshot) => {
                let directory = Directory::from_snapshot(snapshot);
                debug!(
                    store = %store.describe(),
                    contacts = directory.len(),
                    "directory loaded"
                );
                directory
            }
            Err(e) => {
                warn!(store = %store.describe(), error = %e, "store unreadable, starting empty");
                startup_messages.push(CmdMessage::warning(format!(
                    "Could not read {}, starting with an empty directory ({})",
                    store.describe(),
                    e
                )));
                Directory::new()
            }
        };

        Self {
            store,
            directory: configure(directory),
            dirty: false,
            startup_messages,
        }
    }

    /// Warnings raised while opening. Returned once.
    pub fn take_startup_messages(&mut self) -> Vec<CmdMessage> {
        std::mem::take(&mut self.startup_messages)
    }

    pub fn create_contact(&mut self, fields: &ContactFields) -> Result<CmdResult> {
        let result = commands::create::run(&mut self.directory, fields)?;
        Ok(self.persist(result))
    }

    pub fn update_contact(&mut self, id: ContactId, patch: &ContactFields) -> Result<CmdResult> {
        let result = commands::update::run(&mut self.directory, id, patch)?;
        Ok(self.persist(result))
    }

    pub fn delete_contact(&mut self, id: ContactId) -> Result<CmdResult> {
        let result = commands::delete::run(&mut self.directory, id)?;
        Ok(self.persist(result))
    }

    pub fn list_contacts(&self) -> CmdResult {
        commands::list::run(&self.directory)
    }

    pub fn search_contacts(&self, query: &str) -> CmdResult {
        commands::search::run(&self.directory, query)
    }

    pub fn view_contacts(&self, ids: &[ContactId]) -> Result<CmdResult> {
        commands::view::run(&self.directory, ids)
    }

    pub fn import_cards(&mut self, paths: &[PathBuf], import_exts: &[String]) -> Result<CmdResult> {
        let result = commands::import::run(&mut self.directory, paths, import_exts)?;
        Ok(self.persist(result))
    }

    pub fn export_contacts(&self) -> Result<CmdResult> {
        commands::export::run(&self.directory)
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// True when the in-memory directory holds changes the store doesn't.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Writes pending changes, if any. Errors when the store still refuses.
    pub fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        self.save_with_retry()?;
        self.dirty = false;
        Ok(())
    }

    fn persist(&mut self, mut result: CmdResult) -> CmdResult {
        if !result.is_mutation() {
            return result;
        }
        match self.save_with_retry() {
            Ok(()) => self.dirty = false,
            Err(e) => {
                warn!(store = %self.store.describe(), error = %e, "save failed, changes kept in memory");
                self.dirty = true;
                result.add_message(CmdMessage::warning(format!(
                    "Changes kept in memory but not saved: {}",
                    e
                )));
            }
        }
        result
    }

    fn save_with_retry(&self) -> Result<()> {
        let snapshot = self.directory.snapshot();
        match self.store.save(&snapshot) {
            Ok(()) => Ok(()),
            Err(first) => {
                debug!(error = %first, "save failed, retrying once");
                self.store.save(&snapshot)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::error::AgendaError;
    use crate::model::Field;
    use crate::store::memory::InMemoryStore;
    use crate::store::Snapshot;

    fn juan() -> ContactFields {
        ContactFields::new()
            .given("Juan")
            .family("Pérez")
            .phone("555-1234")
    }

    fn has_warning(result: &CmdResult) -> bool {
        result
            .messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning)
    }

    #[test]
    fn test_open_empty_store() {
        let mut api = AgendaApi::open(InMemoryStore::new());
        assert!(api.directory().is_empty());
        assert!(api.take_startup_messages().is_empty());
        assert!(!api.is_dirty());
    }

    #[test]
    fn test_open_unreadable_store_fails_open() {
        let store = InMemoryStore::new();
        store.set_fail_loads(true);
        let mut api = AgendaApi::open(store);

        assert!(api.directory().is_empty());
        let messages = api.take_startup_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].level, MessageLevel::Warning);
        assert!(api.take_startup_messages().is_empty());
    }

    #[test]
    fn test_open_with_applies_configuration() {
        let api = AgendaApi::open_with(InMemoryStore::new(), |d| {
            d.with_search_fields([Field::Email])
        });
        assert_eq!(api.directory().search_fields(), &[Field::Email]);
    }

    #[test]
    fn test_create_saves_snapshot() {
        let mut api = AgendaApi::open(InMemoryStore::new());
        let result = api.create_contact(&juan()).unwrap();

        assert_eq!(result.affected_contacts.len(), 1);
        assert_eq!(api.store().save_count(), 1);
        let stored = api.store().stored().unwrap();
        assert_eq!(stored.contacts.len(), 1);
        assert_eq!(stored.next_id, ContactId::new(2));
    }

    #[test]
    fn test_reads_do_not_save() {
        let mut api = AgendaApi::open(InMemoryStore::new());
        api.create_contact(&juan()).unwrap();
        api.list_contacts();
        api.search_contacts("juan");
        api.view_contacts(&[ContactId::FIRST]).unwrap();
        api.export_contacts().unwrap();
        assert_eq!(api.store().save_count(), 1);
    }

    #[test]
    fn test_unchanged_update_does_not_save() {
        let mut api = AgendaApi::open(InMemoryStore::new());
        api.create_contact(&juan()).unwrap();
        api.update_contact(ContactId::FIRST, &ContactFields::new().given("Juan"))
            .unwrap();
        assert_eq!(api.store().save_count(), 1);
    }

    #[test]
    fn test_delete_unknown_id_is_error_and_does_not_save() {
        let mut api = AgendaApi::open(InMemoryStore::new());
        let err = api.delete_contact(ContactId::FIRST).unwrap_err();
        assert!(matches!(err, AgendaError::ContactNotFound(_)));
        assert_eq!(api.store().save_count(), 0);
    }

    #[test]
    fn test_single_write_failure_is_retried() {
        let mut api = AgendaApi::open(InMemoryStore::new());
        api.store().fail_next_writes(1);

        let result = api.create_contact(&juan()).unwrap();
        assert!(!has_warning(&result));
        assert!(!api.is_dirty());
        assert_eq!(api.store().stored().unwrap().contacts.len(), 1);
    }

    #[test]
    fn test_double_write_failure_keeps_memory_and_marks_dirty() {
        let mut api = AgendaApi::open(InMemoryStore::new());
        api.store().fail_next_writes(2);

        let result = api.create_contact(&juan()).unwrap();
        assert!(has_warning(&result));
        assert!(api.is_dirty());
        assert_eq!(api.directory().len(), 1);
        assert_eq!(api.store().stored(), None);

        api.flush().unwrap();
        assert!(!api.is_dirty());
        assert_eq!(api.store().stored().unwrap().contacts.len(), 1);
    }

    #[test]
    fn test_flush_reports_persistent_failure() {
        let mut api = AgendaApi::open(InMemoryStore::new());
        api.store().fail_next_writes(4);
        api.create_contact(&juan()).unwrap();

        assert!(matches!(api.flush(), Err(AgendaError::StorageWrite(_))));
        assert!(api.is_dirty());
    }

    #[test]
    fn test_flush_when_clean_is_noop() {
        let mut api = AgendaApi::open(InMemoryStore::new());
        api.flush().unwrap();
        assert_eq!(api.store().save_count(), 0);
    }

    #[test]
    fn test_reopen_continues_id_sequence() {
        let mut api = AgendaApi::open(InMemoryStore::new());
        api.create_contact(&juan()).unwrap();
        api.create_contact(&ContactFields::new().given("Ana")).unwrap();
        api.delete_contact(ContactId::new(2).unwrap()).unwrap();
        let snapshot: Snapshot = api.store().stored().unwrap();

        let mut reopened = AgendaApi::open(InMemoryStore::with_snapshot(snapshot));
        let result = reopened
            .create_contact(&ContactFields::new().given("Luis"))
            .unwrap();
        assert_eq!(result.affected_contacts[0].id(), ContactId::new(3).unwrap());
    }
}
