use super::{ContactStore, Snapshot};
use crate::error::{AgendaError, Result};
use std::cell::{Cell, RefCell};

/// In-memory store for testing.
///
/// Uses `RefCell` for interior mutability since agenda is single-threaded,
/// which lets [`ContactStore`] take `&self` for both load and save.
#[derive(Default)]
pub struct InMemoryStore {
    snapshot: RefCell<Option<Snapshot>>,
    fail_loads: Cell<bool>,
    failing_writes: Cell<usize>,
    saves: Cell<usize>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `snapshot`.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        let store = Self::new();
        *store.snapshot.borrow_mut() = Some(snapshot);
        store
    }

    /// Make every `load` fail as if the store were corrupt.
    pub fn set_fail_loads(&self, fail: bool) {
        self.fail_loads.set(fail);
    }

    /// Fail the next `count` writes.
    pub fn fail_next_writes(&self, count: usize) {
        self.failing_writes.set(count);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    /// The last saved snapshot, if any.
    pub fn stored(&self) -> Option<Snapshot> {
        self.snapshot.borrow().clone()
    }
}

impl ContactStore for InMemoryStore {
    fn load(&self) -> Result<Snapshot> {
        if self.fail_loads.get() {
            return Err(AgendaError::StorageUnavailable(
                "Simulated corrupt store".to_string(),
            ));
        }
        Ok(self.snapshot.borrow().clone().unwrap_or_default())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let pending = self.failing_writes.get();
        if pending > 0 {
            self.failing_writes.set(pending - 1);
            return Err(AgendaError::StorageWrite(
                "Simulated write error".to_string(),
            ));
        }
        *self.snapshot.borrow_mut() = Some(snapshot.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory://contacts".to_string()
    }
}
