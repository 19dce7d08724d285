use super::{ContactStore, Snapshot};
use crate::error::{AgendaError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// JSON file store. One document holds every contact plus the id counter.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
            }
        }
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "contacts".to_string());
        self.path
            .with_file_name(format!(".{}-{}.tmp", name, Uuid::new_v4()))
    }

    fn write_error(&self, err: std::io::Error) -> AgendaError {
        AgendaError::StorageWrite(format!("{}: {}", self.path.display(), err))
    }
}

impl ContactStore for FileStore {
    fn load(&self) -> Result<Snapshot> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no store yet, starting empty");
                return Ok(Snapshot::default());
            }
            Err(e) => {
                return Err(AgendaError::StorageUnavailable(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let snapshot = Snapshot::from_json(&content).map_err(|e| match e {
            AgendaError::StorageUnavailable(msg) => {
                AgendaError::StorageUnavailable(format!("{}: {}", self.path.display(), msg))
            }
            other => other,
        })?;
        debug!(
            path = %self.path.display(),
            contacts = snapshot.contacts.len(),
            "loaded store"
        );
        Ok(snapshot)
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        self.ensure_parent()?;
        let content = snapshot.to_json()?;

        // Atomic write: a crash leaves either the old or the new document.
        let tmp_path = self.tmp_path();
        if let Err(e) = fs::write(&tmp_path, content) {
            let _ = fs::remove_file(&tmp_path);
            return Err(self.write_error(e));
        }
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(self.write_error(e));
        }

        debug!(
            path = %self.path.display(),
            contacts = snapshot.contacts.len(),
            "saved store"
        );
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
