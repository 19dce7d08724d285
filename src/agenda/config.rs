//! # Configuration
//!
//! Loaded with [`confique`] from, in priority order:
//! 1. **Environment variables**: `AGENDA_STORE_FILE`, `AGENDA_REQUIRE_NAME`.
//! 2. **Config file**: `agenda.toml` in the data directory.
//! 3. **Compiled defaults**.
//!
//! The CLI's `--file` flag overrides the store location on top of all of these.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `store_file` | `contacts.json` in the data dir | JSON store; relative paths are resolved against the data dir |
//! | `search_fields` | `["family_name", "given_name", "phone", "email"]` | Fields matched by search; needs a name field and `phone` or `email` |
//! | `require_name` | `false` | Reject contacts with neither given nor family name |
//! | `import_extensions` | `[".vcf", ".vcard", ".txt"]` | Files picked up by `agenda import <dir>` |

use crate::directory::{check_search_fields, DEFAULT_SEARCH_FIELDS};
use crate::error::{AgendaError, Result};
use crate::model::Field;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "agenda.toml";
pub const STORE_FILENAME: &str = "contacts.json";

fn default_import_ext() -> Vec<String> {
    vec![".vcf".to_string(), ".vcard".to_string(), ".txt".to_string()]
}

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AgendaConfig {
    /// Path of the JSON store.
    #[config(env = "AGENDA_STORE_FILE")]
    pub store_file: Option<PathBuf>,

    /// Fields matched by search.
    #[config(default = ["family_name", "given_name", "phone", "email"])]
    pub search_fields: Vec<Field>,

    /// Reject contacts that have neither a given nor a family name.
    #[config(env = "AGENDA_REQUIRE_NAME", default = false)]
    pub require_name: bool,

    /// Extensions looked for when importing a directory of cards.
    #[config(default = [".vcf", ".vcard", ".txt"])]
    pub import_extensions: Vec<String>,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        Self {
            store_file: None,
            search_fields: DEFAULT_SEARCH_FIELDS.to_vec(),
            require_name: false,
            import_extensions: default_import_ext(),
        }
    }
}

impl AgendaConfig {
    /// Layered load: environment, then `<data_dir>/agenda.toml`, then defaults.
    /// A missing config file is not an error; an unusable search field set is.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let config = Self::builder()
            .env()
            .file(data_dir.join(CONFIG_FILENAME))
            .load()
            .map_err(|e| AgendaError::Config(e.to_string()))?;
        check_search_fields(&config.search_fields)
            .map_err(|e| AgendaError::Config(e.to_string()))?;
        Ok(config)
    }

    /// Where the store lives, given the data directory.
    pub fn store_path(&self, data_dir: &Path) -> PathBuf {
        match &self.store_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => data_dir.join(path),
            None => data_dir.join(STORE_FILENAME),
        }
    }
}
