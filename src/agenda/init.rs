use crate::api::AgendaApi;
use crate::config::{AgendaConfig, CONFIG_FILENAME};
use crate::error::{AgendaError, Result};
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use std::path::PathBuf;

/// Overrides the data directory (config file and default store location).
pub const DATA_DIR_ENV: &str = "AGENDA_DATA";

pub struct AgendaContext {
    pub api: AgendaApi<FileStore>,
    pub config: AgendaConfig,
    pub data_dir: PathBuf,
}

impl AgendaContext {
    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILENAME)
    }
}

/// `$AGENDA_DATA` if set, otherwise the platform data directory.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "agenda", "agenda")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            AgendaError::Config(format!(
                "Could not determine a data directory, set {}",
                DATA_DIR_ENV
            ))
        })
}

/// Loads configuration and opens the store. `store_override` (the CLI's
/// `--file`) wins over every configured location.
pub fn initialize(store_override: Option<PathBuf>) -> Result<AgendaContext> {
    let data_dir = data_dir()?;
    let config = AgendaConfig::load(&data_dir)?;

    let store_path = store_override.unwrap_or_else(|| config.store_path(&data_dir));
    let search_fields = config.search_fields.clone();
    let require_name = config.require_name;

    let api = AgendaApi::open_with(FileStore::new(store_path), |directory| {
        directory
            .with_search_fields(search_fields)
            .with_require_name(require_name)
    });

    Ok(AgendaContext {
        api,
        config,
        data_dir,
    })
}
