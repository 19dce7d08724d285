use crate::model::ContactId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgendaError {
    #[error("Contact not found: {0}")]
    ContactNotFound(ContactId),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Storage write failed: {0}")]
    StorageWrite(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("No contact ids left to assign")]
    IdSpaceExhausted,

    #[error("Contact id already in use: {0}")]
    IdInUse(ContactId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AgendaError>;
