//! # Command Layer
//!
//! One module per operation. Each `run` takes the [`Directory`] (and whatever
//! input the operation needs), performs it, and returns a [`CmdResult`]
//! describing what happened. Commands never print, never exit and never touch
//! the store: persistence is the API layer's job.
//!
//! Not-found ids are errors here ([`AgendaError::ContactNotFound`]) even
//! though the directory itself reports them as `false` / `None`; by the time
//! a user asked for an id, a missing one is something to tell them about.

use crate::directory::Directory;
use crate::error::{AgendaError, Result};
use crate::model::{Contact, ContactId};

pub mod create;
pub mod delete;
pub mod export;
pub mod import;
pub mod list;
pub mod search;
pub mod update;
pub mod view;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Contacts created, changed or removed by the command.
    pub affected_contacts: Vec<Contact>,
    /// Contacts to display, in canonical order.
    pub listed_contacts: Vec<Contact>,
    /// Serialized output for commands that produce a document.
    pub document: Option<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_contacts(mut self, contacts: Vec<Contact>) -> Self {
        self.listed_contacts = contacts;
        self
    }

    pub fn with_document(mut self, document: String) -> Self {
        self.document = Some(document);
        self
    }

    /// True when the command changed the directory and it needs saving.
    pub fn is_mutation(&self) -> bool {
        !self.affected_contacts.is_empty()
    }
}

pub(crate) fn require(directory: &Directory, id: ContactId) -> Result<&Contact> {
    directory.get(id).ok_or(AgendaError::ContactNotFound(id))
}
