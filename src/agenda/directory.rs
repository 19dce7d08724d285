//! # Directory
//!
//! The aggregate root: owns every [`Contact`], hands out ids and keeps the
//! canonical order.
//!
//! ## Identity
//!
//! Ids come from a counter that only moves forward. `next_id` is always
//! greater than any id the directory has ever assigned, including deleted
//! ones, so an id is never reused. The counter is part of the [`Snapshot`]
//! so this holds across sessions too. Once `u64::MAX` has been handed out the
//! counter is exhausted (`None`) and every create fails with
//! [`AgendaError::IdSpaceExhausted`]; it never wraps.
//!
//! ## Canonical Order
//!
//! Contacts are ordered by normalized family name, then normalized given
//! name, then id. The order is recomputed after every mutation; [`list`] and
//! [`search`] only walk it.
//!
//! [`list`]: Directory::list
//! [`search`]: Directory::search

use crate::error::{AgendaError, Result};
use crate::model::{Contact, ContactFields, ContactId, Field};
use crate::normalize::normalize;
use crate::store::Snapshot;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Fields matched by [`Directory::search`] unless configured otherwise.
pub const DEFAULT_SEARCH_FIELDS: [Field; 4] = [
    Field::FamilyName,
    Field::GivenName,
    Field::Phone,
    Field::Email,
];

/// Search must be able to find a contact by name and by at least one other
/// identifying field (phone or email).
pub fn check_search_fields(fields: &[Field]) -> Result<()> {
    let has_name = fields
        .iter()
        .any(|f| matches!(f, Field::GivenName | Field::FamilyName));
    let has_contact_point = fields
        .iter()
        .any(|f| matches!(f, Field::Phone | Field::Email));
    if has_name && has_contact_point {
        return Ok(());
    }
    let names: Vec<&str> = fields.iter().map(Field::name).collect();
    Err(AgendaError::Validation(format!(
        "search fields need a name field and a phone or email field, got [{}]",
        names.join(", ")
    )))
}

#[derive(Debug, Clone)]
pub struct Directory {
    contacts: HashMap<ContactId, Contact>,
    order: Vec<ContactId>,
    next_id: Option<ContactId>,
    search_fields: Vec<Field>,
    require_name: bool,
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}

impl Directory {
    pub fn new() -> Self {
        Self {
            contacts: HashMap::new(),
            order: Vec::new(),
            next_id: Some(ContactId::FIRST),
            search_fields: DEFAULT_SEARCH_FIELDS.to_vec(),
            require_name: false,
        }
    }

    /// Rebuild a directory from stored state.
    ///
    /// Records with id 0 or a repeated id are dropped (the first occurrence
    /// wins). The counter resumes at the larger of the stored counter and the
    /// highest id plus one, or is exhausted when the highest id is `u64::MAX`.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut directory = Self::new();
        let mut highest: Option<ContactId> = None;

        for contact in snapshot.contacts {
            let id = contact.id();
            if id.get() == 0 {
                warn!("dropping stored contact with id 0");
                continue;
            }
            if directory.contacts.contains_key(&id) {
                warn!(%id, "dropping stored contact with duplicate id");
                continue;
            }
            highest = highest.max(Some(id));
            directory.contacts.insert(id, contact);
        }

        let derived = match highest {
            Some(id) => id.next(),
            None => Some(ContactId::FIRST),
        };
        directory.next_id = match (derived, snapshot.next_id) {
            (Some(derived), Some(stored)) => Some(stored.max(derived)),
            (Some(derived), None) => Some(derived),
            (None, _) => {
                warn!("stored ids reach the end of the id space, creates will fail");
                None
            }
        };
        directory.resort();
        directory
    }

    /// Restrict search to `fields`. A set rejected by [`check_search_fields`]
    /// (including an empty one) keeps the defaults.
    pub fn with_search_fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        let mut chosen: Vec<Field> = Vec::new();
        for field in fields {
            if !chosen.contains(&field) {
                chosen.push(field);
            }
        }
        match check_search_fields(&chosen) {
            Ok(()) => self.search_fields = chosen,
            Err(e) => warn!(error = %e, "keeping default search fields"),
        }
        self
    }

    /// Reject creates that carry neither a given nor a family name.
    pub fn with_require_name(mut self, require_name: bool) -> Self {
        self.require_name = require_name;
        self
    }

    /// The current state in canonical order, ready to persist.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            contacts: self.list().into_iter().cloned().collect(),
            next_id: self.next_id,
        }
    }

    pub fn create(&mut self, fields: &ContactFields) -> Result<Contact> {
        if self.require_name && !fields.has_name() {
            return Err(AgendaError::Validation(
                "a contact needs a given or family name".to_string(),
            ));
        }

        let id = self.next_id.ok_or(AgendaError::IdSpaceExhausted)?;
        if self.contacts.contains_key(&id) {
            return Err(AgendaError::IdInUse(id));
        }

        let contact = Contact::from_fields(id, fields);
        self.contacts.insert(id, contact.clone());
        self.next_id = id.next();
        self.resort();

        debug!(%id, "created contact");
        Ok(contact)
    }

    /// Merge `patch` into the contact with `id`. Returns false if there is no
    /// such contact, in which case nothing changes.
    pub fn update(&mut self, id: ContactId, patch: &ContactFields) -> bool {
        let Some(contact) = self.contacts.get_mut(&id) else {
            return false;
        };
        if contact.apply(patch) {
            self.resort();
            debug!(%id, "updated contact");
        }
        true
    }

    pub fn delete(&mut self, id: ContactId) -> Option<Contact> {
        let removed = self.contacts.remove(&id)?;
        self.order.retain(|existing| *existing != id);
        debug!(%id, "deleted contact");
        Some(removed)
    }

    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.get(&id)
    }

    pub fn list(&self) -> Vec<&Contact> {
        self.order
            .iter()
            .filter_map(|id| self.contacts.get(id))
            .collect()
    }

    /// Contacts where the normalized query is a substring of at least one
    /// normalized search field. A blank query matches everything.
    pub fn search(&self, query: &str) -> Vec<&Contact> {
        let needle = normalize(query);
        if needle.is_empty() {
            return self.list();
        }

        self.list()
            .into_iter()
            .filter(|contact| {
                self.search_fields
                    .iter()
                    .any(|field| normalize(contact.field(*field)).contains(&needle))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// The id the next created contact will receive, `None` once exhausted.
    pub fn next_id(&self) -> Option<ContactId> {
        self.next_id
    }

    pub fn search_fields(&self) -> &[Field] {
        &self.search_fields
    }

    fn resort(&mut self) {
        let mut order: Vec<ContactId> = self.contacts.keys().copied().collect();
        order.sort_by_cached_key(|id| {
            let contact = &self.contacts[id];
            (
                normalize(&contact.family_name),
                normalize(&contact.given_name),
                *id,
            )
        });
        self.order = order;
    }
}
