//! # Agenda Architecture
//!
//! Agenda is a **contact directory library** with a command-line client on
//! top. Everything from `api.rs` inward is UI-agnostic: it takes Rust values,
//! returns Rust values, and never prints or exits.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prompts, formats output                │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Opens the directory from the store (fail-open)           │
//! │  - Saves after every mutation, retrying once                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One `run` per operation, returns `CmdResult`             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Directory (directory.rs)                                   │
//! │  - Id assignment, canonical order, accent-blind search      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - ContactStore trait, whole-directory JSON snapshots       │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity and Order
//!
//! Contacts get a [`model::ContactId`] from a monotonic counter that is
//! persisted with the contacts, so ids are never reused, not even after the
//! highest one is deleted. Listings are always sorted by family name, then
//! given name, compared after [`normalize::normalize`], with the id breaking
//! ties.
//!
//! ## Module Overview
//!
//! - [`api`]: Facade owning the directory and the store
//! - [`cards`]: vCard-style text to contact fields, for import
//! - [`commands`]: Per-operation logic
//! - [`config`]: Layered configuration (env, `agenda.toml`, defaults)
//! - [`directory`]: The in-memory contact collection
//! - [`error`]: Error types
//! - [`init`]: Data directory resolution and context setup
//! - [`model`]: Contact, ContactId, Field, ContactFields
//! - [`normalize`]: Case and accent folding for sort and search
//! - [`store`]: Persistence

pub mod api;
pub mod cards;
pub mod commands;
pub mod config;
pub mod directory;
pub mod error;
pub mod init;
pub mod model;
pub mod normalize;
pub mod store;
