//! Vault module — local item storage behind a password gate.
//!
//! This module provides:
//! - `StoredItem` and the closed `Category` set (`item`)
//! - Credential and catalog file formats (`format`)
//! - The passphrase gate (`gate`)
//! - Importing attachment files into vault storage (`attachments`)
//! - The persisted, searchable item list (`catalog`)

pub mod attachments;
pub mod catalog;
pub mod format;
pub mod gate;
pub mod item;

// Re-export the most commonly used items.
pub use attachments::AttachmentImporter;
pub use catalog::VaultCatalog;
pub use gate::HashGate;
pub use item::{Category, ContentKind, StoredItem};
