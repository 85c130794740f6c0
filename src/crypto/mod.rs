//! Cryptographic primitives for NoteVault.
//!
//! The vault stores no encrypted content; the only primitive is the
//! one-way passphrase digest used by the unlock gate (`digest`).

pub mod digest;

pub use digest::{digests_match, passphrase_digest};
