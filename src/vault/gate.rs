//! Password gate in front of the vault.
//!
//! `HashGate` owns the single credential file. It never stores the
//! passphrase itself, only its SHA-256 digest (see `crypto::digest`).

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::crypto::{digests_match, passphrase_digest};
use crate::errors::{NoteVaultError, Result};

use super::format;

/// Handle on the credential record at a fixed path.
#[derive(Debug, Clone)]
pub struct HashGate {
    path: PathBuf,
}

impl HashGate {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path to the credential file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `true` iff a readable credential record exists.
    ///
    /// A missing or unreadable record both count as "no credential" so
    /// the front end falls through to first-run set-up.
    pub fn has_credential(&self) -> bool {
        self.stored_digest().is_some()
    }

    /// Hash `passphrase` and store it as the sole credential record,
    /// replacing any previous one.
    pub fn set_credential(&self, passphrase: &str) -> Result<()> {
        let digest = passphrase_digest(passphrase);
        format::write_credential(&self.path, &digest)?;
        debug!(path = %self.path.display(), "credential written");
        Ok(())
    }

    /// Store the first credential, refusing if one already exists.
    pub fn initialize(&self, passphrase: &str) -> Result<()> {
        if self.has_credential() {
            return Err(NoteVaultError::CredentialAlreadyExists(self.path.clone()));
        }
        self.set_credential(passphrase)
    }

    /// Check `passphrase` against the stored digest.
    ///
    /// `false` on mismatch, on empty input, and when no credential is
    /// stored; the caller cannot tell these apart.
    pub fn verify(&self, passphrase: &str) -> bool {
        if passphrase.is_empty() {
            return false;
        }
        match self.stored_digest() {
            Some(stored) => digests_match(&passphrase_digest(passphrase), &stored),
            None => false,
        }
    }

    /// Verify, mapping a mismatch to `IncorrectPassword`.
    pub fn unlock(&self, passphrase: &str) -> Result<()> {
        if self.verify(passphrase) {
            Ok(())
        } else {
            Err(NoteVaultError::IncorrectPassword)
        }
    }

    fn stored_digest(&self) -> Option<String> {
        match format::read_credential(&self.path) {
            Ok(digest) => digest,
            Err(e) => {
                warn!("ignoring unreadable credential: {e}");
                None
            }
        }
    }
}
