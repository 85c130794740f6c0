//! SHA-256 passphrase digests.
//!
//! The digest is `SHA-256(UTF-8(passphrase))` rendered as 64 lowercase
//! hex characters, which is exactly what the credential file stores.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Hash a passphrase into its lowercase hex digest.
///
/// The empty string is hashed like any other input.
pub fn passphrase_digest(passphrase: &str) -> String {
    hex::encode(Sha256::digest(passphrase.as_bytes()))
}

/// Compare two hex digests in constant time.
///
/// Digests of different lengths never match.
pub fn digests_match(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
