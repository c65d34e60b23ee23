//! Key identity: SHA-256 over the raw key bytes.

use std::fmt;

use sha2::{Digest, Sha256};

/// Length of a [`KeyId`] in bytes.
pub const KEY_ID_LEN: usize = 32;

/// SHA-256 digest of a log's raw public key.
///
/// Used both to deduplicate logs and to order them. `Ord` compares the
/// big-endian byte value, which is the emission order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyId([u8; KEY_ID_LEN]);

impl KeyId {
    /// Compute the id of raw key bytes.
    pub fn of(raw_key: &[u8]) -> Self {
        let digest = Sha256::digest(raw_key);
        let mut bytes = [0u8; KEY_ID_LEN];
        bytes.copy_from_slice(&digest);
        Self(bytes)
    }

    /// Return the raw 32-byte representation.
    pub fn as_bytes(&self) -> &[u8; KEY_ID_LEN] {
        &self.0
    }

    /// Lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; KEY_ID_LEN]> for KeyId {
    fn from(bytes: [u8; KEY_ID_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyId({})", self.to_hex())
    }
}
