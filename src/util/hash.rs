//! Hashing utilities for content hashes and package ids.

use sha2::{Digest, Sha256};

/// Compute SHA256 hash of a string.
pub fn sha256_str(s: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    hex::encode(hasher.finalize())
}

/// A hasher for building fingerprints from multiple fields.
#[derive(Default)]
pub struct Fingerprint {
    hasher: Sha256,
}

impl Fingerprint {
    pub fn new() -> Self {
        Fingerprint {
            hasher: Sha256::new(),
        }
    }

    pub fn update_str(&mut self, s: &str) -> &mut Self {
        self.hasher.update(s.as_bytes());
        self.hasher.update(b"\0");
        self
    }

    /// Add a `key=value` field.
    pub fn update_field(&mut self, key: &str, value: &str) -> &mut Self {
        self.hasher.update(key.as_bytes());
        self.hasher.update(b"=");
        self.update_str(value)
    }

    /// Add an optional field; absent and empty values hash differently.
    pub fn update_opt(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        match value {
            Some(v) => {
                self.hasher.update(b"\x01");
                self.update_field(key, v)
            }
            None => {
                self.hasher.update(b"\x00");
                self.update_str(key)
            }
        }
    }

    pub fn finish(self) -> String {
        hex::encode(self.hasher.finalize())
    }
}
