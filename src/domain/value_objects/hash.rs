//! Content Hash Value Object
//!
//! Hash of rendered page HTML, used by the publish ledger to tell which pages
//! changed since the last push.

use std::fmt;

use serde::{Deserialize, Serialize};

/// `sha256:`-prefixed hex digest
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(String);

impl ContentHash {
    const PREFIX: &'static str = "sha256:";

    /// SHA-256 of `content`
    pub fn from_content(content: &str) -> Self {
        use sha2::{Digest, Sha256};
        let hash = Sha256::digest(content.as_bytes());
        Self(format!("{}{:x}", Self::PREFIX, hash))
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
