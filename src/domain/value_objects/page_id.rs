//! Page identifier value object
//!
//! Ids look like `lz3k9q0a4f8wq1x2c7`: the base36 millisecond timestamp
//! followed by a random base36 suffix. They are opaque everywhere else.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Minimum length of the random part of a generated id
const RANDOM_SUFFIX_LEN: usize = 10;

/// Opaque page identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    /// Generate a fresh id from a millisecond timestamp and a random source
    pub fn generate<R: Rng + ?Sized>(now_millis: u64, rng: &mut R) -> Self {
        let mut id = to_base36(now_millis);
        let mut suffix = String::new();
        while suffix.len() < RANDOM_SUFFIX_LEN {
            suffix.push_str(&to_base36(rng.random::<u64>()));
        }
        id.push_str(&suffix);
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for PageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Lowercase base36 rendering of an unsigned integer
pub(crate) fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8_lossy(&buf).into_owned()
}
