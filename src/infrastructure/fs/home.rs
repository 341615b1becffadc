//! Home directory resolution with test isolation support.
//!
//! On Windows, `dirs::home_dir()` uses the system API rather than environment
//! variables, so setting `HOME` in tests has no effect there.
//! `folio_home_dir()`:
//! 1. Checks `FOLIO_TEST_HOME` first (for test isolation)
//! 2. Falls back to `dirs::home_dir()` for production use
//!
//! Everything Folio keeps under the home directory (default store location,
//! user config) resolves through this function.

use std::path::PathBuf;

/// Environment variable for test isolation of home directory.
pub const FOLIO_TEST_HOME_VAR: &str = "FOLIO_TEST_HOME";

/// Get the home directory for Folio-internal paths.
///
/// # Example
///
/// ```
/// use folio::infrastructure::fs::folio_home_dir;
///
/// if let Some(home) = folio_home_dir() {
///     let store = home.join(".folio/store");
/// }
/// ```
pub fn folio_home_dir() -> Option<PathBuf> {
    std::env::var(FOLIO_TEST_HOME_VAR)
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
}
