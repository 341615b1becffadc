//! File System Implementations
//!
//! Local disk access and home directory resolution.

mod home;
mod local;

pub use home::{folio_home_dir, FOLIO_TEST_HOME_VAR};
pub use local::{atomic_write, expand_home, LocalFs};
