//! Key-value store implementations

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
