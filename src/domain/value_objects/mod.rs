//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod editor_source;
mod hash;
mod page_id;
pub mod slug;

pub use editor_source::EditorSource;
pub use hash::ContentHash;
pub use page_id::PageId;
pub use slug::{
    generate_path, generate_slug, is_page_file_name, title_from_filename, to_title_case,
};
