//! Domain Services
//!
//! Stateless logic over entities:
//! - `render` / `blocks` - page and index HTML
//! - `sync_filter` - which remote files are pages

pub mod blocks;
pub mod render;
pub mod sync_filter;

pub use blocks::{block_to_html, document_to_html};
pub use render::{
    escape_html, markdown_to_html, page_markdown, render_body, render_index, render_page,
    SiteMeta,
};
pub use sync_filter::SyncFilter;
