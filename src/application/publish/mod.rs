//! Publish Use Case
//!
//! Pushes rendered pages to the connected GitHub repository and keeps the
//! publish ledger that answers "what changed since the last push".

mod options;
mod result;
mod use_case;


pub use options::PublishOptions;
pub use result::{PagePublish, PageStatus, PublishReport, StatusKind};
pub use use_case::{PublishUseCase, INDEX_PATH};
