//! Starter pages for an empty store
//!
//! A fresh portfolio gets a handful of outline pages so both editors have
//! something to open. Nothing is written when pages already exist.

use tracing::info;

use crate::application::storage::{NewPage, SharedPageStorage};
use crate::domain::entities::Page;
use crate::domain::ports::KeyValueStore;
use crate::error::FolioResult;

const TEACHING: &str = "# Current Teaching

## Courses

List the courses you teach this term, one heading each.

## Approach

Describe how you teach and what learners can expect.

## Materials

Link slides, exercises and workshop notes you can share.
";

const RESOURCES: &str = "# Recommended Resources

## Books

- Title, author: why it is worth reading

## Talks and Channels

- Name: what to watch first
";

const PROJECTS: &str = "# Projects

## Current

Describe what you are working on and who it is for.

## Past

Short notes on finished projects, with links where they exist.
";

const PODCAST: &str = "# Podcast

Introduce the show and where to listen.

## Episodes

- Episode 1: topic and guest
";

fn about(owner: Option<&str>) -> String {
    format!(
        "# {}

## Background

Write a short introduction: where you studied, where you teach and what you build.

## Teaching Philosophy

What shapes the way you teach.

## Contact

How people can reach you.
",
        owner.unwrap_or("About Me")
    )
}

/// Create the starter pages when the store is empty.
///
/// Returns the created pages, or nothing when any page already exists.
pub fn seed_starter_pages<S: KeyValueStore>(
    storage: &mut SharedPageStorage<S>,
    owner: Option<&str>,
) -> FolioResult<Vec<Page>> {
    if !storage.pages().is_empty() {
        info!(existing = storage.pages().len(), "store has pages, not seeding");
        return Ok(Vec::new());
    }

    let starters = [
        ("About", about(owner)),
        ("Current Teaching", TEACHING.to_string()),
        ("Recommended Resources", RESOURCES.to_string()),
        ("Projects", PROJECTS.to_string()),
        ("Podcast", PODCAST.to_string()),
    ];

    let mut created = Vec::with_capacity(starters.len());
    for (title, markdown) in starters {
        created.push(storage.create_page(NewPage::titled(title).markdown(markdown))?);
    }
    info!(count = created.len(), "seeded starter pages");
    Ok(created)
}
