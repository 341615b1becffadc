//! Parent/child link maintenance
//!
//! Pages carry both `parent_id` and an ordered `children` list. `parent_id`
//! is authoritative; `children` is repaired to match it.

use std::collections::{HashMap, HashSet};

use crate::domain::entities::Page;
use crate::domain::value_objects::PageId;

/// Give every later holder of an already used id a fresh one from `fresh`.
///
/// The first page keeps the id, so parent links keep pointing at it.
/// Returns the number of pages that got a new id.
pub(crate) fn dedupe_ids(pages: &mut [Page], mut fresh: impl FnMut() -> PageId) -> usize {
    let mut taken: HashSet<PageId> = pages.iter().map(|p| p.id.clone()).collect();
    let mut seen = HashSet::new();
    let mut renamed = 0;

    for page in pages.iter_mut() {
        if seen.insert(page.id.clone()) {
            continue;
        }
        let id = loop {
            let candidate = fresh();
            if taken.insert(candidate.clone()) {
                break candidate;
            }
        };
        seen.insert(id.clone());
        page.id = id;
        renamed += 1;
    }
    renamed
}

/// Make the tree consistent:
/// - parents that are missing, self, or part of a cycle are cleared
/// - every `children` list holds exactly the pages whose parent is the owner,
///   keeping the existing order and appending missing children in page order
///
/// Returns the number of links that were changed.
pub(crate) fn repair_tree(pages: &mut [Page]) -> usize {
    let mut changes = 0;
    let index: HashMap<PageId, usize> = pages
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id.clone(), i))
        .collect();

    for page in pages.iter_mut() {
        let dangling = match &page.parent_id {
            Some(parent) => parent == &page.id || !index.contains_key(parent),
            None => false,
        };
        if dangling {
            page.parent_id = None;
            changes += 1;
        }
    }

    for start in 0..pages.len() {
        let mut seen = HashSet::from([start]);
        let mut current = start;
        while let Some(parent) = pages[current].parent_id.clone() {
            let Some(&next) = index.get(&parent) else {
                break;
            };
            if !seen.insert(next) {
                pages[current].parent_id = None;
                changes += 1;
                break;
            }
            current = next;
        }
    }

    let parent_of: HashMap<PageId, Option<PageId>> = pages
        .iter()
        .map(|p| (p.id.clone(), p.parent_id.clone()))
        .collect();

    for page in pages.iter_mut() {
        let before = page.children.len();
        let mut kept = HashSet::new();
        let owner = page.id.clone();
        page.children.retain(|child| {
            parent_of.get(child) == Some(&Some(owner.clone())) && kept.insert(child.clone())
        });
        changes += before - page.children.len();
    }

    let links: Vec<(PageId, usize)> = pages
        .iter()
        .filter_map(|p| {
            p.parent_id
                .as_ref()
                .and_then(|parent| index.get(parent))
                .map(|&i| (p.id.clone(), i))
        })
        .collect();

    for (child, parent_idx) in links {
        let children = &mut pages[parent_idx].children;
        if !children.contains(&child) {
            children.push(child);
            changes += 1;
        }
    }

    changes
}

/// True when `candidate` is `ancestor` or sits anywhere below it
pub(crate) fn is_descendant_or_self(pages: &[Page], ancestor: &PageId, candidate: &PageId) -> bool {
    let mut current = Some(candidate.clone());
    let mut steps = 0;
    while let Some(id) = current {
        if &id == ancestor {
            return true;
        }
        steps += 1;
        if steps > pages.len() {
            return false;
        }
        current = pages
            .iter()
            .find(|p| p.id == id)
            .and_then(|p| p.parent_id.clone());
    }
    false
}

/// Ids are unique and the tree is what `repair_tree` would leave
pub(crate) fn is_consistent(pages: &[Page]) -> bool {
    let mut ids = HashSet::new();
    if !pages.iter().all(|p| ids.insert(&p.id)) {
        return false;
    }
    let mut copy = pages.to_vec();
    repair_tree(&mut copy) == 0
}
