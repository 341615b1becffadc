//! Output Rendering
//!
//! Text renderings shared by the command handlers. JSON output is produced by
//! the handlers themselves.

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::application::{MigrationReport, PageStatus, PublishReport, StatusKind, SyncReport};
use crate::domain::entities::Page;
use crate::domain::value_objects::PageId;

/// Icons for output rendering
struct Icons {
    check: &'static str,
    write: &'static str,
    skip: &'static str,
    warn: &'static str,
}

const ICONS: Icons = Icons {
    check: "✓",
    write: "→",
    skip: "○",
    warn: "[!]",
};

/// `id  title  (path)`
pub fn page_line(page: &Page) -> String {
    format!("{}  {}  ({})", page.id, page.title, page.path)
}

/// Indented outline of every page, roots first, children in stored order
pub fn page_tree(pages: &[Page]) -> String {
    let by_id: HashMap<&PageId, &Page> = pages.iter().map(|p| (&p.id, p)).collect();
    let mut out = String::new();

    let mut stack: Vec<(&Page, usize)> = pages
        .iter()
        .filter(|p| p.is_root())
        .rev()
        .map(|p| (p, 0))
        .collect();

    while let Some((page, depth)) = stack.pop() {
        let _ = writeln!(out, "{}{}", "  ".repeat(depth), page_line(page));
        for child in page.children.iter().rev() {
            if let Some(child) = by_id.get(child) {
                stack.push((*child, depth + 1));
            }
        }
    }
    out
}

pub fn publish_report(report: &PublishReport, verbose: u8) -> String {
    let mut out = String::new();

    if !report.has_changes() {
        let _ = writeln!(out, "{} Already up-to-date", ICONS.check);
        let _ = writeln!(out, "  {} pages unchanged", report.unchanged.len());
    } else if report.dry_run {
        let _ = writeln!(out, "Would publish ({}):", report.published.len());
        for path in &report.published {
            let _ = writeln!(out, "  {} {}", ICONS.write, path);
        }
    } else {
        let _ = writeln!(out, "{} Publish complete", ICONS.check);
        if let Some(commit) = &report.commit {
            let _ = writeln!(out, "  Commit: {}", commit);
        }
        let _ = writeln!(out, "  Published ({}):", report.published.len());
        for path in &report.published {
            let _ = writeln!(out, "    {} {}", ICONS.write, path);
        }
    }

    if verbose > 0 && report.has_changes() && !report.unchanged.is_empty() {
        let _ = writeln!(out, "  Unchanged ({}):", report.unchanged.len());
        for path in &report.unchanged {
            let _ = writeln!(out, "    {} {}", ICONS.skip, path);
        }
    }

    for path in &report.reserved {
        let _ = writeln!(
            out,
            "  {} skipped {}: the site index is maintained separately",
            ICONS.warn, path
        );
    }
    for path in &report.rejected {
        let _ = writeln!(
            out,
            "  {} skipped {}: not a plain file name",
            ICONS.warn, path
        );
    }
    out
}

pub fn status_lines(changes: &[PageStatus]) -> String {
    if changes.is_empty() {
        return format!("{} Nothing to publish\n", ICONS.check);
    }
    let mut out = String::new();
    for change in changes {
        let marker = match change.kind {
            StatusKind::New => "new",
            StatusKind::Modified => "modified",
        };
        let _ = writeln!(out, "  {:<9} {}  ({})", marker, change.path, change.id);
    }
    out
}

pub fn sync_report(report: &SyncReport) -> String {
    format!(
        "{} Sync complete: {} added, {} already known, {} skipped\n",
        ICONS.check,
        report.added.len(),
        report.already_known,
        report.skipped
    )
}

pub fn migration_report(report: &MigrationReport) -> String {
    if report.is_empty() {
        return format!("{} Nothing to migrate\n", ICONS.check);
    }
    let mut out = format!("{} Migration complete\n", ICONS.check);
    let _ = writeln!(out, "  markdown editor pages: {}", report.cms_pages);
    let _ = writeln!(out, "  block editor pages:    {}", report.edit_pages);
    if report.skipped_pages > 0 {
        let _ = writeln!(out, "  skipped (path taken):  {}", report.skipped_pages);
    }
    if let Some(from) = &report.github_config_from {
        let _ = writeln!(out, "  GitHub connection from '{}'", from);
    }
    for key in &report.failed_keys {
        let _ = writeln!(out, "  {} '{}' could not be read and was kept", ICONS.warn, key);
    }
    out
}
