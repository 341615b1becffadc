//! Slug and path derivation
//!
//! Every function here is pure: the same title always yields the same slug
//! and path, independent of store contents.

use std::path::{Component, Path};

/// Fallback stem when a title has no `[a-z0-9]` characters at all
const EMPTY_SLUG_STEM: &str = "untitled";

/// Generate a URL-safe slug from a title.
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]` into a
/// single `-`, and strips one leading and one trailing `-`.
pub fn generate_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut in_gap = false;

    for c in lowered.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
            in_gap = false;
        } else if !in_gap {
            slug.push('-');
            in_gap = true;
        }
    }

    let slug = slug.strip_prefix('-').unwrap_or(&slug);
    let slug = slug.strip_suffix('-').unwrap_or(slug);
    slug.to_string()
}

/// Generate the published file path (`<slug>.html`) for a title.
pub fn generate_path(title: &str) -> String {
    let slug = generate_slug(title);
    if slug.is_empty() {
        format!("{}.html", EMPTY_SLUG_STEM)
    } else {
        format!("{}.html", slug)
    }
}

/// Uppercase the first ASCII word character of every word.
///
/// Word characters are ASCII letters, digits and `_`; anything else ends a word.
pub fn to_title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_word = false;

    for c in s.chars() {
        let is_word = c.is_ascii_alphanumeric() || c == '_';
        if is_word && !prev_is_word {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        prev_is_word = is_word;
    }

    out
}

/// Derive a display title from a published file name (`my-page.html` → `My Page`).
pub fn title_from_filename(name: &str) -> String {
    let stem = name.replacen(".html", "", 1);
    to_title_case(&stem.replace('-', " "))
}

/// True when `path` is a single plain file name, so joining it onto a
/// directory never leaves that directory.
pub fn is_page_file_name(path: &str) -> bool {
    if path.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(path).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
