//! Anchor ids derived from post filenames.
//!
//! Every post on the page is wrapped in an element whose `id` is its slug, and
//! the table of contents links to `#<slug>`. Slugs are recomputed from the
//! filename wherever they are needed, so [`slug`] must be pure and stable.
//!
//! ## Rules
//!
//! - `.md` suffix dropped, everything lowercased
//! - each run of characters outside `[a-z0-9]` collapses to a single `-`
//! - no leading or trailing `-`
//! - a leading digit gets the `post-` prefix, since HTML ids that start with
//!   a digit can't be used as plain CSS selectors
//!
//! ```text
//! 2024-intro.md        → post-2024-intro
//! Hello, World!.md     → hello-world
//! _Draft__Notes.md     → draft-notes
//! ```
//!
//! Two filenames can collapse to the same slug (`A b.md` and `a-b.md`). No
//! attempt is made to disambiguate them; both anchors are emitted and the
//! browser resolves the link to whichever it finds first.

use regex::Regex;
use std::sync::LazyLock;

/// Source file suffix removed before slugifying.
pub const MARKDOWN_SUFFIX: &str = ".md";

/// Prefix word used when a slug would otherwise start with a digit or be empty.
pub const SLUG_PREFIX: &str = "post";

static NON_SLUG_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("slug separator pattern is valid"));

/// Derive the anchor id for a post filename.
pub fn slug(filename: &str) -> String {
    let stem = filename.strip_suffix(MARKDOWN_SUFFIX).unwrap_or(filename);
    let lowered = stem.to_lowercase();
    let dashed = NON_SLUG_RUN.replace_all(&lowered, "-");
    let trimmed = dashed.trim_matches('-');

    match trimmed.chars().next() {
        None => SLUG_PREFIX.to_string(),
        Some(c) if c.is_ascii_digit() => format!("{SLUG_PREFIX}-{trimmed}"),
        Some(_) => trimmed.to_string(),
    }
}
