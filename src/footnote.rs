//! Footnote definition extraction.
//!
//! A definition is a whole line of the form `[^N]: text`. Definitions are cut
//! out of the body before compilation and handed to the page as
//! `addFootnote` calls, so the markdown compiler never sees them.
//!
//! ```text
//! text                 text
//! [^1]: a note    →    more            + [Footnote { number: 1, text: "a note" }]
//! more
//! ```
//!
//! Extraction is deliberately permissive: numbers may repeat, skip, or have
//! no matching `[^N]` marker in the body.

use crate::types::Footnote;
use regex::Regex;
use std::sync::LazyLock;

static DEFINITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[\^([0-9]+)\]:\s*(.*)$").expect("footnote definition pattern is valid")
});

/// Split `text` into the body without definition lines and the definitions
/// themselves, in the order they appear.
///
/// Removed lines take their line terminator with them. A marker that is not
/// at the very start of a line is ordinary text.
pub fn extract_footnotes(text: &str) -> (String, Vec<Footnote>) {
    let mut cleaned = String::with_capacity(text.len());
    let mut footnotes = Vec::new();

    for line in text.split_inclusive('\n') {
        match parse_definition(strip_terminator(line)) {
            Some(footnote) => footnotes.push(footnote),
            None => cleaned.push_str(line),
        }
    }

    (cleaned, footnotes)
}

fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

fn parse_definition(line: &str) -> Option<Footnote> {
    let caps = DEFINITION.captures(line)?;
    // Numbers too large for u64 are left in the body as plain text
    let number = caps[1].parse().ok()?;
    Some(Footnote {
        number,
        text: caps[2].trim().to_string(),
    })
}
