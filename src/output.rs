//! CLI output formatting.
//!
//! Each post is shown by its position on the page and its filename, with the
//! derived anchor and footnote count as indented context lines:
//!
//! ```text
//! Posts
//! 001 2024-haskell-notes.md
//!     Anchor: #post-2024-haskell-notes
//!     Footnotes: 2
//! 002 Reading List.md
//!     Anchor: #reading-list
//!
//! Wrote blogs.html with 2 posts.
//! ```
//!
//! `format_*` functions are pure and return lines; `print_*` wrappers write
//! them to stdout.

use crate::types::Post;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Format the post inventory in page order.
pub fn format_posts(posts: &[Post]) -> Vec<String> {
    let mut lines = vec!["Posts".to_string()];
    if posts.is_empty() {
        lines.push("    (none)".to_string());
        return lines;
    }

    for (i, post) in posts.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), post.filename));
        lines.push(format!("    Anchor: #{}", post.slug()));
        if !post.footnotes.is_empty() {
            lines.push(format!("    Footnotes: {}", post.footnotes.len()));
        }
    }
    lines
}

/// Format the closing line of a build.
pub fn format_written(output: &Path, post_count: usize) -> String {
    format!(
        "Wrote {} with {}.",
        output.display(),
        plural(post_count, "post")
    )
}

/// Print the post inventory to stdout.
pub fn print_posts(posts: &[Post]) {
    for line in format_posts(posts) {
        println!("{}", line);
    }
}

/// Print the closing line of a build to stdout.
pub fn print_written(output: &Path, post_count: usize) {
    println!("{}", format_written(output, post_count));
}
