//! # blog-page
//!
//! Compiles a directory of markdown blog posts into one static HTML page.
//! Posts are listed newest first, each wrapped in an anchored `<article>`,
//! with a table of contents linking to them. Both are substituted into a
//! user-supplied HTML template.
//!
//! # Pipeline
//!
//! ```text
//! 1. Scan      blogs/*.md          →  Vec<Post>        (read, filter, reverse)
//! 2. Compile   raw body            →  footnotes + HTML (per post, in parallel)
//! 3. Assemble  posts + template    →  page             (contents, articles)
//! 4. Write     page                →  blogs.html
//! ```
//!
//! Steps 2 and 3 are pure functions, so most of the test suite runs without
//! touching the filesystem.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Lists the posts directory and reads post files |
//! | [`footnote`] | Pulls `[^N]: text` definition lines out of a post |
//! | [`markdown`] | Ordered substitution rules turning the markdown subset into HTML |
//! | [`slug`] | Filename → anchor id |
//! | [`assemble`] | Table of contents, articles, footnote scripts, template substitution |
//! | [`build`] | Runs the pipeline end to end |
//! | [`config`] | `blog.toml` loading, defaults, and validation |
//! | [`types`] | `Post` and `Footnote` |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Substitution Rules Over a Parser
//!
//! The markdown dialect is deliberately tiny and defined by what its rules
//! do, including their quirks. Keeping it as a list of regex rewrites applied
//! in order makes every edge case traceable to one rule. A real CommonMark
//! parser would render the existing posts differently.
//!
//! ## Footnotes Rendered Client-Side
//!
//! Footnote definitions are removed from the post body and emitted as
//! `addFootnote(slug, number, text)` calls. The page's own script decides how
//! to display them, so the generator stays out of layout.
//!
//! ## Trusted Input
//!
//! Posts are the author's own files. Compiled bodies and filenames are not
//! HTML-escaped, so raw HTML in a post is passed through on purpose.

pub mod assemble;
pub mod build;
pub mod config;
pub mod footnote;
pub mod markdown;
pub mod output;
pub mod scan;
pub mod slug;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
