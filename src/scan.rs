//! Post discovery.
//!
//! First step of the build. Lists the posts directory, keeps markdown files,
//! and reads each one into a [`Post`].
//!
//! ## Directory Structure
//!
//! ```text
//! blogs/
//! ├── 2023-hello.md         # Post
//! ├── 2024-intro.md         # Post
//! ├── _draft.md             # Skipped (skip prefix)
//! ├── notes.txt             # Skipped (not .md)
//! └── images/               # Skipped (directories are not descended)
//! ```
//!
//! ## Ordering
//!
//! Posts come back in the *reverse* of the directory listing order, so the
//! last listed file leads the page. Listing order is whatever the platform
//! returns; no sorting by name or date happens here.
//!
//! ## Encoding
//!
//! Files are decoded as UTF-8. Invalid byte sequences are replaced with
//! U+FFFD rather than failing the build, and a warning names the file.

use crate::slug::MARKDOWN_SUFFIX;
use crate::types::Post;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("posts directory not found: {0}")]
    MissingDirectory(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),
}

/// Whether a directory entry name is a post source file.
///
/// The name needs a non-empty stem before `.md`; a file named just `.md` has
/// no extension and is not a post.
pub fn is_post_file(file_name: &str, skip_prefix: &str) -> bool {
    let has_stem = file_name
        .strip_suffix(MARKDOWN_SUFFIX)
        .is_some_and(|stem| !stem.is_empty());
    has_stem && (skip_prefix.is_empty() || !file_name.starts_with(skip_prefix))
}

/// Read every post in `dir`, newest (last listed) first.
pub fn scan(dir: &Path, skip_prefix: &str) -> Result<Vec<Post>, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::MissingDirectory(dir.to_path_buf()));
    }

    let mut posts = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if !names_post(&err, skip_prefix) => {
                tracing::debug!(error = %err, "skipping unreadable non-post entry");
                continue;
            }
            Err(err) => return Err(err.into()),
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy();
        if !is_post_file(&file_name, skip_prefix) {
            tracing::debug!(file = %file_name, "skipping non-post file");
            continue;
        }
        posts.push(read_post(entry.path(), &file_name)?);
    }

    posts.reverse();
    Ok(posts)
}

/// Whether a walk error concerns an entry that would have been a post.
///
/// Errors on `dir` itself, or with no path, count as posts so they stay fatal.
fn names_post(err: &walkdir::Error, skip_prefix: &str) -> bool {
    err.depth() == 0
        || err
            .path()
            .and_then(Path::file_name)
            .is_none_or(|name| is_post_file(&name.to_string_lossy(), skip_prefix))
}

/// Read a text file, replacing invalid UTF-8 instead of failing.
pub fn read_lossy(path: &Path) -> std::io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                "invalid UTF-8, replacing undecodable bytes"
            );
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    })
}

fn read_post(path: &Path, file_name: &str) -> Result<Post, ScanError> {
    let body = read_lossy(path)?;
    Ok(Post::new(file_name, body))
}
