//! Shared test utilities for the blog-page test suite.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let posts = scan(&tmp.path().join("blogs"), "_").unwrap();
//!
//! let hello = find_post(&posts, "2023-hello-world.md");
//! assert!(hello.raw_body.contains("## Hello"));
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::types::Post;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write a text file into `dir`. Panics on I/O failure.
pub fn write_post(dir: &Path, name: &str, body: &str) {
    std::fs::write(dir.join(name), body)
        .unwrap_or_else(|e| panic!("writing {name} in {}: {e}", dir.display()));
}

/// File names in `dir` ending with `suffix`, in raw directory listing order.
pub fn listing_order(dir: &Path, suffix: &str) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(suffix))
        .collect()
}

// =========================================================================
// Post lookups, panicking with a clear message on miss
// =========================================================================

/// Find a post by filename. Panics if not found.
pub fn find_post<'a>(posts: &'a [Post], filename: &str) -> &'a Post {
    posts
        .iter()
        .find(|p| p.filename == filename)
        .unwrap_or_else(|| {
            let names = filenames(posts);
            panic!("post '{filename}' not found. Available: {names:?}")
        })
}

/// All post filenames in order.
pub fn filenames(posts: &[Post]) -> Vec<&str> {
    posts.iter().map(|p| p.filename.as_str()).collect()
}
