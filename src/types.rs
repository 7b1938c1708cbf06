//! Shared types passed between the scan, compile, and assemble steps.

use crate::footnote::extract_footnotes;
use crate::markdown::compile;
use crate::slug::slug;

/// A footnote definition pulled out of a post body.
///
/// `number` is whatever the author wrote in `[^N]:`. It is not checked for
/// uniqueness or against the markers used in the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footnote {
    pub number: u64,
    pub text: String,
}

/// One blog post, identified by its source filename.
///
/// A freshly scanned post only carries `raw_body`. [`Post::compiled`]
/// produces the finished value with footnotes and HTML filled in; posts are
/// never modified after that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Filename including extension, e.g. `2024-intro.md`
    pub filename: String,
    /// Source text as read from disk (invalid UTF-8 already replaced)
    pub raw_body: String,
    /// Footnote definitions in source order
    pub footnotes: Vec<Footnote>,
    /// HTML fragment produced by the markdown compiler
    pub compiled_body: String,
}

impl Post {
    pub fn new(filename: impl Into<String>, raw_body: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            raw_body: raw_body.into(),
            footnotes: Vec::new(),
            compiled_body: String::new(),
        }
    }

    /// Extract footnotes from the raw body and compile what remains.
    pub fn compiled(self) -> Self {
        let (cleaned, footnotes) = extract_footnotes(&self.raw_body);
        let compiled_body = compile(&cleaned);
        tracing::debug!(
            filename = %self.filename,
            footnotes = footnotes.len(),
            "compiled post"
        );
        Self {
            footnotes,
            compiled_body,
            ..self
        }
    }

    pub fn slug(&self) -> String {
        slug(&self.filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_post_is_uncompiled() {
        let post = Post::new("a.md", "hello\n");
        assert!(post.footnotes.is_empty());
        assert!(post.compiled_body.is_empty());
    }

    #[test]
    fn compiled_fills_footnotes_and_body() {
        let post = Post::new("2024-intro.md", "**Hi**[^1]\n[^1]: a note\n").compiled();
        assert_eq!(post.compiled_body, "<strong>Hi</strong>[^1]<br>");
        assert_eq!(
            post.footnotes,
            vec![Footnote {
                number: 1,
                text: "a note".to_string()
            }]
        );
        assert_eq!(post.raw_body, "**Hi**[^1]\n[^1]: a note\n");
    }

    #[test]
    fn slug_comes_from_filename() {
        assert_eq!(Post::new("2024-intro.md", "").slug(), "post-2024-intro");
    }
}
