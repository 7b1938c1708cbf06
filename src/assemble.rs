//! Page assembly.
//!
//! Turns compiled posts into the two pieces of generated HTML and substitutes
//! them into the template:
//!
//! - **Contents**: one `<a href='#slug'>- filename</a>` per post, joined by `<br>`
//! - **Body**: one `<article id="slug">` per post, joined by `<hr>`
//!
//! The body is substituted first and the contents second, each over the whole
//! text produced so far. A post that quotes the contents token therefore gets
//! the contents list at that spot too.
//!
//! ## Footnotes
//!
//! A post with footnotes gets a trailing script inside its article that
//! registers each one once the document has loaded:
//!
//! ```html
//! <script>document.addEventListener('DOMContentLoaded', () => {
//! addFootnote("post-2024-intro", 1, "a note");
//! addFootnote("post-2024-intro", 2, "another");
//! });</script>
//! ```
//!
//! `addFootnote` is not defined here; the template is expected to load a
//! script that provides it. Arguments are written as JSON string literals,
//! which are valid JavaScript string literals.
//!
//! Articles are built with maud. Compiled post bodies and the script are
//! inserted pre-escaped, since the markdown compiler output is already HTML.
//! Contents entries are plain text like the compiler's own links: filenames
//! are written as-is, in single-quoted `href`s.

use crate::config::TemplateConfig;
use crate::types::{Footnote, Post};
use maud::{Markup, PreEscaped, html};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssembleError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Separator placed between consecutive articles.
pub const ARTICLE_SEPARATOR: &str = "\n<hr>\n";

/// Separator placed between table of contents entries.
pub const CONTENTS_SEPARATOR: &str = "<br>";

/// Build the table of contents: one link per post, in page order.
pub fn render_contents(posts: &[Post]) -> String {
    posts
        .iter()
        .map(render_contents_entry)
        .collect::<Vec<_>>()
        .join(CONTENTS_SEPARATOR)
}

fn render_contents_entry(post: &Post) -> String {
    format!("<a href='#{}'>- {}</a>", post.slug(), post.filename)
}

/// Build the footnote registration script body for one post.
///
/// Returns `None` when the post has no footnotes.
pub fn footnote_script(
    slug: &str,
    footnotes: &[Footnote],
) -> Result<Option<String>, AssembleError> {
    if footnotes.is_empty() {
        return Ok(None);
    }

    let slug_literal = serde_json::to_string(slug)?;
    let calls = footnotes
        .iter()
        .map(|footnote| {
            Ok(format!(
                "addFootnote({}, {}, {});",
                slug_literal,
                footnote.number,
                serde_json::to_string(&footnote.text)?
            ))
        })
        .collect::<Result<Vec<_>, AssembleError>>()?;

    Ok(Some(format!(
        "document.addEventListener('DOMContentLoaded', () => {{\n{}\n}});",
        calls.join("\n")
    )))
}

/// Wrap a compiled post in its anchored article.
pub fn render_article(post: &Post) -> Result<Markup, AssembleError> {
    let slug = post.slug();
    let script = footnote_script(&slug, &post.footnotes)?;

    Ok(html! {
        article id=(slug) {
            "\n"
            (PreEscaped(&post.compiled_body))
            "\n"
            @if let Some(js) = script {
                script { (PreEscaped(js)) }
                "\n"
            }
        }
    })
}

/// Render every article, joined by horizontal rules.
pub fn render_body(posts: &[Post]) -> Result<String, AssembleError> {
    let articles = posts
        .iter()
        .map(|post| render_article(post).map(Markup::into_string))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(articles.join(ARTICLE_SEPARATOR))
}

/// Replace each token in turn, every occurrence, in the order given.
///
/// Each replacement runs over the output of the previous one, so text
/// inserted for an earlier token is searched for the later ones.
pub fn substitute(template: &str, replacements: &[(&str, &str)]) -> String {
    replacements
        .iter()
        .filter(|(token, _)| !token.is_empty())
        .fold(template.to_string(), |page, &(token, value)| {
            page.replace(token, value)
        })
}

/// Produce the final page from compiled posts and the template text.
pub fn assemble_page(
    posts: &[Post],
    template: &str,
    tokens: &TemplateConfig,
) -> Result<String, AssembleError> {
    let body = render_body(posts)?;
    let contents = render_contents(posts);
    Ok(substitute(
        template,
        &[
            (tokens.body_token.as_str(), body.as_str()),
            (tokens.contents_token.as_str(), contents.as_str()),
        ],
    ))
}
