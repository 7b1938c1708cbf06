//! The markdown subset compiler.
//!
//! Posts are written in a small markdown dialect and compiled by rewriting
//! the whole text with an ordered list of substitution rules ([`RULES`]).
//! Every rule runs over the output of the previous one; there is no parse
//! tree.
//!
//! ## Supported Syntax
//!
//! | Source                  | Output                                          |
//! |-------------------------|-------------------------------------------------|
//! | `\_`                    | `_` (lets URLs keep underscores)                |
//! | `### text`              | `<h4>text</h4>`                                 |
//! | `## text`               | `<h3>text</h3>`                                 |
//! | `https://…` + space     | `<a href='https://…'>https://…</a>`             |
//! | ```` ```hs … ``` ````   | `<pre><code class='language-haskell'>…</code></pre>` |
//! | ```` ``` … ``` ````     | `<pre><code>…</code></pre>`                     |
//! | `**text**`              | `<strong>text</strong>`                         |
//! | `*text*`                | `<em>text</em>`                                 |
//! | line break              | `<br>`                                          |
//!
//! Headings start at `h3` because the page template owns `h1` and `h2`.
//!
//! ## Ordering
//!
//! The order of [`RULES`] is load-bearing:
//!
//! - `###` runs before `##`, otherwise the tail of `### x` would become an `h3`
//! - the tagged `hs` fence runs before the generic fence
//! - bold runs before italic so `**x**` is not read as two empty italics
//! - line breaks become `<br>` last, after every rule that matches on `\n`
//!
//! ## Limitations
//!
//! Nothing is HTML-escaped; raw HTML in a post passes through. Lists, block
//! quotes, tables, and nested emphasis are not recognised and stay as literal
//! characters. An unterminated fence swallows text up to the next fence
//! anywhere later in the post. A URL at the very end of a post, with no
//! whitespace after it, is not linked.

use regex::Regex;
use std::sync::LazyLock;

/// One rewriting step of the compiler.
pub enum Rule {
    /// Replace every occurrence of a fixed string.
    Literal {
        from: &'static str,
        to: &'static str,
    },
    /// Replace every match of a pattern; `replacement` may use `${n}` groups.
    Pattern {
        regex: Regex,
        replacement: &'static str,
    },
}

impl Rule {
    fn pattern(source: &str, replacement: &'static str) -> Self {
        Rule::Pattern {
            regex: Regex::new(source).expect("compiler rule pattern is valid"),
            replacement,
        }
    }

    /// Apply this rule to the whole of `text`.
    pub fn apply(&self, text: &str) -> String {
        match self {
            Rule::Literal { from, to } => text.replace(from, to),
            Rule::Pattern { regex, replacement } => {
                regex.replace_all(text, *replacement).into_owned()
            }
        }
    }
}

/// The compiler's rules, in the order they are applied.
pub static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::Literal {
            from: "\\_",
            to: "_",
        },
        Rule::pattern(r"### (.+?)\n", "<h4>${1}</h4>\n"),
        Rule::pattern(r"## (.+?)\n", "<h3>${1}</h3>\n"),
        Rule::pattern(
            r"https://([^\s<]+)(\s)",
            "<a href='https://${1}'>https://${1}</a>${2}",
        ),
        Rule::pattern(
            r"(?s)```hs\n(.*?)```",
            "<pre><code class='language-haskell'>${1}</code></pre>",
        ),
        Rule::pattern(r"(?s)```(.*?)```", "<pre><code>${1}</code></pre>"),
        Rule::pattern(r"\*\*(.+?)\*\*", "<strong>${1}</strong>"),
        Rule::pattern(r"\*(.+?)\*", "<em>${1}</em>"),
        Rule::Literal {
            from: "\r\n",
            to: "\n",
        },
        Rule::Literal { from: "\r", to: "\n" },
        Rule::Literal {
            from: "\n",
            to: "<br>",
        },
    ]
});

/// Compile a post body into an HTML fragment.
///
/// Not idempotent: compiling the output again is meaningless.
pub fn compile(markdown: &str) -> String {
    RULES
        .iter()
        .fold(markdown.to_string(), |text, rule| rule.apply(&text))
}
