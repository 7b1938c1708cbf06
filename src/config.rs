//! Project configuration.
//!
//! Handles loading and validating `blog.toml`. The file is optional: stock
//! defaults reproduce the conventional layout, and a user file only needs
//! the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [paths]
//! posts = "blogs"                    # Directory of .md posts
//! template = "blog_template.html"    # Page template
//! output = "blogs.html"              # Generated page
//!
//! [posts]
//! skip_prefix = "_"                  # Files starting with this are ignored
//!
//! [template]
//! body_token = "###BLOGS###"
//! contents_token = "###BLOG-CONTENTS###"
//!
//! [processing]
//! max_processes = 4                  # Max parallel workers (omit for auto)
//! ```
//!
//! Relative paths are resolved against the project root (the directory the
//! config file lives in, or `--root`). Unknown keys are rejected to catch
//! typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the config file looked up in the project root.
pub const CONFIG_FILE: &str = "blog.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Project configuration loaded from `blog.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlogConfig {
    /// Input and output locations.
    pub paths: PathsConfig,
    /// Source post selection.
    pub posts: PostsConfig,
    /// Placeholder tokens in the template.
    pub template: TemplateConfig,
    /// Parallel compilation settings.
    pub processing: ProcessingConfig,
}

impl BlogConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let tokens = &self.template;
        if tokens.body_token.is_empty() || tokens.contents_token.is_empty() {
            return Err(ConfigError::Validation(
                "template tokens must not be empty".into(),
            ));
        }
        if tokens.body_token == tokens.contents_token {
            return Err(ConfigError::Validation(
                "template.body_token and template.contents_token must differ".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Input and output locations, relative to the project root unless absolute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub posts: PathBuf,
    pub template: PathBuf,
    pub output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            posts: PathBuf::from("blogs"),
            template: PathBuf::from("blog_template.html"),
            output: PathBuf::from("blogs.html"),
        }
    }
}

impl PathsConfig {
    /// Resolve every path against `root`. Absolute paths are kept as-is.
    pub fn resolve(&self, root: &Path) -> PathsConfig {
        PathsConfig {
            posts: root.join(&self.posts),
            template: root.join(&self.template),
            output: root.join(&self.output),
        }
    }
}

/// Which files in the posts directory become posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PostsConfig {
    /// Markdown files whose name starts with this prefix are skipped.
    /// Useful for drafts (`_draft.md`).
    pub skip_prefix: String,
}

impl Default for PostsConfig {
    fn default() -> Self {
        Self {
            skip_prefix: "_".to_string(),
        }
    }
}

/// Literal placeholder tokens replaced in the template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplateConfig {
    /// Replaced by all post articles joined with `<hr>`.
    pub body_token: String,
    /// Replaced by the table of contents.
    pub contents_token: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            body_token: "###BLOGS###".to_string(),
            contents_token: "###BLOG-CONTENTS###".to_string(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel compile workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// Base layer that user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(BlogConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(config_path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from `config_path`, falling back to stock defaults when the
/// file is missing.
pub fn load_config(config_path: &Path) -> Result<BlogConfig, ConfigError> {
    let merged = match load_raw_config(config_path)? {
        Some(overlay) => merge_toml(stock_defaults_value(), overlay),
        None => stock_defaults_value(),
    };
    let config: BlogConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `blog.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r####"# blog-page configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Paths (relative to the directory holding this file)
# ---------------------------------------------------------------------------
[paths]
# Directory containing the .md posts. Only files directly inside it are read.
posts = "blogs"

# HTML template with the two placeholder tokens below.
template = "blog_template.html"

# Generated page.
output = "blogs.html"

# ---------------------------------------------------------------------------
# Post selection
# ---------------------------------------------------------------------------
[posts]
# Markdown files whose name starts with this prefix are skipped (drafts).
skip_prefix = "_"

# ---------------------------------------------------------------------------
# Template placeholders
# ---------------------------------------------------------------------------
[template]
# Replaced by every post, newest first, separated by <hr>.
body_token = "###BLOGS###"

# Replaced by the table of contents linking to each post.
contents_token = "###BLOG-CONTENTS###"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel compile workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"####
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_conventional_layout() {
        let config = BlogConfig::default();
        assert_eq!(config.paths.posts, PathBuf::from("blogs"));
        assert_eq!(config.paths.template, PathBuf::from("blog_template.html"));
        assert_eq!(config.paths.output, PathBuf::from("blogs.html"));
        assert_eq!(config.posts.skip_prefix, "_");
    }

    #[test]
    fn default_config_has_tokens() {
        let config = BlogConfig::default();
        assert_eq!(config.template.body_token, "###BLOGS###");
        assert_eq!(config.template.contents_token, "###BLOG-CONTENTS###");
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[template]
body_token = "{{posts}}"
"##;
        let config: BlogConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.template.body_token, "{{posts}}");
        // Default values preserved
        assert_eq!(config.template.contents_token, "###BLOG-CONTENTS###");
        assert_eq!(config.paths.posts, PathBuf::from("blogs"));
    }

    #[test]
    fn unknown_keys_rejected() {
        let toml = r##"
[paths]
postz = "typo"
"##;
        let result: Result<BlogConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn paths_resolve_against_root() {
        let paths = PathsConfig::default().resolve(Path::new("/site"));
        assert_eq!(paths.posts, PathBuf::from("/site/blogs"));
        assert_eq!(paths.template, PathBuf::from("/site/blog_template.html"));
        assert_eq!(paths.output, PathBuf::from("/site/blogs.html"));
    }

    #[test]
    fn absolute_paths_survive_resolve() {
        let paths = PathsConfig {
            posts: PathBuf::from("/elsewhere/posts"),
            ..PathsConfig::default()
        }
        .resolve(Path::new("/site"));
        assert_eq!(paths.posts, PathBuf::from("/elsewhere/posts"));
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn validate_accepts_defaults() {
        assert!(BlogConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_token() {
        let mut config = BlogConfig::default();
        config.template.contents_token = String::new();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn validate_rejects_identical_tokens() {
        let mut config = BlogConfig::default();
        config.template.contents_token = config.template.body_token.clone();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn validate_rejects_zero_processes() {
        let mut config = BlogConfig::default();
        config.processing.max_processes = Some(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn effective_threads_clamps_to_cores() {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let config = ProcessingConfig {
            max_processes: Some(cores + 64),
        };
        assert_eq!(effective_threads(&config), cores);
        assert_eq!(effective_threads(&ProcessingConfig::default()), cores);
        assert_eq!(
            effective_threads(&ProcessingConfig {
                max_processes: Some(1)
            }),
            1
        );
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, BlogConfig::default());
    }

    #[test]
    fn load_config_merges_over_defaults() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(CONFIG_FILE);
        fs::write(
            &config_path,
            r##"
[paths]
output = "public/index.html"

[processing]
max_processes = 2
"##,
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.paths.output, PathBuf::from("public/index.html"));
        assert_eq!(config.processing.max_processes, Some(2));
        // Unspecified values should be defaults
        assert_eq!(config.paths.posts, PathBuf::from("blogs"));
        assert_eq!(config.template, TemplateConfig::default());
    }

    #[test]
    fn load_config_rejects_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(CONFIG_FILE);
        fs::write(&config_path, "[paths\nposts = ").unwrap();
        assert!(matches!(
            load_config(&config_path),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn load_config_runs_validation() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(CONFIG_FILE);
        fs::write(
            &config_path,
            r##"
[template]
body_token = "SAME"
contents_token = "SAME"
"##,
        )
        .unwrap();
        assert!(matches!(
            load_config(&config_path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: BlogConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, BlogConfig::default());
    }
}
