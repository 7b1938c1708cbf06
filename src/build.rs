//! The build pipeline: scan → compile → assemble → write.
//!
//! [`render`] runs everything except the final write and is what the `check`
//! command uses; [`build`] writes the page afterwards. The output file is only
//! touched once every input has been read and the page fully assembled, so a
//! missing posts directory or template leaves no partial output behind.

use crate::assemble::{self, AssembleError};
use crate::config::{BlogConfig, ConfigError, PathsConfig};
use crate::scan::{self, ScanError};
use crate::types::Post;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("Assemble error: {0}")]
    Assemble(#[from] AssembleError),
    #[error("template not found: {0}")]
    MissingTemplate(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of a pipeline run.
#[derive(Debug)]
pub struct Rendered {
    /// Compiled posts in page order.
    pub posts: Vec<Post>,
    /// The final page text.
    pub page: String,
}

/// Extract footnotes from and compile every post, preserving order.
pub fn compile_posts(posts: Vec<Post>) -> Vec<Post> {
    posts.into_par_iter().map(Post::compiled).collect()
}

/// Run the pipeline without writing anything.
///
/// `paths` must already be resolved against the project root.
pub fn render(paths: &PathsConfig, config: &BlogConfig) -> Result<Rendered, BuildError> {
    let posts = scan::scan(&paths.posts, &config.posts.skip_prefix)?;
    let template = read_template(&paths.template)?;

    let posts = compile_posts(posts);
    let page = assemble::assemble_page(&posts, &template, &config.template)?;
    Ok(Rendered { posts, page })
}

/// Run the pipeline and write the page to `paths.output`.
pub fn build(paths: &PathsConfig, config: &BlogConfig) -> Result<Rendered, BuildError> {
    let rendered = render(paths, config)?;
    if let Some(parent) = paths.output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(&paths.output, &rendered.page)?;
    tracing::debug!(output = %paths.output.display(), "wrote page");
    Ok(rendered)
}

fn read_template(path: &Path) -> Result<String, BuildError> {
    if !path.is_file() {
        return Err(BuildError::MissingTemplate(path.to_path_buf()));
    }
    Ok(scan::read_lossy(path)?)
}
