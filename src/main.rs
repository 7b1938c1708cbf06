use blog_page::config::{self, BlogConfig, PathsConfig};
use blog_page::{build, output};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "blog-page")]
#[command(about = "Compile a directory of markdown posts into one HTML page")]
#[command(long_about = "\
Compile a directory of markdown posts into one HTML page

Every .md file in the posts directory (except those starting with the skip
prefix) becomes an <article> on the page, last listed first. A table of
contents links to each one.

Project layout:

  ./
  ├── blog.toml               # Optional config (see gen-config)
  ├── blog_template.html      # Template with ###BLOGS### and ###BLOG-CONTENTS###
  └── blogs/
      ├── 2024-intro.md       # Post → <article id=\"post-2024-intro\">
      └── _draft.md           # Skipped

Supported markdown: ## and ### headings, **bold**, *italic*, ``` fences
(```hs for Haskell), bare https:// links, and [^N]: footnote definitions.

Run 'blog-page gen-config' to print a documented blog.toml.")]
#[command(version)]
struct Cli {
    /// Project root; relative paths in the config resolve against it
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Config file [default: <root>/blog.toml]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Posts directory (overrides config)
    #[arg(long, global = true)]
    posts: Option<PathBuf>,

    /// Template file (overrides config)
    #[arg(long, global = true)]
    template: Option<PathBuf>,

    /// Output file (overrides config)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile the posts and write the page
    Build,
    /// Compile the posts and report, without writing anything
    Check,
    /// Print a stock blog.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Build => {
            let (site_config, paths) = load(&cli)?;
            let rendered = build::build(&paths, &site_config)?;
            output::print_posts(&rendered.posts);
            println!();
            output::print_written(&paths.output, rendered.posts.len());
        }
        Command::Check => {
            let (site_config, paths) = load(&cli)?;
            println!("==> Checking {}", paths.posts.display());
            let rendered = build::render(&paths, &site_config)?;
            output::print_posts(&rendered.posts);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the config and resolve paths, with CLI flags taking precedence.
fn load(cli: &Cli) -> Result<(BlogConfig, PathsConfig), config::ConfigError> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.root.join(config::CONFIG_FILE));
    let site_config = config::load_config(&config_path)?;
    init_thread_pool(&site_config.processing);

    let resolved = site_config.paths.resolve(&cli.root);
    let paths = PathsConfig {
        posts: cli.posts.clone().unwrap_or(resolved.posts),
        template: cli.template.clone().unwrap_or(resolved.template),
        output: cli.output.clone().unwrap_or(resolved.output),
    };
    Ok((site_config, paths))
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; users can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
