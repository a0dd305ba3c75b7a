use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

mod config;
mod site;

#[derive(Parser)]
#[command(name = "sitegen", version, about = "Static site generator for a small markdown dialect")]
struct Cli {
    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Show every file touched and enable debug logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum RenderFormat {
    Html,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the site: copy static assets and render every markdown page
    Build {
        /// Project root holding sitegen.json (default: current directory)
        #[arg(long)]
        root: Option<PathBuf>,

        /// Markdown content directory (overrides sitegen.json)
        #[arg(long)]
        content: Option<PathBuf>,

        /// Static asset directory (overrides sitegen.json)
        #[arg(long = "static")]
        static_dir: Option<PathBuf>,

        /// HTML template with {{ Title }} and {{ Content }} placeholders
        #[arg(long)]
        template: Option<PathBuf>,

        /// Output directory (overrides sitegen.json)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Keep existing output instead of deleting it first
        #[arg(long)]
        no_clean: bool,

        /// Rebuild whenever a source file changes
        #[arg(long)]
        watch: bool,
    },

    /// Render a single markdown file to stdout
    Render {
        /// Path to the .md file
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "html")]
        format: RenderFormat,
    },

    /// Print the title (first `# ` heading) of a markdown file
    Title {
        /// Path to the .md file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Build {
            root,
            content,
            static_dir,
            template,
            out,
            no_clean,
            watch,
        } => {
            let root = match root {
                Some(r) => r,
                None => std::env::current_dir()?,
            };
            let mut site_config = config::load_config(&root)?;
            if let Some(dir) = content {
                site_config.content_dir = dir;
            }
            if let Some(dir) = static_dir {
                site_config.static_dir = dir;
            }
            if let Some(file) = template {
                site_config.template = file;
            }
            if let Some(dir) = out {
                site_config.output_dir = dir;
            }
            let site_config = site_config.rooted(&root);

            let opts = site::BuildOpts {
                clean: !no_clean,
                verbose: cli.verbose,
                quiet: cli.quiet,
            };
            let report = site::build_site(&site_config, &opts)?;
            if !cli.quiet {
                report.print_summary(&site_config.output_dir);
            }
            if watch {
                site::watch_and_rebuild(&site_config, &opts)?;
            }
        }
        Commands::Render { file, format } => {
            handle_render(&file, format)?;
        }
        Commands::Title { file } => {
            let markdown = read_markdown(&file)?;
            let title = md2html::extract_title(&markdown)
                .with_context(|| format!("Failed to extract title from '{}'", file.display()))?;
            println!("{title}");
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn read_markdown(file: &Path) -> Result<String> {
    std::fs::read_to_string(file)
        .map_err(|e| anyhow::anyhow!("Failed to read '{}': {}", file.display(), e))
}

fn handle_render(file: &Path, format: RenderFormat) -> Result<()> {
    let markdown = read_markdown(file)?;

    let node = md2html::markdown_to_html_node(&markdown)
        .with_context(|| format!("Failed to convert '{}'", file.display()))?;

    let output = match format {
        RenderFormat::Html => node
            .render()
            .with_context(|| format!("Failed to render '{}'", file.display()))?,
        RenderFormat::Json => serde_json::to_string_pretty(&node)?,
    };

    println!("{output}");
    Ok(())
}
