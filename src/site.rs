//! `sitegen build`: turn a content tree of markdown files into a static site.
//!
//! Every `.md` file under the content directory becomes an `.html` file at the
//! same relative path under the output directory, rendered through a single
//! template. Static assets are copied across verbatim.

use anyhow::{Context, Result};
use colored::Colorize;
use notify::{EventKind, RecursiveMode, Watcher};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};
use walkdir::WalkDir;

use crate::config::SiteConfig;

pub const TITLE_PLACEHOLDER: &str = "{{ Title }}";
pub const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// Options passed from CLI to the build pipeline.
#[derive(Debug, Clone, Copy)]
pub struct BuildOpts {
    /// Remove the output directory before building.
    pub clean: bool,
    pub verbose: bool,
    pub quiet: bool,
}

/// Outcome of writing a single output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Created,
    Updated,
    Unchanged,
}

/// Aggregate report from a build.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub copied: usize,
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
}

impl BuildReport {
    fn record(&mut self, status: PageStatus) {
        match status {
            PageStatus::Created => self.created += 1,
            PageStatus::Updated => self.updated += 1,
            PageStatus::Unchanged => self.unchanged += 1,
        }
    }

    pub fn pages(&self) -> usize {
        self.created + self.updated + self.unchanged
    }

    pub fn print_summary(&self, output_dir: &Path) {
        let mut parts = Vec::new();
        if self.created > 0 {
            parts.push(format!("{} created", self.created));
        }
        if self.updated > 0 {
            parts.push(format!("{} updated", self.updated));
        }
        if self.unchanged > 0 {
            parts.push(format!("{} unchanged", self.unchanged));
        }
        if parts.is_empty() {
            parts.push("no pages".to_string());
        }

        println!(
            "{} {} ({}; {} static files copied)",
            "Built".green().bold(),
            output_dir.display(),
            parts.join(", "),
            self.copied,
        );
    }
}

/// Fill the template's title and content placeholders.
pub fn fill_template(template: &str, title: &str, content: &str) -> String {
    template
        .replace(TITLE_PLACEHOLDER, title)
        .replace(CONTENT_PLACEHOLDER, content)
}

/// Render one markdown file through `template` and write it to `dest`.
pub fn generate_page(from: &Path, template: &Path, dest: &Path) -> Result<PageStatus> {
    log::info!(
        "Generating page from {} to {} using {}",
        from.display(),
        dest.display(),
        template.display()
    );

    let markdown = fs::read_to_string(from)
        .with_context(|| format!("Failed to read {}", from.display()))?;
    let template_content = fs::read_to_string(template)
        .with_context(|| format!("Failed to read template {}", template.display()))?;

    let html = md2html::markdown_to_html(&markdown)
        .with_context(|| format!("Failed to convert {}", from.display()))?;
    let title = md2html::extract_title(&markdown)
        .with_context(|| format!("Failed to extract title from {}", from.display()))?;

    let page = fill_template(&template_content, &title, &html);
    write_if_changed(dest, page.as_bytes())
}

/// Generate a page for every `.md` file under `content_dir`, mirroring the
/// directory layout under `dest_dir`.
pub fn generate_pages_recursive(
    content_dir: &Path,
    template: &Path,
    dest_dir: &Path,
    opts: &BuildOpts,
    report: &mut BuildReport,
) -> Result<()> {
    for source in list_files_recursive(content_dir)? {
        if source.extension().is_none_or(|ext| ext != "md") {
            continue;
        }
        let dest = dest_dir.join(&source).with_extension("html");
        let status = generate_page(&content_dir.join(&source), template, &dest)?;
        report.record(status);

        if !opts.quiet && (opts.verbose || status != PageStatus::Unchanged) {
            let label = match status {
                PageStatus::Created => "Created".green(),
                PageStatus::Updated => "Updated".yellow(),
                PageStatus::Unchanged => "Unchanged".dimmed(),
            };
            println!("  {} {} → {}", label, source.display(), dest.display());
        }
    }
    Ok(())
}

/// Recursively copy every file under `src` into `dest`.
pub fn copy_static(src: &Path, dest: &Path, opts: &BuildOpts) -> Result<usize> {
    let mut copied = 0;

    for entry in WalkDir::new(src).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let rel = entry.path().strip_prefix(src)?;
        let dest_path = dest.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest_path)
                .with_context(|| format!("Failed to create {}", dest_path.display()))?;
            continue;
        }
        if let Some(parent) = dest_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &dest_path).with_context(|| {
            format!(
                "Failed to copy {} -> {}",
                entry.path().display(),
                dest_path.display()
            )
        })?;
        log::debug!("copied {} -> {}", entry.path().display(), dest_path.display());
        if opts.verbose && !opts.quiet {
            println!("  {} {}", "Copied".dimmed(), rel.display());
        }
        copied += 1;
    }

    Ok(copied)
}

/// Full pipeline: reset the output directory, copy static assets, render pages.
pub fn build_site(config: &SiteConfig, opts: &BuildOpts) -> Result<BuildReport> {
    let mut report = BuildReport::default();
    let out = &config.output_dir;

    if opts.clean && out.exists() {
        ensure_safe_to_clean(config)?;
        log::info!("Removing {}", out.display());
        fs::remove_dir_all(out).with_context(|| format!("Failed to remove {}", out.display()))?;
    }
    fs::create_dir_all(out).with_context(|| format!("Failed to create {}", out.display()))?;

    if config.static_dir.is_dir() {
        report.copied = copy_static(&config.static_dir, out, opts)?;
    } else {
        log::warn!(
            "Static directory {} not found, skipping asset copy",
            config.static_dir.display()
        );
    }

    if !config.content_dir.is_dir() {
        anyhow::bail!(
            "Content directory {} not found",
            config.content_dir.display()
        );
    }
    generate_pages_recursive(&config.content_dir, &config.template, out, opts, &mut report)?;

    Ok(report)
}

/// Refuse to delete an output directory that overlaps the sources.
///
/// Cleaning is rejected when the output directory is the project root, holds
/// the content directory, static directory or template, or lies inside the
/// content or static directory.
pub fn ensure_safe_to_clean(config: &SiteConfig) -> Result<()> {
    let out = canonical(&config.output_dir);
    let root = canonical(&config.root);
    let content = canonical(&config.content_dir);
    let static_dir = canonical(&config.static_dir);
    let template = canonical(&config.template);

    if out == root || root.starts_with(&out) {
        anyhow::bail!(
            "Refusing to clean {}: it contains the project root {}",
            config.output_dir.display(),
            config.root.display()
        );
    }
    for (label, source) in [
        ("content directory", &content),
        ("static directory", &static_dir),
        ("template", &template),
    ] {
        if source.starts_with(&out) {
            anyhow::bail!(
                "Refusing to clean {}: it contains the {label} {}",
                config.output_dir.display(),
                source.display()
            );
        }
    }
    for (label, source) in [("content directory", &content), ("static directory", &static_dir)] {
        if out.starts_with(source) {
            anyhow::bail!(
                "Refusing to clean {}: it lies inside the {label} {}",
                config.output_dir.display(),
                source.display()
            );
        }
    }
    Ok(())
}

/// Canonical form of `path`, or `path` itself when it does not exist.
fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Canonical paths a watch session reacts to.
#[derive(Debug, Clone)]
pub struct WatchTargets {
    pub content_dir: PathBuf,
    pub static_dir: PathBuf,
    pub template: PathBuf,
    pub output_dir: PathBuf,
}

impl WatchTargets {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            content_dir: canonical(&config.content_dir),
            static_dir: canonical(&config.static_dir),
            template: canonical(&config.template),
            output_dir: canonical(&config.output_dir),
        }
    }

    fn is_source(&self, path: &Path) -> bool {
        if path.starts_with(&self.output_dir) {
            return false;
        }
        path.starts_with(&self.content_dir)
            || path.starts_with(&self.static_dir)
            || path == self.template
            || canonical(path) == self.template
    }
}

/// Whether `event` touches a source file and should trigger a rebuild.
pub fn should_rebuild(event: &notify::Event, targets: &WatchTargets) -> bool {
    let relevant = matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    );
    relevant && event.paths.iter().any(|p| targets.is_source(p))
}

/// Watch content, static assets and the template, rebuilding on each change.
///
/// Debounces rapid events (e.g. editors that write in stages) with a 200ms window.
/// Build errors are printed and the watch continues. Ctrl+C exits.
pub fn watch_and_rebuild(config: &SiteConfig, opts: &BuildOpts) -> Result<()> {
    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    watcher.watch(&config.content_dir, RecursiveMode::Recursive)?;
    if config.static_dir.is_dir() {
        watcher.watch(&config.static_dir, RecursiveMode::Recursive)?;
    }

    // Watch the template's directory: editors that save by rename drop a
    // watch placed on the file itself.
    let targets = WatchTargets::new(config);
    let template_dir = targets.template.parent().ok_or_else(|| {
        anyhow::anyhow!(
            "Cannot determine parent directory of '{}'",
            config.template.display()
        )
    })?;
    watcher.watch(template_dir, RecursiveMode::NonRecursive)?;

    println!(
        "{} {} for changes (Ctrl+C to stop)",
        "Watching".cyan().bold(),
        config.content_dir.display()
    );

    let mut last_rebuild = Instant::now();
    let debounce = Duration::from_millis(200);

    loop {
        match rx.recv_timeout(Duration::from_secs(1)) {
            Ok(event) => {
                if should_rebuild(&event, &targets) && last_rebuild.elapsed() > debounce {
                    // Small delay to let the editor finish writing
                    std::thread::sleep(Duration::from_millis(50));

                    match build_site(config, opts) {
                        Ok(report) => {
                            if !opts.quiet {
                                report.print_summary(&config.output_dir);
                            }
                        }
                        Err(e) => {
                            eprintln!("{} {:#}", "Build error:".red().bold(), e);
                        }
                    }
                    last_rebuild = Instant::now();
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

/// Write `content` to `path` unless the file already holds identical bytes.
fn write_if_changed(path: &Path, content: &[u8]) -> Result<PageStatus> {
    let status = if path.exists() {
        let existing = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        if content_hash(&existing) == content_hash(content) {
            return Ok(PageStatus::Unchanged);
        }
        PageStatus::Updated
    } else {
        PageStatus::Created
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(status)
}

/// SHA-256 of `bytes`, hex encoded.
fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Recursively list all files under a directory, returning relative paths.
fn list_files_recursive(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            let rel = entry
                .path()
                .strip_prefix(dir)
                .unwrap_or(entry.path())
                .to_path_buf();
            files.push(rel);
        }
    }

    Ok(files)
}
