//! Integration tests for `sitegen build`, `render` and `title`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn sitegen_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_sitegen"))
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn temp_out(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("sitegen-build-test").join(name);
    // Clean up from previous runs
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn build(site: &Path, out: &Path, extra: &[&str]) -> std::process::Output {
    Command::new(sitegen_bin())
        .args([
            "build",
            "--root",
            site.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
        ])
        .args(extra)
        .output()
        .expect("failed to run sitegen build")
}

#[test]
fn build_produces_mirrored_file_tree() {
    let out = temp_out("tree");
    let output = build(&fixture("site"), &out, &["--quiet"]);
    assert!(output.status.success(), "sitegen build should succeed: {output:?}");

    assert!(out.join("index.html").exists(), "index.html should exist");
    assert!(out.join("blog/majesty.html").exists(), "blog/majesty.html should exist");
    assert!(out.join("index.css").exists(), "static css should be copied");
    assert!(out.join("images/rivendell.png").exists(), "nested static file should be copied");
    assert!(!out.join("index.md").exists(), "markdown sources are not copied");

    let _ = fs::remove_dir_all(&out);
}

#[test]
fn build_fills_template_placeholders() {
    let out = temp_out("template");
    let output = build(&fixture("site"), &out, &["--quiet"]);
    assert!(output.status.success());

    let html = fs::read_to_string(out.join("index.html")).unwrap();
    assert!(html.contains("<title>Tolkien Fan Club</title>"), "{html}");
    assert!(!html.contains("{{ Title }}"));
    assert!(!html.contains("{{ Content }}"));
    assert!(html.contains("<div><h1>Tolkien Fan Club</h1>"), "{html}");
    assert!(html.contains(r#"<a href="/blog/majesty.html">first post here</a>"#));
    assert!(html.contains("<blockquote> All that is gold does not glitter</blockquote>"));
    assert!(html.contains("<ol><li>The Fellowship of the Ring</li>"));
    assert!(html.contains("<pre><code>func main(){"));

    let post = fs::read_to_string(out.join("blog/majesty.html")).unwrap();
    assert!(post.contains(r#"<img src="/images/rivendell.png" alt="LOTR image artistmonkeys"></img>"#));
    assert!(post.contains("<i>world</i>"));
    assert!(post.contains("<code>legendarium</code>"));

    let _ = fs::remove_dir_all(&out);
}

#[test]
fn rebuild_without_clean_reports_unchanged() {
    let out = temp_out("unchanged");
    assert!(build(&fixture("site"), &out, &["--quiet"]).status.success());

    let output = build(&fixture("site"), &out, &["--no-clean"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2 unchanged"), "{stdout}");
    assert!(!stdout.contains("created"), "{stdout}");

    let _ = fs::remove_dir_all(&out);
}

#[test]
fn build_clean_removes_stale_output() {
    let out = temp_out("clean");
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("stale.html"), "old").unwrap();

    assert!(build(&fixture("site"), &out, &["--quiet"]).status.success());
    assert!(!out.join("stale.html").exists());

    let _ = fs::remove_dir_all(&out);
}

/// Copy a fixture site into a scratch directory so a build may touch it.
fn scratch_site(name: &str) -> PathBuf {
    let dest = temp_out(name);
    let src = fixture("site");
    for entry in walkdir::WalkDir::new(&src).min_depth(1) {
        let entry = entry.unwrap();
        let target = dest.join(entry.path().strip_prefix(&src).unwrap());
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).unwrap();
        } else {
            fs::create_dir_all(target.parent().unwrap()).unwrap();
            fs::copy(entry.path(), &target).unwrap();
        }
    }
    dest
}

#[test]
fn clean_build_refuses_output_overlapping_sources() {
    let site = scratch_site("overlap");

    for out in [site.clone(), site.join("content"), site.join("static")] {
        let output = build(&site, &out, &["--quiet"]);
        assert!(!output.status.success(), "build into {} should fail", out.display());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Refusing to clean"), "{stderr}");
    }

    assert!(site.join("content/index.md").exists(), "content must survive");
    assert!(site.join("content/blog/majesty.md").exists(), "nested content must survive");
    assert!(site.join("static/index.css").exists(), "static assets must survive");
    assert!(site.join("template.html").exists(), "template must survive");

    let _ = fs::remove_dir_all(&site);
}

#[test]
fn missing_title_aborts_build() {
    let out = temp_out("broken");
    let output = build(&fixture("broken"), &out, &["--quiet"]);
    assert!(!output.status.success(), "build should fail without a title");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("untitled.md"), "{stderr}");
    assert!(stderr.contains("No title found"), "{stderr}");

    let _ = fs::remove_dir_all(&out);
}

#[test]
fn render_prints_html_fragment() {
    let output = Command::new(sitegen_bin())
        .args(["render", fixture("site/content/blog/majesty.md").to_str().unwrap()])
        .output()
        .expect("failed to run sitegen render");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("<div><h1>The unparalleled majesty"), "{stdout}");
}

#[test]
fn render_json_dumps_node_tree() {
    let output = Command::new(sitegen_bin())
        .args([
            "render",
            fixture("site/content/index.md").to_str().unwrap(),
            "--format",
            "json",
        ])
        .output()
        .expect("failed to run sitegen render");
    assert!(output.status.success());

    let tree: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(tree["tag"], "div");
    assert_eq!(tree["children"][0]["tag"], "h1");
}

#[test]
fn title_command() {
    let output = Command::new(sitegen_bin())
        .args(["title", fixture("site/content/index.md").to_str().unwrap()])
        .output()
        .expect("failed to run sitegen title");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "Tolkien Fan Club");
}

#[test]
fn render_reports_parse_errors_with_context() {
    let output = Command::new(sitegen_bin())
        .args(["render", fixture("broken/unclosed.md").to_str().unwrap()])
        .output()
        .expect("failed to run sitegen render");
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to convert"), "{stderr}");
    assert!(stderr.contains("unclosed.md"), "{stderr}");
    assert!(stderr.contains("Mismatched delimiter"), "{stderr}");
}
