//! Static-site generation on top of the markdown core.
//!
//! Pages are rendered one at a time: `{{ Title }}` and `{{ Content }}` in the
//! template are replaced with the page's h1 text and its rendered HTML tree.

use crate::error::SiteError;
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info, warn};

pub const TITLE_PLACEHOLDER: &str = "{{ Title }}";
pub const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

static RE_MARKDOWN_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(md|markdown)$").unwrap());

/// Recursively collect markdown files under `inputs`, sorted.
pub fn list_files(inputs: &[PathBuf]) -> io::Result<Vec<PathBuf>> {
    let mut out: Vec<PathBuf> = Vec::new();

    for p in inputs {
        if p.is_dir() {
            for entry in fs::read_dir(p)? {
                let sub_path = entry?.path();
                if sub_path.is_dir() {
                    out.extend(list_files(&[sub_path])?);
                } else if sub_path.is_file() && is_markdown(&sub_path) {
                    out.push(sub_path);
                }
            }
        } else if p.is_file() && is_markdown(p) {
            out.push(p.clone());
        }
    }

    out.sort();
    Ok(out)
}

fn is_markdown(path: &Path) -> bool {
    path.to_str().is_some_and(|s| RE_MARKDOWN_FILE.is_match(s))
}

/// Fill the page template with a title and rendered content.
pub fn fill_template(template: &str, title: &str, content: &str) -> String {
    template
        .replace(TITLE_PLACEHOLDER, title)
        .replace(CONTENT_PLACEHOLDER, content)
}

/// Render one markdown file through `template` and write it to `dest`.
pub fn generate_page(from: &Path, template: &Path, dest: &Path) -> Result<(), SiteError> {
    info!("generating {} -> {}", from.display(), dest.display());
    let markdown = fs::read_to_string(from).map_err(SiteError::io(from))?;
    let template_text = fs::read_to_string(template).map_err(SiteError::io(template))?;

    let content = crate::markdown_to_html(&markdown).map_err(SiteError::markdown(from))?;
    let title = crate::extract_title(&markdown).map_err(SiteError::markdown(from))?;
    debug!(title = %title, bytes = content.len(), "rendered page");

    let page = fill_template(&template_text, &title, &content);
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(SiteError::io(parent))?;
    }
    fs::write(dest, page).map_err(SiteError::io(dest))
}

/// Generate an HTML page for every markdown file under `content_dir`,
/// mirroring the directory layout under `dest_dir`.
///
/// A page that fails to convert is logged and skipped. Returns the number
/// of pages written.
pub fn generate_pages_recursive(
    content_dir: &Path,
    template: &Path,
    dest_dir: &Path,
) -> Result<usize, SiteError> {
    if !content_dir.is_dir() {
        return Err(SiteError::Io {
            path: content_dir.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "content directory not found"),
        });
    }
    let files = list_files(&[content_dir.to_path_buf()]).map_err(SiteError::io(content_dir))?;

    let mut generated = 0;
    for from in &files {
        let relative = from.strip_prefix(content_dir).unwrap_or(from.as_path());
        let dest = dest_dir.join(relative).with_extension("html");
        match generate_page(from, template, &dest) {
            Ok(()) => generated += 1,
            Err(e) => warn!("skipping {}: {}", from.display(), e),
        }
    }

    info!("generated {} of {} page(s) into {}", generated, files.len(), dest_dir.display());
    Ok(generated)
}

/// Replace `dest` with a recursive copy of `src`. Returns the number of
/// files copied.
pub fn copy_static(src: &Path, dest: &Path) -> Result<usize, SiteError> {
    if dest.exists() {
        debug!("removing {}", dest.display());
        fs::remove_dir_all(dest).map_err(SiteError::io(dest))?;
    }
    fs::create_dir_all(dest).map_err(SiteError::io(dest))?;

    if !src.is_dir() {
        warn!("static directory {} does not exist; nothing copied", src.display());
        return Ok(0);
    }

    let copied = copy_tree(src, dest)?;
    info!("copied {} file(s) from {} to {}", copied, src.display(), dest.display());
    Ok(copied)
}

fn copy_tree(src: &Path, dest: &Path) -> Result<usize, SiteError> {
    let mut copied = 0;
    for entry in fs::read_dir(src).map_err(SiteError::io(src))? {
        let from = entry.map_err(SiteError::io(src))?.path();
        let Some(name) = from.file_name() else {
            continue;
        };
        let to = dest.join(name);
        if from.is_file() {
            debug!("copying {} -> {}", from.display(), to.display());
            fs::copy(&from, &to).map_err(SiteError::io(&from))?;
            copied += 1;
        } else if from.is_dir() {
            fs::create_dir_all(&to).map_err(SiteError::io(&to))?;
            copied += copy_tree(&from, &to)?;
        } else {
            warn!("skipping special file {}", from.display());
        }
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "<html><title>{{ Title }}</title><body>{{ Content }}</body></html>";

    fn write(path: &Path, text: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, text).unwrap();
    }

    #[test]
    fn test_fill_template() {
        assert_eq!(
            fill_template("{{ Title }}|{{ Content }}|{{ Title }}", "T", "<p>c</p>"),
            "T|<p>c</p>|T"
        );
    }

    #[test]
    fn test_list_files_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("b.md"), "# B");
        write(&dir.path().join("a.MARKDOWN"), "# A");
        write(&dir.path().join("notes.txt"), "skip");
        write(&dir.path().join("sub/c.md"), "# C");

        let files = list_files(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("a.MARKDOWN"),
                PathBuf::from("b.md"),
                PathBuf::from("sub/c.md"),
            ]
        );
    }

    #[test]
    fn test_generate_page() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("index.md");
        let template = dir.path().join("template.html");
        let dest = dir.path().join("out/nested/index.html");
        write(&from, "# Home\n\nWelcome **friend**");
        write(&template, TEMPLATE);

        generate_page(&from, &template, &dest).unwrap();
        assert_eq!(
            fs::read_to_string(&dest).unwrap(),
            "<html><title>Home</title><body><div><h1>Home</h1><p>Welcome <b>friend</b></p></div></body></html>"
        );
    }

    #[test]
    fn test_generate_page_without_title() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("page.md");
        let template = dir.path().join("template.html");
        write(&from, "no heading here");
        write(&template, TEMPLATE);

        let err = generate_page(&from, &template, &dir.path().join("page.html")).unwrap_err();
        assert!(matches!(err, SiteError::Markdown { .. }));
        assert!(!dir.path().join("page.html").exists());
    }

    #[test]
    fn test_generate_page_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("page.md");
        write(&from, "# Page");
        let err = generate_page(&from, &dir.path().join("nope.html"), &dir.path().join("page.html"))
            .unwrap_err();
        assert!(matches!(err, SiteError::Io { ref path, .. } if path.ends_with("nope.html")));
    }

    #[test]
    fn test_generate_pages_recursive_skips_bad_pages() {
        let dir = tempfile::tempdir().unwrap();
        let content = dir.path().join("content");
        let public = dir.path().join("public");
        let template = dir.path().join("template.html");
        write(&template, TEMPLATE);
        write(&content.join("index.md"), "# Index");
        write(&content.join("blog/post.md"), "# Post\n\n- one\n- two");
        write(&content.join("broken.md"), "# Broken\n\n**unclosed");

        let count = generate_pages_recursive(&content, &template, &public).unwrap();
        assert_eq!(count, 2);
        assert!(public.join("index.html").is_file());
        assert!(public.join("blog/post.html").is_file());
        assert!(!public.join("broken.html").exists());
    }

    #[test]
    fn test_generate_pages_missing_content_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = generate_pages_recursive(
            &dir.path().join("missing"),
            &dir.path().join("template.html"),
            &dir.path().join("public"),
        )
        .unwrap_err();
        assert!(matches!(err, SiteError::Io { .. }));
    }

    #[test]
    fn test_copy_static_replaces_dest() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("static");
        let dest = dir.path().join("public");
        write(&src.join("index.css"), "body {}");
        write(&src.join("images/logo.png"), "png");
        write(&dest.join("stale.html"), "old");

        let copied = copy_static(&src, &dest).unwrap();
        assert_eq!(copied, 2);
        assert_eq!(fs::read_to_string(dest.join("index.css")).unwrap(), "body {}");
        assert!(dest.join("images/logo.png").is_file());
        assert!(!dest.join("stale.html").exists());
    }

    #[test]
    fn test_copy_static_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("public");
        assert_eq!(copy_static(&dir.path().join("nope"), &dest).unwrap(), 0);
        assert!(dest.is_dir());
    }
}
