//! Check every document in a directory tree

use anyhow::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::parse::parse_file;
use crate::content::images::reference_images;
use crate::content::{DirectoryResolver, ImageResolver, Resolution};
use crate::Site;

/// Outcome of checking a tree
#[derive(Debug, Default)]
pub struct Report {
    pub checked: usize,
    /// Files that failed to parse, with the reason
    pub failures: Vec<(PathBuf, String)>,
    /// `(file, label)` of image references with no `[label]: url` line
    pub undefined_images: Vec<(PathBuf, String)>,
    /// `(file, expected path)` of local images that do not exist
    pub missing_images: Vec<(PathBuf, PathBuf)>,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Parse every Markdown file under `dir` and resolve its images
pub fn check_dir(site: &Site, dir: &Path, resolver: &dyn ImageResolver) -> Result<Report> {
    let mut report = Report::default();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() || !is_markdown_file(path) {
            continue;
        }
        report.checked += 1;

        let document = match parse_file(site, path, None, "", None) {
            Ok(Some(document)) => document,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!("{:#}", e);
                report.failures.push((path.to_path_buf(), format!("{:#}", e)));
                continue;
            }
        };

        for image in reference_images(document.body()) {
            match image.url {
                None => {
                    tracing::warn!("{:?}: image label [{}] has no definition", path, image.label);
                    report.undefined_images.push((path.to_path_buf(), image.label));
                }
                Some(url) => {
                    if let Resolution::Missing(expected) = resolver.resolve(&url) {
                        tracing::warn!("{:?}: image {:?} not found", path, expected);
                        report.missing_images.push((path.to_path_buf(), expected));
                    }
                }
            }
        }
    }

    Ok(report)
}

/// Run the check command
pub fn run(site: &Site, dir: &Path) -> Result<()> {
    let resolver = DirectoryResolver::new(site.images_dir());
    let report = check_dir(site, dir, &resolver)?;

    println!(
        "Checked {} documents: {} failed, {} undefined images, {} missing images",
        report.checked,
        report.failures.len(),
        report.undefined_images.len(),
        report.missing_images.len()
    );

    if !report.is_clean() {
        anyhow::bail!("{} documents failed to parse", report.failures.len());
    }
    Ok(())
}

fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e.to_lowercase().as_str(), "md" | "markdown"))
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_check_dir() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("_posts")).unwrap();
        fs::create_dir_all(root.join("img")).unwrap();
        fs::write(root.join("img/logo.png"), b"png").unwrap();

        fs::write(
            root.join("about.md"),
            "---\ntitle: About\npermalink: /about/\n---\n![logo][logo]\n\n[logo]: /img/logo.png\n",
        )
        .unwrap();
        fs::write(
            root.join("_posts/2024-01-01-hi.md"),
            "---\ntitle: Hi\nauthor: Me\n---\n![gone][gone]\n![who][nobody]\n\n[gone]: /img/gone.png\n",
        )
        .unwrap();
        // A post without an author
        fs::write(root.join("_posts/2024-01-02-bad.md"), "---\ntitle: Bad\n---\nBody").unwrap();
        fs::write(root.join("notes.txt"), "not markdown").unwrap();

        let site = Site::new(root).unwrap();
        let resolver = DirectoryResolver::new(root);
        let report = check_dir(&site, root, &resolver).unwrap();

        assert_eq!(report.checked, 3);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].1.contains("author"));
        assert_eq!(report.undefined_images.len(), 1);
        assert_eq!(report.undefined_images[0].1, "nobody");
        assert_eq!(report.missing_images.len(), 1);
        assert_eq!(report.missing_images[0].1, root.join("img/gone.png"));
        assert!(!report.is_clean());
    }
}
