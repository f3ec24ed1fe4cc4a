//! Content directory access
//!
//! Posts live as a flat directory of markdown files; each file's stem is the
//! post's slug. There is no index on disk, the directory is the index.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

// Ordered so direct lookup agrees with the first-wins policy of entries():
// for any stem, "x.markdown" sorts before "x.md" in file-name order.
const MARKDOWN_EXTENSIONS: &[&str] = &["markdown", "md"];

/// A directory of markdown documents
#[derive(Debug, Clone)]
pub struct ContentDir {
    dir: PathBuf,
}

/// One enumerated document
#[derive(Debug, Clone)]
pub struct DocEntry {
    pub slug: String,
    pub path: PathBuf,
}

impl ContentDir {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// Enumerate documents, sorted by file name
    ///
    /// A missing directory is an empty catalog, not an error. When two files
    /// share a stem (`a.md` next to `a.markdown`) the first in file-name
    /// order wins and the shadowed file is skipped with a warning.
    pub fn entries(&self) -> Vec<DocEntry> {
        if !self.dir.exists() {
            return Vec::new();
        }

        let mut entries = Vec::new();
        let mut seen = HashSet::new();

        for entry in WalkDir::new(&self.dir)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !(path.is_file() && is_markdown_file(path)) {
                continue;
            }
            let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if !seen.insert(slug.to_string()) {
                tracing::warn!("Duplicate slug '{}', skipping {:?}", slug, path);
                continue;
            }
            entries.push(DocEntry {
                slug: slug.to_string(),
                path: path.to_path_buf(),
            });
        }

        entries
    }

    /// Read one document by slug
    ///
    /// `Ok(None)` when no document matches. Slugs that could name a path
    /// outside the content directory are treated as unknown.
    pub async fn read(&self, slug: &str) -> io::Result<Option<String>> {
        if !is_safe_slug(slug) {
            return Ok(None);
        }

        for ext in MARKDOWN_EXTENSIONS {
            let path = self.dir.join(format!("{}.{}", slug, ext));
            match tokio::fs::read_to_string(&path).await {
                Ok(raw) => return Ok(Some(raw)),
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(None)
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| MARKDOWN_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

/// Slugs come straight from request paths; keep them inside the directory
fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty() && !slug.starts_with('.') && !slug.contains(['/', '\\'])
}
