//! inkpress: a tiny self-contained markdown blog server
//!
//! Posts are plain markdown files whose first line is the title and second
//! line the display date. The server lists them newest-first and renders
//! each one at `/<slug>` with syntax-highlighted code blocks, wrapped in a
//! light/dark shell.

pub mod config;
pub mod content;
pub mod server;
pub mod templates;
pub mod theme;

use anyhow::Result;
use std::path::Path;

/// Site configuration file name, relative to the base directory
const CONFIG_FILE: &str = "_config.yml";

/// The main blog application
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Directory holding the markdown documents
    pub content_dir: std::path::PathBuf,
}

impl Blog {
    /// Create a new blog instance from a directory
    ///
    /// `_config.yml` is loaded when present; a missing file means defaults.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_new_without_config_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let blog = Blog::new(tmp.path()).unwrap();
        assert_eq!(blog.config.title, "inkpress");
        assert_eq!(blog.content_dir, tmp.path().join("data"));
    }

    #[test]
    fn test_new_reads_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("_config.yml"),
            "title: somewhere else\ncontent_dir: posts\n",
        )
        .unwrap();

        let blog = Blog::new(tmp.path()).unwrap();
        assert_eq!(blog.config.title, "somewhere else");
        assert_eq!(blog.content_dir, tmp.path().join("posts"));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("_config.yml"), "links: not-a-list\n").unwrap();
        assert!(Blog::new(tmp.path()).is_err());
    }
}
