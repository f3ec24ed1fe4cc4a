//! The blog catalog: every post, newest first

use super::post::Post;
use super::store::ContentDir;

/// Read operations over the full set of posts
///
/// Every call re-reads the content directory. The corpus is a handful of
/// files, so there is no cache to invalidate and edits show up on the next
/// request.
#[derive(Debug, Clone)]
pub struct Catalog {
    source: ContentDir,
}

impl Catalog {
    pub fn new(source: ContentDir) -> Self {
        Self { source }
    }

    /// List post metadata (no bodies), newest first
    ///
    /// Documents that cannot be read or parsed are skipped with a warning.
    /// The sort is stable, so posts sharing a date keep enumeration order.
    pub async fn list(&self) -> Vec<Post> {
        let mut posts = Vec::new();

        for entry in self.source.entries() {
            let raw = match tokio::fs::read_to_string(&entry.path).await {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!("Failed to read {:?}: {}", entry.path, e);
                    continue;
                }
            };
            match Post::parse(&entry.slug, &raw, true) {
                Ok(post) => posts.push(post),
                Err(e) => {
                    tracing::warn!("Skipping document: {}", e);
                }
            }
        }

        // Sort by date descending (newest first)
        posts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        posts
    }

    /// Look up one post with its full body
    ///
    /// `None` for unknown slugs. A document that exists but cannot be read
    /// or parsed also resolves to `None`, with a diagnostic, rather than
    /// failing the request.
    pub async fn get(&self, slug: &str) -> Option<Post> {
        let raw = match self.source.read(slug).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Failed to read post '{}': {}", slug, e);
                return None;
            }
        };

        match Post::parse(slug, &raw, false) {
            Ok(post) => Some(post),
            Err(e) => {
                tracing::warn!("Skipping document: {}", e);
                None
            }
        }
    }
}
