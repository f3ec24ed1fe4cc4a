//! Post model and document parsing
//!
//! A source document is plain markdown with a fixed two-line header: the
//! first line is the title (usually `# `-prefixed), the second line the
//! publication date exactly as the author wants it displayed. Everything
//! after that is the body.

use chrono::NaiveDateTime;
use serde::Serialize;
use thiserror::Error;

use super::date;

/// Errors raised while turning source documents into posts
#[derive(Error, Debug)]
pub enum ContentError {
    /// The document is shorter than the two-line header
    #[error("malformed document '{slug}': expected a title line and a date line")]
    MalformedDocument { slug: String },
}

/// A blog post
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// URL identifier, the source file's stem
    pub slug: String,

    /// First header line with any leading `#` run stripped
    pub title: String,

    /// Second header line, verbatim; displayed as written
    pub date: String,

    /// Normalized form of `date`, used only for ordering
    pub timestamp: NaiveDateTime,

    /// Markdown body; `None` when the document was parsed header-only
    pub body: Option<String>,
}

impl Post {
    /// Parse a source document
    ///
    /// `header_only` skips assembling the body, for listings that need
    /// nothing past the first two lines.
    pub fn parse(slug: &str, raw: &str, header_only: bool) -> Result<Post, ContentError> {
        let mut lines = raw.lines();

        let (title_line, date_line) = match (lines.next(), lines.next()) {
            (Some(title), Some(date)) => (title, date),
            _ => {
                return Err(ContentError::MalformedDocument {
                    slug: slug.to_string(),
                })
            }
        };

        let title = title_line
            .trim()
            .trim_start_matches('#')
            .trim_start()
            .to_string();
        let date = date_line.trim().to_string();
        let timestamp = date::normalize(&date);

        let body = if header_only {
            None
        } else {
            Some(lines.collect::<Vec<_>>().join("\n").trim().to_string())
        };

        Ok(Post {
            slug: slug.to_string(),
            title,
            date,
            timestamp,
            body,
        })
    }
}
