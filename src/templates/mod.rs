//! Embedded shell templates using the Tera template engine
//!
//! The handful of pages this site serves are compiled into the binary, so a
//! deployment is one executable next to a content directory. Tera's
//! autoescaping stays on; only the markdown renderer's output is passed
//! through with `safe`.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::Post;
use crate::theme::Theme;

/// Template renderer with the embedded page shell
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all shell templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("shell/layout.html")),
            ("index.html", include_str!("shell/index.html")),
            ("post.html", include_str!("shell/post.html")),
            ("not_found.html", include_str!("shell/not_found.html")),
            ("style.css", include_str!("shell/style.css")),
        ])?;

        Ok(Self { tera })
    }

    /// Render the post list
    pub fn index(&self, site: &SiteConfig, theme: Theme, posts: &[Post]) -> Result<String> {
        let rows: Vec<PostRow> = posts.iter().map(PostRow::from).collect();
        let mut context = base_context(site, theme, "/");
        context.insert("posts", &rows);
        Ok(self.tera.render("index.html", &context)?)
    }

    /// Render one post, with its body already rendered to HTML
    pub fn post(&self, site: &SiteConfig, theme: Theme, post: &Post, body_html: &str) -> Result<String> {
        let mut context = base_context(site, theme, &format!("/{}", post.slug));
        context.insert("post", &PostRow::from(post));
        context.insert("content", body_html);
        Ok(self.tera.render("post.html", &context)?)
    }

    /// Render the not-found page for a missing slug
    pub fn not_found(&self, site: &SiteConfig, theme: Theme, slug: &str) -> Result<String> {
        let mut context = base_context(site, theme, "/");
        context.insert("slug", slug);
        Ok(self.tera.render("not_found.html", &context)?)
    }
}

/// Context shared by every page: site config, resolved theme, current path
fn base_context(site: &SiteConfig, theme: Theme, path: &str) -> Context {
    let mut context = Context::new();
    context.insert("site", site);
    context.insert("theme", theme.as_str());
    context.insert("path", path);
    context
}

/// One list row; the date is shown verbatim, as written in the document
#[derive(Debug, Clone, Serialize)]
struct PostRow {
    slug: String,
    title: String,
    date: String,
}

impl From<&Post> for PostRow {
    fn from(post: &Post) -> Self {
        Self {
            slug: post.slug.clone(),
            title: post.title.clone(),
            date: post.date.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(slug: &str, title: &str, date: &str) -> Post {
        Post {
            slug: slug.to_string(),
            title: title.to_string(),
            date: date.to_string(),
            timestamp: chrono::NaiveDateTime::UNIX_EPOCH,
            body: None,
        }
    }

    #[test]
    fn test_templates_load() {
        assert!(TemplateRenderer::new().is_ok());
    }

    #[test]
    fn test_index_lists_posts_in_order() {
        let renderer = TemplateRenderer::new().unwrap();
        let site = SiteConfig::default();
        let posts = vec![
            post("world", "World", "2nd January, 2024"),
            post("hello", "Hello", "1st January, 2024"),
        ];

        let html = renderer.index(&site, Theme::Dark, &posts).unwrap();
        assert!(html.contains(r#"href="/world""#));
        assert!(html.contains(r#"href="/hello""#));
        assert!(html.find("World").unwrap() < html.find("Hello").unwrap());
        // Dates appear exactly as written
        assert!(html.contains("2nd January, 2024"));
        assert!(html.contains(r#"<body class="dark">"#));
    }

    #[test]
    fn test_index_empty_state() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer
            .index(&SiteConfig::default(), Theme::Light, &[])
            .unwrap();
        assert!(html.contains("No posts yet"));
        assert!(html.contains(r#"<body class="light">"#));
    }

    #[test]
    fn test_post_body_not_escaped_title_escaped() {
        let renderer = TemplateRenderer::new().unwrap();
        let site = SiteConfig::default();
        let record = post("x", "Tags & <such>", "1st May, 2024");

        let html = renderer
            .post(&site, Theme::Dark, &record, "<p>rendered <em>body</em></p>")
            .unwrap();
        assert!(html.contains("<p>rendered <em>body</em></p>"));
        assert!(html.contains("Tags &amp; &lt;such&gt;"));
    }

    #[test]
    fn test_not_found_names_slug() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer
            .not_found(&SiteConfig::default(), Theme::Dark, "missing-post")
            .unwrap();
        assert!(html.contains("missing-post"));
    }

    #[test]
    fn test_styles_inlined() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer
            .index(&SiteConfig::default(), Theme::Dark, &[])
            .unwrap();
        assert!(html.contains("<style>"));
        assert!(html.contains("--bg:"));
    }
}
