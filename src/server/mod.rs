//! HTTP server
//!
//! Four routes: the post list at `/`, one page per post at `/<slug>`, a
//! theme toggle at `POST /theme`, and a not-found page for everything else.
//! Pages are rendered per request from the content directory, so edits show
//! up on refresh without a rebuild step.

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::content::{Catalog, ContentDir, MarkdownRenderer};
use crate::templates::TemplateRenderer;
use crate::theme::{self, Theme, ThemeContext};
use crate::Blog;

/// Shared server state
pub struct AppState {
    config: SiteConfig,
    catalog: Catalog,
    markdown: MarkdownRenderer,
    templates: TemplateRenderer,
}

impl AppState {
    /// Assemble the state for a blog instance
    pub fn new(blog: &Blog) -> Result<Self> {
        Ok(Self {
            catalog: Catalog::new(ContentDir::new(blog.content_dir.clone())),
            markdown: MarkdownRenderer::new(&blog.config.highlight_theme),
            templates: TemplateRenderer::new()?,
            config: blog.config.clone(),
        })
    }
}

/// Build the application router
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/theme", post(toggle_theme_handler))
        .route("/:slug", get(post_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the blog server
pub async fn start(blog: &Blog, ip: &str, port: u16, open: bool) -> Result<()> {
    let state = Arc::new(AppState::new(blog)?);
    let app = build_router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let listener = tokio::net::TcpListener::bind(addr).await?;

    let url = format!("http://{}:{}", ip, port);
    println!("Serving blog at {}", url);
    println!("Press Ctrl+C to stop.");

    // Only open once the port is actually ours
    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown signal received");
}

/// GET / - the post list, newest first
async fn index_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let theme = resolve_theme(&state, &headers);
    let posts = state.catalog.list().await;

    match state.templates.index(&state.config, theme, &posts) {
        Ok(html) => page(html),
        Err(e) => render_error(e),
    }
}

/// GET /:slug - one post, body rendered to HTML
async fn post_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Response {
    let theme = resolve_theme(&state, &headers);

    let Some(post) = state.catalog.get(&slug).await else {
        return not_found_page(&state, theme, &slug);
    };

    let body_html = state.markdown.render(post.body.as_deref().unwrap_or(""));
    match state.templates.post(&state.config, theme, &post, &body_html) {
        Ok(html) => page(html),
        Err(e) => render_error(e),
    }
}

#[derive(Deserialize)]
struct ToggleForm {
    back: Option<String>,
}

/// POST /theme - flip the theme, persist it, and return to the source page
async fn toggle_theme_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<ToggleForm>,
) -> Response {
    let next = resolve_theme(&state, &headers).toggled();

    // 303 so the browser re-GETs the page the toggle was pressed on
    let mut response = Redirect::to(&safe_back(form.back)).into_response();
    if let Ok(value) = HeaderValue::from_str(&theme::persist_cookie(next)) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    response
}

/// Fallback for paths no route matches
async fn fallback_handler(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let theme = resolve_theme(&state, &headers);
    let slug = uri.path().trim_start_matches('/');
    not_found_page(&state, theme, slug)
}

fn resolve_theme(state: &AppState, headers: &HeaderMap) -> Theme {
    ThemeContext::from_headers(headers).resolve(state.config.default_theme)
}

/// Only ever redirect back to a local path
///
/// Backslashes are rejected along with "//" because browsers resolve `\`
/// as `/`, which would turn `/\host` into a schemeless `//host` redirect.
fn safe_back(back: Option<String>) -> String {
    back.filter(|b| {
        b.starts_with('/')
            && !b.starts_with("//")
            && !b.contains('\\')
            && b.chars().all(|c| !c.is_ascii_control())
    })
    .unwrap_or_else(|| "/".to_string())
}

/// Wrap a rendered page, advertising the color-scheme client hint
fn page(html: String) -> Response {
    let mut response = Html(html).into_response();
    let headers = response.headers_mut();
    headers.insert(
        HeaderName::from_static("accept-ch"),
        HeaderValue::from_static("Sec-CH-Prefers-Color-Scheme"),
    );
    headers.insert(
        header::VARY,
        HeaderValue::from_static("Sec-CH-Prefers-Color-Scheme, Cookie"),
    );
    response
}

fn not_found_page(state: &AppState, theme: Theme, slug: &str) -> Response {
    match state.templates.not_found(&state.config, theme, slug) {
        Ok(html) => {
            let mut response = page(html);
            *response.status_mut() = StatusCode::NOT_FOUND;
            response
        }
        Err(e) => render_error(e),
    }
}

fn render_error(e: anyhow::Error) -> Response {
    tracing::error!("Failed to render page: {}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
