//! Light/dark theme resolution
//!
//! The shell renders in one of two themes. Each request resolves its theme
//! from explicit signals instead of process state: a persisted cookie wins,
//! then the client's system color-scheme hint, then the configured default.

use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cookie persisting the visitor's explicit choice
pub const THEME_COOKIE: &str = "theme";

/// Client hint carrying the system-level color scheme
pub const SCHEME_HINT_HEADER: &str = "sec-ch-prefers-color-scheme";

/// The two shell themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Value used for the body class, the cookie, and the client hint
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Parse a persisted value; anything but "light"/"dark" is ignored
    pub fn parse(value: &str) -> Option<Theme> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Theme signals carried by one request
#[derive(Debug, Default, Clone, Copy)]
pub struct ThemeContext {
    /// The visitor's persisted choice, from the theme cookie
    pub preference: Option<Theme>,
    /// The system-level scheme, from the client hint
    pub system: Option<Theme>,
}

impl ThemeContext {
    /// Collect theme signals from request headers
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let preference = cookie_value(headers, THEME_COOKIE)
            .as_deref()
            .and_then(Theme::parse);
        let system = headers
            .get(SCHEME_HINT_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim_matches('"'))
            .and_then(Theme::parse);

        Self { preference, system }
    }

    /// Effective theme: explicit preference, else system scheme, else default
    pub fn resolve(&self, default: Theme) -> Theme {
        self.preference.or(self.system).unwrap_or(default)
    }
}

/// Set-Cookie value persisting a theme choice for a year
pub fn persist_cookie(theme: Theme) -> String {
    format!(
        "{}={}; Max-Age=31536000; Path=/; SameSite=Lax",
        THEME_COOKIE,
        theme.as_str()
    )
}

/// Extract a cookie value from the Cookie header
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        if key.trim() == name && !value.trim().is_empty() {
            Some(value.trim().to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in pairs {
            headers.append(
                axum::http::HeaderName::try_from(*name).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        headers
    }

    #[test]
    fn test_parse_is_strict() {
        assert_eq!(Theme::parse("light"), Some(Theme::Light));
        assert_eq!(Theme::parse("dark"), Some(Theme::Dark));
        assert_eq!(Theme::parse("Dark"), None);
        assert_eq!(Theme::parse("blue"), None);
        assert_eq!(Theme::parse(""), None);
    }

    #[test]
    fn test_toggled() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn test_cookie_wins_over_hint() {
        let headers = headers(&[
            ("cookie", "theme=light"),
            (SCHEME_HINT_HEADER, "dark"),
        ]);
        let ctx = ThemeContext::from_headers(&headers);
        assert_eq!(ctx.resolve(Theme::Dark), Theme::Light);
    }

    #[test]
    fn test_hint_used_without_cookie() {
        let headers = headers(&[(SCHEME_HINT_HEADER, "light")]);
        let ctx = ThemeContext::from_headers(&headers);
        assert_eq!(ctx.resolve(Theme::Dark), Theme::Light);
    }

    #[test]
    fn test_quoted_hint_value() {
        // Browsers send the hint as a quoted sf-string
        let headers = headers(&[(SCHEME_HINT_HEADER, "\"dark\"")]);
        let ctx = ThemeContext::from_headers(&headers);
        assert_eq!(ctx.system, Some(Theme::Dark));
    }

    #[test]
    fn test_default_when_no_signals() {
        let ctx = ThemeContext::from_headers(&HeaderMap::new());
        assert_eq!(ctx.resolve(Theme::Dark), Theme::Dark);
        assert_eq!(ctx.resolve(Theme::Light), Theme::Light);
    }

    #[test]
    fn test_cookie_parsed_among_others() {
        let headers = headers(&[("cookie", "a=1; theme=dark ; b=2")]);
        let ctx = ThemeContext::from_headers(&headers);
        assert_eq!(ctx.preference, Some(Theme::Dark));
    }

    #[test]
    fn test_garbage_cookie_ignored() {
        let headers = headers(&[("cookie", "theme=; other=x; theme")]);
        let ctx = ThemeContext::from_headers(&headers);
        assert_eq!(ctx.preference, None);
    }

    #[test]
    fn test_persist_cookie_format() {
        let cookie = persist_cookie(Theme::Light);
        assert!(cookie.starts_with("theme=light;"));
        assert!(cookie.contains("Max-Age="));
        assert!(cookie.contains("Path=/"));
    }
}
