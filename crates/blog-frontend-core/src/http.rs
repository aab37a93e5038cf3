//! HTTP request/response shapes and the transport seam.
//!
//! The browser crate implements [`Transport`] with `fetch`; tests use a
//! recording mock.

use std::fmt;

use crate::config::FrontendConfig;
use crate::error::Result;

/// Methods used by the page behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outgoing request. `url` is origin-relative (path plus query).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
        }
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// First header value with a case-insensitive name match.
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// State-changing request carrying the anti-forgery header.
    ///
    /// POST bodies are declared JSON, matching what the server views expect.
    /// The token header is always sent; an unresolved token goes out empty
    /// and the server rejects it.
    #[must_use]
    pub fn protected(
        method: HttpMethod,
        url: impl Into<String>,
        config: &FrontendConfig,
        csrf_token: Option<&str>,
    ) -> Self {
        let mut request = Self::new(method, url);
        if method == HttpMethod::Post {
            request = request.header("Content-Type", "application/json");
        }
        request.header(config.csrf_header.clone(), csrf_token.unwrap_or_default())
    }

    /// Suggestion lookup: `GET {endpoint}?input_text={text}`.
    ///
    /// Marked as an AJAX request; the server answers 400 otherwise.
    #[must_use]
    pub fn suggestions(config: &FrontendConfig, input_text: &str) -> Self {
        let url = format!(
            "{}?input_text={}",
            config.endpoints.suggestions,
            urlencoding::encode(input_text)
        );
        Self::new(HttpMethod::Get, url).header("X-Requested-With", "XMLHttpRequest")
    }
}

/// A completed response. Transport failures never produce one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, 200..=299)
    }
}

/// Sends requests. Errors mean the request never completed.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_is_exactly_2xx() {
        let resp = |status| HttpResponse {
            status,
            body: String::new(),
        };
        assert!(!resp(199).is_success());
        assert!(resp(200).is_success());
        assert!(resp(204).is_success());
        assert!(resp(299).is_success());
        assert!(!resp(302).is_success());
        assert!(!resp(403).is_success());
        assert!(!resp(500).is_success());
    }

    #[test]
    fn protected_post_declares_json_and_token() {
        let config = FrontendConfig::default();
        let req =
            HttpRequest::protected(HttpMethod::Post, "/mark_all_as_viewed/", &config, Some("t0k"));
        assert_eq!(req.header_value("content-type"), Some("application/json"));
        assert_eq!(req.header_value("x-csrftoken"), Some("t0k"));
    }

    #[test]
    fn protected_delete_has_no_content_type() {
        let config = FrontendConfig::default();
        let req =
            HttpRequest::protected(HttpMethod::Delete, "/delete_notification/3/", &config, None);
        assert_eq!(req.header_value("Content-Type"), None);
        assert_eq!(req.header_value("X-CSRFToken"), Some(""));
    }

    #[test]
    fn suggestion_query_is_encoded() {
        let config = FrontendConfig::default();
        let req = HttpRequest::suggestions(&config, "Jane D&o");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "/get_user_suggestions/?input_text=Jane%20D%26o");
        assert_eq!(req.header_value("X-Requested-With"), Some("XMLHttpRequest"));
    }
}
