//! Recipient autocomplete for the send-message form.
//!
//! The widget instance owns its suggestion cache. Every non-blank input event
//! fetches suggestions (no debounce, no cancellation), and responses are
//! applied in arrival order. Submit-time membership is checked against
//! whatever the last applied response contained, so a value typed after the
//! last fetch may be rejected even if the server would have suggested it.

use std::cell::RefCell;

use crate::config::FrontendConfig;
use crate::error::{Error, Result};
use crate::host::DevConsole;
use crate::http::{HttpRequest, Transport};

/// What to do after an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputDirective {
    /// Fetch suggestions for this query (the untrimmed field value).
    Fetch(String),
    /// Hide the dropdown; the cache is left as is.
    Hide,
}

/// Dropdown contents after applying a suggestion response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Render {
    pub entries: Vec<String>,
    pub visible: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RecipientAutocomplete {
    suggestions: Vec<String>,
    visible: bool,
    rendered: bool,
}

impl RecipientAutocomplete {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Field value to pre-fill from the page's `recipient` query parameter.
    #[must_use]
    pub fn prefill(search: &str) -> String {
        crate::query::url_parameter(search, "recipient")
    }

    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn on_input(&mut self, value: &str) -> InputDirective {
        if value.trim().is_empty() {
            self.visible = false;
            InputDirective::Hide
        } else {
            InputDirective::Fetch(value.to_string())
        }
    }

    /// Replace the cache wholesale and render it. An empty list hides the
    /// dropdown.
    pub fn apply_suggestions(&mut self, suggestions: Vec<String>) -> Render {
        self.suggestions = suggestions;
        self.rendered = true;
        self.visible = !self.suggestions.is_empty();
        tracing::debug!(count = self.suggestions.len(), "suggestions applied");
        Render {
            entries: self.suggestions.clone(),
            visible: self.visible,
        }
    }

    /// Returns whether the dropdown should now be shown.
    pub fn on_focus(&mut self, value: &str) -> bool {
        if !value.is_empty() && self.rendered {
            self.visible = true;
        }
        self.visible
    }

    pub fn on_blur(&mut self) {
        self.visible = false;
    }

    /// A suggestion was picked; returns the new field value.
    pub fn on_select(&mut self, text: &str) -> String {
        self.visible = false;
        text.to_string()
    }

    /// Exact, case-sensitive membership in the cached suggestions.
    pub fn check_submit(&self, value: &str) -> Result<()> {
        if self.suggestions.iter().any(|s| s == value) {
            Ok(())
        } else {
            Err(Error::UnknownRecipient(value.to_string()))
        }
    }
}

/// Fetch and apply suggestions for `query`. On failure the widget is left
/// untouched and `"{status}: {body}"` goes to the console.
///
/// The widget is only borrowed once the response is in, so input, focus, and
/// blur handlers keep running while the request is pending.
pub async fn refresh<T, C>(
    widget: &RefCell<RecipientAutocomplete>,
    transport: &T,
    console: &C,
    config: &FrontendConfig,
    query: &str,
) -> Option<Render>
where
    T: Transport,
    C: DevConsole,
{
    match fetch_suggestions(transport, config, query).await {
        Ok(list) => Some(widget.borrow_mut().apply_suggestions(list)),
        Err(e) => {
            report_fetch_error(console, &e);
            None
        }
    }
}

/// GET the suggestion list for `query`.
pub async fn fetch_suggestions<T: Transport>(
    transport: &T,
    config: &FrontendConfig,
    query: &str,
) -> Result<Vec<String>> {
    let response = transport
        .send(HttpRequest::suggestions(config, query))
        .await?;
    if !response.is_success() {
        return Err(Error::HttpStatus {
            status: response.status,
            body: response.body,
        });
    }
    Ok(serde_json::from_str(&response.body)?)
}

/// Console line for a failed fetch.
pub fn report_fetch_error<C: DevConsole>(console: &C, error: &Error) {
    tracing::warn!(error = %error, "suggestion fetch failed");
    match error {
        Error::HttpStatus { status, body } => console.log(&format!("{status}: {body}")),
        other => console.log(&format!("0: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{Call, RecordingHost};
    use futures::executor::block_on;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn cached_member_submits_prefix_does_not() {
        let mut widget = RecipientAutocomplete::new();
        widget.apply_suggestions(names(&["Alice", "Bob"]));
        assert!(widget.check_submit("Alice").is_ok());
        let err = widget.check_submit("Al").unwrap_err();
        assert_eq!(err.error_type(), "UNKNOWN_RECIPIENT");
        assert!(widget.check_submit("alice").is_err());
    }

    #[test]
    fn empty_cache_rejects_everything() {
        let widget = RecipientAutocomplete::new();
        assert!(widget.check_submit("").is_err());
        assert!(widget.check_submit("Alice").is_err());
    }

    #[test]
    fn blank_input_hides_but_keeps_cache() {
        let mut widget = RecipientAutocomplete::new();
        widget.apply_suggestions(names(&["Alice"]));
        assert!(widget.is_visible());
        assert_eq!(widget.on_input("  "), InputDirective::Hide);
        assert!(!widget.is_visible());
        assert_eq!(widget.suggestions(), ["Alice"]);
    }

    #[test]
    fn non_blank_input_fetches_raw_value() {
        let mut widget = RecipientAutocomplete::new();
        assert_eq!(widget.on_input(" Al"), InputDirective::Fetch(" Al".into()));
    }

    #[test]
    fn empty_response_hides_dropdown() {
        let mut widget = RecipientAutocomplete::new();
        let render = widget.apply_suggestions(Vec::new());
        assert!(!render.visible);
        assert!(render.entries.is_empty());
    }

    #[test]
    fn focus_shows_only_after_a_render() {
        let mut widget = RecipientAutocomplete::new();
        assert!(!widget.on_focus("Al"));
        widget.apply_suggestions(names(&["Alice"]));
        widget.on_blur();
        assert!(!widget.is_visible());
        assert!(widget.on_focus("Al"));
        widget.on_blur();
        assert!(!widget.on_focus(""));
    }

    #[test]
    fn select_fills_field_and_hides() {
        let mut widget = RecipientAutocomplete::new();
        widget.apply_suggestions(names(&["Alice", "Bob"]));
        assert_eq!(widget.on_select("Bob"), "Bob");
        assert!(!widget.is_visible());
        assert!(widget.check_submit("Bob").is_ok());
    }

    #[test]
    fn prefill_reads_recipient_param() {
        assert_eq!(RecipientAutocomplete::prefill("?recipient=Jane+Doe"), "Jane Doe");
        assert_eq!(RecipientAutocomplete::prefill("?page=1"), "");
    }

    #[test]
    fn refresh_applies_json_list() {
        let host = RecordingHost::default().respond_body(200, r#"["Alice","Alina"]"#);
        let widget = RefCell::new(RecipientAutocomplete::new());
        let config = FrontendConfig::default();
        let render = block_on(refresh(&widget, &host, &host, &config, "Al")).unwrap();
        assert_eq!(render.entries, ["Alice", "Alina"]);
        assert!(render.visible);
        assert_eq!(host.sent()[0].url, "/get_user_suggestions/?input_text=Al");
    }

    #[test]
    fn refresh_failure_logs_status_and_body() {
        let host = RecordingHost::default().respond_body(400, "{}");
        let widget = RefCell::new(RecipientAutocomplete::new());
        widget.borrow_mut().apply_suggestions(names(&["Alice"]));
        let config = FrontendConfig::default();
        let render = block_on(refresh(&widget, &host, &host, &config, "Al"));
        assert!(render.is_none());
        assert_eq!(widget.borrow().suggestions(), ["Alice"]);
        assert_eq!(host.calls(), [Call::Log("400: {}".into())]);
    }

    #[test]
    fn refresh_rejects_non_list_body() {
        let host = RecordingHost::default().respond_body(200, r#"{"a":1}"#);
        let widget = RefCell::new(RecipientAutocomplete::new());
        let config = FrontendConfig::default();
        assert!(block_on(refresh(&widget, &host, &host, &config, "Al")).is_none());
        assert!(widget.borrow().suggestions().is_empty());
        assert_eq!(host.calls().len(), 1);
    }

    #[test]
    fn widget_is_free_while_request_is_pending() {
        let host = RecordingHost::default().respond_body(200, r#"["Alice"]"#);
        let widget = RefCell::new(RecipientAutocomplete::new());
        let config = FrontendConfig::default();
        let pending = Box::pin(refresh(&widget, &host, &host, &config, "Al"));

        // A blur handler runs before the response is polled in.
        widget.borrow_mut().on_blur();
        assert!(widget.try_borrow_mut().is_ok());

        let render = block_on(pending).unwrap();
        assert_eq!(render.entries, ["Alice"]);
    }
}
