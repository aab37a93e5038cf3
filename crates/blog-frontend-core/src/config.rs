//! Configuration management for the blog frontend
//!
//! Defaults match the server-rendered templates. A page may override them
//! with a JSON document (`FrontendConfig::from_json`) or with `data-*`
//! attributes on the root element (`FrontendConfig::apply_attributes`).

use serde::{Deserialize, Serialize};

use crate::editor::EditorConfig;
use crate::error::{Error, Result};

/// Element ids, selectors, and class names the behaviors attach to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub post_form_id: String,
    pub title_id: String,
    /// Also the editor field name.
    pub body_id: String,
    pub invalid_class: String,
    pub toggle_selector: String,
    /// Attribute on a toggle icon holding the selector of its input.
    pub toggle_target_attr: String,
    /// Icon class while the input is obscured.
    pub icon_obscured_class: String,
    /// Icon class while the input is plain.
    pub icon_plain_class: String,
    pub search_input_selector: String,
    pub search_button_id: String,
    pub recipient_id: String,
    pub suggestions_id: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            post_form_id: "create-post-form".to_string(),
            title_id: "title".to_string(),
            body_id: "body".to_string(),
            invalid_class: "is-invalid".to_string(),
            toggle_selector: ".password-toggle-icon".to_string(),
            toggle_target_attr: "toggle".to_string(),
            icon_obscured_class: "bi-eye".to_string(),
            icon_plain_class: "bi-eye-slash".to_string(),
            search_input_selector: ".form-control".to_string(),
            search_button_id: "searchBtn".to_string(),
            recipient_id: "recipient".to_string(),
            suggestions_id: "recipient-suggestions".to_string(),
        }
    }
}

/// Server endpoints, relative to the page origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub suggestions: String,
    pub delete_notification: String,
    pub mark_as_viewed: String,
    pub delete_all_notifications: String,
    pub mark_all_as_viewed: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            suggestions: "/get_user_suggestions/".to_string(),
            delete_notification: "/delete_notification/".to_string(),
            mark_as_viewed: "/mark_as_viewed/".to_string(),
            delete_all_notifications: "/delete_all_notifications/".to_string(),
            mark_all_as_viewed: "/mark_all_as_viewed/".to_string(),
        }
    }
}

/// User-facing strings. Defaults are the site's Russian copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub confirm_delete: String,
    pub confirm_mark_viewed: String,
    pub confirm_delete_all: String,
    pub confirm_mark_all_viewed: String,
    pub deleted_all: String,
    pub marked_all_viewed: String,
    pub cancelled_delete_all: String,
    pub cancelled_mark_all_viewed: String,
    pub unknown_recipient: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            confirm_delete: "Вы уверены, что хотите удалить это уведомление?".to_string(),
            confirm_mark_viewed: "Отметить это уведомление как просмотренное?".to_string(),
            confirm_delete_all: "Вы уверены, что хотите удалить все уведомления?".to_string(),
            confirm_mark_all_viewed: "Вы уверены, что хотите просмотреть все уведомления?"
                .to_string(),
            deleted_all: "Все уведомления успешно удалены.".to_string(),
            marked_all_viewed: "Все уведомления отмечены как просмотренные.".to_string(),
            cancelled_delete_all: "Отменено удаление всех уведомлений.".to_string(),
            cancelled_mark_all_viewed: "Отменено просмотр всех уведомлений.".to_string(),
            unknown_recipient: "Введите существующее имя из списка подсказок.".to_string(),
        }
    }
}

/// Main configuration struct for the blog frontend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    pub selectors: Selectors,
    pub endpoints: Endpoints,
    pub messages: Messages,
    pub editor: EditorConfig,

    // Anti-forgery
    pub csrf_header: String,
    pub csrf_cookie: String,
    /// Token injected by the template. Falls back to the cookie when absent.
    pub csrf_token: Option<String>,

    /// Log at DEBUG instead of INFO.
    pub debug: bool,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            endpoints: Endpoints::default(),
            messages: Messages::default(),
            editor: EditorConfig::default(),
            csrf_header: "X-CSRFToken".to_string(),
            csrf_cookie: "csrftoken".to_string(),
            csrf_token: None,
            debug: false,
        }
    }
}

impl FrontendConfig {
    /// Parse a full or partial JSON configuration. Missing keys keep defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    /// Apply `data-*` style overrides. Keys may carry the `data-` prefix or not.
    /// Unknown keys are ignored.
    pub fn apply_attributes<'a, I>(&mut self, attrs: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (key, value) in attrs {
            let key = key.strip_prefix("data-").unwrap_or(key);
            match key {
                "csrf-token" => {
                    self.csrf_token = Some(value.trim().to_string()).filter(|s| !s.is_empty());
                }
                "csrf-header" => set_nonempty(&mut self.csrf_header, value),
                "csrf-cookie" => set_nonempty(&mut self.csrf_cookie, value),
                "debug" => self.debug = parse_bool(value, self.debug),
                "suggestions-url" => set_nonempty(&mut self.endpoints.suggestions, value),
                "editor-language" => set_nonempty(&mut self.editor.language, value),
                "upload-url" => set_nonempty(&mut self.editor.filebrowser_upload_url, value),
                "editor-height" => {
                    self.editor.height = value.trim().parse().unwrap_or(self.editor.height);
                }
                _ => tracing::debug!(key, "ignoring unknown config attribute"),
            }
        }
    }

    /// Resolve the anti-forgery token: explicit value first, then the cookie.
    #[must_use]
    pub fn resolve_csrf_token(&self, cookie_header: &str) -> Option<String> {
        self.csrf_token
            .clone()
            .or_else(|| cookie_value(cookie_header, &self.csrf_cookie))
    }
}

fn set_nonempty(slot: &mut String, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        *slot = value.to_string();
    }
}

fn parse_bool(value: &str, default: bool) -> bool {
    match value.trim().to_lowercase().as_str() {
        // bare `data-debug` attribute counts as set
        "" | "1" | "true" | "t" | "yes" | "y" => true,
        "0" | "false" | "f" | "no" | "n" => false,
        _ => default,
    }
}

/// Look up `name` in a `document.cookie` style string (`a=1; b=2`).
#[must_use]
pub fn cookie_value(cookie_header: &str, name: &str) -> Option<String> {
    cookie_header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| {
            urlencoding::decode(value).map_or_else(|_| value.to_string(), |v| v.into_owned())
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_templates() {
        let config = FrontendConfig::default();
        assert_eq!(config.selectors.post_form_id, "create-post-form");
        assert_eq!(config.selectors.search_button_id, "searchBtn");
        assert_eq!(config.endpoints.suggestions, "/get_user_suggestions/");
        assert_eq!(config.csrf_header, "X-CSRFToken");
        assert!(config.csrf_token.is_none());
        assert!(!config.debug);
    }

    #[test]
    fn partial_json_overrides_only_given_fields() {
        let config = FrontendConfig::from_json(
            r#"{"debug": true, "selectors": {"recipient_id": "to"}, "csrf_token": "abc"}"#,
        )
        .unwrap();
        assert!(config.debug);
        assert_eq!(config.selectors.recipient_id, "to");
        assert_eq!(config.selectors.suggestions_id, "recipient-suggestions");
        assert_eq!(config.csrf_token.as_deref(), Some("abc"));
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = FrontendConfig::from_json("{not json").unwrap_err();
        assert_eq!(err.error_type(), "CONFIG_ERROR");
    }

    #[test]
    fn attributes_override_with_lenient_bools() {
        let mut config = FrontendConfig::default();
        config.apply_attributes([
            ("data-debug", "yes"),
            ("data-csrf-token", " tok "),
            ("editor-height", "300"),
            ("data-unknown", "x"),
        ]);
        assert!(config.debug);
        assert_eq!(config.csrf_token.as_deref(), Some("tok"));
        assert_eq!(config.editor.height, 300);

        config.apply_attributes([("data-debug", "n"), ("data-editor-height", "tall")]);
        assert!(!config.debug);
        assert_eq!(config.editor.height, 300);
    }

    #[test]
    fn empty_csrf_attribute_clears_token() {
        let mut config = FrontendConfig {
            csrf_token: Some("old".into()),
            ..FrontendConfig::default()
        };
        config.apply_attributes([("data-csrf-token", "  ")]);
        assert!(config.csrf_token.is_none());
    }

    #[test]
    fn csrf_token_falls_back_to_cookie() {
        let config = FrontendConfig::default();
        assert_eq!(
            config.resolve_csrf_token("sessionid=1; csrftoken=a%2Bb; theme=dark"),
            Some("a+b".to_string())
        );
        assert_eq!(config.resolve_csrf_token("sessionid=1"), None);

        let explicit = FrontendConfig {
            csrf_token: Some("page".into()),
            ..FrontendConfig::default()
        };
        assert_eq!(
            explicit.resolve_csrf_token("csrftoken=cookie"),
            Some("page".to_string())
        );
    }
}
