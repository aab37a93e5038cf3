//! Core page behaviors for the blog frontend
//!
//! This crate provides:
//! - Configuration management (`FrontendConfig`, JSON and `data-*` parsing)
//! - Rich-text editor options (`EditorConfig`)
//! - Password visibility toggling, post form validation, and the search gate
//! - Notification actions driven through host traits
//! - Recipient autocomplete state and suggestion fetching
//! - Common error types
//!
//! Nothing here touches the DOM. The browser bindings live in
//! `blog-frontend-wasm`, which implements the [`host`] and [`http`] traits.

#![forbid(unsafe_code)]

pub mod autocomplete;
pub mod config;
pub mod editor;
pub mod error;
pub mod form_guard;
pub mod host;
pub mod http;
pub mod notifications;
pub mod query;
#[cfg(any(test, feature = "test-support"))]
pub mod recording;
pub mod search_gate;
pub mod visibility;

// Re-export key types for convenience
pub use autocomplete::{InputDirective, RecipientAutocomplete, Render};
pub use config::{FrontendConfig, Messages, Selectors};
pub use editor::{AutosaveConfig, EditorConfig, ToolbarGroup};
pub use error::{Error as FrontendError, Result as FrontendResult};
pub use form_guard::{FieldCheck, GuardReport, MarkOp, PostField, validate_post};
pub use host::{DevConsole, Dialogs, Navigation};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use notifications::{ActionOutcome, NotificationAction, decline, perform, run_action};
pub use query::url_parameter;
pub use search_gate::search_disabled;
pub use visibility::{IconPair, InputMode, ToggleOutcome, toggle};
