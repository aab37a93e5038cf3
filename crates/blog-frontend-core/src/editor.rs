//! Rich-text editor options for the post authoring form.
//!
//! The editor itself is a third-party script loaded by the page. This module
//! only owns the option object handed to `CKEDITOR.replace`, serialized with
//! the editor's camelCase key names.

use serde::{Deserialize, Serialize};

/// Autosave trigger: fires when any matching element is clicked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutosaveConfig {
    pub save_detection_selectors: String,
    /// Debounce in milliseconds.
    pub delay: u32,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            save_detection_selectors: "form input[type='submit']".to_string(),
            delay: 10,
        }
    }
}

/// A named toolbar group. `items` is omitted for plugin-provided groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolbarGroup {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,
}

impl ToolbarGroup {
    fn new(name: &str, items: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            items: items.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

/// Option object for the rich-text editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    pub language: String,
    /// Comma-separated plugin names, as the editor expects.
    pub extra_plugins: String,
    pub remove_plugins: String,
    pub filebrowser_upload_url: String,
    pub filebrowser_upload_method: String,
    pub height: u32,
    pub width: String,
    pub autosave: AutosaveConfig,
    pub allowed_content: bool,
    pub contents_css: String,
    pub body_class: String,
    pub placeholder: String,
    pub toolbar: Vec<ToolbarGroup>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            language: "ru".to_string(),
            extra_plugins: "image2,uploadimage,codesnippet".to_string(),
            remove_plugins: "easyimage,cloudservices".to_string(),
            filebrowser_upload_url: "/upload/".to_string(),
            filebrowser_upload_method: "form".to_string(),
            height: 400,
            width: "auto".to_string(),
            autosave: AutosaveConfig::default(),
            allowed_content: true,
            contents_css: "/static/css/ckeditor_contents.css".to_string(),
            body_class: "document-editor".to_string(),
            placeholder: "Введите текст вашего поста здесь...".to_string(),
            toolbar: default_toolbar(),
        }
    }
}

fn default_toolbar() -> Vec<ToolbarGroup> {
    vec![
        ToolbarGroup::new("clipboard", &["Cut", "Copy", "Paste", "Undo", "Redo"]),
        ToolbarGroup::new("styles", &["Styles", "Format"]),
        ToolbarGroup::new("basicstyles", &["Bold", "Italic", "Strike", "Underline"]),
        ToolbarGroup::new(
            "paragraph",
            &[
                "NumberedList",
                "BulletedList",
                "-",
                "Outdent",
                "Indent",
                "-",
                "Blockquote",
            ],
        ),
        ToolbarGroup::new("links", &["Link", "Unlink"]),
        ToolbarGroup::new("insert", &["Image", "Table", "HorizontalRule", "SpecialChar"]),
        ToolbarGroup::new("document", &["Source"]),
        ToolbarGroup::new("codesnippet", &[]),
    ]
}

impl EditorConfig {
    /// Serialize to the JSON option object passed to the editor.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
