//! WASM-specific implementation using wasm-bindgen.
//!
//! This module provides the JavaScript-facing API and the browser host that
//! backs the core traits with `window.confirm`, `fetch`, and the console.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use blog_frontend_core::autocomplete::refresh;
use blog_frontend_core::{
    DevConsole, Dialogs, FrontendConfig, FrontendError, FrontendResult, HttpRequest,
    HttpResponse, IconPair, InputDirective, MarkOp, Navigation, NotificationAction, PostField,
    RecipientAutocomplete, Render, Transport, decline, perform, run_action, search_disabled,
    toggle, validate_post,
};
use js_sys::{Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{
    Document, Element, Event, EventTarget, HtmlDocument, HtmlElement, HtmlInputElement,
    HtmlTextAreaElement, Request, RequestInit, Response, Window, console,
};

use crate::console_log::LineBuffer;
use crate::install::settle;
use crate::page_config::{self, CONFIG_SCRIPT_ID};

// ──────────────────────────────────────────────────────────────────────────────
// Initialization
// ──────────────────────────────────────────────────────────────────────────────

/// Runs once when the module is instantiated.
#[wasm_bindgen(start)]
pub fn wasm_init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console-panic")]
    console_error_panic_hook::set_once();
}

struct ConsoleWriter(LineBuffer);

impl io::Write for ConsoleWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.0.write(data)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if let Some(message) = self.0.take_message() {
            console::log_1(&message.into());
        }
    }
}

struct ConsoleMakeWriter;

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter(LineBuffer::default())
    }
}

/// Route `tracing` output to `console.log`. No wall clock on wasm32, so
/// timestamps are off.
fn init_logging(debug: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let subscriber = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_max_level(level)
        .with_ansi(false)
        .without_time()
        .finish();
    // A second BlogFrontend on the same page keeps the first subscriber.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

// ──────────────────────────────────────────────────────────────────────────────
// Browser host
// ──────────────────────────────────────────────────────────────────────────────

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn host_err(value: JsValue) -> FrontendError {
    FrontendError::Host(js_message(&value))
}

fn to_js(err: FrontendError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[derive(Clone)]
struct BrowserHost {
    window: Window,
}

impl BrowserHost {
    fn new() -> FrontendResult<Self> {
        let window = web_sys::window().ok_or_else(|| FrontendError::Host("No window".into()))?;
        Ok(Self { window })
    }

    fn document(&self) -> FrontendResult<Document> {
        self.window
            .document()
            .ok_or_else(|| FrontendError::Host("No document".into()))
    }

    /// `window.confirm`, usable from inside a synchronous event handler.
    fn confirm_now(&self, message: &str) -> bool {
        self.window.confirm_with_message(message).unwrap_or(false)
    }
}

impl Dialogs for BrowserHost {
    async fn confirm(&self, message: &str) -> bool {
        self.confirm_now(message)
    }

    fn alert(&self, message: &str) {
        let _ = self.window.alert_with_message(message);
    }
}

impl DevConsole for BrowserHost {
    fn log(&self, message: &str) {
        console::log_1(&message.into());
    }

    fn error(&self, message: &str) {
        console::error_1(&message.into());
    }
}

impl Navigation for BrowserHost {
    fn reload(&self) {
        let _ = self.window.location().reload();
    }
}

impl Transport for BrowserHost {
    async fn send(&self, request: HttpRequest) -> FrontendResult<HttpResponse> {
        let init = RequestInit::new();
        init.set_method(request.method.as_str());
        let js_request = Request::new_with_str_and_init(&request.url, &init).map_err(host_err)?;
        for (name, value) in &request.headers {
            js_request.headers().set(name, value).map_err(host_err)?;
        }

        let value = JsFuture::from(self.window.fetch_with_request(&js_request))
            .await
            .map_err(|e| FrontendError::Transport(js_message(&e)))?;
        let response: Response = value.dyn_into().map_err(host_err)?;

        let body = match response.text() {
            Ok(promise) => JsFuture::from(promise)
                .await
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_default(),
            Err(_) => String::new(),
        };
        Ok(HttpResponse {
            status: response.status(),
            body,
        })
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// DOM helpers
// ──────────────────────────────────────────────────────────────────────────────

fn listen<T, F>(target: &T, event: &str, handler: F) -> FrontendResult<()>
where
    T: AsRef<EventTarget>,
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .as_ref()
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(host_err)?;
    closure.forget();
    Ok(())
}

fn field_value(element: &Element) -> String {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        element.text_content().unwrap_or_default()
    }
}

fn set_visible(element: &HtmlElement, visible: bool) {
    let display = if visible { "block" } else { "none" };
    let _ = element.style().set_property("display", display);
}

fn render_dropdown(dropdown: &HtmlElement, render: &Render) -> FrontendResult<()> {
    let document = dropdown
        .owner_document()
        .ok_or_else(|| FrontendError::Host("Detached dropdown".into()))?;
    dropdown.set_inner_html("");
    if render.visible {
        let list = document.create_element("ul").map_err(host_err)?;
        for entry in &render.entries {
            let item = document.create_element("li").map_err(host_err)?;
            item.set_text_content(Some(entry.as_str()));
            list.append_child(&item).map_err(host_err)?;
        }
        dropdown.append_child(&list).map_err(host_err)?;
    }
    set_visible(dropdown, render.visible);
    Ok(())
}

fn body_data_attributes(document: &Document) -> Vec<(String, String)> {
    let Some(body) = document.body() else {
        return Vec::new();
    };
    body.get_attribute_names()
        .iter()
        .filter_map(|name| name.as_string())
        .filter_map(|name| body.get_attribute(&name).map(|value| (name, value)))
        .collect()
}

// ──────────────────────────────────────────────────────────────────────────────
// Rich-text editor
// ──────────────────────────────────────────────────────────────────────────────

fn editor_global(window: &Window) -> FrontendResult<JsValue> {
    let value = Reflect::get(window, &JsValue::from_str("CKEDITOR")).map_err(host_err)?;
    if value.is_undefined() || value.is_null() {
        return Err(FrontendError::Host("CKEDITOR is not loaded".into()));
    }
    Ok(value)
}

fn init_editor(window: &Window, config: &FrontendConfig) -> FrontendResult<()> {
    let ckeditor = editor_global(window)?;
    let replace: Function = Reflect::get(&ckeditor, &JsValue::from_str("replace"))
        .map_err(host_err)?
        .dyn_into()
        .map_err(host_err)?;
    let options = js_sys::JSON::parse(&config.editor.to_json()?).map_err(host_err)?;
    replace
        .call2(
            &ckeditor,
            &JsValue::from_str(&config.selectors.body_id),
            &options,
        )
        .map_err(host_err)?;
    Ok(())
}

/// Flush editor content into its backing field, if an instance is attached.
fn sync_editor(window: &Window, field: &str) {
    let Ok(ckeditor) = editor_global(window) else {
        return;
    };
    let Ok(instance) = Reflect::get(&ckeditor, &JsValue::from_str("instances"))
        .and_then(|instances| Reflect::get(&instances, &JsValue::from_str(field)))
    else {
        return;
    };
    if !instance.is_object() {
        return;
    }
    if let Ok(update) = Reflect::get(&instance, &JsValue::from_str("updateElement"))
        .and_then(|f| f.dyn_into::<Function>())
    {
        let _ = update.call0(&instance);
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Main Application
// ──────────────────────────────────────────────────────────────────────────────

/// Page behaviors for one document.
///
/// # Example
///
/// ```javascript
/// window.app = new BlogFrontend();
/// window.app.install();
/// // <a href="#" onclick="app.deleteAllNotifications(event)">...</a>
/// ```
#[wasm_bindgen]
pub struct BlogFrontend {
    config: Rc<FrontendConfig>,
    host: BrowserHost,
    csrf_token: Option<String>,
}

#[wasm_bindgen]
impl BlogFrontend {
    /// Build from the page: the JSON config block, then `<body data-*>`.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<BlogFrontend, JsValue> {
        let host = BrowserHost::new().map_err(to_js)?;
        let document = host.document().map_err(to_js)?;
        let json = document
            .get_element_by_id(CONFIG_SCRIPT_ID)
            .and_then(|el| el.text_content());
        let attrs = body_data_attributes(&document);
        let config = page_config::assemble(
            json.as_deref(),
            attrs.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        )
        .map_err(to_js)?;
        Ok(Self::with_config(host, &document, config))
    }

    /// Create with full configuration.
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(config_json: &str) -> Result<BlogFrontend, JsValue> {
        let config = FrontendConfig::from_json(config_json).map_err(to_js)?;
        let host = BrowserHost::new().map_err(to_js)?;
        let document = host.document().map_err(to_js)?;
        Ok(Self::with_config(host, &document, config))
    }

    /// Attach every behavior whose elements exist on this page. A behavior
    /// that fails to attach is reported and does not stop the others.
    pub fn install(&self) -> Result<(), JsValue> {
        let document = self.host.document().map_err(to_js)?;
        let host = &self.host;
        let toggles = settle(
            host,
            "password toggles",
            self.install_password_toggles(&document),
        );
        let editor = self.install_editor(&document);
        let guard = settle(host, "form guard", self.install_form_guard(&document));
        let search = settle(host, "search gate", self.install_search_gate(&document));
        let autocomplete = settle(
            host,
            "recipient autocomplete",
            self.install_recipient_autocomplete(&document),
        );
        tracing::info!(
            toggles,
            editor,
            guard,
            search,
            autocomplete,
            "page behaviors installed"
        );
        Ok(())
    }

    #[wasm_bindgen(js_name = deleteNotification)]
    pub fn delete_notification(&self, notification_id: u32) {
        self.spawn_action(NotificationAction::Delete(i64::from(notification_id)));
    }

    #[wasm_bindgen(js_name = markAsViewed)]
    pub fn mark_as_viewed(&self, notification_id: u32) {
        self.spawn_action(NotificationAction::MarkViewed(i64::from(notification_id)));
    }

    /// `event` is the click that triggered the call; its default action is
    /// prevented when the user declines.
    #[wasm_bindgen(js_name = deleteAllNotifications)]
    pub fn delete_all_notifications(&self, event: Option<Event>) {
        self.confirm_then_spawn(NotificationAction::DeleteAll, event.as_ref());
    }

    #[wasm_bindgen(js_name = markAllAsViewed)]
    pub fn mark_all_as_viewed(&self, event: Option<Event>) {
        self.confirm_then_spawn(NotificationAction::MarkAllViewed, event.as_ref());
    }

    /// The effective configuration, as a plain JS object.
    #[wasm_bindgen(getter)]
    pub fn config(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.config.as_ref())
            .map_err(|e| JsValue::from_str(&format!("Conversion error: {e}")))
    }
}

impl BlogFrontend {
    fn with_config(host: BrowserHost, document: &Document, config: FrontendConfig) -> Self {
        init_logging(config.debug);
        let cookie = document
            .dyn_ref::<HtmlDocument>()
            .and_then(|d| d.cookie().ok())
            .unwrap_or_default();
        let csrf_token = config.resolve_csrf_token(&cookie);
        if csrf_token.is_none() {
            tracing::warn!("no anti-forgery token on page; notification actions will be rejected");
        }
        Self {
            config: Rc::new(config),
            host,
            csrf_token,
        }
    }

    fn spawn_action(&self, action: NotificationAction) {
        let host = self.host.clone();
        let config = Rc::clone(&self.config);
        let token = self.csrf_token.clone();
        spawn_local(async move {
            run_action(&host, &config, token.as_deref(), action).await;
        });
    }

    /// Confirm synchronously so a decline can still prevent the event's
    /// default action, then finish asynchronously.
    fn confirm_then_spawn(&self, action: NotificationAction, event: Option<&Event>) {
        if !self.host.confirm_now(action.confirm_message(&self.config)) {
            let outcome = decline(&self.host, &self.config, action);
            if let (true, Some(event)) = (outcome.suppress_default(), event) {
                event.prevent_default();
            }
            return;
        }
        let host = self.host.clone();
        let config = Rc::clone(&self.config);
        let token = self.csrf_token.clone();
        spawn_local(async move {
            perform(&host, &config, token.as_deref(), action).await;
        });
    }

    fn install_editor(&self, document: &Document) -> bool {
        let selectors = &self.config.selectors;
        if document.get_element_by_id(&selectors.post_form_id).is_none()
            || document.get_element_by_id(&selectors.body_id).is_none()
        {
            return false;
        }
        match init_editor(&self.host.window, &self.config) {
            Ok(()) => true,
            Err(e) => {
                self.host.error(&e.to_string());
                false
            }
        }
    }

    fn install_password_toggles(&self, document: &Document) -> FrontendResult<u32> {
        let selectors = &self.config.selectors;
        let icons = Rc::new(IconPair::new(
            selectors.icon_obscured_class.clone(),
            selectors.icon_plain_class.clone(),
        ));
        let nodes = document
            .query_selector_all(&selectors.toggle_selector)
            .map_err(host_err)?;

        let mut installed = 0;
        for idx in 0..nodes.length() {
            let Some(icon) = nodes.item(idx).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let document = document.clone();
            let icons = Rc::clone(&icons);
            let attr = selectors.toggle_target_attr.clone();
            let clicked = icon.clone();
            listen(&icon, "click", move |_| {
                let input = clicked
                    .get_attribute(&attr)
                    .and_then(|sel| document.query_selector(&sel).ok().flatten())
                    .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
                let Some(input) = input else {
                    tracing::debug!("toggle target not found");
                    return;
                };
                let outcome = toggle(&input.type_(), &icons);
                input.set_type(outcome.input_type);
                let classes = clicked.class_list();
                let _ = classes.remove_1(outcome.remove_class);
                let _ = classes.add_1(outcome.add_class);
            })?;
            installed += 1;
        }
        Ok(installed)
    }

    fn install_form_guard(&self, document: &Document) -> FrontendResult<bool> {
        let selectors = &self.config.selectors;
        let Some(form) = document.get_element_by_id(&selectors.post_form_id) else {
            return Ok(false);
        };
        let title = document
            .get_element_by_id(&selectors.title_id)
            .ok_or_else(|| FrontendError::ElementNotFound(selectors.title_id.clone()))?;
        let body = document
            .get_element_by_id(&selectors.body_id)
            .ok_or_else(|| FrontendError::ElementNotFound(selectors.body_id.clone()))?;

        let window = self.host.window.clone();
        let body_id = selectors.body_id.clone();
        let invalid = selectors.invalid_class.clone();
        listen(&form, "submit", move |event| {
            sync_editor(&window, &body_id);
            let report = validate_post(&field_value(&title), &field_value(&body));
            for op in report.marks() {
                let (field, add) = match op {
                    MarkOp::AddInvalid(field) => (field, true),
                    MarkOp::RemoveInvalid(field) => (field, false),
                };
                let element = match field {
                    PostField::Title => &title,
                    PostField::Body => &body,
                };
                let classes = element.class_list();
                let _ = if add {
                    classes.add_1(&invalid)
                } else {
                    classes.remove_1(&invalid)
                };
            }
            if !report.allows_submit() {
                for error in report.errors() {
                    tracing::debug!(error = %error, "post form field rejected");
                }
                event.prevent_default();
            }
        })?;
        Ok(true)
    }

    fn install_search_gate(&self, document: &Document) -> FrontendResult<bool> {
        let selectors = &self.config.selectors;
        let Some(button) = document.get_element_by_id(&selectors.search_button_id) else {
            return Ok(false);
        };
        let Some(input) = document
            .query_selector(&selectors.search_input_selector)
            .map_err(host_err)?
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            return Ok(false);
        };

        let gate = {
            let input = input.clone();
            move || {
                let disabled = search_disabled(&input.value());
                let _ = button.toggle_attribute_with_force("disabled", disabled);
            }
        };
        gate();
        listen(&input, "input", move |_| gate())?;
        Ok(true)
    }

    fn install_recipient_autocomplete(&self, document: &Document) -> FrontendResult<bool> {
        let selectors = &self.config.selectors;
        let Some(field) = document
            .get_element_by_id(&selectors.recipient_id)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            return Ok(false);
        };
        let dropdown: HtmlElement = document
            .get_element_by_id(&selectors.suggestions_id)
            .and_then(|el| el.dyn_into().ok())
            .ok_or_else(|| FrontendError::ElementNotFound(selectors.suggestions_id.clone()))?;
        let widget = Rc::new(RefCell::new(RecipientAutocomplete::new()));

        let search = self.host.window.location().search().unwrap_or_default();
        let prefill = RecipientAutocomplete::prefill(&search);
        if !prefill.is_empty() {
            field.set_value(&prefill);
        }

        {
            let widget = Rc::clone(&widget);
            let dropdown = dropdown.clone();
            let host = self.host.clone();
            let config = Rc::clone(&self.config);
            let input = field.clone();
            listen(&field, "input", move |_| {
                let directive = widget.borrow_mut().on_input(&input.value());
                let InputDirective::Fetch(query) = directive else {
                    set_visible(&dropdown, false);
                    return;
                };
                let widget = Rc::clone(&widget);
                let dropdown = dropdown.clone();
                let host = host.clone();
                let config = Rc::clone(&config);
                spawn_local(async move {
                    let Some(render) = refresh(&widget, &host, &host, &config, &query).await
                    else {
                        return;
                    };
                    if let Err(e) = render_dropdown(&dropdown, &render) {
                        host.error(&e.to_string());
                    }
                });
            })?;
        }

        {
            let widget = Rc::clone(&widget);
            let dropdown = dropdown.clone();
            let input = field.clone();
            listen(&field, "focus", move |_| {
                let visible = widget.borrow_mut().on_focus(&input.value());
                set_visible(&dropdown, visible);
            })?;
        }

        {
            let widget = Rc::clone(&widget);
            let dropdown = dropdown.clone();
            listen(&field, "blur", move |_| {
                widget.borrow_mut().on_blur();
                set_visible(&dropdown, false);
            })?;
        }

        // mousedown fires before the input's blur; preventing it keeps focus
        // so the pick is applied before the dropdown hides.
        {
            let widget = Rc::clone(&widget);
            let target_dropdown = dropdown.clone();
            let input = field.clone();
            listen(&dropdown, "mousedown", move |event| {
                let item = event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .and_then(|el| el.closest("li").ok().flatten());
                let Some(item) = item else {
                    return;
                };
                event.prevent_default();
                let text = item.text_content().unwrap_or_default();
                let value = widget.borrow_mut().on_select(&text);
                input.set_value(&value);
                set_visible(&target_dropdown, false);
            })?;
        }

        if let Some(form) = field.form() {
            let host = self.host.clone();
            let config = Rc::clone(&self.config);
            let input = field.clone();
            listen(&form, "submit", move |event| {
                if let Err(e) = widget.borrow().check_submit(&input.value()) {
                    event.prevent_default();
                    tracing::debug!(error = %e, "message form blocked");
                    host.alert(&config.messages.unknown_recipient);
                }
            })?;
        }
        Ok(true)
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Utility exports
// ──────────────────────────────────────────────────────────────────────────────

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
