//! Recipient autocomplete sessions, including the stale-cache and
//! arrival-order behaviors.

use std::cell::RefCell;

use blog_frontend_core::autocomplete::refresh;
use blog_frontend_core::recording::RecordingHost;
use blog_frontend_core::{FrontendConfig, InputDirective, RecipientAutocomplete};
use futures::executor::block_on;

fn type_and_fetch(
    widget: &RefCell<RecipientAutocomplete>,
    host: &RecordingHost,
    value: &str,
) -> Option<Vec<String>> {
    let directive = widget.borrow_mut().on_input(value);
    match directive {
        InputDirective::Fetch(query) => {
            block_on(refresh(widget, host, host, &FrontendConfig::default(), &query))
                .map(|render| render.entries)
        }
        InputDirective::Hide => None,
    }
}

#[test]
fn typed_then_selected_recipient_submits() {
    let host = RecordingHost::default().respond_body(200, r#"["Alice","Bob"]"#);
    let widget = RefCell::new(RecipientAutocomplete::new());
    let entries = type_and_fetch(&widget, &host, "a").unwrap();
    assert_eq!(entries, ["Alice", "Bob"]);

    let mut widget = widget.into_inner();
    let value = widget.on_select("Alice");
    assert!(widget.check_submit(&value).is_ok());
    assert!(widget.check_submit("Al").is_err());
}

#[test]
fn stale_cache_rejects_value_edited_after_last_fetch() {
    let host = RecordingHost::default().respond_body(200, r#"["Alice"]"#);
    let widget = RefCell::new(RecipientAutocomplete::new());
    type_and_fetch(&widget, &host, "Ali").unwrap();

    // Clearing the field hides the dropdown without issuing a request.
    assert_eq!(type_and_fetch(&widget, &host, ""), None);
    assert_eq!(host.sent().len(), 1);

    // The cache still reflects the "Ali" query.
    let widget = widget.borrow();
    assert!(widget.check_submit("Alice").is_ok());
    assert!(widget.check_submit("Bob").is_err());
}

#[test]
fn responses_apply_in_arrival_order() {
    let config = FrontendConfig::default();
    let host = RecordingHost::default()
        .respond_body(200, r#"["Alina"]"#)
        .respond_body(200, r#"["Alice","Alina"]"#);
    let widget = RefCell::new(RecipientAutocomplete::new());

    // Issued for "Al" first, but the "Ali" request completes first.
    let older = refresh(&widget, &host, &host, &config, "Al");
    let newer = refresh(&widget, &host, &host, &config, "Ali");
    block_on(newer).unwrap();
    block_on(older).unwrap();

    assert_eq!(host.sent()[0].url, "/get_user_suggestions/?input_text=Ali");
    assert_eq!(widget.borrow().suggestions(), ["Alice", "Alina"]);
}

#[test]
fn suggestion_requests_encode_the_raw_field_value() {
    let host = RecordingHost::default().respond_body(200, "[]");
    let widget = RefCell::new(RecipientAutocomplete::new());
    let entries = type_and_fetch(&widget, &host, "Jane Doe").unwrap();
    assert!(entries.is_empty());
    assert!(!widget.borrow().is_visible());
    assert_eq!(
        host.sent()[0].url,
        "/get_user_suggestions/?input_text=Jane%20Doe"
    );
}
