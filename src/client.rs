//! Browser client entry (wasm32 only).
//!
//! Reads the theme config embedded by the SSR layout, starts theme sync,
//! and attaches the small amount of form behaviour the server markup
//! cannot express.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlInputElement};

use crate::bus::{create_bus, Sentiment, SharedBus, Toast};
use crate::config::{ThemeConfig, THEME_CONFIG_ELEMENT_ID};
use crate::forms::{accept_port_input, parse_port, PORT_INPUT_ID, SAVE_BUTTON_ID};
use crate::theme;

/// Theme names embedded by the server, or defaults when absent or invalid
fn read_page_config(document: &Document) -> ThemeConfig {
    document
        .get_element_by_id(THEME_CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
        .and_then(|json| match serde_json::from_str(&json) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!("Ignoring malformed theme config: {}", e);
                None
            }
        })
        .unwrap_or_default()
}

/// Route `tracing` output and panics to the browser console
fn init_logging() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("console logger already set: {}", e).into());
    }
}

pub fn run() {
    init_logging();
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let config = read_page_config(&document);
    let bus = create_bus();

    if theme::web::install(&config, bus.clone()).is_none() {
        tracing::warn!("Theme sync not started: no document element");
    }
    guard_digit_inputs(&document);
    wire_save_button(&document, bus);
}

/// Reject keystrokes that would make a digits-only input non-numeric
fn guard_digit_inputs(document: &Document) {
    let Ok(inputs) = document.query_selector_all("input[data-digits-only]") else {
        return;
    };
    for i in 0..inputs.length() {
        let Some(input) = inputs
            .item(i)
            .and_then(|n| n.dyn_into::<HtmlInputElement>().ok())
        else {
            continue;
        };
        let target = input.clone();
        let accepted = std::rc::Rc::new(std::cell::RefCell::new(input.value()));
        let callback = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let value = target.value();
            if accept_port_input(&value) {
                *accepted.borrow_mut() = value;
            } else {
                target.set_value(&accepted.borrow());
            }
        });
        if input
            .add_event_listener_with_callback("input", callback.as_ref().unchecked_ref())
            .is_ok()
        {
            callback.forget();
        }
    }
}

/// Save never submits: credentials stay in the form
fn wire_save_button(document: &Document, bus: SharedBus) {
    let Some(button) = document.get_element_by_id(SAVE_BUTTON_ID) else {
        return;
    };
    let port = document
        .get_element_by_id(PORT_INPUT_ID)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
    let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();
        let toast = match port.as_ref().map(|p| parse_port(&p.value())) {
            Some(None) => Toast {
                sentiment: Sentiment::Warning,
                title: "Check the port".to_string(),
                message: "vManage Port must be a number between 1 and 65535.".to_string(),
            },
            _ => Toast {
                sentiment: Sentiment::Info,
                title: "Not saved".to_string(),
                message: "Credentials are never stored by this console.".to_string(),
            },
        };
        bus.toast(toast);
    });
    if button
        .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())
        .is_ok()
    {
        callback.forget();
    }
}
