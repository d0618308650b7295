//! Browser bindings for the theme subsystem (wasm32 only).
//!
//! Wires `localStorage`, `matchMedia`, `document.documentElement`,
//! `setTimeout` and a `MutationObserver` into a [`ChangeWatcher`], and mirrors
//! bus events back into the page as a `modeChange` DOM event and toast banners.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CustomEvent, CustomEventInit, Document, Element, MediaQueryList, MediaQueryListEvent,
    MutationObserver, MutationObserverInit, MutationRecord,
};

use crate::bus::{BusEvent, SharedBus, Toast, TOAST_HOST_ID};
use crate::config::ThemeConfig;

use super::error::{ThemeError, ThemeResult};
use super::media::ColorSchemeSource;
use super::preference::PreferenceResolver;
use super::reflector::Reflector;
use super::root::PresentationRoot;
use super::scheduler::{Scheduler, Task};
use super::store::PreferenceStore;
use super::watcher::ChangeWatcher;

fn unavailable(e: JsValue) -> ThemeError {
    ThemeError::StorageUnavailable(format!("{:?}", e))
}

/// `window.localStorage` under a single key
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage(&self) -> ThemeResult<web_sys::Storage> {
        let window = web_sys::window()
            .ok_or_else(|| ThemeError::StorageUnavailable("no window".into()))?;
        window
            .local_storage()
            .map_err(unavailable)?
            .ok_or_else(|| ThemeError::StorageUnavailable("localStorage disabled".into()))
    }
}

impl PreferenceStore for LocalStorageStore {
    fn load(&self) -> ThemeResult<Option<String>> {
        self.storage()?.get_item(&self.key).map_err(unavailable)
    }

    fn save(&self, value: &str) -> ThemeResult<()> {
        self.storage()?.set_item(&self.key, value).map_err(unavailable)
    }

    fn clear(&self) -> ThemeResult<()> {
        self.storage()?.remove_item(&self.key).map_err(unavailable)
    }
}

/// `window.matchMedia(query)`; unsupported hosts yield `None`
pub struct MediaQuerySource {
    list: Option<MediaQueryList>,
}

impl MediaQuerySource {
    pub fn new(query: &str) -> Self {
        let list = web_sys::window().and_then(|w| w.match_media(query).ok().flatten());
        Self { list }
    }

    pub fn list(&self) -> Option<&MediaQueryList> {
        self.list.as_ref()
    }
}

impl ColorSchemeSource for MediaQuerySource {
    fn prefers_dark(&self) -> ThemeResult<bool> {
        self.list
            .as_ref()
            .map(|l| l.matches())
            .ok_or(ThemeError::MediaQueryUnsupported)
    }
}

/// `document.documentElement`
pub struct DocumentRoot {
    element: Element,
}

impl DocumentRoot {
    pub fn new(element: Element) -> Self {
        Self { element }
    }
}

impl PresentationRoot for DocumentRoot {
    fn add_class(&self, class: &str) {
        if let Err(e) = self.element.class_list().add_1(class) {
            tracing::warn!("Failed to add root class {}: {:?}", class, e);
        }
    }

    fn remove_class(&self, class: &str) {
        if let Err(e) = self.element.class_list().remove_1(class) {
            tracing::warn!("Failed to remove root class {}: {:?}", class, e);
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.element.class_list().contains(class)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.element.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if let Err(e) = self.element.set_attribute(name, value) {
            tracing::warn!("Failed to set root attribute {}: {:?}", name, e);
        }
    }
}

/// `setTimeout(task, 0)`
#[derive(Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn defer(&self, task: Task) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let callback = Closure::once_into_js(move || task());
        if let Err(e) = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0)
        {
            tracing::warn!("Failed to schedule deferred theme task: {:?}", e);
        }
    }
}

/// Start theme sync for this document.
///
/// Returns `None` outside a document. The observer and listener closures
/// are leaked on purpose: they live as long as the page.
pub fn install(config: &ThemeConfig, bus: SharedBus) -> Option<Rc<ChangeWatcher>> {
    let document = web_sys::window()?.document()?;
    let element = document.document_element()?;

    // Subscribe before start() so the first-paint event is forwarded too
    forward_bus_events(&document, &bus, config.event_name.clone());

    let media = Rc::new(MediaQuerySource::new(&config.media_query));
    let resolver = PreferenceResolver::new(
        Rc::new(LocalStorageStore::new(config.storage_key.clone())),
        media.clone(),
    );
    let reflector = Reflector::new(
        Rc::new(DocumentRoot::new(element.clone())),
        Rc::new(TimeoutScheduler),
        bus,
        config.clone(),
    );
    let watcher = Rc::new(ChangeWatcher::new(resolver, reflector));
    watcher.start();

    if let Err(e) = observe_attribute(&watcher, &element, &config.attribute) {
        tracing::warn!("Theme attribute changes will not be followed: {}", e);
    }
    if let Err(e) = subscribe_color_scheme(&watcher, media.list()) {
        tracing::warn!("OS color scheme changes will not be followed: {}", e);
    }

    Some(watcher)
}

fn observe_attribute(
    watcher: &Rc<ChangeWatcher>,
    element: &Element,
    attribute: &str,
) -> ThemeResult<()> {
    let w = watcher.clone();
    let callback = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
        move |records: js_sys::Array, _observer: MutationObserver| {
            let olds = records
                .iter()
                .filter_map(|r| r.dyn_into::<MutationRecord>().ok())
                .map(|r| r.old_value());
            w.on_attribute_batch(olds);
        },
    );

    let observer = MutationObserver::new(callback.as_ref().unchecked_ref())
        .map_err(|_| ThemeError::MutationObservationUnsupported)?;
    let init = MutationObserverInit::new();
    init.set_attribute_old_value(true);
    init.set_attribute_filter(&js_sys::Array::of1(&JsValue::from_str(attribute)));
    observer
        .observe_with_options(element, &init)
        .map_err(|_| ThemeError::MutationObservationUnsupported)?;

    callback.forget();
    Ok(())
}

fn subscribe_color_scheme(
    watcher: &Rc<ChangeWatcher>,
    list: Option<&MediaQueryList>,
) -> ThemeResult<()> {
    let list = list.ok_or(ThemeError::MediaQueryUnsupported)?;
    let w = watcher.clone();
    let callback = Closure::<dyn FnMut(MediaQueryListEvent)>::new(
        move |event: MediaQueryListEvent| {
            w.on_color_scheme_change(event.matches());
        },
    );
    list.add_event_listener_with_callback("change", callback.as_ref().unchecked_ref())
        .map_err(|_| ThemeError::MediaQueryUnsupported)?;
    callback.forget();
    Ok(())
}

/// Re-dispatch `ModeChanged` as a DOM event and render toasts as banners
fn forward_bus_events(document: &Document, bus: &SharedBus, event_name: String) {
    let mut rx = bus.subscribe();
    let document = document.clone();
    wasm_bindgen_futures::spawn_local(async move {
        loop {
            match rx.recv().await {
                Ok(BusEvent::ModeChanged { effective, .. }) => {
                    let init = CustomEventInit::new();
                    init.set_detail(&JsValue::from_str(effective.as_str()));
                    match CustomEvent::new_with_event_init_dict(&event_name, &init) {
                        Ok(event) => {
                            let _ = document.dispatch_event(&event);
                        }
                        Err(e) => tracing::warn!("Failed to build {} event: {:?}", event_name, e),
                    }
                }
                Ok(BusEvent::Toast(toast)) => show_toast(&document, &toast),
                Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                    tracing::debug!("Bus forwarder lagged by {} events", n);
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn show_toast(document: &Document, toast: &Toast) {
    // Banners stack in the SSR toast host; pages without one use the body
    let host = match document.get_element_by_id(TOAST_HOST_ID) {
        Some(host) => host,
        None => match document.body() {
            Some(body) => body.into(),
            None => return,
        },
    };
    let Ok(banner) = document.create_element("hbr-banner") else {
        return;
    };
    let _ = banner.set_attribute("duration", "3000");
    let _ = banner.set_attribute("sentiment", toast.sentiment.as_str());
    let _ = banner.set_attribute("closable", "");
    banner.set_inner_html(&format!(
        r#"<hbr-icon slot="icon" name="{icon}"></hbr-icon><strong>{title}</strong><br/>{message}"#,
        icon = toast.sentiment.icon(),
        title = escape_html(&toast.title),
        message = escape_html(&toast.message),
    ));
    if host.append_child(&banner).is_err() {
        return;
    }
    // The banner custom element exposes toast() once upgraded
    if let Ok(show) = js_sys::Reflect::get(&banner, &JsValue::from_str("toast")) {
        if let Some(show) = show.dyn_ref::<js_sys::Function>() {
            let _ = show.call0(&banner);
        }
    }
}
