//! Mount point for toast banners.
//!
//! The browser client appends `hbr-banner` elements for every
//! [`BusEvent::Toast`](crate::bus::BusEvent::Toast) it receives.

use dioxus::prelude::*;

use crate::bus::TOAST_HOST_ID;

#[component]
pub fn ToastHost() -> Element {
    rsx! {
        div { id: TOAST_HOST_ID, class: "toast-host", "aria-live": "polite" }
    }
}
