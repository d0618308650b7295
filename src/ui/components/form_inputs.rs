//! Reusable form input components.

use dioxus::prelude::*;

/// A labeled text input.
#[component]
pub fn TextField(
    /// Input label
    label: &'static str,
    /// Element id (also the form field name)
    id: &'static str,
    /// Placeholder text
    placeholder: Option<&'static str>,
    /// Render as a password input
    #[props(default = false)]
    secret: bool,
) -> Element {
    let input_type = if secret { "password" } else { "text" };
    rsx! {
        label { r#for: id,
            "{label}"
            input {
                id: id,
                name: id,
                r#type: input_type,
                placeholder: placeholder.unwrap_or_default(),
                "autocomplete": "off",
            }
        }
    }
}

/// A labeled port input accepting digits only.
///
/// The browser client enforces [`accept_port_input`](crate::forms::accept_port_input)
/// on every `data-digits-only` input.
#[component]
pub fn PortField(
    /// Input label
    label: &'static str,
    /// Element id (also the form field name)
    id: &'static str,
) -> Element {
    rsx! {
        label { r#for: id,
            "{label}"
            input {
                id: id,
                name: id,
                r#type: "text",
                "inputmode": "numeric",
                pattern: "[0-9]*",
                "data-digits-only": "true",
                "autocomplete": "off",
            }
        }
    }
}
