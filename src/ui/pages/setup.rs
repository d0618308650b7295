//! vManage setup workflow.
//!
//! Collects a name, address and credentials for a vManage endpoint. Nothing
//! is submitted or stored: the browser client answers Save with a toast.

use dioxus::prelude::*;

use crate::config::ThemeConfig;
use crate::forms::{PORT_INPUT_ID, SAVE_BUTTON_ID};
use crate::ui::components::{Layout, PortField, TextField};

#[component]
pub fn SetupPage(theme: ThemeConfig) -> Element {
    rsx! {
        Layout {
            title: "vManage Setup".to_string(),
            nav_active: "setup".to_string(),
            theme: theme,

            hgroup {
                h1 { "vManage Setup" }
                p { "Credentials for a vManage endpoint" }
            }
            form { class: "base-form",
                TextField {
                    label: "Name",
                    id: "vmanage-name",
                    placeholder: "Custom name for saved vManage credentials",
                }
                TextField { label: "vManage IP", id: "vmanage-ip" }
                PortField { label: "vManage Port", id: PORT_INPUT_ID }
                TextField { label: "Username", id: "vmanage-username" }
                TextField { label: "Password", id: "vmanage-password", secret: true }
                button { id: SAVE_BUTTON_ID, r#type: "button", class: "form-btn", "Save" }
            }
        }
    }
}
