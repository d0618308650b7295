//! Conversion workflow.

use dioxus::prelude::*;

use crate::config::ThemeConfig;
use crate::ui::components::Layout;

#[component]
pub fn ConversionPage(theme: ThemeConfig) -> Element {
    rsx! {
        Layout {
            title: "Conversion".to_string(),
            nav_active: "conversion".to_string(),
            theme: theme,

            hgroup {
                h1 { "Conversion" }
                p { "Convert feature templates into configuration groups" }
            }
            article {
                p { "Register a vManage endpoint first, then pick the templates to convert." }
                a { href: "/setup", "role": "button", class: "secondary", "Go to vManage Setup" }
            }
        }
    }
}
