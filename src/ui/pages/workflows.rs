//! Workflow picker (landing page).

use dioxus::prelude::*;

use crate::config::ThemeConfig;
use crate::ui::components::Layout;

/// Guided workflows offered by the console: (id, title, description, href)
pub const WORKFLOWS: &[(&str, &str, &str, &str)] = &[
    (
        "setup",
        "vManage Setup",
        "Register the address and credentials of a vManage endpoint.",
        "/setup",
    ),
    (
        "conversion",
        "Conversion",
        "Convert feature templates into configuration groups.",
        "/conversion",
    ),
];

#[component]
pub fn WorkflowsPage(theme: ThemeConfig) -> Element {
    rsx! {
        Layout {
            title: "Workflows".to_string(),
            nav_active: "workflows".to_string(),
            theme: theme,

            hgroup {
                h1 { "Workflows" }
                p { "Pick a guided workflow to get started" }
            }
            div { class: "workflow-grid",
                for (id, title, description, href) in WORKFLOWS.iter() {
                    article { id: "workflow-{id}", class: "card",
                        header { strong { "{title}" } }
                        p { "{description}" }
                        footer {
                            a { href: *href, "role": "button", "Start" }
                        }
                    }
                }
            }
        }
    }
}
