//! Navigation component for the web UI.

use dioxus::prelude::*;

/// Navigation links for the main menu.
const NAV_LINKS: &[(&str, &str, &str)] = &[
    ("workflows", "Workflows", "/"),
    ("setup", "vManage Setup", "/setup"),
    ("conversion", "Conversion", "/conversion"),
];

#[derive(Props, Clone, PartialEq)]
pub struct NavProps {
    /// The currently active page ID (e.g., "workflows", "setup")
    pub active: String,
}

/// Navigation bar component.
#[component]
pub fn Nav(props: NavProps) -> Element {
    rsx! {
        nav {
            ul {
                li {
                    strong { "Harbor Console" }
                }
            }
            ul {
                for (id, label, href) in NAV_LINKS.iter() {
                    li {
                        if *id == props.active.as_str() {
                            a {
                                href: *href,
                                "aria-current": "page",
                                strong { "{label}" }
                            }
                        } else {
                            a {
                                href: *href,
                                "{label}"
                            }
                        }
                    }
                }
            }
        }
    }
}
