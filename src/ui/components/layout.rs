//! Layout component wrapping all pages with Pico CSS and common elements.

use dioxus::prelude::*;

use super::nav::Nav;
use super::theme::{switcher_script, ThemeSwitcher};
use super::toast::ToastHost;
use crate::config::{ThemeConfig, THEME_CONFIG_ELEMENT_ID};
use crate::theme::boot_script;

/// Browser client bundle (wasm-bindgen `--target web` output)
const CLIENT_LOADER: &str = r#"
import init from '/pkg/harbor-console.js';
init().catch(e => console.warn('theme client unavailable', e));
"#;

/// Escape a class name for use in a CSS selector
fn css_class_selector(class: &str) -> String {
    let mut out = String::with_capacity(class.len() + 1);
    out.push('.');
    for c in class.chars() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            out.push(c);
        } else {
            out.push('\\');
            out.push(c);
        }
    }
    out
}

/// CSS for the application (extends Pico CSS, keyed on the dark classes)
fn custom_styles(config: &ThemeConfig) -> String {
    let dark = config
        .dark_classes
        .first()
        .map(|c| css_class_selector(c))
        .unwrap_or_else(|| ".dark".to_string());
    let marker = css_class_selector(&config.no_transition_class);
    format!(
        r#"
:root {{ --pico-font-size: 15px; }}
:root{dark} {{ color-scheme: dark; --pico-background-color: #13171f; --pico-color: #c2c7d0; }}
body, .card {{ transition: background-color .2s ease, color .2s ease; }}
{marker} * {{ transition: none !important; }}
.workflow-grid {{ display: grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap: 1rem; }}
small {{ color: var(--pico-muted-color); }}
/* Theme switcher */
.theme-switcher {{ display: flex; gap: 0.25rem; }}
.theme-switcher button {{ padding: 0.25rem 0.5rem; font-size: 0.8rem; margin: 0; }}
.theme-switcher button.active {{ background: var(--pico-primary-background); color: var(--pico-primary-inverse); }}
.toast-host {{ position: fixed; right: 1rem; bottom: 1rem; display: flex; flex-direction: column; gap: 0.5rem; }}
"#
    )
}

fn config_json(config: &ThemeConfig) -> String {
    serde_json::to_string(config)
        .unwrap_or_else(|_| "{}".to_string())
        .replace("</", "<\\/")
}

#[derive(Props, Clone, PartialEq)]
pub struct LayoutProps {
    /// Page title (shown in browser tab)
    pub title: String,
    /// Active navigation item ID
    pub nav_active: String,
    /// Theme names shared with the boot script and the browser client
    pub theme: ThemeConfig,
    /// Page content
    pub children: Element,
}

/// Main layout component wrapping all pages.
#[component]
pub fn Layout(props: LayoutProps) -> Element {
    let version = env!("HARBOR_VERSION");
    let styles = custom_styles(&props.theme);
    let boot = boot_script(&props.theme);
    let config = config_json(&props.theme);
    let switcher = switcher_script(&props.theme);

    rsx! {
        head {
            meta { charset: "utf-8" }
            meta { name: "viewport", content: "width=device-width, initial-scale=1" }
            title { "{props.title} - Harbor Console" }
            link { rel: "shortcut icon", href: "/logo.svg" }
            link {
                rel: "stylesheet",
                href: "https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.min.css"
            }
            style { dangerous_inner_html: "{styles}" }
            // Must run before first paint
            script { dangerous_inner_html: "{boot}" }
            script {
                id: THEME_CONFIG_ELEMENT_ID,
                r#type: "application/json",
                dangerous_inner_html: "{config}"
            }
        }
        body {
            header { class: "container",
                Nav { active: props.nav_active.clone() }
            }
            main { class: "container",
                {props.children}
            }
            footer {
                class: "container",
                style: "display:flex;justify-content:space-between;align-items:center;",
                small { "Harbor Console v{version}" }
                ThemeSwitcher {}
            }
            ToastHost {}
            script { dangerous_inner_html: "{switcher}" }
            script { r#type: "module", dangerous_inner_html: CLIENT_LOADER }
        }
    }
}
