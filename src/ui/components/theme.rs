//! Theme switcher for light/dark/system preferences.
//!
//! The buttons only write the root `data-theme` attribute. Resolution,
//! write-back and class changes are the theme watcher's job, which observes
//! that attribute.

use dioxus::prelude::*;

use crate::config::ThemeConfig;
use crate::theme::ThemePreference;

/// Client-side JavaScript for the switcher buttons (included in body).
///
/// Buttons are re-marked on every `modeChange` event so they also track
/// changes made by other scripts.
pub fn switcher_script(config: &ThemeConfig) -> String {
    let attr = serde_json::to_string(&config.attribute).unwrap_or_default();
    let event = serde_json::to_string(&config.event_name).unwrap_or_default();
    format!(
        r#"function setThemePreference(p) {{
    document.documentElement.setAttribute({attr}, p);
}}
function markThemeButtons() {{
    const p = document.documentElement.getAttribute({attr}) || 'system';
    ['light','dark','system'].forEach(x => {{
        const btn = document.getElementById('theme-' + x);
        if (btn) btn.classList.toggle('active', x === p);
    }});
}}
document.addEventListener({event}, markThemeButtons);
markThemeButtons();
"#
    )
}

fn buttons_html() -> String {
    [
        ThemePreference::Light,
        ThemePreference::Dark,
        ThemePreference::System,
    ]
    .iter()
    .map(|p| {
        format!(
            r#"<button id="theme-{value}" onclick="setThemePreference('{value}')">{label}</button>"#,
            value = p.as_str(),
            label = p.label()
        )
    })
    .collect()
}

/// Theme switcher with light, dark and system options.
/// Note: raw onclick attributes are used since Dioxus SSR doesn't render
/// string event handlers.
#[component]
pub fn ThemeSwitcher() -> Element {
    let buttons = buttons_html();
    rsx! {
        div {
            class: "theme-switcher",
            dangerous_inner_html: "{buttons}"
        }
    }
}
