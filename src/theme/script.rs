//! Inline `<head>` script applying the theme before first paint.
//!
//! The browser runs this synchronously while parsing, long before any wasm
//! is fetched. It performs the same first-load resolution as
//! [`ChangeWatcher::start`](super::watcher::ChangeWatcher::start), without
//! write-back and without suppression. The storage key and class names
//! are interpolated from the same [`ThemeConfig`] the runtime uses.

use crate::config::ThemeConfig;

/// JSON string literals are valid JS string literals. `</` is split so a
/// value can never close the surrounding `<script>` element.
fn js_str(s: &str) -> String {
    serde_json::to_string(s)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace("</", "<\\/")
}

fn js_array(items: &[String]) -> String {
    serde_json::to_string(items)
        .unwrap_or_else(|_| "[]".to_string())
        .replace("</", "<\\/")
}

/// Render the boot script for `config`
pub fn boot_script(config: &ThemeConfig) -> String {
    format!(
        r#"(function(){{
  var root = document.documentElement;
  var dark = {classes};
  var pref = 'system';
  var isDark = false;
  try {{
    var saved = window.localStorage.getItem({key});
    if (saved === 'dark' || saved === 'light') pref = saved;
  }} catch (e) {{}}
  try {{
    if (pref === 'dark') isDark = true;
    else if (pref === 'system' && window.matchMedia) isDark = window.matchMedia({query}).matches;
  }} catch (e) {{ isDark = false; }}
  dark.forEach(function(c) {{ isDark ? root.classList.add(c) : root.classList.remove(c); }});
  root.setAttribute({attr}, pref);
}})();"#,
        classes = js_array(&config.dark_classes),
        key = js_str(&config.storage_key),
        query = js_str(&config.media_query),
        attr = js_str(&config.attribute),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boot_script_uses_config_names() {
        let script = boot_script(&ThemeConfig::default());
        assert!(script.contains(r#"getItem("theme")"#));
        assert!(script.contains(r#"["dark","hbr-mode-dark"]"#));
        assert!(script.contains(r#"matchMedia("(prefers-color-scheme: dark)")"#));
        assert!(script.contains(r#"setAttribute("data-theme", pref)"#));
    }

    #[test]
    fn test_boot_script_escapes_values() {
        let config = ThemeConfig {
            storage_key: "a\"b</script>".to_string(),
            ..ThemeConfig::default()
        };
        let script = boot_script(&config);
        assert!(script.contains(r#"getItem("a\"b<\/script>")"#));
        assert!(!script.contains("</script>"));
    }

    #[test]
    fn test_boot_script_never_writes_storage() {
        let script = boot_script(&ThemeConfig::default());
        assert!(!script.contains("setItem"));
    }
}
