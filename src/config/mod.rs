//! Configuration management
//!
//! [`ThemeConfig`] is shared with the browser build; loading from files and
//! environment is server-only.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served under /pkg (wasm-bindgen output of the browser client)
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,

    #[serde(default)]
    pub theme: ThemeConfig,
}

fn default_port() -> u16 {
    8090
}

fn default_assets_dir() -> String {
    "pkg".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            assets_dir: default_assets_dir(),
            theme: ThemeConfig::default(),
        }
    }
}

/// Id of the `<script type="application/json">` carrying [`ThemeConfig`] to the browser
pub const THEME_CONFIG_ELEMENT_ID: &str = "harbor-theme-config";

/// Names shared by the boot script, the reflector and page CSS
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Persisted-storage key holding the preference
    pub storage_key: String,
    /// Root attribute carrying the preference (the external trigger surface)
    pub attribute: String,
    /// DOM event re-dispatched on every applied theme
    pub event_name: String,
    /// Classes present on the root iff the effective theme is dark
    pub dark_classes: Vec<String>,
    /// Marker class disabling transitions during programmatic flips
    pub no_transition_class: String,
    pub media_query: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_string(),
            attribute: "data-theme".to_string(),
            event_name: "modeChange".to_string(),
            dark_classes: vec!["dark".to_string(), "hbr-mode-dark".to_string()],
            no_transition_class: "[&_*]:!transition-none".to_string(),
            media_query: "(prefers-color-scheme: dark)".to_string(),
        }
    }
}

/// Get config directory (HARBOR_CONFIG_DIR, XDG_CONFIG_HOME or platform default)
pub fn get_config_dir() -> std::path::PathBuf {
    if let Ok(dir) = std::env::var("HARBOR_CONFIG_DIR") {
        return std::path::PathBuf::from(dir);
    }

    #[cfg(target_os = "macos")]
    {
        if let Ok(home) = std::env::var("HOME") {
            return std::path::PathBuf::from(home)
                .join("Library/Application Support/harbor-console");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return std::path::PathBuf::from(xdg).join("harbor-console");
        }
        if let Ok(home) = std::env::var("HOME") {
            return std::path::PathBuf::from(home).join(".config/harbor-console");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("APPDATA") {
            return std::path::PathBuf::from(appdata).join("harbor-console");
        }
    }

    // Fallback to current directory
    std::path::PathBuf::from(".")
}

/// Load configuration: defaults < config file < HARBOR_* env < HARBOR_PORT/PORT
#[cfg(feature = "server")]
pub fn load_config() -> anyhow::Result<Config> {
    let config_dir = get_config_dir();

    let mut builder = ::config::Config::builder()
        .set_default("port", default_port() as i64)?
        .add_source(
            ::config::File::with_name(&config_dir.join("config").to_string_lossy()).required(false),
        )
        // HARBOR_PORT, HARBOR_THEME__STORAGE_KEY, ...
        .add_source(
            ::config::Environment::with_prefix("HARBOR")
                .separator("__")
                .try_parsing(true),
        );

    // Explicit precedence: HARBOR_PORT > PORT > config > default
    if let Ok(port) = std::env::var("HARBOR_PORT") {
        if let Ok(port_num) = port.parse::<u16>() {
            builder = builder.set_override("port", port_num as i64)?;
        }
    } else if let Ok(port) = std::env::var("PORT") {
        if let Ok(port_num) = port.parse::<u16>() {
            builder = builder.set_override("port", port_num as i64)?;
        }
    }

    let config = builder.build()?;

    Ok(config.try_deserialize()?)
}
