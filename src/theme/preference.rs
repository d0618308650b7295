//! Preference resolution.
//!
//! The effective theme is a pure function of the user's preference and the
//! OS dark-mode signal. [`PreferenceResolver`] wraps that function with the
//! two capabilities it reads from, and owns the write-back on explicit changes.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::media::ColorSchemeSource;
use super::store::PreferenceStore;

/// What the user asked for
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Dark,
    Light,
    /// Follow the OS color scheme
    #[default]
    System,
}

impl ThemePreference {
    pub const ALL: [ThemePreference; 3] = [Self::Dark, Self::Light, Self::System];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Dark => "dark",
            ThemePreference::Light => "light",
            ThemePreference::System => "system",
        }
    }

    /// Parse a root attribute value. Anything unrecognised means `system`.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "dark" => ThemePreference::Dark,
            "light" => ThemePreference::Light,
            _ => ThemePreference::System,
        }
    }

    /// Parse a persisted value. Only `dark` and `light` count as a stored
    /// preference; everything else is treated as absent.
    pub fn from_stored(s: &str) -> Option<Self> {
        match s.trim() {
            "dark" => Some(ThemePreference::Dark),
            "light" => Some(ThemePreference::Light),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThemePreference::Dark => "Dark",
            ThemePreference::Light => "Light",
            ThemePreference::System => "System",
        }
    }

    /// Effective theme for this preference under the given OS signal
    pub fn effective(&self, os_dark: bool) -> EffectiveTheme {
        match self {
            ThemePreference::Dark => EffectiveTheme::Dark,
            ThemePreference::Light => EffectiveTheme::Light,
            ThemePreference::System if os_dark => EffectiveTheme::Dark,
            ThemePreference::System => EffectiveTheme::Light,
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What is actually rendered. Never persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectiveTheme {
    Dark,
    #[default]
    Light,
}

impl EffectiveTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectiveTheme::Dark => "dark",
            EffectiveTheme::Light => "light",
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, EffectiveTheme::Dark)
    }
}

impl fmt::Display for EffectiveTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the effective theme.
///
/// Precedence is `explicit`, then `persisted`, then `system`.
pub fn resolve(
    explicit: Option<ThemePreference>,
    persisted: Option<ThemePreference>,
    os_dark: bool,
) -> EffectiveTheme {
    explicit
        .or(persisted)
        .unwrap_or_default()
        .effective(os_dark)
}

/// A resolved theme together with the preference that produced it
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub preference: ThemePreference,
    pub effective: EffectiveTheme,
}

/// Reads the persisted preference and the OS signal, and writes back explicit choices.
#[derive(Clone)]
pub struct PreferenceResolver {
    store: Rc<dyn PreferenceStore>,
    scheme: Rc<dyn ColorSchemeSource>,
}

impl PreferenceResolver {
    pub fn new(store: Rc<dyn PreferenceStore>, scheme: Rc<dyn ColorSchemeSource>) -> Self {
        Self { store, scheme }
    }

    /// Persisted preference, or `None` when absent, unparseable or unreadable
    pub fn persisted(&self) -> Option<ThemePreference> {
        match self.store.load() {
            Ok(value) => value.as_deref().and_then(ThemePreference::from_stored),
            Err(e) => {
                tracing::debug!("Ignoring unreadable theme preference: {}", e);
                None
            }
        }
    }

    /// Current OS dark signal; `false` when the query is unavailable
    pub fn os_dark(&self) -> bool {
        match self.scheme.prefers_dark() {
            Ok(dark) => dark,
            Err(e) => {
                tracing::debug!("Treating OS color scheme as light: {}", e);
                false
            }
        }
    }

    /// Resolve from persisted state and the OS signal (first load)
    pub fn resolve_current(&self) -> Resolution {
        let persisted = self.persisted();
        Resolution {
            preference: persisted.unwrap_or_default(),
            effective: resolve(None, persisted, self.os_dark()),
        }
    }

    /// Resolve an explicit choice and persist it.
    ///
    /// `system` clears the key: only `dark` and `light` are ever stored.
    /// A failed write is dropped: the theme still applies for this session.
    pub fn resolve_explicit(&self, preference: ThemePreference) -> Resolution {
        let written = match preference {
            ThemePreference::System => self.store.clear(),
            _ => self.store.save(preference.as_str()),
        };
        if let Err(e) = written {
            tracing::debug!("Dropping theme write-back ({}): {}", preference, e);
        }
        Resolution {
            preference,
            effective: resolve(Some(preference), None, self.os_dark()),
        }
    }
}
