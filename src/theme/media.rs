//! OS color-scheme signal.

use std::cell::Cell;

use super::error::{ThemeError, ThemeResult};

/// Read side of `(prefers-color-scheme: dark)`.
///
/// Change notifications are pushed into
/// [`ChangeWatcher::on_color_scheme_change`](super::watcher::ChangeWatcher::on_color_scheme_change)
/// by whoever owns the subscription.
pub trait ColorSchemeSource {
    fn prefers_dark(&self) -> ThemeResult<bool>;
}

/// Settable signal for SSR and tests
#[derive(Debug, Default)]
pub struct StaticColorScheme {
    dark: Cell<bool>,
    supported: bool,
}

impl StaticColorScheme {
    pub fn new(dark: bool) -> Self {
        Self {
            dark: Cell::new(dark),
            supported: true,
        }
    }

    /// A host without `matchMedia`
    pub fn unsupported() -> Self {
        Self {
            dark: Cell::new(false),
            supported: false,
        }
    }

    pub fn set(&self, dark: bool) {
        self.dark.set(dark);
    }
}

impl ColorSchemeSource for StaticColorScheme {
    fn prefers_dark(&self) -> ThemeResult<bool> {
        if self.supported {
            Ok(self.dark.get())
        } else {
            Err(ThemeError::MediaQueryUnsupported)
        }
    }
}
