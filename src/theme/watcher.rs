//! Change watcher state machine.
//!
//! ```text
//! Uninitialized --start--------------------------> Synced(r0)   instant apply
//! Synced(r) ----attribute old != live------------> Synced(r')   write-back, suppressed
//! Synced(r) ----OS change, r.preference = system-> Synced(r')   suppressed
//! ```
//!
//! The reflector writes the root attribute on every apply, so each
//! transition produces one more mutation record. Records are judged
//! against the live attribute, never the value they carry: a record whose
//! old value equals the live one, or whose live value is the preference
//! already reflected, is dropped. That is what stops the cycle, however
//! stale or numerous the queued records are.

use std::cell::Cell;

use super::preference::{PreferenceResolver, Resolution, ThemePreference};
use super::reflector::{ApplyOptions, Reflector};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WatcherState {
    #[default]
    Uninitialized,
    Synced(Resolution),
}

pub struct ChangeWatcher {
    resolver: PreferenceResolver,
    reflector: Reflector,
    state: Cell<WatcherState>,
}

impl ChangeWatcher {
    pub fn new(resolver: PreferenceResolver, reflector: Reflector) -> Self {
        Self {
            resolver,
            reflector,
            state: Cell::new(WatcherState::Uninitialized),
        }
    }

    pub fn state(&self) -> WatcherState {
        self.state.get()
    }

    /// Last applied resolution, if started
    pub fn current(&self) -> Option<Resolution> {
        match self.state.get() {
            WatcherState::Synced(r) => Some(r),
            WatcherState::Uninitialized => None,
        }
    }

    /// First paint: resolve from storage and OS, apply without suppression.
    ///
    /// Attach the attribute observer *after* this returns, otherwise the
    /// initial attribute write is seen as a user change and written back.
    /// Calling it again is a no-op.
    pub fn start(&self) -> Resolution {
        if let Some(current) = self.current() {
            return current;
        }
        let resolution = self.resolver.resolve_current();
        self.reflector.apply(resolution, ApplyOptions::INSTANT);
        self.state.set(WatcherState::Synced(resolution));
        tracing::debug!("Theme synced on first paint: {}", resolution.effective);
        resolution
    }

    /// The root attribute changed away from `old`.
    ///
    /// The new value is read from the live root. Returns whether the
    /// reflector ran.
    pub fn on_attribute_mutation(&self, old: Option<&str>) -> bool {
        let Some(current) = self.current() else {
            return false;
        };
        let live = self.reflector.attribute();
        if old == live.as_deref() {
            tracing::trace!("Ignoring unchanged theme attribute {:?}", live);
            return false;
        }
        if live.as_deref() == Some(current.preference.as_str()) {
            tracing::trace!("Theme attribute {:?} already reflected", live);
            return false;
        }

        let preference = live
            .as_deref()
            .map(ThemePreference::parse)
            .unwrap_or_default();
        let resolution = self.resolver.resolve_explicit(preference);
        self.reflector.apply(resolution, ApplyOptions::SUPPRESSED);
        self.state.set(WatcherState::Synced(resolution));
        tracing::debug!(
            "Theme attribute {:?} -> {:?}, now {}",
            old,
            live,
            resolution.effective
        );
        true
    }

    /// One observer callback's worth of records, given as their old values.
    ///
    /// The batch counts as a single change from the first record's old
    /// value to the live attribute. An empty batch does nothing.
    pub fn on_attribute_batch<I>(&self, old_values: I) -> bool
    where
        I: IntoIterator<Item = Option<String>>,
    {
        match old_values.into_iter().next() {
            Some(first) => self.on_attribute_mutation(first.as_deref()),
            None => false,
        }
    }

    /// The OS color scheme changed. Only followed under a `system` preference.
    ///
    /// Storage is not consulted: the session keeps its preference and only
    /// the effective theme is re-derived. Returns whether the reflector ran.
    pub fn on_color_scheme_change(&self, os_dark: bool) -> bool {
        let Some(current) = self.current() else {
            return false;
        };
        if current.preference != ThemePreference::System {
            tracing::trace!(
                "Ignoring OS color scheme change under {} preference",
                current.preference
            );
            return false;
        }

        let resolution = Resolution {
            preference: current.preference,
            effective: current.preference.effective(os_dark),
        };
        self.reflector.apply(resolution, ApplyOptions::SUPPRESSED);
        self.state.set(WatcherState::Synced(resolution));
        tracing::debug!("OS color scheme changed, now {}", resolution.effective);
        true
    }
}
