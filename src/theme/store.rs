//! Persisted preference storage.
//!
//! In the browser this is `localStorage` (see [`crate::theme::web`]); the
//! in-memory store backs SSR and tests.

use std::cell::RefCell;

use super::error::{ThemeError, ThemeResult};

/// Key/value store holding the single persisted preference string
pub trait PreferenceStore {
    /// Read the stored value (`None` when the key was never written)
    fn load(&self) -> ThemeResult<Option<String>>;

    /// Overwrite the stored value
    fn save(&self, value: &str) -> ThemeResult<()>;

    /// Remove the key, so the next load reports no preference
    fn clear(&self) -> ThemeResult<()>;
}

/// Process-local store
#[derive(Debug, Default)]
pub struct MemoryStore {
    value: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: RefCell::new(Some(value.into())),
        }
    }

    /// Current raw value
    pub fn get(&self) -> Option<String> {
        self.value.borrow().clone()
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self) -> ThemeResult<Option<String>> {
        Ok(self.get())
    }

    fn save(&self, value: &str) -> ThemeResult<()> {
        *self.value.borrow_mut() = Some(value.to_string());
        Ok(())
    }

    fn clear(&self) -> ThemeResult<()> {
        self.value.borrow_mut().take();
        Ok(())
    }
}

/// Store whose every access fails, like `localStorage` in a sandboxed frame
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingStore;

impl PreferenceStore for FailingStore {
    fn load(&self) -> ThemeResult<Option<String>> {
        Err(ThemeError::StorageUnavailable("storage disabled".into()))
    }

    fn save(&self, _value: &str) -> ThemeResult<()> {
        Err(ThemeError::StorageUnavailable("storage disabled".into()))
    }

    fn clear(&self) -> ThemeResult<()> {
        Err(ThemeError::StorageUnavailable("storage disabled".into()))
    }
}
