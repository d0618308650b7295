//! The document root's presentation state.
//!
//! Only the reflector writes to it. [`MemoryRoot`] records every attribute
//! write the way a `MutationObserver` with `attributeOldValue` would see it,
//! which lets native code drive the watcher's mutation path.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

/// Class list and attributes of the root element
pub trait PresentationRoot {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;
    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);
}

/// One observed attribute write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeMutation {
    pub name: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

/// Comparable copy of the root state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootSnapshot {
    pub classes: BTreeSet<String>,
    pub attributes: BTreeMap<String, String>,
}

/// In-memory root element
#[derive(Debug, Default)]
pub struct MemoryRoot {
    classes: RefCell<BTreeSet<String>>,
    attributes: RefCell<BTreeMap<String, String>>,
    mutations: RefCell<Vec<AttributeMutation>>,
}

impl MemoryRoot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> RootSnapshot {
        RootSnapshot {
            classes: self.classes.borrow().clone(),
            attributes: self.attributes.borrow().clone(),
        }
    }

    /// Remove an attribute, recording it like a `MutationObserver` would
    pub fn remove_attribute(&self, name: &str) {
        let old_value = self.attributes.borrow_mut().remove(name);
        self.mutations.borrow_mut().push(AttributeMutation {
            name: name.to_string(),
            old_value,
            new_value: None,
        });
    }

    /// Drain attribute writes recorded since the last call
    pub fn take_mutations(&self) -> Vec<AttributeMutation> {
        std::mem::take(&mut *self.mutations.borrow_mut())
    }
}

impl PresentationRoot for MemoryRoot {
    fn add_class(&self, class: &str) {
        self.classes.borrow_mut().insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        self.classes.borrow_mut().remove(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        // The DOM reports a record even when the value is unchanged
        let old_value = self
            .attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        self.mutations.borrow_mut().push(AttributeMutation {
            name: name.to_string(),
            old_value,
            new_value: Some(value.to_string()),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attribute_records_old_value() {
        let root = MemoryRoot::new();
        root.set_attribute("data-theme", "dark");
        root.set_attribute("data-theme", "dark");

        let records = root.take_mutations();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].old_value, None);
        assert_eq!(records[1].old_value.as_deref(), Some("dark"));
        assert_eq!(records[1].new_value.as_deref(), Some("dark"));
        assert!(root.take_mutations().is_empty());
    }

    #[test]
    fn test_classes() {
        let root = MemoryRoot::new();
        root.add_class("dark");
        root.add_class("dark");
        assert!(root.has_class("dark"));
        assert_eq!(root.snapshot().classes.len(), 1);

        root.remove_class("dark");
        root.remove_class("dark");
        assert!(!root.has_class("dark"));
    }
}
