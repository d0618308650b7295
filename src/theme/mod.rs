//! Color-theme synchronization.
//!
//! Three inputs decide the rendered theme: the persisted preference, the OS
//! `prefers-color-scheme` signal, and direct writes to the root's
//! `data-theme` attribute. This module keeps them in agreement:
//!
//! - [`preference`] resolves the effective theme and writes back explicit choices
//! - [`reflector`] renders it onto the root and announces it on the bus
//! - [`watcher`] is the state machine reacting to attribute and OS changes
//!
//! Every host capability is a trait so the whole loop runs natively in tests.

pub mod error;
pub mod media;
pub mod preference;
pub mod reflector;
pub mod root;
pub mod scheduler;
pub mod script;
pub mod store;
pub mod watcher;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{ThemeError, ThemeResult};
pub use media::{ColorSchemeSource, StaticColorScheme};
pub use preference::{resolve, EffectiveTheme, PreferenceResolver, Resolution, ThemePreference};
pub use reflector::{ApplyOptions, Reflector};
pub use root::{AttributeMutation, MemoryRoot, PresentationRoot, RootSnapshot};
pub use scheduler::{ManualScheduler, Scheduler, Task};
pub use script::boot_script;
pub use store::{FailingStore, MemoryStore, PreferenceStore};
pub use watcher::{ChangeWatcher, WatcherState};
