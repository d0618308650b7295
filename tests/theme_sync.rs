#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! Theme sync end-to-end tests
//!
//! Drives a ChangeWatcher the way the browser does: every attribute write
//! recorded by the in-memory root is fed back as a mutation record, and
//! deferred tasks only run when the test advances the scheduler.
//!
//! Run with: cargo test --test theme_sync

use std::rc::Rc;

use harbor_console::bus::{create_bus, BusEvent};
use harbor_console::config::ThemeConfig;
use harbor_console::theme::{
    ChangeWatcher, EffectiveTheme, FailingStore, ManualScheduler, MemoryRoot, MemoryStore,
    PreferenceResolver, PreferenceStore, PresentationRoot, Reflector, StaticColorScheme,
    ThemeError, ThemePreference, ThemeResult, WatcherState,
};
use tokio::sync::broadcast;

const ATTR: &str = "data-theme";
const MARKER: &str = "[&_*]:!transition-none";

/// Upper bound on observer rounds before a test declares a feedback loop
const MAX_ROUNDS: usize = 8;

/// Storage that still reads an old value but rejects every write,
/// like `localStorage` once the quota is exhausted
struct ReadOnlyStore {
    value: String,
}

impl PreferenceStore for ReadOnlyStore {
    fn load(&self) -> ThemeResult<Option<String>> {
        Ok(Some(self.value.clone()))
    }

    fn save(&self, _value: &str) -> ThemeResult<()> {
        Err(ThemeError::StorageUnavailable("quota exceeded".into()))
    }

    fn clear(&self) -> ThemeResult<()> {
        Err(ThemeError::StorageUnavailable("quota exceeded".into()))
    }
}

struct Page {
    root: Rc<MemoryRoot>,
    scheduler: Rc<ManualScheduler>,
    scheme: Rc<StaticColorScheme>,
    store: Rc<dyn PreferenceStore>,
    events: broadcast::Receiver<BusEvent>,
    watcher: ChangeWatcher,
}

impl Page {
    fn load(store: Rc<dyn PreferenceStore>, os_dark: bool) -> Self {
        let root = Rc::new(MemoryRoot::new());
        let scheduler = Rc::new(ManualScheduler::new());
        let scheme = Rc::new(StaticColorScheme::new(os_dark));
        let bus = create_bus();
        let events = bus.subscribe();

        let resolver = PreferenceResolver::new(store.clone(), scheme.clone());
        let reflector = Reflector::new(
            root.clone(),
            scheduler.clone(),
            bus,
            ThemeConfig::default(),
        );
        let watcher = ChangeWatcher::new(resolver, reflector);
        watcher.start();
        // The observer is attached after first paint
        root.take_mutations();

        Self {
            root,
            scheduler,
            scheme,
            store,
            events,
            watcher,
        }
    }

    /// Deliver pending mutation records until the root is quiet.
    ///
    /// Returns how many records made the watcher reflect.
    fn settle(&self) -> usize {
        let mut reflected = 0;
        for _ in 0..MAX_ROUNDS {
            let records = self.root.take_mutations();
            if records.is_empty() {
                return reflected;
            }
            for record in records {
                if self.watcher.on_attribute_mutation(record.old_value.as_deref()) {
                    reflected += 1;
                }
            }
        }
        panic!("root never settled: attribute writes kept feeding back");
    }

    /// Deliver pending records the way one observer callback does
    fn deliver_batch(&self) -> bool {
        let olds: Vec<_> = self
            .root
            .take_mutations()
            .into_iter()
            .map(|record| record.old_value)
            .collect();
        let reflected = self.watcher.on_attribute_batch(olds);
        self.settle();
        reflected
    }

    /// Another script (or the switcher button) writes the attribute
    fn user_sets(&self, value: &str) -> usize {
        self.root.set_attribute(ATTR, value);
        self.settle()
    }

    fn os_changes(&self, dark: bool) -> bool {
        self.scheme.set(dark);
        let reflected = self.watcher.on_color_scheme_change(dark);
        self.settle();
        reflected
    }

    fn is_dark(&self) -> bool {
        self.root.has_class("dark") && self.root.has_class("hbr-mode-dark")
    }

    fn is_light(&self) -> bool {
        !self.root.has_class("dark") && !self.root.has_class("hbr-mode-dark")
    }

    fn notifications(&mut self) -> Vec<EffectiveTheme> {
        let mut out = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            if let BusEvent::ModeChanged { effective, .. } = event {
                out.push(effective);
            }
        }
        out
    }
}

#[test]
fn first_paint_without_storage_follows_os() {
    let mut page = Page::load(Rc::new(MemoryStore::new()), true);

    assert!(page.is_dark());
    assert_eq!(page.root.attribute(ATTR).as_deref(), Some("system"));
    assert!(!page.root.has_class(MARKER), "first paint is not suppressed");
    assert_eq!(page.scheduler.pending(), 0);
    assert_eq!(page.notifications(), vec![EffectiveTheme::Dark]);
}

#[test]
fn persisted_preference_beats_os() {
    let page = Page::load(Rc::new(MemoryStore::with_value("light")), true);

    assert!(page.is_light());
    assert_eq!(page.root.attribute(ATTR).as_deref(), Some("light"));
    assert_eq!(
        page.watcher.current().map(|r| r.preference),
        Some(ThemePreference::Light)
    );
}

#[test]
fn user_change_is_reflected_written_back_and_settles() {
    let store = Rc::new(MemoryStore::new());
    let mut page = Page::load(store.clone(), false);
    page.notifications();

    let reflected = page.user_sets("dark");

    assert_eq!(reflected, 1, "only the user's write is acted on");
    assert!(page.is_dark());
    assert_eq!(store.get().as_deref(), Some("dark"));
    assert_eq!(page.notifications(), vec![EffectiveTheme::Dark]);
}

#[test]
fn transitions_are_suppressed_for_exactly_one_tick() {
    let page = Page::load(Rc::new(MemoryStore::new()), false);

    page.user_sets("dark");
    assert!(page.root.has_class(MARKER));

    assert_eq!(page.scheduler.run_pending(), 1);
    assert!(!page.root.has_class(MARKER));
    assert!(page.is_dark());
    assert_eq!(page.scheduler.pending(), 0);
}

#[test]
fn rewriting_the_same_value_does_nothing() {
    let store = Rc::new(MemoryStore::with_value("dark"));
    let mut page = Page::load(store.clone(), false);
    page.notifications();

    let reflected = page.user_sets("dark");

    assert_eq!(reflected, 0);
    assert!(page.notifications().is_empty());
    assert!(!page.root.has_class(MARKER));
}

#[test]
fn os_change_ignored_under_explicit_preference() {
    let mut page = Page::load(Rc::new(MemoryStore::with_value("light")), false);
    page.notifications();

    assert!(!page.os_changes(true));
    assert!(page.is_light());
    assert!(page.notifications().is_empty());
}

#[test]
fn os_change_followed_under_system_without_write_back() {
    let store = Rc::new(MemoryStore::new());
    let mut page = Page::load(store.clone(), false);
    page.notifications();

    assert!(page.os_changes(true));
    assert!(page.is_dark());
    assert_eq!(page.root.attribute(ATTR).as_deref(), Some("system"));
    assert_eq!(store.get(), None, "OS changes are never persisted");
    assert_eq!(page.notifications(), vec![EffectiveTheme::Dark]);

    assert!(page.os_changes(false));
    assert!(page.is_light());
}

#[test]
fn switching_back_to_system_tracks_os_again() {
    let store = Rc::new(MemoryStore::new());
    let page = Page::load(store.clone(), true);

    page.user_sets("light");
    assert!(page.is_light());
    assert!(!page.os_changes(false));

    page.user_sets("system");
    assert_eq!(store.get(), None, "system clears the stored choice");
    assert!(page.is_light(), "OS is light now");

    assert!(page.os_changes(true));
    assert!(page.is_dark());
}

#[test]
fn reload_restores_written_back_preference() {
    let store = Rc::new(MemoryStore::new());
    let first = Page::load(store.clone(), false);
    first.user_sets("dark");
    drop(first);

    let second = Page::load(store, false);
    assert!(second.is_dark());
    assert_eq!(second.root.attribute(ATTR).as_deref(), Some("dark"));
}

#[test]
fn unknown_attribute_value_means_system() {
    let store = Rc::new(MemoryStore::with_value("dark"));
    let page = Page::load(store.clone(), false);

    page.user_sets("sepia");

    assert!(page.is_light());
    assert_eq!(page.root.attribute(ATTR).as_deref(), Some("system"));
    assert_eq!(store.get(), None);
}

#[test]
fn broken_storage_degrades_to_light() {
    let mut page = Page::load(Rc::new(FailingStore), false);

    assert!(page.is_light());
    assert_eq!(page.notifications(), vec![EffectiveTheme::Light]);

    // Explicit choices still apply for the session
    page.user_sets("dark");
    assert!(page.is_dark());
    assert!(page.store.load().is_err());
}

#[test]
fn unsupported_media_query_degrades_to_light() {
    let root = Rc::new(MemoryRoot::new());
    let resolver = PreferenceResolver::new(
        Rc::new(MemoryStore::new()),
        Rc::new(StaticColorScheme::unsupported()),
    );
    let reflector = Reflector::new(
        root.clone(),
        Rc::new(ManualScheduler::new()),
        create_bus(),
        ThemeConfig::default(),
    );
    let watcher = ChangeWatcher::new(resolver, reflector);

    let resolution = watcher.start();

    assert_eq!(resolution.effective, EffectiveTheme::Light);
    assert!(!root.has_class("dark"));
    assert!(matches!(watcher.state(), WatcherState::Synced(_)));
}

#[test]
fn rapid_changes_leave_last_value_applied() {
    let store = Rc::new(MemoryStore::new());
    let page = Page::load(store.clone(), true);

    for value in ["dark", "light", "system", "light"] {
        page.root.set_attribute(ATTR, value);
    }
    page.settle();
    while page.scheduler.run_pending() > 0 {}

    assert!(page.is_light());
    assert_eq!(store.get().as_deref(), Some("light"));
    assert!(!page.root.has_class(MARKER));
}

#[test]
fn os_change_keeps_session_choice_after_failed_write_back() {
    let page = Page::load(Rc::new(ReadOnlyStore { value: "light".into() }), false);
    assert!(page.is_light());

    page.user_sets("system");
    assert_eq!(
        page.watcher.current().map(|r| r.preference),
        Some(ThemePreference::System)
    );

    assert!(page.os_changes(true));
    assert!(page.is_dark(), "the stale stored value must not come back");
    assert_eq!(page.root.attribute(ATTR).as_deref(), Some("system"));
    assert_eq!(
        page.watcher.current().map(|r| r.preference),
        Some(ThemePreference::System)
    );
}

#[test]
fn os_change_ignores_value_written_by_another_tab() {
    let store = Rc::new(MemoryStore::new());
    let page = Page::load(store.clone(), false);

    store.save("dark").unwrap();
    assert!(page.os_changes(false));

    assert!(page.is_light());
    assert_eq!(page.root.attribute(ATTR).as_deref(), Some("system"));
    assert_eq!(store.get().as_deref(), Some("dark"), "nothing is written back");
}

#[test]
fn batched_writes_collapse_to_first_old_and_live_value() {
    let store = Rc::new(MemoryStore::new());
    let mut page = Page::load(store.clone(), false);
    page.notifications();

    for value in ["light", "dark", "light", "dark"] {
        page.root.set_attribute(ATTR, value);
    }
    assert!(page.deliver_batch());

    assert!(page.is_dark());
    assert_eq!(store.get().as_deref(), Some("dark"));
    assert_eq!(page.notifications(), vec![EffectiveTheme::Dark]);
}

#[test]
fn batch_ending_on_the_reflected_value_does_nothing() {
    let store = Rc::new(MemoryStore::with_value("light"));
    let mut page = Page::load(store.clone(), true);
    page.notifications();

    page.root.set_attribute(ATTR, "dark");
    page.root.set_attribute(ATTR, "light");
    assert!(!page.deliver_batch());

    assert!(page.is_light());
    assert!(page.notifications().is_empty());
    assert_eq!(page.scheduler.pending(), 0);
}
