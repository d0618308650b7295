//! Applies a resolved theme to the root presentation state.

use std::rc::Rc;

use crate::bus::{BusEvent, SharedBus};
use crate::config::ThemeConfig;

use super::preference::Resolution;
use super::root::PresentationRoot;
use super::scheduler::Scheduler;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Add the no-transition marker for this flip and drop it on the next tick
    pub suppress_transitions: bool,
}

impl ApplyOptions {
    pub const INSTANT: ApplyOptions = ApplyOptions {
        suppress_transitions: false,
    };
    pub const SUPPRESSED: ApplyOptions = ApplyOptions {
        suppress_transitions: true,
    };
}

/// The single writer of the root's theme classes and attribute
#[derive(Clone)]
pub struct Reflector {
    root: Rc<dyn PresentationRoot>,
    scheduler: Rc<dyn Scheduler>,
    bus: SharedBus,
    config: Rc<ThemeConfig>,
}

impl Reflector {
    pub fn new(
        root: Rc<dyn PresentationRoot>,
        scheduler: Rc<dyn Scheduler>,
        bus: SharedBus,
        config: ThemeConfig,
    ) -> Self {
        Self {
            root,
            scheduler,
            bus,
            config: Rc::new(config),
        }
    }

    /// Render `resolution.effective` onto the root, then announce it.
    ///
    /// The mutation is committed before `ModeChanged` is published, so a
    /// subscriber reading the root synchronously sees the new state.
    pub fn apply(&self, resolution: Resolution, options: ApplyOptions) {
        let marker = &self.config.no_transition_class;
        if options.suppress_transitions {
            self.root.add_class(marker);
        }

        for class in &self.config.dark_classes {
            if resolution.effective.is_dark() {
                self.root.add_class(class);
            } else {
                self.root.remove_class(class);
            }
        }
        self.root
            .set_attribute(&self.config.attribute, resolution.preference.as_str());

        if options.suppress_transitions {
            let root = self.root.clone();
            let marker = marker.clone();
            self.scheduler
                .defer(Box::new(move || root.remove_class(&marker)));
        }

        tracing::debug!(
            "Applied {} theme (preference {}, suppressed: {})",
            resolution.effective,
            resolution.preference,
            options.suppress_transitions
        );
        self.bus.publish(BusEvent::from(resolution));
    }

    /// Live value of the root's theme attribute
    pub fn attribute(&self) -> Option<String> {
        self.root.attribute(&self.config.attribute)
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }
}
