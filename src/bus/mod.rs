//! Event bus for inter-component communication
//!
//! Uses tokio::sync::broadcast for pub/sub pattern. Publishing is
//! synchronous and fire-and-forget: zero or more subscribers, no ack.
//! This replaces the document-level `modeChange` event and the global
//! toast helper with an explicit, injected handle.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::theme::{EffectiveTheme, Resolution, ThemePreference};

/// Toast severity, mapped to the banner's `sentiment` and icon
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    #[default]
    Info,
    Success,
    Warning,
    Danger,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Info => "info",
            Sentiment::Success => "success",
            Sentiment::Warning => "warning",
            Sentiment::Danger => "danger",
        }
    }

    /// Icon name rendered in the banner's icon slot
    pub fn icon(&self) -> String {
        format!("hbr-{}-toast", self.as_str())
    }
}

/// Element id of the container toast banners are appended to
pub const TOAST_HOST_ID: &str = "toast-host";

/// A transient banner message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Toast {
    pub sentiment: Sentiment,
    pub title: String,
    pub message: String,
}

impl Default for Toast {
    fn default() -> Self {
        Self {
            sentiment: Sentiment::Info,
            title: "👋".to_string(),
            message: "Empty message".to_string(),
        }
    }
}

/// Event types that can be published on the bus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum BusEvent {
    /// The root presentation state now renders `effective`
    ModeChanged {
        preference: ThemePreference,
        effective: EffectiveTheme,
    },
    /// Show a toast banner
    Toast(Toast),
}

impl From<Resolution> for BusEvent {
    fn from(r: Resolution) -> Self {
        BusEvent::ModeChanged {
            preference: r.preference,
            effective: r.effective,
        }
    }
}

/// Event bus handle for publishing and subscribing
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<BusEvent>,
}

impl EventBus {
    /// Create a new event bus with specified capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers
    pub fn publish(&self, event: BusEvent) {
        // Ignore send errors (no subscribers)
        let _ = self.sender.send(event);
    }

    /// Publish a toast
    pub fn toast(&self, toast: Toast) {
        self.publish(BusEvent::Toast(toast));
    }

    /// Subscribe to all events
    pub fn subscribe(&self) -> broadcast::Receiver<BusEvent> {
        self.sender.subscribe()
    }

    /// Get the number of current subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    /// Default capacity (64 events)
    fn default() -> Self {
        Self::new(64)
    }
}

/// Shared event bus wrapped in Arc
pub type SharedBus = Arc<EventBus>;

/// Create a new shared event bus
pub fn create_bus() -> SharedBus {
    Arc::new(EventBus::default())
}
