//! Shared UI components for the Dioxus-based web UI.

pub mod form_inputs;
pub mod layout;
pub mod nav;
pub mod theme;
pub mod toast;

pub use form_inputs::{PortField, TextField};
pub use layout::Layout;
pub use nav::Nav;
pub use theme::ThemeSwitcher;
pub use toast::ToastHost;
