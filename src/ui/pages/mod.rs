//! Page components for the Dioxus-based web UI.
//!
//! Each page is a Dioxus component that renders a full page using the Layout component.

pub mod conversion;
pub mod setup;
pub mod workflows;

pub use conversion::ConversionPage;
pub use setup::SetupPage;
pub use workflows::WorkflowsPage;
