//! Harbor Console
//!
//! A configuration console for vManage endpoints, rendered on the server and
//! kept in the user's color theme in the browser.
//!
//! This library provides:
//! - Theme preference resolution, reflection and change watching
//! - An event bus carrying theme notifications and toasts
//! - Layered configuration (defaults, config file, environment)
//! - Server-rendered pages (Pico CSS) and the axum router serving them
//! - The wasm browser client installing theme sync on the live document

pub mod bus;
pub mod config;
pub mod forms;
pub mod theme;

#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "server")]
pub mod ui;

#[cfg(target_arch = "wasm32")]
pub mod client;
