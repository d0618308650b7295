//! Web UI handlers - server-rendered console pages
//!
//! Pages are Dioxus components rendered with SSR. Theme state never
//! round-trips through the server: the head boot script paints the right
//! theme from the browser's own storage, and the wasm client takes over
//! from there.
//!
//! - components/ - Shared Dioxus components (layout, nav, theme, forms, toast)
//! - pages/ - Page components (workflows, setup, conversion)

pub mod components;
pub mod pages;

use axum::{
    extract::State,
    response::{Html, IntoResponse},
};
use dioxus::prelude::*;

use crate::api::AppState;
use pages::{ConversionPage, SetupPage, WorkflowsPage};

/// Wrap rendered page markup in the HTML document shell
pub fn render_document(element: Element) -> String {
    let html = dioxus::ssr::render_element(element);
    format!("<!DOCTYPE html>\n<html lang=\"en\">\n{}</html>", html)
}

/// GET / - Workflow picker
pub async fn workflows_page(State(state): State<AppState>) -> impl IntoResponse {
    let theme = state.config.theme.clone();
    Html(render_document(rsx! { WorkflowsPage { theme } }))
}

/// GET /setup - vManage credential form
pub async fn setup_page(State(state): State<AppState>) -> impl IntoResponse {
    let theme = state.config.theme.clone();
    Html(render_document(rsx! { SetupPage { theme } }))
}

/// GET /conversion - Conversion workflow
pub async fn conversion_page(State(state): State<AppState>) -> impl IntoResponse {
    let theme = state.config.theme.clone();
    Html(render_document(rsx! { ConversionPage { theme } }))
}
