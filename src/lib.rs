//! # bias-check-client
//!
//! Leptos + WASM single-page client for the text bias-check service.
//!
//! This crate contains the route table and navigation guard, the shared
//! HTTP request pipeline (token injection, envelope interpretation, error
//! notifications, auth-expiry teardown), the API call wrappers, and minimal
//! route views.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod routes;
pub mod state;
pub mod util;

#[cfg(test)]
#[path = "lib_test.rs"]
mod lib_test;

#[cfg(any(test, feature = "csr"))]
fn logger_init_failed_message(err: &impl std::fmt::Display) -> String {
    format!("console logger init failed, continuing without logs: {err}")
}

/// WASM entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("{}", logger_init_failed_message(&e));
    }
    leptos::mount::mount_to_body(app::App);
}
