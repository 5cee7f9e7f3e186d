/// Tab Keeper - Chrome Extension for duplicate tab alerts and tab statistics
/// Built with Rust + WASM + Yew

mod background;
mod chrome;
mod config;
mod domain;
mod error;
mod events;
mod ignore;
mod menu;
mod notifications;
mod operations;
mod platform;
mod service;
mod statistics;
mod storage;
mod tab_data;
mod transfer;
mod watcher;
mod whitelist;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export core domain functions for JavaScript access
#[wasm_bindgen]
pub fn extract_domain(url: &str) -> String {
    domain::domain_or_unknown(url)
}

// Start the background service; listeners live in background.js
#[wasm_bindgen]
pub fn start_background() {
    background::start();
}

// Entry for events queued by the worker script's listeners
#[wasm_bindgen]
pub fn dispatch_browser_event(event: JsValue) {
    background::dispatch(event);
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}
