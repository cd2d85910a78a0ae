//! rust-chat Web Widget
//!
//! Leptos-based WASM chat widget, served as static files by the relay
//! gateway it talks to.

mod app;
mod components;
mod api;

pub use app::App;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
