//! 採用ウィザード Web App (Leptos + WASM)

mod api;
mod app;
mod components;
mod config;
mod controller;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("hire wizard starting");
    leptos::mount::mount_to_body(app::App);
}
