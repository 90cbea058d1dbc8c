#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod a11y;
pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod i18n;
#[cfg(test)]
mod i18n_tests;
pub mod logger;
pub mod pages;
pub mod router;
pub mod scratch;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logger::init(config::log_level());
    crate::i18n::apply_document_lang();
    log::info!("scratch front-end starting against {}", config::api_base());
    yew::Renderer::<app::App>::new().render();
}
