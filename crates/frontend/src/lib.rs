pub mod app;
pub mod domain;
pub mod shared;

use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen]
pub fn hydrate() {
    let config = shared::config::load_config();
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(config.logging.level());
    console_error_panic_hook::set_once();
    log::debug!("api base url: {:?}", config.api.base_url);

    leptos::mount::mount_to_body(app::App);
}

#[wasm_bindgen(start)]
pub fn start() {
    hydrate();
}
