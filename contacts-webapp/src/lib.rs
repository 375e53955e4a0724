use wasm_bindgen::prelude::*;

mod app;
mod error;
mod forms;
mod storage;
mod transport;
mod views;

#[wasm_bindgen(start)]
pub fn main() {
    set_panic_hook();

    if let Err(error) = app::start() {
        // straight to the console, the logger may not be set up yet
        web_sys::console::error_1(&JsValue::from_str(&error::startup_failure(&error)));
    }
}

fn set_panic_hook() {
    // panics end up on the browser console instead of an opaque "unreachable"
    console_error_panic_hook::set_once();
}
