use failure::Fail;
use wasm_bindgen::JsValue;

use contacts_commons::ClientError;

#[derive(Debug, Fail)]
pub enum StartupError {
    #[fail(display = "Browser environment unavailable: {}", message)]
    Environment { message: String },
    #[fail(display = "Required element missing: '{}'", id)]
    MissingElement { id: String },
    #[fail(display = "Unable to bind element '{}': {}", id, message)]
    Binding { id: String, message: String },
}

pub fn startup_failure(error: &StartupError) -> String {
    format!("Failed to start contacts client: {}", error)
}

/// Extracts a readable message from a rejected promise or thrown value.
pub fn js_message(value: &JsValue, fallback: &str) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(value, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| fallback.to_string())
}

pub fn dom_error(value: JsValue, fallback: &str) -> ClientError {
    ClientError::Dom { message: js_message(&value, fallback) }
}
