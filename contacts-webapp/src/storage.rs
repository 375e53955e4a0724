use web_sys::Storage;

use contacts_commons::token::TokenStore;
use contacts_commons::ClientError;

use crate::error::js_message;

/// `window.localStorage`, read-only from this client's point of view.
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    pub fn new(window: &web_sys::Window) -> Result<Self, ClientError> {
        let storage = window
            .local_storage()
            .map_err(|cause| ClientError::Storage {
                message: js_message(&cause, "Local storage not accessible"),
            })?
            .ok_or_else(|| ClientError::Storage {
                message: "storage was disabled by the user".to_string(),
            })?;

        Ok(LocalStorage { storage })
    }
}

impl TokenStore for LocalStorage {
    fn read(&self, key: &str) -> Result<Option<String>, ClientError> {
        self.storage.get_item(key).map_err(|cause| ClientError::Storage {
            message: js_message(&cause, key),
        })
    }
}
