use log::*;

#[cfg(test)]
use mockall::automock;

use crate::ClientError;

/// Bearer credential, attached unmodified to every request.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: &str) -> Self {
        AuthToken(token.to_string())
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Persistent client side key-value storage.
#[cfg_attr(test, automock)]
pub trait TokenStore {
    fn read(&self, key: &str) -> Result<Option<String>, ClientError>;
}

/// Reads the token once. A missing entry or an unreadable storage both
/// leave the client without credentials; the server rejects its requests.
pub fn load_token(store: &dyn TokenStore, key: &str) -> Option<AuthToken> {
    match store.read(key) {
        Ok(Some(token)) => Some(AuthToken(token)),
        Ok(None) => {
            warn!("No token stored under '{}'", key);
            None
        }
        Err(error) => {
            error!("Failed to read token '{}': {}", key, error);
            None
        }
    }
}
