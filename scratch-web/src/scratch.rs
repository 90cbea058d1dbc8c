//! Web-specific implementations of the scratch-core traits.
//!
//! Re-exports the core types so pages and components import from one place.

pub use scratch_core::*;

/// `localStorage` key holding the serialized [`AuthSession`].
pub const SESSION_KEY: &str = "scratch.session";

/// Login persistence backed by the browser's `localStorage`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WebSessionStore;

#[derive(Debug, thiserror::Error)]
pub enum WebStorageError {
    #[error("Storage error: {0}")]
    Storage(String),
}

impl SessionStore for WebSessionStore {
    type Error = WebStorageError;

    fn save_session(&self, session: &AuthSession) -> Result<(), Self::Error> {
        #[cfg(target_arch = "wasm32")]
        {
            use gloo::storage::{LocalStorage, Storage};
            LocalStorage::set(SESSION_KEY, session)
                .map_err(|e| WebStorageError::Storage(e.to_string()))
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = session;
            Ok(())
        }
    }

    fn load_session(&self) -> Result<Option<AuthSession>, Self::Error> {
        #[cfg(target_arch = "wasm32")]
        {
            use gloo::storage::errors::StorageError;
            use gloo::storage::{LocalStorage, Storage};
            match LocalStorage::get::<AuthSession>(SESSION_KEY) {
                Ok(session) => Ok(Some(session)),
                Err(StorageError::KeyNotFound(_)) => Ok(None),
                Err(e) => Err(WebStorageError::Storage(e.to_string())),
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Ok(None)
        }
    }

    fn clear_session(&self) -> Result<(), Self::Error> {
        #[cfg(target_arch = "wasm32")]
        {
            use gloo::storage::{LocalStorage, Storage};
            LocalStorage::delete(SESSION_KEY);
        }
        Ok(())
    }
}

/// Login state shared by the whole app.
pub type WebAuth = AuthContext<WebSessionStore>;
