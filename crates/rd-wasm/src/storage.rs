//! Browser `localStorage` as a [`KeyValueStore`].
//!
//! Off the web (native tests, private windows with storage disabled) the
//! store degrades to memory so the designer still works for the session.

use rd_core::error::SaveError;
use rd_core::store::{KeyValueStore, MemoryStore};

pub enum BrowserStore {
    Local(web_sys::Storage),
    Memory(MemoryStore),
}

impl BrowserStore {
    /// `window.localStorage`, or an in-memory store when unavailable.
    pub fn open() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window()
                && let Ok(Some(storage)) = window.local_storage()
            {
                return Self::Local(storage);
            }
            log::warn!("storage: localStorage unavailable, keeping data in memory");
        }
        Self::Memory(MemoryStore::new())
    }

    pub fn is_persistent(&self) -> bool {
        matches!(self, Self::Local(_))
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        match self {
            Self::Local(storage) => storage.get_item(key).ok().flatten(),
            Self::Memory(store) => store.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SaveError> {
        match self {
            // Quota errors surface here as a DOMException.
            Self::Local(storage) => {
                storage
                    .set_item(key, value)
                    .map_err(|e| SaveError::Rejected {
                        key: key.to_string(),
                        reason: e.as_string().unwrap_or_else(|| format!("{e:?}")),
                    })
            }
            Self::Memory(store) => store.set(key, value),
        }
    }
}
