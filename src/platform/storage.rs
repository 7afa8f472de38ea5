//! Key/value storage
//!
//! Browser LocalStorage on the web. Native builds keep values in a
//! per-thread map for the life of the process.

use crate::persistence::PersistenceError;

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, PersistenceError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
        .ok_or(PersistenceError::Unavailable)
}

#[cfg(target_arch = "wasm32")]
pub fn read(key: &str) -> Option<String> {
    local_storage().ok()?.get_item(key).ok().flatten()
}

#[cfg(target_arch = "wasm32")]
pub fn write(key: &str, value: &str) -> Result<(), PersistenceError> {
    local_storage()?
        .set_item(key, value)
        .map_err(|e| PersistenceError::Storage(format!("{:?}", e)))
}

#[cfg(not(target_arch = "wasm32"))]
thread_local! {
    static MEMORY: std::cell::RefCell<std::collections::HashMap<String, String>> =
        std::cell::RefCell::new(std::collections::HashMap::new());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn read(key: &str) -> Option<String> {
    MEMORY.with(|m| m.borrow().get(key).cloned())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn write(key: &str, value: &str) -> Result<(), PersistenceError> {
    MEMORY.with(|m| m.borrow_mut().insert(key.to_string(), value.to_string()));
    Ok(())
}
