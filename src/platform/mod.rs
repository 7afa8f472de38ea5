//! Platform abstraction layer
//!
//! Keeps the browser/native differences out of the simulation:
//! - Frame timing (`clock`)
//! - Input events (`input`)
//! - Storage (`storage`, LocalStorage on web)
//! - Wall-clock timestamps for reports

pub mod clock;
pub mod input;
pub mod storage;

pub use clock::FrameClock;
pub use input::InputQueue;

/// Current wall-clock time in milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}
