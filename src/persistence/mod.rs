//! Run reporting
//!
//! Features:
//! - `GameReport` payload with the wire field names hosts expect
//! - Pluggable `ReportSink`s (log, in-memory, storage)
//! - Per-run `SessionIdentity` (username + game id)

pub mod identity;
pub mod report;
pub mod sink;

pub use identity::{SessionIdentity, generate_game_id};
pub use report::GameReport;
pub use sink::{LogSink, MemorySink, ReportSink, StorageSink};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage write failed: {0}")]
    Storage(String),
    #[error("storage unavailable")]
    Unavailable,
}
