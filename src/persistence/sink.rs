//! Destinations for finished-run reports

use std::cell::RefCell;
use std::rc::Rc;

use super::PersistenceError;
use super::report::GameReport;
use crate::platform::storage;

/// Receives one report per finished run
pub trait ReportSink {
    fn submit(&mut self, report: &GameReport) -> Result<(), PersistenceError>;
}

/// Writes the report JSON to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ReportSink for LogSink {
    fn submit(&mut self, report: &GameReport) -> Result<(), PersistenceError> {
        log::info!("Game report: {}", report.to_json()?);
        Ok(())
    }
}

/// Collects reports in memory
///
/// Clones share the same storage, so a handle kept by the host sees
/// reports submitted through the copy owned by the game.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    reports: Rc<RefCell<Vec<GameReport>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<GameReport> {
        self.reports.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.reports.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.borrow().is_empty()
    }
}

impl ReportSink for MemorySink {
    fn submit(&mut self, report: &GameReport) -> Result<(), PersistenceError> {
        self.reports.borrow_mut().push(report.clone());
        Ok(())
    }
}

/// Keeps the most recent reports as a JSON list in storage
#[derive(Debug, Clone, Copy, Default)]
pub struct StorageSink;

impl StorageSink {
    pub const STORAGE_KEY: &'static str = "dino_dash_reports";
    /// Oldest reports are dropped beyond this
    pub const MAX_REPORTS: usize = 50;

    /// Reports currently held in storage, oldest first
    pub fn stored() -> Vec<GameReport> {
        storage::read(Self::STORAGE_KEY)
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }
}

impl ReportSink for StorageSink {
    fn submit(&mut self, report: &GameReport) -> Result<(), PersistenceError> {
        let mut reports = Self::stored();
        reports.push(report.clone());
        if reports.len() > Self::MAX_REPORTS {
            let excess = reports.len() - Self::MAX_REPORTS;
            reports.drain(..excess);
        }

        storage::write(Self::STORAGE_KEY, &serde_json::to_string(&reports)?)?;
        log::info!("Report {} stored ({} kept)", report.game_id, reports.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::SessionIdentity;
    use crate::sim::Session;
    use crate::tuning::Tuning;

    fn report(game_id: &str) -> GameReport {
        let session = Session::new(&Tuning::default(), 1, 0.0);
        GameReport::from_session(&session, &SessionIdentity::with_game_id("Anonymous", game_id), 0.0)
    }

    #[test]
    fn test_memory_sink_shares_storage() {
        let handle = MemorySink::new();
        let mut owned: Box<dyn ReportSink> = Box::new(handle.clone());
        owned.submit(&report("1111-1111-1111-1111")).unwrap();
        owned.submit(&report("2222-2222-2222-2222")).unwrap();

        assert_eq!(handle.len(), 2);
        assert_eq!(handle.reports()[1].game_id, "2222-2222-2222-2222");
    }

    #[test]
    fn test_storage_sink_keeps_latest() {
        let mut sink = StorageSink;
        for i in 0..StorageSink::MAX_REPORTS + 3 {
            sink.submit(&report(&format!("{:04}-0000-0000-0000", i))).unwrap();
        }
        let stored = StorageSink::stored();
        assert_eq!(stored.len(), StorageSink::MAX_REPORTS);
        assert_eq!(stored[0].game_id, "0003-0000-0000-0000");
        assert_eq!(
            stored.last().map(|r| r.game_id.as_str()),
            Some("0052-0000-0000-0000")
        );
    }

    #[test]
    fn test_log_sink_accepts_reports() {
        LogSink.submit(&report("0000-0000-0000-0000")).unwrap();
    }
}
