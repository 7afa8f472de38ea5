//! End-of-run report

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::PersistenceError;
use super::identity::SessionIdentity;
use crate::sim::{ObstacleVariant, PassCounts, Session};

/// Summary of a finished run, handed to a `ReportSink`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameReport {
    /// Floored final score
    pub score: u64,
    pub username: String,
    #[serde(rename = "gameID")]
    pub game_id: String,
    /// UTC, ISO-8601 with milliseconds (`2017-07-14T02:40:00.000Z`)
    pub timestamp: String,
    #[serde(rename = "obstaclesPassed")]
    pub obstacles_passed: PassCounts,
    #[serde(rename = "obstacleThatKilled")]
    pub obstacle_that_killed: Option<ObstacleVariant>,
}

impl GameReport {
    /// `now_ms` is wall-clock milliseconds since the Unix epoch
    pub fn from_session(session: &Session, identity: &SessionIdentity, now_ms: f64) -> Self {
        Self {
            score: session.score.display_score(),
            username: identity.username.clone(),
            game_id: identity.game_id.clone(),
            timestamp: iso_timestamp(now_ms),
            obstacles_passed: session.field.passed.clone(),
            obstacle_that_killed: session.killed_by,
        }
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Format epoch milliseconds the way browsers' `Date.toISOString` does
///
/// Out-of-range values format as the epoch.
pub fn iso_timestamp(ms: f64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms.floor() as i64)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn finished_session() -> Session {
        let mut session = Session::new(&Tuning::default(), 3, 0.0);
        session.score.update(1234.0);
        session.field.passed.record(ObstacleVariant::CactusWide);
        session.field.passed.record(ObstacleVariant::BirdLow);
        session.field.passed.record(ObstacleVariant::CactusWide);
        session.killed_by = Some(ObstacleVariant::BirdMid);
        session
    }

    #[test]
    fn test_report_from_session() {
        let identity = SessionIdentity::with_game_id("RapidRex", "1234-5678-0123-4567");
        let report = GameReport::from_session(&finished_session(), &identity, 1.5e12);
        assert_eq!(report.score, 12);
        assert_eq!(report.username, "RapidRex");
        assert_eq!(report.game_id, "1234-5678-0123-4567");
        assert_eq!(report.obstacles_passed.get(ObstacleVariant::CactusWide), 2);
        assert_eq!(report.obstacles_passed.total(), 3);
        assert_eq!(report.obstacle_that_killed, Some(ObstacleVariant::BirdMid));
        assert_eq!(report.timestamp, "2017-07-14T02:40:00.000Z");
    }

    #[test]
    fn test_iso_timestamp_shape() {
        assert_eq!(iso_timestamp(1_500_000_000_123.9), "2017-07-14T02:40:00.123Z");
        assert_eq!(iso_timestamp(f64::NAN), "1970-01-01T00:00:00.000Z");

        let now = iso_timestamp(crate::platform::now_ms());
        assert_eq!(now.len(), 24);
        assert!(now.ends_with('Z'));
        assert_eq!(&now[10..11], "T");
    }

    #[test]
    fn test_wire_field_names() {
        let identity = SessionIdentity::with_game_id("Anonymous", "0000-0000-0000-0000");
        let report = GameReport::from_session(&finished_session(), &identity, 0.0);
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(value["score"], 12);
        assert_eq!(value["gameID"], "0000-0000-0000-0000");
        assert_eq!(value["timestamp"], "1970-01-01T00:00:00.000Z");
        assert_eq!(value["obstacleThatKilled"], "bird_mid");
        assert_eq!(value["obstaclesPassed"]["cactus_wide"], 2);
        assert_eq!(value["obstaclesPassed"]["cactus_tall_wide"], 0);
        assert_eq!(value["obstaclesPassed"].as_object().unwrap().len(), 7);
    }

    #[test]
    fn test_unfinished_run_reports_null_killer() {
        let identity = SessionIdentity::with_game_id("Anonymous", "0000-0000-0000-0000");
        let session = Session::new(&Tuning::default(), 3, 0.0);
        let report = GameReport::from_session(&session, &identity, 0.0);
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert!(value["obstacleThatKilled"].is_null());
    }
}
