//! Epics, directives, logs and the `MomentumData` snapshot.
//!
//! A snapshot is treated as immutable: every change (appending a log,
//! moving an epic to another phase, bumping a target) produces a new
//! snapshot and leaves the original untouched. Persisting the change is the
//! storage layer's job.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::ValidationError;

/// Cosmetic category of a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Build,
    Learn,
    Train,
    Research,
    Plan,
    Arrange,
}

/// Lifecycle phase of an epic. Any phase may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Exploring,
    Building,
    Active,
    Refining,
    Paused,
}

impl FromStr for Phase {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exploring" => Ok(Phase::Exploring),
            "building" => Ok(Phase::Building),
            "active" => Ok(Phase::Active),
            "refining" => Ok(Phase::Refining),
            "paused" => Ok(Phase::Paused),
            other => Err(ValidationError::InvalidValue {
                field: "phase".to_string(),
                message: format!(
                    "'{other}' is not one of exploring, building, active, refining, paused"
                ),
            }),
        }
    }
}

/// Expected check-in cadence of a directive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CheckinInterval {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    /// Any other stored value, kept verbatim so corrupt data still loads
    /// and is written back unchanged.
    Unknown(String),
}

impl CheckinInterval {
    pub fn as_str(&self) -> &str {
        match self {
            CheckinInterval::Daily => "daily",
            CheckinInterval::Weekly => "weekly",
            CheckinInterval::Biweekly => "biweekly",
            CheckinInterval::Monthly => "monthly",
            CheckinInterval::Unknown(raw) => raw.as_str(),
        }
    }
}

impl From<String> for CheckinInterval {
    fn from(s: String) -> Self {
        match s.as_str() {
            "daily" => CheckinInterval::Daily,
            "weekly" => CheckinInterval::Weekly,
            "biweekly" => CheckinInterval::Biweekly,
            "monthly" => CheckinInterval::Monthly,
            _ => CheckinInterval::Unknown(s),
        }
    }
}

impl fmt::Display for CheckinInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CheckinInterval {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CheckinInterval {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(String::deserialize(deserializer)?.into())
    }
}

/// Channel a log entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogSource {
    Manual,
    Voice,
    Text,
    Call,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Numeric goal attached to an epic, e.g. 1 of 5 books.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub current: u32,
    pub total: u32,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Directive {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub interval: CheckinInterval,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Epic {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub description: String,
    pub phase: Phase,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub target: Option<Target>,
    #[serde(default)]
    pub directives: Vec<Directive>,
}

impl Epic {
    pub fn directive(&self, directive_id: &str) -> Option<&Directive> {
        self.directives.iter().find(|d| d.id == directive_id)
    }
}

/// One unit of work recorded against a directive. Never edited once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    pub id: String,
    pub epic_id: String,
    pub directive_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub note: String,
    pub source: LogSource,
}

/// Input of a check-in submission.
#[derive(Debug, Clone, Default)]
pub struct CheckinRequest {
    pub epic_id: String,
    pub directive_id: String,
    pub note: String,
    pub duration_minutes: Option<u32>,
}

/// Full application state: user, epics with their directives, and the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentumData {
    pub version: u32,
    pub user: User,
    pub epics: Vec<Epic>,
    pub logs: Vec<Log>,
}

impl MomentumData {
    pub fn epic(&self, epic_id: &str) -> Option<&Epic> {
        self.epics.iter().find(|e| e.id == epic_id)
    }

    pub fn directive(&self, epic_id: &str, directive_id: &str) -> Option<&Directive> {
        self.epic(epic_id)?.directive(directive_id)
    }

    /// Snapshot with `log` appended. No integrity checks.
    pub fn with_log(&self, log: Log) -> MomentumData {
        let mut next = self.clone();
        next.logs.push(log);
        next
    }

    /// Validate a check-in and build its log entry.
    ///
    /// Returns the new snapshot together with the created log so the caller
    /// can persist just the appended row.
    ///
    /// # Errors
    /// Fails if the epic is unknown or the directive is not one of the
    /// epic's directives.
    pub fn check_in(
        &self,
        request: CheckinRequest,
        at: DateTime<Utc>,
    ) -> Result<(MomentumData, Log), ValidationError> {
        let epic = self
            .epic(&request.epic_id)
            .ok_or_else(|| ValidationError::UnknownEpic(request.epic_id.clone()))?;
        if epic.directive(&request.directive_id).is_none() {
            return Err(ValidationError::UnknownDirective {
                epic_id: request.epic_id,
                directive_id: request.directive_id,
            });
        }

        let log = Log {
            id: format!("log_{}", Uuid::new_v4().simple()),
            epic_id: request.epic_id,
            directive_id: request.directive_id,
            timestamp: at,
            duration_minutes: request.duration_minutes,
            note: request.note,
            source: LogSource::Manual,
        };
        Ok((self.with_log(log.clone()), log))
    }

    /// Snapshot with the epic moved to `phase`.
    ///
    /// # Errors
    /// Fails if the epic is unknown.
    pub fn with_epic_phase(
        &self,
        epic_id: &str,
        phase: Phase,
    ) -> Result<MomentumData, ValidationError> {
        self.map_epic(epic_id, |epic| {
            epic.phase = phase;
            Ok(())
        })
    }

    /// Snapshot with the epic's target progress set to `current`.
    ///
    /// # Errors
    /// Fails if the epic is unknown or has no target.
    pub fn with_epic_target_progress(
        &self,
        epic_id: &str,
        current: u32,
    ) -> Result<MomentumData, ValidationError> {
        self.map_epic(epic_id, |epic| match epic.target.as_mut() {
            Some(target) => {
                target.current = current;
                Ok(())
            }
            None => Err(ValidationError::NoTarget(epic.id.clone())),
        })
    }

    fn map_epic<F>(&self, epic_id: &str, f: F) -> Result<MomentumData, ValidationError>
    where
        F: FnOnce(&mut Epic) -> Result<(), ValidationError>,
    {
        let mut next = self.clone();
        let epic = next
            .epics
            .iter_mut()
            .find(|e| e.id == epic_id)
            .ok_or_else(|| ValidationError::UnknownEpic(epic_id.to_string()))?;
        f(epic)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::generate_seed_data;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 2, 9, 30, 0).unwrap()
    }

    fn request(epic_id: &str, directive_id: &str) -> CheckinRequest {
        CheckinRequest {
            epic_id: epic_id.to_string(),
            directive_id: directive_id.to_string(),
            note: "  Read two chapters  ".to_string(),
            duration_minutes: Some(40),
        }
    }

    #[test]
    fn test_check_in_appends_manual_log() {
        let data = generate_seed_data(now());
        let (next, log) = data.check_in(request("epic_003", "dir_008"), now()).unwrap();

        assert_eq!(next.logs.len(), data.logs.len() + 1);
        assert_eq!(next.logs.last(), Some(&log));
        assert!(log.id.starts_with("log_"));
        assert_eq!(log.source, LogSource::Manual);
        assert_eq!(log.timestamp, now());
        assert_eq!(log.note, "  Read two chapters  ");
        // The original snapshot is untouched
        assert_eq!(data.logs.len(), 4);
    }

    #[test]
    fn test_check_in_rejects_unknown_epic() {
        let data = generate_seed_data(now());
        let err = data.check_in(request("epic_999", "dir_008"), now()).unwrap_err();
        assert_eq!(err, ValidationError::UnknownEpic("epic_999".to_string()));
    }

    #[test]
    fn test_check_in_rejects_directive_of_other_epic() {
        let data = generate_seed_data(now());
        let err = data.check_in(request("epic_001", "dir_008"), now()).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownDirective { .. }));
    }

    #[test]
    fn test_check_in_accepts_zero_duration() {
        let data = generate_seed_data(now());
        let mut req = request("epic_003", "dir_008");
        req.duration_minutes = Some(0);
        let (_, log) = data.check_in(req, now()).unwrap();
        assert_eq!(log.duration_minutes, Some(0));
    }

    #[test]
    fn test_with_epic_phase() {
        let data = generate_seed_data(now());
        let next = data.with_epic_phase("epic_005", Phase::Active).unwrap();
        assert_eq!(next.epic("epic_005").unwrap().phase, Phase::Active);
        assert_eq!(data.epic("epic_005").unwrap().phase, Phase::Paused);
    }

    #[test]
    fn test_target_progress_requires_target() {
        let data = generate_seed_data(now());
        let next = data.with_epic_target_progress("epic_003", 2).unwrap();
        assert_eq!(next.epic("epic_003").unwrap().target.as_ref().unwrap().current, 2);

        let err = data.with_epic_target_progress("epic_001", 1).unwrap_err();
        assert_eq!(err, ValidationError::NoTarget("epic_001".to_string()));
    }

    #[test]
    fn test_phase_from_str() {
        assert_eq!("Refining".parse::<Phase>().unwrap(), Phase::Refining);
        assert!("done".parse::<Phase>().is_err());
    }

    #[test]
    fn test_unknown_interval_deserializes() {
        let json = r#"{
            "id": "dir_x",
            "name": "Odd cadence",
            "type": "plan",
            "interval": "quarterly",
            "createdAt": "2025-01-01T00:00:00Z"
        }"#;
        let directive: Directive = serde_json::from_str(json).unwrap();
        assert_eq!(
            directive.interval,
            CheckinInterval::Unknown("quarterly".to_string())
        );

        let value = serde_json::to_value(&directive).unwrap();
        assert_eq!(value["interval"], "quarterly");
    }

    #[test]
    fn test_known_interval_serializes_lowercase() {
        let value = serde_json::to_value(CheckinInterval::Biweekly).unwrap();
        assert_eq!(value, "biweekly");
        assert_eq!(
            CheckinInterval::from("monthly".to_string()),
            CheckinInterval::Monthly
        );
    }

    #[test]
    fn test_log_serializes_camel_case() {
        let data = generate_seed_data(now());
        let value = serde_json::to_value(&data.logs[0]).unwrap();
        assert!(value.get("epicId").is_some());
        assert!(value.get("directiveId").is_some());
        assert!(value.get("durationMinutes").is_some());
        assert_eq!(value["source"], "manual");
    }
}
