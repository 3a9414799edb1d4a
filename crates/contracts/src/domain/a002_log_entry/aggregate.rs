use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Timestamp layout used by the `/logs/filtered` query parameters
pub const LOG_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Audit log record, append-only on the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub uuid: Uuid,
    pub user: String,
    pub device_uuid: String,
    pub action: String,
    pub description: String,
    pub timestamp: NaiveDateTime,
}

/// Parameters of `POST /logs/`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateLogRequest {
    pub action: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_uuid: Option<String>,
}

impl CreateLogRequest {
    pub fn is_complete(&self) -> bool {
        !self.action.trim().is_empty() && !self.description.trim().is_empty()
    }
}

/// Half-open time window `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl LogRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> anyhow::Result<Self> {
        if start >= end {
            anyhow::bail!("Start time must be before end time");
        }
        Ok(Self { start, end })
    }

    /// Parse two `datetime-local` input values (seconds optional)
    pub fn parse(start: &str, end: &str) -> anyhow::Result<Self> {
        Self::new(parse_input_time(start)?, parse_input_time(end)?)
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at < self.end
    }

    pub fn start_param(&self) -> String {
        self.start.format(LOG_TIME_FORMAT).to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format(LOG_TIME_FORMAT).to_string()
    }
}

fn parse_input_time(value: &str) -> anyhow::Result<NaiveDateTime> {
    let value: String = value.trim().chars().take(19).collect();
    NaiveDateTime::parse_from_str(&value, LOG_TIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(&value, "%Y-%m-%dT%H:%M"))
        .map_err(|e| anyhow::anyhow!("Invalid time '{}': {}", value, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_minutes_and_seconds() {
        let range = LogRange::parse("2024-03-15T14:02", "2024-03-15T15:00:30.500").unwrap();
        assert_eq!(range.start_param(), "2024-03-15T14:02:00");
        assert_eq!(range.end_param(), "2024-03-15T15:00:30");
    }

    #[test]
    fn test_range_is_half_open() {
        let range = LogRange::parse("2024-01-01T00:00", "2024-01-02T00:00").unwrap();
        assert!(range.contains(range.start()));
        assert!(!range.contains(range.end()));
    }

    #[test]
    fn test_empty_or_inverted_range_rejected() {
        assert!(LogRange::parse("2024-01-02T00:00", "2024-01-01T00:00").is_err());
        assert!(LogRange::parse("2024-01-01T00:00", "2024-01-01T00:00").is_err());
        assert!(LogRange::parse("yesterday", "2024-01-01T00:00").is_err());
    }

    #[test]
    fn test_log_entry_accepts_fractional_timestamp() {
        let json = r#"{"uuid":"6f1c2f7e-8a53-4f4e-9d7a-0d6a9f1c2b3a","user":"op","device_uuid":"u1","action":"read","description":"temp","timestamp":"2024-03-15T14:02:26.123456"}"#;
        let entry: LogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.action, "read");
        assert_eq!(entry.timestamp.format(LOG_TIME_FORMAT).to_string(), "2024-03-15T14:02:26");
    }
}
