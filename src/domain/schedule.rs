// ============================================================
// SCHEDULE RULES
// ============================================================
// Sending-window math and schedule validation shared by the
// campaign service and the CLI.

use chrono::{Local, LocalResult, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::error::{AppError, Result};

pub const DAY_NAMES: &[&str] = &[
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Upper bound on messages a single sending backend can push per day.
pub const MAX_SENDS_PER_BACKEND_PER_DAY: i64 = 100;

/// Requested schedule changes, with times still in the caller's local
/// timezone.
#[derive(Debug, Clone, Validate, Serialize, Deserialize)]
pub struct ScheduleUpdate {
    #[validate(length(min = 1, max = 120, message = "Campaign name must be 1-120 characters"))]
    pub name: String,
    #[validate(range(min = 0, message = "Daily limit cannot be negative"))]
    pub daily_limit: i64,
    pub start_time: String,
    pub end_time: String,
    pub days_of_week: Vec<String>,
}

/// Cap the requested daily limit at what the available backends can
/// actually deliver.
pub fn clamp_daily_limit(requested: i64, backend_count: i64) -> i64 {
    let capacity = backend_count.saturating_mul(MAX_SENDS_PER_BACKEND_PER_DAY);
    requested.min(capacity)
}

pub fn validate_days(days: &[String]) -> Result<()> {
    if days.is_empty() {
        return Err(AppError::ValidationError(
            "At least one sending day is required.".to_string(),
        ));
    }
    for day in days {
        if !DAY_NAMES.contains(&day.as_str()) {
            return Err(AppError::ValidationError(format!(
                "Unknown day of week: {}",
                day
            )));
        }
    }
    Ok(())
}

fn parse_hhmm(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| {
        AppError::ValidationError(format!("Invalid time, expected HH:MM: {}", value))
    })
}

/// Convert a local wall-clock "HH:MM" into the UTC "HH:MM" that falls at
/// the same instant today. Ambiguous DST transitions resolve to the
/// earlier instant.
pub fn local_hhmm_to_utc(value: &str) -> Result<String> {
    let time = parse_hhmm(value)?;
    let today = Local::now().date_naive();
    let local = match Local.from_local_datetime(&today.and_time(time)) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            return Err(AppError::ValidationError(format!(
                "Time does not exist in the local timezone today: {}",
                value
            )));
        }
    };
    Ok(local.with_timezone(&Utc).format("%H:%M").to_string())
}

/// Inverse of [`local_hhmm_to_utc`], used when showing stored times.
pub fn utc_hhmm_to_local(value: &str) -> Result<String> {
    let time = parse_hhmm(value)?;
    let today = Utc::now().date_naive();
    let utc = Utc.from_utc_datetime(&today.and_time(time));
    Ok(utc.with_timezone(&Local).format("%H:%M").to_string())
}

// ============================================================
// TESTS
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_respects_backend_capacity() {
        assert_eq!(clamp_daily_limit(500, 2), 200);
        assert_eq!(clamp_daily_limit(150, 2), 150);
        assert_eq!(clamp_daily_limit(50, 1), 50);
    }

    #[test]
    fn test_clamp_with_no_backends() {
        assert_eq!(clamp_daily_limit(100, 0), 0);
    }

    #[test]
    fn test_validate_days() {
        let good = vec!["Monday".to_string(), "Sunday".to_string()];
        assert!(validate_days(&good).is_ok());

        let bad = vec!["Funday".to_string()];
        assert!(matches!(
            validate_days(&bad),
            Err(AppError::ValidationError(_))
        ));

        assert!(matches!(
            validate_days(&[]),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_time_parse_rejects_garbage() {
        assert!(local_hhmm_to_utc("9am").is_err());
        assert!(local_hhmm_to_utc("25:00").is_err());
        assert!(utc_hhmm_to_local("").is_err());
    }

    #[test]
    fn test_time_conversion_round_trip() {
        let utc = local_hhmm_to_utc("09:30").unwrap();
        assert_eq!(utc.len(), 5);
        assert_eq!(&utc[2..3], ":");

        let back = utc_hhmm_to_local(&utc).unwrap();
        assert_eq!(back, "09:30");
    }
}
