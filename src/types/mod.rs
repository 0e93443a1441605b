// src/types/mod.rs
//! Request/response DTOs mirroring the portal REST API

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

pub mod application;
pub mod auth;
pub mod dashboard;
pub mod job;
pub mod profile;

pub use application::{Application, ApplicationStatus, AppliedResponse, ApplyForm};
pub use auth::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, RegisterRequest, ResetPasswordRequest,
    Role, UserSummary,
};
pub use dashboard::{AdminDashboard, RecruiterDashboard, SeekerDashboard};
pub use job::{Job, JobRequest, JobUpdateRequest, PostedBy};
pub use profile::{
    RecruiterProfile, RecruiterProfileRequest, RecruiterProfileResponse, SeekerProfile,
    SeekerProfileRequest, SeekerProfileResponse,
};

/// Anything the list views can address by server id
pub trait Record {
    fn id(&self) -> i64;
}

/// Parse the timestamps the API emits.
///
/// Accepts RFC 3339 and zone-less ISO local date-times; the latter are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Some backends send numeric profile fields as numbers, others as strings
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_timestamp_variants() {
        let zoned = parse_timestamp("2024-03-01T10:15:00+05:30").unwrap();
        assert_eq!(zoned.hour(), 4);
        assert_eq!(zoned.minute(), 45);

        let local = parse_timestamp("2024-03-01T10:15:00.123456").unwrap();
        assert_eq!(local.hour(), 10);

        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
    }
}
