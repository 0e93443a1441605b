// src/types/application.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use super::{parse_timestamp, Job, Record, UserSummary};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApplicationStatus {
    Pending,
    Shortlisted,
    Rejected,
    Other(String),
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::Shortlisted => "SHORTLISTED",
            ApplicationStatus::Rejected => "REJECTED",
            ApplicationStatus::Other(raw) => raw,
        }
    }
}

impl Default for ApplicationStatus {
    fn default() -> Self {
        ApplicationStatus::Pending
    }
}

impl From<String> for ApplicationStatus {
    fn from(value: String) -> Self {
        let upper = value.trim().to_uppercase();
        match upper.as_str() {
            "" | "PENDING" => ApplicationStatus::Pending,
            "SHORTLISTED" => ApplicationStatus::Shortlisted,
            "REJECTED" => ApplicationStatus::Rejected,
            _ => ApplicationStatus::Other(upper),
        }
    }
}

impl From<ApplicationStatus> for String {
    fn from(status: ApplicationStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::str::FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match ApplicationStatus::from(s.to_string()) {
            ApplicationStatus::Other(raw) => Err(format!(
                "unknown status '{}', expected PENDING, SHORTLISTED or REJECTED",
                raw
            )),
            status => Ok(status),
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: i64,
    pub job: Option<Job>,
    pub seeker: Option<UserSummary>,
    pub status: Option<ApplicationStatus>,
    pub phone: Option<String>,
    pub cover_letter: Option<String>,
    pub applied_date: Option<String>,
    pub created_at: Option<String>,
}

impl Application {
    /// Missing status means the recruiter has not acted yet
    pub fn status(&self) -> ApplicationStatus {
        self.status.clone().unwrap_or_default()
    }

    pub fn applied_at(&self) -> Option<DateTime<Utc>> {
        self.applied_date.as_deref().and_then(parse_timestamp)
    }

    /// Applied date, falling back to the record creation time
    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.applied_at()
            .or_else(|| self.created_at.as_deref().and_then(parse_timestamp))
    }

    pub fn applicant_name(&self) -> &str {
        self.seeker
            .as_ref()
            .and_then(UserSummary::display_name)
            .unwrap_or("N/A")
    }

    pub fn job_title(&self) -> &str {
        self.job
            .as_ref()
            .and_then(|j| j.title.as_deref())
            .unwrap_or("—")
    }
}

impl Record for Application {
    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppliedResponse {
    #[serde(default)]
    pub applied: bool,
}

/// Multipart application form for `POST /seeker/apply/{jobId}`
#[derive(Debug, Clone, Default)]
pub struct ApplyForm {
    pub phone: String,
    pub cover_letter: Option<String>,
    pub resume_path: Option<PathBuf>,
}
