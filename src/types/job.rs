// src/types/job.rs
use serde::{Deserialize, Serialize};

use super::Record;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostedBy {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i64,
    pub company_name: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub experience: Option<String>,
    pub job_type: Option<String>,
    pub skills: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
    pub posted_by: Option<PostedBy>,
    pub recruiter_email: Option<String>,
}

impl Job {
    /// Public board rule: only explicitly active postings
    pub fn is_listed_publicly(&self) -> bool {
        self.active == Some(true)
    }

    /// Seeker board rule: anything not explicitly closed
    pub fn is_open(&self) -> bool {
        self.active != Some(false)
    }

    pub fn posted_by_label(&self) -> &str {
        let (name, email) = match &self.posted_by {
            Some(p) => (p.name.as_deref(), p.email.as_deref()),
            None => (None, None),
        };
        [name, email, self.recruiter_email.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
            .unwrap_or("—")
    }

    pub fn status_label(&self) -> &'static str {
        if self.active.unwrap_or(false) {
            "Active"
        } else {
            "Closed"
        }
    }

    /// Editable copy of this posting, keeping unset fields empty
    pub fn to_update(&self) -> JobUpdateRequest {
        JobUpdateRequest {
            company_name: self.company_name.clone().unwrap_or_default(),
            title: self.title.clone().unwrap_or_default(),
            location: self.location.clone().unwrap_or_default(),
            salary: self.salary.clone().unwrap_or_default(),
            experience: self.experience.clone().unwrap_or_default(),
            skills: self.skills.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
            active: self.active.unwrap_or(false),
        }
    }
}

impl Record for Job {
    fn id(&self) -> i64 {
        self.id
    }
}

/// New posting, all fields required
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRequest {
    pub company_name: String,
    pub title: String,
    pub location: String,
    pub salary: String,
    pub experience: String,
    pub job_type: String,
    pub skills: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobUpdateRequest {
    pub company_name: String,
    pub title: String,
    pub location: String,
    pub salary: String,
    pub experience: String,
    pub skills: String,
    pub description: String,
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posted_by_fallbacks() {
        let mut job: Job = serde_json::from_str(
            r#"{"id":1,"postedBy":{"email":"hr@acme.io"},"recruiterEmail":"old@acme.io"}"#,
        )
        .unwrap();
        assert_eq!(job.posted_by_label(), "hr@acme.io");

        job.posted_by = None;
        assert_eq!(job.posted_by_label(), "old@acme.io");

        job.recruiter_email = None;
        assert_eq!(job.posted_by_label(), "—");
    }

    #[test]
    fn test_posted_by_blank_name_falls_through() {
        let job: Job = serde_json::from_str(
            r#"{"id":2,"postedBy":{"name":"","email":"hr@acme.io"},"recruiterEmail":"old@acme.io"}"#,
        )
        .unwrap();
        assert_eq!(job.posted_by_label(), "hr@acme.io");

        let job: Job = serde_json::from_str(
            r#"{"id":3,"postedBy":{"name":"","email":""},"recruiterEmail":"old@acme.io"}"#,
        )
        .unwrap();
        assert_eq!(job.posted_by_label(), "old@acme.io");
    }

    #[test]
    fn test_active_filters_differ_on_missing_flag() {
        let unknown = Job {
            id: 7,
            ..Job::default()
        };
        assert!(unknown.is_open());
        assert!(!unknown.is_listed_publicly());

        let closed = Job {
            active: Some(false),
            ..unknown.clone()
        };
        assert!(!closed.is_open());
        assert_eq!(closed.status_label(), "Closed");
    }

    #[test]
    fn test_update_payload_shape() {
        let job = Job {
            id: 4,
            title: Some("Rust Engineer".into()),
            active: Some(true),
            ..Job::default()
        };
        let body = serde_json::to_value(job.to_update()).unwrap();
        assert_eq!(body["title"], "Rust Engineer");
        assert_eq!(body["companyName"], "");
        assert_eq!(body["active"], true);
        assert!(body.get("jobType").is_none());
    }
}
