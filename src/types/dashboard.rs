// src/types/dashboard.rs
use serde::{Deserialize, Serialize};

use super::{Application, Job};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminDashboard {
    pub total_users: u64,
    pub total_recruiters: u64,
    pub total_seekers: u64,
    pub total_jobs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecruiterDashboard {
    pub total_jobs: u64,
    pub active_jobs: u64,
    pub total_applications: u64,
    pub recent_jobs: Vec<Job>,
    pub recent_applications: Vec<Application>,
}

/// Seeker counters; older backends name the total `total`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeekerDashboard {
    #[serde(alias = "total")]
    pub total_applications: u64,
    pub pending: u64,
    pub shortlisted: u64,
    pub rejected: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeker_dashboard_total_alias() {
        let d: SeekerDashboard = serde_json::from_str(r#"{"total":5,"pending":2}"#).unwrap();
        assert_eq!(d.total_applications, 5);
        assert_eq!(d.pending, 2);
        assert_eq!(d.rejected, 0);
    }

    #[test]
    fn test_missing_counters_default_to_zero() {
        let d: AdminDashboard = serde_json::from_str(r#"{"totalUsers":12}"#).unwrap();
        assert_eq!(d.total_users, 12);
        assert_eq!(d.total_jobs, 0);

        let r: RecruiterDashboard = serde_json::from_str("{}").unwrap();
        assert!(r.recent_jobs.is_empty());
    }
}
