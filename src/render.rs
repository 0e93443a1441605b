// src/render.rs
//! Plain-text tables and CSV export for the CLI views

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

use crate::listing::ListView;
use crate::types::{
    AdminDashboard, Application, Job, Record, RecruiterDashboard, RecruiterProfileResponse,
    SeekerDashboard, SeekerProfileResponse, UserSummary,
};

const DASH: &str = "—";
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// India Standard Time, the zone the portal reports in
pub fn ist() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// `Mar 01, 04:15 PM`
pub fn short_timestamp(dt: Option<DateTime<Utc>>) -> String {
    dt.map(|d| d.with_timezone(&ist()).format("%b %d, %I:%M %p").to_string())
        .unwrap_or_else(|| DASH.to_string())
}

/// `01 Mar 2024, 04:15 PM`
pub fn long_timestamp(dt: Option<DateTime<Utc>>) -> String {
    dt.map(|d| d.with_timezone(&ist()).format("%d %b %Y, %I:%M %p").to_string())
        .unwrap_or_else(|| DASH.to_string())
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or(DASH)
}

/// Cut to `width` characters, marking the cut with an ellipsis
pub fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let kept: String = value.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

pub fn pager_line<T: Record>(view: &ListView<T>) -> String {
    if view.total_pages() <= 1 {
        return String::new();
    }
    format!(
        "Page {} of {} ({} total)",
        view.current_page(),
        view.total_pages(),
        view.len()
    )
}

pub fn admin_dashboard(d: &AdminDashboard) -> String {
    let mut out = String::from("Admin Dashboard\n");
    let _ = writeln!(out, "  Total Users:        {}", d.total_users);
    let _ = writeln!(out, "  Total Recruiters:   {}", d.total_recruiters);
    let _ = writeln!(out, "  Total Job Seekers:  {}", d.total_seekers);
    let _ = writeln!(out, "  Total Jobs:         {}", d.total_jobs);
    out
}

pub fn recruiter_dashboard(name: &str, d: &RecruiterDashboard) -> String {
    let mut out = format!("Welcome, {}\n", name);
    let _ = writeln!(out, "  Total Jobs:          {}", d.total_jobs);
    let _ = writeln!(out, "  Active Jobs:         {}", d.active_jobs);
    let _ = writeln!(out, "  Total Applications:  {}", d.total_applications);

    out.push_str("\nRecent Jobs\n");
    if d.recent_jobs.is_empty() {
        out.push_str("  No recent jobs.\n");
    }
    for job in &d.recent_jobs {
        let _ = writeln!(
            out,
            "  {:<30} {}",
            truncate(or_dash(job.title.as_deref()), 30),
            job.status_label()
        );
    }

    out.push_str("\nRecent Applicants\n");
    if d.recent_applications.is_empty() {
        out.push_str("  No recent applicants.\n");
    }
    for app in &d.recent_applications {
        let name = app
            .seeker
            .as_ref()
            .and_then(UserSummary::display_name)
            .unwrap_or("Applicant");
        let title = app
            .job
            .as_ref()
            .and_then(|j| j.title.as_deref())
            .unwrap_or("Job");
        let _ = writeln!(out, "  {:<25} {}", truncate(name, 25), title);
    }
    out
}

pub fn seeker_dashboard(name: &str, d: &SeekerDashboard) -> String {
    let mut out = format!("Welcome, {}\n", name);
    let _ = writeln!(out, "  Total Applications:  {}", d.total_applications);
    let _ = writeln!(out, "  Pending:             {}", d.pending);
    let _ = writeln!(out, "  Shortlisted:         {}", d.shortlisted);
    let _ = writeln!(out, "  Rejected:            {}", d.rejected);
    out
}

pub fn users_table(users: &[UserSummary]) -> String {
    let mut out = format!("{:<6} {:<22} {:<30} {:<10}\n", "ID", "Name", "Email", "Role");
    out.push_str(&"-".repeat(70));
    out.push('\n');
    for user in users {
        let role = user
            .role
            .as_ref()
            .map(|r| r.as_str().to_string())
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{:<6} {:<22} {:<30} {:<10}",
            user.id,
            truncate(or_dash(user.name.as_deref()), 22),
            truncate(or_dash(user.email.as_deref()), 30),
            role
        );
    }
    out
}

pub fn admin_jobs_table(jobs: &[Job]) -> String {
    let mut out = format!(
        "{:<6} {:<26} {:<20} {:<16} {:<20}\n",
        "ID", "Title", "Company", "Location", "Posted By"
    );
    out.push_str(&"-".repeat(92));
    out.push('\n');
    for job in jobs {
        let _ = writeln!(
            out,
            "{:<6} {:<26} {:<20} {:<16} {:<20}",
            job.id,
            truncate(or_dash(job.title.as_deref()), 26),
            truncate(or_dash(job.company_name.as_deref()), 20),
            truncate(or_dash(job.location.as_deref()), 16),
            truncate(job.posted_by_label(), 20)
        );
    }
    out
}

pub fn recruiter_jobs_table(jobs: &[Job]) -> String {
    let mut out = format!(
        "{:<6} {:<28} {:<22} {:<8}\n",
        "ID", "Title", "Company", "Status"
    );
    out.push_str(&"-".repeat(66));
    out.push('\n');
    for job in jobs {
        let _ = writeln!(
            out,
            "{:<6} {:<28} {:<22} {:<8}",
            job.id,
            truncate(or_dash(job.title.as_deref()), 28),
            truncate(or_dash(job.company_name.as_deref()), 22),
            job.status_label()
        );
    }
    out
}

pub fn job_details(job: &Job) -> String {
    let mut out = String::new();
    let fields = [
        ("Company", job.company_name.as_deref()),
        ("Title", job.title.as_deref()),
        ("Location", job.location.as_deref()),
        ("Salary", job.salary.as_deref()),
        ("Experience", job.experience.as_deref()),
        ("Job Type", job.job_type.as_deref()),
        ("Skills", job.skills.as_deref()),
        ("Description", job.description.as_deref()),
    ];
    let _ = writeln!(out, "Job #{}", job.id);
    for (label, value) in fields {
        let _ = writeln!(out, "  {:<12} {}", label, or_dash(value));
    }
    let _ = writeln!(out, "  {:<12} {}", "Status", job.status_label());
    out
}

/// Public board: every detail line per posting
pub fn public_job_board(jobs: &[Job]) -> String {
    if jobs.is_empty() {
        return "No jobs available right now.\n".to_string();
    }
    let mut out = String::new();
    for job in jobs {
        let _ = writeln!(
            out,
            "[{}] {} at {}",
            job.id,
            job.title.as_deref().unwrap_or("Job"),
            job.company_name.as_deref().unwrap_or("Company")
        );
        let _ = writeln!(
            out,
            "    Location: {} | Type: {} | Experience: {} | Salary: {}",
            or_dash(job.location.as_deref()),
            or_dash(job.job_type.as_deref()),
            or_dash(job.experience.as_deref()),
            or_dash(job.salary.as_deref())
        );
        let posted_by = job
            .posted_by
            .as_ref()
            .and_then(|p| p.name.as_deref())
            .unwrap_or("Recruiter");
        let _ = writeln!(out, "    Posted by: {}", posted_by);
    }
    out
}

pub fn seeker_job_board(jobs: &[(Job, bool)]) -> String {
    let mut out = String::new();
    for (job, applied) in jobs {
        let posted_by = job
            .posted_by
            .as_ref()
            .and_then(|p| p.name.as_deref())
            .unwrap_or("Recruiter");
        let _ = writeln!(
            out,
            "[{}] {} at {} (Posted By: {}) {}",
            job.id,
            or_dash(job.title.as_deref()),
            or_dash(job.company_name.as_deref()),
            posted_by,
            if *applied { "[Applied]" } else { "[Apply]" }
        );
    }
    out
}

pub fn applicants_table(apps: &[Application]) -> String {
    let mut out = format!(
        "{:<6} {:<22} {:<26} {:<18} {:<12}\n",
        "ID", "Applicant", "Job", "Applied", "Status"
    );
    out.push_str(&"-".repeat(88));
    out.push('\n');
    for app in apps {
        let _ = writeln!(
            out,
            "{:<6} {:<22} {:<26} {:<18} {:<12}",
            app.id,
            truncate(app.applicant_name(), 22),
            truncate(app.job_title(), 26),
            short_timestamp(app.submitted_at()),
            app.status()
        );
    }
    out
}

pub fn applications_table(apps: &[Application]) -> String {
    let mut out = format!(
        "{:<26} {:<20} {:<16} {:<12} {:<22}\n",
        "Job", "Company", "Location", "Status", "Applied"
    );
    out.push_str(&"-".repeat(98));
    out.push('\n');
    for app in apps {
        let job = app.job.as_ref();
        let _ = writeln!(
            out,
            "{:<26} {:<20} {:<16} {:<12} {:<22}",
            truncate(app.job_title(), 26),
            truncate(or_dash(job.and_then(|j| j.company_name.as_deref())), 20),
            truncate(or_dash(job.and_then(|j| j.location.as_deref())), 16),
            app.status(),
            long_timestamp(app.applied_at())
        );
    }
    out
}

pub fn seeker_profile(p: &SeekerProfileResponse) -> String {
    let form = p.to_request();
    let mut out = String::new();
    let _ = writeln!(out, "  {:<11} {}", "Name", or_dash(p.name.as_deref()));
    let _ = writeln!(out, "  {:<11} {}", "Email", or_dash(p.email.as_deref()));
    let _ = writeln!(out, "  {:<11} {}", "Phone", or_dash(Some(form.phone.as_str())));
    let _ = writeln!(out, "  {:<11} {}", "Location", or_dash(Some(form.location.as_str())));
    let _ = writeln!(out, "  {:<11} {}", "Skills", or_dash(Some(form.skills.as_str())));
    let _ = writeln!(out, "  {:<11} {}", "Experience", or_dash(Some(form.experience.as_str())));
    let _ = writeln!(out, "  {:<11} {}", "Education", or_dash(Some(form.education.as_str())));
    out
}

pub fn recruiter_profile(p: &RecruiterProfileResponse) -> String {
    let form = p.to_request();
    let mut out = String::new();
    let _ = writeln!(out, "  {:<17} {}", "Name", or_dash(p.name.as_deref()));
    let _ = writeln!(out, "  {:<17} {}", "Email", or_dash(p.email.as_deref()));
    let _ = writeln!(out, "  {:<17} {}", "Company Name", or_dash(Some(form.company_name.as_str())));
    let _ = writeln!(
        out,
        "  {:<17} {}",
        "Company Location",
        or_dash(Some(form.company_location.as_str()))
    );
    let _ = writeln!(
        out,
        "  {:<17} {}",
        "Company Website",
        or_dash(Some(form.company_website.as_str()))
    );
    let _ = writeln!(out, "  {:<17} {}", "Description", or_dash(Some(form.description.as_str())));
    out
}

#[derive(Debug, Serialize)]
pub struct JobRow<'a> {
    pub id: i64,
    pub title: &'a str,
    pub company: &'a str,
    pub location: &'a str,
    pub job_type: &'a str,
    pub status: &'a str,
    pub posted_by: &'a str,
}

impl<'a> From<&'a Job> for JobRow<'a> {
    fn from(job: &'a Job) -> Self {
        Self {
            id: job.id,
            title: job.title.as_deref().unwrap_or_default(),
            company: job.company_name.as_deref().unwrap_or_default(),
            location: job.location.as_deref().unwrap_or_default(),
            job_type: job.job_type.as_deref().unwrap_or_default(),
            status: job.status_label(),
            posted_by: job.posted_by_label(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApplicationRow<'a> {
    pub id: i64,
    pub applicant: &'a str,
    pub job: &'a str,
    pub status: String,
    pub submitted_at: String,
}

impl<'a> From<&'a Application> for ApplicationRow<'a> {
    fn from(app: &'a Application) -> Self {
        Self {
            id: app.id,
            applicant: app.applicant_name(),
            job: app.job_title(),
            status: app.status().to_string(),
            submitted_at: app
                .submitted_at()
                .map(|d| d.to_rfc3339())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserRow<'a> {
    pub id: i64,
    pub name: &'a str,
    pub email: &'a str,
    pub role: &'a str,
}

impl<'a> From<&'a UserSummary> for UserRow<'a> {
    fn from(user: &'a UserSummary) -> Self {
        Self {
            id: user.id,
            name: user.name.as_deref().unwrap_or_default(),
            email: user.email.as_deref().unwrap_or_default(),
            role: user.role.as_ref().map(|r| r.as_str()).unwrap_or_default(),
        }
    }
}

/// Write rows to `path` as CSV with a header line
pub fn export_csv<R: Serialize>(path: &Path, rows: impl IntoIterator<Item = R>) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    let mut count = 0;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write CSV row to {}", path.display()))?;
        count += 1;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ApplicationStatus, Role};

    #[test]
    fn test_timestamps_render_in_ist() {
        let dt = crate::types::parse_timestamp("2024-03-01T10:45:00Z");
        assert_eq!(short_timestamp(dt), "Mar 01, 04:15 PM");
        assert_eq!(long_timestamp(dt), "01 Mar 2024, 04:15 PM");
        assert_eq!(short_timestamp(None), "—");
    }

    #[test]
    fn test_truncate_is_char_aware() {
        assert_eq!(truncate("Chennai", 10), "Chennai");
        assert_eq!(truncate("Bengaluru, Karnataka", 10), "Bengaluru…");
        assert_eq!(truncate("Zürich Hauptbahnhof", 7), "Zürich…");
    }

    #[test]
    fn test_applicants_table_rows() {
        let apps = vec![Application {
            id: 12,
            status: Some(ApplicationStatus::Shortlisted),
            seeker: Some(UserSummary {
                id: 4,
                email: Some("kiran@example.com".into()),
                ..UserSummary::default()
            }),
            ..Application::default()
        }];
        let table = applicants_table(&apps);
        assert!(table.contains("kiran@example.com"));
        assert!(table.contains("SHORTLISTED"));
    }

    #[test]
    fn test_csv_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.csv");
        let users = vec![UserSummary {
            id: 1,
            name: Some("Asha".into()),
            email: Some("asha@example.com".into()),
            role: Some(Role::Recruiter),
            ..UserSummary::default()
        }];

        let written = export_csv(&path, users.iter().map(UserRow::from)).unwrap();
        assert_eq!(written, 1);

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("id,name,email,role"));
        assert_eq!(lines.next(), Some("1,Asha,asha@example.com,RECRUITER"));
    }

    #[test]
    fn test_pager_line_hidden_for_single_page() {
        let view = ListView::with_items(5, vec![Job::default()]);
        assert!(pager_line(&view).is_empty());

        let jobs = vec![
            Job {
                id: 1,
                ..Job::default()
            },
            Job {
                id: 2,
                ..Job::default()
            },
        ];
        let mut view = ListView::with_items(1, jobs);
        assert!(view.next());
        assert_eq!(pager_line(&view), "Page 2 of 2 (2 total)");
    }
}
