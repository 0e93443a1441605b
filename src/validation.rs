// src/validation.rs
//! Client-side form checks, run before any request leaves the machine

use reqwest::Url;
use std::fmt;

use crate::types::{
    ApplyForm, JobRequest, JobUpdateRequest, RecruiterProfileRequest, SeekerProfileRequest,
};

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_EXPERIENCE_YEARS: f64 = 30.0;

/// Field name -> message, in the order the checks ran
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: Vec<(&'static str, String)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        if let Some(entry) = self.entries.iter_mut().find(|(f, _)| *f == field) {
            entry.1 = message.into();
        } else {
            self.entries.push((field, message.into()));
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(f, m)| (*f, m.as_str()))
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    fn require(&mut self, field: &'static str, value: &str, message: &str) -> bool {
        if value.trim().is_empty() {
            self.insert(field, message);
            false
        } else {
            true
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .entries
            .iter()
            .map(|(field, msg)| format!("{}: {}", field, msg))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    errors.require("name", name, "Full name is required");
    errors.require("email", email, "Email is required");

    if password.is_empty() {
        errors.insert("password", "Password is required");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.insert("password", "Password must be at least 6 characters");
    }

    if confirm_password.is_empty() {
        errors.insert("confirmPassword", "Please confirm your password");
    } else if password != confirm_password {
        errors.insert("confirmPassword", "Passwords do not match");
    }

    errors.into_result()
}

pub fn validate_login(email: &str, password: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    errors.require("email", email, "Email is required");
    if password.is_empty() {
        errors.insert("password", "Password is required");
    }
    errors.into_result()
}

pub fn validate_forgot_password(email: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    errors.require("email", email, "Please enter your email address.");
    errors.into_result()
}

pub fn validate_password_reset(
    token: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if token.trim().is_empty() || password.is_empty() || confirm_password.is_empty() {
        errors.insert("form", "All fields are required.");
    } else if password != confirm_password {
        errors.insert("confirmPassword", "Passwords do not match.");
    }
    errors.into_result()
}

pub fn validate_job_post(job: &JobRequest) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    errors.require("companyName", &job.company_name, "Company name is required");
    errors.require("title", &job.title, "Job title is required");
    errors.require("location", &job.location, "Location is required");
    errors.require("salary", &job.salary, "Salary is required");
    errors.require("experience", &job.experience, "Experience is required");
    errors.require("jobType", &job.job_type, "Job type is required");
    errors.require("skills", &job.skills, "Skills are required");
    errors.require("description", &job.description, "Description is required");
    errors.into_result()
}

/// Edits only insist on the identifying fields
pub fn validate_job_update(job: &JobUpdateRequest) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    errors.require("companyName", &job.company_name, "Company name is required.");
    errors.require("title", &job.title, "Job title is required.");
    errors.require("location", &job.location, "Location is required.");
    errors.into_result()
}

pub fn validate_recruiter_profile(profile: &RecruiterProfileRequest) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    errors.require("companyName", &profile.company_name, "Company name is required");
    errors.require(
        "companyLocation",
        &profile.company_location,
        "Company location is required",
    );
    errors.require(
        "description",
        &profile.description,
        "Company description is required",
    );

    if !profile.company_website.is_empty() && Url::parse(&profile.company_website).is_err() {
        errors.insert("companyWebsite", "Enter valid website URL");
    }

    errors.into_result()
}

/// Exactly ten ASCII digits
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == 10 && phone.bytes().all(|b| b.is_ascii_digit())
}

pub fn validate_seeker_profile(profile: &SeekerProfileRequest) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if errors.require("phone", &profile.phone, "Phone number is required")
        && !is_valid_phone(&profile.phone)
    {
        errors.insert("phone", "Phone must be 10 digits");
    }

    errors.require("location", &profile.location, "Location is required");
    errors.require("skills", &profile.skills, "Skills are required");

    if errors.require("experience", &profile.experience, "Experience is required") {
        let valid = profile
            .experience
            .trim()
            .parse::<f64>()
            .map(|years| years.is_finite() && (0.0..=MAX_EXPERIENCE_YEARS).contains(&years))
            .unwrap_or(false);
        if !valid {
            errors.insert("experience", "Experience must be valid");
        }
    }

    errors.require("education", &profile.education, "Education is required");
    errors.into_result()
}

/// Presence checks for an application; the resume file itself is checked by `ResumeValidator`
pub fn validate_application(form: &ApplyForm) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    errors.require("phone", &form.phone, "Phone number is required.");
    if form.resume_path.is_none() {
        errors.insert("resume", "Resume PDF is required.");
    }
    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn full_job() -> JobRequest {
        JobRequest {
            company_name: "Acme".into(),
            title: "Backend Engineer".into(),
            location: "Pune".into(),
            salary: "12 LPA".into(),
            experience: "2-4 years".into(),
            job_type: "Full Time".into(),
            skills: "Rust, SQL".into(),
            description: "Build services".into(),
        }
    }

    fn seeker_profile() -> SeekerProfileRequest {
        SeekerProfileRequest {
            phone: "9876543210".into(),
            location: "Chennai".into(),
            skills: "Java".into(),
            experience: "3".into(),
            education: "B.Tech".into(),
        }
    }

    #[test]
    fn test_registration_rules() {
        assert!(validate_registration("Asha", "a@x.io", "secret1", "secret1").is_ok());

        let errors = validate_registration(" ", "", "abc", "abd").unwrap_err();
        assert_eq!(errors.get("name"), Some("Full name is required"));
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(
            errors.get("password"),
            Some("Password must be at least 6 characters")
        );
        assert_eq!(errors.get("confirmPassword"), Some("Passwords do not match"));

        let errors = validate_registration("Asha", "a@x.io", "", "").unwrap_err();
        assert_eq!(errors.get("password"), Some("Password is required"));
        assert_eq!(
            errors.get("confirmPassword"),
            Some("Please confirm your password")
        );
    }

    #[test]
    fn test_password_reset_rules() {
        assert!(validate_password_reset("tok", "newpass", "newpass").is_ok());
        assert_eq!(
            validate_password_reset(" ", "a", "a").unwrap_err().get("form"),
            Some("All fields are required.")
        );
        assert_eq!(
            validate_password_reset("tok", "a", "b")
                .unwrap_err()
                .get("confirmPassword"),
            Some("Passwords do not match.")
        );
    }

    #[test]
    fn test_job_post_requires_every_field() {
        assert!(validate_job_post(&full_job()).is_ok());

        let errors = validate_job_post(&JobRequest::default()).unwrap_err();
        assert_eq!(errors.len(), 8);
        assert_eq!(errors.get("jobType"), Some("Job type is required"));

        let update = JobUpdateRequest {
            company_name: "Acme".into(),
            title: "Dev".into(),
            location: "".into(),
            ..JobUpdateRequest::default()
        };
        let errors = validate_job_update(&update).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("location"), Some("Location is required."));
    }

    #[test]
    fn test_recruiter_website_must_be_absolute_url() {
        let mut profile = RecruiterProfileRequest {
            company_name: "Acme".into(),
            company_location: "Pune".into(),
            company_website: String::new(),
            description: "We build things".into(),
        };
        assert!(validate_recruiter_profile(&profile).is_ok());

        profile.company_website = "acme.io".into();
        assert_eq!(
            validate_recruiter_profile(&profile)
                .unwrap_err()
                .get("companyWebsite"),
            Some("Enter valid website URL")
        );

        profile.company_website = "https://acme.io".into();
        assert!(validate_recruiter_profile(&profile).is_ok());
    }

    #[test]
    fn test_seeker_phone_and_experience() {
        assert!(validate_seeker_profile(&seeker_profile()).is_ok());

        let mut profile = seeker_profile();
        profile.phone = "98765-4321".into();
        profile.experience = "31".into();
        let errors = validate_seeker_profile(&profile).unwrap_err();
        assert_eq!(errors.get("phone"), Some("Phone must be 10 digits"));
        assert_eq!(errors.get("experience"), Some("Experience must be valid"));

        profile.phone = String::new();
        profile.experience = "ten".into();
        let errors = validate_seeker_profile(&profile).unwrap_err();
        assert_eq!(errors.get("phone"), Some("Phone number is required"));
        assert_eq!(errors.get("experience"), Some("Experience must be valid"));

        profile.experience = "0".into();
        profile.phone = "0123456789".into();
        assert!(validate_seeker_profile(&profile).is_ok());
    }

    #[test]
    fn test_application_presence() {
        let errors = validate_application(&ApplyForm::default()).unwrap_err();
        assert_eq!(errors.get("phone"), Some("Phone number is required."));
        assert_eq!(errors.get("resume"), Some("Resume PDF is required."));

        let form = ApplyForm {
            phone: "9876543210".into(),
            cover_letter: None,
            resume_path: Some(PathBuf::from("cv.pdf")),
        };
        assert!(validate_application(&form).is_ok());
    }

    #[test]
    fn test_field_errors_display() {
        let mut errors = FieldErrors::new();
        errors.insert("title", "Job title is required");
        errors.insert("title", "Job title is required.");
        errors.insert("location", "Location is required");
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.to_string(),
            "title: Job title is required.; location: Location is required"
        );
    }
}
