// src/types/profile.rs
use serde::{Deserialize, Serialize};

use super::string_or_number;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeekerProfile {
    pub phone: Option<String>,
    pub location: Option<String>,
    pub skills: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub experience: Option<String>,
    pub education: Option<String>,
}

/// `GET /seeker/profile`: account identity plus the editable profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeekerProfileResponse {
    pub name: Option<String>,
    pub email: Option<String>,
    pub profile: Option<SeekerProfile>,
}

impl SeekerProfileResponse {
    /// Form state seeded from the stored profile, blanks where unset
    pub fn to_request(&self) -> SeekerProfileRequest {
        let p = self.profile.clone().unwrap_or_default();
        SeekerProfileRequest {
            phone: p.phone.unwrap_or_default(),
            location: p.location.unwrap_or_default(),
            skills: p.skills.unwrap_or_default(),
            experience: p.experience.unwrap_or_default(),
            education: p.education.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeekerProfileRequest {
    pub phone: String,
    pub location: String,
    pub skills: String,
    pub experience: String,
    pub education: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruiterProfile {
    pub company_name: Option<String>,
    pub company_location: Option<String>,
    pub company_website: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecruiterProfileResponse {
    pub name: Option<String>,
    pub email: Option<String>,
    pub profile: Option<RecruiterProfile>,
}

impl RecruiterProfileResponse {
    pub fn to_request(&self) -> RecruiterProfileRequest {
        let p = self.profile.clone().unwrap_or_default();
        RecruiterProfileRequest {
            company_name: p.company_name.unwrap_or_default(),
            company_location: p.company_location.unwrap_or_default(),
            company_website: p.company_website.unwrap_or_default(),
            description: p.description.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruiterProfileRequest {
    pub company_name: String,
    pub company_location: String,
    pub company_website: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeker_experience_accepts_numbers() {
        let res: SeekerProfileResponse = serde_json::from_str(
            r#"{"name":"Meera","email":"m@x.io","profile":{"phone":"9876543210","experience":4}}"#,
        )
        .unwrap();
        let form = res.to_request();
        assert_eq!(form.experience, "4");
        assert_eq!(form.phone, "9876543210");
        assert_eq!(form.location, "");
    }

    #[test]
    fn test_recruiter_profile_without_profile_block() {
        let res: RecruiterProfileResponse =
            serde_json::from_str(r#"{"name":"Dev","email":"d@x.io","profile":null}"#).unwrap();
        let form = res.to_request();
        assert!(form.company_name.is_empty());
        let body = serde_json::to_value(&form).unwrap();
        assert!(body.get("companyWebsite").is_some());
    }
}
