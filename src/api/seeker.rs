// src/api/seeker.rs
use reqwest::multipart::{Form, Part};
use std::collections::HashMap;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::core::{ApiClient, ApiError, ApiResult};
use crate::listing;
use crate::resume_validator::ResumeValidator;
use crate::types::{
    Application, AppliedResponse, ApplyForm, Job, SeekerDashboard, SeekerProfileRequest,
    SeekerProfileResponse,
};
use crate::validation::{self, FieldErrors};

pub const ALREADY_APPLIED: &str = "You already applied for this job.";

pub struct SeekerApi<'a> {
    client: &'a ApiClient,
}

impl<'a> SeekerApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn dashboard(&self) -> ApiResult<SeekerDashboard> {
        self.client.get("/seeker/dashboard").await
    }

    pub async fn profile(&self) -> ApiResult<SeekerProfileResponse> {
        self.client.get("/seeker/profile").await
    }

    pub async fn update_profile(&self, profile: &SeekerProfileRequest) -> ApiResult<()> {
        validation::validate_seeker_profile(profile).map_err(ApiError::Validation)?;
        self.client.put_for_text("/seeker/profile", profile).await?;
        info!("Seeker profile updated");
        Ok(())
    }

    /// Every job the API lists, unfiltered
    pub async fn jobs(&self) -> ApiResult<Vec<Job>> {
        self.client.get_list("/jobs").await
    }

    pub async fn job(&self, id: i64) -> ApiResult<Option<Job>> {
        Ok(self.jobs().await?.into_iter().find(|j| j.id == id))
    }

    pub async fn my_applications(&self) -> ApiResult<Vec<Application>> {
        self.client.get_list("/seeker/applications").await
    }

    pub async fn check_applied(&self, job_id: i64) -> ApiResult<bool> {
        let reply: AppliedResponse = self
            .client
            .get(&format!("/seeker/applied/{}", job_id))
            .await?;
        Ok(reply.applied)
    }

    /// Open jobs paired with whether the seeker already applied.
    ///
    /// Checks run concurrently; a failed check counts as not applied.
    pub async fn jobs_with_applied(&self) -> ApiResult<Vec<(Job, bool)>> {
        let jobs = listing::seeker_board(self.jobs().await?);

        let mut checks = JoinSet::new();
        for job in &jobs {
            let client = self.client.clone();
            let job_id = job.id;
            checks.spawn(async move {
                let applied = SeekerApi::new(&client)
                    .check_applied(job_id)
                    .await
                    .unwrap_or_else(|e| {
                        debug!("Applied check for job {} failed: {}", job_id, e);
                        false
                    });
                (job_id, applied)
            });
        }

        let mut applied = HashMap::new();
        while let Some(joined) = checks.join_next().await {
            if let Ok((job_id, flag)) = joined {
                applied.insert(job_id, flag);
            }
        }

        Ok(jobs
            .into_iter()
            .map(|job| {
                let flag = applied.get(&job.id).copied().unwrap_or(false);
                (job, flag)
            })
            .collect())
    }

    /// Submit an application with its resume as multipart form data
    pub async fn apply(&self, job_id: i64, form: &ApplyForm) -> ApiResult<String> {
        if self.check_applied(job_id).await? {
            return Err(ApiError::Rejected(ALREADY_APPLIED.to_string()));
        }

        validation::validate_application(form).map_err(ApiError::Validation)?;

        let resume_path = form.resume_path.as_deref().ok_or_else(|| {
            let mut errors = FieldErrors::new();
            errors.insert("resume", "Resume PDF is required.");
            ApiError::Validation(errors)
        })?;

        let resume = ResumeValidator::load_pdf(resume_path).await.map_err(|e| {
            let mut errors = FieldErrors::new();
            errors.insert("resume", e.message);
            ApiError::Validation(errors)
        })?;

        let part = Part::bytes(resume)
            .file_name(ResumeValidator::upload_file_name(resume_path))
            .mime_str("application/pdf")
            .map_err(|source| ApiError::Transport {
                url: self.client.url(&format!("/seeker/apply/{}", job_id)),
                source,
            })?;

        let multipart = Form::new()
            .text("phone", form.phone.clone())
            .text("coverLetter", form.cover_letter.clone().unwrap_or_default())
            .part("resume", part);

        let reply = self
            .client
            .post_multipart(&format!("/seeker/apply/{}", job_id), multipart)
            .await?;
        info!("Applied to job {}", job_id);
        Ok(reply)
    }
}
