// src/api/recruiter.rs
use tracing::info;

use crate::core::{ApiClient, ApiError, ApiResult};
use crate::types::{
    Application, ApplicationStatus, Job, JobRequest, JobUpdateRequest, RecruiterDashboard,
    RecruiterProfileRequest, RecruiterProfileResponse,
};
use crate::validation;

pub struct RecruiterApi<'a> {
    client: &'a ApiClient,
}

impl<'a> RecruiterApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn dashboard(&self) -> ApiResult<RecruiterDashboard> {
        self.client.get("/recruiter/dashboard").await
    }

    pub async fn profile(&self) -> ApiResult<RecruiterProfileResponse> {
        self.client.get("/recruiter/profile").await
    }

    pub async fn update_profile(&self, profile: &RecruiterProfileRequest) -> ApiResult<()> {
        validation::validate_recruiter_profile(profile).map_err(ApiError::Validation)?;
        self.client
            .put_for_text("/recruiter/profile", profile)
            .await?;
        info!("Recruiter profile updated");
        Ok(())
    }

    pub async fn post_job(&self, job: &JobRequest) -> ApiResult<()> {
        validation::validate_job_post(job).map_err(ApiError::Validation)?;
        self.client.post_for_text("/recruiter/jobs", job).await?;
        info!("Posted job '{}' at {}", job.title, job.company_name);
        Ok(())
    }

    pub async fn my_jobs(&self) -> ApiResult<Vec<Job>> {
        self.client.get_list("/recruiter/jobs").await
    }

    /// Save edits; the server answers with the stored job
    pub async fn update_job(&self, id: i64, job: &JobUpdateRequest) -> ApiResult<Job> {
        validation::validate_job_update(job).map_err(ApiError::Validation)?;
        let updated: Job = self
            .client
            .put(&format!("/recruiter/jobs/{}", id), job)
            .await?;
        info!("Updated job {}", id);
        Ok(updated)
    }

    pub async fn delete_job(&self, id: i64) -> ApiResult<()> {
        self.client
            .delete(&format!("/recruiter/jobs/{}", id))
            .await?;
        info!("Deleted job {}", id);
        Ok(())
    }

    pub async fn applicants(&self) -> ApiResult<Vec<Application>> {
        self.client.get_list("/recruiter/applicants").await
    }

    /// Raw resume PDF for an application
    pub async fn resume(&self, application_id: i64) -> ApiResult<Vec<u8>> {
        self.client
            .get_bytes(&format!("/recruiter/applications/{}/resume", application_id))
            .await
    }

    pub async fn update_application_status(
        &self,
        application_id: i64,
        status: &ApplicationStatus,
    ) -> ApiResult<()> {
        if let ApplicationStatus::Other(raw) = status {
            return Err(ApiError::Rejected(format!("Unknown status: {}", raw)));
        }

        self.client
            .put_query(
                &format!("/recruiter/applications/{}/status", application_id),
                &[("status", status.as_str())],
            )
            .await?;
        info!("Application {} -> {}", application_id, status);
        Ok(())
    }
}
