// src/api/admin.rs
use tracing::info;

use crate::core::{ApiClient, ApiError, ApiResult};
use crate::types::{AdminDashboard, Job, Role, UserSummary};

pub const USER_DELETED: &str = "User deleted successfully!";
pub const JOB_DELETED: &str = "Job deleted successfully!";

pub struct AdminApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AdminApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn dashboard(&self) -> ApiResult<AdminDashboard> {
        self.client.get("/admin/dashboard").await
    }

    pub async fn users(&self) -> ApiResult<Vec<UserSummary>> {
        self.client.get_list("/admin/users").await
    }

    /// Delete a non-admin account; returns the server's message when it sends one
    pub async fn delete_user(&self, user: &UserSummary) -> ApiResult<String> {
        if !can_delete(user) {
            return Err(ApiError::Rejected(
                "Admin accounts cannot be deleted".to_string(),
            ));
        }

        let reply = self
            .client
            .delete(&format!("/admin/users/{}", user.id))
            .await?;
        info!("Deleted user {}", user.id);

        let reply = reply.trim();
        Ok(if reply.is_empty() {
            USER_DELETED.to_string()
        } else {
            reply.to_string()
        })
    }

    pub async fn jobs(&self) -> ApiResult<Vec<Job>> {
        self.client.get_list("/admin/jobs").await
    }

    pub async fn delete_job(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&format!("/admin/jobs/{}", id)).await?;
        info!("Deleted job {}", id);
        Ok(())
    }
}

/// Admin accounts are never offered for deletion
pub fn can_delete(user: &UserSummary) -> bool {
    user.role.as_ref() != Some(&Role::Admin)
}
