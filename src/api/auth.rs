// src/api/auth.rs
use tracing::{info, warn};

use crate::core::{ApiClient, ApiError, ApiResult, Session};
use crate::types::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, RegisterRequest, ResetPasswordRequest,
    Role, UserSummary,
};
use crate::validation;

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub landing: Role,
    pub user: Option<UserSummary>,
    pub token_stored: bool,
}

pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Self-service registration; only seekers and recruiters can sign up
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
        role: Role,
    ) -> ApiResult<String> {
        validation::validate_registration(name, email, password, confirm_password)
            .map_err(ApiError::Validation)?;

        if !matches!(role, Role::Seeker | Role::Recruiter) {
            return Err(ApiError::Rejected(format!(
                "Cannot register as {}; choose SEEKER or RECRUITER",
                role
            )));
        }

        let request = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role,
        };

        let reply = self.client.post_for_text("/auth/register", &request).await?;
        info!("Registered {} as {}", email, request.role);
        Ok(reply)
    }

    /// Log in, persist the token and work out which dashboard to show
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginOutcome> {
        validation::validate_login(email, password).map_err(ApiError::Validation)?;

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.client.post("/auth/login", &request).await?;

        let landing = Role::landing_dashboard(response.role());
        // Keep the role with the session even when the reply has no user object
        let user = match response.user().cloned() {
            Some(mut u) => {
                if u.role.is_none() {
                    u.role = response.role().cloned();
                }
                Some(u)
            }
            None => response.role().map(|role| UserSummary {
                email: Some(email.to_string()),
                role: Some(role.clone()),
                ..Default::default()
            }),
        };

        let token_stored = match response.token() {
            Some(token) => {
                self.client
                    .store_session(Session {
                        token: token.to_string(),
                        user: user.clone(),
                    })
                    .await?;
                true
            }
            None => {
                warn!("Login response for {} carried no token", email);
                false
            }
        };

        info!("Logged in {} -> {} dashboard", email, landing);
        Ok(LoginOutcome {
            landing,
            user,
            token_stored,
        })
    }

    /// Ask the server to email a reset token
    pub async fn forgot_password(&self, email: &str) -> ApiResult<String> {
        validation::validate_forgot_password(email).map_err(ApiError::Validation)?;
        self.client
            .post_for_text(
                "/auth/forgot-password",
                &ForgotPasswordRequest {
                    email: email.to_string(),
                },
            )
            .await
    }

    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> ApiResult<String> {
        validation::validate_password_reset(token, new_password, confirm_password)
            .map_err(ApiError::Validation)?;
        self.client
            .post_for_text(
                "/auth/reset-password",
                &ResetPasswordRequest {
                    token: token.trim().to_string(),
                    new_password: new_password.to_string(),
                },
            )
            .await
    }

    pub async fn logout(&self) -> ApiResult<()> {
        self.client.clear_session().await
    }
}
