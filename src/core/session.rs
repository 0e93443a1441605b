// src/core/session.rs
//! Client-side session persistence: the bearer token and the logged-in user

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::error::{ApiError, ApiResult};
use crate::types::{Role, UserSummary};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: Option<UserSummary>,
}

impl Session {
    pub fn role(&self) -> Option<&Role> {
        self.user.as_ref().and_then(|u| u.role.as_ref())
    }

    /// Claims carried by the token, read without verifying the signature
    pub fn claims(&self) -> Option<SessionClaims> {
        SessionClaims::peek(&self.token)
    }
}

/// Subset of JWT claims worth showing to the user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionClaims {
    pub sub: Option<String>,
    pub role: Option<String>,
    pub iat: Option<i64>,
    pub exp: Option<i64>,
}

impl SessionClaims {
    /// Decode the payload only; the server is the one that verifies tokens
    pub fn peek(token: &str) -> Option<Self> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        match decode::<SessionClaims>(token, &DecodingKey::from_secret(&[]), &validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                debug!("Token is not a readable JWT: {}", e);
                None
            }
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| Utc.timestamp_opt(exp, 0).single())
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().map(|exp| exp <= now).unwrap_or(false)
    }
}

/// JSON file holding the current session
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> ApiResult<Option<Session>> {
        if tokio::fs::metadata(&self.path).await.is_err() {
            return Ok(None);
        }

        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ApiError::Session(format!("failed to read {}: {}", self.path.display(), e))
        })?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let session: Session = serde_json::from_str(&content).map_err(|e| {
            ApiError::Session(format!("failed to parse {}: {}", self.path.display(), e))
        })?;
        Ok(Some(session))
    }

    pub async fn save(&self, session: &Session) -> ApiResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                ApiError::Session(format!("failed to create {}: {}", parent.display(), e))
            })?;
        }

        let content = serde_json::to_string_pretty(session)
            .map_err(|e| ApiError::Session(format!("failed to encode session: {}", e)))?;
        tokio::fs::write(&self.path, content).await.map_err(|e| {
            ApiError::Session(format!("failed to write {}: {}", self.path.display(), e))
        })?;

        info!("Session saved to {}", self.path.display());
        Ok(())
    }

    pub async fn clear(&self) -> ApiResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                info!("Session cleared: {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ApiError::Session(format!(
                "failed to remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}
