// src/core/api_client.rs
//! HTTP client for the portal API - injects the bearer token on every non-auth route

use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::error::{ApiError, ApiResult};
use super::session::{Session, SessionStore};
use crate::config::PortalConfig;

/// Routes that must never carry a bearer token
pub const PUBLIC_ROUTES: [&str; 4] = [
    "/auth/login",
    "/auth/register",
    "/auth/forgot-password",
    "/auth/reset-password",
];

/// A route is public when its path contains one of the auth paths
pub fn is_public_route(path: &str) -> bool {
    PUBLIC_ROUTES.iter().any(|route| path.contains(route))
}

#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    store: SessionStore,
    session: Arc<RwLock<Option<Session>>>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout_seconds: u64, store: SessionStore) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|source| ApiError::Transport {
                url: base_url.to_string(),
                source,
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
            session: Arc::new(RwLock::new(None)),
        })
    }

    /// Build a client and restore any saved session
    pub async fn from_config(config: &PortalConfig) -> ApiResult<Self> {
        let client = Self::new(
            &config.api_base_url,
            config.timeout_seconds,
            SessionStore::new(&config.session_path),
        )?;

        if let Some(session) = client.store.load().await? {
            debug!("Restored session from {}", client.store.path().display());
            client.replace_session(Some(session));
        }

        Ok(client)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> Option<Session> {
        self.session.read().ok().and_then(|guard| guard.clone())
    }

    pub fn token(&self) -> Option<String> {
        self.session().map(|s| s.token)
    }

    pub async fn store_session(&self, session: Session) -> ApiResult<()> {
        self.store.save(&session).await?;
        self.replace_session(Some(session));
        Ok(())
    }

    pub async fn clear_session(&self) -> ApiResult<()> {
        self.store.clear().await?;
        self.replace_session(None);
        Ok(())
    }

    fn replace_session(&self, session: Option<Session>) {
        if let Ok(mut guard) = self.session.write() {
            *guard = session;
        }
    }

    /// Token to attach for `path`, if any
    pub fn bearer_for(&self, path: &str) -> Option<String> {
        if is_public_route(path) {
            None
        } else {
            self.token()
        }
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        let request_id = Uuid::new_v4().to_string();
        debug!(request_id = %request_id, method = %method, url = %url, "Sending request");

        let builder = self
            .client
            .request(method, &url)
            .header("X-Request-Id", request_id);

        match self.bearer_for(path) {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute(&self, builder: RequestBuilder, path: &str) -> ApiResult<Response> {
        let url = self.url(path);
        let response = builder
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        info!("{} -> {}", url, status);

        if status.is_success() {
            Ok(response)
        } else {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!("API error response from {}: {} {}", url, status, body);
            Err(ApiError::Status { status, body })
        }
    }

    async fn read_text(&self, response: Response, path: &str) -> ApiResult<String> {
        response.text().await.map_err(|e| ApiError::Decode {
            url: self.url(path),
            reason: e.to_string(),
        })
    }

    async fn read_json<R: DeserializeOwned>(&self, response: Response, path: &str) -> ApiResult<R> {
        let text = self.read_text(response, path).await?;
        serde_json::from_str(&text).map_err(|e| ApiError::Decode {
            url: self.url(path),
            reason: format!("{} (body: {})", e, text),
        })
    }

    /// Generic GET request
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> ApiResult<R> {
        let response = self.execute(self.request(Method::GET, path), path).await?;
        self.read_json(response, path).await
    }

    /// GET a collection; any body that is not a JSON array is treated as empty
    pub async fn get_list<R: DeserializeOwned>(&self, path: &str) -> ApiResult<Vec<R>> {
        let response = self.execute(self.request(Method::GET, path), path).await?;
        let text = self.read_text(response, path).await?;

        match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(value @ serde_json::Value::Array(_)) => {
                serde_json::from_value(value).map_err(|e| ApiError::Decode {
                    url: self.url(path),
                    reason: e.to_string(),
                })
            }
            Ok(other) => {
                warn!("Expected a list from {}, got {}", path, other);
                Ok(Vec::new())
            }
            Err(e) => {
                warn!("Unreadable list body from {} ({}): {:?}", path, e, text);
                Ok(Vec::new())
            }
        }
    }

    /// GET raw bytes (resume downloads)
    pub async fn get_bytes(&self, path: &str) -> ApiResult<Vec<u8>> {
        let response = self.execute(self.request(Method::GET, path), path).await?;
        let bytes = response.bytes().await.map_err(|e| ApiError::Decode {
            url: self.url(path),
            reason: e.to_string(),
        })?;
        Ok(bytes.to_vec())
    }

    /// Generic POST request with JSON
    pub async fn post<T, R>(&self, path: &str, payload: &T) -> ApiResult<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path).json(payload);
        let response = self.execute(builder, path).await?;
        self.read_json(response, path).await
    }

    /// POST JSON and keep whatever the server answers as text
    pub async fn post_for_text<T>(&self, path: &str, payload: &T) -> ApiResult<String>
    where
        T: Serialize + ?Sized,
    {
        let builder = self.request(Method::POST, path).json(payload);
        let response = self.execute(builder, path).await?;
        self.read_text(response, path).await
    }

    pub async fn put<T, R>(&self, path: &str, payload: &T) -> ApiResult<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let builder = self.request(Method::PUT, path).json(payload);
        let response = self.execute(builder, path).await?;
        self.read_json(response, path).await
    }

    pub async fn put_for_text<T>(&self, path: &str, payload: &T) -> ApiResult<String>
    where
        T: Serialize + ?Sized,
    {
        let builder = self.request(Method::PUT, path).json(payload);
        let response = self.execute(builder, path).await?;
        self.read_text(response, path).await
    }

    /// PUT with no body, parameters in the query string
    pub async fn put_query(&self, path: &str, query: &[(&str, &str)]) -> ApiResult<String> {
        let builder = self.request(Method::PUT, path).query(query);
        let response = self.execute(builder, path).await?;
        self.read_text(response, path).await
    }

    pub async fn delete(&self, path: &str) -> ApiResult<String> {
        let response = self.execute(self.request(Method::DELETE, path), path).await?;
        self.read_text(response, path).await
    }

    pub async fn post_multipart(&self, path: &str, form: Form) -> ApiResult<String> {
        let builder = self.request(Method::POST, path).multipart(form);
        let response = self.execute(builder, path).await?;
        self.read_text(response, path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_token(token: Option<&str>) -> ApiClient {
        let client = ApiClient::new(
            "https://portal.example.com/api/",
            5,
            SessionStore::new("unused-session.json"),
        )
        .unwrap();
        client.replace_session(token.map(|t| Session {
            token: t.to_string(),
            user: None,
        }));
        client
    }

    #[test]
    fn test_public_routes() {
        assert!(is_public_route("/auth/login"));
        assert!(is_public_route("/auth/reset-password"));
        assert!(!is_public_route("/auth/me"));
        assert!(!is_public_route("/jobs"));
        assert!(!is_public_route("/seeker/apply/4"));
    }

    #[test]
    fn test_bearer_skipped_on_public_routes() {
        let client = client_with_token(Some("tok"));
        assert_eq!(client.bearer_for("/admin/users"), Some("tok".to_string()));
        assert_eq!(client.bearer_for("/auth/register"), None);

        let anonymous = client_with_token(None);
        assert_eq!(anonymous.bearer_for("/admin/users"), None);
    }

    #[test]
    fn test_url_joining() {
        let client = client_with_token(None);
        assert_eq!(client.base_url(), "https://portal.example.com/api");
        assert_eq!(client.url("/jobs"), "https://portal.example.com/api/jobs");
        assert_eq!(client.url("jobs"), "https://portal.example.com/api/jobs");
    }
}
