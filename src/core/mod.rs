// src/core/mod.rs
//! Transport layer shared by every role API

pub mod api_client;
pub mod error;
pub mod session;

pub use api_client::{is_public_route, ApiClient};
pub use error::{ApiError, ApiResult};
pub use session::{Session, SessionClaims, SessionStore};
