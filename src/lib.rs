// src/lib.rs
//! Client for the job portal REST API: authentication, role dashboards,
//! job postings and applications, with client-side paging and validation.

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod listing;
pub mod pagination;
pub mod render;
pub mod resume_validator;
pub mod types;
pub mod utils;
pub mod validation;

pub use api::{AdminApi, AuthApi, LoginOutcome, RecruiterApi, SeekerApi};
pub use config::PortalConfig;
pub use core::{ApiClient, ApiError, ApiResult, Session, SessionStore};
pub use listing::ListView;
pub use pagination::Paginator;
pub use validation::FieldErrors;
