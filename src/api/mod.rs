// src/api/mod.rs
//! Typed endpoint groups, one per role

pub mod admin;
pub mod auth;
pub mod recruiter;
pub mod seeker;

pub use admin::AdminApi;
pub use auth::{AuthApi, LoginOutcome};
pub use recruiter::RecruiterApi;
pub use seeker::SeekerApi;
