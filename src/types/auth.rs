// src/types/auth.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role as the API spells it.
///
/// Unknown values are kept verbatim (uppercased) so they still render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Recruiter,
    Seeker,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "ADMIN",
            Role::Recruiter => "RECRUITER",
            Role::Seeker => "SEEKER",
            Role::Other(raw) => raw,
        }
    }

    /// Dashboard a user lands on after login; anything unrecognised is a seeker
    pub fn landing_dashboard(role: Option<&Role>) -> Role {
        match role {
            Some(Role::Admin) => Role::Admin,
            Some(Role::Recruiter) => Role::Recruiter,
            _ => Role::Seeker,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        let upper = value.trim().to_uppercase();
        match upper.as_str() {
            "ADMIN" => Role::Admin,
            "RECRUITER" => Role::Recruiter,
            "SEEKER" => Role::Seeker,
            _ => Role::Other(upper),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(default)]
    pub id: i64,
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

impl UserSummary {
    /// Best human label for the account
    pub fn display_name(&self) -> Option<&str> {
        [&self.name, &self.username, &self.email]
            .into_iter()
            .filter_map(|v| v.as_deref())
            .find(|s| !s.trim().is_empty())
    }
}

impl super::Record for UserSummary {
    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

/// Login payload; the token and user may sit at the top level or under `data`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    pub token: Option<String>,
    pub user: Option<UserSummary>,
    pub role: Option<Role>,
    pub data: Option<Box<LoginResponse>>,
}

impl LoginResponse {
    pub fn token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .or_else(|| self.data.as_ref().and_then(|d| d.token.as_deref()))
    }

    pub fn user(&self) -> Option<&UserSummary> {
        self.user
            .as_ref()
            .or_else(|| self.data.as_ref().and_then(|d| d.user.as_ref()))
    }

    pub fn role(&self) -> Option<&Role> {
        self.user()
            .and_then(|u| u.role.as_ref())
            .or(self.role.as_ref())
            .or_else(|| self.data.as_ref().and_then(|d| d.role.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing_is_case_insensitive() {
        let role: Role = serde_json::from_str("\"recruiter\"").unwrap();
        assert_eq!(role, Role::Recruiter);

        let other: Role = serde_json::from_str("\"moderator\"").unwrap();
        assert_eq!(other, Role::Other("MODERATOR".to_string()));
        assert_eq!(serde_json::to_string(&Role::Seeker).unwrap(), "\"SEEKER\"");
    }

    #[test]
    fn test_landing_dashboard_defaults_to_seeker() {
        assert_eq!(Role::landing_dashboard(Some(&Role::Admin)), Role::Admin);
        assert_eq!(Role::landing_dashboard(Some(&Role::Recruiter)), Role::Recruiter);
        assert_eq!(
            Role::landing_dashboard(Some(&Role::Other("GUEST".into()))),
            Role::Seeker
        );
        assert_eq!(Role::landing_dashboard(None), Role::Seeker);
    }

    #[test]
    fn test_login_response_nested_data() {
        let flat: LoginResponse = serde_json::from_str(
            r#"{"token":"abc","user":{"id":3,"name":"Asha","role":"ADMIN"}}"#,
        )
        .unwrap();
        assert_eq!(flat.token(), Some("abc"));
        assert_eq!(flat.role(), Some(&Role::Admin));

        let nested: LoginResponse =
            serde_json::from_str(r#"{"data":{"token":"xyz","role":"RECRUITER"}}"#).unwrap();
        assert_eq!(nested.token(), Some("xyz"));
        assert!(nested.user().is_none());
        assert_eq!(nested.role(), Some(&Role::Recruiter));
    }

    #[test]
    fn test_display_name_skips_blank_candidates() {
        let user: UserSummary = serde_json::from_str(
            r#"{"id":5,"name":"","username":"ravi_k","email":"ravi@example.com"}"#,
        )
        .unwrap();
        assert_eq!(user.display_name(), Some("ravi_k"));

        let user = UserSummary {
            name: Some("  ".into()),
            email: Some("ravi@example.com".into()),
            ..UserSummary::default()
        };
        assert_eq!(user.display_name(), Some("ravi@example.com"));
        assert_eq!(UserSummary::default().display_name(), None);
    }

    #[test]
    fn test_reset_request_uses_camel_case() {
        let body = serde_json::to_value(ResetPasswordRequest {
            token: "t".into(),
            new_password: "secret1".into(),
        })
        .unwrap();
        assert_eq!(body["newPassword"], "secret1");
    }
}
