use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The authenticated user's full profile as returned by `/users/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub date_created: Option<NaiveDateTime>,
    #[serde(default)]
    pub date_updated: Option<NaiveDateTime>,
    #[serde(default)]
    pub parsed_personal: Option<Value>,
    #[serde(default)]
    pub parsed_work_experiences: Option<Value>,
    #[serde(default)]
    pub parsed_educations: Option<Value>,
    #[serde(default)]
    pub parsed_languages: Option<Value>,
    #[serde(default)]
    pub parsed_skills: Option<Vec<String>>,
    #[serde(default)]
    pub additional_info: Option<String>,
    /// Uploaded résumé, base64-encoded PDF.
    #[serde(default)]
    pub resume: Option<String>,
}

fn default_true() -> bool {
    true
}

impl User {
    /// Name to greet the user with: full name when set, username otherwise.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }

    pub fn has_resume(&self) -> bool {
        self.resume.as_deref().is_some_and(|r| !r.is_empty())
    }
}

/// OAuth2 password-flow credentials, sent form-encoded.
#[derive(Debug, Clone, Serialize)]
pub struct LoginForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grant_type: Option<String>,
    pub username: String,
    pub password: String,
    pub scope: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            grant_type: Some("password".to_string()),
            username: username.into(),
            password: password.into(),
            scope: String::new(),
            client_id: None,
            client_secret: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPassword {
    pub token: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePassword {
    pub current_password: String,
    pub new_password: String,
}

/// Admin-side user creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub name: String,
    pub password: String,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Self-service signup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRegister {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Partial profile update. Only fields that are `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserUpdateMe {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed_personal: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed_work_experiences: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed_educations: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed_languages: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed_skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

impl UserUpdateMe {
    pub fn is_empty(&self) -> bool {
        *self == UserUpdateMe::default()
    }
}
