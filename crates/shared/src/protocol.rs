use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body marker the registration service uses for a logically failed enrollment.
pub const APPLICATION_FAILURE_MARKER: &str = "fail";

pub mod form_fields {
    pub const OWNER_NAME: &str = "ownerName";
    pub const PHONE_NUMBER: &str = "phoneNumber";
    pub const EMAIL: &str = "email";
    pub const DOG_NAME: &str = "dogName";
    pub const DOG_BREED: &str = "dogBreed";
    pub const DOG_BIRTH_YEAR: &str = "dogBirthYear";
    pub const DOG_SEX: &str = "dogSex";
    pub const DOG_PROFILE_IMAGE: &str = "dogProfileImage";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentResult {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dog_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<DateTime<Utc>>,
}

impl EnrollmentResult {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            dog_name: None,
            registered_at: None,
        }
    }
}

/// Envelope returned by `POST /enrollments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentResponse {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

fn default_success() -> bool {
    true
}

impl EnrollmentResponse {
    /// The service flags a rejected enrollment with `success: false`, or with the marker
    /// as either the message or the result payload itself.
    pub fn is_application_failure(&self) -> bool {
        !self.success
            || self.message.as_deref() == Some(APPLICATION_FAILURE_MARKER)
            || self.data.as_ref().and_then(serde_json::Value::as_str)
                == Some(APPLICATION_FAILURE_MARKER)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteOutcome {
    Success(EnrollmentResult),
    RequestError,
    PathError,
    ServerError,
    NetworkFailure,
    ApplicationFailure(String),
}

impl RemoteOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::RequestError => "request_error",
            Self::PathError => "path_error",
            Self::ServerError => "server_error",
            Self::NetworkFailure => "network_failure",
            Self::ApplicationFailure(_) => "application_failure",
        }
    }
}
