use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// HR service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum HrServiceError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid one-time code")]
    InvalidOtp,
    #[error("invalid token")]
    InvalidToken,
    #[error("invalid refresh token")]
    InvalidRefreshToken,
    #[error("forbidden")]
    Forbidden,
    #[error("user not found")]
    UserNotFound,
    #[error("employee not found")]
    EmployeeNotFound,
    #[error("dependent not found")]
    DependentNotFound,
    #[error("policy not found")]
    PolicyNotFound,
    #[error("email already exists")]
    EmailTaken,
    #[error("policy code already exists")]
    PolicyCodeTaken,
    #[error("missing data")]
    MissingData,
    #[error("invalid date")]
    InvalidDate,
    #[error("could not parse file")]
    InvalidFile,
    #[error("unsupported file type")]
    UnsupportedFile,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl HrServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidOtp => "INVALID_OTP",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            Self::Forbidden => "FORBIDDEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::EmployeeNotFound => "EMPLOYEE_NOT_FOUND",
            Self::DependentNotFound => "DEPENDENT_NOT_FOUND",
            Self::PolicyNotFound => "POLICY_NOT_FOUND",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::PolicyCodeTaken => "POLICY_CODE_TAKEN",
            Self::MissingData => "MISSING_DATA",
            Self::InvalidDate => "INVALID_DATE",
            Self::InvalidFile => "INVALID_FILE",
            Self::UnsupportedFile => "UNSUPPORTED_FILE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for HrServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidCredentials
            | Self::InvalidOtp
            | Self::InvalidToken
            | Self::InvalidRefreshToken => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserNotFound
            | Self::EmployeeNotFound
            | Self::DependentNotFound
            | Self::PolicyNotFound => StatusCode::NOT_FOUND,
            Self::EmailTaken | Self::PolicyCodeTaken => StatusCode::CONFLICT,
            Self::MissingData | Self::InvalidDate | Self::InvalidFile | Self::UnsupportedFile => {
                StatusCode::BAD_REQUEST
            }
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Only internal errors carry an anyhow chain worth logging; TraceLayer
        // already records method, uri, and status for every request.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
