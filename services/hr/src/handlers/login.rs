use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::error::HrServiceError;
use crate::state::AppState;
use crate::usecase::login::{LoginInput, LoginUseCase};

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Password check followed by a one-time code. The code travels out of band,
/// so the response body is empty; the caller redeems it at `POST /auth/token`.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<StatusCode, HrServiceError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        otp: state.otp_store(),
    };
    usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(StatusCode::CREATED)
}
