use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use benefix_auth_types::{
    cookie::{
        BENEFIX_ACCESS_TOKEN, BENEFIX_REFRESH_TOKEN, clear_cookies, set_access_token_cookie,
        set_refresh_token_cookie,
    },
    token::validate_access_token,
};
use benefix_domain::user::UserRole;

use crate::error::HrServiceError;
use crate::extract::Identity;
use crate::state::AppState;
use crate::usecase::token::{
    CreateTokenInput, CreateTokenUseCase, IssuedTokens, RefreshTokenUseCase,
};

const X_BENEFIX_ACCESS_TOKEN_EXPIRES: &str = "x-benefix-access-token-expires";

fn cookie_value(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name).map(|c| c.value().to_owned())
}

fn expires_header(exp: u64) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static(X_BENEFIX_ACCESS_TOKEN_EXPIRES),
        HeaderValue::from_str(&exp.to_string()).unwrap(),
    );
    headers
}

/// Cookie pair plus the expiry header for a freshly issued token pair.
fn install_session(jar: CookieJar, tokens: IssuedTokens, domain: &str) -> (CookieJar, HeaderMap) {
    let jar = set_access_token_cookie(jar, tokens.access_token, domain.to_owned());
    let jar = set_refresh_token_cookie(jar, tokens.refresh_token, domain.to_owned());
    (jar, expires_header(tokens.access_token_exp))
}

// ── GET /auth/token ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CheckTokenQuery {
    /// Minimum role the caller must hold, as its `u8` wire value.
    pub role: Option<u8>,
}

#[derive(Serialize)]
pub struct CheckTokenResponse {
    pub user_id: uuid::Uuid,
    pub user_role: u8,
    pub access_token_exp: u64,
}

pub async fn check_token(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<CheckTokenQuery>,
) -> Result<impl IntoResponse, HrServiceError> {
    let token = cookie_value(&jar, BENEFIX_ACCESS_TOKEN).ok_or(HrServiceError::InvalidToken)?;
    let info = validate_access_token(&token, &state.jwt_secret)
        .map_err(|_| HrServiceError::InvalidToken)?;

    // Role floors compare as enum variants, never as string prefixes, so a
    // future role name can't accidentally satisfy an HR check.
    if let Some(floor) = query.role {
        let floor = UserRole::from_u8(floor).ok_or(HrServiceError::MissingData)?;
        let held = UserRole::from_u8(info.user_role).ok_or(HrServiceError::InvalidToken)?;
        if held < floor {
            return Err(HrServiceError::InvalidToken);
        }
    }

    Ok((
        StatusCode::OK,
        expires_header(info.access_token_exp),
        Json(CheckTokenResponse {
            user_id: info.user_id,
            user_role: info.user_role,
            access_token_exp: info.access_token_exp,
        }),
    ))
}

// ── POST /auth/token ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateTokenRequest {
    pub email: String,
    pub code: String,
}

/// Redeem a one-time code for the cookie pair. The body stays empty; the
/// cookies and expiry header carry everything the client needs.
pub async fn create_token(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<CreateTokenRequest>,
) -> Result<impl IntoResponse, HrServiceError> {
    let usecase = CreateTokenUseCase {
        users: state.user_repo(),
        otp: state.otp_store(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let grant = usecase
        .execute(CreateTokenInput {
            email: body.email,
            code: body.code,
        })
        .await?;

    let (jar, headers) = install_session(jar, grant.tokens, &state.cookie_domain);
    Ok((StatusCode::CREATED, jar, headers))
}

// ── PATCH /auth/token ─────────────────────────────────────────────────────────

pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, HrServiceError> {
    let refresh =
        cookie_value(&jar, BENEFIX_REFRESH_TOKEN).ok_or(HrServiceError::InvalidRefreshToken)?;

    let usecase = RefreshTokenUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let grant = usecase.execute(&refresh).await?;

    let (jar, headers) = install_session(jar, grant.tokens, &state.cookie_domain);
    Ok((StatusCode::CREATED, jar, headers))
}

// ── DELETE /auth/token ────────────────────────────────────────────────────────

pub async fn revoke_token(
    State(state): State<AppState>,
    _identity: Identity,
    jar: CookieJar,
) -> Result<impl IntoResponse, HrServiceError> {
    Ok((
        StatusCode::NO_CONTENT,
        clear_cookies(jar, state.cookie_domain.clone()),
    ))
}
