//! Cookie-based identity extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use benefix_auth_types::cookie::BENEFIX_ACCESS_TOKEN;
use benefix_auth_types::token::validate_access_token;
use benefix_domain::user::UserRole;

use crate::error::HrServiceError;
use crate::state::AppState;

/// Caller identity read from the signed access-token cookie.
///
/// Extraction fails with 401 when the cookie is absent, the signature is
/// wrong, the token has expired, or the role claim is not a known role.
/// Handlers still decide whether that identity may do the thing (403).
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub user_role: UserRole,
}

fn identity_from_jar(jar: &CookieJar, jwt_secret: &str) -> Result<Identity, HrServiceError> {
    let token = jar
        .get(BENEFIX_ACCESS_TOKEN)
        .map(|c| c.value().to_owned())
        .ok_or(HrServiceError::InvalidToken)?;

    let info =
        validate_access_token(&token, jwt_secret).map_err(|_| HrServiceError::InvalidToken)?;

    let user_role = UserRole::from_u8(info.user_role).ok_or(HrServiceError::InvalidToken)?;

    Ok(Identity {
        user_id: info.user_id,
        user_role,
    })
}

impl FromRequestParts<AppState> for Identity {
    type Rejection = HrServiceError;

    // axum-core 0.5 declares this as `fn -> impl Future + Send` rather than
    // `async fn`; implementing it as `async fn` trips E0195 under precise
    // capturing. Do the work synchronously and return a 'static future.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let jar = CookieJar::from_headers(&parts.headers);
        let result = identity_from_jar(&jar, &state.jwt_secret);
        async move { result }
    }
}
