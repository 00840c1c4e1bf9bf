//! Decoding and checking the JWTs that ride in the auth cookies.
//!
//! Tokens are HS256-signed. Validation lives here so the identity extractor
//! and the refresh flow agree on one decode path.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
#[cfg(any(feature = "USE_ONLY_IN_HR_SERVICE", test))]
use serde::Serialize;
use uuid::Uuid;

/// Identity carried by a validated access token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub user_id: Uuid,
    pub user_role: u8,
    pub access_token_exp: u64,
}

/// Why a token failed validation.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// Claims encoded into both access and refresh tokens.
///
/// `sub` is the user id as a UUID string, `role` the `u8` wire value of
/// [`benefix_domain::user::UserRole`], `exp` seconds since the UNIX epoch.
///
/// Every consumer deserializes claims; serializing them mints a token, so
/// [`Serialize`] hides behind the `USE_ONLY_IN_HR_SERVICE` feature and only
/// the issuing service turns it on.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "USE_ONLY_IN_HR_SERVICE", test), derive(Serialize))]
pub struct JwtClaims {
    pub sub: String,
    pub role: u8,
    pub exp: u64,
}

/// HS256, `exp` checked with the library's default 60 s leeway, `sub`
/// required. Anything the decoder rejects beyond expiry and signature
/// collapses to [`AuthError::Malformed`].
fn claims_from(token: &str, secret: &str) -> Result<JwtClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims(&["exp", "sub"]);

    decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::Expired,
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })
}

/// Validate an access-token cookie value and parse out the identity.
///
/// The identity extractor runs this on every guarded request.
pub fn validate_access_token(cookie_value: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    let claims = claims_from(cookie_value, secret)?;
    let user_id: Uuid = claims.sub.parse().map_err(|_| AuthError::Malformed)?;
    Ok(TokenInfo {
        user_id,
        user_role: claims.role,
        access_token_exp: claims.exp,
    })
}

/// Validate a token and hand back the raw claims.
///
/// The refresh flow uses this to read `sub` out of a refresh token before
/// issuing a new pair. Everything else wants [`validate_access_token`].
#[cfg(any(feature = "USE_ONLY_IN_HR_SERVICE", test))]
pub fn validate_token(token: &str, secret: &str) -> Result<JwtClaims, AuthError> {
    claims_from(token, secret)
}
