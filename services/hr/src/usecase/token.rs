use jsonwebtoken::{EncodingKey, Header, encode};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use benefix_auth_types::cookie::{ACCESS_TOKEN_EXP, REFRESH_TOKEN_EXP};
use benefix_auth_types::token::{JwtClaims, validate_token};

use crate::domain::repository::{OtpStore, UserRepository};
use crate::domain::types::{AuthUser, normalize_email};
use crate::error::HrServiceError;

/// Access/refresh pair produced by a successful redemption or refresh.
#[derive(Debug)]
pub struct IssuedTokens {
    pub access_token: String,
    pub access_token_exp: u64,
    pub refresh_token: String,
}

/// A granted session: the account it belongs to and the tokens to install.
#[derive(Debug)]
pub struct TokenGrant {
    pub user: AuthUser,
    pub tokens: IssuedTokens,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

fn mint(user: &AuthUser, secret: &str, lifetime: u64) -> Result<(String, u64), HrServiceError> {
    let exp = now_secs() + lifetime;
    let claims = JwtClaims {
        sub: user.id.to_string(),
        role: user.role,
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| HrServiceError::Internal(e.into()))?;
    Ok((token, exp))
}

/// Sign a fresh access/refresh pair for `user`.
pub fn issue_token_pair(user: &AuthUser, secret: &str) -> Result<IssuedTokens, HrServiceError> {
    let (access_token, access_token_exp) = mint(user, secret, ACCESS_TOKEN_EXP)?;
    let (refresh_token, _) = mint(user, secret, REFRESH_TOKEN_EXP)?;
    Ok(IssuedTokens {
        access_token,
        access_token_exp,
        refresh_token,
    })
}

// ── CreateToken (one-time code redemption) ───────────────────────────────────

pub struct CreateTokenInput {
    pub email: String,
    pub code: String,
}

pub struct CreateTokenUseCase<U: UserRepository, O: OtpStore> {
    pub users: U,
    pub otp: O,
    pub jwt_secret: String,
}

impl<U: UserRepository, O: OtpStore> CreateTokenUseCase<U, O> {
    pub async fn execute(&self, input: CreateTokenInput) -> Result<TokenGrant, HrServiceError> {
        let email = normalize_email(&input.email);

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(HrServiceError::UserNotFound)?;

        let stored = self.otp.get_code(&email).await?;
        if stored.as_deref() != Some(input.code.as_str()) {
            return Err(HrServiceError::InvalidOtp);
        }

        // Codes are single-use; the stored entry is dropped only on a
        // successful match, so a mistyped code can be retried until the TTL.
        self.otp.delete_code(&email).await?;

        let tokens = issue_token_pair(&user, &self.jwt_secret)?;
        Ok(TokenGrant { user, tokens })
    }
}

// ── RefreshToken ─────────────────────────────────────────────────────────────

pub struct RefreshTokenUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> RefreshTokenUseCase<U> {
    /// Trade a valid refresh token for a new pair.
    ///
    /// Signature and expiry are checked on the refresh token itself; the
    /// state of the old access token never matters here.
    pub async fn execute(&self, refresh_token: &str) -> Result<TokenGrant, HrServiceError> {
        let claims = validate_token(refresh_token, &self.jwt_secret)
            .map_err(|_| HrServiceError::InvalidRefreshToken)?;

        let user_id = claims
            .sub
            .parse::<Uuid>()
            .map_err(|_| HrServiceError::InvalidRefreshToken)?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(HrServiceError::InvalidRefreshToken)?;

        let tokens = issue_token_pair(&user, &self.jwt_secret)?;
        Ok(TokenGrant { user, tokens })
    }
}
