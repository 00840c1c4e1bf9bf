use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{EncodingKey, Header, encode};

use benefix_auth_types::cookie::{ACCESS_TOKEN_EXP, REFRESH_TOKEN_EXP};
use benefix_auth_types::token::{AuthError, JwtClaims, validate_access_token, validate_token};
use benefix_hr::error::HrServiceError;
use benefix_hr::usecase::token::{
    CreateTokenInput, CreateTokenUseCase, RefreshTokenUseCase, issue_token_pair,
};

use crate::helpers::{MockOtpStore, MockUserRepo, TEST_JWT_SECRET, test_user};

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

// ── issue_token_pair ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_mint_a_pair_the_cookie_extractor_accepts() {
    let user = test_user("user@example.com", "pw");
    let pair = issue_token_pair(&user, TEST_JWT_SECRET).unwrap();

    let info = validate_access_token(&pair.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.user_id, user.id);
    assert_eq!(info.user_role, user.role);
    assert_eq!(info.access_token_exp, pair.access_token_exp);

    let refresh_claims = validate_token(&pair.refresh_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(refresh_claims.sub, user.id.to_string());
}

#[tokio::test]
async fn should_give_the_refresh_token_a_longer_life_than_the_access_token() {
    let user = test_user("user@example.com", "pw");
    let before = now_secs();
    let pair = issue_token_pair(&user, TEST_JWT_SECRET).unwrap();

    let access = validate_token(&pair.access_token, TEST_JWT_SECRET).unwrap();
    let refresh = validate_token(&pair.refresh_token, TEST_JWT_SECRET).unwrap();

    assert!(access.exp >= before + ACCESS_TOKEN_EXP);
    assert!(refresh.exp >= before + REFRESH_TOKEN_EXP);
    assert!(refresh.exp > access.exp);
}

#[tokio::test]
async fn should_mint_tokens_other_secrets_cannot_validate() {
    let user = test_user("user@example.com", "pw");
    let pair = issue_token_pair(&user, TEST_JWT_SECRET).unwrap();

    let result = validate_token(&pair.access_token, "another-secret");
    assert!(matches!(result, Err(AuthError::InvalidSignature)));
}

// ── CreateTokenUseCase ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_redeem_a_code_exactly_once() {
    let user = test_user("user@example.com", "pw");
    let otp = MockOtpStore::with_code("user@example.com", "123456");
    let codes_handle = otp.codes_handle();

    let uc = CreateTokenUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        otp,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let grant = uc
        .execute(CreateTokenInput {
            email: "user@example.com".to_owned(),
            code: "123456".to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(grant.user.id, user.id);
    assert!(validate_token(&grant.tokens.access_token, TEST_JWT_SECRET).is_ok());
    assert!(validate_token(&grant.tokens.refresh_token, TEST_JWT_SECRET).is_ok());
    assert!(
        codes_handle.lock().unwrap().is_empty(),
        "a redeemed code must be removed from the store"
    );

    // The same code a second time is no longer valid.
    let result = uc
        .execute(CreateTokenInput {
            email: "user@example.com".to_owned(),
            code: "123456".to_owned(),
        })
        .await;
    assert!(
        matches!(result, Err(HrServiceError::InvalidOtp)),
        "expected InvalidOtp, got {result:?}"
    );
}

#[tokio::test]
async fn should_keep_code_when_it_does_not_match() {
    let user = test_user("user@example.com", "pw");
    let otp = MockOtpStore::with_code("user@example.com", "123456");
    let codes_handle = otp.codes_handle();

    let uc = CreateTokenUseCase {
        users: MockUserRepo::new(vec![user]),
        otp,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = uc
        .execute(CreateTokenInput {
            email: "user@example.com".to_owned(),
            code: "000000".to_owned(),
        })
        .await;
    assert!(
        matches!(result, Err(HrServiceError::InvalidOtp)),
        "expected InvalidOtp, got {result:?}"
    );
    assert!(
        codes_handle.lock().unwrap().contains_key("user@example.com"),
        "a mistyped code must stay redeemable until its TTL"
    );

    // A retry with the right code goes through.
    uc.execute(CreateTokenInput {
        email: "user@example.com".to_owned(),
        code: "123456".to_owned(),
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn should_accept_mixed_case_email_at_redemption() {
    let user = test_user("user@example.com", "pw");
    let uc = CreateTokenUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        otp: MockOtpStore::with_code("user@example.com", "123456"),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let grant = uc
        .execute(CreateTokenInput {
            email: "  User@Example.COM ".to_owned(),
            code: "123456".to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(grant.user.email, "user@example.com");
}

#[tokio::test]
async fn should_reject_code_redemption_for_unknown_email() {
    let uc = CreateTokenUseCase {
        users: MockUserRepo::empty(),
        otp: MockOtpStore::with_code("nobody@example.com", "123456"),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let result = uc
        .execute(CreateTokenInput {
            email: "nobody@example.com".to_owned(),
            code: "123456".to_owned(),
        })
        .await;
    assert!(
        matches!(result, Err(HrServiceError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}

// ── RefreshTokenUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_trade_a_refresh_token_for_a_new_pair() {
    let user = test_user("user@example.com", "pw");
    let refresh = issue_token_pair(&user, TEST_JWT_SECRET)
        .unwrap()
        .refresh_token;

    let uc = RefreshTokenUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let grant = uc.execute(&refresh).await.unwrap();

    assert_eq!(grant.user.id, user.id);
    let claims = validate_token(&grant.tokens.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(claims.sub, user.id.to_string());
    assert_eq!(claims.role, user.role);
}

#[tokio::test]
async fn should_reject_refresh_for_deleted_user() {
    let user = test_user("user@example.com", "pw");
    let refresh = issue_token_pair(&user, TEST_JWT_SECRET)
        .unwrap()
        .refresh_token;

    let uc = RefreshTokenUseCase {
        users: MockUserRepo::empty(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let result = uc.execute(&refresh).await;
    assert!(
        matches!(result, Err(HrServiceError::InvalidRefreshToken)),
        "expected InvalidRefreshToken, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_expired_refresh_token() {
    let user = test_user("user@example.com", "pw");
    let stale = JwtClaims {
        sub: user.id.to_string(),
        role: user.role,
        exp: now_secs() - 3600,
    };
    let refresh = encode(
        &Header::default(),
        &stale,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap();

    let uc = RefreshTokenUseCase {
        users: MockUserRepo::new(vec![user]),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let result = uc.execute(&refresh).await;
    assert!(
        matches!(result, Err(HrServiceError::InvalidRefreshToken)),
        "expected InvalidRefreshToken, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_tampered_refresh_token() {
    let user = test_user("user@example.com", "pw");
    let refresh = issue_token_pair(&user, TEST_JWT_SECRET)
        .unwrap()
        .refresh_token;
    let tampered = format!("{refresh}x");

    let uc = RefreshTokenUseCase {
        users: MockUserRepo::new(vec![user]),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let result = uc.execute(&tampered).await;
    assert!(
        matches!(result, Err(HrServiceError::InvalidRefreshToken)),
        "expected InvalidRefreshToken, got {result:?}"
    );
}
