use benefix_hr::error::HrServiceError;
use benefix_hr::usecase::login::{LoginInput, LoginUseCase};

use crate::helpers::{MockOtpStore, MockUserRepo, test_user};

#[tokio::test]
async fn should_store_numeric_code_on_login() {
    let user = test_user("user@example.com", "correct-horse");
    let otp = MockOtpStore::empty();
    let codes_handle = otp.codes_handle();

    let uc = LoginUseCase {
        users: MockUserRepo::new(vec![user]),
        otp,
    };
    uc.execute(LoginInput {
        email: "user@example.com".to_owned(),
        password: "correct-horse".to_owned(),
    })
    .await
    .unwrap();

    let codes = codes_handle.lock().unwrap();
    let code = codes
        .get("user@example.com")
        .expect("a code should be stored for the email");
    assert_eq!(code.len(), 6, "login code should be 6 digits");
    assert!(code.chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn should_reject_wrong_password_without_storing_a_code() {
    let user = test_user("user@example.com", "correct-horse");
    let otp = MockOtpStore::empty();
    let codes_handle = otp.codes_handle();

    let uc = LoginUseCase {
        users: MockUserRepo::new(vec![user]),
        otp,
    };
    let result = uc
        .execute(LoginInput {
            email: "user@example.com".to_owned(),
            password: "wrong".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(HrServiceError::InvalidCredentials)),
        "expected InvalidCredentials, got {result:?}"
    );
    assert!(codes_handle.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_unknown_email_with_the_same_error() {
    let uc = LoginUseCase {
        users: MockUserRepo::empty(),
        otp: MockOtpStore::empty(),
    };
    let result = uc
        .execute(LoginInput {
            email: "nobody@example.com".to_owned(),
            password: "anything".to_owned(),
        })
        .await;

    // Indistinguishable from a wrong password on purpose.
    assert!(
        matches!(result, Err(HrServiceError::InvalidCredentials)),
        "expected InvalidCredentials, got {result:?}"
    );
}

#[tokio::test]
async fn should_normalize_email_before_lookup_and_storage() {
    let user = test_user("user@example.com", "correct-horse");
    let otp = MockOtpStore::empty();
    let codes_handle = otp.codes_handle();

    let uc = LoginUseCase {
        users: MockUserRepo::new(vec![user]),
        otp,
    };
    uc.execute(LoginInput {
        email: "  USER@Example.Com  ".to_owned(),
        password: "correct-horse".to_owned(),
    })
    .await
    .unwrap();

    assert!(
        codes_handle
            .lock()
            .unwrap()
            .contains_key("user@example.com"),
        "code should be keyed by the normalized address"
    );
}
