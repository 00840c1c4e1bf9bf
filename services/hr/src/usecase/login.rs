use rand::RngExt;

use benefix_auth_types::password::verify_password;

use crate::domain::repository::{OtpStore, UserRepository};
use crate::domain::types::{OTP_LEN, OTP_TTL_SECS, normalize_email};
use crate::error::HrServiceError;

/// Charset for one-time login codes (digits only, phone-keypad friendly).
const CHARSET: &[u8] = b"0123456789";

fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..OTP_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<U, O>
where
    U: UserRepository,
    O: OtpStore,
{
    pub users: U,
    pub otp: O,
}

impl<U, O> LoginUseCase<U, O>
where
    U: UserRepository,
    O: OtpStore,
{
    pub async fn execute(&self, input: LoginInput) -> Result<(), HrServiceError> {
        let email = normalize_email(&input.email);

        // Unknown email and wrong password both answer "invalid credentials";
        // the response must not reveal which check failed.
        let Some(user) = self.users.find_by_email(&email).await? else {
            return Err(HrServiceError::InvalidCredentials);
        };

        let verified = verify_password(&input.password, &user.password_hash)
            .map_err(|e| HrServiceError::Internal(e.into()))?;
        if !verified {
            return Err(HrServiceError::InvalidCredentials);
        }

        let code = generate_code();
        self.otp.set_code(&email, &code, OTP_TTL_SECS).await?;

        // Delivery stand-in for the SMS/email gateway.
        tracing::info!(email = %email, code = %code, "one-time code issued");

        Ok(())
    }
}
