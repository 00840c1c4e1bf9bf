//! One-time login codes in Redis.
//!
//! Codes live under `otp:{email}` and expire on their own via `SET EX`;
//! redemption reads the code and deletes it only after a match.

use deadpool_redis::redis::AsyncCommands;
use deadpool_redis::{Connection, Pool};

use crate::domain::repository::OtpStore;
use crate::error::HrServiceError;

#[derive(Clone)]
pub struct RedisOtpStore {
    pub pool: Pool,
}

fn otp_key(email: &str) -> String {
    format!("otp:{email}")
}

impl RedisOtpStore {
    async fn conn(&self) -> Result<Connection, HrServiceError> {
        self.pool
            .get()
            .await
            .map_err(|e| HrServiceError::Internal(e.into()))
    }
}

impl OtpStore for RedisOtpStore {
    async fn set_code(&self, email: &str, code: &str, ttl: u64) -> Result<(), HrServiceError> {
        let mut conn = self.conn().await?;
        let (): () = conn
            .set_ex(otp_key(email), code, ttl)
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| HrServiceError::Internal(e.into()))?;
        Ok(())
    }

    async fn get_code(&self, email: &str) -> Result<Option<String>, HrServiceError> {
        let mut conn = self.conn().await?;
        conn.get(otp_key(email))
            .await
            .map_err(|e| HrServiceError::Internal(e.into()))
    }

    async fn delete_code(&self, email: &str) -> Result<(), HrServiceError> {
        let mut conn = self.conn().await?;
        let (): () = conn
            .del(otp_key(email))
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| HrServiceError::Internal(e.into()))?;
        Ok(())
    }
}
