use deadpool_redis::Pool as RedisPool;
use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbDependentRepository, DbEmployeeRepository, DbEnrollmentStore, DbPolicyRepository,
    DbUserRepository,
};
use crate::infra::otp::RedisOtpStore;

/// Everything a handler needs, cloned cheaply into each request via `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub redis: RedisPool,
    pub jwt_secret: String,
    pub cookie_domain: String,
    /// Password assigned to roster-file rows that carry none.
    pub import_default_password: Option<String>,
    /// Maximum rows accepted per import request.
    pub import_max_rows: usize,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn enrollment_store(&self) -> DbEnrollmentStore {
        DbEnrollmentStore {
            db: self.db.clone(),
        }
    }

    pub fn employee_repo(&self) -> DbEmployeeRepository {
        DbEmployeeRepository {
            db: self.db.clone(),
        }
    }

    pub fn dependent_repo(&self) -> DbDependentRepository {
        DbDependentRepository {
            db: self.db.clone(),
        }
    }

    pub fn policy_repo(&self) -> DbPolicyRepository {
        DbPolicyRepository {
            db: self.db.clone(),
        }
    }

    pub fn otp_store(&self) -> RedisOtpStore {
        RedisOtpStore {
            pool: self.redis.clone(),
        }
    }
}
