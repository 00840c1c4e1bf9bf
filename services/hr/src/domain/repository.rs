#![allow(async_fn_in_trait)]

use uuid::Uuid;

use benefix_domain::pagination::{PageRequest, Sort};

use crate::domain::types::{
    AuthUser, BatchResult, CreateFailed, Dependent, DependentUpdate, Employee, EmployeeUpdate,
    EnrollmentIds, NewEnrollment, Policy,
};
use crate::error::HrServiceError;

/// Account lookup for login and token flows.
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<AuthUser>, HrServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, HrServiceError>;
}

/// Store for one-time login codes (Redis, short TTL).
pub trait OtpStore: Send + Sync {
    async fn set_code(&self, email: &str, code: &str, ttl: u64) -> Result<(), HrServiceError>;

    async fn get_code(&self, email: &str) -> Result<Option<String>, HrServiceError>;

    /// Remove a code once it has been redeemed.
    async fn delete_code(&self, email: &str) -> Result<(), HrServiceError>;
}

/// Writes account + enrollment + dependents as one unit.
pub trait EnrollmentStore: Send + Sync {
    /// Of the given emails, return those already persisted.
    async fn find_existing_emails(
        &self,
        emails: &[String],
    ) -> Result<Vec<String>, HrServiceError>;

    async fn email_exists(&self, email: &str) -> Result<bool, HrServiceError>;

    /// Insert one enrollment in its own transaction. Any failure leaves
    /// nothing behind for this row.
    async fn create_enrollment(
        &self,
        enrollment: &NewEnrollment,
    ) -> Result<EnrollmentIds, CreateFailed>;

    /// Insert a whole batch in a single transaction. A failing row rolls
    /// back every other row of the batch.
    async fn create_batch(
        &self,
        enrollments: &[NewEnrollment],
    ) -> Result<BatchResult, HrServiceError>;
}

/// Read/update/delete for enrolled employees.
pub trait EmployeeRepository: Send + Sync {
    async fn list(&self, sort: Sort, page: PageRequest) -> Result<Vec<Employee>, HrServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, HrServiceError>;

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Employee>, HrServiceError>;

    async fn update_profile(
        &self,
        id: Uuid,
        user_id: Uuid,
        update: &EmployeeUpdate,
    ) -> Result<(), HrServiceError>;

    async fn assign_policy(&self, id: Uuid, policy_id: Option<Uuid>) -> Result<(), HrServiceError>;

    /// Delete the employee's account row; the enrollment and its dependents
    /// cascade with it. Returns `false` when no such employee exists.
    async fn delete(&self, id: Uuid) -> Result<bool, HrServiceError>;
}

pub trait DependentRepository: Send + Sync {
    async fn create(&self, dependent: &Dependent) -> Result<(), HrServiceError>;

    async fn list_by_employee(&self, employee_id: Uuid) -> Result<Vec<Dependent>, HrServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Dependent>, HrServiceError>;

    async fn update_profile(
        &self,
        id: Uuid,
        update: &DependentUpdate,
    ) -> Result<(), HrServiceError>;

    async fn assign_policy(&self, id: Uuid, policy_id: Option<Uuid>) -> Result<(), HrServiceError>;

    async fn delete(&self, id: Uuid) -> Result<bool, HrServiceError>;
}

pub trait PolicyRepository: Send + Sync {
    async fn create(&self, policy: &Policy) -> Result<(), HrServiceError>;

    async fn list(&self, page: PageRequest) -> Result<Vec<Policy>, HrServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Policy>, HrServiceError>;

    async fn code_exists(&self, code: &str) -> Result<bool, HrServiceError>;
}
