use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionError, TransactionTrait,
};
use uuid::Uuid;

use benefix_domain::pagination::{PageRequest, Sort};
use benefix_domain::user::UserRole;
use benefix_hr_schema::{dependents, employees, policies, users};

use crate::domain::repository::{
    DependentRepository, EmployeeRepository, EnrollmentStore, PolicyRepository, UserRepository,
};
use crate::domain::types::{
    AuthUser, BatchResult, CreateFailed, Dependent, DependentUpdate, Employee, EmployeeUpdate,
    EnrollmentIds, NewEnrollment, Policy,
};
use crate::error::HrServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<AuthUser>, HrServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(auth_user_from_model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, HrServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(auth_user_from_model))
    }
}

fn auth_user_from_model(model: users::Model) -> AuthUser {
    AuthUser {
        id: model.id,
        email: model.email,
        role: model.role as u8,
        password_hash: model.password_hash,
    }
}

// ── Enrollment store ─────────────────────────────────────────────────────────

/// Carries the 1-based row index through the batch transaction so a failure
/// can name the row that sank it.
#[derive(Debug, thiserror::Error)]
#[error("{source}")]
struct RowInsertError {
    row: usize,
    source: sea_orm::DbErr,
}

#[derive(Clone)]
pub struct DbEnrollmentStore {
    pub db: DatabaseConnection,
}

impl EnrollmentStore for DbEnrollmentStore {
    async fn find_existing_emails(
        &self,
        emails: &[String],
    ) -> Result<Vec<String>, HrServiceError> {
        let models = users::Entity::find()
            .filter(users::Column::Email.is_in(emails.iter().cloned()))
            .all(&self.db)
            .await
            .context("find existing emails")?;
        Ok(models.into_iter().map(|m| m.email).collect())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, HrServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("check email exists")?;
        Ok(model.is_some())
    }

    async fn create_enrollment(
        &self,
        enrollment: &NewEnrollment,
    ) -> Result<EnrollmentIds, CreateFailed> {
        self.db
            .transaction::<_, EnrollmentIds, sea_orm::DbErr>(|txn| {
                let enrollment = enrollment.clone();
                Box::pin(async move { insert_enrollment(txn, &enrollment).await })
            })
            .await
            .map_err(|e| CreateFailed {
                message: e.to_string(),
            })
    }

    async fn create_batch(
        &self,
        enrollments: &[NewEnrollment],
    ) -> Result<BatchResult, HrServiceError> {
        let result = self
            .db
            .transaction::<_, Vec<EnrollmentIds>, RowInsertError>(|txn| {
                let enrollments = enrollments.to_vec();
                Box::pin(async move {
                    let mut ids = Vec::with_capacity(enrollments.len());
                    for (i, enrollment) in enrollments.iter().enumerate() {
                        let inserted = insert_enrollment(txn, enrollment)
                            .await
                            .map_err(|source| RowInsertError { row: i + 1, source })?;
                        ids.push(inserted);
                    }
                    Ok(ids)
                })
            })
            .await;

        match result {
            Ok(ids) => Ok(BatchResult::Committed(ids)),
            Err(TransactionError::Transaction(e)) => Ok(BatchResult::RolledBack {
                row: e.row,
                message: e.source.to_string(),
            }),
            Err(TransactionError::Connection(e)) => {
                Err(anyhow::Error::new(e).context("create enrollment batch").into())
            }
        }
    }
}

/// Account row, enrollment row, and dependent rows for one person, written
/// on the given transaction.
async fn insert_enrollment(
    txn: &DatabaseTransaction,
    enrollment: &NewEnrollment,
) -> Result<EnrollmentIds, sea_orm::DbErr> {
    let now = Utc::now();
    users::ActiveModel {
        id: Set(enrollment.user_id),
        email: Set(enrollment.email.clone()),
        name: Set(enrollment.name.clone()),
        password_hash: Set(enrollment.password_hash.clone()),
        role: Set(UserRole::Employee.as_u8() as i16),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(txn)
    .await?;

    employees::ActiveModel {
        id: Set(enrollment.employee_id),
        user_id: Set(enrollment.user_id),
        dob: Set(enrollment.dob),
        gender: Set(enrollment.gender.clone()),
        address: Set(enrollment.address.clone()),
        phone: Set(enrollment.phone.clone()),
        marital_status: Set(enrollment.marital_status.clone()),
        external_id: Set(enrollment.external_id.clone()),
        policy_id: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(txn)
    .await?;

    for dep in &enrollment.dependents {
        dependents::ActiveModel {
            id: Set(dep.id),
            employee_id: Set(enrollment.employee_id),
            name: Set(dep.name.clone()),
            relationship: Set(dep.relationship.clone()),
            dob: Set(dep.dob),
            gender: Set(dep.gender.clone()),
            policy_id: Set(dep.policy_id),
            created_at: Set(now),
        }
        .insert(txn)
        .await?;
    }

    Ok(EnrollmentIds {
        user_id: enrollment.user_id,
        employee_id: enrollment.employee_id,
    })
}

// ── Employee repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEmployeeRepository {
    pub db: DatabaseConnection,
}

impl EmployeeRepository for DbEmployeeRepository {
    async fn list(&self, sort: Sort, page: PageRequest) -> Result<Vec<Employee>, HrServiceError> {
        let page = page.clamped();
        let mut query = employees::Entity::find().find_also_related(users::Entity);
        query = match sort {
            Sort::Desc => query.order_by_desc(employees::Column::CreatedAt),
            Sort::Asc => query.order_by_asc(employees::Column::CreatedAt),
        };
        let models = query
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list employees")?;
        Ok(models
            .into_iter()
            .map(|(employee, user)| employee_from_models(employee, user))
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, HrServiceError> {
        let result = employees::Entity::find_by_id(id)
            .find_also_related(users::Entity)
            .one(&self.db)
            .await
            .context("find employee by id")?;
        Ok(result.map(|(employee, user)| employee_from_models(employee, user)))
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Employee>, HrServiceError> {
        let result = employees::Entity::find()
            .filter(employees::Column::UserId.eq(user_id))
            .find_also_related(users::Entity)
            .one(&self.db)
            .await
            .context("find employee by user id")?;
        Ok(result.map(|(employee, user)| employee_from_models(employee, user)))
    }

    async fn update_profile(
        &self,
        id: Uuid,
        user_id: Uuid,
        update: &EmployeeUpdate,
    ) -> Result<(), HrServiceError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let update = update.clone();
                Box::pin(async move {
                    let mut employee = employees::ActiveModel {
                        id: Set(id),
                        ..Default::default()
                    };
                    if let Some(dob) = update.dob {
                        employee.dob = Set(Some(dob));
                    }
                    if let Some(gender) = update.gender {
                        employee.gender = Set(Some(gender));
                    }
                    if let Some(address) = update.address {
                        employee.address = Set(Some(address));
                    }
                    if let Some(phone) = update.phone {
                        employee.phone = Set(Some(phone));
                    }
                    if let Some(marital_status) = update.marital_status {
                        employee.marital_status = Set(Some(marital_status));
                    }
                    if let Some(external_id) = update.external_id {
                        employee.external_id = Set(Some(external_id));
                    }
                    employee.updated_at = Set(Utc::now());
                    employee.update(txn).await?;

                    if let Some(name) = update.name {
                        users::ActiveModel {
                            id: Set(user_id),
                            name: Set(Some(name)),
                            updated_at: Set(Utc::now()),
                            ..Default::default()
                        }
                        .update(txn)
                        .await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("update employee profile")?;
        Ok(())
    }

    async fn assign_policy(&self, id: Uuid, policy_id: Option<Uuid>) -> Result<(), HrServiceError> {
        employees::ActiveModel {
            id: Set(id),
            policy_id: Set(policy_id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("assign employee policy")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, HrServiceError> {
        let model = employees::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find employee for delete")?;
        match model {
            Some(employee) => {
                // Deleting the account row cascades to the enrollment and
                // its dependents.
                let result = users::Entity::delete_by_id(employee.user_id)
                    .exec(&self.db)
                    .await
                    .context("delete employee account")?;
                Ok(result.rows_affected > 0)
            }
            None => Ok(false),
        }
    }
}

fn employee_from_models(model: employees::Model, user: Option<users::Model>) -> Employee {
    let (email, name) = match user {
        Some(user) => (user.email, user.name),
        None => (String::new(), None),
    };
    Employee {
        id: model.id,
        user_id: model.user_id,
        email,
        name,
        dob: model.dob,
        gender: model.gender,
        address: model.address,
        phone: model.phone,
        marital_status: model.marital_status,
        external_id: model.external_id,
        policy_id: model.policy_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Dependent repository ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbDependentRepository {
    pub db: DatabaseConnection,
}

impl DependentRepository for DbDependentRepository {
    async fn create(&self, dependent: &Dependent) -> Result<(), HrServiceError> {
        dependents::ActiveModel {
            id: Set(dependent.id),
            employee_id: Set(dependent.employee_id),
            name: Set(dependent.name.clone()),
            relationship: Set(dependent.relationship.clone()),
            dob: Set(dependent.dob),
            gender: Set(dependent.gender.clone()),
            policy_id: Set(dependent.policy_id),
            created_at: Set(dependent.created_at),
        }
        .insert(&self.db)
        .await
        .context("create dependent")?;
        Ok(())
    }

    async fn list_by_employee(&self, employee_id: Uuid) -> Result<Vec<Dependent>, HrServiceError> {
        let models = dependents::Entity::find()
            .filter(dependents::Column::EmployeeId.eq(employee_id))
            .order_by_asc(dependents::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list dependents")?;
        Ok(models.into_iter().map(dependent_from_model).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Dependent>, HrServiceError> {
        let model = dependents::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find dependent by id")?;
        Ok(model.map(dependent_from_model))
    }

    async fn update_profile(
        &self,
        id: Uuid,
        update: &DependentUpdate,
    ) -> Result<(), HrServiceError> {
        let mut dependent = dependents::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(ref name) = update.name {
            dependent.name = Set(name.clone());
        }
        if let Some(ref relationship) = update.relationship {
            dependent.relationship = Set(relationship.clone());
        }
        if let Some(dob) = update.dob {
            dependent.dob = Set(Some(dob));
        }
        if let Some(ref gender) = update.gender {
            dependent.gender = Set(Some(gender.clone()));
        }
        dependent
            .update(&self.db)
            .await
            .context("update dependent profile")?;
        Ok(())
    }

    async fn assign_policy(&self, id: Uuid, policy_id: Option<Uuid>) -> Result<(), HrServiceError> {
        dependents::ActiveModel {
            id: Set(id),
            policy_id: Set(policy_id),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("assign dependent policy")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, HrServiceError> {
        let result = dependents::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete dependent")?;
        Ok(result.rows_affected > 0)
    }
}

fn dependent_from_model(model: dependents::Model) -> Dependent {
    Dependent {
        id: model.id,
        employee_id: model.employee_id,
        name: model.name,
        relationship: model.relationship,
        dob: model.dob,
        gender: model.gender,
        policy_id: model.policy_id,
        created_at: model.created_at,
    }
}

// ── Policy repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPolicyRepository {
    pub db: DatabaseConnection,
}

impl PolicyRepository for DbPolicyRepository {
    async fn create(&self, policy: &Policy) -> Result<(), HrServiceError> {
        policies::ActiveModel {
            id: Set(policy.id),
            code: Set(policy.code.clone()),
            name: Set(policy.name.clone()),
            description: Set(policy.description.clone()),
            monthly_premium_cents: Set(policy.monthly_premium_cents),
            created_at: Set(policy.created_at),
        }
        .insert(&self.db)
        .await
        .context("create policy")?;
        Ok(())
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<Policy>, HrServiceError> {
        let page = page.clamped();
        let models = policies::Entity::find()
            .order_by_asc(policies::Column::Code)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list policies")?;
        Ok(models.into_iter().map(policy_from_model).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Policy>, HrServiceError> {
        let model = policies::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find policy by id")?;
        Ok(model.map(policy_from_model))
    }

    async fn code_exists(&self, code: &str) -> Result<bool, HrServiceError> {
        let model = policies::Entity::find()
            .filter(policies::Column::Code.eq(code))
            .one(&self.db)
            .await
            .context("check policy code exists")?;
        Ok(model.is_some())
    }
}

fn policy_from_model(model: policies::Model) -> Policy {
    Policy {
        id: model.id,
        code: model.code,
        name: model.name,
        description: model.description,
        monthly_premium_cents: model.monthly_premium_cents,
        created_at: model.created_at,
    }
}
