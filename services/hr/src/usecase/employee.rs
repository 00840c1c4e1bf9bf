use uuid::Uuid;

use benefix_auth_types::password::hash_password;
use benefix_domain::pagination::{PageRequest, Sort};

use crate::domain::repository::{
    DependentRepository, EmployeeRepository, EnrollmentStore, PolicyRepository,
};
use crate::domain::types::{
    Dependent, Employee, EmployeeUpdate, EnrollmentIds, NewDependent, NewEnrollment, clean_field,
    normalize_email, parse_dob,
};
use crate::error::HrServiceError;

// ── EnrollEmployee ───────────────────────────────────────────────────────────

pub struct DependentInput {
    pub name: String,
    pub relationship: String,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub policy_id: Option<Uuid>,
}

pub struct EnrollEmployeeInput {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub marital_status: Option<String>,
    pub external_id: Option<String>,
    pub dependents: Vec<DependentInput>,
}

pub struct EnrollEmployeeUseCase<S: EnrollmentStore> {
    pub store: S,
}

impl<S: EnrollmentStore> EnrollEmployeeUseCase<S> {
    pub async fn execute(
        &self,
        input: EnrollEmployeeInput,
    ) -> Result<EnrollmentIds, HrServiceError> {
        let email = normalize_email(&input.email);
        if email.is_empty() || input.password.trim().is_empty() {
            return Err(HrServiceError::MissingData);
        }
        if self.store.email_exists(&email).await? {
            return Err(HrServiceError::EmailTaken);
        }

        let dob = parse_dob(input.dob.as_deref()).map_err(|_| HrServiceError::InvalidDate)?;
        let mut dependents = Vec::with_capacity(input.dependents.len());
        for dep in &input.dependents {
            if dep.name.trim().is_empty() || dep.relationship.trim().is_empty() {
                return Err(HrServiceError::MissingData);
            }
            dependents.push(NewDependent {
                id: Uuid::now_v7(),
                name: dep.name.trim().to_owned(),
                relationship: dep.relationship.trim().to_owned(),
                dob: parse_dob(dep.dob.as_deref()).map_err(|_| HrServiceError::InvalidDate)?,
                gender: clean_field(dep.gender.as_deref()),
                policy_id: dep.policy_id,
            });
        }

        let password_hash =
            hash_password(&input.password).map_err(|e| HrServiceError::Internal(e.into()))?;
        let enrollment = NewEnrollment {
            user_id: Uuid::now_v7(),
            employee_id: Uuid::now_v7(),
            email,
            name: clean_field(input.name.as_deref()),
            password_hash,
            dob,
            gender: clean_field(input.gender.as_deref()),
            address: clean_field(input.address.as_deref()),
            phone: clean_field(input.phone.as_deref()),
            marital_status: clean_field(input.marital_status.as_deref()),
            external_id: clean_field(input.external_id.as_deref()),
            dependents,
        };

        self.store
            .create_enrollment(&enrollment)
            .await
            .map_err(|e| HrServiceError::Internal(e.into()))
    }
}

// ── GetEmployee ──────────────────────────────────────────────────────────────

pub struct GetEmployeeUseCase<E: EmployeeRepository, D: DependentRepository> {
    pub employees: E,
    pub dependents: D,
}

impl<E: EmployeeRepository, D: DependentRepository> GetEmployeeUseCase<E, D> {
    pub async fn execute(
        &self,
        employee_id: Uuid,
    ) -> Result<(Employee, Vec<Dependent>), HrServiceError> {
        let employee = self
            .employees
            .find_by_id(employee_id)
            .await?
            .ok_or(HrServiceError::EmployeeNotFound)?;
        let dependents = self.dependents.list_by_employee(employee.id).await?;
        Ok((employee, dependents))
    }

    /// Profile lookup for the signed-in account (`/employees/@me`).
    pub async fn execute_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<(Employee, Vec<Dependent>), HrServiceError> {
        let employee = self
            .employees
            .find_by_user_id(user_id)
            .await?
            .ok_or(HrServiceError::EmployeeNotFound)?;
        let dependents = self.dependents.list_by_employee(employee.id).await?;
        Ok((employee, dependents))
    }
}

// ── ListEmployees ────────────────────────────────────────────────────────────

pub struct ListEmployeesUseCase<E: EmployeeRepository> {
    pub employees: E,
}

impl<E: EmployeeRepository> ListEmployeesUseCase<E> {
    pub async fn execute(
        &self,
        sort: Sort,
        page: PageRequest,
    ) -> Result<Vec<Employee>, HrServiceError> {
        self.employees.list(sort, page).await
    }
}

// ── UpdateEmployee ───────────────────────────────────────────────────────────

pub struct UpdateEmployeeInput {
    pub name: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub marital_status: Option<String>,
    pub external_id: Option<String>,
}

pub struct UpdateEmployeeUseCase<E: EmployeeRepository> {
    pub employees: E,
}

impl<E: EmployeeRepository> UpdateEmployeeUseCase<E> {
    pub async fn execute(
        &self,
        employee_id: Uuid,
        input: UpdateEmployeeInput,
    ) -> Result<(), HrServiceError> {
        let update = EmployeeUpdate {
            name: clean_field(input.name.as_deref()),
            dob: parse_dob(input.dob.as_deref()).map_err(|_| HrServiceError::InvalidDate)?,
            gender: clean_field(input.gender.as_deref()),
            address: clean_field(input.address.as_deref()),
            phone: clean_field(input.phone.as_deref()),
            marital_status: clean_field(input.marital_status.as_deref()),
            external_id: clean_field(input.external_id.as_deref()),
        };
        if update.is_empty() {
            return Err(HrServiceError::MissingData);
        }
        let employee = self
            .employees
            .find_by_id(employee_id)
            .await?
            .ok_or(HrServiceError::EmployeeNotFound)?;
        self.employees
            .update_profile(employee.id, employee.user_id, &update)
            .await
    }
}

// ── DeleteEmployee ───────────────────────────────────────────────────────────

pub struct DeleteEmployeeUseCase<E: EmployeeRepository> {
    pub employees: E,
}

impl<E: EmployeeRepository> DeleteEmployeeUseCase<E> {
    pub async fn execute(&self, employee_id: Uuid) -> Result<(), HrServiceError> {
        if !self.employees.delete(employee_id).await? {
            return Err(HrServiceError::EmployeeNotFound);
        }
        Ok(())
    }
}

// ── AssignPolicy ─────────────────────────────────────────────────────────────

pub struct AssignPolicyUseCase<E: EmployeeRepository, P: PolicyRepository> {
    pub employees: E,
    pub policies: P,
}

impl<E: EmployeeRepository, P: PolicyRepository> AssignPolicyUseCase<E, P> {
    /// Assign (`Some`) or clear (`None`) the employee's insurance plan.
    pub async fn execute(
        &self,
        employee_id: Uuid,
        policy_id: Option<Uuid>,
    ) -> Result<(), HrServiceError> {
        let employee = self
            .employees
            .find_by_id(employee_id)
            .await?
            .ok_or(HrServiceError::EmployeeNotFound)?;
        if let Some(policy_id) = policy_id {
            self.policies
                .find_by_id(policy_id)
                .await?
                .ok_or(HrServiceError::PolicyNotFound)?;
        }
        self.employees.assign_policy(employee.id, policy_id).await
    }
}
