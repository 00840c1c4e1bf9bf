use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{DependentRepository, EmployeeRepository, PolicyRepository};
use crate::domain::types::{Dependent, DependentUpdate, clean_field, parse_dob};
use crate::error::HrServiceError;

// ── AddDependent ─────────────────────────────────────────────────────────────

pub struct AddDependentInput {
    pub name: String,
    pub relationship: String,
    pub dob: Option<String>,
    pub gender: Option<String>,
}

pub struct AddDependentUseCase<E: EmployeeRepository, D: DependentRepository> {
    pub employees: E,
    pub dependents: D,
}

impl<E: EmployeeRepository, D: DependentRepository> AddDependentUseCase<E, D> {
    pub async fn execute(
        &self,
        employee_id: Uuid,
        input: AddDependentInput,
    ) -> Result<Dependent, HrServiceError> {
        if input.name.trim().is_empty() || input.relationship.trim().is_empty() {
            return Err(HrServiceError::MissingData);
        }
        let dob = parse_dob(input.dob.as_deref()).map_err(|_| HrServiceError::InvalidDate)?;
        let employee = self
            .employees
            .find_by_id(employee_id)
            .await?
            .ok_or(HrServiceError::EmployeeNotFound)?;

        let dependent = Dependent {
            id: Uuid::now_v7(),
            employee_id: employee.id,
            name: input.name.trim().to_owned(),
            relationship: input.relationship.trim().to_owned(),
            dob,
            gender: clean_field(input.gender.as_deref()),
            policy_id: None,
            created_at: Utc::now(),
        };
        self.dependents.create(&dependent).await?;
        Ok(dependent)
    }
}

// ── UpdateDependent ──────────────────────────────────────────────────────────

pub struct UpdateDependentInput {
    pub name: Option<String>,
    pub relationship: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
}

pub struct UpdateDependentUseCase<D: DependentRepository> {
    pub dependents: D,
}

impl<D: DependentRepository> UpdateDependentUseCase<D> {
    pub async fn execute(
        &self,
        dependent_id: Uuid,
        input: UpdateDependentInput,
    ) -> Result<(), HrServiceError> {
        let update = DependentUpdate {
            name: clean_field(input.name.as_deref()),
            relationship: clean_field(input.relationship.as_deref()),
            dob: parse_dob(input.dob.as_deref()).map_err(|_| HrServiceError::InvalidDate)?,
            gender: clean_field(input.gender.as_deref()),
        };
        if update.is_empty() {
            return Err(HrServiceError::MissingData);
        }
        let dependent = self
            .dependents
            .find_by_id(dependent_id)
            .await?
            .ok_or(HrServiceError::DependentNotFound)?;
        self.dependents.update_profile(dependent.id, &update).await
    }
}

// ── AssignDependentPolicy ────────────────────────────────────────────────────

pub struct AssignDependentPolicyUseCase<D: DependentRepository, P: PolicyRepository> {
    pub dependents: D,
    pub policies: P,
}

impl<D: DependentRepository, P: PolicyRepository> AssignDependentPolicyUseCase<D, P> {
    pub async fn execute(
        &self,
        dependent_id: Uuid,
        policy_id: Option<Uuid>,
    ) -> Result<(), HrServiceError> {
        let dependent = self
            .dependents
            .find_by_id(dependent_id)
            .await?
            .ok_or(HrServiceError::DependentNotFound)?;
        if let Some(policy_id) = policy_id {
            self.policies
                .find_by_id(policy_id)
                .await?
                .ok_or(HrServiceError::PolicyNotFound)?;
        }
        self.dependents.assign_policy(dependent.id, policy_id).await
    }
}

// ── RemoveDependent ──────────────────────────────────────────────────────────

pub struct RemoveDependentUseCase<D: DependentRepository> {
    pub dependents: D,
}

impl<D: DependentRepository> RemoveDependentUseCase<D> {
    pub async fn execute(&self, dependent_id: Uuid) -> Result<(), HrServiceError> {
        if !self.dependents.delete(dependent_id).await? {
            return Err(HrServiceError::DependentNotFound);
        }
        Ok(())
    }
}
