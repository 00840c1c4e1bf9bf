use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use benefix_domain::user::UserRole;

use crate::domain::types::Dependent;
use crate::error::HrServiceError;
use crate::extract::Identity;
use crate::state::AppState;
use crate::usecase::dependent::{
    AddDependentInput, AddDependentUseCase, AssignDependentPolicyUseCase, RemoveDependentUseCase,
    UpdateDependentInput, UpdateDependentUseCase,
};
use crate::usecase::employee::GetEmployeeUseCase;

// ── Shared payload/response types ────────────────────────────────────────────

/// Dependent fields as they appear inside enrollment and import payloads.
#[derive(Deserialize)]
pub struct DependentPayload {
    pub name: String,
    pub relationship: String,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub policy_id: Option<Uuid>,
}

#[derive(Serialize)]
pub struct DependentResponse {
    pub id: String,
    pub employee_id: String,
    pub name: String,
    pub relationship: String,
    pub dob: Option<chrono::NaiveDate>,
    pub gender: Option<String>,
    pub policy_id: Option<String>,
    #[serde(serialize_with = "benefix_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

pub fn dependent_response(dependent: Dependent) -> DependentResponse {
    DependentResponse {
        id: dependent.id.to_string(),
        employee_id: dependent.employee_id.to_string(),
        name: dependent.name,
        relationship: dependent.relationship,
        dob: dependent.dob,
        gender: dependent.gender,
        policy_id: dependent.policy_id.map(|id| id.to_string()),
        created_at: dependent.created_at,
    }
}

// ── GET /employees/{employee_id}/dependents ──────────────────────────────────

pub async fn list_dependents(
    identity: Identity,
    State(state): State<AppState>,
    Path(employee_id): Path<Uuid>,
) -> Result<Json<Vec<DependentResponse>>, HrServiceError> {
    let usecase = GetEmployeeUseCase {
        employees: state.employee_repo(),
        dependents: state.dependent_repo(),
    };
    let (employee, dependents) = usecase.execute(employee_id).await?;
    if identity.user_role < UserRole::Hr && employee.user_id != identity.user_id {
        return Err(HrServiceError::Forbidden);
    }
    Ok(Json(dependents.into_iter().map(dependent_response).collect()))
}

// ── POST /employees/{employee_id}/dependents ─────────────────────────────────

#[derive(Deserialize)]
pub struct AddDependentRequest {
    pub name: String,
    pub relationship: String,
    pub dob: Option<String>,
    pub gender: Option<String>,
}

pub async fn add_dependent(
    identity: Identity,
    State(state): State<AppState>,
    Path(employee_id): Path<Uuid>,
    Json(body): Json<AddDependentRequest>,
) -> Result<(StatusCode, Json<DependentResponse>), HrServiceError> {
    if identity.user_role < UserRole::Hr {
        return Err(HrServiceError::Forbidden);
    }
    let usecase = AddDependentUseCase {
        employees: state.employee_repo(),
        dependents: state.dependent_repo(),
    };
    let dependent = usecase
        .execute(
            employee_id,
            AddDependentInput {
                name: body.name,
                relationship: body.relationship,
                dob: body.dob,
                gender: body.gender,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(dependent_response(dependent))))
}

// ── PATCH /dependents/{dependent_id} ─────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateDependentRequest {
    pub name: Option<String>,
    pub relationship: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
}

pub async fn update_dependent(
    identity: Identity,
    State(state): State<AppState>,
    Path(dependent_id): Path<Uuid>,
    Json(body): Json<UpdateDependentRequest>,
) -> Result<StatusCode, HrServiceError> {
    if identity.user_role < UserRole::Hr {
        return Err(HrServiceError::Forbidden);
    }
    let usecase = UpdateDependentUseCase {
        dependents: state.dependent_repo(),
    };
    usecase
        .execute(
            dependent_id,
            UpdateDependentInput {
                name: body.name,
                relationship: body.relationship,
                dob: body.dob,
                gender: body.gender,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── PATCH /dependents/{dependent_id}/policy ──────────────────────────────────

#[derive(Deserialize)]
pub struct AssignDependentPolicyRequest {
    pub policy_id: Option<Uuid>,
}

pub async fn assign_dependent_policy(
    identity: Identity,
    State(state): State<AppState>,
    Path(dependent_id): Path<Uuid>,
    Json(body): Json<AssignDependentPolicyRequest>,
) -> Result<StatusCode, HrServiceError> {
    if identity.user_role < UserRole::Hr {
        return Err(HrServiceError::Forbidden);
    }
    let usecase = AssignDependentPolicyUseCase {
        dependents: state.dependent_repo(),
        policies: state.policy_repo(),
    };
    usecase.execute(dependent_id, body.policy_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /dependents/{dependent_id} ────────────────────────────────────────

pub async fn remove_dependent(
    identity: Identity,
    State(state): State<AppState>,
    Path(dependent_id): Path<Uuid>,
) -> Result<StatusCode, HrServiceError> {
    if identity.user_role < UserRole::Hr {
        return Err(HrServiceError::Forbidden);
    }
    let usecase = RemoveDependentUseCase {
        dependents: state.dependent_repo(),
    };
    usecase.execute(dependent_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
