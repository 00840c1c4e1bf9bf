use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use benefix_domain::pagination::{PageRequest, Sort};
use benefix_domain::user::UserRole;

use crate::domain::types::{Dependent, Employee};
use crate::error::HrServiceError;
use crate::extract::Identity;
use crate::handlers::dependent::{DependentPayload, DependentResponse, dependent_response};
use crate::state::AppState;
use crate::usecase::employee::{
    AssignPolicyUseCase, DeleteEmployeeUseCase, DependentInput, EnrollEmployeeInput,
    EnrollEmployeeUseCase, GetEmployeeUseCase, ListEmployeesUseCase, UpdateEmployeeInput,
    UpdateEmployeeUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct EmployeeResponse {
    pub id: String,
    pub user_id: String,
    pub email: String,
    pub name: Option<String>,
    pub dob: Option<chrono::NaiveDate>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub marital_status: Option<String>,
    pub external_id: Option<String>,
    pub policy_id: Option<String>,
    #[serde(serialize_with = "benefix_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "benefix_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

fn employee_response(employee: Employee) -> EmployeeResponse {
    EmployeeResponse {
        id: employee.id.to_string(),
        user_id: employee.user_id.to_string(),
        email: employee.email,
        name: employee.name,
        dob: employee.dob,
        gender: employee.gender,
        address: employee.address,
        phone: employee.phone,
        marital_status: employee.marital_status,
        external_id: employee.external_id,
        policy_id: employee.policy_id.map(|id| id.to_string()),
        created_at: employee.created_at,
        updated_at: employee.updated_at,
    }
}

#[derive(Serialize)]
pub struct EmployeeDetailResponse {
    #[serde(flatten)]
    pub employee: EmployeeResponse,
    pub dependents: Vec<DependentResponse>,
}

fn employee_detail_response(
    employee: Employee,
    dependents: Vec<Dependent>,
) -> EmployeeDetailResponse {
    EmployeeDetailResponse {
        employee: employee_response(employee),
        dependents: dependents.into_iter().map(dependent_response).collect(),
    }
}

// ── POST /employees ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct EnrollEmployeeRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub marital_status: Option<String>,
    pub external_id: Option<String>,
    #[serde(default)]
    pub dependents: Vec<DependentPayload>,
}

#[derive(Serialize)]
pub struct EnrollEmployeeResponse {
    pub user_id: String,
    pub employee_id: String,
}

pub async fn enroll_employee(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<EnrollEmployeeRequest>,
) -> Result<(StatusCode, Json<EnrollEmployeeResponse>), HrServiceError> {
    if identity.user_role < UserRole::Hr {
        return Err(HrServiceError::Forbidden);
    }
    let usecase = EnrollEmployeeUseCase {
        store: state.enrollment_store(),
    };
    let ids = usecase
        .execute(EnrollEmployeeInput {
            email: body.email,
            password: body.password,
            name: body.name,
            dob: body.dob,
            gender: body.gender,
            address: body.address,
            phone: body.phone,
            marital_status: body.marital_status,
            external_id: body.external_id,
            dependents: body
                .dependents
                .into_iter()
                .map(|dep| DependentInput {
                    name: dep.name,
                    relationship: dep.relationship,
                    dob: dep.dob,
                    gender: dep.gender,
                    policy_id: dep.policy_id,
                })
                .collect(),
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(EnrollEmployeeResponse {
            user_id: ids.user_id.to_string(),
            employee_id: ids.employee_id.to_string(),
        }),
    ))
}

// ── GET /employees ───────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct EmployeeListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub sort: Option<String>,
}

pub async fn list_employees(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<EmployeeListQuery>,
) -> Result<Json<Vec<EmployeeResponse>>, HrServiceError> {
    if identity.user_role < UserRole::Hr {
        return Err(HrServiceError::Forbidden);
    }
    let sort = match query.sort.as_deref() {
        Some("asc") => Sort::Asc,
        _ => Sort::Desc,
    };
    let page = PageRequest {
        per_page: query.per_page.unwrap_or(25),
        page: query.page.unwrap_or(1),
    };
    let usecase = ListEmployeesUseCase {
        employees: state.employee_repo(),
    };
    let employees = usecase.execute(sort, page).await?;
    Ok(Json(employees.into_iter().map(employee_response).collect()))
}

// ── GET /employees/@me ───────────────────────────────────────────────────────

pub async fn get_me(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<EmployeeDetailResponse>, HrServiceError> {
    let usecase = GetEmployeeUseCase {
        employees: state.employee_repo(),
        dependents: state.dependent_repo(),
    };
    let (employee, dependents) = usecase.execute_for_user(identity.user_id).await?;
    Ok(Json(employee_detail_response(employee, dependents)))
}

// ── GET /employees/{employee_id} ─────────────────────────────────────────────

pub async fn get_employee(
    identity: Identity,
    State(state): State<AppState>,
    Path(employee_id): Path<Uuid>,
) -> Result<Json<EmployeeDetailResponse>, HrServiceError> {
    let usecase = GetEmployeeUseCase {
        employees: state.employee_repo(),
        dependents: state.dependent_repo(),
    };
    let (employee, dependents) = usecase.execute(employee_id).await?;
    if identity.user_role < UserRole::Hr && employee.user_id != identity.user_id {
        return Err(HrServiceError::Forbidden);
    }
    Ok(Json(employee_detail_response(employee, dependents)))
}

// ── PATCH /employees/{employee_id} ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateEmployeeRequest {
    pub name: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub marital_status: Option<String>,
    pub external_id: Option<String>,
}

pub async fn update_employee(
    identity: Identity,
    State(state): State<AppState>,
    Path(employee_id): Path<Uuid>,
    Json(body): Json<UpdateEmployeeRequest>,
) -> Result<StatusCode, HrServiceError> {
    if identity.user_role < UserRole::Hr {
        return Err(HrServiceError::Forbidden);
    }
    let usecase = UpdateEmployeeUseCase {
        employees: state.employee_repo(),
    };
    usecase
        .execute(
            employee_id,
            UpdateEmployeeInput {
                name: body.name,
                dob: body.dob,
                gender: body.gender,
                address: body.address,
                phone: body.phone,
                marital_status: body.marital_status,
                external_id: body.external_id,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /employees/{employee_id} ──────────────────────────────────────────

pub async fn delete_employee(
    identity: Identity,
    State(state): State<AppState>,
    Path(employee_id): Path<Uuid>,
) -> Result<StatusCode, HrServiceError> {
    if identity.user_role < UserRole::Hr {
        return Err(HrServiceError::Forbidden);
    }
    let usecase = DeleteEmployeeUseCase {
        employees: state.employee_repo(),
    };
    usecase.execute(employee_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── PATCH /employees/{employee_id}/policy ────────────────────────────────────

#[derive(Deserialize)]
pub struct AssignPolicyRequest {
    pub policy_id: Option<Uuid>,
}

pub async fn assign_policy(
    identity: Identity,
    State(state): State<AppState>,
    Path(employee_id): Path<Uuid>,
    Json(body): Json<AssignPolicyRequest>,
) -> Result<StatusCode, HrServiceError> {
    if identity.user_role < UserRole::Hr {
        return Err(HrServiceError::Forbidden);
    }
    let usecase = AssignPolicyUseCase {
        employees: state.employee_repo(),
        policies: state.policy_repo(),
    };
    usecase.execute(employee_id, body.policy_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
