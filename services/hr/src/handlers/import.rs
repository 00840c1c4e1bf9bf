use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use benefix_domain::user::UserRole;

use crate::domain::types::{DependentRow, ImportAbort, ImportOutcome, ImportRow, RowResult};
use crate::error::HrServiceError;
use crate::extract::Identity;
use crate::handlers::dependent::DependentPayload;
use crate::infra::file::parse_rows;
use crate::state::AppState;
use crate::usecase::import::{ImportEmployeesUseCase, ImportInput};

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ImportRowPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub marital_status: Option<String>,
    pub external_id: Option<String>,
    #[serde(default)]
    pub dependents: Vec<DependentPayload>,
}

#[derive(Deserialize)]
pub struct ImportRequest {
    pub employees: Vec<ImportRowPayload>,
    /// All-or-nothing when true. Omitted means best-effort.
    #[serde(default)]
    pub transaction: bool,
}

fn import_row(payload: ImportRowPayload) -> ImportRow {
    ImportRow {
        name: payload.name,
        email: payload.email,
        password: payload.password,
        dob: payload.dob,
        gender: payload.gender,
        address: payload.address,
        phone: payload.phone,
        marital_status: payload.marital_status,
        external_id: payload.external_id,
        dependents: payload
            .dependents
            .into_iter()
            .map(|dep| DependentRow {
                name: dep.name,
                relationship: dep.relationship,
                dob: dep.dob,
                gender: dep.gender,
                policy_id: dep.policy_id,
            })
            .collect(),
    }
}

// ── Outcome to HTTP mapping ──────────────────────────────────────────────────

/// 201 when every row landed, 207 for a mixed batch, 400 when nothing did.
fn per_row_status(results: &[RowResult]) -> StatusCode {
    let ok = results.iter().filter(|r| r.ok).count();
    if ok == results.len() {
        StatusCode::CREATED
    } else if ok > 0 {
        StatusCode::MULTI_STATUS
    } else {
        StatusCode::BAD_REQUEST
    }
}

fn abort_body(abort: &ImportAbort) -> serde_json::Value {
    let mut body = json!({ "error": abort.message() });
    match abort {
        ImportAbort::DuplicateInPayload { email } => body["email"] = json!(email),
        ImportAbort::EmailsExist { emails } => body["emails"] = json!(emails),
        ImportAbort::InvalidRow { row } | ImportAbort::RowFailed { row, .. } => {
            body["row"] = json!(row)
        }
        ImportAbort::Empty | ImportAbort::TooManyRows { .. } => {}
    }
    body
}

fn import_response(outcome: ImportOutcome) -> Response {
    match outcome {
        ImportOutcome::Committed(results) => (
            StatusCode::CREATED,
            Json(json!({ "committed": true, "results": results })),
        )
            .into_response(),
        ImportOutcome::Aborted(abort) => {
            (StatusCode::BAD_REQUEST, Json(abort_body(&abort))).into_response()
        }
        ImportOutcome::PerRow(results) => {
            let status = per_row_status(&results);
            (status, Json(json!({ "results": results }))).into_response()
        }
    }
}

// ── POST /employees/import ───────────────────────────────────────────────────

pub async fn import_employees(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<ImportRequest>,
) -> Result<Response, HrServiceError> {
    if identity.user_role < UserRole::Hr {
        return Err(HrServiceError::Forbidden);
    }
    let usecase = ImportEmployeesUseCase {
        store: state.enrollment_store(),
        // JSON payloads spell out passwords per row; only roster files get
        // the configured fallback.
        default_password: None,
        max_rows: state.import_max_rows,
    };
    let rows = body.employees.into_iter().map(import_row).collect();
    let outcome = usecase
        .execute(ImportInput {
            rows,
            transactional: body.transaction,
        })
        .await?;
    Ok(import_response(outcome))
}

// ── POST /employees/import/file ──────────────────────────────────────────────

pub async fn import_employees_file(
    identity: Identity,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, HrServiceError> {
    if identity.user_role < UserRole::Hr {
        return Err(HrServiceError::Forbidden);
    }

    let mut file: Option<(Vec<u8>, String)> = None;
    let mut transactional = false;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| HrServiceError::InvalidFile)?
    {
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_owned();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| HrServiceError::InvalidFile)?;
                file = Some((bytes.to_vec(), filename));
            }
            "transaction" => {
                let value = field
                    .text()
                    .await
                    .map_err(|_| HrServiceError::InvalidFile)?;
                transactional = matches!(value.trim(), "true" | "1");
            }
            _ => {}
        }
    }

    let (bytes, filename) = file.ok_or(HrServiceError::MissingData)?;
    let rows = parse_rows(&bytes, &filename)?;

    let usecase = ImportEmployeesUseCase {
        store: state.enrollment_store(),
        default_password: state.import_default_password.clone(),
        max_rows: state.import_max_rows,
    };
    let outcome = usecase.execute(ImportInput { rows, transactional }).await?;
    Ok(import_response(outcome))
}
