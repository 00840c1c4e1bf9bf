use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use benefix_domain::pagination::PageRequest;
use benefix_domain::user::UserRole;

use crate::domain::types::Policy;
use crate::error::HrServiceError;
use crate::extract::Identity;
use crate::state::AppState;
use crate::usecase::policy::{CreatePolicyInput, CreatePolicyUseCase, ListPoliciesUseCase};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PolicyResponse {
    pub id: String,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub monthly_premium_cents: i64,
    #[serde(serialize_with = "benefix_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

fn policy_response(policy: Policy) -> PolicyResponse {
    PolicyResponse {
        id: policy.id.to_string(),
        code: policy.code,
        name: policy.name,
        description: policy.description,
        monthly_premium_cents: policy.monthly_premium_cents,
        created_at: policy.created_at,
    }
}

// ── POST /policies ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreatePolicyRequest {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub monthly_premium_cents: i64,
}

pub async fn create_policy(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreatePolicyRequest>,
) -> Result<(StatusCode, Json<PolicyResponse>), HrServiceError> {
    if identity.user_role < UserRole::Hr {
        return Err(HrServiceError::Forbidden);
    }
    let usecase = CreatePolicyUseCase {
        policies: state.policy_repo(),
    };
    let policy = usecase
        .execute(CreatePolicyInput {
            code: body.code,
            name: body.name,
            description: body.description,
            monthly_premium_cents: body.monthly_premium_cents,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(policy_response(policy))))
}

// ── GET /policies ────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct PolicyListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

/// Any signed-in account can browse the plan catalog; employees pick from it
/// during open enrollment.
pub async fn list_policies(
    _identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<PolicyListQuery>,
) -> Result<Json<Vec<PolicyResponse>>, HrServiceError> {
    let page = PageRequest {
        per_page: query.per_page.unwrap_or(25),
        page: query.page.unwrap_or(1),
    };
    let usecase = ListPoliciesUseCase {
        policies: state.policy_repo(),
    };
    let policies = usecase.execute(page).await?;
    Ok(Json(policies.into_iter().map(policy_response).collect()))
}
