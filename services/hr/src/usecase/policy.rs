use chrono::Utc;
use uuid::Uuid;

use benefix_domain::pagination::PageRequest;

use crate::domain::repository::PolicyRepository;
use crate::domain::types::{Policy, clean_field};
use crate::error::HrServiceError;

// ── CreatePolicy ─────────────────────────────────────────────────────────────

pub struct CreatePolicyInput {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub monthly_premium_cents: i64,
}

pub struct CreatePolicyUseCase<P: PolicyRepository> {
    pub policies: P,
}

impl<P: PolicyRepository> CreatePolicyUseCase<P> {
    pub async fn execute(&self, input: CreatePolicyInput) -> Result<Policy, HrServiceError> {
        let code = input.code.trim().to_owned();
        let name = input.name.trim().to_owned();
        if code.is_empty() || name.is_empty() || input.monthly_premium_cents < 0 {
            return Err(HrServiceError::MissingData);
        }
        if self.policies.code_exists(&code).await? {
            return Err(HrServiceError::PolicyCodeTaken);
        }

        let policy = Policy {
            id: Uuid::now_v7(),
            code,
            name,
            description: clean_field(input.description.as_deref()),
            monthly_premium_cents: input.monthly_premium_cents,
            created_at: Utc::now(),
        };
        self.policies.create(&policy).await?;
        Ok(policy)
    }
}

// ── ListPolicies ─────────────────────────────────────────────────────────────

pub struct ListPoliciesUseCase<P: PolicyRepository> {
    pub policies: P,
}

impl<P: PolicyRepository> ListPoliciesUseCase<P> {
    pub async fn execute(&self, page: PageRequest) -> Result<Vec<Policy>, HrServiceError> {
        self.policies.list(page).await
    }
}
