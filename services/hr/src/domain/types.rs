use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Auth view of an account: enough to verify a password and mint tokens.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub role: u8,
    pub password_hash: String,
}

/// Employee enrollment joined with its account row.
#[derive(Debug, Clone)]
pub struct Employee {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub dob: Option<NaiveDate>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub marital_status: Option<String>,
    pub external_id: Option<String>,
    pub policy_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Dependent {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub name: String,
    pub relationship: String,
    pub dob: Option<NaiveDate>,
    pub gender: Option<String>,
    pub policy_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Insurance plan employees and dependents can be assigned to.
#[derive(Debug, Clone)]
pub struct Policy {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub monthly_premium_cents: i64,
    pub created_at: DateTime<Utc>,
}

/// Partial employee profile update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub dob: Option<NaiveDate>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub marital_status: Option<String>,
    pub external_id: Option<String>,
}

impl EmployeeUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.dob.is_none()
            && self.gender.is_none()
            && self.address.is_none()
            && self.phone.is_none()
            && self.marital_status.is_none()
            && self.external_id.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct DependentUpdate {
    pub name: Option<String>,
    pub relationship: Option<String>,
    pub dob: Option<NaiveDate>,
    pub gender: Option<String>,
}

impl DependentUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.relationship.is_none()
            && self.dob.is_none()
            && self.gender.is_none()
    }
}

// ── Bulk import ──────────────────────────────────────────────────────────────

/// One raw roster row. Everything arrives as text; only email and password
/// are required, the rest is profile data.
#[derive(Debug, Clone, Default)]
pub struct ImportRow {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub marital_status: Option<String>,
    pub external_id: Option<String>,
    pub dependents: Vec<DependentRow>,
}

impl ImportRow {
    /// A row is complete when it carries a non-blank email and password.
    /// Name and the rest of the profile are optional.
    pub fn is_complete(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.email) && present(&self.password)
    }
}

/// Dependent attached to a roster row (JSON imports only).
#[derive(Debug, Clone)]
pub struct DependentRow {
    pub name: String,
    pub relationship: String,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub policy_id: Option<Uuid>,
}

/// Lowercase and trim an email for comparison and storage. Duplicate
/// detection treats `Ada@Corp.test` and `ada@corp.test` as the same address.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Parse an optional `YYYY-MM-DD` date field. Blank counts as absent.
pub fn parse_dob(raw: Option<&str>) -> Result<Option<NaiveDate>, String> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| format!("Invalid date of birth '{s}'")),
    }
}

/// Trim an optional text field, turning blanks into `None`.
pub fn clean_field(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// Validated row ready to persist. Ids are minted up front so the caller
/// knows them whether the row goes through a per-row or a batch write.
#[derive(Debug, Clone)]
pub struct NewEnrollment {
    pub user_id: Uuid,
    pub employee_id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub dob: Option<NaiveDate>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub marital_status: Option<String>,
    pub external_id: Option<String>,
    pub dependents: Vec<NewDependent>,
}

#[derive(Debug, Clone)]
pub struct NewDependent {
    pub id: Uuid,
    pub name: String,
    pub relationship: String,
    pub dob: Option<NaiveDate>,
    pub gender: Option<String>,
    pub policy_id: Option<Uuid>,
}

/// Ids of one created enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrollmentIds {
    pub user_id: Uuid,
    pub employee_id: Uuid,
}

/// Row-level create failure. The reason is surfaced verbatim in per-row
/// import reports.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct CreateFailed {
    pub message: String,
}

/// Outcome of writing a whole batch in one transaction.
#[derive(Debug)]
pub enum BatchResult {
    Committed(Vec<EnrollmentIds>),
    /// A row failed mid-write and took the whole batch down with it.
    RolledBack { row: usize, message: String },
}

/// Per-row import report line. `row` is 1-based, matching the roster an
/// HR admin is looking at.
#[derive(Debug, Clone, Serialize)]
pub struct RowResult {
    pub row: usize,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RowResult {
    pub fn created(row: usize, ids: EnrollmentIds) -> Self {
        Self {
            row,
            ok: true,
            user_id: Some(ids.user_id),
            employee_id: Some(ids.employee_id),
            message: None,
        }
    }

    pub fn failed(row: usize, message: impl Into<String>) -> Self {
        Self {
            row,
            ok: false,
            user_id: None,
            employee_id: None,
            message: Some(message.into()),
        }
    }
}

/// Why a transactional import was rejected as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportAbort {
    Empty,
    TooManyRows { max: usize },
    InvalidRow { row: usize },
    DuplicateInPayload { email: String },
    EmailsExist { emails: Vec<String> },
    RowFailed { row: usize, message: String },
}

impl ImportAbort {
    pub fn message(&self) -> String {
        match self {
            Self::Empty => "No employees provided".to_owned(),
            Self::TooManyRows { max } => format!("Too many rows (limit {max})"),
            Self::InvalidRow { row } => format!("Missing fields at row {row}"),
            Self::DuplicateInPayload { .. } => "Duplicate emails in payload".to_owned(),
            Self::EmailsExist { .. } => "Some emails already exist".to_owned(),
            Self::RowFailed { row, message } => format!("Row {row} failed: {message}"),
        }
    }
}

/// What a bulk import produced.
#[derive(Debug)]
pub enum ImportOutcome {
    /// Transactional run, every row written.
    Committed(Vec<RowResult>),
    /// Transactional run rejected, nothing written.
    Aborted(ImportAbort),
    /// Best-effort run, one entry per input row regardless of outcome.
    PerRow(Vec<RowResult>),
}

/// One-time login code time-to-live in seconds (five minutes).
pub const OTP_TTL_SECS: u64 = 300;

/// One-time login code length in digits.
pub const OTP_LEN: usize = 6;
