use std::collections::HashSet;

use uuid::Uuid;

use benefix_auth_types::password::hash_password;

use crate::domain::repository::EnrollmentStore;
use crate::domain::types::{
    BatchResult, DependentRow, ImportAbort, ImportOutcome, ImportRow, NewDependent, NewEnrollment,
    RowResult, clean_field, normalize_email, parse_dob,
};
use crate::error::HrServiceError;

/// Turn a complete row into a persistable enrollment. Mints ids, hashes the
/// password, and parses dates; parsing and hashing can both fail with a
/// human-readable reason.
fn build_enrollment(row: &ImportRow) -> Result<NewEnrollment, String> {
    let password = row.password.as_deref().unwrap_or_default();
    let password_hash =
        hash_password(password).map_err(|_| "Could not hash password".to_owned())?;
    let dob = parse_dob(row.dob.as_deref())?;

    let dependents = row
        .dependents
        .iter()
        .map(build_dependent)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NewEnrollment {
        user_id: Uuid::now_v7(),
        employee_id: Uuid::now_v7(),
        email: normalize_email(row.email.as_deref().unwrap_or_default()),
        name: clean_field(row.name.as_deref()),
        password_hash,
        dob,
        gender: clean_field(row.gender.as_deref()),
        address: clean_field(row.address.as_deref()),
        phone: clean_field(row.phone.as_deref()),
        marital_status: clean_field(row.marital_status.as_deref()),
        external_id: clean_field(row.external_id.as_deref()),
        dependents,
    })
}

fn build_dependent(row: &DependentRow) -> Result<NewDependent, String> {
    if row.name.trim().is_empty() || row.relationship.trim().is_empty() {
        return Err("Dependent missing name or relationship".to_owned());
    }
    Ok(NewDependent {
        id: Uuid::now_v7(),
        name: row.name.trim().to_owned(),
        relationship: row.relationship.trim().to_owned(),
        dob: parse_dob(row.dob.as_deref())?,
        gender: clean_field(row.gender.as_deref()),
        policy_id: row.policy_id,
    })
}

pub struct ImportInput {
    pub rows: Vec<ImportRow>,
    pub transactional: bool,
}

pub struct ImportEmployeesUseCase<S: EnrollmentStore> {
    pub store: S,
    /// Applied to rows with a blank password before validation. Roster files
    /// typically carry no password column; JSON imports pass `None`.
    pub default_password: Option<String>,
    pub max_rows: usize,
}

impl<S: EnrollmentStore> ImportEmployeesUseCase<S> {
    pub async fn execute(&self, input: ImportInput) -> Result<ImportOutcome, HrServiceError> {
        let mut rows = input.rows;

        if rows.is_empty() {
            return Ok(ImportOutcome::Aborted(ImportAbort::Empty));
        }
        if rows.len() > self.max_rows {
            return Ok(ImportOutcome::Aborted(ImportAbort::TooManyRows {
                max: self.max_rows,
            }));
        }

        if let Some(default) = &self.default_password {
            for row in &mut rows {
                let blank = row.password.as_deref().is_none_or(|p| p.trim().is_empty());
                if blank {
                    row.password = Some(default.clone());
                }
            }
        }

        if input.transactional {
            self.execute_transactional(rows).await
        } else {
            self.execute_best_effort(rows).await
        }
    }

    /// All-or-nothing: duplicate pre-flight and row validation reject the
    /// whole batch up front, then every row is written in one transaction.
    async fn execute_transactional(
        &self,
        rows: Vec<ImportRow>,
    ) -> Result<ImportOutcome, HrServiceError> {
        // No email may appear twice within the payload. Rows without an
        // email are left for the completeness check below.
        let mut seen = HashSet::new();
        let mut emails = Vec::with_capacity(rows.len());
        for row in &rows {
            let email = normalize_email(row.email.as_deref().unwrap_or_default());
            if email.is_empty() {
                continue;
            }
            if !seen.insert(email.clone()) {
                return Ok(ImportOutcome::Aborted(ImportAbort::DuplicateInPayload {
                    email,
                }));
            }
            emails.push(email);
        }

        // No email may collide with an already persisted account.
        let mut existing = self.store.find_existing_emails(&emails).await?;
        if !existing.is_empty() {
            existing.sort();
            return Ok(ImportOutcome::Aborted(ImportAbort::EmailsExist {
                emails: existing,
            }));
        }

        // Every row must be complete. Report the first gap, 1-based.
        for (i, row) in rows.iter().enumerate() {
            if !row.is_complete() {
                return Ok(ImportOutcome::Aborted(ImportAbort::InvalidRow {
                    row: i + 1,
                }));
            }
        }

        // Build every enrollment before touching the database.
        let mut enrollments = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            match build_enrollment(row) {
                Ok(enrollment) => enrollments.push(enrollment),
                Err(message) => {
                    return Ok(ImportOutcome::Aborted(ImportAbort::RowFailed {
                        row: i + 1,
                        message,
                    }));
                }
            }
        }

        match self.store.create_batch(&enrollments).await? {
            BatchResult::Committed(ids) => {
                let results = ids
                    .into_iter()
                    .enumerate()
                    .map(|(i, ids)| RowResult::created(i + 1, ids))
                    .collect();
                Ok(ImportOutcome::Committed(results))
            }
            BatchResult::RolledBack { row, message } => {
                Ok(ImportOutcome::Aborted(ImportAbort::RowFailed { row, message }))
            }
        }
    }

    /// Row-by-row: each row validates, checks its email, and writes on its
    /// own. A failing row is recorded and the run moves on to the next one.
    async fn execute_best_effort(
        &self,
        rows: Vec<ImportRow>,
    ) -> Result<ImportOutcome, HrServiceError> {
        let mut results = Vec::with_capacity(rows.len());

        for (i, row) in rows.iter().enumerate() {
            let row_no = i + 1;

            if !row.is_complete() {
                results.push(RowResult::failed(row_no, "Missing fields"));
                continue;
            }

            let email = normalize_email(row.email.as_deref().unwrap_or_default());

            // A duplicate within the payload fails here too: the earlier
            // occurrence has already been persisted by the time we check.
            match self.store.email_exists(&email).await {
                Ok(true) => {
                    results.push(RowResult::failed(row_no, "Email exists"));
                    continue;
                }
                Ok(false) => {}
                Err(e) => {
                    results.push(RowResult::failed(row_no, e.to_string()));
                    continue;
                }
            }

            let enrollment = match build_enrollment(row) {
                Ok(enrollment) => enrollment,
                Err(message) => {
                    results.push(RowResult::failed(row_no, message));
                    continue;
                }
            };

            match self.store.create_enrollment(&enrollment).await {
                Ok(ids) => results.push(RowResult::created(row_no, ids)),
                Err(failed) => results.push(RowResult::failed(row_no, failed.message)),
            }
        }

        Ok(ImportOutcome::PerRow(results))
    }
}
