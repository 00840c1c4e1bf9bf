use benefix_auth_types::password::verify_password;
use benefix_hr::domain::types::{DependentRow, ImportAbort, ImportOutcome, ImportRow};
use benefix_hr::usecase::import::{ImportEmployeesUseCase, ImportInput};

use crate::helpers::MockEnrollmentStore;

fn row(email: &str, password: &str) -> ImportRow {
    ImportRow {
        email: Some(email.to_owned()),
        password: Some(password.to_owned()),
        ..Default::default()
    }
}

fn usecase(store: MockEnrollmentStore) -> ImportEmployeesUseCase<MockEnrollmentStore> {
    ImportEmployeesUseCase {
        store,
        default_password: None,
        max_rows: 100,
    }
}

// ── Transactional mode ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_commit_all_rows_in_transactional_mode() {
    let store = MockEnrollmentStore::empty();
    let created = store.created_handle();
    let uc = usecase(store);

    let outcome = uc
        .execute(ImportInput {
            rows: vec![row("a@x.com", "p"), row("b@x.com", "p"), row("c@x.com", "p")],
            transactional: true,
        })
        .await
        .unwrap();

    let ImportOutcome::Committed(results) = outcome else {
        panic!("expected Committed, got {outcome:?}");
    };
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.ok));
    assert_eq!(
        results.iter().map(|r| r.row).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert!(
        results
            .iter()
            .all(|r| r.user_id.is_some() && r.employee_id.is_some())
    );
    assert_eq!(created.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn should_abort_whole_batch_when_a_row_is_invalid() {
    let store = MockEnrollmentStore::empty();
    let created = store.created_handle();
    let uc = usecase(store);

    let no_password = ImportRow {
        email: Some("b@x.com".to_owned()),
        ..Default::default()
    };
    let outcome = uc
        .execute(ImportInput {
            rows: vec![row("a@x.com", "p"), no_password, row("c@x.com", "p")],
            transactional: true,
        })
        .await
        .unwrap();

    let ImportOutcome::Aborted(abort) = outcome else {
        panic!("expected Aborted, got {outcome:?}");
    };
    assert_eq!(abort, ImportAbort::InvalidRow { row: 2 });
    assert_eq!(abort.message(), "Missing fields at row 2");
    assert!(
        created.lock().unwrap().is_empty(),
        "an invalid row must keep the whole batch out of storage"
    );
}

#[tokio::test]
async fn should_abort_on_duplicate_emails_in_payload() {
    let store = MockEnrollmentStore::empty();
    let created = store.created_handle();
    let uc = usecase(store);

    // Same address, different case.
    let outcome = uc
        .execute(ImportInput {
            rows: vec![row("a@x.com", "p"), row("A@X.com", "p")],
            transactional: true,
        })
        .await
        .unwrap();

    let ImportOutcome::Aborted(abort) = outcome else {
        panic!("expected Aborted, got {outcome:?}");
    };
    assert_eq!(
        abort,
        ImportAbort::DuplicateInPayload {
            email: "a@x.com".to_owned()
        }
    );
    assert_eq!(abort.message(), "Duplicate emails in payload");
    assert!(created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_abort_when_emails_already_persisted() {
    let store = MockEnrollmentStore::new(vec!["c@x.com".to_owned()]);
    let created = store.created_handle();
    let uc = usecase(store);

    let outcome = uc
        .execute(ImportInput {
            rows: vec![row("c@x.com", "p"), row("d@x.com", "p")],
            transactional: true,
        })
        .await
        .unwrap();

    let ImportOutcome::Aborted(abort) = outcome else {
        panic!("expected Aborted, got {outcome:?}");
    };
    assert_eq!(
        abort,
        ImportAbort::EmailsExist {
            emails: vec!["c@x.com".to_owned()]
        }
    );
    assert_eq!(abort.message(), "Some emails already exist");
    assert!(created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_roll_back_batch_when_a_row_fails_mid_transaction() {
    let mut store = MockEnrollmentStore::empty();
    store.batch_fail_at = Some(2);
    let created = store.created_handle();
    let uc = usecase(store);

    let outcome = uc
        .execute(ImportInput {
            rows: vec![row("a@x.com", "p"), row("b@x.com", "p"), row("c@x.com", "p")],
            transactional: true,
        })
        .await
        .unwrap();

    let ImportOutcome::Aborted(abort) = outcome else {
        panic!("expected Aborted, got {outcome:?}");
    };
    assert_eq!(
        abort,
        ImportAbort::RowFailed {
            row: 2,
            message: "insert failed".to_owned()
        }
    );
    assert!(
        created.lock().unwrap().is_empty(),
        "a mid-transaction failure must leave no rows behind"
    );
}

#[tokio::test]
async fn should_abort_transactionally_on_unparseable_date() {
    let store = MockEnrollmentStore::empty();
    let created = store.created_handle();
    let uc = usecase(store);

    let mut bad_dob = row("a@x.com", "p");
    bad_dob.dob = Some("yesterday".to_owned());
    let outcome = uc
        .execute(ImportInput {
            rows: vec![bad_dob],
            transactional: true,
        })
        .await
        .unwrap();

    let ImportOutcome::Aborted(ImportAbort::RowFailed { row, message }) = outcome else {
        panic!("expected RowFailed, got {outcome:?}");
    };
    assert_eq!(row, 1);
    assert!(
        message.contains("Invalid date of birth"),
        "unexpected message: {message}"
    );
    assert!(created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_leave_store_untouched_across_repeated_preflight_failures() {
    let store = MockEnrollmentStore::empty();
    let created = store.created_handle();
    let uc = usecase(store);

    for _ in 0..2 {
        let outcome = uc
            .execute(ImportInput {
                rows: vec![row("a@x.com", "p"), row("a@x.com", "p")],
                transactional: true,
            })
            .await
            .unwrap();
        let ImportOutcome::Aborted(abort) = outcome else {
            panic!("expected Aborted, got {outcome:?}");
        };
        assert_eq!(
            abort,
            ImportAbort::DuplicateInPayload {
                email: "a@x.com".to_owned()
            }
        );
    }
    assert!(
        created.lock().unwrap().is_empty(),
        "pre-flight rejection must never write"
    );
}

#[tokio::test]
async fn should_persist_dependents_with_their_row() {
    let store = MockEnrollmentStore::empty();
    let created = store.created_handle();
    let uc = usecase(store);

    let mut with_dependent = row("a@x.com", "p");
    with_dependent.dependents = vec![DependentRow {
        name: "Sam".to_owned(),
        relationship: "child".to_owned(),
        dob: Some("2015-06-01".to_owned()),
        gender: None,
        policy_id: None,
    }];
    let outcome = uc
        .execute(ImportInput {
            rows: vec![with_dependent],
            transactional: true,
        })
        .await
        .unwrap();

    assert!(matches!(outcome, ImportOutcome::Committed(_)));
    let created = created.lock().unwrap();
    assert_eq!(created[0].dependents.len(), 1);
    let dependent = &created[0].dependents[0];
    assert_eq!(dependent.name, "Sam");
    assert_eq!(dependent.relationship, "child");
    assert_eq!(
        dependent.dob,
        Some(chrono::NaiveDate::from_ymd_opt(2015, 6, 1).unwrap())
    );
}

// ── Best-effort mode ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_continue_past_failing_rows_in_best_effort() {
    let store = MockEnrollmentStore::empty();
    let created = store.created_handle();
    let uc = usecase(store);

    let blank_email = ImportRow {
        email: Some(String::new()),
        password: Some("p".to_owned()),
        ..Default::default()
    };
    let outcome = uc
        .execute(ImportInput {
            rows: vec![blank_email, row("b@x.com", "p")],
            transactional: false,
        })
        .await
        .unwrap();

    let ImportOutcome::PerRow(results) = outcome else {
        panic!("expected PerRow, got {outcome:?}");
    };
    assert_eq!(results.len(), 2);
    assert!(!results[0].ok);
    assert_eq!(results[0].message.as_deref(), Some("Missing fields"));
    assert!(results[1].ok, "a bad row must not block the rows after it");
    assert_eq!(created.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_report_email_exists_for_persisted_duplicate_in_best_effort() {
    let store = MockEnrollmentStore::new(vec!["a@x.com".to_owned()]);
    let created = store.created_handle();
    let uc = usecase(store);

    let outcome = uc
        .execute(ImportInput {
            rows: vec![row("a@x.com", "p"), row("b@x.com", "p")],
            transactional: false,
        })
        .await
        .unwrap();

    let ImportOutcome::PerRow(results) = outcome else {
        panic!("expected PerRow, got {outcome:?}");
    };
    assert!(!results[0].ok);
    assert_eq!(results[0].message.as_deref(), Some("Email exists"));
    assert!(results[1].ok);
    assert_eq!(created.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_yield_one_success_one_failure_for_repeated_email() {
    let store = MockEnrollmentStore::empty();
    let created = store.created_handle();
    let uc = usecase(store);

    let mut first = row("a@x.com", "p");
    first.name = Some("A".to_owned());
    let mut second = row("a@x.com", "p");
    second.name = Some("B".to_owned());
    let outcome = uc
        .execute(ImportInput {
            rows: vec![first, second],
            transactional: false,
        })
        .await
        .unwrap();

    let ImportOutcome::PerRow(results) = outcome else {
        panic!("expected PerRow, got {outcome:?}");
    };
    assert!(results[0].ok);
    assert!(!results[1].ok);
    assert_eq!(results[1].message.as_deref(), Some("Email exists"));
    assert_eq!(created.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_keep_row_indices_1_based_and_complete() {
    let store = MockEnrollmentStore::empty();
    let created = store.created_handle();
    let uc = usecase(store);

    let invalid = || ImportRow::default();
    let outcome = uc
        .execute(ImportInput {
            rows: vec![invalid(), row("a@x.com", "p"), invalid(), row("b@x.com", "p")],
            transactional: false,
        })
        .await
        .unwrap();

    let ImportOutcome::PerRow(results) = outcome else {
        panic!("expected PerRow, got {outcome:?}");
    };
    assert_eq!(
        results.iter().map(|r| r.row).collect::<Vec<_>>(),
        vec![1, 2, 3, 4],
        "indices must track input order even around failures"
    );
    assert_eq!(
        results.iter().map(|r| r.ok).collect::<Vec<_>>(),
        vec![false, true, false, true]
    );
    let ok_count = results.iter().filter(|r| r.ok).count();
    assert_eq!(created.lock().unwrap().len(), ok_count);
}

#[tokio::test]
async fn should_surface_row_build_errors_in_best_effort() {
    let store = MockEnrollmentStore::empty();
    let uc = usecase(store);

    let mut bad_dob = row("a@x.com", "p");
    bad_dob.dob = Some("01/02/1990".to_owned());
    let outcome = uc
        .execute(ImportInput {
            rows: vec![bad_dob],
            transactional: false,
        })
        .await
        .unwrap();

    let ImportOutcome::PerRow(results) = outcome else {
        panic!("expected PerRow, got {outcome:?}");
    };
    assert!(!results[0].ok);
    let message = results[0].message.as_deref().unwrap_or_default();
    assert!(
        message.contains("Invalid date of birth"),
        "unexpected message: {message}"
    );
}

#[tokio::test]
async fn should_surface_store_failure_message_in_best_effort() {
    let mut store = MockEnrollmentStore::empty();
    store.fail_emails = vec!["a@x.com".to_owned()];
    let created = store.created_handle();
    let uc = usecase(store);

    let outcome = uc
        .execute(ImportInput {
            rows: vec![row("a@x.com", "p"), row("b@x.com", "p")],
            transactional: false,
        })
        .await
        .unwrap();

    let ImportOutcome::PerRow(results) = outcome else {
        panic!("expected PerRow, got {outcome:?}");
    };
    assert!(!results[0].ok);
    assert_eq!(results[0].message.as_deref(), Some("insert failed"));
    assert!(results[1].ok);

    let created = created.lock().unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].email, "b@x.com");
}

// ── Shared guards ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_empty_batch_in_both_modes() {
    for transactional in [true, false] {
        let uc = usecase(MockEnrollmentStore::empty());
        let outcome = uc
            .execute(ImportInput {
                rows: vec![],
                transactional,
            })
            .await
            .unwrap();
        let ImportOutcome::Aborted(abort) = outcome else {
            panic!("expected Aborted, got {outcome:?}");
        };
        assert_eq!(abort, ImportAbort::Empty);
        assert_eq!(abort.message(), "No employees provided");
    }
}

#[tokio::test]
async fn should_cap_batch_size() {
    let uc = ImportEmployeesUseCase {
        store: MockEnrollmentStore::empty(),
        default_password: None,
        max_rows: 2,
    };
    let outcome = uc
        .execute(ImportInput {
            rows: vec![row("a@x.com", "p"), row("b@x.com", "p"), row("c@x.com", "p")],
            transactional: false,
        })
        .await
        .unwrap();

    let ImportOutcome::Aborted(abort) = outcome else {
        panic!("expected Aborted, got {outcome:?}");
    };
    assert_eq!(abort, ImportAbort::TooManyRows { max: 2 });
    assert_eq!(abort.message(), "Too many rows (limit 2)");
}

#[tokio::test]
async fn should_apply_default_password_to_rows_missing_one() {
    let store = MockEnrollmentStore::empty();
    let created = store.created_handle();
    let uc = ImportEmployeesUseCase {
        store,
        default_password: Some("Welcome1!".to_owned()),
        max_rows: 100,
    };

    let no_password = ImportRow {
        email: Some("a@x.com".to_owned()),
        ..Default::default()
    };
    let outcome = uc
        .execute(ImportInput {
            rows: vec![no_password, row("b@x.com", "own-pw")],
            transactional: false,
        })
        .await
        .unwrap();

    let ImportOutcome::PerRow(results) = outcome else {
        panic!("expected PerRow, got {outcome:?}");
    };
    assert!(results[0].ok && results[1].ok);

    let created = created.lock().unwrap();
    assert!(verify_password("Welcome1!", &created[0].password_hash).unwrap());
    assert!(verify_password("own-pw", &created[1].password_hash).unwrap());
}

#[tokio::test]
async fn should_require_password_when_no_default_configured() {
    let uc = usecase(MockEnrollmentStore::empty());

    let no_password = ImportRow {
        email: Some("a@x.com".to_owned()),
        ..Default::default()
    };
    let outcome = uc
        .execute(ImportInput {
            rows: vec![no_password],
            transactional: false,
        })
        .await
        .unwrap();

    let ImportOutcome::PerRow(results) = outcome else {
        panic!("expected PerRow, got {outcome:?}");
    };
    assert!(!results[0].ok);
    assert_eq!(results[0].message.as_deref(), Some("Missing fields"));
}
