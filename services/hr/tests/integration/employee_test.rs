use uuid::Uuid;

use benefix_auth_types::password::verify_password;
use benefix_hr::error::HrServiceError;
use benefix_hr::usecase::employee::{DependentInput, EnrollEmployeeInput, EnrollEmployeeUseCase};

use crate::helpers::MockEnrollmentStore;

fn enroll_input(email: &str, password: &str) -> EnrollEmployeeInput {
    EnrollEmployeeInput {
        email: email.to_owned(),
        password: password.to_owned(),
        name: None,
        dob: None,
        gender: None,
        address: None,
        phone: None,
        marital_status: None,
        external_id: None,
        dependents: vec![],
    }
}

#[tokio::test]
async fn should_enroll_employee_with_hashed_password() {
    let store = MockEnrollmentStore::empty();
    let created_handle = store.created_handle();
    let uc = EnrollEmployeeUseCase { store };

    let mut input = enroll_input("  ADA@Corp.Test  ", "s3cret");
    input.name = Some("Ada".to_owned());
    input.dob = Some("1990-01-02".to_owned());
    let ids = uc.execute(input).await.unwrap();

    let created = created_handle.lock().unwrap();
    assert_eq!(created.len(), 1);
    let enrollment = &created[0];
    assert_eq!(enrollment.user_id, ids.user_id);
    assert_eq!(enrollment.employee_id, ids.employee_id);
    assert_eq!(enrollment.email, "ada@corp.test");
    assert_eq!(
        enrollment.dob,
        Some(chrono::NaiveDate::from_ymd_opt(1990, 1, 2).unwrap())
    );
    assert_ne!(enrollment.password_hash, "s3cret");
    assert!(verify_password("s3cret", &enrollment.password_hash).unwrap());
}

#[tokio::test]
async fn should_persist_dependents_as_part_of_enrollment() {
    let store = MockEnrollmentStore::empty();
    let created_handle = store.created_handle();
    let uc = EnrollEmployeeUseCase { store };

    let plan_id = Uuid::now_v7();
    let mut input = enroll_input("ada@corp.test", "s3cret");
    input.dependents = vec![
        DependentInput {
            name: "Sam".to_owned(),
            relationship: "child".to_owned(),
            dob: Some("2015-06-01".to_owned()),
            gender: None,
            policy_id: None,
        },
        DependentInput {
            name: "Lee".to_owned(),
            relationship: "spouse".to_owned(),
            dob: None,
            gender: None,
            policy_id: Some(plan_id),
        },
    ];
    uc.execute(input).await.unwrap();

    let created = created_handle.lock().unwrap();
    let dependents = &created[0].dependents;
    assert_eq!(dependents.len(), 2);
    assert_eq!(dependents[0].relationship, "child");
    assert_eq!(dependents[1].policy_id, Some(plan_id));
}

#[tokio::test]
async fn should_reject_enrollment_for_taken_email() {
    let store = MockEnrollmentStore::new(vec!["ada@corp.test".to_owned()]);
    let created_handle = store.created_handle();
    let uc = EnrollEmployeeUseCase { store };

    let result = uc.execute(enroll_input("Ada@Corp.Test", "s3cret")).await;
    assert!(
        matches!(result, Err(HrServiceError::EmailTaken)),
        "expected EmailTaken, got {result:?}"
    );
    assert!(created_handle.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_dependent_missing_relationship() {
    let store = MockEnrollmentStore::empty();
    let created_handle = store.created_handle();
    let uc = EnrollEmployeeUseCase { store };

    let mut input = enroll_input("ada@corp.test", "s3cret");
    input.dependents = vec![DependentInput {
        name: "Sam".to_owned(),
        relationship: "   ".to_owned(),
        dob: None,
        gender: None,
        policy_id: None,
    }];
    let result = uc.execute(input).await;
    assert!(
        matches!(result, Err(HrServiceError::MissingData)),
        "expected MissingData, got {result:?}"
    );
    assert!(created_handle.lock().unwrap().is_empty());
}
