use super::common::*;
use crate::board::domain::{CompanyChanges, CompanyId};
use crate::board::BoardError;
use crate::identity::Timestamp;

#[test]
fn register_company_sets_admin_and_timestamp() {
    let h = harness();
    let company = h
        .board
        .register_company(&admin(), company_payload())
        .expect("registers");

    assert_eq!(company.admin, admin());
    assert_eq!(company.created_at, Timestamp(START));
    assert_eq!(
        h.stores.companies.get(&company.id).expect("get"),
        Some(company)
    );
}

#[test]
fn register_company_rejects_blank_fields() {
    let h = harness();
    let mut payload = company_payload();
    payload.address = String::new();

    match h.board.register_company(&admin(), payload) {
        Err(BoardError::ValidationFailed(message)) => assert!(message.contains("address")),
        other => panic!("expected validation failure, got {other:?}"),
    }
    assert!(h.stores.companies.values().expect("scan").is_empty());
}

#[test]
fn update_company_merges_only_provided_fields() {
    let h = harness();
    let company = h
        .board
        .register_company(&admin(), company_payload())
        .expect("registers");

    let updated = h
        .board
        .update_company(
            &admin(),
            &company.id,
            CompanyChanges {
                phone: Some("+1-555-0142".to_string()),
                ..CompanyChanges::default()
            },
        )
        .expect("admin updates");

    assert_eq!(updated.phone, "+1-555-0142");
    assert_eq!(updated.name, company.name);
    assert_eq!(updated.admin, company.admin);
    assert_eq!(updated.created_at, company.created_at);
}

#[test]
fn update_company_rejects_blank_replacements() {
    let h = harness();
    let company = h
        .board
        .register_company(&admin(), company_payload())
        .expect("registers");

    let changes = CompanyChanges {
        name: Some("   ".to_string()),
        ..CompanyChanges::default()
    };
    assert!(matches!(
        h.board.update_company(&admin(), &company.id, changes),
        Err(BoardError::ValidationFailed(_))
    ));
}

#[test]
fn company_mutations_are_admin_only() {
    let h = harness();
    let company = h
        .board
        .register_company(&admin(), company_payload())
        .expect("registers");

    let changes = CompanyChanges {
        name: Some("Hijacked".to_string()),
        ..CompanyChanges::default()
    };
    assert!(matches!(
        h.board.update_company(&seeker(), &company.id, changes),
        Err(BoardError::NotAuthorized(_))
    ));
    assert!(matches!(
        h.board.remove_company(&seeker(), &company.id),
        Err(BoardError::NotAuthorized(_))
    ));
    assert_eq!(
        h.stores.companies.get(&company.id).expect("get"),
        Some(company)
    );
}

#[test]
fn missing_company_reports_not_found() {
    let h = harness();
    let missing = CompanyId::from("missing");
    match h.board.remove_company(&admin(), &missing) {
        Err(BoardError::NotFound(message)) => assert_eq!(message, "Company not found"),
        other => panic!("expected not found, got {other:?}"),
    }
    assert!(matches!(
        h.board
            .update_company(&admin(), &missing, CompanyChanges::default()),
        Err(BoardError::NotFound(_))
    ));
}

#[test]
fn remove_company_is_refused_while_jobs_reference_it() {
    let (h, job_id) = seeded();
    let company_id = h
        .board
        .job(&job_id)
        .expect("job present")
        .company_id;

    h.board.close_job(&admin(), &job_id).expect("close");
    match h.board.remove_company(&admin(), &company_id) {
        Err(BoardError::Conflict(message)) => assert_eq!(message, "Company still has jobs"),
        other => panic!("expected conflict, got {other:?}"),
    }
    assert!(h
        .stores
        .companies
        .get(&company_id)
        .expect("get")
        .is_some());

    h.board.remove_job(&admin(), &job_id).expect("remove job");
    let removed = h
        .board
        .remove_company(&admin(), &company_id)
        .expect("no dependent jobs remain");
    assert_eq!(removed.id, company_id);
    assert!(h
        .stores
        .companies
        .get(&company_id)
        .expect("get")
        .is_none());
}
