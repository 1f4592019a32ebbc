use super::common::*;
use crate::board::domain::JobId;
use crate::board::events::{EntityKind, LifecycleAction};
use crate::board::BoardError;
use crate::identity::{Identity, Timestamp};

#[test]
fn apply_binds_caller_and_timestamp() {
    let (h, job_id) = seeded();
    h.clock.advance(42);

    let mut payload = application_payload(&job_id);
    payload.portfolio = Some("https://github.com/dana".to_string());
    let application = h
        .board
        .apply_to_job(&seeker(), payload)
        .expect("apply");

    assert_eq!(application.user_id, seeker());
    assert_eq!(application.job_id, job_id);
    assert_eq!(application.application_date, Timestamp(START + 42));
    assert_eq!(
        application.portfolio.as_deref(),
        Some("https://github.com/dana")
    );
    assert_eq!(
        h.stores.applications.get(&application.id).expect("get"),
        Some(application.clone())
    );

    let last = events_of(&h).pop().expect("event emitted");
    assert_eq!(last.entity, EntityKind::JobApplication);
    assert_eq!(last.action, LifecycleAction::Applied);
    assert_eq!(last.record_id, application.id.0);
}

#[test]
fn apply_to_unknown_job_is_not_found() {
    let (h, _) = seeded();
    match h
        .board
        .apply_to_job(&seeker(), application_payload(&JobId::from("ghost")))
    {
        Err(BoardError::NotFound(message)) => assert_eq!(message, "Job not found"),
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn apply_to_closed_job_conflicts() {
    let (h, job_id) = seeded();
    h.board.close_job(&admin(), &job_id).expect("close");
    h.board.close_job(&admin(), &job_id).expect("close is idempotent");

    match h.board.apply_to_job(&seeker(), application_payload(&job_id)) {
        Err(BoardError::Conflict(message)) => assert_eq!(message, "Job is closed"),
        other => panic!("expected conflict, got {other:?}"),
    }
    assert!(h.stores.applications.values().expect("scan").is_empty());
}

#[test]
fn closed_check_precedes_registration_check() {
    let (h, job_id) = seeded();
    h.board.close_job(&admin(), &job_id).expect("close");

    assert!(matches!(
        h.board
            .apply_to_job(&Identity::new("stranger"), application_payload(&job_id)),
        Err(BoardError::Conflict(_))
    ));
}

#[test]
fn unregistered_callers_cannot_apply() {
    let (h, job_id) = seeded();
    match h
        .board
        .apply_to_job(&Identity::new("stranger"), application_payload(&job_id))
    {
        Err(BoardError::NotAuthorized(message)) => assert_eq!(message, "You are not registered"),
        other => panic!("expected not authorized, got {other:?}"),
    }
    assert!(h.stores.applications.values().expect("scan").is_empty());
}

#[test]
fn apply_requires_cover_letter_and_resume() {
    let (h, job_id) = seeded();
    let mut payload = application_payload(&job_id);
    payload.resume = " ".to_string();
    assert!(matches!(
        h.board.apply_to_job(&seeker(), payload),
        Err(BoardError::ValidationFailed(_))
    ));
}

#[test]
fn repeat_applications_are_accepted_and_listed_per_caller() {
    let (h, job_id) = seeded();
    h.board
        .register_user(&other_seeker(), user_payload())
        .expect("second seeker");

    let first = h
        .board
        .apply_to_job(&seeker(), application_payload(&job_id))
        .expect("first");
    let second = h
        .board
        .apply_to_job(&seeker(), application_payload(&job_id))
        .expect("duplicate accepted");
    h.board
        .apply_to_job(&other_seeker(), application_payload(&job_id))
        .expect("other seeker");

    assert_ne!(first.id, second.id);
    let mine = h.board.list_my_applications(&seeker()).expect("list");
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|application| application.user_id == seeker()));
    assert_eq!(h.stores.applications.values().expect("scan").len(), 3);
}
