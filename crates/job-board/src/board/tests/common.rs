use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::board::domain::{
    CompanyPayload, EducationHistoryPayload, JobApplicationPayload, JobId, JobPayload, User,
    UserPayload, WorkHistoryPayload,
};
use crate::board::events::{EventError, EventSink, LifecycleEvent, MemoryEventSink};
use crate::board::{board_router, JobBoard, Stores};
use crate::identity::{CallerContext, Identity, ManualClock, Timestamp};
use crate::store::{EntityStore, StoreError};

pub(super) const START: u64 = 1_700_000_000_000_000_000;

pub(super) fn seeker() -> Identity {
    Identity::new("seeker-1")
}

pub(super) fn other_seeker() -> Identity {
    Identity::new("seeker-2")
}

pub(super) fn admin() -> Identity {
    Identity::new("acme-admin")
}

pub(super) fn ctx(identity: Identity) -> CallerContext {
    CallerContext::new(identity, Timestamp(START))
}

pub(super) fn user_payload() -> UserPayload {
    UserPayload {
        full_name: "Dana Rivers".to_string(),
        email: "dana@example.com".to_string(),
        phone: "+1-555-0100".to_string(),
    }
}

pub(super) fn education_payload() -> EducationHistoryPayload {
    EducationHistoryPayload {
        education_level: "Bachelor".to_string(),
        institution: "State University".to_string(),
        field_of_study: "Computer Science".to_string(),
        year_of_entry: 2016,
        year_of_graduation: 2020,
        gpa: 3.6,
        description: "Systems track".to_string(),
    }
}

pub(super) fn work_payload() -> WorkHistoryPayload {
    WorkHistoryPayload {
        company_name: "Initech".to_string(),
        position: "Backend Engineer".to_string(),
        year_started: 2020,
        year_ended: 2023,
        salary: "95000".to_string(),
        description: "Billing services".to_string(),
    }
}

pub(super) fn company_payload() -> CompanyPayload {
    CompanyPayload {
        name: "Acme Corp".to_string(),
        email: "jobs@acme.test".to_string(),
        phone: "+1-555-0199".to_string(),
        address: "1 Market St".to_string(),
        description: "Anvils and rockets".to_string(),
    }
}

pub(super) fn job_payload() -> JobPayload {
    JobPayload {
        company_id: None,
        position: "Rust Engineer".to_string(),
        requirements: "3+ years Rust".to_string(),
        location: "Remote".to_string(),
        salary: "120000".to_string(),
        description: "Build the storage layer".to_string(),
    }
}

pub(super) fn application_payload(job_id: &JobId) -> JobApplicationPayload {
    JobApplicationPayload {
        job_id: job_id.clone(),
        cover_letter: "I would love to help.".to_string(),
        resume: "https://cv.example/dana.pdf".to_string(),
        portfolio: None,
    }
}

pub(super) struct Harness {
    pub(super) board: JobBoard,
    pub(super) stores: Stores,
    pub(super) clock: Arc<ManualClock>,
    pub(super) events: MemoryEventSink,
}

pub(super) fn harness() -> Harness {
    let stores = Stores::in_memory();
    let clock = Arc::new(ManualClock::starting_at(START));
    let events = MemoryEventSink::default();
    let board = JobBoard::new(stores.clone(), clock.clone(), Arc::new(events.clone()));
    Harness {
        board,
        stores,
        clock,
        events,
    }
}

/// Board with a registered seeker, a company and one open job.
pub(super) fn seeded() -> (Harness, JobId) {
    let h = harness();
    h.board
        .register_user(&seeker(), user_payload())
        .expect("seeker registers");
    h.board
        .register_company(&admin(), company_payload())
        .expect("company registers");
    let job = h
        .board
        .create_job(&admin(), job_payload())
        .expect("job created");
    (h, job.id)
}

pub(super) fn events_of(h: &Harness) -> Vec<LifecycleEvent> {
    h.events.events()
}

/// Store whose every call is rejected, standing in for an unavailable durable layer.
pub(super) struct UnavailableStore;

impl<K, V> EntityStore<K, V> for UnavailableStore {
    fn get(&self, _key: &K) -> Result<Option<V>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn insert(&self, _key: K, _value: V) -> Result<V, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn remove(&self, _key: &K) -> Result<Option<V>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn values(&self) -> Result<Vec<V>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn board_with_offline_users() -> JobBoard {
    let mut stores = Stores::in_memory();
    let offline: Arc<dyn EntityStore<Identity, User>> = Arc::new(UnavailableStore);
    stores.users = offline;
    JobBoard::new(
        stores,
        Arc::new(ManualClock::starting_at(START)),
        Arc::new(MemoryEventSink::default()),
    )
}

/// Sink that refuses every event.
pub(super) struct RejectingSink;

impl EventSink for RejectingSink {
    fn publish(&self, _event: LifecycleEvent) -> Result<(), EventError> {
        Err(EventError::Transport("broker down".to_string()))
    }
}

pub(super) fn router_for(h: &Harness) -> axum::Router {
    let board = JobBoard::new(
        h.stores.clone(),
        h.clock.clone(),
        Arc::new(h.events.clone()),
    );
    board_router(Arc::new(board))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
