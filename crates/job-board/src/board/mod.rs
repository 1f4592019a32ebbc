//! Recruitment board: seeker profiles, companies, job posts and applications.
//!
//! Each entity type has its own store and its own manager. Stores carry no relational
//! constraints, so every cross-entity rule (owner checks, the company/job delete guard, the
//! open-job requirement for applications) is enforced by the managers before they commit.

pub mod applications;
pub mod companies;
pub mod domain;
pub mod error;
pub mod events;
pub mod history;
pub mod jobs;
pub mod router;
pub mod service;
pub mod users;
mod validation;

#[cfg(test)]
mod tests;

pub use applications::JobApplicationManager;
pub use companies::CompanyManager;
pub use domain::{
    ApplicationId, Company, CompanyChanges, CompanyId, CompanyPayload, EducationHistory,
    EducationHistoryPayload, EducationId, Job, JobApplication, JobApplicationPayload, JobChanges,
    JobId, JobPayload, PostStatus, User, UserPayload, WorkHistory, WorkHistoryPayload, WorkId,
};
pub use error::BoardError;
pub use events::{
    EntityKind, EventError, EventSink, LifecycleAction, LifecycleEvent, MemoryEventSink,
    TracingEventSink,
};
pub use history::{EducationHistoryManager, WorkHistoryManager};
pub use jobs::JobManager;
pub use router::{board_router, caller_from_headers, CALLER_HEADER};
pub use service::{JobBoard, Stores};
pub use users::UserManager;
