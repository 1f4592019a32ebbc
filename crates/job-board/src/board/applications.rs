use std::sync::Arc;

use tracing::info;

use super::domain::{
    ApplicationId, Job, JobApplication, JobApplicationPayload, JobId, PostStatus, User,
};
use super::error::BoardError;
use super::events::{emit, EntityKind, EventSink, LifecycleAction, LifecycleEvent};
use super::users::is_registered;
use super::validation::require_text;
use crate::identity::{CallerContext, Identity};
use crate::store::SharedStore;

/// Owns the application store. Reads jobs and users to gate submissions.
pub struct JobApplicationManager {
    applications: SharedStore<ApplicationId, JobApplication>,
    jobs: SharedStore<JobId, Job>,
    users: SharedStore<Identity, User>,
    events: Arc<dyn EventSink>,
}

impl JobApplicationManager {
    pub fn new(
        applications: SharedStore<ApplicationId, JobApplication>,
        jobs: SharedStore<JobId, Job>,
        users: SharedStore<Identity, User>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            applications,
            jobs,
            users,
            events,
        }
    }

    /// Submit an application. Repeat applications to the same job are accepted.
    pub fn apply(
        &self,
        ctx: &CallerContext,
        payload: JobApplicationPayload,
    ) -> Result<JobApplication, BoardError> {
        let job = self
            .jobs
            .get(&payload.job_id)?
            .ok_or_else(|| BoardError::not_found("Job not found"))?;
        if job.post_status == PostStatus::Closed {
            return Err(BoardError::conflict("Job is closed"));
        }
        if !is_registered(&self.users, ctx.current_identity())? {
            return Err(BoardError::NotAuthorized(
                "You are not registered".to_string(),
            ));
        }
        require_text("cover_letter", &payload.cover_letter)?;
        require_text("resume", &payload.resume)?;

        let application = JobApplication {
            id: ApplicationId::generate(),
            job_id: payload.job_id,
            user_id: ctx.current_identity().clone(),
            cover_letter: payload.cover_letter,
            resume: payload.resume,
            portfolio: payload.portfolio,
            application_date: ctx.now(),
        };

        let stored = self
            .applications
            .insert(application.id.clone(), application)?;
        info!(application = %stored.id, job = %stored.job_id, "application received");
        emit(
            self.events.as_ref(),
            LifecycleEvent::new(
                ctx,
                EntityKind::JobApplication,
                LifecycleAction::Applied,
                stored.id.as_str(),
            ),
        );
        Ok(stored)
    }

    pub fn list_mine(&self, ctx: &CallerContext) -> Result<Vec<JobApplication>, BoardError> {
        let caller = ctx.current_identity();
        Ok(self
            .applications
            .values()?
            .into_iter()
            .filter(|application| &application.user_id == caller)
            .collect())
    }
}
