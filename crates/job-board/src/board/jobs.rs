use std::sync::Arc;

use tracing::debug;

use super::domain::{Company, CompanyId, Job, JobChanges, JobId, JobPayload, PostStatus};
use super::error::BoardError;
use super::events::{emit, EntityKind, EventSink, LifecycleAction, LifecycleEvent};
use super::validation::{require_optional_text, require_text};
use crate::identity::CallerContext;
use crate::store::SharedStore;

const JOB_NOT_FOUND: &str = "Job not found";
const COMPANY_NOT_FOUND: &str = "Company not found";

/// Owns the job store. A post belongs to the identity that created it, which must be the
/// admin of the company it is filed under.
pub struct JobManager {
    jobs: SharedStore<JobId, Job>,
    companies: SharedStore<CompanyId, Company>,
    events: Arc<dyn EventSink>,
}

impl JobManager {
    pub fn new(
        jobs: SharedStore<JobId, Job>,
        companies: SharedStore<CompanyId, Company>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            jobs,
            companies,
            events,
        }
    }

    pub fn list_open(&self) -> Result<Vec<Job>, BoardError> {
        Ok(self
            .jobs
            .values()?
            .into_iter()
            .filter(Job::is_open)
            .collect())
    }

    pub fn list_open_by_company(&self, company_id: &CompanyId) -> Result<Vec<Job>, BoardError> {
        Ok(self
            .jobs
            .values()?
            .into_iter()
            .filter(|job| job.is_open() && &job.company_id == company_id)
            .collect())
    }

    pub fn get(&self, id: &JobId) -> Result<Job, BoardError> {
        self.jobs
            .get(id)?
            .ok_or_else(|| BoardError::not_found(JOB_NOT_FOUND))
    }

    pub fn create(&self, ctx: &CallerContext, payload: JobPayload) -> Result<Job, BoardError> {
        let company = self.posting_company(ctx, payload.company_id.as_ref())?;
        require_text("position", &payload.position)?;
        require_text("requirements", &payload.requirements)?;
        require_text("location", &payload.location)?;
        require_text("salary", &payload.salary)?;
        require_text("description", &payload.description)?;

        let job = Job {
            id: JobId::generate(),
            company_id: company.id,
            position: payload.position,
            requirements: payload.requirements,
            location: payload.location,
            salary: payload.salary,
            description: payload.description,
            post_owner: ctx.current_identity().clone(),
            post_status: PostStatus::Open,
            created_at: ctx.now(),
            updated_at: None,
        };

        let stored = self.jobs.insert(job.id.clone(), job)?;
        self.publish(ctx, LifecycleAction::Created, &stored.id);
        Ok(stored)
    }

    pub fn update(
        &self,
        ctx: &CallerContext,
        id: &JobId,
        changes: JobChanges,
    ) -> Result<Job, BoardError> {
        let mut job = self.owned(ctx, id)?;
        require_optional_text("position", changes.position.as_deref())?;
        require_optional_text("requirements", changes.requirements.as_deref())?;
        require_optional_text("location", changes.location.as_deref())?;
        require_optional_text("salary", changes.salary.as_deref())?;
        require_optional_text("description", changes.description.as_deref())?;

        job.apply(changes);
        job.updated_at = Some(ctx.now());
        let stored = self.jobs.insert(job.id.clone(), job)?;
        self.publish(ctx, LifecycleAction::Updated, &stored.id);
        Ok(stored)
    }

    /// Close the post. Closing an already closed post succeeds without writing.
    pub fn close(&self, ctx: &CallerContext, id: &JobId) -> Result<Job, BoardError> {
        let mut job = self.owned(ctx, id)?;
        if job.post_status == PostStatus::Closed {
            debug!(job = %id, "job already closed");
            return Ok(job);
        }

        job.post_status = PostStatus::Closed;
        let stored = self.jobs.insert(job.id.clone(), job)?;
        self.publish(ctx, LifecycleAction::Closed, &stored.id);
        Ok(stored)
    }

    /// Delete the post. Applications referencing it do not block removal.
    pub fn remove(&self, ctx: &CallerContext, id: &JobId) -> Result<Job, BoardError> {
        let job = self.owned(ctx, id)?;
        self.jobs.remove(id)?;
        self.publish(ctx, LifecycleAction::Removed, &job.id);
        Ok(job)
    }

    /// Resolve the company a new post is filed under.
    ///
    /// Without an explicit id the first company (in key order) administered by the caller is
    /// used, which is ambiguous for admins of several companies.
    fn posting_company(
        &self,
        ctx: &CallerContext,
        requested: Option<&CompanyId>,
    ) -> Result<Company, BoardError> {
        let caller = ctx.current_identity();
        match requested {
            Some(company_id) => {
                let company = self
                    .companies
                    .get(company_id)?
                    .ok_or_else(|| BoardError::not_found(COMPANY_NOT_FOUND))?;
                if &company.admin != caller {
                    return Err(BoardError::not_authorized());
                }
                Ok(company)
            }
            None => self
                .companies
                .values()?
                .into_iter()
                .find(|company| &company.admin == caller)
                .ok_or_else(|| BoardError::not_found(COMPANY_NOT_FOUND)),
        }
    }

    fn owned(&self, ctx: &CallerContext, id: &JobId) -> Result<Job, BoardError> {
        let job = self.get(id)?;
        if &job.post_owner != ctx.current_identity() {
            return Err(BoardError::not_authorized());
        }
        Ok(job)
    }

    fn publish(&self, ctx: &CallerContext, action: LifecycleAction, id: &JobId) {
        emit(
            self.events.as_ref(),
            LifecycleEvent::new(ctx, EntityKind::Job, action, id.as_str()),
        );
    }
}
