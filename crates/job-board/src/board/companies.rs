use std::sync::Arc;

use tracing::info;

use super::domain::{Company, CompanyChanges, CompanyId, CompanyPayload, Job, JobId};
use super::error::BoardError;
use super::events::{emit, EntityKind, EventSink, LifecycleAction, LifecycleEvent};
use super::validation::{require_optional_text, require_text};
use crate::identity::CallerContext;
use crate::store::SharedStore;

const COMPANY_NOT_FOUND: &str = "Company not found";

/// Owns the company store. The registering identity becomes the permanent admin.
pub struct CompanyManager {
    companies: SharedStore<CompanyId, Company>,
    jobs: SharedStore<JobId, Job>,
    events: Arc<dyn EventSink>,
}

impl CompanyManager {
    pub fn new(
        companies: SharedStore<CompanyId, Company>,
        jobs: SharedStore<JobId, Job>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            companies,
            jobs,
            events,
        }
    }

    pub fn register(
        &self,
        ctx: &CallerContext,
        payload: CompanyPayload,
    ) -> Result<Company, BoardError> {
        require_text("name", &payload.name)?;
        require_text("email", &payload.email)?;
        require_text("phone", &payload.phone)?;
        require_text("address", &payload.address)?;
        require_text("description", &payload.description)?;

        let company = Company {
            id: CompanyId::generate(),
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            address: payload.address,
            description: payload.description,
            admin: ctx.current_identity().clone(),
            created_at: ctx.now(),
        };

        let stored = self.companies.insert(company.id.clone(), company)?;
        self.publish(ctx, LifecycleAction::Registered, &stored.id);
        Ok(stored)
    }

    pub fn update(
        &self,
        ctx: &CallerContext,
        id: &CompanyId,
        changes: CompanyChanges,
    ) -> Result<Company, BoardError> {
        let mut company = self.administered(ctx, id)?;
        require_optional_text("name", changes.name.as_deref())?;
        require_optional_text("email", changes.email.as_deref())?;
        require_optional_text("phone", changes.phone.as_deref())?;
        require_optional_text("address", changes.address.as_deref())?;
        require_optional_text("description", changes.description.as_deref())?;

        company.apply(changes);
        let stored = self.companies.insert(company.id.clone(), company)?;
        self.publish(ctx, LifecycleAction::Updated, &stored.id);
        Ok(stored)
    }

    /// Refuses while any job still references the company. Jobs are scanned in full, so this
    /// is linear in the number of jobs.
    pub fn remove(&self, ctx: &CallerContext, id: &CompanyId) -> Result<Company, BoardError> {
        let company = self.administered(ctx, id)?;

        let dependent_jobs = self
            .jobs
            .values()?
            .into_iter()
            .filter(|job| &job.company_id == id)
            .count();
        if dependent_jobs > 0 {
            info!(company = %id, dependent_jobs, "company removal refused");
            return Err(BoardError::conflict("Company still has jobs"));
        }

        self.companies.remove(id)?;
        self.publish(ctx, LifecycleAction::Removed, &company.id);
        Ok(company)
    }

    fn administered(&self, ctx: &CallerContext, id: &CompanyId) -> Result<Company, BoardError> {
        let company = self
            .companies
            .get(id)?
            .ok_or_else(|| BoardError::not_found(COMPANY_NOT_FOUND))?;
        if &company.admin != ctx.current_identity() {
            return Err(BoardError::not_authorized());
        }
        Ok(company)
    }

    fn publish(&self, ctx: &CallerContext, action: LifecycleAction, id: &CompanyId) {
        emit(
            self.events.as_ref(),
            LifecycleEvent::new(ctx, EntityKind::Company, action, id.as_str()),
        );
    }
}
