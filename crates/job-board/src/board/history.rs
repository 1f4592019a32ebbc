//! Education and work history attached to a registered user.
//!
//! Both managers share the same shape: the caller must have a user profile to add an entry,
//! and only the user named in `user_id` may change or delete it.

use std::sync::Arc;

use super::domain::{
    EducationHistory, EducationHistoryPayload, EducationId, User, WorkHistory, WorkHistoryPayload,
    WorkId,
};
use super::error::BoardError;
use super::events::{emit, EntityKind, EventSink, LifecycleAction, LifecycleEvent};
use super::users::is_registered;
use super::validation::{require_gpa, require_text, require_year_order};
use crate::identity::{CallerContext, Identity};
use crate::store::SharedStore;

const USER_NOT_FOUND: &str = "User not found";
const EDUCATION_NOT_FOUND: &str = "Education history not found";
const WORK_NOT_FOUND: &str = "Work history not found";

pub struct EducationHistoryManager {
    education: SharedStore<EducationId, EducationHistory>,
    users: SharedStore<Identity, User>,
    events: Arc<dyn EventSink>,
}

impl EducationHistoryManager {
    pub fn new(
        education: SharedStore<EducationId, EducationHistory>,
        users: SharedStore<Identity, User>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            education,
            users,
            events,
        }
    }

    /// Every entry owned by the caller. Empty when there are none.
    pub fn list(&self, ctx: &CallerContext) -> Result<Vec<EducationHistory>, BoardError> {
        let caller = ctx.current_identity();
        Ok(self
            .education
            .values()?
            .into_iter()
            .filter(|entry| &entry.user_id == caller)
            .collect())
    }

    pub fn add(
        &self,
        ctx: &CallerContext,
        payload: EducationHistoryPayload,
    ) -> Result<EducationHistory, BoardError> {
        if !is_registered(&self.users, ctx.current_identity())? {
            return Err(BoardError::not_found(USER_NOT_FOUND));
        }
        validate_education(&payload)?;

        let entry = EducationHistory {
            id: EducationId::generate(),
            user_id: ctx.current_identity().clone(),
            education_level: payload.education_level,
            institution: payload.institution,
            field_of_study: payload.field_of_study,
            year_of_entry: payload.year_of_entry,
            year_of_graduation: payload.year_of_graduation,
            gpa: payload.gpa,
            description: payload.description,
            created_at: ctx.now(),
        };

        let stored = self.education.insert(entry.id.clone(), entry)?;
        self.publish(ctx, LifecycleAction::Created, &stored.id);
        Ok(stored)
    }

    pub fn update(
        &self,
        ctx: &CallerContext,
        id: &EducationId,
        payload: EducationHistoryPayload,
    ) -> Result<EducationHistory, BoardError> {
        let mut entry = self.owned(ctx, id)?;
        validate_education(&payload)?;

        entry.apply(payload);
        let stored = self.education.insert(entry.id.clone(), entry)?;
        self.publish(ctx, LifecycleAction::Updated, &stored.id);
        Ok(stored)
    }

    pub fn remove(
        &self,
        ctx: &CallerContext,
        id: &EducationId,
    ) -> Result<EducationHistory, BoardError> {
        let entry = self.owned(ctx, id)?;
        self.education.remove(id)?;
        self.publish(ctx, LifecycleAction::Removed, &entry.id);
        Ok(entry)
    }

    fn owned(&self, ctx: &CallerContext, id: &EducationId) -> Result<EducationHistory, BoardError> {
        let entry = self
            .education
            .get(id)?
            .ok_or_else(|| BoardError::not_found(EDUCATION_NOT_FOUND))?;
        if &entry.user_id != ctx.current_identity() {
            return Err(BoardError::not_authorized());
        }
        Ok(entry)
    }

    fn publish(&self, ctx: &CallerContext, action: LifecycleAction, id: &EducationId) {
        emit(
            self.events.as_ref(),
            LifecycleEvent::new(ctx, EntityKind::EducationHistory, action, id.as_str()),
        );
    }
}

fn validate_education(payload: &EducationHistoryPayload) -> Result<(), BoardError> {
    require_year_order(
        "year_of_entry",
        payload.year_of_entry,
        "year_of_graduation",
        payload.year_of_graduation,
    )?;
    require_gpa(payload.gpa)
}

pub struct WorkHistoryManager {
    work: SharedStore<WorkId, WorkHistory>,
    users: SharedStore<Identity, User>,
    events: Arc<dyn EventSink>,
}

impl WorkHistoryManager {
    pub fn new(
        work: SharedStore<WorkId, WorkHistory>,
        users: SharedStore<Identity, User>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            work,
            users,
            events,
        }
    }

    pub fn list(&self, ctx: &CallerContext) -> Result<Vec<WorkHistory>, BoardError> {
        let caller = ctx.current_identity();
        Ok(self
            .work
            .values()?
            .into_iter()
            .filter(|entry| &entry.user_id == caller)
            .collect())
    }

    /// Year ordering is only enforced on update; creation checks field presence.
    pub fn add(
        &self,
        ctx: &CallerContext,
        payload: WorkHistoryPayload,
    ) -> Result<WorkHistory, BoardError> {
        if !is_registered(&self.users, ctx.current_identity())? {
            return Err(BoardError::not_found(USER_NOT_FOUND));
        }
        validate_work_text(&payload)?;

        let entry = WorkHistory {
            id: WorkId::generate(),
            user_id: ctx.current_identity().clone(),
            company_name: payload.company_name,
            position: payload.position,
            year_started: payload.year_started,
            year_ended: payload.year_ended,
            salary: payload.salary,
            description: payload.description,
            created_at: ctx.now(),
        };

        let stored = self.work.insert(entry.id.clone(), entry)?;
        self.publish(ctx, LifecycleAction::Created, &stored.id);
        Ok(stored)
    }

    pub fn update(
        &self,
        ctx: &CallerContext,
        id: &WorkId,
        payload: WorkHistoryPayload,
    ) -> Result<WorkHistory, BoardError> {
        let mut entry = self.owned(ctx, id)?;
        require_year_order(
            "year_started",
            payload.year_started,
            "year_ended",
            payload.year_ended,
        )?;
        validate_work_text(&payload)?;

        entry.apply(payload);
        let stored = self.work.insert(entry.id.clone(), entry)?;
        self.publish(ctx, LifecycleAction::Updated, &stored.id);
        Ok(stored)
    }

    pub fn remove(&self, ctx: &CallerContext, id: &WorkId) -> Result<WorkHistory, BoardError> {
        let entry = self.owned(ctx, id)?;
        self.work.remove(id)?;
        self.publish(ctx, LifecycleAction::Removed, &entry.id);
        Ok(entry)
    }

    fn owned(&self, ctx: &CallerContext, id: &WorkId) -> Result<WorkHistory, BoardError> {
        let entry = self
            .work
            .get(id)?
            .ok_or_else(|| BoardError::not_found(WORK_NOT_FOUND))?;
        if &entry.user_id != ctx.current_identity() {
            return Err(BoardError::not_authorized());
        }
        Ok(entry)
    }

    fn publish(&self, ctx: &CallerContext, action: LifecycleAction, id: &WorkId) {
        emit(
            self.events.as_ref(),
            LifecycleEvent::new(ctx, EntityKind::WorkHistory, action, id.as_str()),
        );
    }
}

fn validate_work_text(payload: &WorkHistoryPayload) -> Result<(), BoardError> {
    require_text("company_name", &payload.company_name)?;
    require_text("position", &payload.position)?;
    require_text("salary", &payload.salary)?;
    require_text("description", &payload.description)
}
