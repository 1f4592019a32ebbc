use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::applications::JobApplicationManager;
use super::companies::CompanyManager;
use super::domain::{
    ApplicationId, Company, CompanyChanges, CompanyId, CompanyPayload, EducationHistory,
    EducationHistoryPayload, EducationId, Job, JobApplication, JobApplicationPayload, JobChanges,
    JobId, JobPayload, User, UserPayload, WorkHistory, WorkHistoryPayload, WorkId,
};
use super::error::BoardError;
use super::events::EventSink;
use super::history::{EducationHistoryManager, WorkHistoryManager};
use super::jobs::JobManager;
use super::users::UserManager;
use crate::identity::{CallerContext, Clock, Identity};
use crate::store::{JsonFileStore, MemoryStore, SharedStore, StoreError};

/// The six independent entity stores.
#[derive(Clone)]
pub struct Stores {
    pub users: SharedStore<Identity, User>,
    pub education: SharedStore<EducationId, EducationHistory>,
    pub work: SharedStore<WorkId, WorkHistory>,
    pub companies: SharedStore<CompanyId, Company>,
    pub jobs: SharedStore<JobId, Job>,
    pub applications: SharedStore<ApplicationId, JobApplication>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            users: memory(),
            education: memory(),
            work: memory(),
            companies: memory(),
            jobs: memory(),
            applications: memory(),
        }
    }

    /// One JSON snapshot file per entity type under `dir`.
    pub fn open_dir(dir: &Path) -> Result<Self, StoreError> {
        Ok(Self {
            users: file(dir, "users.json")?,
            education: file(dir, "education.json")?,
            work: file(dir, "work.json")?,
            companies: file(dir, "companies.json")?,
            jobs: file(dir, "jobs.json")?,
            applications: file(dir, "applications.json")?,
        })
    }
}

fn memory<K, V>() -> SharedStore<K, V>
where
    K: Ord + Send + 'static,
    V: Clone + Send + 'static,
{
    Arc::new(MemoryStore::new())
}

fn file<K, V>(dir: &Path, name: &str) -> Result<SharedStore<K, V>, StoreError>
where
    K: Ord + Clone + Serialize + DeserializeOwned + Send + 'static,
    V: Clone + Serialize + DeserializeOwned + Send + 'static,
{
    Ok(Arc::new(JsonFileStore::open(dir.join(name))?))
}

/// Facade composing every manager over one store set.
///
/// Operations run one at a time: each acquires the board's turn, stamps a fresh
/// [`CallerContext`], and only then reads or writes. Cross-store scans therefore never see a
/// half-applied operation, and timestamps follow commit order.
///
/// Every call is synchronous and may block on file I/O when the stores are file-backed.
pub struct JobBoard {
    users: UserManager,
    education: EducationHistoryManager,
    work: WorkHistoryManager,
    companies: CompanyManager,
    jobs: JobManager,
    applications: JobApplicationManager,
    clock: Arc<dyn Clock>,
    turn: Mutex<()>,
}

impl JobBoard {
    pub fn new(stores: Stores, clock: Arc<dyn Clock>, events: Arc<dyn EventSink>) -> Self {
        let Stores {
            users,
            education,
            work,
            companies,
            jobs,
            applications,
        } = stores;

        Self {
            users: UserManager::new(users.clone(), events.clone()),
            education: EducationHistoryManager::new(education, users.clone(), events.clone()),
            work: WorkHistoryManager::new(work, users.clone(), events.clone()),
            companies: CompanyManager::new(companies.clone(), jobs.clone(), events.clone()),
            jobs: JobManager::new(jobs.clone(), companies, events.clone()),
            applications: JobApplicationManager::new(applications, jobs, users, events),
            clock,
            turn: Mutex::new(()),
        }
    }

    fn begin(&self, caller: &Identity) -> (MutexGuard<'_, ()>, CallerContext) {
        // The guard protects no data, so a poisoned lock is still safe to reuse.
        let guard = self.turn.lock().unwrap_or_else(PoisonError::into_inner);
        let ctx = CallerContext::new(caller.clone(), self.clock.now());
        debug!(caller = %caller, at = ctx.now().0, "operation started");
        (guard, ctx)
    }

    pub fn register_user(
        &self,
        caller: &Identity,
        payload: UserPayload,
    ) -> Result<User, BoardError> {
        let (_turn, ctx) = self.begin(caller);
        self.users.register(&ctx, payload)
    }

    pub fn profile(&self, caller: &Identity) -> Result<User, BoardError> {
        let (_turn, ctx) = self.begin(caller);
        self.users.profile(&ctx)
    }

    pub fn list_education_history(
        &self,
        caller: &Identity,
    ) -> Result<Vec<EducationHistory>, BoardError> {
        let (_turn, ctx) = self.begin(caller);
        self.education.list(&ctx)
    }

    pub fn add_education_history(
        &self,
        caller: &Identity,
        payload: EducationHistoryPayload,
    ) -> Result<EducationHistory, BoardError> {
        let (_turn, ctx) = self.begin(caller);
        self.education.add(&ctx, payload)
    }

    pub fn update_education_history(
        &self,
        caller: &Identity,
        id: &EducationId,
        payload: EducationHistoryPayload,
    ) -> Result<EducationHistory, BoardError> {
        let (_turn, ctx) = self.begin(caller);
        self.education.update(&ctx, id, payload)
    }

    pub fn remove_education_history(
        &self,
        caller: &Identity,
        id: &EducationId,
    ) -> Result<EducationHistory, BoardError> {
        let (_turn, ctx) = self.begin(caller);
        self.education.remove(&ctx, id)
    }

    pub fn list_work_history(&self, caller: &Identity) -> Result<Vec<WorkHistory>, BoardError> {
        let (_turn, ctx) = self.begin(caller);
        self.work.list(&ctx)
    }

    pub fn add_work_history(
        &self,
        caller: &Identity,
        payload: WorkHistoryPayload,
    ) -> Result<WorkHistory, BoardError> {
        let (_turn, ctx) = self.begin(caller);
        self.work.add(&ctx, payload)
    }

    pub fn update_work_history(
        &self,
        caller: &Identity,
        id: &WorkId,
        payload: WorkHistoryPayload,
    ) -> Result<WorkHistory, BoardError> {
        let (_turn, ctx) = self.begin(caller);
        self.work.update(&ctx, id, payload)
    }

    pub fn remove_work_history(
        &self,
        caller: &Identity,
        id: &WorkId,
    ) -> Result<WorkHistory, BoardError> {
        let (_turn, ctx) = self.begin(caller);
        self.work.remove(&ctx, id)
    }

    pub fn register_company(
        &self,
        caller: &Identity,
        payload: CompanyPayload,
    ) -> Result<Company, BoardError> {
        let (_turn, ctx) = self.begin(caller);
        self.companies.register(&ctx, payload)
    }

    pub fn update_company(
        &self,
        caller: &Identity,
        id: &CompanyId,
        changes: CompanyChanges,
    ) -> Result<Company, BoardError> {
        let (_turn, ctx) = self.begin(caller);
        self.companies.update(&ctx, id, changes)
    }

    pub fn remove_company(&self, caller: &Identity, id: &CompanyId) -> Result<Company, BoardError> {
        let (_turn, ctx) = self.begin(caller);
        self.companies.remove(&ctx, id)
    }

    pub fn list_open_jobs(&self) -> Result<Vec<Job>, BoardError> {
        let _turn = self.turn.lock().unwrap_or_else(PoisonError::into_inner);
        self.jobs.list_open()
    }

    pub fn list_open_jobs_by_company(
        &self,
        company_id: &CompanyId,
    ) -> Result<Vec<Job>, BoardError> {
        let _turn = self.turn.lock().unwrap_or_else(PoisonError::into_inner);
        self.jobs.list_open_by_company(company_id)
    }

    pub fn job(&self, id: &JobId) -> Result<Job, BoardError> {
        let _turn = self.turn.lock().unwrap_or_else(PoisonError::into_inner);
        self.jobs.get(id)
    }

    pub fn create_job(&self, caller: &Identity, payload: JobPayload) -> Result<Job, BoardError> {
        let (_turn, ctx) = self.begin(caller);
        self.jobs.create(&ctx, payload)
    }

    pub fn update_job(
        &self,
        caller: &Identity,
        id: &JobId,
        changes: JobChanges,
    ) -> Result<Job, BoardError> {
        let (_turn, ctx) = self.begin(caller);
        self.jobs.update(&ctx, id, changes)
    }

    pub fn close_job(&self, caller: &Identity, id: &JobId) -> Result<Job, BoardError> {
        let (_turn, ctx) = self.begin(caller);
        self.jobs.close(&ctx, id)
    }

    pub fn remove_job(&self, caller: &Identity, id: &JobId) -> Result<Job, BoardError> {
        let (_turn, ctx) = self.begin(caller);
        self.jobs.remove(&ctx, id)
    }

    pub fn apply_to_job(
        &self,
        caller: &Identity,
        payload: JobApplicationPayload,
    ) -> Result<JobApplication, BoardError> {
        let (_turn, ctx) = self.begin(caller);
        self.applications.apply(&ctx, payload)
    }

    pub fn list_my_applications(
        &self,
        caller: &Identity,
    ) -> Result<Vec<JobApplication>, BoardError> {
        let (_turn, ctx) = self.begin(caller);
        self.applications.list_mine(&ctx)
    }
}
