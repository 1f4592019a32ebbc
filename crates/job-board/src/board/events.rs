use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::identity::{CallerContext, Identity, Timestamp};

/// Entity families that emit lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    User,
    EducationHistory,
    WorkHistory,
    Company,
    Job,
    JobApplication,
}

impl EntityKind {
    pub const fn label(self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::EducationHistory => "education_history",
            EntityKind::WorkHistory => "work_history",
            EntityKind::Company => "company",
            EntityKind::Job => "job",
            EntityKind::JobApplication => "job_application",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleAction {
    Registered,
    Created,
    Updated,
    Closed,
    Removed,
    Applied,
}

impl LifecycleAction {
    pub const fn label(self) -> &'static str {
        match self {
            LifecycleAction::Registered => "registered",
            LifecycleAction::Created => "created",
            LifecycleAction::Updated => "updated",
            LifecycleAction::Closed => "closed",
            LifecycleAction::Removed => "removed",
            LifecycleAction::Applied => "applied",
        }
    }
}

/// Emitted after a mutation has been committed to its store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleEvent {
    pub entity: EntityKind,
    pub action: LifecycleAction,
    pub record_id: String,
    pub actor: Identity,
    pub at: Timestamp,
}

impl LifecycleEvent {
    pub(crate) fn new(
        ctx: &CallerContext,
        entity: EntityKind,
        action: LifecycleAction,
        record_id: impl Into<String>,
    ) -> Self {
        Self {
            entity,
            action,
            record_id: record_id.into(),
            actor: ctx.current_identity().clone(),
            at: ctx.now(),
        }
    }
}

/// Outbound hook for lifecycle events (log shipping, notifications, tests).
pub trait EventSink: Send + Sync {
    fn publish(&self, event: LifecycleEvent) -> Result<(), EventError>;
}

#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("event transport unavailable: {0}")]
    Transport(String),
}

/// Publish without letting a sink failure undo an already committed write.
pub(crate) fn emit(sink: &dyn EventSink, event: LifecycleEvent) {
    let entity = event.entity.label();
    let action = event.action.label();
    let record_id = event.record_id.clone();
    if let Err(err) = sink.publish(event) {
        warn!(entity, action, %record_id, error = %err, "lifecycle event dropped");
    }
}

/// Writes each event as a structured log line.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn publish(&self, event: LifecycleEvent) -> Result<(), EventError> {
        info!(
            entity = event.entity.label(),
            action = event.action.label(),
            record_id = %event.record_id,
            actor = %event.actor,
            at = event.at.0,
            "lifecycle event"
        );
        Ok(())
    }
}

/// Keeps events in memory so callers can inspect what happened.
#[derive(Debug, Default, Clone)]
pub struct MemoryEventSink {
    events: Arc<Mutex<Vec<LifecycleEvent>>>,
}

impl MemoryEventSink {
    pub fn events(&self) -> Vec<LifecycleEvent> {
        match self.events.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl EventSink for MemoryEventSink {
    fn publish(&self, event: LifecycleEvent) -> Result<(), EventError> {
        self.events
            .lock()
            .map_err(|_| EventError::Transport("event buffer poisoned".to_string()))?
            .push(event);
        Ok(())
    }
}
