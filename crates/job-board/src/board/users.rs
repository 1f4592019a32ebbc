use std::sync::Arc;

use tracing::debug;

use super::domain::{User, UserPayload};
use super::error::BoardError;
use super::events::{emit, EntityKind, EventSink, LifecycleAction, LifecycleEvent};
use super::validation::require_text;
use crate::identity::{CallerContext, Identity};
use crate::store::SharedStore;

/// Owns the user store. One profile per identity; registering again replaces it.
pub struct UserManager {
    users: SharedStore<Identity, User>,
    events: Arc<dyn EventSink>,
}

impl UserManager {
    pub fn new(users: SharedStore<Identity, User>, events: Arc<dyn EventSink>) -> Self {
        Self { users, events }
    }

    pub fn register(&self, ctx: &CallerContext, payload: UserPayload) -> Result<User, BoardError> {
        require_text("full_name", &payload.full_name)?;
        require_text("email", &payload.email)?;
        require_text("phone", &payload.phone)?;

        let identity = ctx.current_identity().clone();
        let user = User {
            id: identity.clone(),
            full_name: payload.full_name,
            email: payload.email,
            phone: payload.phone,
            registered_at: ctx.now(),
        };

        let stored = self.users.insert(identity, user)?;
        debug!(user = %stored.id, "user profile stored");
        emit(
            self.events.as_ref(),
            LifecycleEvent::new(
                ctx,
                EntityKind::User,
                LifecycleAction::Registered,
                stored.id.as_str(),
            ),
        );
        Ok(stored)
    }

    pub fn profile(&self, ctx: &CallerContext) -> Result<User, BoardError> {
        self.users
            .get(ctx.current_identity())?
            .ok_or_else(|| BoardError::not_found("User not found"))
    }
}

/// Point lookup used by the managers that require a registered caller.
pub(crate) fn is_registered(
    users: &SharedStore<Identity, User>,
    identity: &Identity,
) -> Result<bool, BoardError> {
    Ok(users.get(identity)?.is_some())
}
