use cradle_domain::id::{BabyId, EventId, EventTypeId, UserId};
use cradle_domain::pagination::{Page, PageQuery};

use crate::domain::repository::{BabyRepository, EventRepository, EventTypeRepository};
use crate::domain::types::{Event, EventPatch, NewEvent};
use crate::error::ApiError;
use crate::usecase::authorize_baby;

/// Check that `type_id` names an event type scoped to `baby_id`.
/// Runs before any write touches storage.
async fn require_type_in_baby<T: EventTypeRepository>(
    types: &T,
    type_id: EventTypeId,
    baby_id: &BabyId,
) -> Result<(), ApiError> {
    match types.find(type_id).await? {
        Some(t) if &t.baby_id == baby_id => Ok(()),
        _ => Err(ApiError::validation("unknown event type")),
    }
}

// ── ListEvents ───────────────────────────────────────────────────────────────

pub struct ListEventsUseCase<E: EventRepository, B: BabyRepository> {
    pub events: E,
    pub babies: B,
}

impl<E: EventRepository, B: BabyRepository> ListEventsUseCase<E, B> {
    pub async fn execute(
        &self,
        identity: &UserId,
        baby_id: &BabyId,
        page: &PageQuery,
    ) -> Result<Page<Event>, ApiError> {
        authorize_baby(&self.babies, identity, baby_id).await?;
        self.events.list(baby_id, page).await
    }
}

// ── GetEvent ─────────────────────────────────────────────────────────────────

pub struct GetEventUseCase<E: EventRepository, B: BabyRepository> {
    pub events: E,
    pub babies: B,
}

impl<E: EventRepository, B: BabyRepository> GetEventUseCase<E, B> {
    pub async fn execute(&self, identity: &UserId, event_id: EventId) -> Result<Event, ApiError> {
        let event = self
            .events
            .find(event_id)
            .await?
            .ok_or(ApiError::NotFound)?;
        authorize_baby(&self.babies, identity, &event.baby_id).await?;
        Ok(event)
    }
}

// ── CreateEvent ──────────────────────────────────────────────────────────────

pub struct CreateEventInput {
    pub type_id: EventTypeId,
    pub note: Option<String>,
}

pub struct CreateEventUseCase<E: EventRepository, T: EventTypeRepository, B: BabyRepository> {
    pub events: E,
    pub types: T,
    pub babies: B,
}

impl<E: EventRepository, T: EventTypeRepository, B: BabyRepository>
    CreateEventUseCase<E, T, B>
{
    /// `happened_at` and the audit fields are stamped by the repository;
    /// the caller only chooses the type and an optional note.
    pub async fn execute(
        &self,
        identity: &UserId,
        baby_id: &BabyId,
        input: CreateEventInput,
    ) -> Result<Event, ApiError> {
        let baby = authorize_baby(&self.babies, identity, baby_id).await?;
        require_type_in_baby(&self.types, input.type_id, &baby.id).await?;
        self.events
            .create(
                NewEvent {
                    baby_id: baby.id,
                    type_id: input.type_id,
                    note: input.note,
                },
                identity,
            )
            .await
    }
}

// ── UpdateEvent ──────────────────────────────────────────────────────────────

pub struct UpdateEventUseCase<E: EventRepository, T: EventTypeRepository, B: BabyRepository> {
    pub events: E,
    pub types: T,
    pub babies: B,
}

impl<E: EventRepository, T: EventTypeRepository, B: BabyRepository>
    UpdateEventUseCase<E, T, B>
{
    pub async fn execute(
        &self,
        identity: &UserId,
        event_id: EventId,
        patch: EventPatch,
    ) -> Result<Event, ApiError> {
        let existing = self
            .events
            .find(event_id)
            .await?
            .ok_or(ApiError::NotFound)?;
        authorize_baby(&self.babies, identity, &existing.baby_id).await?;
        if patch.is_empty() {
            return Err(ApiError::validation("patch must change at least one field"));
        }
        if let Some(type_id) = patch.type_id {
            require_type_in_baby(&self.types, type_id, &existing.baby_id).await?;
        }
        self.events
            .patch(event_id, patch)
            .await?
            .ok_or(ApiError::NotFound)
    }
}

// ── DeleteEvent ──────────────────────────────────────────────────────────────

pub struct DeleteEventUseCase<E: EventRepository, B: BabyRepository> {
    pub events: E,
    pub babies: B,
}

impl<E: EventRepository, B: BabyRepository> DeleteEventUseCase<E, B> {
    pub async fn execute(&self, identity: &UserId, event_id: EventId) -> Result<(), ApiError> {
        let existing = self
            .events
            .find(event_id)
            .await?
            .ok_or(ApiError::NotFound)?;
        authorize_baby(&self.babies, identity, &existing.baby_id).await?;
        let deleted = self.events.remove(event_id).await?;
        if !deleted {
            return Err(ApiError::NotFound);
        }
        Ok(())
    }
}
