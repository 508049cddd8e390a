use cradle_domain::id::{BabyId, EventTypeId, UserId};

use crate::domain::repository::{BabyRepository, EventTypeRepository};
use crate::domain::types::{EventType, EventTypePatch, NewEventType};
use crate::error::ApiError;
use crate::usecase::authorize_baby;

// ── ListEventTypes ───────────────────────────────────────────────────────────

/// All types for the baby, active and inactive — callers filter themselves.
pub struct ListEventTypesUseCase<T: EventTypeRepository, B: BabyRepository> {
    pub types: T,
    pub babies: B,
}

impl<T: EventTypeRepository, B: BabyRepository> ListEventTypesUseCase<T, B> {
    pub async fn execute(
        &self,
        identity: &UserId,
        baby_id: &BabyId,
    ) -> Result<Vec<EventType>, ApiError> {
        authorize_baby(&self.babies, identity, baby_id).await?;
        self.types.list(baby_id).await
    }
}

// ── CreateEventType ──────────────────────────────────────────────────────────

pub struct CreateEventTypeInput {
    pub name: String,
    pub active: bool,
    pub order: i32,
}

pub struct CreateEventTypeUseCase<T: EventTypeRepository, B: BabyRepository> {
    pub types: T,
    pub babies: B,
}

impl<T: EventTypeRepository, B: BabyRepository> CreateEventTypeUseCase<T, B> {
    pub async fn execute(
        &self,
        identity: &UserId,
        baby_id: &BabyId,
        input: CreateEventTypeInput,
    ) -> Result<EventType, ApiError> {
        let baby = authorize_baby(&self.babies, identity, baby_id).await?;
        if input.name.trim().is_empty() {
            return Err(ApiError::validation("event type name must not be empty"));
        }
        self.types
            .create(
                NewEventType {
                    baby_id: baby.id,
                    name: input.name,
                    active: input.active,
                    order: input.order,
                },
                identity,
            )
            .await
    }
}

// ── UpdateEventType ──────────────────────────────────────────────────────────

pub struct UpdateEventTypeUseCase<T: EventTypeRepository, B: BabyRepository> {
    pub types: T,
    pub babies: B,
}

impl<T: EventTypeRepository, B: BabyRepository> UpdateEventTypeUseCase<T, B> {
    pub async fn execute(
        &self,
        identity: &UserId,
        type_id: EventTypeId,
        patch: EventTypePatch,
    ) -> Result<EventType, ApiError> {
        let existing = self
            .types
            .find(type_id)
            .await?
            .ok_or(ApiError::NotFound)?;
        authorize_baby(&self.babies, identity, &existing.baby_id).await?;
        if patch.is_empty() {
            return Err(ApiError::validation("patch must change at least one field"));
        }
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(ApiError::validation("event type name must not be empty"));
            }
        }
        self.types
            .patch(type_id, patch)
            .await?
            .ok_or(ApiError::NotFound)
    }
}

// ── DeleteEventType ──────────────────────────────────────────────────────────

pub struct DeleteEventTypeUseCase<T: EventTypeRepository, B: BabyRepository> {
    pub types: T,
    pub babies: B,
}

impl<T: EventTypeRepository, B: BabyRepository> DeleteEventTypeUseCase<T, B> {
    pub async fn execute(&self, identity: &UserId, type_id: EventTypeId) -> Result<(), ApiError> {
        let existing = self
            .types
            .find(type_id)
            .await?
            .ok_or(ApiError::NotFound)?;
        authorize_baby(&self.babies, identity, &existing.baby_id).await?;
        let deleted = self.types.remove(type_id).await?;
        if !deleted {
            return Err(ApiError::NotFound);
        }
        Ok(())
    }
}
