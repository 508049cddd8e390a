#![allow(async_fn_in_trait)]

use cradle_domain::id::{BabyId, EventId, EventTypeId, UserId};
use cradle_domain::pagination::{Page, PageQuery};

use crate::domain::types::{
    Baby, Event, EventPatch, EventType, EventTypePatch, NewEvent, NewEventType, User,
};
use crate::error::ApiError;

/// Repository for accounts and credentials.
///
/// Raw passwords enter exactly two operations (`create_user`,
/// `replace_password`) where they are hashed and discarded; they are never
/// stored or logged. `verify_password` compares against the stored hash.
pub trait AuthRepository: Send + Sync {
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, ApiError>;

    async fn create_user(
        &self,
        id: UserId,
        raw_password: &str,
        display_name: Option<String>,
    ) -> Result<User, ApiError>;

    /// Check a raw password against the stored hash. Returns the user on
    /// success, `None` for an unknown identity or a wrong password — the
    /// two are indistinguishable to the caller.
    async fn verify_password(
        &self,
        id: &UserId,
        raw_password: &str,
    ) -> Result<Option<User>, ApiError>;

    /// Replace the stored hash with one derived from `raw_password`.
    async fn replace_password(&self, id: &UserId, raw_password: &str) -> Result<(), ApiError>;
}

/// Repository resolving the single baby an identity is authorized for.
pub trait BabyRepository: Send + Sync {
    /// At most one baby per deployment; `None` if the identity is not a
    /// listed parent of it.
    async fn baby_for_parent(&self, parent: &UserId) -> Result<Option<Baby>, ApiError>;
}

/// Repository for event types.
pub trait EventTypeRepository: Send + Sync {
    /// All types for a baby, active or not — callers filter themselves.
    /// Ordered by `order` ascending, ties broken by id.
    async fn list(&self, baby_id: &BabyId) -> Result<Vec<EventType>, ApiError>;

    async fn find(&self, id: EventTypeId) -> Result<Option<EventType>, ApiError>;

    async fn create(&self, new: NewEventType, created_by: &UserId)
    -> Result<EventType, ApiError>;

    /// Apply an allow-listed patch. Returns `None` if the id is unknown.
    async fn patch(
        &self,
        id: EventTypeId,
        patch: EventTypePatch,
    ) -> Result<Option<EventType>, ApiError>;

    /// Delete an event type. Returns `true` if a row was deleted.
    async fn remove(&self, id: EventTypeId) -> Result<bool, ApiError>;
}

/// Repository for logged events.
pub trait EventRepository: Send + Sync {
    /// Page through a baby's events, `happened_at` descending with id
    /// descending as the tiebreak.
    async fn list(&self, baby_id: &BabyId, page: &PageQuery) -> Result<Page<Event>, ApiError>;

    async fn find(&self, id: EventId) -> Result<Option<Event>, ApiError>;

    /// Create an event. The repository assigns the id, `happened_at`, and
    /// the audit fields.
    async fn create(&self, new: NewEvent, created_by: &UserId) -> Result<Event, ApiError>;

    /// Apply an allow-listed patch: `updated_at` bumps, `happened_at` is
    /// untouched. Returns `None` if the id is unknown.
    async fn patch(&self, id: EventId, patch: EventPatch) -> Result<Option<Event>, ApiError>;

    /// Delete an event. Returns `true` if a row was deleted.
    async fn remove(&self, id: EventId) -> Result<bool, ApiError>;
}
