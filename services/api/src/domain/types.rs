use chrono::{DateTime, Utc};

use cradle_domain::id::{BabyId, EventId, EventTypeId, UserId};

/// A parent account. The password hash never leaves the auth repository's
/// verification path; response DTOs carry everything but the hash.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The baby a deployment is scoped to. The parent set is the authorization
/// boundary: only listed parents may act on this baby's data. Invariant:
/// the parent set is never empty.
#[derive(Debug, Clone)]
pub struct Baby {
    pub id: BabyId,
    pub name: String,
    pub parents: Vec<UserId>,
}

impl Baby {
    pub fn has_parent(&self, user: &UserId) -> bool {
        self.parents.contains(user)
    }
}

/// A kind of care event (feeding, sleep, ...), scoped to one baby.
/// `order` is a presentation hint only; ties are broken by id.
#[derive(Debug, Clone)]
pub struct EventType {
    pub id: EventTypeId,
    pub baby_id: BabyId,
    pub name: String,
    pub active: bool,
    pub order: i32,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A logged care event.
///
/// `happened_at` is assigned exactly once, by the owning repository, at
/// creation time — never caller-supplied, never mutated. `created_by` and
/// `created_at` are write-once; `updated_at` bumps on every patch.
#[derive(Debug, Clone)]
pub struct Event {
    pub id: EventId,
    pub baby_id: BabyId,
    pub type_id: EventTypeId,
    pub note: Option<String>,
    pub happened_at: DateTime<Utc>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a caller may supply when creating an event type.
#[derive(Debug, Clone)]
pub struct NewEventType {
    pub baby_id: BabyId,
    pub name: String,
    pub active: bool,
    pub order: i32,
}

/// Patchable event-type fields. The allow-list is the struct itself:
/// audit fields have no representation here.
#[derive(Debug, Clone, Default)]
pub struct EventTypePatch {
    pub name: Option<String>,
    pub active: Option<bool>,
    pub order: Option<i32>,
}

impl EventTypePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.active.is_none() && self.order.is_none()
    }
}

/// Fields a caller may supply when creating an event. No timestamp:
/// `happened_at` is stamped by the repository.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub baby_id: BabyId,
    pub type_id: EventTypeId,
    pub note: Option<String>,
}

/// Patchable event fields. `happened_at`, `created_by` and `created_at`
/// are structurally absent. The nested option on `note` separates "leave
/// the note alone" (outer `None`) from "clear it" (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub type_id: Option<EventTypeId>,
    pub note: Option<Option<String>>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        self.type_id.is_none() && self.note.is_none()
    }
}
