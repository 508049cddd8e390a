//! In-memory reference backend.
//!
//! Satisfies every repository contract with process-local keyed maps; it is
//! the default backend and the correctness baseline any persistent backend
//! must match. Writes are immediately visible to subsequent reads — each
//! operation takes the lock once and never holds it across an await.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::anyhow;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::Utc;

use cradle_domain::id::{BabyId, EventId, EventTypeId, UserId};
use cradle_domain::pagination::{EventCursor, Page, PageQuery};

use crate::domain::repository::{
    AuthRepository, BabyRepository, EventRepository, EventTypeRepository,
};
use crate::domain::types::{
    Baby, Event, EventPatch, EventType, EventTypePatch, NewEvent, NewEventType, User,
};
use crate::error::ApiError;

/// Event types seeded for a fresh deployment, in presentation order.
const SEED_EVENT_TYPES: [&str; 4] = ["Feeding", "Sleep", "Diaper change", "Bath"];

#[derive(Default)]
struct StoreInner {
    users: HashMap<UserId, User>,
    babies: HashMap<BabyId, Baby>,
    event_types: HashMap<EventTypeId, EventType>,
    events: HashMap<EventId, Event>,
}

/// Process-local store implementing all four repository contracts.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a store seeded with the two allow-listed parents, one
    /// baby naming both as parents, and the default event types with
    /// ascending order keys. Runs once per process, at construction.
    pub async fn seeded(
        parents: &[String],
        seed_password: &str,
        baby_slug: &str,
        baby_name: &str,
    ) -> Result<Self, ApiError> {
        if parents.is_empty() {
            return Err(ApiError::validation("a baby needs at least one parent"));
        }
        let store = Self::new();
        let mut parent_ids = Vec::with_capacity(parents.len());
        for email in parents {
            let user = store
                .create_user(UserId(email.clone()), seed_password, None)
                .await?;
            parent_ids.push(user.id);
        }

        let first_parent = parent_ids[0].clone();
        {
            let mut inner = store.write()?;
            let baby = Baby {
                id: BabyId(baby_slug.to_owned()),
                name: baby_name.to_owned(),
                parents: parent_ids,
            };
            inner.babies.insert(baby.id.clone(), baby);

            let now = Utc::now();
            for (i, name) in SEED_EVENT_TYPES.iter().enumerate() {
                let event_type = EventType {
                    id: EventTypeId::new(),
                    baby_id: BabyId(baby_slug.to_owned()),
                    name: (*name).to_owned(),
                    active: true,
                    order: i as i32 + 1,
                    created_by: first_parent.clone(),
                    created_at: now,
                    updated_at: now,
                };
                inner.event_types.insert(event_type.id, event_type);
            }
        }
        Ok(store)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreInner>, ApiError> {
        self.inner
            .read()
            .map_err(|_| ApiError::Internal(anyhow!("store lock poisoned")))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreInner>, ApiError> {
        self.inner
            .write()
            .map_err(|_| ApiError::Internal(anyhow!("store lock poisoned")))
    }
}

fn hash_password(raw: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(raw.as_bytes(), &salt)
        .map_err(|e| anyhow!("hash password: {e}"))?;
    Ok(hash.to_string())
}

fn password_matches(raw: &str, stored_hash: &str) -> Result<bool, ApiError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| anyhow!("parse stored hash: {e}"))?;
    Ok(Argon2::default()
        .verify_password(raw.as_bytes(), &parsed)
        .is_ok())
}

impl AuthRepository for MemoryStore {
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, ApiError> {
        Ok(self.read()?.users.get(id).cloned())
    }

    async fn create_user(
        &self,
        id: UserId,
        raw_password: &str,
        display_name: Option<String>,
    ) -> Result<User, ApiError> {
        // Hash before taking the lock; the raw password goes no further.
        let password_hash = hash_password(raw_password)?;
        let mut inner = self.write()?;
        if inner.users.contains_key(&id) {
            return Err(ApiError::validation("user already exists"));
        }
        let now = Utc::now();
        let user = User {
            id: id.clone(),
            password_hash,
            display_name,
            created_at: now,
            updated_at: now,
        };
        inner.users.insert(id, user.clone());
        Ok(user)
    }

    async fn verify_password(
        &self,
        id: &UserId,
        raw_password: &str,
    ) -> Result<Option<User>, ApiError> {
        let user = match self.read()?.users.get(id).cloned() {
            Some(user) => user,
            None => return Ok(None),
        };
        if password_matches(raw_password, &user.password_hash)? {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    async fn replace_password(&self, id: &UserId, raw_password: &str) -> Result<(), ApiError> {
        let password_hash = hash_password(raw_password)?;
        let mut inner = self.write()?;
        let user = inner.users.get_mut(id).ok_or(ApiError::NotFound)?;
        user.password_hash = password_hash;
        user.updated_at = Utc::now();
        Ok(())
    }
}

impl BabyRepository for MemoryStore {
    async fn baby_for_parent(&self, parent: &UserId) -> Result<Option<Baby>, ApiError> {
        Ok(self
            .read()?
            .babies
            .values()
            .find(|b| b.has_parent(parent))
            .cloned())
    }
}

impl EventTypeRepository for MemoryStore {
    async fn list(&self, baby_id: &BabyId) -> Result<Vec<EventType>, ApiError> {
        let inner = self.read()?;
        let mut types: Vec<EventType> = inner
            .event_types
            .values()
            .filter(|t| &t.baby_id == baby_id)
            .cloned()
            .collect();
        types.sort_by(|a, b| (a.order, a.id).cmp(&(b.order, b.id)));
        Ok(types)
    }

    async fn find(&self, id: EventTypeId) -> Result<Option<EventType>, ApiError> {
        Ok(self.read()?.event_types.get(&id).cloned())
    }

    async fn create(
        &self,
        new: NewEventType,
        created_by: &UserId,
    ) -> Result<EventType, ApiError> {
        let now = Utc::now();
        let event_type = EventType {
            id: EventTypeId::new(),
            baby_id: new.baby_id,
            name: new.name,
            active: new.active,
            order: new.order,
            created_by: created_by.clone(),
            created_at: now,
            updated_at: now,
        };
        self.write()?
            .event_types
            .insert(event_type.id, event_type.clone());
        Ok(event_type)
    }

    async fn patch(
        &self,
        id: EventTypeId,
        patch: EventTypePatch,
    ) -> Result<Option<EventType>, ApiError> {
        let mut inner = self.write()?;
        let Some(event_type) = inner.event_types.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            event_type.name = name;
        }
        if let Some(active) = patch.active {
            event_type.active = active;
        }
        if let Some(order) = patch.order {
            event_type.order = order;
        }
        event_type.updated_at = Utc::now();
        Ok(Some(event_type.clone()))
    }

    async fn remove(&self, id: EventTypeId) -> Result<bool, ApiError> {
        Ok(self.write()?.event_types.remove(&id).is_some())
    }
}

impl EventRepository for MemoryStore {
    async fn list(&self, baby_id: &BabyId, page: &PageQuery) -> Result<Page<Event>, ApiError> {
        let cursor = match &page.cursor {
            Some(token) => Some(
                EventCursor::decode(token).map_err(|_| ApiError::validation("invalid cursor"))?,
            ),
            None => None,
        };
        let limit = page.effective_limit();

        let inner = self.read()?;
        let mut events: Vec<&Event> = inner
            .events
            .values()
            .filter(|e| &e.baby_id == baby_id)
            .collect();
        // happened_at descending, id descending as the tiebreak.
        events.sort_by(|a, b| (b.happened_at, b.id).cmp(&(a.happened_at, a.id)));

        let mut after_cursor = events
            .into_iter()
            .filter(|e| cursor.is_none_or(|c| c.is_before(e.happened_at, e.id.0)));
        let items: Vec<Event> = after_cursor.by_ref().take(limit).cloned().collect();
        let has_more = after_cursor.next().is_some();
        let next_cursor = if has_more {
            items.last().map(|e| {
                EventCursor {
                    happened_at: e.happened_at,
                    id: e.id.0,
                }
                .encode()
            })
        } else {
            None
        };
        Ok(Page { items, next_cursor })
    }

    async fn find(&self, id: EventId) -> Result<Option<Event>, ApiError> {
        Ok(self.read()?.events.get(&id).cloned())
    }

    async fn create(&self, new: NewEvent, created_by: &UserId) -> Result<Event, ApiError> {
        // The repository, not the caller, stamps happened_at.
        let now = Utc::now();
        let event = Event {
            id: EventId::new(),
            baby_id: new.baby_id,
            type_id: new.type_id,
            note: new.note,
            happened_at: now,
            created_by: created_by.clone(),
            created_at: now,
            updated_at: now,
        };
        self.write()?.events.insert(event.id, event.clone());
        Ok(event)
    }

    async fn patch(&self, id: EventId, patch: EventPatch) -> Result<Option<Event>, ApiError> {
        let mut inner = self.write()?;
        let Some(event) = inner.events.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(type_id) = patch.type_id {
            event.type_id = type_id;
        }
        if let Some(note) = patch.note {
            event.note = note;
        }
        event.updated_at = Utc::now();
        Ok(Some(event.clone()))
    }

    async fn remove(&self, id: EventId) -> Result<bool, ApiError> {
        Ok(self.write()?.events.remove(&id).is_some())
    }
}
