use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cradle_core::serde::to_rfc3339_ms;
use cradle_domain::id::{BabyId, EventId, EventTypeId};
use cradle_domain::pagination::{Page, PageQuery};
use cradle_session::identity::Identity;

use crate::domain::types::{Event, EventPatch};
use crate::error::ApiError;
use crate::extract::{Json, Query};
use crate::state::AppState;
use crate::usecase::event::{
    CreateEventInput, CreateEventUseCase, DeleteEventUseCase, GetEventUseCase, ListEventsUseCase,
    UpdateEventUseCase,
};

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub id: EventId,
    pub baby_id: String,
    pub type_id: EventTypeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub happened_at: DateTime<Utc>,
    pub created_by: String,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Event> for EventResponse {
    fn from(e: Event) -> Self {
        Self {
            id: e.id,
            baby_id: e.baby_id.0,
            type_id: e.type_id,
            note: e.note,
            happened_at: e.happened_at,
            created_by: e.created_by.0,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// Create body. No `happened_at`: the server stamps it.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateEventRequest {
    pub type_id: EventTypeId,
    pub note: Option<String>,
}

/// Patch body. `happened_at` and the audit fields are not patchable, so a
/// payload naming them is rejected at deserialization. `note` keeps the
/// absent/null distinction: an explicit `null` clears the note, an absent
/// field leaves it alone.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateEventRequest {
    pub type_id: Option<EventTypeId>,
    #[serde(default, deserialize_with = "present")]
    pub note: Option<Option<String>>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

fn parse_event_id(raw: &str) -> Result<EventId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::validation("invalid event id"))
}

/// GET /babies/{baby_id}/events?limit=&cursor=
pub async fn list_events(
    identity: Identity,
    State(state): State<AppState>,
    Path(baby_id): Path<String>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Page<EventResponse>>, ApiError> {
    let usecase = ListEventsUseCase {
        events: state.event_repo(),
        babies: state.baby_repo(),
    };
    let events = usecase
        .execute(&identity.user_id, &BabyId(baby_id), &page)
        .await?;
    Ok(Json(events.map_items(EventResponse::from)))
}

/// POST /babies/{baby_id}/events
pub async fn create_event(
    identity: Identity,
    State(state): State<AppState>,
    Path(baby_id): Path<String>,
    Json(body): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = CreateEventUseCase {
        events: state.event_repo(),
        types: state.event_type_repo(),
        babies: state.baby_repo(),
    };
    let created = usecase
        .execute(
            &identity.user_id,
            &BabyId(baby_id),
            CreateEventInput {
                type_id: body.type_id,
                note: body.note,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(EventResponse::from(created))))
}

/// GET /events/{event_id}
pub async fn get_event(
    identity: Identity,
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<EventResponse>, ApiError> {
    let event_id = parse_event_id(&event_id)?;
    let usecase = GetEventUseCase {
        events: state.event_repo(),
        babies: state.baby_repo(),
    };
    let event = usecase.execute(&identity.user_id, event_id).await?;
    Ok(Json(EventResponse::from(event)))
}

/// PATCH /events/{event_id}
pub async fn update_event(
    identity: Identity,
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Json(body): Json<UpdateEventRequest>,
) -> Result<Json<EventResponse>, ApiError> {
    let event_id = parse_event_id(&event_id)?;
    let usecase = UpdateEventUseCase {
        events: state.event_repo(),
        types: state.event_type_repo(),
        babies: state.baby_repo(),
    };
    let patched = usecase
        .execute(
            &identity.user_id,
            event_id,
            EventPatch {
                type_id: body.type_id,
                note: body.note,
            },
        )
        .await?;
    Ok(Json(EventResponse::from(patched)))
}

/// DELETE /events/{event_id}
pub async fn delete_event(
    identity: Identity,
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let event_id = parse_event_id(&event_id)?;
    let usecase = DeleteEventUseCase {
        events: state.event_repo(),
        babies: state.baby_repo(),
    };
    usecase.execute(&identity.user_id, event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
