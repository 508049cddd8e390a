use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cradle_core::serde::to_rfc3339_ms;
use cradle_domain::id::{BabyId, EventTypeId};
use cradle_session::identity::Identity;

use crate::domain::types::{EventType, EventTypePatch};
use crate::error::ApiError;
use crate::extract::Json;
use crate::state::AppState;
use crate::usecase::event_type::{
    CreateEventTypeInput, CreateEventTypeUseCase, DeleteEventTypeUseCase, ListEventTypesUseCase,
    UpdateEventTypeUseCase,
};

#[derive(Debug, Serialize)]
pub struct EventTypeResponse {
    pub id: EventTypeId,
    pub baby_id: String,
    pub name: String,
    pub active: bool,
    pub order: i32,
    pub created_by: String,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<EventType> for EventTypeResponse {
    fn from(t: EventType) -> Self {
        Self {
            id: t.id,
            baby_id: t.baby_id.0,
            name: t.name,
            active: t.active,
            order: t.order,
            created_by: t.created_by.0,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

fn default_active() -> bool {
    true
}

/// Create body. Unknown fields are rejected so callers cannot smuggle in
/// audit fields.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateEventTypeRequest {
    pub name: String,
    #[serde(default = "default_active")]
    pub active: bool,
    pub order: i32,
}

/// Patch body. Same allow-list rule as the create body: a payload naming
/// any other field fails deserialization outright.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateEventTypeRequest {
    pub name: Option<String>,
    pub active: Option<bool>,
    pub order: Option<i32>,
}

fn parse_type_id(raw: &str) -> Result<EventTypeId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::validation("invalid event type id"))
}

/// GET /babies/{baby_id}/event-types
pub async fn list_event_types(
    identity: Identity,
    State(state): State<AppState>,
    Path(baby_id): Path<String>,
) -> Result<Json<Vec<EventTypeResponse>>, ApiError> {
    let usecase = ListEventTypesUseCase {
        types: state.event_type_repo(),
        babies: state.baby_repo(),
    };
    let types = usecase
        .execute(&identity.user_id, &BabyId(baby_id))
        .await?;
    Ok(Json(types.into_iter().map(Into::into).collect()))
}

/// POST /babies/{baby_id}/event-types
pub async fn create_event_type(
    identity: Identity,
    State(state): State<AppState>,
    Path(baby_id): Path<String>,
    Json(body): Json<CreateEventTypeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = CreateEventTypeUseCase {
        types: state.event_type_repo(),
        babies: state.baby_repo(),
    };
    let created = usecase
        .execute(
            &identity.user_id,
            &BabyId(baby_id),
            CreateEventTypeInput {
                name: body.name,
                active: body.active,
                order: body.order,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(EventTypeResponse::from(created))))
}

/// PATCH /event-types/{type_id}
pub async fn update_event_type(
    identity: Identity,
    State(state): State<AppState>,
    Path(type_id): Path<String>,
    Json(body): Json<UpdateEventTypeRequest>,
) -> Result<Json<EventTypeResponse>, ApiError> {
    let type_id = parse_type_id(&type_id)?;
    let usecase = UpdateEventTypeUseCase {
        types: state.event_type_repo(),
        babies: state.baby_repo(),
    };
    let patched = usecase
        .execute(
            &identity.user_id,
            type_id,
            EventTypePatch {
                name: body.name,
                active: body.active,
                order: body.order,
            },
        )
        .await?;
    Ok(Json(EventTypeResponse::from(patched)))
}

/// DELETE /event-types/{type_id}
pub async fn delete_event_type(
    identity: Identity,
    State(state): State<AppState>,
    Path(type_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let type_id = parse_type_id(&type_id)?;
    let usecase = DeleteEventTypeUseCase {
        types: state.event_type_repo(),
        babies: state.baby_repo(),
    };
    usecase.execute(&identity.user_id, type_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
