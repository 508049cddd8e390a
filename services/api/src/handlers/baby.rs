use axum::extract::State;
use serde::Serialize;

use cradle_session::identity::Identity;

use crate::domain::types::Baby;
use crate::error::ApiError;
use crate::extract::Json;
use crate::state::AppState;
use crate::usecase::user::GetBabyUseCase;

#[derive(Debug, Serialize)]
pub struct BabyResponse {
    pub id: String,
    pub name: String,
    pub parents: Vec<String>,
}

impl From<Baby> for BabyResponse {
    fn from(baby: Baby) -> Self {
        Self {
            id: baby.id.0,
            name: baby.name,
            parents: baby.parents.into_iter().map(|p| p.0).collect(),
        }
    }
}

/// GET /baby — the single baby the caller is a parent of.
pub async fn get_baby(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<BabyResponse>, ApiError> {
    let usecase = GetBabyUseCase {
        babies: state.baby_repo(),
    };
    let baby = usecase.execute(&identity.user_id).await?;
    Ok(Json(BabyResponse::from(baby)))
}
