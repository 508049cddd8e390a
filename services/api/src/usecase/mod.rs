//! The read/write boundary: the only layer that turns a resolved identity
//! into repository calls. Every operation resolves the caller's authorized
//! baby first; an identity with no authorized baby gets `Unauthorized`,
//! never an empty result.

pub mod event;
pub mod event_type;
pub mod session;
pub mod user;

use cradle_domain::id::{BabyId, UserId};

use crate::domain::repository::BabyRepository;
use crate::domain::types::Baby;
use crate::error::ApiError;

/// Resolve the baby `identity` is authorized for, or fail with
/// `Unauthorized` (the identity is known, the scope is not theirs).
pub async fn authorized_baby<B: BabyRepository>(
    babies: &B,
    identity: &UserId,
) -> Result<Baby, ApiError> {
    babies
        .baby_for_parent(identity)
        .await?
        .ok_or(ApiError::Unauthorized)
}

/// Resolve and check that the authorized baby is the one being addressed.
pub async fn authorize_baby<B: BabyRepository>(
    babies: &B,
    identity: &UserId,
    baby_id: &BabyId,
) -> Result<Baby, ApiError> {
    let baby = authorized_baby(babies, identity).await?;
    if &baby.id != baby_id {
        return Err(ApiError::Unauthorized);
    }
    Ok(baby)
}
