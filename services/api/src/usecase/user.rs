use cradle_domain::id::UserId;

use crate::domain::repository::{AuthRepository, BabyRepository};
use crate::domain::types::{Baby, User};
use crate::error::ApiError;
use crate::usecase::authorized_baby;

// ── GetMe ────────────────────────────────────────────────────────────────────

pub struct GetMeUseCase<A: AuthRepository> {
    pub auth: A,
}

impl<A: AuthRepository> GetMeUseCase<A> {
    /// A verified session whose user no longer exists is rejected the same
    /// way as no session at all.
    pub async fn execute(&self, identity: &UserId) -> Result<User, ApiError> {
        self.auth
            .find_user(identity)
            .await?
            .ok_or(ApiError::Unauthenticated)
    }
}

// ── ChangePassword ───────────────────────────────────────────────────────────

pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
}

/// Replace the caller's password after re-verifying the current one. Both
/// raw values are discarded once hashed/checked by the repository.
pub struct ChangePasswordUseCase<A: AuthRepository> {
    pub auth: A,
}

impl<A: AuthRepository> ChangePasswordUseCase<A> {
    pub async fn execute(
        &self,
        identity: &UserId,
        input: ChangePasswordInput,
    ) -> Result<(), ApiError> {
        if input.new_password.is_empty() {
            return Err(ApiError::validation("new password must not be empty"));
        }
        self.auth
            .verify_password(identity, &input.current_password)
            .await?
            .ok_or(ApiError::Unauthenticated)?;
        self.auth
            .replace_password(identity, &input.new_password)
            .await
    }
}

// ── GetBaby ──────────────────────────────────────────────────────────────────

pub struct GetBabyUseCase<B: BabyRepository> {
    pub babies: B,
}

impl<B: BabyRepository> GetBabyUseCase<B> {
    pub async fn execute(&self, identity: &UserId) -> Result<Baby, ApiError> {
        authorized_baby(&self.babies, identity).await
    }
}
