use cradle_domain::id::UserId;
use cradle_session::token::{SESSION_TTL_SECS, issue_session};

use crate::domain::repository::AuthRepository;
use crate::domain::types::User;
use crate::error::ApiError;

// ── SignIn ───────────────────────────────────────────────────────────────────

pub struct SignInInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct SignInOutput {
    pub user: User,
    pub token: String,
}

/// Verify a raw credential pair and issue a session token. An unknown
/// identity and a wrong password are rejected identically.
pub struct SignInUseCase<A: AuthRepository> {
    pub auth: A,
    pub session_secret: String,
}

impl<A: AuthRepository> SignInUseCase<A> {
    pub async fn execute(&self, input: SignInInput) -> Result<SignInOutput, ApiError> {
        let user = self
            .auth
            .verify_password(&UserId(input.email), &input.password)
            .await?
            .ok_or(ApiError::Unauthenticated)?;

        let token = issue_session(&user.id.0, &self.session_secret, SESSION_TTL_SECS)
            .map_err(|e| anyhow::anyhow!("sign session token: {e}"))?;

        Ok(SignInOutput { user, token })
    }
}

// Sign-out has no usecase: the session is a bearer cookie, so clearing it
// is purely a transport concern handled in the session handler.
