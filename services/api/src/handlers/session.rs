use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use cradle_session::cookie::{clear_session_cookie, set_session_cookie};

use crate::error::ApiError;
use crate::extract::Json;
use crate::handlers::user::UserResponse;
use crate::state::AppState;
use crate::usecase::session::{SignInInput, SignInUseCase};

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// POST /session
///
/// Verifies the credential pair and sets the session cookie. The token is
/// never exposed in the body; the cookie is its only channel.
pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<SignInRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = SignInUseCase {
        auth: state.auth_repo(),
        session_secret: state.session_secret.clone(),
    };
    let output = usecase
        .execute(SignInInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    let jar = set_session_cookie(jar, output.token);
    Ok((
        StatusCode::CREATED,
        jar,
        Json(UserResponse::from(output.user)),
    ))
}

/// DELETE /session
///
/// Deliberately unguarded: clearing a session that was never set is a
/// no-op, so there is nothing to authenticate.
pub async fn sign_out(jar: CookieJar) -> impl IntoResponse {
    (StatusCode::NO_CONTENT, clear_session_cookie(jar))
}
