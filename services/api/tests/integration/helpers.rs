use axum::http::StatusCode;
use axum_extra::extract::cookie::Cookie;
use axum_test::TestServer;
use serde_json::{Value, json};

use cradle_api::config::{ApiConfig, BackendKind};
use cradle_api::router::build_router;
use cradle_api::state::AppState;
use cradle_session::cookie::SESSION_COOKIE;
use cradle_session::token::SessionClaims;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const PARENT_A: &str = "anna@example.com";
pub const PARENT_B: &str = "ben@example.com";
pub const PASSWORD: &str = "correct horse battery staple";

pub fn test_config() -> ApiConfig {
    ApiConfig {
        session_secret: TEST_SECRET.to_owned(),
        parent_emails: vec![PARENT_A.to_owned(), PARENT_B.to_owned()],
        seed_password: PASSWORD.to_owned(),
        baby_slug: "laura".to_owned(),
        baby_name: "Laura".to_owned(),
        backend: BackendKind::Memory,
        api_port: 0,
    }
}

/// A server over a freshly seeded state. Cookies set by responses are
/// carried on subsequent requests, like a browser would.
pub async fn test_server() -> TestServer {
    let state = AppState::from_config(&test_config())
        .await
        .expect("seeded state");
    let mut server = TestServer::new(build_router(state)).expect("test server");
    server.save_cookies();
    server
}

pub async fn sign_in(server: &TestServer, email: &str) {
    let response = server
        .post("/session")
        .json(&json!({ "email": email, "password": PASSWORD }))
        .await;
    response.assert_status(StatusCode::CREATED);
}

/// A server already holding a valid session cookie for `email`.
pub async fn parent_server(email: &str) -> TestServer {
    let server = test_server().await;
    sign_in(&server, email).await;
    server
}

/// Sign a raw token directly, bypassing the sign-in flow, to exercise the
/// access gate with tokens the service itself would never have issued.
pub fn forge_token(sub: &str, secret: &str, iat: u64, exp: u64) -> String {
    let claims = SessionClaims {
        sub: sub.to_owned(),
        iat,
        exp,
    };
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn session_cookie(token: &str) -> Cookie<'static> {
    Cookie::new(SESSION_COOKIE.to_owned(), token.to_owned())
}

pub fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

/// Create an event through the API and return its JSON body.
pub async fn create_event(server: &TestServer, type_id: &str, note: Option<&str>) -> Value {
    let mut body = json!({ "type_id": type_id });
    if let Some(note) = note {
        body["note"] = json!(note);
    }
    let response = server.post("/babies/laura/events").json(&body).await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

/// First seeded event type id for the baby, as a string.
pub async fn first_type_id(server: &TestServer) -> String {
    let response = server.get("/babies/laura/event-types").await;
    response.assert_status(StatusCode::OK);
    let types = response.json::<Value>();
    types[0]["id"].as_str().unwrap().to_owned()
}
