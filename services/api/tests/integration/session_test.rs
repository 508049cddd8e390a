use axum::http::StatusCode;
use serde_json::{Value, json};

use cradle_session::token::SESSION_TTL_SECS;

use crate::helpers::{
    PARENT_A, PASSWORD, TEST_SECRET, forge_token, now_secs, parent_server, session_cookie,
    test_server,
};

#[tokio::test]
async fn should_sign_in_and_reach_protected_routes() {
    let server = test_server().await;

    let response = server
        .post("/session")
        .json(&json!({ "email": PARENT_A, "password": PASSWORD }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body = response.json::<Value>();
    assert_eq!(body["id"], PARENT_A);

    let me = server.get("/users/@me").await;
    me.assert_status(StatusCode::OK);
    assert_eq!(me.json::<Value>()["id"], PARENT_A);
}

#[tokio::test]
async fn should_never_expose_the_token_in_the_response_body() {
    let server = test_server().await;
    let response = server
        .post("/session")
        .json(&json!({ "email": PARENT_A, "password": PASSWORD }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let cookie = response.cookie("cradle_session");
    assert!(!cookie.value().is_empty());
    assert!(
        !response.text().contains(cookie.value()),
        "token must travel only in the cookie"
    );
}

#[tokio::test]
async fn should_reject_wrong_password_and_unknown_user_identically() {
    let server = test_server().await;

    let wrong_password = server
        .post("/session")
        .json(&json!({ "email": PARENT_A, "password": "nope" }))
        .await;
    let unknown_user = server
        .post("/session")
        .json(&json!({ "email": "mallory@example.com", "password": PASSWORD }))
        .await;

    wrong_password.assert_status(StatusCode::UNAUTHORIZED);
    unknown_user.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.text(), unknown_user.text());
    assert_eq!(wrong_password.json::<Value>()["kind"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn should_reject_requests_without_a_session_cookie() {
    let server = test_server().await;
    let response = server.get("/users/@me").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["kind"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn should_reject_garbage_expired_and_missigned_cookies_identically() {
    let server = test_server().await;
    let now = now_secs();

    let garbage = server
        .get("/users/@me")
        .add_cookie(session_cookie("not-a-token"))
        .await;
    let expired = server
        .get("/users/@me")
        .add_cookie(session_cookie(&forge_token(
            PARENT_A,
            TEST_SECRET,
            now - 120,
            now - 60,
        )))
        .await;
    let missigned = server
        .get("/users/@me")
        .add_cookie(session_cookie(&forge_token(
            PARENT_A,
            "some-other-secret",
            now,
            now + SESSION_TTL_SECS,
        )))
        .await;

    for response in [&garbage, &expired, &missigned] {
        response.assert_status(StatusCode::UNAUTHORIZED);
    }
    assert_eq!(garbage.text(), expired.text());
    assert_eq!(expired.text(), missigned.text());
}

#[tokio::test]
async fn should_drop_access_after_sign_out() {
    let server = parent_server(PARENT_A).await;
    server.get("/users/@me").await.assert_status(StatusCode::OK);

    let response = server.delete("/session").await;
    response.assert_status(StatusCode::NO_CONTENT);

    server
        .get("/users/@me")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_allow_sign_out_without_a_session() {
    let server = test_server().await;
    let response = server.delete("/session").await;
    response.assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn should_reject_a_valid_token_for_a_vanished_user() {
    // Signed with the real secret, but the subject was never seeded. The
    // gate admits the token; the profile lookup rejects the identity.
    let server = test_server().await;
    let now = now_secs();
    let response = server
        .get("/users/@me")
        .add_cookie(session_cookie(&forge_token(
            "mallory@example.com",
            TEST_SECRET,
            now,
            now + SESSION_TTL_SECS,
        )))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["kind"], "UNAUTHENTICATED");
}
