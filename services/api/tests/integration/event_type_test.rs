use axum::http::StatusCode;
use serde_json::{Value, json};

use cradle_session::token::SESSION_TTL_SECS;

use crate::helpers::{
    PARENT_A, PARENT_B, TEST_SECRET, forge_token, now_secs, parent_server, session_cookie,
    test_server,
};

#[tokio::test]
async fn should_list_seeded_types_in_presentation_order() {
    let server = parent_server(PARENT_A).await;
    let response = server.get("/babies/laura/event-types").await;
    response.assert_status(StatusCode::OK);

    let types = response.json::<Value>();
    let names: Vec<&str> = types
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Feeding", "Sleep", "Diaper change", "Bath"]);
    assert!(
        types
            .as_array()
            .unwrap()
            .iter()
            .all(|t| t["active"] == true)
    );
}

#[tokio::test]
async fn should_create_a_type_and_show_it_in_the_list() {
    let server = parent_server(PARENT_B).await;

    let response = server
        .post("/babies/laura/event-types")
        .json(&json!({ "name": "Tummy time", "order": 5 }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let created = response.json::<Value>();
    assert_eq!(created["name"], "Tummy time");
    assert_eq!(created["active"], true, "active defaults to true");
    assert_eq!(created["created_by"], PARENT_B);

    let list = server.get("/babies/laura/event-types").await.json::<Value>();
    assert_eq!(list.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn should_reject_a_blank_name() {
    let server = parent_server(PARENT_A).await;
    let response = server
        .post("/babies/laura/event-types")
        .json(&json!({ "name": "   ", "order": 5 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "VALIDATION");
}

#[tokio::test]
async fn should_patch_only_allow_listed_fields() {
    let server = parent_server(PARENT_A).await;
    let type_id = crate::helpers::first_type_id(&server).await;

    let response = server
        .patch(&format!("/event-types/{type_id}"))
        .json(&json!({ "name": "Bottle", "active": false }))
        .await;
    response.assert_status(StatusCode::OK);

    let patched = response.json::<Value>();
    assert_eq!(patched["name"], "Bottle");
    assert_eq!(patched["active"], false);
    assert_eq!(patched["created_by"], PARENT_A);
}

#[tokio::test]
async fn should_reject_a_patch_naming_audit_fields() {
    let server = parent_server(PARENT_A).await;
    let type_id = crate::helpers::first_type_id(&server).await;

    let response = server
        .patch(&format!("/event-types/{type_id}"))
        .json(&json!({ "name": "Bottle", "created_by": "mallory@example.com" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "VALIDATION");
}

#[tokio::test]
async fn should_reject_an_empty_patch() {
    let server = parent_server(PARENT_A).await;
    let type_id = crate::helpers::first_type_id(&server).await;

    let response = server
        .patch(&format!("/event-types/{type_id}"))
        .json(&json!({}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_delete_a_type_and_miss_on_the_second_attempt() {
    let server = parent_server(PARENT_A).await;
    let type_id = crate::helpers::first_type_id(&server).await;
    let path = format!("/event-types/{type_id}");

    server.delete(&path).await.assert_status(StatusCode::NO_CONTENT);

    let second = server.delete(&path).await;
    second.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(second.json::<Value>()["kind"], "NOT_FOUND");
}

#[tokio::test]
async fn should_reject_a_malformed_type_id() {
    let server = parent_server(PARENT_A).await;
    let response = server.delete("/event-types/not-a-uuid").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_refuse_type_management_to_a_non_parent() {
    let server = test_server().await;
    let now = now_secs();
    let cookie = session_cookie(&forge_token(
        "mallory@example.com",
        TEST_SECRET,
        now,
        now + SESSION_TTL_SECS,
    ));

    let response = server
        .post("/babies/laura/event-types")
        .add_cookie(cookie)
        .json(&json!({ "name": "Walk", "order": 9 }))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["kind"], "UNAUTHORIZED");
}
