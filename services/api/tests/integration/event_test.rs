use std::collections::HashSet;
use std::time::Duration;

use axum::http::StatusCode;
use serde_json::{Value, json};

use cradle_session::token::SESSION_TTL_SECS;

use crate::helpers::{
    PARENT_A, PARENT_B, TEST_SECRET, create_event, first_type_id, forge_token, now_secs,
    parent_server, session_cookie, test_server,
};

#[tokio::test]
async fn should_stamp_happened_at_on_the_server() {
    let server = parent_server(PARENT_A).await;
    let type_id = first_type_id(&server).await;

    let event = create_event(&server, &type_id, Some("120ml")).await;
    assert_eq!(event["created_by"], PARENT_A);
    assert_eq!(event["note"], "120ml");
    assert_eq!(
        event["happened_at"], event["created_at"],
        "happened_at is assigned at creation"
    );
}

#[tokio::test]
async fn should_reject_a_caller_supplied_happened_at() {
    let server = parent_server(PARENT_A).await;
    let type_id = first_type_id(&server).await;

    let response = server
        .post("/babies/laura/events")
        .json(&json!({
            "type_id": type_id,
            "happened_at": "2026-08-23T10:00:00Z",
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "VALIDATION");
}

#[tokio::test]
async fn should_reject_an_event_of_an_unknown_type() {
    let server = parent_server(PARENT_A).await;
    let response = server
        .post("/babies/laura/events")
        .json(&json!({ "type_id": "00000000-0000-0000-0000-000000000009" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "VALIDATION");
}

#[tokio::test]
async fn should_page_newest_first_without_gaps_or_duplicates() {
    let server = parent_server(PARENT_A).await;
    let type_id = first_type_id(&server).await;
    for i in 0..7 {
        create_event(&server, &type_id, Some(&format!("event {i}"))).await;
    }

    let mut seen: Vec<String> = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let mut request = server.get("/babies/laura/events").add_query_param("limit", 3);
        if let Some(ref c) = cursor {
            request = request.add_query_param("cursor", c);
        }
        let response = request.await;
        response.assert_status(StatusCode::OK);
        let page = response.json::<Value>();

        let items = page["items"].as_array().unwrap();
        assert!(items.len() <= 3);
        for item in items {
            seen.push(item["id"].as_str().unwrap().to_owned());
        }
        match page["next_cursor"].as_str() {
            Some(next) => cursor = Some(next.to_owned()),
            None => break,
        }
    }

    assert_eq!(seen.len(), 7);
    let unique: HashSet<&String> = seen.iter().collect();
    assert_eq!(unique.len(), 7, "no duplicates across pages");

    // Newest first: the last created note is on top.
    let first_page = server
        .get("/babies/laura/events")
        .add_query_param("limit", 1)
        .await
        .json::<Value>();
    assert_eq!(first_page["items"][0]["note"], "event 6");
}

#[tokio::test]
async fn should_omit_next_cursor_when_everything_fits() {
    let server = parent_server(PARENT_A).await;
    let type_id = first_type_id(&server).await;
    create_event(&server, &type_id, None).await;

    let page = server.get("/babies/laura/events").await.json::<Value>();
    assert_eq!(page["items"].as_array().unwrap().len(), 1);
    assert!(page.get("next_cursor").is_none());
}

#[tokio::test]
async fn should_reject_a_non_numeric_limit() {
    let server = parent_server(PARENT_A).await;
    let response = server
        .get("/babies/laura/events")
        .add_query_param("limit", "abc")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "VALIDATION");
}

#[tokio::test]
async fn should_reject_a_garbage_cursor() {
    let server = parent_server(PARENT_A).await;
    let response = server
        .get("/babies/laura/events")
        .add_query_param("cursor", "%%%not-a-cursor%%%")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "VALIDATION");
}

#[tokio::test]
async fn should_patch_the_note_without_moving_happened_at() {
    let server = parent_server(PARENT_A).await;
    let type_id = first_type_id(&server).await;
    let event = create_event(&server, &type_id, Some("first")).await;
    let event_id = event["id"].as_str().unwrap();

    tokio::time::sleep(Duration::from_millis(10)).await;
    let response = server
        .patch(&format!("/events/{event_id}"))
        .json(&json!({ "note": "corrected" }))
        .await;
    response.assert_status(StatusCode::OK);

    let patched = response.json::<Value>();
    assert_eq!(patched["note"], "corrected");
    assert_eq!(patched["happened_at"], event["happened_at"]);
    assert_eq!(patched["created_at"], event["created_at"]);
    assert_ne!(patched["updated_at"], event["updated_at"]);
}

#[tokio::test]
async fn should_clear_the_note_with_an_explicit_null() {
    let server = parent_server(PARENT_A).await;
    let type_id = first_type_id(&server).await;
    let event = create_event(&server, &type_id, Some("scratch this")).await;
    let event_id = event["id"].as_str().unwrap();

    let response = server
        .patch(&format!("/events/{event_id}"))
        .json(&json!({ "note": null }))
        .await;
    response.assert_status(StatusCode::OK);

    let patched = response.json::<Value>();
    assert!(patched.get("note").is_none(), "cleared note is omitted");
    assert_eq!(patched["happened_at"], event["happened_at"]);
}

#[tokio::test]
async fn should_reject_a_patch_naming_happened_at_or_audit_fields() {
    let server = parent_server(PARENT_A).await;
    let type_id = first_type_id(&server).await;
    let event = create_event(&server, &type_id, None).await;
    let event_id = event["id"].as_str().unwrap();

    for body in [
        json!({ "happened_at": "2026-08-23T10:00:00Z" }),
        json!({ "created_by": "mallory@example.com" }),
        json!({ "created_at": "2026-08-23T10:00:00Z" }),
    ] {
        let response = server.patch(&format!("/events/{event_id}")).json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["kind"], "VALIDATION");
    }
}

#[tokio::test]
async fn should_let_the_other_parent_read_patch_and_delete() {
    let writer = parent_server(PARENT_A).await;
    let type_id = first_type_id(&writer).await;
    let event = create_event(&writer, &type_id, Some("by anna")).await;
    let event_id = event["id"].as_str().unwrap();

    // Same store, other parent's session.
    let reader = writer;
    reader.delete("/session").await.assert_status(StatusCode::NO_CONTENT);
    crate::helpers::sign_in(&reader, PARENT_B).await;

    let fetched = reader.get(&format!("/events/{event_id}")).await;
    fetched.assert_status(StatusCode::OK);
    assert_eq!(fetched.json::<Value>()["created_by"], PARENT_A);

    let patched = reader
        .patch(&format!("/events/{event_id}"))
        .json(&json!({ "note": "checked by ben" }))
        .await;
    patched.assert_status(StatusCode::OK);
    assert_eq!(
        patched.json::<Value>()["created_by"], PARENT_A,
        "created_by never changes on patch"
    );

    reader
        .delete(&format!("/events/{event_id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    reader
        .get(&format!("/events/{event_id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_refuse_event_access_to_a_non_parent() {
    let server = test_server().await;
    let now = now_secs();
    let response = server
        .get("/babies/laura/events")
        .add_cookie(session_cookie(&forge_token(
            "mallory@example.com",
            TEST_SECRET,
            now,
            now + SESSION_TTL_SECS,
        )))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["kind"], "UNAUTHORIZED");
}

#[tokio::test]
async fn should_return_not_found_for_an_unknown_event() {
    let server = parent_server(PARENT_A).await;
    let response = server
        .get("/events/00000000-0000-0000-0000-000000000009")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let malformed = server.get("/events/not-a-uuid").await;
    malformed.assert_status(StatusCode::BAD_REQUEST);
}
