//! HTTP-level integration tests for the `/questions`, `/dorms` and `/auth` endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router.
//! Users and dorms are seeded through the db layer; everything else goes
//! through HTTP.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, build_test_app, seed_dorm, seed_user, send, test_pool, token_for};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: requests without a bearer token are rejected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn questions_require_authentication() {
    let app = build_test_app(test_pool().await);

    let response = send(&app, Method::GET, "/api/v1/questions", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "missing_token");

    let response = send(&app, Method::GET, "/api/v1/questions", Some("garbage"), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_needs_no_token() {
    let app = build_test_app(test_pool().await);
    let response = send(&app, Method::GET, "/api/v1/health", None, None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

// ---------------------------------------------------------------------------
// Test: full create → edit → vote → delete scenario
// ---------------------------------------------------------------------------

#[tokio::test]
async fn laundry_scenario_over_http() {
    let pool = test_pool().await;
    let alice = seed_user(&pool, "alice", false).await;
    let token = token_for(&alice);
    let app = build_test_app(pool);

    // Too short
    let response = send(
        &app,
        Method::POST,
        "/api/v1/questions",
        Some(&token),
        Some(json!({ "title": "Hi" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "bad_request");

    // Create (legacy "title" key, anonymous by default)
    let response = send(
        &app,
        Method::POST,
        "/api/v1/questions",
        Some(&token),
        Some(json!({ "title": "Is laundry free?" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let original = body_json(response).await;
    let original_id = original["id"].as_str().unwrap().to_string();
    assert_eq!(original["is_anonymous"], true);
    assert!(original.get("author_id").is_none());

    let response = send(&app, Method::GET, "/api/v1/questions", Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    assert_eq!(listed["questions"].as_array().unwrap().len(), 1);
    assert_eq!(listed["questions"][0]["id"], original_id.as_str());

    // Edit
    let response = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/questions/{original_id}"),
        Some(&token),
        Some(json!({ "body": "Is laundry free here?" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let edited = body_json(response).await;
    let edited_id = edited["id"].as_str().unwrap().to_string();
    assert_ne!(edited_id, original_id);
    assert_eq!(edited["previous_versions"].as_array().unwrap().len(), 1);
    assert_eq!(edited["previous_versions"][0]["id"], original_id.as_str());

    let listed = body_json(send(&app, Method::GET, "/api/v1/questions", Some(&token), None).await).await;
    let ids: Vec<_> = listed["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec![edited_id.clone()]);

    // The superseded version is gone for reads and locked for writes
    let response = send(
        &app,
        Method::GET,
        &format!("/api/v1/questions/{original_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/questions/{original_id}"),
        Some(&token),
        Some(json!({ "body": "Yet another edit" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Vote twice
    for _ in 0..2 {
        let response = send(
            &app,
            Method::POST,
            &format!("/api/v1/questions/{edited_id}/vote"),
            Some(&token),
            Some(json!({ "value": "POSITIVE" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let votes_uri = format!("/api/v1/questions/{edited_id}/votes");
    let tally = body_json(send(&app, Method::GET, &votes_uri, Some(&token), None).await).await;
    assert_eq!(tally, json!({ "positive": 1, "negative": 0, "score": 1 }));

    // Delete removes both versions
    let response = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/questions/{edited_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let listed = body_json(send(&app, Method::GET, "/api/v1/questions", Some(&token), None).await).await;
    assert!(listed["questions"].as_array().unwrap().is_empty());

    let response = send(&app, Method::GET, &votes_uri, Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: votes other than "POSITIVE" count as negative
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unrecognised_vote_values_count_as_negative() {
    let pool = test_pool().await;
    let alice = seed_user(&pool, "alice", false).await;
    let bob = seed_user(&pool, "bob", false).await;
    let app = build_test_app(pool);

    let created = body_json(
        send(
            &app,
            Method::POST,
            "/api/v1/questions",
            Some(&token_for(&alice)),
            Some(json!({ "body": "Is laundry free?" })),
        )
        .await,
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let response = send(
        &app,
        Method::POST,
        &format!("/api/v1/questions/{id}/vote"),
        Some(&token_for(&bob)),
        Some(json!({ "value": "maybe" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let tally = body_json(
        send(
            &app,
            Method::GET,
            &format!("/api/v1/questions/{id}/votes"),
            Some(&token_for(&alice)),
            None,
        )
        .await,
    )
    .await;
    assert_eq!(tally["negative"], 1);
    assert_eq!(tally["positive"], 0);
}

// ---------------------------------------------------------------------------
// Test: authorship visibility and ownership
// ---------------------------------------------------------------------------

#[tokio::test]
async fn named_questions_expose_author() {
    let pool = test_pool().await;
    let alice = seed_user(&pool, "alice", false).await;
    let app = build_test_app(pool);

    let response = send(
        &app,
        Method::POST,
        "/api/v1/questions",
        Some(&token_for(&alice)),
        Some(json!({ "body": "Who runs the kitchen?", "is_anonymous": false })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["author_id"], alice.user_id.as_str());
}

#[tokio::test]
async fn other_users_get_not_found_and_admins_may_moderate() {
    let pool = test_pool().await;
    let alice = seed_user(&pool, "alice", false).await;
    let bob = seed_user(&pool, "bob", false).await;
    let admin = seed_user(&pool, "admin", true).await;
    let app = build_test_app(pool);

    let created = body_json(
        send(
            &app,
            Method::POST,
            "/api/v1/questions",
            Some(&token_for(&alice)),
            Some(json!({ "body": "Is laundry free?" })),
        )
        .await,
    )
    .await;
    let uri = format!("/api/v1/questions/{}", created["id"].as_str().unwrap());

    let response = send(
        &app,
        Method::PATCH,
        &uri,
        Some(&token_for(&bob)),
        Some(json!({ "body": "Bob rewrote this" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, Method::DELETE, &uri, Some(&token_for(&bob)), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, Method::DELETE, &uri, Some(&token_for(&admin)), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// ---------------------------------------------------------------------------
// Test: dorm scoping and search through query parameters
// ---------------------------------------------------------------------------

#[tokio::test]
async fn dorm_and_search_query_parameters() {
    let pool = test_pool().await;
    let alice = seed_user(&pool, "alice", false).await;
    let dorm_id = seed_dorm(&pool, "North Hall").await;
    let token = token_for(&alice);
    let app = build_test_app(pool);

    let response = send(
        &app,
        Method::POST,
        "/api/v1/questions",
        Some(&token),
        Some(json!({ "title": "Is the North laundry free?", "dorm": dorm_id })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(
        &app,
        Method::POST,
        "/api/v1/questions",
        Some(&token),
        Some(json!({ "body": "Where do I park bikes?", "dorm_id": dorm_id })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(
        &app,
        Method::POST,
        "/api/v1/questions",
        Some(&token),
        Some(json!({ "body": "Is this dorm real?", "dorm_id": "no-such-dorm" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Nothing in the general scope
    let general = body_json(send(&app, Method::GET, "/api/v1/questions", Some(&token), None).await).await;
    assert!(general["questions"].as_array().unwrap().is_empty());

    let scoped = body_json(
        send(
            &app,
            Method::GET,
            &format!("/api/v1/questions?dorm={dorm_id}"),
            Some(&token),
            None,
        )
        .await,
    )
    .await;
    assert_eq!(scoped["questions"].as_array().unwrap().len(), 2);

    let searched = body_json(
        send(
            &app,
            Method::GET,
            &format!("/api/v1/questions?dorm={dorm_id}&search=LAUNDRY"),
            Some(&token),
            None,
        )
        .await,
    )
    .await;
    let hits = searched["questions"].as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["body"], "Is the North laundry free?");
}

#[tokio::test]
async fn only_admins_create_dorms() {
    let pool = test_pool().await;
    let alice = seed_user(&pool, "alice", false).await;
    let admin = seed_user(&pool, "admin", true).await;
    let app = build_test_app(pool);

    let response = send(
        &app,
        Method::POST,
        "/api/v1/dorms",
        Some(&token_for(&alice)),
        Some(json!({ "name": "West Hall" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(
        &app,
        Method::POST,
        "/api/v1/dorms",
        Some(&token_for(&admin)),
        Some(json!({ "name": "West Hall" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(
        &app,
        Method::POST,
        "/api/v1/dorms",
        Some(&token_for(&admin)),
        Some(json!({ "name": "West Hall" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let dorms = body_json(send(&app, Method::GET, "/api/v1/dorms", Some(&token_for(&alice)), None).await).await;
    assert_eq!(dorms["dorms"][0]["name"], "West Hall");
}

// ---------------------------------------------------------------------------
// Test: register → login → me
// ---------------------------------------------------------------------------

#[tokio::test]
async fn register_login_and_me() {
    let app = build_test_app(test_pool().await);

    let response = send(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({ "username": "dana", "password": "correct horse" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let registered = body_json(response).await;
    assert_eq!(registered["user"]["is_admin"], false);
    assert!(registered["user"].get("password_hash").is_none());

    let response = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "username": "dana", "password": "wrong password" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "username": "dana", "password": "correct horse" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let token = body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string();

    let me = body_json(send(&app, Method::GET, "/api/v1/auth/me", Some(&token), None).await).await;
    assert_eq!(me["username"], "dana");
}
