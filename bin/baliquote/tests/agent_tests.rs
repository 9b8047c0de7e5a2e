mod common;

use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::StatusCode;
use axum_test::TestServer;
use common::{
    bearer, create_offline_app_state, create_test_app, create_test_app_state, mint_token,
    seed_agent, SESSION_COOKIE,
};
use serde_json::json;
use serial_test::serial;
use uuid::Uuid;

#[tokio::test]
#[serial]
async fn protected_routes_require_a_session_token() {
    let server = TestServer::new(create_test_app(create_offline_app_state())).unwrap();

    server.get("/api/quotes").await.assert_status(StatusCode::UNAUTHORIZED);
    server.get("/api/agents/me").await.assert_status(StatusCode::UNAUTHORIZED);

    server
        .get("/api/admin/agents")
        .add_header(AUTHORIZATION, "Token abc")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn token_signed_with_another_secret_is_rejected() {
    let server = TestServer::new(create_test_app(create_offline_app_state())).unwrap();

    let forged = {
        use jsonwebtoken::{encode, EncodingKey, Header};
        let claims = json!({
            "sub": Uuid::new_v4().to_string(),
            "aud": "authenticated",
            "exp": chrono::Utc::now().timestamp() + 3600,
        });
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"some-other-secret-of-at-least-32-chars"),
        )
        .unwrap()
    };

    server
        .get("/api/clients")
        .add_header(AUTHORIZATION, bearer(&forged))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn onboarding_is_idempotent_and_waits_for_approval() {
    let Some(state) = create_test_app_state() else {
        return;
    };
    let server = TestServer::new(create_test_app(state.clone())).unwrap();

    let user_id = Uuid::new_v4();
    let token = mint_token(user_id, "Ketut@Example.com");

    let res = server
        .post("/api/agents/me")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({ "full_name": "Ketut Sari", "default_markup_percent": 12.5 }))
        .await;
    res.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = res.json();
    assert_eq!(body["is_approved"], false);
    assert_eq!(body["email"], "ketut@example.com");
    assert_eq!(body["default_markup_percent"], 12.5);

    server
        .post("/api/agents/me")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({ "full_name": "Someone Else" }))
        .await
        .assert_status(StatusCode::OK);

    // the session cookie works as well as the header
    let res = server
        .get("/api/agents/me")
        .add_header(COOKIE, format!("{}={}", SESSION_COOKIE, token))
        .await;
    res.assert_status(StatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>()["full_name"], "Ketut Sari");

    server
        .get("/api/quotes")
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let (_, admin_token) = seed_agent(&state, true, true);
    let res = server
        .get("/api/admin/agents?pending_only=true")
        .add_header(AUTHORIZATION, bearer(&admin_token))
        .await;
    res.assert_status(StatusCode::OK);
    let pending: serde_json::Value = res.json();
    assert_eq!(pending["agents"].as_array().unwrap().len(), 1);

    server
        .post(&format!("/api/admin/agents/{}/approve", user_id))
        .add_header(AUTHORIZATION, bearer(&admin_token))
        .await
        .assert_status(StatusCode::OK);

    server
        .get("/api/quotes")
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .assert_status(StatusCode::OK);

    let res = server
        .get("/api/notifications")
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    res.assert_status(StatusCode::OK);
    let inbox: serde_json::Value = res.json();
    assert_eq!(inbox["unread"], 1);
    assert_eq!(inbox["notifications"][0]["kind"], "agent_approved");
}

#[tokio::test]
#[serial]
async fn admin_routes_reject_regular_agents() {
    let Some(state) = create_test_app_state() else {
        return;
    };
    let server = TestServer::new(create_test_app(state.clone())).unwrap();

    let (agent, token) = seed_agent(&state, true, false);

    server
        .get("/api/admin/payments/pending")
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let (admin, admin_token) = seed_agent(&state, true, true);

    server
        .post(&format!("/api/admin/agents/{}/revoke", admin.id))
        .add_header(AUTHORIZATION, bearer(&admin_token))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .post(&format!("/api/admin/agents/{}/revoke", agent.id))
        .add_header(AUTHORIZATION, bearer(&admin_token))
        .await
        .assert_status(StatusCode::OK);

    server
        .get("/api/clients")
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}
