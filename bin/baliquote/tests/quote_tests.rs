mod common;

use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use axum_test::TestServer;
use baliquote_primitives::models::entities::enum_types::CurrencyCode;
use common::fixtures::{create_quote_body, random_client, FIXTURE_SUBTOTAL_IDR};
use common::{bearer, create_test_app, create_test_app_state, seed_agent, seed_rate};
use serde_json::{json, Value};
use serial_test::serial;

#[tokio::test]
#[serial]
async fn create_quote_prices_in_rupiah_with_default_markup() {
    let Some(state) = create_test_app_state() else {
        return;
    };
    let server = TestServer::new(create_test_app(state.clone())).unwrap();
    let (_, token) = seed_agent(&state, true, false);

    let res = server
        .post("/api/quotes")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&create_quote_body(random_client(), "IDR"))
        .await;
    res.assert_status(StatusCode::CREATED);

    let body: Value = res.json();
    let quote = &body["quote"];
    assert_eq!(quote["status"], "draft");
    assert_eq!(quote["is_priced"], true);
    assert_eq!(quote["subtotal_idr"], FIXTURE_SUBTOTAL_IDR);
    assert_eq!(quote["markup_idr"], 1_297_500);
    assert_eq!(quote["total_price_idr"], 9_947_500);
    assert_eq!(quote["total_price_display"], 9_947_500.0);
    assert!(quote["quote_number"].as_str().unwrap().starts_with("Q-"));

    assert_eq!(body["hotels"].as_array().unwrap().len(), 1);
    assert_eq!(body["days"][0]["options"].as_array().unwrap().len(), 2);
    assert_eq!(body["extras"].as_array().unwrap().len(), 1);
}

#[tokio::test]
#[serial]
async fn repeated_client_email_reuses_the_client() {
    let Some(state) = create_test_app_state() else {
        return;
    };
    let server = TestServer::new(create_test_app(state.clone())).unwrap();
    let (_, token) = seed_agent(&state, true, false);

    let client = json!({ "full_name": "Sarah Thompson", "email": "sarah@example.com" });
    let shouting = json!({ "full_name": "Sarah T", "email": "SARAH@example.com" });

    let first: Value = server
        .post("/api/quotes")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&create_quote_body(client, "IDR"))
        .await
        .json();
    let second: Value = server
        .post("/api/quotes")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&create_quote_body(shouting, "IDR"))
        .await
        .json();

    assert_eq!(first["client"]["id"], second["client"]["id"]);

    let clients: Value = server
        .get("/api/clients")
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .json();
    assert_eq!(clients["clients"].as_array().unwrap().len(), 1);

    // a client with quotes cannot be deleted
    server
        .delete(&format!("/api/clients/{}", first["client"]["id"].as_str().unwrap()))
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
#[serial]
async fn missing_rate_leaves_quote_unpriced_until_repriced() {
    let Some(state) = create_test_app_state() else {
        return;
    };
    let server = TestServer::new(create_test_app(state.clone())).unwrap();
    let (_, token) = seed_agent(&state, true, false);

    let res = server
        .post("/api/quotes")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&create_quote_body(random_client(), "USD"))
        .await;
    res.assert_status(StatusCode::CREATED);
    let body: Value = res.json();
    assert_eq!(body["quote"]["is_priced"], false);
    assert_eq!(body["quote"]["total_price_idr"], 0);

    let quote_id = body["quote"]["id"].as_str().unwrap().to_string();

    server
        .post(&format!("/api/quotes/{}/send", quote_id))
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .post(&format!("/api/quotes/{}/price", quote_id))
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    seed_rate(&state, CurrencyCode::USD, 16_250.0);

    let res = server
        .post(&format!("/api/quotes/{}/price", quote_id))
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    res.assert_status(StatusCode::OK);
    let priced: Value = res.json();
    assert_eq!(priced["quote"]["is_priced"], true);
    assert_eq!(priced["quote"]["exchange_rate_snapshot"], 16_250.0);
    // 9_947_500 / 16_250 = 612.153...
    assert_eq!(priced["quote"]["total_price_display"], 612.15);
}

#[tokio::test]
#[serial]
async fn lifecycle_send_edit_and_void() {
    let Some(state) = create_test_app_state() else {
        return;
    };
    let server = TestServer::new(create_test_app(state.clone())).unwrap();
    let (_, token) = seed_agent(&state, true, false);

    let body: Value = server
        .post("/api/quotes")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&create_quote_body(random_client(), "IDR"))
        .await
        .json();
    let quote_id = body["quote"]["id"].as_str().unwrap().to_string();

    let sent: Value = server
        .post(&format!("/api/quotes/{}/send", quote_id))
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .json();
    assert_eq!(sent["quote"]["status"], "sent");
    assert!(!sent["quote"]["sent_at"].is_null());

    // only drafts can be deleted
    server
        .delete(&format!("/api/quotes/{}", quote_id))
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // editing a sent quote reopens it as a draft
    let res = server
        .patch(&format!("/api/quotes/{}", quote_id))
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({ "markup_percent": 10.0 }))
        .await;
    res.assert_status(StatusCode::OK);
    let edited: Value = res.json();
    assert_eq!(edited["quote"]["status"], "draft");
    assert_eq!(edited["quote"]["markup_idr"], 865_000);

    let voided: Value = server
        .post(&format!("/api/quotes/{}/void", quote_id))
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .json();
    assert_eq!(voided["quote"]["status"], "void");

    server
        .post(&format!("/api/quotes/{}/send", quote_id))
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[serial]
async fn agents_cannot_see_each_others_quotes() {
    let Some(state) = create_test_app_state() else {
        return;
    };
    let server = TestServer::new(create_test_app(state.clone())).unwrap();
    let (_, owner_token) = seed_agent(&state, true, false);
    let (_, other_token) = seed_agent(&state, true, false);

    let body: Value = server
        .post("/api/quotes")
        .add_header(AUTHORIZATION, bearer(&owner_token))
        .json(&create_quote_body(random_client(), "IDR"))
        .await
        .json();
    let quote_id = body["quote"]["id"].as_str().unwrap();

    server
        .get(&format!("/api/quotes/{}", quote_id))
        .add_header(AUTHORIZATION, bearer(&other_token))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let listed: Value = server
        .get("/api/quotes")
        .add_header(AUTHORIZATION, bearer(&other_token))
        .await
        .json();
    assert!(listed["quotes"].as_array().unwrap().is_empty());
}

#[tokio::test]
#[serial]
async fn invalid_quote_input_is_rejected() {
    let Some(state) = create_test_app_state() else {
        return;
    };
    let server = TestServer::new(create_test_app(state.clone())).unwrap();
    let (_, token) = seed_agent(&state, true, false);

    let mut body = create_quote_body(random_client(), "IDR");
    body["items"]["hotels"][0]["check_out"] = body["items"]["hotels"][0]["check_in"].clone();

    server
        .post("/api/quotes")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&body)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[serial]
async fn edit_refuses_validity_in_the_past() {
    let Some(state) = create_test_app_state() else {
        return;
    };
    let server = TestServer::new(create_test_app(state.clone())).unwrap();
    let (_, token) = seed_agent(&state, true, false);

    let created: Value = server
        .post("/api/quotes")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&create_quote_body(random_client(), "IDR"))
        .await
        .json();
    let quote_id = created["quote"]["id"].as_str().unwrap().to_string();

    let yesterday = (chrono::Utc::now().date_naive() - chrono::Duration::days(1)).to_string();
    server
        .patch(&format!("/api/quotes/{}", quote_id))
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({ "valid_until": yesterday }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let tomorrow = (chrono::Utc::now().date_naive() + chrono::Duration::days(1)).to_string();
    let res = server
        .patch(&format!("/api/quotes/{}", quote_id))
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({ "valid_until": tomorrow }))
        .await;
    res.assert_status(StatusCode::OK);
    assert_eq!(res.json::<Value>()["quote"]["valid_until"], tomorrow);
}
