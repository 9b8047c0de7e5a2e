mod common;

use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use axum_test::TestServer;
use common::{
    backdate_validity, bearer, create_sent_quote, create_test_app, create_test_app_state,
    create_test_app_state_with, seed_agent,
};
use serde_json::{json, Value};
use serial_test::serial;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
#[serial]
async fn expiry_sweep_expires_overdue_quotes_and_notifies() {
    let Some(state) = create_test_app_state() else {
        return;
    };
    let server = TestServer::new(create_test_app(state.clone())).unwrap();
    let (_, token) = seed_agent(&state, true, false);
    let (_, admin_token) = seed_agent(&state, true, true);

    let overdue = create_sent_quote(&server, &token).await;
    let current = create_sent_quote(&server, &token).await;
    backdate_validity(&state, &overdue);

    server
        .post("/api/admin/automation/expire-quotes")
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let res = server
        .post("/api/admin/automation/expire-quotes")
        .add_header(AUTHORIZATION, bearer(&admin_token))
        .await;
    res.assert_status(StatusCode::OK);
    assert_eq!(res.json::<Value>()["expired"], 1);

    let quote: Value = server
        .get(&format!("/api/quotes/{}", overdue))
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .json();
    assert_eq!(quote["quote"]["status"], "expired");

    let quote: Value = server
        .get(&format!("/api/quotes/{}", current))
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .json();
    assert_eq!(quote["quote"]["status"], "sent");

    let inbox: Value = server
        .get("/api/notifications")
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .json();
    let expired_notices: Vec<&Value> = inbox["notifications"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|n| n["kind"] == "quote_expired")
        .collect();
    assert_eq!(expired_notices.len(), 1);
    assert_eq!(expired_notices[0]["quote_id"], overdue.as_str());

    // expired quotes take no payment
    server
        .post("/api/payments/intent")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({ "quote_id": overdue }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let res = server
        .post("/api/admin/automation/expire-quotes")
        .add_header(AUTHORIZATION, bearer(&admin_token))
        .await;
    assert_eq!(res.json::<Value>()["expired"], 0);
}

#[tokio::test]
#[serial]
async fn fx_refresh_stores_rupiah_rates() {
    let fx = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4/latest/IDR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "base": "IDR",
            "rates": { "IDR": 1.0, "USD": 0.0000625, "AUD": 0.0001, "EUR": 0.0 }
        })))
        .mount(&fx)
        .await;

    let Some(state) = create_test_app_state_with(&fx.uri()) else {
        return;
    };
    let server = TestServer::new(create_test_app(state.clone())).unwrap();
    let (_, token) = seed_agent(&state, true, false);
    let (_, admin_token) = seed_agent(&state, true, true);

    server
        .post("/api/admin/exchange-rates/refresh")
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let res = server
        .post("/api/admin/exchange-rates/refresh")
        .add_header(AUTHORIZATION, bearer(&admin_token))
        .await;
    res.assert_status(StatusCode::OK);
    let refresh: Value = res.json();
    assert_eq!(refresh["source"], "127.0.0.1");
    let updated = refresh["updated"].as_array().unwrap();
    assert!(updated.contains(&json!("USD")));
    assert!(updated.contains(&json!("AUD")));
    assert!(refresh["skipped"].as_array().unwrap().contains(&json!("EUR")));

    let res = server
        .get("/api/exchange-rates")
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    res.assert_status(StatusCode::OK);
    let rates: Value = res.json();
    let rates = rates["rates"].as_array().unwrap();
    assert_eq!(rates.len(), 2);

    let usd = rates
        .iter()
        .find(|r| r["currency_code"] == "USD")
        .unwrap();
    assert!((usd["rate_to_idr"].as_f64().unwrap() - 16_000.0).abs() < 1e-6);
    assert_eq!(usd["source"], "127.0.0.1");

    let aud = rates
        .iter()
        .find(|r| r["currency_code"] == "AUD")
        .unwrap();
    assert!((aud["rate_to_idr"].as_f64().unwrap() - 10_000.0).abs() < 1e-6);
}

#[tokio::test]
#[serial]
async fn fx_refresh_reports_provider_failure() {
    let fx = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4/latest/IDR"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "quota exceeded"
        })))
        .mount(&fx)
        .await;

    let Some(state) = create_test_app_state_with(&fx.uri()) else {
        return;
    };
    let server = TestServer::new(create_test_app(state.clone())).unwrap();
    let (_, admin_token) = seed_agent(&state, true, true);

    server
        .post("/api/admin/exchange-rates/refresh")
        .add_header(AUTHORIZATION, bearer(&admin_token))
        .await
        .assert_status(StatusCode::BAD_GATEWAY);
}
