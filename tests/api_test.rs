mod common;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use propcast::config::ServerEnvConfig;
use propcast::interfaces::http::{AppState, create_app};
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
    create_app(AppState::new(common::bundle()), &ServerEnvConfig::default())
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get(uri: &str) -> (StatusCode, Value) {
    send(Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

#[tokio::test]
async fn test_health_endpoints() {
    for uri in ["/health", "/api/v1/health"] {
        let (status, body) = get(uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "healthy", "service": "real-estate-api"}));
    }
}

#[tokio::test]
async fn test_forecast_for_zip_code() {
    let (status, body) = get("/api/v1/forecast/90210").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["address"], "90210");
    assert_eq!(body["county"], "Los Angeles County");
    assert_eq!(body["current_value"], 850000.0);

    let confidence = body["confidence"].as_u64().unwrap();
    assert!((70..=95).contains(&confidence));

    let chart = body["chart_data"].as_array().unwrap();
    assert_eq!(chart.len(), 18);
    for point in &chart[..6] {
        assert!(point["historical_price"].is_number());
        assert!(point["predicted_price"].is_null());
        assert!(point["upper_bound"].is_null());
    }
    for point in &chart[6..] {
        assert!(point["historical_price"].is_null());
        assert!(point["predicted_price"].is_number());
        assert!(point["lower_bound"].as_f64() <= point["upper_bound"].as_f64());
    }

    let risks = body["risk_factors"].as_array().unwrap();
    assert!((1..=3).contains(&risks.len()));
}

#[tokio::test]
async fn test_forecast_decodes_address() {
    let (status, body) = get("/api/v1/forecast/San%20Diego%2C%20CA").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["county"], "San Diego County");
    assert_eq!(body["current_value"], 720000.0);
}

#[tokio::test]
async fn test_forecast_rejects_short_address() {
    let (status, body) = get("/api/v1/forecast/ab").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
    assert_eq!(body["message"], "Address must be at least 3 characters");
}

#[tokio::test]
async fn test_investment_score_for_luxury_address() {
    let (status, body) =
        post_json("/api/v1/investment/score", json!({"address": "Beverly Hills, CA"})).await;
    assert_eq!(status, StatusCode::OK);

    let score = body["investment_score"].as_u64().unwrap();
    assert!(score <= 100);
    let liquidity = body["liquidity_score"].as_u64().unwrap();
    assert!((1..=10).contains(&liquidity));

    let highlights = body["key_highlights"].as_array().unwrap();
    assert!((2..=4).contains(&highlights.len()));

    let explanations = body["shap_explanations"].as_array().unwrap();
    assert!(!explanations.is_empty() && explanations.len() <= 8);
    let impacts: Vec<f64> = explanations
        .iter()
        .map(|e| e["impact"].as_f64().unwrap().abs())
        .collect();
    assert!(impacts.windows(2).all(|w| w[0] >= w[1]));

    assert_eq!(body["metrics"]["price_to_rent_ratio"], 35.0);
    assert_eq!(body["metrics"]["days_on_market"], 15);
    assert_eq!(body["metrics"]["inventory_level"], "Low");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_investment_requests_agree() {
    let body = json!({"address": "Riverside, CA"});
    let (a, b, c) = tokio::join!(
        post_json("/api/v1/investment/score", body.clone()),
        post_json("/api/v1/investment/score", body.clone()),
        get("/api/v1/health"),
    );

    assert_eq!(a.0, StatusCode::OK);
    assert_eq!(b.0, StatusCode::OK);
    assert_eq!(c.0, StatusCode::OK);
    assert_eq!(a.1["investment_score"], b.1["investment_score"]);
    assert_eq!(a.1["shap_explanations"], b.1["shap_explanations"]);
}

#[tokio::test]
async fn test_investment_rejects_bad_requests() {
    let (status, body) = post_json("/api/v1/investment/score", json!({"address": ""})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let (status, body) = post_json("/api/v1/investment/score", json!({"street": "x"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_top_areas() {
    let (status, body) = get("/api/v1/areas/top").await;
    assert_eq!(status, StatusCode::OK);

    let areas = body["areas"].as_array().unwrap();
    assert_eq!(areas.len(), 5);
    assert_eq!(areas[0]["county"], "Riverside County");
    assert_eq!(areas[0]["overall_score"], 92);
    assert!(areas.iter().all(|a| a["county"].is_string()));
    assert!(body["last_updated"].is_string());
}

#[tokio::test]
async fn test_rental_calculation() {
    let inputs = json!({
        "purchase_price": 500000.0,
        "down_payment_percent": 20.0,
        "interest_rate": 7.0,
        "loan_term_years": 30,
        "monthly_rent": 3500.0,
        "property_tax_percent": 1.2,
        "annual_insurance": 1200.0,
        "maintenance_percent": 2.0,
        "vacancy_percent": 5.0,
        "management_fee_percent": 8.0,
        "capex_percent": 1.0,
        "appreciation_percent": 3.5
    });
    let (status, body) = post_json("/api/v1/rental/calculate", inputs.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["noi"], 14508.0);
    assert_eq!(body["monthly_cash_flow"], -1452.21);
    assert_eq!(body["total_cash_invested"], 115000.0);

    let mut invalid = inputs;
    invalid["purchase_price"] = json!(-1.0);
    let (status, body) = post_json("/api/v1/rental/calculate", invalid).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("purchase_price"));
}

#[tokio::test]
async fn test_unknown_route() {
    let (status, body) = get("/api/v1/nothing-here").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}
