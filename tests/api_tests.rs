/// HTTP tests for the router
/// Drives the full middleware stack in-process with tower's oneshot
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use credit_score_api::app::build_router;
use credit_score_api::config::{Config, RateLimit};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Helper function to create a router without rate limiting
fn test_app() -> Router {
    let config = Config {
        rate_limit: None,
        ..Config::default()
    };
    build_router(&config).unwrap()
}

fn predict_request(body: &Value) -> Request<Body> {
    Request::builder()
        .uri("/predict")
        .method(Method::POST)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_health_endpoints() {
    for uri in ["/", "/health"] {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, body) = send(test_app(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(body["documentation"], "/docs");
    }
}

#[tokio::test]
async fn test_predict_sample_request() {
    let payload = json!({
        "monthly_income": 5000,
        "monthly_expenses": 3000,
        "savings": 10000,
        "on_time_payments": 24,
        "late_payments": 2,
        "missed_payments": 0,
        "credit_limit": 15000,
        "current_balance": 4500,
        "credit_card_debt": 4500,
        "personal_loan": 10000,
        "student_loan": 20000,
        "mortgage": 200000
    });

    let (status, body) = send(test_app(), predict_request(&payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["credit_score"], 830);
    assert_eq!(body["message"], "Credit score calculated successfully");

    let improvements = body["improvements"].as_array().unwrap();
    let impacts: Vec<&str> = improvements
        .iter()
        .map(|i| i["impact"].as_str().unwrap())
        .collect();
    assert_eq!(impacts, vec!["+50 points", "+40 points", "+20 points"]);

    let first = &improvements[0];
    assert_eq!(first["action"], "Improve Payment History");
    assert_eq!(first["timeframe"], "6-12 months");
    assert_eq!(first["steps"][0], "Set up automatic payments");
}

#[tokio::test]
async fn test_predict_required_fields_only() {
    let payload = json!({"monthly_income": 5000, "monthly_expenses": 3000});
    let (status, body) = send(test_app(), predict_request(&payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["credit_score"], 340);
    let actions: Vec<&str> = body["improvements"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["action"].as_str().unwrap())
        .collect();
    assert!(actions.contains(&"Diversify Credit Mix"));
}

#[tokio::test]
async fn test_predict_rejects_expenses_above_income() {
    let payload = json!({"monthly_income": 1000, "monthly_expenses": 1500});
    let (status, body) = send(test_app(), predict_request(&payload)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], "error");
    assert_eq!(body["errors"][0]["field"], "monthly_expenses");
    assert_eq!(
        body["errors"][0]["message"],
        "Monthly expenses cannot be greater than monthly income"
    );
}

#[tokio::test]
async fn test_predict_collects_all_field_errors() {
    let payload = json!({
        "monthly_income": 0,
        "monthly_expenses": 100,
        "late_payments": -1,
        "credit_limit": 100,
        "current_balance": 500
    });
    let (status, body) = send(test_app(), predict_request(&payload)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(
        fields,
        vec!["monthly_income", "late_payments", "current_balance"]
    );
}

#[tokio::test]
async fn test_predict_missing_required_field() {
    let payload = json!({"monthly_income": 5000});
    let (status, body) = send(test_app(), predict_request(&payload)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], "error");
    assert_eq!(body["errors"][0]["field"], "body");
}

#[tokio::test]
async fn test_predict_malformed_json() {
    let request = Request::builder()
        .uri("/predict")
        .method(Method::POST)
        .header("content-type", "application/json")
        .body(Body::from("{\"monthly_income\": "))
        .unwrap();
    let (status, body) = send(test_app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let request = Request::builder()
        .uri("/does-not-exist")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(test_app(), request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"status": "error", "message": "Not Found"}));
}

#[tokio::test]
async fn test_openapi_document_served() {
    let request = Request::builder()
        .uri("/openapi.json")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(test_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/predict"]["post"].is_object());
}

#[tokio::test]
async fn test_oversized_body_rejected_as_json() {
    let config = Config {
        rate_limit: None,
        max_body_bytes: 16,
        ..Config::default()
    };
    let payload = json!({"monthly_income": 5000, "monthly_expenses": 3000});

    // Declared length over the limit: rejected before the handler runs
    let mut request = predict_request(&payload);
    let length = serde_json::to_vec(&payload).unwrap().len();
    request
        .headers_mut()
        .insert("content-length", length.to_string().parse().unwrap());
    let (status, body) = send(build_router(&config).unwrap(), request).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["status"], "error");
    assert!(body["message"].is_string());

    // No declared length: limit hit while the handler reads the body
    let (status, body) = send(build_router(&config).unwrap(), predict_request(&payload)).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_wrong_method_returns_json_405() {
    let request = Request::builder()
        .uri("/predict")
        .method(Method::GET)
        .body(Body::empty())
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(response.headers().contains_key("allow"));
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        body,
        json!({"status": "error", "message": "Method Not Allowed"})
    );
}

#[tokio::test]
async fn test_predict_accepts_whole_number_float_counts() {
    let payload = json!({
        "monthly_income": 5000,
        "monthly_expenses": 3000,
        "on_time_payments": 24.0,
        "late_payments": 2.0,
        "missed_payments": 0
    });
    let (status, body) = send(test_app(), predict_request(&payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["improvements"][0]["action"], "Improve Payment History");
}

#[tokio::test]
async fn test_rate_limit_applies_to_predict() {
    let config = Config {
        rate_limit: Some(RateLimit {
            per_second: 1,
            burst_size: 2,
        }),
        ..Config::default()
    };
    let app = build_router(&config).unwrap();
    let payload = json!({"monthly_income": 5000, "monthly_expenses": 3000});

    let mut statuses = Vec::new();
    let mut last_body = Value::Null;
    for _ in 0..3 {
        let mut request = predict_request(&payload);
        request
            .headers_mut()
            .insert("x-forwarded-for", "203.0.113.7".parse().unwrap());
        let (status, body) = send(app.clone(), request).await;
        statuses.push(status);
        last_body = body;
    }

    assert_eq!(
        statuses,
        vec![
            StatusCode::OK,
            StatusCode::OK,
            StatusCode::TOO_MANY_REQUESTS
        ]
    );
    assert_eq!(
        last_body,
        json!({"status": "error", "message": "Too Many Requests"})
    );
}

#[test]
fn test_out_of_range_rate_limit_rejected() {
    for per_second in [0, 1001] {
        let config = Config {
            rate_limit: Some(RateLimit {
                per_second,
                burst_size: 5,
            }),
            ..Config::default()
        };
        assert!(build_router(&config).is_err());
    }
}
