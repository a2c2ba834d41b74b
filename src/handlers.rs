use crate::errors::AppError;
use crate::models::{CreditScoreResponse, HealthResponse};
use crate::scoring::score_credit;
use crate::validation::FinancialData;
use axum::{
    extract::rejection::JsonRejection,
    http::{StatusCode, Uri},
    Json,
};

/// Health check endpoint.
///
/// Served on both `/` and `/health`.
///
/// # Returns
///
/// * `(StatusCode, Json<HealthResponse>)` - HTTP 200 OK with health status JSON.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health Check",
    responses((status = 200, description = "Service is running", body = HealthResponse))
)]
pub async fn health() -> (StatusCode, Json<HealthResponse>) {
    let version = env!("CARGO_PKG_VERSION");
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            message: format!("Credit Score Predictor API v{} is running", version),
            version: version.to_string(),
            documentation: "/docs".to_string(),
        }),
    )
}

/// POST /predict
///
/// Validates the submitted financial data, scores it and returns the score
/// with improvement recommendations, most impactful first.
///
/// # Arguments
///
/// * `payload` - JSON body with the client's financial data.
///
/// # Returns
///
/// * `Result<Json<CreditScoreResponse>, AppError>` - The score or an error.
#[utoipa::path(
    post,
    path = "/predict",
    tag = "Prediction",
    request_body = FinancialData,
    responses(
        (status = 200, description = "Credit score calculated", body = CreditScoreResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 422, description = "Invalid financial data", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    )
)]
pub async fn predict_score(
    payload: Result<Json<FinancialData>, JsonRejection>,
) -> Result<Json<CreditScoreResponse>, AppError> {
    let Json(data) = payload?;
    tracing::info!("POST /predict - received prediction request");
    tracing::debug!("Financial data: {:?}", data);

    let record = data.validate()?;
    let result = score_credit(&record)?;

    for contribution in &result.breakdown {
        tracing::debug!(
            "Factor {}: {:+.2} points",
            contribution.factor.label(),
            contribution.points
        );
    }
    tracing::info!(
        "Calculated credit score: {} ({} recommendations)",
        result.score,
        result.recommendations.len()
    );

    Ok(Json(CreditScoreResponse::from(result)))
}

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> AppError {
    tracing::debug!("No route for {}", uri);
    AppError::NotFound("Not Found".to_string())
}
