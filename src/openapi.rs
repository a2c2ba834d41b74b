//! OpenAPI document and the HTML pages that render it.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use utoipa::OpenApi;

use crate::handlers;
use crate::models::{CreditScoreResponse, ErrorResponse, FieldError, HealthResponse, Improvement};
use crate::validation::FinancialData;

pub const OPENAPI_PATH: &str = "/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Credit Score Predictor API",
        description = "Predicts credit scores and provides improvement recommendations"
    ),
    paths(handlers::health, handlers::predict_score),
    components(schemas(
        FinancialData,
        CreditScoreResponse,
        Improvement,
        HealthResponse,
        ErrorResponse,
        FieldError
    )),
    tags(
        (name = "Health Check", description = "Service status"),
        (name = "Prediction", description = "Credit score calculation")
    )
)]
pub struct ApiDoc;

/// Serves the generated OpenAPI document as JSON.
pub async fn serve_openapi_spec() -> impl IntoResponse {
    (StatusCode::OK, Json(ApiDoc::openapi()))
}

/// Serves the Swagger UI HTML page, configured to load [`OPENAPI_PATH`].
pub async fn serve_swagger_ui() -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Credit Score Predictor API - Swagger UI</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
    <style>
        body {{ margin: 0; padding: 0; }}
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = function() {{
            window.ui = SwaggerUIBundle({{
                url: "{spec}",
                dom_id: '#swagger-ui',
                deepLinking: true
            }});
        }};
    </script>
</body>
</html>
"#,
        spec = OPENAPI_PATH
    ))
}

/// Serves the ReDoc HTML page.
pub async fn serve_redoc() -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Credit Score Predictor API - ReDoc</title>
</head>
<body>
    <redoc spec-url="{spec}"></redoc>
    <script src="https://cdn.redoc.ly/redoc/latest/bundles/redoc.standalone.js"></script>
</body>
</html>
"#,
        spec = OPENAPI_PATH
    ))
}
