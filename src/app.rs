use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::config::{Config, MAX_RATE_PER_SECOND};
use crate::errors;
use crate::handlers;
use crate::openapi;

/// Builds the application router.
///
/// Health and documentation routes bypass the rate limiter; `/predict` is
/// wrapped in the body size limit and, when configured, the per-IP limiter.
/// Errors raised by those layers or by the method router are rendered as
/// JSON like handler errors.
///
/// # Errors
///
/// Fails if the rate limit is outside `1..=MAX_RATE_PER_SECOND` or is
/// rejected by the governor builder.
pub fn build_router(config: &Config) -> anyhow::Result<Router> {
    let mut scoring_routes = Router::new()
        .route("/predict", post(handlers::predict_score))
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes));

    if let Some(limit) = config.rate_limit {
        anyhow::ensure!(
            (1..=MAX_RATE_PER_SECOND).contains(&limit.per_second),
            "Rate limit must be between 1 and {} requests per second",
            MAX_RATE_PER_SECOND
        );
        // One token every 1/per_second seconds.
        let replenish_ms = 1000 / limit.per_second;
        let governor_conf = Arc::new(
            GovernorConfigBuilder::default()
                .per_millisecond(replenish_ms)
                .burst_size(limit.burst_size)
                .key_extractor(SmartIpKeyExtractor)
                .finish()
                .ok_or_else(|| anyhow::anyhow!("Invalid rate limit configuration"))?,
        );
        scoring_routes = scoring_routes.layer(ServiceBuilder::new().layer(GovernorLayer {
            config: governor_conf,
        }));
    }

    let app = Router::new()
        .route("/", get(handlers::health))
        .route("/health", get(handlers::health))
        .route("/docs", get(openapi::serve_swagger_ui))
        .route("/redoc", get(openapi::serve_redoc))
        .route(openapi::OPENAPI_PATH, get(openapi::serve_openapi_spec))
        .merge(scoring_routes)
        .fallback(handlers::not_found)
        .layer(middleware::map_response(errors::render_json_errors))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    Ok(app)
}
