//! Middleware stack for the API server
//!
//! Provides logging, request ID generation, CORS, timeouts and rate limiting.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderValue, Method, Request, StatusCode},
    middleware::map_response,
    response::{IntoResponse, Response},
    Router,
};
use store_common::{AppError, CorsConfig, RateLimitConfig};
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::GlobalKeyExtractor, GovernorLayer,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, warn, Level};

use crate::response::ApiError;
use crate::state::AppState;

/// Header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Apply the shared middleware stack
///
/// Layers run outermost first: request id, propagation, trace, timeout, CORS.
pub fn apply_middleware(
    router: Router<AppState>,
    cors_config: &CorsConfig,
    is_production: bool,
) -> Router<AppState> {
    router
        // CORS (innermost - applied last to outgoing responses)
        .layer(create_cors_layer(cors_config, is_production))
        // Timeout (returns 503 Service Unavailable on timeout)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::SERVICE_UNAVAILABLE,
            REQUEST_TIMEOUT,
        ))
        // Tracing
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("unknown");

                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                })
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Request ID propagation
        .layer(PropagateRequestIdLayer::new(header::HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        // Request ID generation (outermost)
        .layer(SetRequestIdLayer::new(
            header::HeaderName::from_static(REQUEST_ID_HEADER),
            MakeRequestUuid,
        ))
}

/// Apply a global rate limit when enabled
///
/// A limiter that cannot be built from the configured numbers is skipped
/// with a warning.
pub fn apply_rate_limit(router: Router<AppState>, config: &RateLimitConfig) -> Router<AppState> {
    if !config.enabled {
        info!("Rate limiting disabled");
        return router;
    }

    // One cell replenishes every `1000 / rps` milliseconds
    let period_ms = (1000 / u64::from(config.requests_per_second.max(1))).max(1);
    let Some(governor_conf) = GovernorConfigBuilder::default()
        .per_millisecond(period_ms)
        .burst_size(config.burst.max(1))
        .key_extractor(GlobalKeyExtractor)
        .finish()
    else {
        warn!(
            requests_per_second = config.requests_per_second,
            burst = config.burst,
            "Invalid rate limit configuration, rate limiting disabled"
        );
        return router;
    };

    info!(
        requests_per_second = config.requests_per_second,
        burst = config.burst,
        "Rate limiting enabled"
    );
    router
        .layer(GovernorLayer {
            config: Arc::new(governor_conf),
        })
        .layer(map_response(rate_limit_envelope))
}

/// Limiter headers carried over onto the enveloped 429
const RATE_LIMIT_HEADERS: [&str; 2] = ["retry-after", "x-ratelimit-after"];

/// Wrap the limiter's plain-text 429 in the error envelope
async fn rate_limit_envelope(response: Response) -> Response {
    if response.status() != StatusCode::TOO_MANY_REQUESTS {
        return response;
    }

    let (parts, _) = response.into_parts();
    let mut enveloped = ApiError::from(AppError::RateLimitExceeded).into_response();
    for name in RATE_LIMIT_HEADERS {
        if let Some(value) = parts.headers.get(name) {
            enveloped.headers_mut().insert(name, value.clone());
        }
    }
    enveloped
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &CorsConfig, is_production: bool) -> CorsLayer {
    let base_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers([
            header::HeaderName::from_static(REQUEST_ID_HEADER),
            header::HeaderName::from_static("x-ratelimit-limit"),
            header::HeaderName::from_static("x-ratelimit-remaining"),
            header::HeaderName::from_static("x-ratelimit-reset"),
        ]);

    // Production only allows configured origins; development allows any
    // origin when none are configured
    if is_production || !config.allowed_origins.is_empty() {
        if config.allowed_origins.is_empty() {
            warn!(
                "CORS: No allowed origins configured in production mode. \
                 Requests from browsers will be blocked."
            );
            base_layer.allow_origin(AllowOrigin::list(Vec::<HeaderValue>::new()))
        } else {
            let origins: Vec<HeaderValue> = config
                .allowed_origins
                .iter()
                .filter_map(|origin| {
                    origin.parse::<HeaderValue>().ok().or_else(|| {
                        warn!("Invalid CORS origin: {}", origin);
                        None
                    })
                })
                .collect();

            info!("CORS: Allowing {} configured origins", origins.len());
            base_layer.allow_origin(AllowOrigin::list(origins))
        }
    } else {
        warn!(
            "CORS: Allowing any origin (development mode). \
             Configure CORS_ALLOWED_ORIGINS for production."
        );
        base_layer.allow_origin(Any)
    }
}
