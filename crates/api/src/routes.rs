use axum::{
    extract::{ConnectInfo, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use neofeed_core::domain::asteroid::FeedResult;
use neofeed_core::domain::range::DateRange;
use neofeed_core::feed::{FeedError, NeoFeedClient};
use neofeed_core::report;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub const USAGE: &str = "NASA NEO API: use /api/asteroids?start=YYYY-MM-DD&end=YYYY-MM-DD - example: /api/asteroids?start=2024-01-01&end=2024-01-07";

#[derive(Clone)]
pub struct AppState {
    pub feed: Arc<dyn NeoFeedClient>,
    pub default_range: DateRange,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(usage))
        .route("/healthz", get(healthz))
        .route("/api/asteroids", get(get_asteroids))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

async fn usage(ConnectInfo(peer): ConnectInfo<SocketAddr>) -> &'static str {
    tracing::info!(%peer, "usage requested");
    USAGE
}

/// Repeated keys are joined with `,` and forwarded like any other value.
fn query_param(params: &[(String, String)], key: &str) -> Option<String> {
    let values: Vec<&str> = params
        .iter()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values.join(","))
    }
}

#[derive(Debug)]
enum ApiError {
    /// Upstream status and raw body, forwarded without wrapping.
    Upstream { status: StatusCode, body: String },
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Upstream { status, body } => (status, body).into_response(),
            ApiError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message })),
            )
                .into_response(),
        }
    }
}

async fn get_asteroids(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<FeedResult>, ApiError> {
    let range = DateRange::resolve(
        query_param(&params, "start").as_deref(),
        query_param(&params, "end").as_deref(),
        &state.default_range,
    );

    match state.feed.fetch_feed(&range).await {
        Ok(result) => {
            // Both sinks see the same value: the log first, then the caller.
            report::log_feed_result(&result);
            Ok(Json(result))
        }
        Err(FeedError::Rejected { status, body }) => {
            tracing::warn!(
                provider = state.feed.provider_name(),
                start = %range.start,
                end = %range.end,
                status,
                "feed service rejected request; passing response through"
            );
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            Err(ApiError::Upstream { status, body })
        }
        Err(err) => {
            let message = err.to_string();
            tracing::error!(
                provider = state.feed.provider_name(),
                stage = err.stage(),
                start = %range.start,
                end = %range.end,
                error = ?err,
                "feed request failed"
            );
            sentry_anyhow::capture_anyhow(&anyhow::Error::new(err));
            Err(ApiError::Internal(message))
        }
    }
}
