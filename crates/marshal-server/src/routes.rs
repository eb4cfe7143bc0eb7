use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use marshal::{Options, formatters};

use crate::payload::Payload;

/// Encoding options shared by every request. Built once at startup.
#[derive(Debug, Clone)]
pub struct AppState {
    pub default_options: Arc<Options>,
    pub custom_options: Arc<Options>,
}

impl AppState {
    pub fn new(default_options: Options, custom_options: Options) -> Self {
        Self {
            default_options: Arc::new(default_options),
            custom_options: Arc::new(custom_options),
        }
    }

    /// The option sets served by `/default` and `/custom`.
    pub fn standard() -> Self {
        Self::new(Options::default(), custom_options())
    }
}

/// RFC 3339 timestamps, decimals as exact strings, zero fields omitted.
pub fn custom_options() -> Options {
    let mut options = Options::default()
        .with_formatter(formatters::rfc3339())
        .with_formatter(formatters::decimal_as_string());
    options.omit_zero_fields = true;
    options
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/default", get(default_handler))
        .route("/custom", get(custom_handler))
        .with_state(state)
}

pub async fn default_handler(State(state): State<AppState>) -> Response {
    let payload = Payload::now(1, 12345.6789, "default encoding");
    respond("default", &payload, &state.default_options)
}

pub async fn custom_handler(State(state): State<AppState>) -> Response {
    let payload = Payload::now(2, 98765.4321, "custom encoding");
    respond("custom", &payload, &state.custom_options)
}

fn respond(route: &'static str, payload: &Payload, options: &Options) -> Response {
    match marshal::encode_to_vec(payload, options) {
        Ok(body) => {
            tracing::debug!(route, bytes = body.len(), "encoded payload");
            ([(header::CONTENT_TYPE, "application/json")], body).into_response()
        }
        Err(err) => {
            tracing::error!(route, error = %err, "failed to encode payload");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}
