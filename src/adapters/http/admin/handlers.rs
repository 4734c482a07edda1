//! HTTP handler for admin publishes.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};

use crate::adapters::state::RelayState;

use super::dto::{confirmation, PublishRequest};

/// Any method on the publish path.
///
/// - `OPTIONS` - preflight, empty 200
/// - `POST` - JSON `{"zone", "message"}`, dispatched without waiting for delivery
/// - anything else - 405
///
/// Every response carries permissive CORS headers.
pub async fn publish_message(
    State(state): State<RelayState>,
    method: Method,
    body: Bytes,
) -> Response {
    let mut response = if method == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else if method == Method::POST {
        publish(&state, &body).await
    } else {
        (StatusCode::METHOD_NOT_ALLOWED, "Invalid request method").into_response()
    };

    apply_cors_headers(response.headers_mut());
    response
}

async fn publish(state: &RelayState, body: &[u8]) -> Response {
    let request: PublishRequest = match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!("Rejected publish body: {}", e);
            return (StatusCode::BAD_REQUEST, "Invalid request body").into_response();
        }
    };

    let (zone, payload) = request.into_parts();
    let summary = state.broadcaster.publish(&zone, payload).await;

    tracing::info!(
        zone = %summary.zone,
        recipients = summary.recipients,
        "Published message"
    );

    (StatusCode::OK, confirmation(&zone)).into_response()
}

fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
}
