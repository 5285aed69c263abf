use super::types::{ErrorResponse, HealthResponse};
use crate::{
    Error,
    handler::{InvocationContext, InvocationEvent, InvocationResponse, RequestHandler},
};
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
};
use std::sync::Arc;
use tracing::{error, info, warn};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<RequestHandler>,
}

type InvokeResult = Result<Json<InvocationResponse>, (StatusCode, Json<ErrorResponse>)>;

pub async fn invoke(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> InvokeResult {
    let context = request_context(&headers);

    // Malformed events get the same failure report as any other abnormal invocation
    let event: InvocationEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            let e = Error::from(e);
            error!(
                "Invocation {} carried an unreadable event: {}",
                context.request_id, e
            );
            return Err(failure(e, context));
        }
    };

    match state.handler.handle(event, &context).await {
        Ok(response) => {
            info!(
                "Invocation {} returned status {}",
                context.request_id, response.status_code
            );
            Ok(Json(response))
        }
        Err(e) => Err(failure(e, context)),
    }
}

fn failure(e: Error, context: InvocationContext) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error_type: e.kind().to_string(),
            error_message: e.to_string(),
            request_id: context.request_id,
        }),
    )
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Use the caller's request id when it is a plain token, otherwise mint one.
fn request_context(headers: &HeaderMap) -> InvocationContext {
    let supplied = headers
        .get(REQUEST_ID_HEADER)
        .map(|value| value.to_str().map(str::trim).unwrap_or_default());

    match supplied {
        Some(id) if InvocationContext::is_valid_request_id(id) => InvocationContext::new(id),
        Some(id) => {
            let context = InvocationContext::generate();
            warn!(
                "Ignoring unusable {} {:?}, using {}",
                REQUEST_ID_HEADER, id, context.request_id
            );
            context
        }
        None => InvocationContext::generate(),
    }
}
