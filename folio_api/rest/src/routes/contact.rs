use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use folio_core_contact_contracts::{ContactFeatureService, ContactSubmitError};

use super::error;
use crate::{
    extractors::json::ApiJson,
    models::{contact::ApiContactSubmission, ApiStatus},
};

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route("/api/email/contact", routing::post(submit))
        .with_state(service)
}

async fn submit(
    service: State<Arc<impl ContactFeatureService>>,
    ApiJson(submission): ApiJson<ApiContactSubmission>,
) -> Response {
    match service.submit(submission.into()).await {
        Ok(()) => Json(ApiStatus {
            success: true,
            message: "Message sent successfully",
        })
        .into_response(),
        Err(ContactSubmitError::Invalid(err)) => error(StatusCode::BAD_REQUEST, err.to_string()),
        Err(err @ ContactSubmitError::Send) => error(StatusCode::BAD_REQUEST, err.to_string()),
        Err(err @ ContactSubmitError::RecipientNotConfigured) => {
            tracing::error!("{err}");
            error(StatusCode::BAD_REQUEST, ContactSubmitError::Send.to_string())
        }
    }
}
