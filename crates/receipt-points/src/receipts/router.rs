use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::error;

use super::domain::{Receipt, ReceiptId};
use super::repository::PointsRepository;
use super::service::{ReceiptService, ReceiptServiceError};

/// Router builder exposing receipt intake and points lookup.
pub fn receipt_router<R>(service: Arc<ReceiptService<R>>) -> Router
where
    R: PointsRepository + 'static,
{
    Router::new()
        .route("/receipts/process", post(process_handler::<R>))
        .route("/receipts/:id/points", get(points_handler::<R>))
        .with_state(service)
}

fn error_response(status: StatusCode, errors: Vec<String>) -> Response {
    (status, Json(json!({ "errors": errors }))).into_response()
}

pub(crate) async fn process_handler<R>(
    State(service): State<Arc<ReceiptService<R>>>,
    payload: Result<Json<Receipt>, JsonRejection>,
) -> Response
where
    R: PointsRepository + 'static,
{
    let Json(receipt) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return error_response(StatusCode::BAD_REQUEST, vec![rejection.body_text()]);
        }
    };

    match service.process(receipt) {
        Ok(processed) => (StatusCode::OK, Json(json!({ "id": processed.id }))).into_response(),
        Err(ReceiptServiceError::Invalid(errors)) => {
            error_response(StatusCode::BAD_REQUEST, errors.messages())
        }
        Err(ReceiptServiceError::Scoring(err)) => {
            error_response(StatusCode::BAD_REQUEST, vec![err.to_string()])
        }
        Err(other) => {
            error!(error = %other, "receipt could not be stored");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, vec![other.to_string()])
        }
    }
}

pub(crate) async fn points_handler<R>(
    State(service): State<Arc<ReceiptService<R>>>,
    Path(id): Path<String>,
) -> Response
where
    R: PointsRepository + 'static,
{
    let id = ReceiptId(id);
    match service.points(&id) {
        Ok(points) => (StatusCode::OK, Json(json!({ "points": points }))).into_response(),
        Err(err @ ReceiptServiceError::NotFound(_)) => {
            error_response(StatusCode::NOT_FOUND, vec![err.to_string()])
        }
        Err(other) => {
            error!(error = %other, receipt_id = %id, "points lookup failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, vec![other.to_string()])
        }
    }
}
