use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use super::dto::{CreateRecordRequest, ErrorResponse, MessageResponse, UpdateRecordRequest};
use super::owner::Owner;
use super::repo_types::Record;
use super::services;
use crate::error::RecordError;
use crate::state::AppState;

pub fn health_data_routes() -> Router<AppState> {
    Router::new()
        .route("/health-data", get(list_demo_records).post(create_record))
        .route(
            "/health-data/:key",
            get(list_records).put(update_record).delete(delete_record),
        )
}

/// GET /health-data (no owner → demo owner)
#[instrument(skip(state))]
pub async fn list_demo_records(
    State(state): State<AppState>,
) -> Result<Json<Vec<Record>>, Response> {
    list_owner(&state, Owner::resolve(None)).await
}

/// GET /health-data/:userId
#[instrument(skip(state))]
pub async fn list_records(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Record>>, Response> {
    list_owner(&state, Owner::resolve(Some(&user_id))).await
}

async fn list_owner(state: &AppState, owner: Owner) -> Result<Json<Vec<Record>>, Response> {
    services::list_for_owner(state, &owner)
        .await
        .map(Json)
        .map_err(|e| failure(e, "fetching"))
}

#[instrument(skip(state, body))]
pub async fn create_record(
    State(state): State<AppState>,
    body: Result<Json<CreateRecordRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), Response> {
    let Json(body) = body.map_err(bad_request)?;
    let record = services::create_record(&state, body.into())
        .await
        .map_err(|e| failure(e, "adding"))?;

    info!(id = %record.id, owner_id = %record.owner_id, "record created");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::with_data("Data added successfully", record)),
    ))
}

/// PUT /health-data/:id
#[instrument(skip(state, body))]
pub async fn update_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateRecordRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, Response> {
    let Json(body) = body.map_err(bad_request)?;
    let record = services::update_record(&state, &id, body.into())
        .await
        .map_err(|e| failure(e, "updating"))?;

    info!(id = %record.id, "record updated");
    Ok(Json(MessageResponse::with_data(
        "Data updated successfully",
        record,
    )))
}

/// DELETE /health-data/:id
#[instrument(skip(state))]
pub async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, Response> {
    services::delete_record(&state, &id)
        .await
        .map_err(|e| failure(e, "deleting"))?;

    info!(%id, "record deleted");
    Ok(Json(MessageResponse::text("Data deleted successfully")))
}

fn failure(e: RecordError, action: &str) -> Response {
    match e {
        RecordError::NotFound => {
            warn!(action, "record not found");
            (
                StatusCode::NOT_FOUND,
                Json(MessageResponse::text("Data not found")),
            )
                .into_response()
        }
        RecordError::Storage(err) => {
            error!(error = %format!("{err:#}"), action, "storage error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Error {action} health data"),
                }),
            )
                .into_response()
        }
    }
}

fn bad_request(rejection: JsonRejection) -> Response {
    warn!(error = %rejection, "rejected request body");
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: rejection.body_text(),
        }),
    )
        .into_response()
}
