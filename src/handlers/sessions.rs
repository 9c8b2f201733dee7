use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use tracing::info;

use super::MessageResponse;
use crate::db::models::AdvisingSession;
use crate::middleware::{JsonBody, QueryParams};
use crate::router::AdminState;
use crate::service::session_upsert;
use crate::types::session::{
    SessionListQuery, SessionSubmission, SessionUpdateRequest, SessionUpsertQuery,
};
use crate::AdminError;

/// GET /api/sessions?studentId=&periodId=
///
/// With both filters the result holds at most the most recently updated match.
pub async fn list_sessions(
    State(state): State<AdminState>,
    QueryParams(query): QueryParams<SessionListQuery>,
) -> Result<Json<Vec<AdvisingSession>>, AdminError> {
    let sessions = state
        .storage
        .list_sessions(query.student_id.as_deref(), query.period_id.as_deref())
        .await?;
    Ok(Json(sessions))
}

/// POST /api/sessions?mode=replace|patch
pub async fn upsert_session(
    State(state): State<AdminState>,
    QueryParams(query): QueryParams<SessionUpsertQuery>,
    JsonBody(submission): JsonBody<SessionSubmission>,
) -> Result<(StatusCode, Json<AdvisingSession>), AdminError> {
    let (session, outcome) =
        session_upsert::upsert_session(&state.storage, submission, query.mode).await?;
    Ok((outcome.status(), Json(session)))
}

/// GET /api/sessions/{id}
pub async fn get_session(
    State(state): State<AdminState>,
    Path(id): Path<String>,
) -> Result<Json<AdvisingSession>, AdminError> {
    state
        .storage
        .get_session(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AdminError::not_found("Session", id))
}

/// PUT /api/sessions/{id}
pub async fn update_session(
    State(state): State<AdminState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<SessionUpdateRequest>,
) -> Result<Json<AdvisingSession>, AdminError> {
    if let Some(field) = req.empty_key_field() {
        return Err(AdminError::MissingField(field));
    }
    let updated = state
        .storage
        .update_session(&id, req.into(), Utc::now())
        .await?;
    info!(%id, "advising session updated");
    Ok(Json(updated))
}

/// DELETE /api/sessions/{id}
pub async fn delete_session(
    State(state): State<AdminState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AdminError> {
    state.storage.delete_session(&id).await?;
    info!(%id, "advising session deleted");
    Ok(Json(MessageResponse::new("Session deleted successfully")))
}
