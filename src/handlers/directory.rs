use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use tracing::info;

use crate::db::models::{Period, Student};
use crate::db::patch::{PeriodCreate, StudentCreate};
use crate::middleware::{JsonBody, QueryParams};
use crate::router::AdminState;
use crate::types::directory::{
    PeriodCreateRequest, PeriodListQuery, StudentCreateRequest, StudentListQuery,
};
use crate::types::{flag, required};
use crate::AdminError;

pub async fn list_students(
    State(state): State<AdminState>,
    QueryParams(query): QueryParams<StudentListQuery>,
) -> Result<Json<Vec<Student>>, AdminError> {
    let students = state
        .storage
        .list_students(query.major_code.as_deref())
        .await?;
    Ok(Json(students))
}

pub async fn get_student(
    State(state): State<AdminState>,
    Path(id): Path<String>,
) -> Result<Json<Student>, AdminError> {
    state
        .storage
        .get_student(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AdminError::not_found("Student", id))
}

pub async fn create_student(
    State(state): State<AdminState>,
    JsonBody(req): JsonBody<StudentCreateRequest>,
) -> Result<(StatusCode, Json<Student>), AdminError> {
    let student = StudentCreate {
        name: required(req.name, "name")?,
        email: req.email,
        major_code: req.major_code,
    };
    let created = state.storage.create_student(student, Utc::now()).await?;
    info!(id = %created.id, "student registered");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_periods(
    State(state): State<AdminState>,
    QueryParams(query): QueryParams<PeriodListQuery>,
) -> Result<Json<Vec<Period>>, AdminError> {
    let periods = state
        .storage
        .list_periods(flag(query.active_only.as_deref()))
        .await?;
    Ok(Json(periods))
}

pub async fn create_period(
    State(state): State<AdminState>,
    JsonBody(req): JsonBody<PeriodCreateRequest>,
) -> Result<(StatusCode, Json<Period>), AdminError> {
    let period = PeriodCreate {
        name: required(req.name, "name")?,
        is_active: req.is_active.unwrap_or(false),
    };
    let created = state.storage.create_period(period, Utc::now()).await?;
    info!(id = %created.id, name = %created.name, "period created");
    Ok((StatusCode::CREATED, Json(created)))
}
