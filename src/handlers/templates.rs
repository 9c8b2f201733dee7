use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use tracing::info;

use super::MessageResponse;
use crate::db::models::EmailTemplate;
use crate::db::patch::{TemplateCreate, TemplateFilter};
use crate::db::sqlite::DEFAULT_CATEGORY;
use crate::middleware::{JsonBody, QueryParams};
use crate::router::AdminState;
use crate::types::template::{
    IdQuery, TemplateCreateRequest, TemplateListQuery, TemplateUpdateRequest,
};
use crate::types::{flag, required};
use crate::AdminError;

/// GET /api/templates?category=&activeOnly=
pub async fn list_templates(
    State(state): State<AdminState>,
    QueryParams(query): QueryParams<TemplateListQuery>,
) -> Result<Json<Vec<EmailTemplate>>, AdminError> {
    let filter = TemplateFilter {
        category: query.category,
        active_only: flag(query.active_only.as_deref()),
    };
    Ok(Json(state.storage.list_templates(&filter).await?))
}

/// GET /api/templates/{id}
pub async fn get_template(
    State(state): State<AdminState>,
    Path(id): Path<String>,
) -> Result<Json<EmailTemplate>, AdminError> {
    state
        .storage
        .get_template(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AdminError::not_found("Template", id))
}

/// POST /api/templates
pub async fn create_template(
    State(state): State<AdminState>,
    JsonBody(req): JsonBody<TemplateCreateRequest>,
) -> Result<(StatusCode, Json<EmailTemplate>), AdminError> {
    let template = TemplateCreate {
        name: required(req.name, "name")?,
        subject: required(req.subject, "subject")?,
        body: required(req.body, "body")?,
        category: req
            .category
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        is_active: req.is_active.unwrap_or(true),
    };
    let created = state.storage.create_template(template, Utc::now()).await?;
    info!(id = %created.id, name = %created.name, "template created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/templates
pub async fn update_template(
    State(state): State<AdminState>,
    JsonBody(req): JsonBody<TemplateUpdateRequest>,
) -> Result<Json<EmailTemplate>, AdminError> {
    let (id, patch) = req.into_parts();
    let id = required(id, "id")?;
    let updated = state.storage.update_template(&id, patch, Utc::now()).await?;
    info!(id = %updated.id, "template updated");
    Ok(Json(updated))
}

/// DELETE /api/templates?id=
pub async fn delete_template(
    State(state): State<AdminState>,
    QueryParams(query): QueryParams<IdQuery>,
) -> Result<Json<MessageResponse>, AdminError> {
    let id = required(query.id, "id")?;
    state.storage.delete_template(&id).await?;
    info!(%id, "template deleted");
    Ok(Json(MessageResponse::new("Template deleted successfully")))
}
