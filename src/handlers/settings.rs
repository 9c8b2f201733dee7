use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::db::models::Setting;
use crate::middleware::{JsonBody, QueryParams};
use crate::router::AdminState;
use crate::service::settings;
use crate::types::setting::{BulkSettingsRequest, SettingInput, SettingsQuery};
use crate::AdminError;

/// A `key` lookup answers with one record or `null`; otherwise a list.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SettingsResponse {
    One(Option<Setting>),
    Many(Vec<Setting>),
}

/// GET /api/settings?category=&key=
pub async fn get_settings(
    State(state): State<AdminState>,
    QueryParams(query): QueryParams<SettingsQuery>,
) -> Result<Json<SettingsResponse>, AdminError> {
    if let Some(key) = query.key {
        let setting = state.storage.get_setting(&key).await?;
        return Ok(Json(SettingsResponse::One(setting)));
    }
    let all = state.storage.list_settings(query.category.as_deref()).await?;
    Ok(Json(SettingsResponse::Many(all)))
}

/// POST /api/settings
pub async fn upsert_setting(
    State(state): State<AdminState>,
    JsonBody(input): JsonBody<SettingInput>,
) -> Result<(StatusCode, Json<Setting>), AdminError> {
    let (setting, outcome) = settings::upsert_setting(&state.storage, input).await?;
    Ok((outcome.status(), Json(setting)))
}

/// PUT /api/settings with `{"settings": [...]}`
pub async fn bulk_upsert_settings(
    State(state): State<AdminState>,
    JsonBody(req): JsonBody<BulkSettingsRequest>,
) -> Result<Json<Vec<Setting>>, AdminError> {
    let inputs = req.settings.ok_or(AdminError::MissingField("settings"))?;
    Ok(Json(settings::upsert_settings(&state.storage, inputs).await?))
}
