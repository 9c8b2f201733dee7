use axum::Json;

use crate::identity::IdentitySnapshot;
use crate::middleware::{CurrentIdentity, JsonBody};
use crate::types::identity::{LoginRequest, RoleRequest, SelectorsRequest};
use crate::types::required;
use crate::AdminError;

/// GET /api/auth
pub async fn current_identity(
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<Json<IdentitySnapshot>, AdminError> {
    Ok(Json(identity.read().await.snapshot()))
}

/// POST /api/auth/login with `{role, name}`
pub async fn login(
    CurrentIdentity(identity): CurrentIdentity,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<IdentitySnapshot>, AdminError> {
    let role = req.role.ok_or(AdminError::MissingField("role"))?;
    let name = required(req.name, "name")?;
    let mut ctx = identity.write().await;
    ctx.login(role, &name)?;
    Ok(Json(ctx.snapshot()))
}

/// POST /api/auth/logout
pub async fn logout(
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<Json<IdentitySnapshot>, AdminError> {
    let mut ctx = identity.write().await;
    ctx.logout()?;
    Ok(Json(ctx.snapshot()))
}

/// PUT /api/auth/role with `{role}`
pub async fn switch_role(
    CurrentIdentity(identity): CurrentIdentity,
    JsonBody(req): JsonBody<RoleRequest>,
) -> Result<Json<IdentitySnapshot>, AdminError> {
    let role = req.role.ok_or(AdminError::MissingField("role"))?;
    let mut ctx = identity.write().await;
    ctx.switch_role(role)?;
    Ok(Json(ctx.snapshot()))
}

/// PUT /api/auth/selectors with `{currentMajor?, currentStudentId?}`
pub async fn update_selectors(
    CurrentIdentity(identity): CurrentIdentity,
    JsonBody(req): JsonBody<SelectorsRequest>,
) -> Result<Json<IdentitySnapshot>, AdminError> {
    let mut ctx = identity.write().await;
    if let Some(major) = req.current_major {
        ctx.set_current_major(major)?;
    }
    if let Some(student_id) = req.current_student_id {
        ctx.set_current_student_id(student_id)?;
    }
    Ok(Json(ctx.snapshot()))
}
