use serde::Deserialize;

use super::present;
use crate::identity::Role;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub role: Option<Role>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleRequest {
    pub role: Option<Role>,
}

/// Absent fields are left alone; `null` clears the selector.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorsRequest {
    #[serde(default, deserialize_with = "present")]
    pub current_major: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub current_student_id: Option<Option<String>>,
}
