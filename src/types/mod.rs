//! Request shapes accepted by the HTTP handlers.

pub mod directory;
pub mod identity;
pub mod session;
pub mod setting;
pub mod template;

use serde::{Deserialize, Deserializer};

use crate::error::AdminError;

/// Distinguishes an explicit `null` (`Some(None)`) from an absent field (`None`).
/// Pair with `#[serde(default)]`.
pub fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// A required text field: absent and empty both count as missing.
pub fn required(value: Option<String>, field: &'static str) -> Result<String, AdminError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AdminError::MissingField(field)),
    }
}

/// Query flags arrive as strings; only the literal `true` enables them.
pub fn flag(value: Option<&str>) -> bool {
    value == Some("true")
}
