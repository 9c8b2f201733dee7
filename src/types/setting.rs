use serde::Deserialize;
use serde_json::Value;

use super::present;

/// One `{key, value?, category?}` entry. `value: null` is stored as JSON null;
/// an absent value leaves the stored one untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingInput {
    pub key: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub value: Option<Value>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsQuery {
    pub category: Option<String>,
    pub key: Option<String>,
}

/// Body of `PUT /api/settings`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkSettingsRequest {
    pub settings: Option<Vec<SettingInput>>,
}
