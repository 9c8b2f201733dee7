use serde::Deserialize;

use crate::db::patch::TemplatePatch;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateCreateRequest {
    pub name: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub category: Option<String>,
    pub is_active: Option<bool>,
}

/// Body of `PUT /api/templates`: the id plus whichever fields should change.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateUpdateRequest {
    pub id: Option<String>,
    pub name: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub category: Option<String>,
    pub is_active: Option<bool>,
}

impl TemplateUpdateRequest {
    pub fn into_parts(self) -> (Option<String>, TemplatePatch) {
        let patch = TemplatePatch {
            name: self.name,
            subject: self.subject,
            body: self.body,
            category: self.category,
            is_active: self.is_active,
        };
        (self.id, patch)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateListQuery {
    pub category: Option<String>,
    pub active_only: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}
