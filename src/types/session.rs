use serde::Deserialize;

use super::present;
use crate::db::models::Bypasses;
use crate::db::patch::{Assign, SessionPatch};

/// Body of `POST /api/sessions`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSubmission {
    pub period_id: Option<String>,
    pub student_id: Option<String>,
    pub advisor_id: Option<String>,
    pub advised_courses: Option<Vec<String>>,
    pub optional_courses: Option<Vec<String>>,
    pub repeat_courses: Option<Vec<String>>,
    pub bypasses: Option<Bypasses>,
    #[serde(default, deserialize_with = "present")]
    pub note: Option<Option<String>>,
}

/// Body of `PUT /api/sessions/{id}`. Absent fields are left as stored;
/// `advisorId: null` and `note: null` clear those columns.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUpdateRequest {
    pub student_id: Option<String>,
    pub period_id: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub advisor_id: Option<Option<String>>,
    pub advised_courses: Option<Vec<String>>,
    pub optional_courses: Option<Vec<String>>,
    pub repeat_courses: Option<Vec<String>>,
    pub bypasses: Option<Bypasses>,
    #[serde(default, deserialize_with = "present")]
    pub note: Option<Option<String>>,
}

impl From<SessionUpdateRequest> for SessionPatch {
    fn from(req: SessionUpdateRequest) -> Self {
        SessionPatch {
            student_id: req.student_id.into(),
            period_id: req.period_id.into(),
            advisor_id: req.advisor_id.into(),
            advised_courses: req.advised_courses.into(),
            optional_courses: req.optional_courses.into(),
            repeat_courses: req.repeat_courses.into(),
            bypasses: req.bypasses.into(),
            note: req.note.into(),
        }
    }
}

impl SessionUpdateRequest {
    /// An explicit empty id would break the (student, period) pairing.
    pub fn empty_key_field(&self) -> Option<&'static str> {
        if self.student_id.as_deref() == Some("") {
            Some("studentId")
        } else if self.period_id.as_deref() == Some("") {
            Some("periodId")
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionListQuery {
    pub student_id: Option<String>,
    pub period_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionUpsertQuery {
    #[serde(default)]
    pub mode: crate::service::session_upsert::MergeMode,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_request_maps_nulls_to_clearing_assignments() {
        let req: SessionUpdateRequest = serde_json::from_value(json!({
            "advisorId": null,
            "advisedCourses": ["MATH200"],
        }))
        .unwrap();
        let patch = SessionPatch::from(req);

        assert_eq!(patch.advisor_id, Assign::Set(None));
        assert_eq!(patch.advised_courses, Assign::Set(vec!["MATH200".to_string()]));
        assert_eq!(patch.note, Assign::Keep);
        assert_eq!(patch.student_id, Assign::Keep);
    }

    #[test]
    fn empty_pair_fields_are_reported() {
        let req: SessionUpdateRequest =
            serde_json::from_value(json!({ "periodId": "" })).unwrap();
        assert_eq!(req.empty_key_field(), Some("periodId"));
    }
}
