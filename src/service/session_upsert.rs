//! Create-or-merge of advising sessions keyed by (student, period).
//!
//! The merge policy lives in [`plan_upsert`], which turns a raw submission into a
//! [`SessionUpsert`]: one [`Assign`] per column. The storage then applies that
//! plan with a single `INSERT ... ON CONFLICT DO UPDATE`, so the policy is pure
//! and the write is atomic.
//!
//! Policy in the default [`MergeMode::Replace`]:
//! - `advisorId` overwrites only when truthy (present and non-empty); otherwise the
//!   stored advisor is kept.
//! - course lists and `bypasses` become the supplied value or empty when omitted.
//! - `note` becomes the supplied value or null when omitted.
//!
//! [`MergeMode::Patch`] keeps every omitted column as stored instead.

use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::db::models::{AdvisingSession, UpsertOutcome};
use crate::db::patch::{Assign, SessionUpsert};
use crate::db::sqlite::AdvisingStorage;
use crate::error::AdminError;
use crate::types::required;
use crate::types::session::SessionSubmission;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMode {
    /// Omitted lists, bypasses and note are reset to empty/null.
    #[default]
    Replace,
    /// Omitted fields keep their stored values.
    Patch,
}

pub fn plan_upsert(
    submission: SessionSubmission,
    mode: MergeMode,
) -> Result<SessionUpsert, AdminError> {
    let period_id = required(submission.period_id, "periodId")?;
    let student_id = required(submission.student_id, "studentId")?;

    // a falsy advisor never overwrites a stored one
    let advisor_id = match submission.advisor_id {
        Some(advisor) if !advisor.is_empty() => Assign::Set(advisor),
        _ => Assign::Keep,
    };

    let plan = match mode {
        MergeMode::Replace => SessionUpsert {
            student_id,
            period_id,
            advisor_id,
            advised_courses: Assign::Set(submission.advised_courses.unwrap_or_default()),
            optional_courses: Assign::Set(submission.optional_courses.unwrap_or_default()),
            repeat_courses: Assign::Set(submission.repeat_courses.unwrap_or_default()),
            bypasses: Assign::Set(submission.bypasses.unwrap_or_default()),
            note: Assign::Set(submission.note.flatten()),
        },
        MergeMode::Patch => SessionUpsert {
            student_id,
            period_id,
            advisor_id,
            advised_courses: submission.advised_courses.into(),
            optional_courses: submission.optional_courses.into(),
            repeat_courses: submission.repeat_courses.into(),
            bypasses: submission.bypasses.into(),
            note: submission.note.into(),
        },
    };
    Ok(plan)
}

pub async fn upsert_session(
    storage: &AdvisingStorage,
    submission: SessionSubmission,
    mode: MergeMode,
) -> Result<(AdvisingSession, UpsertOutcome), AdminError> {
    let plan = plan_upsert(submission, mode)?;
    let (session, outcome) = storage.upsert_session(&plan, Utc::now()).await?;
    info!(
        id = %session.id,
        student_id = %session.student_id,
        period_id = %session.period_id,
        ?mode,
        ?outcome,
        "advising session saved"
    );
    Ok((session, outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn submission(value: serde_json::Value) -> SessionSubmission {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn missing_period_is_reported_before_student() {
        let err = plan_upsert(submission(json!({})), MergeMode::Replace).unwrap_err();
        assert!(matches!(err, AdminError::MissingField("periodId")));

        let err = plan_upsert(submission(json!({ "periodId": "P1" })), MergeMode::Replace)
            .unwrap_err();
        assert!(matches!(err, AdminError::MissingField("studentId")));

        let err = plan_upsert(
            submission(json!({ "periodId": "P1", "studentId": "" })),
            MergeMode::Replace,
        )
        .unwrap_err();
        assert!(matches!(err, AdminError::MissingField("studentId")));
    }

    #[test]
    fn replace_mode_resets_omitted_fields() {
        let plan = plan_upsert(
            submission(json!({ "periodId": "P1", "studentId": "S1" })),
            MergeMode::Replace,
        )
        .unwrap();

        assert_eq!(plan.advisor_id, Assign::Keep);
        assert_eq!(plan.advised_courses, Assign::Set(vec![]));
        assert_eq!(plan.optional_courses, Assign::Set(vec![]));
        assert_eq!(plan.repeat_courses, Assign::Set(vec![]));
        assert_eq!(plan.bypasses, Assign::Set(Default::default()));
        assert_eq!(plan.note, Assign::Set(None));
    }

    #[test]
    fn falsy_advisor_is_kept_in_every_mode() {
        for mode in [MergeMode::Replace, MergeMode::Patch] {
            let plan = plan_upsert(
                submission(json!({ "periodId": "P1", "studentId": "S1", "advisorId": "" })),
                mode,
            )
            .unwrap();
            assert_eq!(plan.advisor_id, Assign::Keep);

            let plan = plan_upsert(
                submission(json!({ "periodId": "P1", "studentId": "S1", "advisorId": null })),
                mode,
            )
            .unwrap();
            assert_eq!(plan.advisor_id, Assign::Keep);
        }
    }

    #[test]
    fn truthy_advisor_is_assigned() {
        let plan = plan_upsert(
            submission(json!({ "periodId": "P1", "studentId": "S1", "advisorId": "A7" })),
            MergeMode::Replace,
        )
        .unwrap();
        assert_eq!(plan.advisor_id, Assign::Set("A7".to_string()));
    }

    #[test]
    fn patch_mode_keeps_omitted_fields() {
        let plan = plan_upsert(
            submission(json!({
                "periodId": "P1",
                "studentId": "S1",
                "repeatCourses": ["CS101"],
                "note": null,
            })),
            MergeMode::Patch,
        )
        .unwrap();

        assert_eq!(plan.advised_courses, Assign::Keep);
        assert_eq!(plan.optional_courses, Assign::Keep);
        assert_eq!(plan.repeat_courses, Assign::Set(vec!["CS101".to_string()]));
        assert_eq!(plan.bypasses, Assign::Keep);
        assert_eq!(plan.note, Assign::Set(None));
    }
}
