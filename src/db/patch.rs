//! Write-side shapes handed to the storage layer.
//!
//! `Create` types carry everything an insert needs. `Patch`/`Upsert` types use
//! [`Assign`] per column so the storage can tell "leave as stored" apart from
//! "overwrite with this value" inside a single statement.

use serde_json::Value;

use super::models::Bypasses;

/// Column-level instruction for an update.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Assign<T> {
    #[default]
    Keep,
    Set(T),
}

impl<T> Assign<T> {
    pub fn is_set(&self) -> bool {
        matches!(self, Assign::Set(_))
    }

    pub fn as_ref(&self) -> Assign<&T> {
        match self {
            Assign::Set(v) => Assign::Set(v),
            Assign::Keep => Assign::Keep,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Assign::Set(v) => Some(v),
            Assign::Keep => None,
        }
    }
}

impl<T> From<Option<T>> for Assign<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Assign::Set(v),
            None => Assign::Keep,
        }
    }
}

/// Insert-or-merge keyed by `(student_id, period_id)`.
///
/// On insert, `Keep` columns take their empty default (null scalar, `[]`, `{}`).
/// On conflict, `Keep` columns retain the stored value.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionUpsert {
    pub student_id: String,
    pub period_id: String,
    pub advisor_id: Assign<String>,
    pub advised_courses: Assign<Vec<String>>,
    pub optional_courses: Assign<Vec<String>>,
    pub repeat_courses: Assign<Vec<String>>,
    pub bypasses: Assign<Bypasses>,
    pub note: Assign<Option<String>>,
}

/// In-place update of a session addressed by id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionPatch {
    pub student_id: Assign<String>,
    pub period_id: Assign<String>,
    pub advisor_id: Assign<Option<String>>,
    pub advised_courses: Assign<Vec<String>>,
    pub optional_courses: Assign<Vec<String>>,
    pub repeat_courses: Assign<Vec<String>>,
    pub bypasses: Assign<Bypasses>,
    pub note: Assign<Option<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateCreate {
    pub name: String,
    pub subject: String,
    pub body: String,
    pub category: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TemplatePatch {
    pub name: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub category: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TemplateFilter {
    pub category: Option<String>,
    pub active_only: bool,
}

/// Create-or-update keyed by `key`. `None` keeps the stored column on update.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingWrite {
    pub key: String,
    pub value: Option<Value>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentCreate {
    pub name: String,
    pub email: Option<String>,
    pub major_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodCreate {
    pub name: String,
    pub is_active: bool,
}
