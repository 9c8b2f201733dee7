//! SQL DDL for initializing the advising store.
//! SQLite-first design; statements are idempotent and run on every startup.

/// SQLite schema with:
/// - text UUID primary keys for every table except `settings`, which is keyed by `key`
/// - list/map columns stored as JSON text, timestamps stored as RFC3339 text
/// - `UNIQUE(student_id, period_id)` on sessions, the target of the session upsert
/// - no foreign keys from sessions to students/periods; those references are soft
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS email_templates (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    subject TEXT NOT NULL,
    body TEXT NOT NULL,
    category TEXT NOT NULL DEFAULT 'general',
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL  -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_email_templates_category ON email_templates(category);

CREATE TABLE IF NOT EXISTS advising_sessions (
    id TEXT PRIMARY KEY,
    student_id TEXT NOT NULL,
    period_id TEXT NOT NULL,
    advisor_id TEXT NULL,
    advised_courses TEXT NOT NULL DEFAULT '[]', -- JSON array
    optional_courses TEXT NOT NULL DEFAULT '[]', -- JSON array
    repeat_courses TEXT NOT NULL DEFAULT '[]', -- JSON array
    bypasses TEXT NOT NULL DEFAULT '{}', -- JSON object
    note TEXT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE(student_id, period_id)
);

CREATE INDEX IF NOT EXISTS idx_advising_sessions_updated_at ON advising_sessions(updated_at);

CREATE TABLE IF NOT EXISTS settings (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL, -- JSON document
    category TEXT NOT NULL DEFAULT 'general',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS students (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NULL,
    major_code TEXT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_students_major_code ON students(major_code);

CREATE TABLE IF NOT EXISTS periods (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    is_active INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
)
"#;
