use crate::db::models::{
    AdvisingSession, EmailTemplate, Period, Setting, Student, UpsertOutcome,
};
use crate::db::patch::{
    Assign, PeriodCreate, SessionPatch, SessionUpsert, SettingWrite, StudentCreate,
    TemplateCreate, TemplateFilter, TemplatePatch,
};
use crate::db::schema::SQLITE_INIT;
use crate::error::AdminError;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, QueryBuilder, Row, Sqlite, SqliteConnection};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

pub type SqlitePool = Pool<Sqlite>;

pub const DEFAULT_CATEGORY: &str = "general";

const SESSION_COLUMNS: &str = "id, student_id, period_id, advisor_id, advised_courses, \
     optional_courses, repeat_courses, bypasses, note, created_at, updated_at";
const TEMPLATE_COLUMNS: &str =
    "id, name, subject, body, category, is_active, created_at, updated_at";
const SETTING_COLUMNS: &str = "key, value, category, created_at, updated_at";

#[derive(Clone)]
pub struct AdvisingStorage {
    pool: SqlitePool,
}

impl AdvisingStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database at `database_url` and apply the schema.
    ///
    /// In-memory URLs are pinned to a single long-lived connection, since every
    /// SQLite connection would otherwise see its own empty database.
    pub async fn connect(database_url: &str) -> Result<Self, AdminError> {
        // writers queue on the write lock instead of failing with SQLITE_BUSY
        let connect_opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));
        let mut pool_opts = SqlitePoolOptions::new();
        if database_url.contains(":memory:") {
            pool_opts = pool_opts
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }
        let pool = pool_opts.connect_with(connect_opts).await?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        Ok(storage)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), AdminError> {
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), AdminError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Email templates
    // ---------------------------------------------------------------------

    pub async fn list_templates(
        &self,
        filter: &TemplateFilter,
    ) -> Result<Vec<EmailTemplate>, AdminError> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {TEMPLATE_COLUMNS} FROM email_templates WHERE 1 = 1"
        ));
        if let Some(category) = filter.category.clone() {
            qb.push(" AND category = ").push_bind(category);
        }
        if filter.active_only {
            qb.push(" AND is_active = 1");
        }
        qb.push(" ORDER BY name, created_at");

        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.into_iter().map(Self::row_to_template).collect()
    }

    pub async fn get_template(&self, id: &str) -> Result<Option<EmailTemplate>, AdminError> {
        let mut conn = self.pool.acquire().await?;
        fetch_template(&mut *conn, id).await
    }

    pub async fn create_template(
        &self,
        template: TemplateCreate,
        now: DateTime<Utc>,
    ) -> Result<EmailTemplate, AdminError> {
        // match the stored precision
        let now = now.trunc_subsecs(6);
        let record = EmailTemplate {
            id: Uuid::new_v4().to_string(),
            name: template.name,
            subject: template.subject,
            body: template.body,
            category: template.category,
            is_active: template.is_active,
            created_at: now,
            updated_at: now,
        };
        sqlx::query(
            r#"INSERT INTO email_templates (
                id, name, subject, body, category, is_active, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(&record.subject)
        .bind(&record.body)
        .bind(&record.category)
        .bind(record.is_active)
        .bind(encode_time(&now))
        .bind(encode_time(&now))
        .execute(&self.pool)
        .await?;
        Ok(record)
    }

    /// Change only the supplied columns; errors with `NotFound` for unknown ids.
    pub async fn update_template(
        &self,
        id: &str,
        patch: TemplatePatch,
        now: DateTime<Utc>,
    ) -> Result<EmailTemplate, AdminError> {
        let mut tx = self.pool.begin().await?;
        let res = sqlx::query(
            r#"UPDATE email_templates SET
                name = COALESCE(?, name),
                subject = COALESCE(?, subject),
                body = COALESCE(?, body),
                category = COALESCE(?, category),
                is_active = COALESCE(?, is_active),
                updated_at = ?
              WHERE id = ?"#,
        )
        .bind(patch.name)
        .bind(patch.subject)
        .bind(patch.body)
        .bind(patch.category)
        .bind(patch.is_active)
        .bind(encode_time(&now))
        .bind(id)
        .execute(&mut *tx)
        .await?;
        if res.rows_affected() == 0 {
            return Err(AdminError::not_found("Template", id));
        }
        let updated = fetch_template(&mut *tx, id)
            .await?
            .ok_or_else(|| AdminError::not_found("Template", id))?;
        tx.commit().await?;
        Ok(updated)
    }

    pub async fn delete_template(&self, id: &str) -> Result<(), AdminError> {
        let res = sqlx::query("DELETE FROM email_templates WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(AdminError::not_found("Template", id));
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Advising sessions
    // ---------------------------------------------------------------------

    /// Sessions matching the given filters, most recently updated first.
    pub async fn list_sessions(
        &self,
        student_id: Option<&str>,
        period_id: Option<&str>,
    ) -> Result<Vec<AdvisingSession>, AdminError> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {SESSION_COLUMNS} FROM advising_sessions WHERE 1 = 1"
        ));
        if let Some(student_id) = student_id {
            qb.push(" AND student_id = ").push_bind(student_id.to_string());
        }
        if let Some(period_id) = period_id {
            qb.push(" AND period_id = ").push_bind(period_id.to_string());
        }
        qb.push(" ORDER BY updated_at DESC");
        if student_id.is_some() && period_id.is_some() {
            qb.push(" LIMIT 1");
        }

        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.into_iter().map(Self::row_to_session).collect()
    }

    pub async fn get_session(&self, id: &str) -> Result<Option<AdvisingSession>, AdminError> {
        let mut conn = self.pool.acquire().await?;
        fetch_session(&mut *conn, id).await
    }

    /// Insert-or-merge by unique `(student_id, period_id)`.
    ///
    /// One `INSERT ... ON CONFLICT DO UPDATE ... RETURNING` statement, so concurrent
    /// writers for the same pair serialize on SQLite's write lock and end up on a
    /// single row. The outcome is `Created` when the returned `created_at` is the
    /// stamp this call bound, i.e. the insert arm ran.
    pub async fn upsert_session(
        &self,
        plan: &SessionUpsert,
        now: DateTime<Utc>,
    ) -> Result<(AdvisingSession, UpsertOutcome), AdminError> {
        let advised = encode_list(&plan.advised_courses)?;
        let optional = encode_list(&plan.optional_courses)?;
        let repeat = encode_list(&plan.repeat_courses)?;
        let bypasses = match plan.bypasses.as_ref() {
            Assign::Set(map) => encode_json(map)?,
            Assign::Keep => "{}".to_string(),
        };
        let note = match plan.note.as_ref() {
            Assign::Set(note) => note.clone(),
            Assign::Keep => None,
        };
        let stamp = encode_time(&now);

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO advising_sessions (
                id, student_id, period_id, advisor_id, advised_courses, optional_courses,
                repeat_courses, bypasses, note, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(student_id, period_id) DO UPDATE SET
                advisor_id = CASE WHEN ? THEN excluded.advisor_id ELSE advising_sessions.advisor_id END,
                advised_courses = CASE WHEN ? THEN excluded.advised_courses ELSE advising_sessions.advised_courses END,
                optional_courses = CASE WHEN ? THEN excluded.optional_courses ELSE advising_sessions.optional_courses END,
                repeat_courses = CASE WHEN ? THEN excluded.repeat_courses ELSE advising_sessions.repeat_courses END,
                bypasses = CASE WHEN ? THEN excluded.bypasses ELSE advising_sessions.bypasses END,
                note = CASE WHEN ? THEN excluded.note ELSE advising_sessions.note END,
                updated_at = excluded.updated_at
            RETURNING {SESSION_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(&plan.student_id)
        .bind(&plan.period_id)
        .bind(plan.advisor_id.as_ref().into_option())
        .bind(advised)
        .bind(optional)
        .bind(repeat)
        .bind(bypasses)
        .bind(note)
        .bind(&stamp)
        .bind(&stamp)
        .bind(plan.advisor_id.is_set())
        .bind(plan.advised_courses.is_set())
        .bind(plan.optional_courses.is_set())
        .bind(plan.repeat_courses.is_set())
        .bind(plan.bypasses.is_set())
        .bind(plan.note.is_set())
        .fetch_one(&self.pool)
        .await?;

        let created_at: String = row.try_get("created_at")?;
        let outcome = outcome_for(&created_at, &stamp);
        let session = Self::row_to_session(row)?;

        debug!(
            id = %session.id,
            student_id = %session.student_id,
            period_id = %session.period_id,
            ?outcome,
            "session upserted"
        );
        Ok((session, outcome))
    }

    /// Apply the assigned columns to the session with `id`.
    pub async fn update_session(
        &self,
        id: &str,
        patch: SessionPatch,
        now: DateTime<Utc>,
    ) -> Result<AdvisingSession, AdminError> {
        let mut tx = self.pool.begin().await?;

        let advised = patch.advised_courses.as_ref().into_option().map(encode_json).transpose()?;
        let optional = patch.optional_courses.as_ref().into_option().map(encode_json).transpose()?;
        let repeat = patch.repeat_courses.as_ref().into_option().map(encode_json).transpose()?;
        let bypasses = patch.bypasses.as_ref().into_option().map(encode_json).transpose()?;

        let res = sqlx::query(
            r#"UPDATE advising_sessions SET
                student_id = CASE WHEN ? THEN ? ELSE student_id END,
                period_id = CASE WHEN ? THEN ? ELSE period_id END,
                advisor_id = CASE WHEN ? THEN ? ELSE advisor_id END,
                advised_courses = CASE WHEN ? THEN ? ELSE advised_courses END,
                optional_courses = CASE WHEN ? THEN ? ELSE optional_courses END,
                repeat_courses = CASE WHEN ? THEN ? ELSE repeat_courses END,
                bypasses = CASE WHEN ? THEN ? ELSE bypasses END,
                note = CASE WHEN ? THEN ? ELSE note END,
                updated_at = ?
              WHERE id = ?"#,
        )
        .bind(patch.student_id.is_set())
        .bind(patch.student_id.as_ref().into_option().cloned())
        .bind(patch.period_id.is_set())
        .bind(patch.period_id.as_ref().into_option().cloned())
        .bind(patch.advisor_id.is_set())
        .bind(patch.advisor_id.as_ref().into_option().cloned().flatten())
        .bind(patch.advised_courses.is_set())
        .bind(advised)
        .bind(patch.optional_courses.is_set())
        .bind(optional)
        .bind(patch.repeat_courses.is_set())
        .bind(repeat)
        .bind(patch.bypasses.is_set())
        .bind(bypasses)
        .bind(patch.note.is_set())
        .bind(patch.note.as_ref().into_option().cloned().flatten())
        .bind(encode_time(&now))
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AdminError::from_conflict(e, "A session already exists for this student and period")
        })?;
        if res.rows_affected() == 0 {
            return Err(AdminError::not_found("Session", id));
        }

        let updated = fetch_session(&mut *tx, id)
            .await?
            .ok_or_else(|| AdminError::not_found("Session", id))?;
        tx.commit().await?;
        Ok(updated)
    }

    pub async fn delete_session(&self, id: &str) -> Result<(), AdminError> {
        let res = sqlx::query("DELETE FROM advising_sessions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(AdminError::not_found("Session", id));
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Settings
    // ---------------------------------------------------------------------

    pub async fn list_settings(&self, category: Option<&str>) -> Result<Vec<Setting>, AdminError> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {SETTING_COLUMNS} FROM settings WHERE 1 = 1"
        ));
        if let Some(category) = category {
            qb.push(" AND category = ").push_bind(category.to_string());
        }
        qb.push(" ORDER BY key");

        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.into_iter().map(Self::row_to_setting).collect()
    }

    pub async fn get_setting(&self, key: &str) -> Result<Option<Setting>, AdminError> {
        let mut conn = self.pool.acquire().await?;
        fetch_setting(&mut *conn, key).await
    }

    /// Upsert by unique key. Returns the stored row and whether it was new.
    pub async fn upsert_setting(
        &self,
        write: SettingWrite,
        now: DateTime<Utc>,
    ) -> Result<(Setting, UpsertOutcome), AdminError> {
        let mut conn = self.pool.acquire().await?;
        upsert_setting_in(&mut *conn, write, now).await
    }

    /// Batch upsert using a single transaction. Returns rows in input order.
    /// Every statement in the batch is a write, so the transaction takes the write
    /// lock on its first statement and never upgrades from a read lock.
    pub async fn upsert_settings(
        &self,
        writes: Vec<SettingWrite>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Setting>, AdminError> {
        let mut tx = self.pool.begin().await?;
        let mut stored = Vec::with_capacity(writes.len());
        for write in writes.into_iter() {
            let (setting, _) = upsert_setting_in(&mut *tx, write, now).await?;
            stored.push(setting);
        }
        tx.commit().await?;
        Ok(stored)
    }

    // ---------------------------------------------------------------------
    // Students and periods
    // ---------------------------------------------------------------------

    pub async fn list_students(&self, major_code: Option<&str>) -> Result<Vec<Student>, AdminError> {
        let mut qb = QueryBuilder::<Sqlite>::new(
            "SELECT id, name, email, major_code, created_at FROM students WHERE 1 = 1",
        );
        if let Some(major_code) = major_code {
            qb.push(" AND major_code = ").push_bind(major_code.to_string());
        }
        qb.push(" ORDER BY name");

        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.into_iter().map(Self::row_to_student).collect()
    }

    pub async fn get_student(&self, id: &str) -> Result<Option<Student>, AdminError> {
        let row = sqlx::query(
            "SELECT id, name, email, major_code, created_at FROM students WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::row_to_student).transpose()
    }

    pub async fn create_student(
        &self,
        student: StudentCreate,
        now: DateTime<Utc>,
    ) -> Result<Student, AdminError> {
        let now = now.trunc_subsecs(6);
        let record = Student {
            id: Uuid::new_v4().to_string(),
            name: student.name,
            email: student.email,
            major_code: student.major_code,
            created_at: now,
        };
        sqlx::query(
            "INSERT INTO students (id, name, email, major_code, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.major_code)
        .bind(encode_time(&now))
        .execute(&self.pool)
        .await?;
        Ok(record)
    }

    pub async fn list_periods(&self, active_only: bool) -> Result<Vec<Period>, AdminError> {
        let sql = if active_only {
            "SELECT id, name, is_active, created_at FROM periods WHERE is_active = 1 ORDER BY created_at DESC"
        } else {
            "SELECT id, name, is_active, created_at FROM periods ORDER BY created_at DESC"
        };
        let rows = sqlx::query(sql).fetch_all(&self.pool).await?;
        rows.into_iter().map(Self::row_to_period).collect()
    }

    pub async fn create_period(
        &self,
        period: PeriodCreate,
        now: DateTime<Utc>,
    ) -> Result<Period, AdminError> {
        let now = now.trunc_subsecs(6);
        let record = Period {
            id: Uuid::new_v4().to_string(),
            name: period.name,
            is_active: period.is_active,
            created_at: now,
        };
        sqlx::query("INSERT INTO periods (id, name, is_active, created_at) VALUES (?, ?, ?, ?)")
            .bind(&record.id)
            .bind(&record.name)
            .bind(record.is_active)
            .bind(encode_time(&now))
            .execute(&self.pool)
            .await?;
        Ok(record)
    }

    // ---------------------------------------------------------------------
    // Row decoding
    // ---------------------------------------------------------------------

    fn row_to_session(row: SqliteRow) -> Result<AdvisingSession, AdminError> {
        let advised: String = row.try_get("advised_courses")?;
        let optional: String = row.try_get("optional_courses")?;
        let repeat: String = row.try_get("repeat_courses")?;
        let bypasses: String = row.try_get("bypasses")?;
        let created_at: String = row.try_get("created_at")?;
        let updated_at: String = row.try_get("updated_at")?;

        Ok(AdvisingSession {
            id: row.try_get("id")?,
            student_id: row.try_get("student_id")?,
            period_id: row.try_get("period_id")?,
            advisor_id: row.try_get("advisor_id")?,
            advised_courses: decode_json(&advised)?,
            optional_courses: decode_json(&optional)?,
            repeat_courses: decode_json(&repeat)?,
            bypasses: decode_json(&bypasses)?,
            note: row.try_get("note")?,
            created_at: decode_time(&created_at)?,
            updated_at: decode_time(&updated_at)?,
        })
    }

    fn row_to_template(row: SqliteRow) -> Result<EmailTemplate, AdminError> {
        let is_active: i64 = row.try_get("is_active")?;
        let created_at: String = row.try_get("created_at")?;
        let updated_at: String = row.try_get("updated_at")?;

        Ok(EmailTemplate {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            subject: row.try_get("subject")?,
            body: row.try_get("body")?,
            category: row.try_get("category")?,
            is_active: is_active != 0,
            created_at: decode_time(&created_at)?,
            updated_at: decode_time(&updated_at)?,
        })
    }

    fn row_to_setting(row: SqliteRow) -> Result<Setting, AdminError> {
        let value: String = row.try_get("value")?;
        let created_at: String = row.try_get("created_at")?;
        let updated_at: String = row.try_get("updated_at")?;

        Ok(Setting {
            key: row.try_get("key")?,
            value: decode_json(&value)?,
            category: row.try_get("category")?,
            created_at: decode_time(&created_at)?,
            updated_at: decode_time(&updated_at)?,
        })
    }

    fn row_to_student(row: SqliteRow) -> Result<Student, AdminError> {
        let created_at: String = row.try_get("created_at")?;
        Ok(Student {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            major_code: row.try_get("major_code")?,
            created_at: decode_time(&created_at)?,
        })
    }

    fn row_to_period(row: SqliteRow) -> Result<Period, AdminError> {
        let is_active: i64 = row.try_get("is_active")?;
        let created_at: String = row.try_get("created_at")?;
        Ok(Period {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            is_active: is_active != 0,
            created_at: decode_time(&created_at)?,
        })
    }
}

async fn fetch_template(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<Option<EmailTemplate>, AdminError> {
    let row = sqlx::query(&format!(
        "SELECT {TEMPLATE_COLUMNS} FROM email_templates WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;
    row.map(AdvisingStorage::row_to_template).transpose()
}

async fn fetch_session(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<Option<AdvisingSession>, AdminError> {
    let row = sqlx::query(&format!(
        "SELECT {SESSION_COLUMNS} FROM advising_sessions WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;
    row.map(AdvisingStorage::row_to_session).transpose()
}

async fn fetch_setting(
    conn: &mut SqliteConnection,
    key: &str,
) -> Result<Option<Setting>, AdminError> {
    let row = sqlx::query(&format!("SELECT {SETTING_COLUMNS} FROM settings WHERE key = ?"))
        .bind(key)
        .fetch_optional(&mut *conn)
        .await?;
    row.map(AdvisingStorage::row_to_setting).transpose()
}

async fn upsert_setting_in(
    conn: &mut SqliteConnection,
    write: SettingWrite,
    now: DateTime<Utc>,
) -> Result<(Setting, UpsertOutcome), AdminError> {
    let supplied_value = write.value.as_ref().map(encode_json).transpose()?;
    let insert_value = supplied_value
        .clone()
        .unwrap_or_else(|| Value::Null.to_string());
    let insert_category = write
        .category
        .clone()
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
    let stamp = encode_time(&now);

    let row = sqlx::query(&format!(
        r#"
        INSERT INTO settings (key, value, category, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT(key) DO UPDATE SET
            value = COALESCE(?, settings.value),
            category = COALESCE(?, settings.category),
            updated_at = excluded.updated_at
        RETURNING {SETTING_COLUMNS}
        "#
    ))
    .bind(&write.key)
    .bind(insert_value)
    .bind(insert_category)
    .bind(&stamp)
    .bind(&stamp)
    .bind(supplied_value)
    .bind(write.category)
    .fetch_one(&mut *conn)
    .await?;

    let created_at: String = row.try_get("created_at")?;
    let outcome = outcome_for(&created_at, &stamp);
    Ok((AdvisingStorage::row_to_setting(row)?, outcome))
}

/// The insert arm of an upsert stamps `created_at` with this call's own time.
fn outcome_for(created_at: &str, stamp: &str) -> UpsertOutcome {
    if created_at == stamp {
        UpsertOutcome::Created
    } else {
        UpsertOutcome::Updated
    }
}

/// Fixed-width RFC3339 so that text ordering matches time ordering.
fn encode_time(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_time(s: &str) -> Result<DateTime<Utc>, sqlx::Error> {
    Ok(DateTime::parse_from_rfc3339(s)
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?
        .with_timezone(&Utc))
}

/// Insert value for a course list: the assigned sequence, or `[]`.
fn encode_list(list: &Assign<Vec<String>>) -> Result<String, AdminError> {
    match list {
        Assign::Set(courses) => encode_json(courses.as_slice()),
        Assign::Keep => Ok("[]".to_string()),
    }
}

fn encode_json<T: Serialize + ?Sized>(value: &T) -> Result<String, AdminError> {
    Ok(serde_json::to_string(value)?)
}

fn decode_json<T: DeserializeOwned>(s: &str) -> Result<T, sqlx::Error> {
    serde_json::from_str(s).map_err(|e| sqlx::Error::Decode(Box::new(e)))
}
